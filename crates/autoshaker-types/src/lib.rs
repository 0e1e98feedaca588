//! Shared type definitions for the AutoShaker proximity dispatcher.
//!
//! These types cross the boundary between the host world
//! (`autoshaker-world`) and the dispatch engine (`autoshaker-core`).
//!
//! # Modules
//!
//! - [`agent`] -- Read-only per-tick agent snapshot and skill kinds
//! - [`calendar`] -- Seasons and in-world dates (the eligibility window)
//! - [`geometry`] -- Tile coordinates and Chebyshev distance
//! - [`ids`] -- Type-safe UUID wrappers for agents and entities

pub mod agent;
pub mod calendar;
pub mod geometry;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use agent::{AgentSnapshot, SkillKind};
pub use calendar::{CalendarError, DAYS_PER_SEASON, Season, WorldDate};
pub use geometry::{TILE_SIZE, TilePoint, tile_radius_from_magnetism};
pub use ids::{AgentId, EntityId};
