//! Host world interfaces and the in-memory reference world.
//!
//! The dispatch engine never owns world state. This crate defines the
//! collaborator traits it reads through and ships [`GridWorld`], a small
//! tile-grid host used by tests and the harness binary.
//!
//! # Modules
//!
//! - [`error`] -- Error types for reference-world operations.
//! - [`features`] -- Concrete trees, fruit trees, bushes, and pots with their
//!   bloom calendars.
//! - [`grid`] -- [`GridWorld`]: tile-indexed terrain, pots, and large bushes,
//!   plus interaction effects and overnight growth.
//! - [`host`] -- Collaborator traits ([`GameLocation`], [`InteractionSink`],
//!   [`Hud`]) and the per-tick [`TickContext`].

pub mod error;
pub mod features;
pub mod grid;
pub mod host;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use features::{Bush, BushKind, FruitTree, IndoorPot, MAX_FRUIT, Tree};
pub use grid::{GridWorld, PlacedFeature};
pub use host::{
    BushFeature, Container, FeatureCategory, FruitTreeFeature, GameLocation, Hud, Interaction,
    InteractionSink, TerrainFeature, TickContext, TreeFeature,
};
