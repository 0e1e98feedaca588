//! Read-only agent snapshot handed to the core each tick.
//!
//! The host mutates agents every tick; the core never does. An
//! [`AgentSnapshot`] captures the few facts a scan needs: identity, tile,
//! applied magnetic radius, and skill levels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::TilePoint;
use crate::ids::AgentId;

/// A skill tracked by the host for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    /// Gathering from trees and wild plants. Shaking a regular tree needs
    /// level 1.
    Foraging,
    /// Crops and animals.
    Farming,
    /// Fishing.
    Fishing,
    /// Mining.
    Mining,
    /// Combat.
    Combat,
}

/// The state of one agent as observed at the start of a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// Agent identity (one per concurrently active player screen).
    pub id: AgentId,
    /// Tile the agent is standing on.
    pub tile: TilePoint,
    /// Applied magnetic radius in pixels.
    pub magnetic_radius: u32,
    /// Skill levels; absent skills are level 0.
    #[serde(default)]
    pub skills: BTreeMap<SkillKind, u32>,
}

impl AgentSnapshot {
    /// Create a snapshot with no skills.
    pub const fn new(id: AgentId, tile: TilePoint, magnetic_radius: u32) -> Self {
        Self {
            id,
            tile,
            magnetic_radius,
            skills: BTreeMap::new(),
        }
    }

    /// Builder-style helper to set a skill level.
    #[must_use]
    pub fn with_skill(mut self, skill: SkillKind, level: u32) -> Self {
        self.skills.insert(skill, level);
        self
    }

    /// Current level in `skill`, 0 if unknown.
    pub fn skill_level(&self, skill: SkillKind) -> u32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }
}
