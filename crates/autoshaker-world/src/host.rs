//! Collaborator interfaces the dispatch engine consumes from its host.
//!
//! The host world owns every tile, entity, and container. The engine only
//! reads through these traits and requests interactions through an
//! [`InteractionSink`]; what an interaction actually does to the world is
//! the host's business.
//!
//! Entity predicates are host-computed. `is_actionable`, for example, folds
//! in whatever the host considers blocking (snow cover, an obstruction).

use autoshaker_types::{EntityId, Season, TilePoint, WorldDate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Entity categories
// ---------------------------------------------------------------------------

/// A regular (seed-dropping) tree.
pub trait TreeFeature: core::fmt::Debug {
    /// Stable identity.
    fn id(&self) -> EntityId;
    /// Tile the tree is rooted on.
    fn tile(&self) -> TilePoint;
    /// Whether the tree has been chopped down to a stump.
    fn is_stump(&self) -> bool;
    /// Whether a seed is ready to drop.
    fn has_seed(&self) -> bool;
    /// Whether the host currently allows interacting with the tree.
    fn is_actionable(&self) -> bool;
}

/// A fruit-bearing tree.
pub trait FruitTreeFeature: core::fmt::Debug {
    /// Stable identity.
    fn id(&self) -> EntityId;
    /// Tile the tree is rooted on.
    fn tile(&self) -> TilePoint;
    /// Whether the tree has been chopped down to a stump.
    fn is_stump(&self) -> bool;
    /// Ripe fruit currently on the tree.
    fn fruit_count(&self) -> u32;
    /// Whether the host currently allows interacting with the tree.
    fn is_actionable(&self) -> bool;
}

/// A shrub/bush, free-standing, potted, or large.
pub trait BushFeature: core::fmt::Debug {
    /// Stable identity.
    fn id(&self) -> EntityId;
    /// Tile the bush occupies (top-left tile for large bushes).
    fn tile(&self) -> TilePoint;
    /// Whether the bush belongs to the town and must not be harvested.
    fn is_town_bush(&self) -> bool;
    /// Whether the host currently allows interacting with the bush.
    fn is_actionable(&self) -> bool;
    /// Whether the bush is blooming on the given season and day.
    fn in_bloom(&self, season: Season, day: u32) -> bool;
}

/// A terrain entity found at a tile or in a location's large-feature list.
///
/// The category set is closed; anything else the host stores is reported
/// as [`TerrainFeature::Unknown`] so the engine can log and skip it.
#[derive(Debug, Clone, Copy)]
pub enum TerrainFeature<'a> {
    /// A regular tree.
    Tree(&'a dyn TreeFeature),
    /// A fruit tree.
    FruitTree(&'a dyn FruitTreeFeature),
    /// A bush.
    Bush(&'a dyn BushFeature),
    /// Some other terrain entity the engine has no rule for.
    Unknown {
        /// Host-side type name, for logging.
        kind: &'a str,
    },
}

/// A placed container (an indoor pot) that may hold a bush.
pub trait Container: core::fmt::Debug {
    /// The bush planted in this container, if any.
    fn held_bush(&self) -> Option<&dyn BushFeature>;
}

/// Interaction category of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeatureCategory {
    /// Regular tree.
    Tree,
    /// Fruit tree.
    FruitTree,
    /// Bush (any lookup path).
    Bush,
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// The location the agent is currently in.
pub trait GameLocation {
    /// Location name, passed back with every interaction.
    fn name(&self) -> &str;

    /// The terrain feature rooted on `tile`, if any.
    fn terrain_feature_at(&self, tile: TilePoint) -> Option<TerrainFeature<'_>>;

    /// The container placed on `tile`, if any.
    fn container_at(&self, tile: TilePoint) -> Option<&dyn Container>;

    /// Large, possibly multi-tile features. These are not reachable by tile
    /// lookup and must be range-checked by the caller.
    fn large_terrain_features(&self) -> Vec<TerrainFeature<'_>>;
}

// ---------------------------------------------------------------------------
// Action trigger and notices
// ---------------------------------------------------------------------------

/// One requested interaction with a world entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// The entity to interact with.
    pub entity: EntityId,
    /// Its category.
    pub category: FeatureCategory,
    /// The entity's tile.
    pub tile: TilePoint,
    /// Name of the location the entity is in.
    pub location: String,
}

/// Receives interaction requests. Fire-and-forget from the engine's side.
pub trait InteractionSink {
    /// Perform the entity's use action (shake the tree, harvest the bush).
    fn perform_use_action(&mut self, interaction: Interaction);
}

impl InteractionSink for Vec<Interaction> {
    fn perform_use_action(&mut self, interaction: Interaction) {
        self.push(interaction);
    }
}

/// On-screen notice surface.
pub trait Hud {
    /// Show a short message to the player.
    fn add_hud_message(&mut self, message: &str);
}

impl Hud for Vec<String> {
    fn add_hud_message(&mut self, message: &str) {
        self.push(message.to_owned());
    }
}

// ---------------------------------------------------------------------------
// Tick context
// ---------------------------------------------------------------------------

/// Host state sampled at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickContext {
    /// Whether a save is loaded and the world can be queried.
    pub world_ready: bool,
    /// Whether a cutscene/event currently takes control away from the player.
    pub event_blocks_control: bool,
    /// Whether a blocking menu is open.
    pub menu_open: bool,
    /// Current in-world date.
    pub date: WorldDate,
}

impl TickContext {
    /// A context with a ready world, no event, and no menu.
    pub const fn ready(date: WorldDate) -> Self {
        Self {
            world_ready: true,
            event_blocks_control: false,
            menu_open: false,
            date,
        }
    }
}
