//! Seeded farm generation for the harness.
//!
//! The harness world is laid out in two steps: [`plan_farm`] draws a
//! [`FarmPlan`] from a seeded RNG (pure, reproducible), and
//! [`FarmPlan::build`] turns it into a [`GridWorld`]. Entity IDs are fresh
//! on every build; tiles and kinds depend only on the seed.

use std::collections::BTreeSet;

use autoshaker_types::{Season, TilePoint, WorldDate};
use autoshaker_world::{Bush, BushKind, FruitTree, GridWorld, IndoorPot, MAX_FRUIT, Tree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::EngineError;

// -----------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------

/// The `harness` section of `autoshaker-config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HarnessConfig {
    /// RNG seed for the layout and the walk.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Location name reported with every interaction.
    #[serde(default = "default_location")]
    pub location: String,

    /// Farm width in tiles.
    #[serde(default = "default_side")]
    pub width: i32,

    /// Farm height in tiles.
    #[serde(default = "default_side")]
    pub height: i32,

    /// Regular trees to plant.
    #[serde(default = "default_trees")]
    pub trees: u32,

    /// Fruit trees to plant.
    #[serde(default = "default_fruit_trees")]
    pub fruit_trees: u32,

    /// Free-standing bushes to plant.
    #[serde(default = "default_bushes")]
    pub bushes: u32,

    /// Indoor pots holding a tea bush.
    #[serde(default = "default_pots")]
    pub pots: u32,

    /// Large bushes.
    #[serde(default = "default_large_bushes")]
    pub large_bushes: u32,

    /// Walking agents.
    #[serde(default = "default_agents")]
    pub agents: u32,

    /// Foraging level given to every agent.
    #[serde(default = "default_foraging_level")]
    pub foraging_level: u32,

    /// Magnetic radius in pixels given to every agent.
    #[serde(default = "default_magnetic_radius")]
    pub magnetic_radius: u32,

    /// In-world days to simulate.
    #[serde(default = "default_days")]
    pub days: u32,

    /// Ticks per in-world day.
    #[serde(default = "default_ticks_per_day")]
    pub ticks_per_day: u32,

    /// Agents take one step every this many ticks.
    #[serde(default = "default_move_every")]
    pub move_every: u32,

    /// Absolute ticks (counted from 1) on which the toggle keybind is
    /// pressed.
    #[serde(default)]
    pub toggle_at: Vec<u64>,

    /// First simulated season.
    #[serde(default = "default_start_season")]
    pub start_season: Season,

    /// First simulated day of that season.
    #[serde(default = "default_start_day")]
    pub start_day: u32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            location: default_location(),
            width: default_side(),
            height: default_side(),
            trees: default_trees(),
            fruit_trees: default_fruit_trees(),
            bushes: default_bushes(),
            pots: default_pots(),
            large_bushes: default_large_bushes(),
            agents: default_agents(),
            foraging_level: default_foraging_level(),
            magnetic_radius: default_magnetic_radius(),
            days: default_days(),
            ticks_per_day: default_ticks_per_day(),
            move_every: default_move_every(),
            toggle_at: Vec::new(),
            start_season: default_start_season(),
            start_day: default_start_day(),
        }
    }
}

impl HarnessConfig {
    /// The first simulated date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Calendar`] if `start_day` is out of range.
    pub fn start_date(&self) -> Result<WorldDate, EngineError> {
        Ok(WorldDate::new(1, self.start_season, self.start_day)?)
    }

    fn in_bounds(&self, tile: TilePoint) -> bool {
        (0..self.width).contains(&tile.x) && (0..self.height).contains(&tile.y)
    }

    /// Clamp a tile into the farm.
    pub fn clamp(&self, tile: TilePoint) -> TilePoint {
        if self.in_bounds(tile) {
            return tile;
        }
        let max_x = self.width.saturating_sub(1).max(0);
        let max_y = self.height.saturating_sub(1).max(0);
        TilePoint::new(tile.x.clamp(0, max_x), tile.y.clamp(0, max_y))
    }
}

const fn default_seed() -> u64 {
    42
}

fn default_location() -> String {
    String::from("Farm")
}

const fn default_side() -> i32 {
    24
}

const fn default_trees() -> u32 {
    30
}

const fn default_fruit_trees() -> u32 {
    10
}

const fn default_bushes() -> u32 {
    14
}

const fn default_pots() -> u32 {
    4
}

const fn default_large_bushes() -> u32 {
    3
}

const fn default_agents() -> u32 {
    1
}

const fn default_foraging_level() -> u32 {
    1
}

const fn default_magnetic_radius() -> u32 {
    128
}

const fn default_days() -> u32 {
    3
}

const fn default_ticks_per_day() -> u32 {
    400
}

const fn default_move_every() -> u32 {
    4
}

const fn default_start_season() -> Season {
    Season::Spring
}

const fn default_start_day() -> u32 {
    14
}

// -----------------------------------------------------------------------
// Plan
// -----------------------------------------------------------------------

/// One planned entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Planned {
    /// Regular tree, possibly a stump.
    Tree {
        /// Placed as a stump.
        stump: bool,
    },
    /// Fruit tree with its starting fruit.
    FruitTree {
        /// Starting fruit.
        fruit: u32,
    },
    /// Free-standing bush.
    Bush {
        /// Species.
        kind: BushKind,
        /// Owned by the town.
        town: bool,
    },
    /// Indoor pot with a tea bush.
    PottedTea,
    /// Large bush.
    LargeBush {
        /// Species.
        kind: BushKind,
    },
}

/// A reproducible farm layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmPlan {
    /// Location name.
    pub location: String,
    /// Entities in placement order.
    pub entities: Vec<(TilePoint, Planned)>,
}

/// How many random draws to try per entity before giving up on it.
const PLACEMENT_ATTEMPTS: u32 = 32;

const BUSH_KINDS: [BushKind; 4] = [
    BushKind::Tea,
    BushKind::WildBerry,
    BushKind::Evergreen,
    BushKind::Decorative,
];

/// Draw a layout from the configured counts and seed.
///
/// Terrain features and pots each take a free tile; large bushes may
/// overlap anything. Entities that find no free tile are dropped.
pub fn plan_farm(config: &HarnessConfig) -> FarmPlan {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut taken: BTreeSet<TilePoint> = BTreeSet::new();
    let mut entities = Vec::new();

    let width = config.width.max(1);
    let height = config.height.max(1);
    let free_tile = |rng: &mut StdRng, taken: &mut BTreeSet<TilePoint>| {
        (0..PLACEMENT_ATTEMPTS)
            .map(|_| TilePoint::new(rng.random_range(0..width), rng.random_range(0..height)))
            .find(|tile| taken.insert(*tile))
    };

    for _ in 0..config.trees {
        if let Some(tile) = free_tile(&mut rng, &mut taken) {
            let stump = rng.random_bool(0.1);
            entities.push((tile, Planned::Tree { stump }));
        }
    }
    for _ in 0..config.fruit_trees {
        if let Some(tile) = free_tile(&mut rng, &mut taken) {
            let fruit = rng.random_range(0..=MAX_FRUIT);
            entities.push((tile, Planned::FruitTree { fruit }));
        }
    }
    for _ in 0..config.bushes {
        if let Some(tile) = free_tile(&mut rng, &mut taken) {
            let kind = pick_kind(&mut rng);
            let town = rng.random_bool(0.1);
            entities.push((tile, Planned::Bush { kind, town }));
        }
    }
    for _ in 0..config.pots {
        if let Some(tile) = free_tile(&mut rng, &mut taken) {
            entities.push((tile, Planned::PottedTea));
        }
    }
    for _ in 0..config.large_bushes {
        let tile = TilePoint::new(rng.random_range(0..width), rng.random_range(0..height));
        let kind = if rng.random_bool(0.5) {
            BushKind::WildBerry
        } else {
            BushKind::Evergreen
        };
        entities.push((tile, Planned::LargeBush { kind }));
    }

    debug!(planned = entities.len(), seed = config.seed, "farm planned");
    FarmPlan {
        location: config.location.clone(),
        entities,
    }
}

fn pick_kind(rng: &mut StdRng) -> BushKind {
    let idx = rng.random_range(0..BUSH_KINDS.len());
    BUSH_KINDS.get(idx).copied().unwrap_or(BushKind::Tea)
}

impl FarmPlan {
    /// Place every planned entity into a fresh [`GridWorld`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::World`] if two entities claim the same tile.
    pub fn build(&self) -> Result<GridWorld, EngineError> {
        let mut world = GridWorld::new(self.location.clone());
        for (tile, planned) in &self.entities {
            let tile = *tile;
            match *planned {
                Planned::Tree { stump } => {
                    let tree = Tree::new(tile);
                    world.add_tree(if stump { tree.stump() } else { tree })?;
                }
                Planned::FruitTree { fruit } => {
                    world.add_fruit_tree(FruitTree::new(tile, fruit))?;
                }
                Planned::Bush { kind, town } => {
                    let bush = Bush::new(tile, kind);
                    world.add_bush(if town { bush.town() } else { bush })?;
                }
                Planned::PottedTea => {
                    world.place_pot(tile, IndoorPot::with_bush(Bush::new(tile, BushKind::Tea)))?;
                }
                Planned::LargeBush { kind } => {
                    world.add_large_bush(Bush::new(tile, kind))?;
                }
            }
        }
        info!(
            location = %self.location,
            entities = world.entity_count(),
            "farm built"
        );
        Ok(world)
    }
}
