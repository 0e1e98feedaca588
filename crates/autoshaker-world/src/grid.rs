//! In-memory reference host: one location laid out on a tile grid.
//!
//! [`GridWorld`] stores terrain features by tile, pots by tile, and large
//! bushes in a separate list, mirroring the three lookup paths a real host
//! exposes. It implements [`GameLocation`] for reads and applies recorded
//! [`Interaction`]s after a tick with minimal effects:
//!
//! - tree: the seed drops
//! - fruit tree: all fruit drops
//! - bush: harvested until the next day
//!
//! [`GridWorld::start_day`] is the stand-in for overnight growth.

use std::collections::BTreeMap;

use autoshaker_types::{EntityId, TilePoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::WorldError;
use crate::features::{Bush, FruitTree, IndoorPot, MAX_FRUIT, Tree};
use crate::host::{Container, FeatureCategory, GameLocation, Interaction, TerrainFeature};

/// A terrain feature rooted on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacedFeature {
    /// Regular tree.
    Tree(Tree),
    /// Fruit tree.
    FruitTree(FruitTree),
    /// Free-standing bush.
    Bush(Bush),
    /// Anything else (grass, tilled soil), named by kind.
    Other(String),
}

impl PlacedFeature {
    fn as_feature(&self) -> TerrainFeature<'_> {
        match self {
            Self::Tree(tree) => TerrainFeature::Tree(tree),
            Self::FruitTree(tree) => TerrainFeature::FruitTree(tree),
            Self::Bush(bush) => TerrainFeature::Bush(bush),
            Self::Other(kind) => TerrainFeature::Unknown {
                kind: kind.as_str(),
            },
        }
    }

    fn id(&self) -> Option<EntityId> {
        match self {
            Self::Tree(tree) => Some(tree.id),
            Self::FruitTree(tree) => Some(tree.id),
            Self::Bush(bush) => Some(bush.id),
            Self::Other(_) => None,
        }
    }
}

/// Where an indexed entity lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Terrain(TilePoint),
    Pot(TilePoint),
    Large(usize),
}

/// A single location on a tile grid.
#[derive(Debug, Clone)]
pub struct GridWorld {
    /// Location name.
    name: String,
    /// Terrain features by tile.
    terrain: BTreeMap<TilePoint, PlacedFeature>,
    /// Pots by tile.
    pots: BTreeMap<TilePoint, IndoorPot>,
    /// Large bushes, checked by distance rather than tile.
    large_bushes: Vec<Bush>,
    /// Entity identity -> storage slot.
    index: BTreeMap<EntityId, Slot>,
}

impl GridWorld {
    /// Create an empty location.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terrain: BTreeMap::new(),
            pots: BTreeMap::new(),
            large_bushes: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    // -------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------

    /// Root a terrain feature on its tile.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TileOccupied`] if the tile already holds a
    /// feature, or [`WorldError::DuplicateEntity`] if the identity is taken.
    pub fn place(&mut self, tile: TilePoint, feature: PlacedFeature) -> Result<(), WorldError> {
        if self.terrain.contains_key(&tile) {
            return Err(WorldError::TileOccupied(tile));
        }
        if let Some(id) = feature.id() {
            self.claim_id(id, Slot::Terrain(tile))?;
        }
        self.terrain.insert(tile, feature);
        Ok(())
    }

    /// Plant a regular tree on its own tile.
    ///
    /// # Errors
    ///
    /// See [`GridWorld::place`].
    pub fn add_tree(&mut self, tree: Tree) -> Result<EntityId, WorldError> {
        let id = tree.id;
        self.place(tree.tile, PlacedFeature::Tree(tree))?;
        Ok(id)
    }

    /// Plant a fruit tree on its own tile.
    ///
    /// # Errors
    ///
    /// See [`GridWorld::place`].
    pub fn add_fruit_tree(&mut self, tree: FruitTree) -> Result<EntityId, WorldError> {
        let id = tree.id;
        self.place(tree.tile, PlacedFeature::FruitTree(tree))?;
        Ok(id)
    }

    /// Plant a free-standing bush on its own tile.
    ///
    /// # Errors
    ///
    /// See [`GridWorld::place`].
    pub fn add_bush(&mut self, bush: Bush) -> Result<EntityId, WorldError> {
        let id = bush.id;
        self.place(bush.tile, PlacedFeature::Bush(bush))?;
        Ok(id)
    }

    /// Place a pot on a tile.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ContainerOccupied`] if a pot is already there,
    /// or [`WorldError::DuplicateEntity`] if the held bush's identity is taken.
    pub fn place_pot(&mut self, tile: TilePoint, pot: IndoorPot) -> Result<(), WorldError> {
        if self.pots.contains_key(&tile) {
            return Err(WorldError::ContainerOccupied(tile));
        }
        if let Some(bush) = &pot.bush {
            self.claim_id(bush.id, Slot::Pot(tile))?;
        }
        self.pots.insert(tile, pot);
        Ok(())
    }

    /// Add a large bush. Large bushes do not occupy a terrain slot.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateEntity`] if the identity is taken.
    pub fn add_large_bush(&mut self, bush: Bush) -> Result<EntityId, WorldError> {
        let id = bush.id;
        self.claim_id(id, Slot::Large(self.large_bushes.len()))?;
        self.large_bushes.push(bush);
        Ok(id)
    }

    fn claim_id(&mut self, id: EntityId, slot: Slot) -> Result<(), WorldError> {
        if self.index.contains_key(&id) {
            return Err(WorldError::DuplicateEntity(id));
        }
        self.index.insert(id, slot);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Number of identified entities (trees, fruit trees, bushes on every
    /// path).
    pub fn entity_count(&self) -> usize {
        self.index.len()
    }

    /// Look up a regular tree by identity.
    pub fn tree(&self, id: EntityId) -> Option<&Tree> {
        match self.terrain_by_id(id)? {
            PlacedFeature::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Look up a fruit tree by identity.
    pub fn fruit_tree(&self, id: EntityId) -> Option<&FruitTree> {
        match self.terrain_by_id(id)? {
            PlacedFeature::FruitTree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Look up a bush by identity on any lookup path.
    pub fn bush(&self, id: EntityId) -> Option<&Bush> {
        match *self.index.get(&id)? {
            Slot::Terrain(tile) => match self.terrain.get(&tile)? {
                PlacedFeature::Bush(bush) => Some(bush),
                _ => None,
            },
            Slot::Pot(tile) => self.pots.get(&tile)?.bush.as_ref(),
            Slot::Large(idx) => self.large_bushes.get(idx),
        }
    }

    fn terrain_by_id(&self, id: EntityId) -> Option<&PlacedFeature> {
        match *self.index.get(&id)? {
            Slot::Terrain(tile) => self.terrain.get(&tile),
            Slot::Pot(_) | Slot::Large(_) => None,
        }
    }

    // -------------------------------------------------------------------
    // Effects
    // -------------------------------------------------------------------

    /// Apply one interaction's effect.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] for an unknown identity, or
    /// [`WorldError::CategoryMismatch`] if the stored entity has a different
    /// category than requested.
    pub fn apply_interaction(&mut self, interaction: &Interaction) -> Result<(), WorldError> {
        let id = interaction.entity;
        let slot = *self
            .index
            .get(&id)
            .ok_or(WorldError::EntityNotFound(id))?;

        let bush = match slot {
            Slot::Terrain(tile) => {
                let feature = self
                    .terrain
                    .get_mut(&tile)
                    .ok_or(WorldError::EntityNotFound(id))?;
                match (feature, interaction.category) {
                    (PlacedFeature::Tree(tree), FeatureCategory::Tree) => {
                        tree.has_seed = false;
                        return Ok(());
                    }
                    (PlacedFeature::FruitTree(tree), FeatureCategory::FruitTree) => {
                        tree.fruit_count = 0;
                        return Ok(());
                    }
                    (PlacedFeature::Bush(bush), FeatureCategory::Bush) => bush,
                    _ => return Err(WorldError::CategoryMismatch(id)),
                }
            }
            Slot::Pot(tile) => {
                if interaction.category != FeatureCategory::Bush {
                    return Err(WorldError::CategoryMismatch(id));
                }
                self.pots
                    .get_mut(&tile)
                    .and_then(|pot| pot.bush.as_mut())
                    .ok_or(WorldError::EntityNotFound(id))?
            }
            Slot::Large(idx) => {
                if interaction.category != FeatureCategory::Bush {
                    return Err(WorldError::CategoryMismatch(id));
                }
                self.large_bushes
                    .get_mut(idx)
                    .ok_or(WorldError::EntityNotFound(id))?
            }
        };
        bush.harvested = true;
        Ok(())
    }

    /// Apply a batch of interactions, logging and skipping any that fail.
    /// Returns how many were applied.
    pub fn apply_all<I>(&mut self, interactions: I) -> usize
    where
        I: IntoIterator<Item = Interaction>,
    {
        let mut applied: usize = 0;
        for interaction in interactions {
            match self.apply_interaction(&interaction) {
                Ok(()) => applied = applied.saturating_add(1),
                Err(e) => warn!(error = %e, tile = %interaction.tile, "interaction not applied"),
            }
        }
        applied
    }

    /// Overnight growth: trees regrow seeds, fruit trees gain one fruit, and
    /// every bush becomes harvestable again.
    pub fn start_day(&mut self) {
        for feature in self.terrain.values_mut() {
            match feature {
                PlacedFeature::Tree(tree) if !tree.stump => tree.has_seed = true,
                PlacedFeature::FruitTree(tree) if !tree.stump => {
                    tree.fruit_count = tree.fruit_count.saturating_add(1).min(MAX_FRUIT);
                }
                PlacedFeature::Bush(bush) => bush.harvested = false,
                _ => {}
            }
        }
        for bush in self.pots.values_mut().filter_map(|pot| pot.bush.as_mut()) {
            bush.harvested = false;
        }
        for bush in &mut self.large_bushes {
            bush.harvested = false;
        }
        debug!(location = %self.name, "overnight growth applied");
    }
}

impl GameLocation for GridWorld {
    fn name(&self) -> &str {
        &self.name
    }

    fn terrain_feature_at(&self, tile: TilePoint) -> Option<TerrainFeature<'_>> {
        self.terrain.get(&tile).map(PlacedFeature::as_feature)
    }

    fn container_at(&self, tile: TilePoint) -> Option<&dyn Container> {
        self.pots.get(&tile).map(|pot| pot as &dyn Container)
    }

    fn large_terrain_features(&self) -> Vec<TerrainFeature<'_>> {
        self.large_bushes
            .iter()
            .map(|bush| TerrainFeature::Bush(bush))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::features::BushKind;
    use crate::host::BushFeature;

    fn interaction(world: &GridWorld, entity: EntityId, category: FeatureCategory) -> Interaction {
        Interaction {
            entity,
            category,
            tile: TilePoint::new(0, 0),
            location: world.name().to_owned(),
        }
    }

    #[test]
    fn tile_lookup_finds_each_category() {
        let mut world = GridWorld::new("Farm");
        world.add_tree(Tree::new(TilePoint::new(1, 1))).unwrap();
        world.add_fruit_tree(FruitTree::new(TilePoint::new(2, 2), 3)).unwrap();
        world.add_bush(Bush::new(TilePoint::new(3, 3), BushKind::Tea)).unwrap();
        world
            .place(TilePoint::new(4, 4), PlacedFeature::Other("Grass".to_owned()))
            .unwrap();

        assert!(matches!(
            world.terrain_feature_at(TilePoint::new(1, 1)),
            Some(TerrainFeature::Tree(_))
        ));
        assert!(matches!(
            world.terrain_feature_at(TilePoint::new(2, 2)),
            Some(TerrainFeature::FruitTree(_))
        ));
        assert!(matches!(
            world.terrain_feature_at(TilePoint::new(3, 3)),
            Some(TerrainFeature::Bush(_))
        ));
        assert!(matches!(
            world.terrain_feature_at(TilePoint::new(4, 4)),
            Some(TerrainFeature::Unknown { kind: "Grass" })
        ));
        assert!(world.terrain_feature_at(TilePoint::new(5, 5)).is_none());
        assert_eq!(world.entity_count(), 3);
    }

    #[test]
    fn occupied_tile_is_rejected() {
        let mut world = GridWorld::new("Farm");
        world.add_tree(Tree::new(TilePoint::new(1, 1))).unwrap();
        let second = world.add_tree(Tree::new(TilePoint::new(1, 1)));
        assert_eq!(second, Err(WorldError::TileOccupied(TilePoint::new(1, 1))));
    }

    #[test]
    fn duplicate_identity_is_rejected() {
        let mut world = GridWorld::new("Farm");
        let bush = Bush::new(TilePoint::new(0, 0), BushKind::Tea);
        let copy = bush.clone();
        world.add_large_bush(bush).unwrap();
        assert_eq!(
            world.add_large_bush(copy.clone()),
            Err(WorldError::DuplicateEntity(copy.id))
        );
    }

    #[test]
    fn pots_expose_held_bush() {
        let mut world = GridWorld::new("Greenhouse");
        let bush = Bush::new(TilePoint::new(2, 0), BushKind::Tea);
        let id = bush.id;
        world
            .place_pot(TilePoint::new(2, 0), IndoorPot::with_bush(bush))
            .unwrap();

        let held = world
            .container_at(TilePoint::new(2, 0))
            .and_then(|pot| pot.held_bush())
            .map(|held| held.id());
        assert_eq!(held, Some(id));
        assert!(world.bush(id).is_some());
    }

    #[test]
    fn interactions_apply_their_effects() {
        let mut world = GridWorld::new("Farm");
        let tree = world.add_tree(Tree::new(TilePoint::new(0, 1))).unwrap();
        let fruit = world
            .add_fruit_tree(FruitTree::new(TilePoint::new(0, 2), 2))
            .unwrap();
        let bush = world
            .add_large_bush(Bush::new(TilePoint::new(0, 3), BushKind::Evergreen))
            .unwrap();

        let batch = vec![
            interaction(&world, tree, FeatureCategory::Tree),
            interaction(&world, fruit, FeatureCategory::FruitTree),
            interaction(&world, bush, FeatureCategory::Bush),
        ];
        assert_eq!(world.apply_all(batch), 3);

        assert!(!world.tree(tree).unwrap().has_seed);
        assert_eq!(world.fruit_tree(fruit).unwrap().fruit_count, 0);
        assert!(world.bush(bush).unwrap().harvested);

        world.start_day();
        assert!(world.tree(tree).unwrap().has_seed);
        assert_eq!(world.fruit_tree(fruit).unwrap().fruit_count, 1);
        assert!(!world.bush(bush).unwrap().harvested);
    }

    #[test]
    fn mismatched_category_is_an_error() {
        let mut world = GridWorld::new("Farm");
        let tree = world.add_tree(Tree::new(TilePoint::new(0, 1))).unwrap();
        let wrong = interaction(&world, tree, FeatureCategory::Bush);
        assert_eq!(
            world.apply_interaction(&wrong),
            Err(WorldError::CategoryMismatch(tree))
        );
        let missing = interaction(&world, EntityId::new(), FeatureCategory::Tree);
        assert!(matches!(
            world.apply_interaction(&missing),
            Err(WorldError::EntityNotFound(_))
        ));
    }

    #[test]
    fn stumps_do_not_regrow() {
        let mut world = GridWorld::new("Farm");
        let stump = world
            .add_tree(Tree::new(TilePoint::new(0, 0)).stump().without_seed())
            .unwrap();
        world.start_day();
        assert!(!world.tree(stump).unwrap().has_seed);
    }
}
