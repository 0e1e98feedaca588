//! Concrete terrain entities for the in-memory reference host.
//!
//! Each type implements the matching category trait from [`crate::host`].
//! Builder-style helpers make test fixtures read like the situation they
//! describe (`Tree::new(tile).stump()`).

use autoshaker_types::{EntityId, Season, TilePoint};
use serde::{Deserialize, Serialize};

use crate::host::{BushFeature, Container, FruitTreeFeature, TreeFeature};

/// Maximum fruit a fruit tree can carry.
pub const MAX_FRUIT: u32 = 3;

/// First day of the season on which tea bushes bloom.
pub const TEA_BLOOM_FIRST_DAY: u32 = 22;

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// A regular tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Identity.
    pub id: EntityId,
    /// Rooted tile.
    pub tile: TilePoint,
    /// Chopped down.
    pub stump: bool,
    /// Seed ready to drop.
    pub has_seed: bool,
    /// Host-side actionability.
    pub actionable: bool,
}

impl Tree {
    /// A healthy tree with a seed.
    pub fn new(tile: TilePoint) -> Self {
        Self {
            id: EntityId::new(),
            tile,
            stump: false,
            has_seed: true,
            actionable: true,
        }
    }

    /// Mark as a stump.
    #[must_use]
    pub const fn stump(mut self) -> Self {
        self.stump = true;
        self
    }

    /// Remove the seed.
    #[must_use]
    pub const fn without_seed(mut self) -> Self {
        self.has_seed = false;
        self
    }

    /// Mark as not actionable.
    #[must_use]
    pub const fn blocked(mut self) -> Self {
        self.actionable = false;
        self
    }
}

impl TreeFeature for Tree {
    fn id(&self) -> EntityId {
        self.id
    }
    fn tile(&self) -> TilePoint {
        self.tile
    }
    fn is_stump(&self) -> bool {
        self.stump
    }
    fn has_seed(&self) -> bool {
        self.has_seed
    }
    fn is_actionable(&self) -> bool {
        self.actionable
    }
}

// ---------------------------------------------------------------------------
// FruitTree
// ---------------------------------------------------------------------------

/// A fruit tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FruitTree {
    /// Identity.
    pub id: EntityId,
    /// Rooted tile.
    pub tile: TilePoint,
    /// Chopped down.
    pub stump: bool,
    /// Ripe fruit on the tree, at most [`MAX_FRUIT`].
    pub fruit_count: u32,
    /// Host-side actionability.
    pub actionable: bool,
}

impl FruitTree {
    /// A healthy tree carrying `fruit_count` fruit (capped at [`MAX_FRUIT`]).
    pub fn new(tile: TilePoint, fruit_count: u32) -> Self {
        Self {
            id: EntityId::new(),
            tile,
            stump: false,
            fruit_count: fruit_count.min(MAX_FRUIT),
            actionable: true,
        }
    }

    /// Mark as a stump.
    #[must_use]
    pub const fn stump(mut self) -> Self {
        self.stump = true;
        self
    }

    /// Mark as not actionable.
    #[must_use]
    pub const fn blocked(mut self) -> Self {
        self.actionable = false;
        self
    }
}

impl FruitTreeFeature for FruitTree {
    fn id(&self) -> EntityId {
        self.id
    }
    fn tile(&self) -> TilePoint {
        self.tile
    }
    fn is_stump(&self) -> bool {
        self.stump
    }
    fn fruit_count(&self) -> u32 {
        self.fruit_count
    }
    fn is_actionable(&self) -> bool {
        self.actionable
    }
}

// ---------------------------------------------------------------------------
// Bush
// ---------------------------------------------------------------------------

/// Species of bush, which decides its bloom calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BushKind {
    /// Tea bush: blooms from day 22 to the end of every season but winter.
    Tea,
    /// Wild berry bush: blooms spring 15-18 and fall 8-11.
    WildBerry,
    /// Blooms every day. Handy for fixtures.
    Evergreen,
    /// Never blooms.
    Decorative,
}

impl BushKind {
    /// Whether this species blooms on the given date.
    pub const fn blooms_on(self, season: Season, day: u32) -> bool {
        match self {
            Self::Tea => !matches!(season, Season::Winter) && day >= TEA_BLOOM_FIRST_DAY,
            Self::WildBerry => match season {
                Season::Spring => day >= 15 && day <= 18,
                Season::Fall => day >= 8 && day <= 11,
                Season::Summer | Season::Winter => false,
            },
            Self::Evergreen => true,
            Self::Decorative => false,
        }
    }
}

/// A bush.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bush {
    /// Identity.
    pub id: EntityId,
    /// Occupied tile (top-left for large bushes).
    pub tile: TilePoint,
    /// Species.
    pub kind: BushKind,
    /// Owned by the town.
    pub town_bush: bool,
    /// Host-side actionability.
    pub actionable: bool,
    /// Already harvested in the current bloom; suppresses the bloom until
    /// the host's next day.
    pub harvested: bool,
}

impl Bush {
    /// An unharvested, actionable, non-town bush.
    pub fn new(tile: TilePoint, kind: BushKind) -> Self {
        Self {
            id: EntityId::new(),
            tile,
            kind,
            town_bush: false,
            actionable: true,
            harvested: false,
        }
    }

    /// Mark as a town bush.
    #[must_use]
    pub const fn town(mut self) -> Self {
        self.town_bush = true;
        self
    }

    /// Mark as not actionable.
    #[must_use]
    pub const fn blocked(mut self) -> Self {
        self.actionable = false;
        self
    }
}

impl BushFeature for Bush {
    fn id(&self) -> EntityId {
        self.id
    }
    fn tile(&self) -> TilePoint {
        self.tile
    }
    fn is_town_bush(&self) -> bool {
        self.town_bush
    }
    fn is_actionable(&self) -> bool {
        self.actionable
    }
    fn in_bloom(&self, season: Season, day: u32) -> bool {
        !self.harvested && self.kind.blooms_on(season, day)
    }
}

// ---------------------------------------------------------------------------
// IndoorPot
// ---------------------------------------------------------------------------

/// A garden pot placed on a tile, optionally holding a bush.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndoorPot {
    /// The planted bush.
    pub bush: Option<Bush>,
}

impl IndoorPot {
    /// A pot holding `bush`.
    pub const fn with_bush(bush: Bush) -> Self {
        Self { bush: Some(bush) }
    }
}

impl Container for IndoorPot {
    fn held_bush(&self) -> Option<&dyn BushFeature> {
        self.bush.as_ref().map(|b| b as &dyn BushFeature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tea_bush_blooms_late_in_season_except_winter() {
        assert!(!BushKind::Tea.blooms_on(Season::Spring, 21));
        assert!(BushKind::Tea.blooms_on(Season::Spring, 22));
        assert!(BushKind::Tea.blooms_on(Season::Fall, 28));
        assert!(!BushKind::Tea.blooms_on(Season::Winter, 25));
    }

    #[test]
    fn wild_berry_windows() {
        assert!(BushKind::WildBerry.blooms_on(Season::Spring, 15));
        assert!(BushKind::WildBerry.blooms_on(Season::Spring, 18));
        assert!(!BushKind::WildBerry.blooms_on(Season::Spring, 19));
        assert!(BushKind::WildBerry.blooms_on(Season::Fall, 9));
        assert!(!BushKind::WildBerry.blooms_on(Season::Summer, 16));
    }

    #[test]
    fn harvested_bush_is_not_in_bloom() {
        let mut bush = Bush::new(TilePoint::new(0, 0), BushKind::Evergreen);
        assert!(bush.in_bloom(Season::Summer, 1));
        bush.harvested = true;
        assert!(!bush.in_bloom(Season::Summer, 1));
    }

    #[test]
    fn fruit_is_capped() {
        let tree = FruitTree::new(TilePoint::new(0, 0), 9);
        assert_eq!(tree.fruit_count, MAX_FRUIT);
    }

    #[test]
    fn empty_pot_holds_nothing() {
        assert!(IndoorPot::default().held_bush().is_none());
        let pot = IndoorPot::with_bush(Bush::new(TilePoint::new(1, 1), BushKind::Tea));
        assert!(pot.held_bush().is_some());
    }
}
