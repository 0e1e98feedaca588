//! Dispatching interactions for eligible entities.
//!
//! The dispatcher forwards one [`Interaction`] per eligible entity to the
//! host's [`InteractionSink`] and books it in the day's statistics. It does
//! not check eligibility itself.

use autoshaker_types::{EntityId, TilePoint};
use autoshaker_world::{
    BushFeature, FeatureCategory, FruitTreeFeature, Interaction, InteractionSink, TreeFeature,
};

use crate::stats::DailyStats;

/// An entity that passed its eligibility check.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// A regular tree to shake.
    Tree(&'a dyn TreeFeature),
    /// A fruit tree to shake.
    FruitTree(&'a dyn FruitTreeFeature),
    /// A bush to harvest.
    Bush(&'a dyn BushFeature),
}

impl Target<'_> {
    /// Entity identity.
    pub fn id(&self) -> EntityId {
        match self {
            Self::Tree(tree) => tree.id(),
            Self::FruitTree(tree) => tree.id(),
            Self::Bush(bush) => bush.id(),
        }
    }

    /// Entity tile.
    pub fn tile(&self) -> TilePoint {
        match self {
            Self::Tree(tree) => tree.tile(),
            Self::FruitTree(tree) => tree.tile(),
            Self::Bush(bush) => bush.tile(),
        }
    }

    /// Interaction category.
    pub const fn category(&self) -> FeatureCategory {
        match self {
            Self::Tree(_) => FeatureCategory::Tree,
            Self::FruitTree(_) => FeatureCategory::FruitTree,
            Self::Bush(_) => FeatureCategory::Bush,
        }
    }
}

/// Sends interactions for one location during one scan.
pub struct ActionDispatcher<'a> {
    location: &'a str,
    sink: &'a mut dyn InteractionSink,
    dispatched: Vec<Interaction>,
}

impl core::fmt::Debug for ActionDispatcher<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("location", &self.location)
            .field("dispatched", &self.dispatched.len())
            .finish_non_exhaustive()
    }
}

impl<'a> ActionDispatcher<'a> {
    /// Create a dispatcher for `location` writing to `sink`.
    pub fn new(location: &'a str, sink: &'a mut dyn InteractionSink) -> Self {
        Self {
            location,
            sink,
            dispatched: Vec::new(),
        }
    }

    /// Trigger the use action for `target` and record it: trees and fruit
    /// trees bump their counter, bushes join the dedupe set.
    pub fn dispatch(&mut self, target: Target<'_>, stats: &mut DailyStats) {
        let interaction = Interaction {
            entity: target.id(),
            category: target.category(),
            tile: target.tile(),
            location: self.location.to_owned(),
        };
        tracing::debug!(
            entity = %interaction.entity,
            category = ?interaction.category,
            tile = %interaction.tile,
            location = self.location,
            "shaking"
        );

        self.sink.perform_use_action(interaction.clone());
        match target {
            Target::Tree(_) => stats.record_tree(),
            Target::FruitTree(_) => stats.record_fruit_tree(),
            Target::Bush(bush) => {
                stats.record_bush(bush.id());
            }
        }
        self.dispatched.push(interaction);
    }

    /// Consume the dispatcher, returning what it sent.
    pub fn finish(self) -> Vec<Interaction> {
        self.dispatched
    }
}
