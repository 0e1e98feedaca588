//! Per-category eligibility rules.
//!
//! Each check walks its conditions in a fixed order and stops at the first
//! one that fails, reporting it as an [`Ineligible`] reason. Checks are
//! pure: they read the entity, the agent, and the configuration and never
//! touch any state.

use autoshaker_types::{AgentSnapshot, SkillKind, WorldDate};
use autoshaker_world::{BushFeature, FruitTreeFeature, TreeFeature};

use crate::config::ShakerConfig;
use crate::dedupe::DedupeTracker;

/// Foraging level an agent needs before regular trees drop seeds for it.
pub const MIN_FORAGING_LEVEL: u32 = 1;

/// Why an entity was not shaken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Ineligible {
    /// The category (or the tea-bush sub-switch) is disabled.
    #[error("category disabled in configuration")]
    CategoryDisabled,
    /// The tree is a stump.
    #[error("tree is a stump")]
    Stump,
    /// The tree has no seed to drop.
    #[error("tree has no seed")]
    NoSeed,
    /// Fewer ripe fruit than the configured threshold.
    #[error("only {count} fruit ready, need {threshold}")]
    NotEnoughFruit {
        /// Ripe fruit on the tree.
        count: u32,
        /// Configured threshold.
        threshold: u32,
    },
    /// The host does not allow interacting with the entity right now.
    #[error("entity is not actionable")]
    NotActionable,
    /// The agent's foraging level is too low.
    #[error("foraging level {level} is below the required level")]
    SkillTooLow {
        /// The agent's current level.
        level: u32,
    },
    /// The bush was already harvested this window.
    #[error("bush already shaken today")]
    AlreadyShaken,
    /// The bush belongs to the town.
    #[error("town bush")]
    TownBush,
    /// The bush is not blooming today.
    #[error("bush not in bloom")]
    NotInBloom,
}

/// Evaluates entities against the configuration for one agent on one day.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityFilter<'a> {
    config: &'a ShakerConfig,
    agent: &'a AgentSnapshot,
    date: WorldDate,
}

impl<'a> EligibilityFilter<'a> {
    /// Create a filter for the current tick.
    pub const fn new(config: &'a ShakerConfig, agent: &'a AgentSnapshot, date: WorldDate) -> Self {
        Self {
            config,
            agent,
            date,
        }
    }

    /// Regular tree: enabled, not a stump, has a seed, actionable, and the
    /// agent has the foraging level.
    ///
    /// # Errors
    ///
    /// Returns the first failing condition.
    pub fn tree(&self, tree: &dyn TreeFeature) -> Result<(), Ineligible> {
        if !self.config.shake_regular_trees {
            return Err(Ineligible::CategoryDisabled);
        }
        if tree.is_stump() {
            return Err(Ineligible::Stump);
        }
        if !tree.has_seed() {
            return Err(Ineligible::NoSeed);
        }
        if !tree.is_actionable() {
            return Err(Ineligible::NotActionable);
        }
        let level = self.agent.skill_level(SkillKind::Foraging);
        if level < MIN_FORAGING_LEVEL {
            return Err(Ineligible::SkillTooLow { level });
        }
        Ok(())
    }

    /// Fruit tree: enabled, not a stump, enough ripe fruit, actionable.
    ///
    /// # Errors
    ///
    /// Returns the first failing condition.
    pub fn fruit_tree(&self, tree: &dyn FruitTreeFeature) -> Result<(), Ineligible> {
        if !self.config.shake_fruit_trees {
            return Err(Ineligible::CategoryDisabled);
        }
        if tree.is_stump() {
            return Err(Ineligible::Stump);
        }
        let count = tree.fruit_count();
        let threshold = self.config.fruits_ready_to_shake;
        if count < threshold {
            return Err(Ineligible::NotEnoughFruit { count, threshold });
        }
        if !tree.is_actionable() {
            return Err(Ineligible::NotActionable);
        }
        Ok(())
    }

    /// Bush, whichever path found it: both bush switches on, not yet
    /// shaken, not a town bush, actionable, in bloom today.
    ///
    /// # Errors
    ///
    /// Returns the first failing condition.
    pub fn bush(&self, bush: &dyn BushFeature, shaken: &DedupeTracker) -> Result<(), Ineligible> {
        if !self.config.bushes_enabled() {
            return Err(Ineligible::CategoryDisabled);
        }
        if shaken.contains(bush.id()) {
            return Err(Ineligible::AlreadyShaken);
        }
        if bush.is_town_bush() {
            return Err(Ineligible::TownBush);
        }
        if !bush.is_actionable() {
            return Err(Ineligible::NotActionable);
        }
        if !bush.in_bloom(self.date.season(), self.date.day()) {
            return Err(Ineligible::NotInBloom);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use autoshaker_types::{AgentId, Season, TilePoint};
    use autoshaker_world::{Bush, BushKind, FruitTree, Tree};

    use super::*;

    fn forager() -> AgentSnapshot {
        AgentSnapshot::new(AgentId::new(), TilePoint::new(0, 0), 128)
            .with_skill(SkillKind::Foraging, 1)
    }

    fn spring(day: u32) -> WorldDate {
        WorldDate::new(1, Season::Spring, day).unwrap()
    }

    #[test]
    fn healthy_tree_is_eligible() {
        let config = ShakerConfig::default();
        let agent = forager();
        let filter = EligibilityFilter::new(&config, &agent, spring(1));
        assert_eq!(filter.tree(&Tree::new(TilePoint::new(1, 1))), Ok(()));
    }

    #[test]
    fn tree_conditions_fail_in_order() {
        let config = ShakerConfig::default();
        let agent = forager();
        let filter = EligibilityFilter::new(&config, &agent, spring(1));
        let tile = TilePoint::new(1, 1);

        // A stump with no seed reports the stump first.
        let tree = Tree::new(tile).stump().without_seed();
        assert_eq!(filter.tree(&tree), Err(Ineligible::Stump));
        assert_eq!(
            filter.tree(&Tree::new(tile).without_seed().blocked()),
            Err(Ineligible::NoSeed)
        );
        assert_eq!(
            filter.tree(&Tree::new(tile).blocked()),
            Err(Ineligible::NotActionable)
        );
    }

    #[test]
    fn unskilled_agent_cannot_shake_trees() {
        let config = ShakerConfig::default();
        let agent = AgentSnapshot::new(AgentId::new(), TilePoint::new(0, 0), 128);
        let filter = EligibilityFilter::new(&config, &agent, spring(1));
        assert_eq!(
            filter.tree(&Tree::new(TilePoint::new(0, 1))),
            Err(Ineligible::SkillTooLow { level: 0 })
        );
    }

    #[test]
    fn disabled_tree_category() {
        let config = ShakerConfig {
            shake_regular_trees: false,
            ..ShakerConfig::default()
        };
        let agent = forager();
        let filter = EligibilityFilter::new(&config, &agent, spring(1));
        assert_eq!(
            filter.tree(&Tree::new(TilePoint::new(0, 1)).stump()),
            Err(Ineligible::CategoryDisabled)
        );
    }

    #[test]
    fn fruit_threshold() {
        let config = ShakerConfig {
            fruits_ready_to_shake: 2,
            ..ShakerConfig::default()
        };
        let agent = forager();
        let filter = EligibilityFilter::new(&config, &agent, spring(1));
        let tile = TilePoint::new(1, 0);

        assert_eq!(
            filter.fruit_tree(&FruitTree::new(tile, 1)),
            Err(Ineligible::NotEnoughFruit {
                count: 1,
                threshold: 2
            })
        );
        assert_eq!(filter.fruit_tree(&FruitTree::new(tile, 2)), Ok(()));
        assert_eq!(
            filter.fruit_tree(&FruitTree::new(tile, 3).blocked()),
            Err(Ineligible::NotActionable)
        );
        assert_eq!(
            filter.fruit_tree(&FruitTree::new(tile, 3).stump()),
            Err(Ineligible::Stump)
        );
    }

    #[test]
    fn fruit_trees_ignore_skill() {
        let config = ShakerConfig::default();
        let agent = AgentSnapshot::new(AgentId::new(), TilePoint::new(0, 0), 128);
        let filter = EligibilityFilter::new(&config, &agent, spring(1));
        assert_eq!(filter.fruit_tree(&FruitTree::new(TilePoint::new(0, 1), 1)), Ok(()));
    }

    #[test]
    fn bush_rules() {
        let config = ShakerConfig::default();
        let agent = forager();
        let tile = TilePoint::new(0, 1);
        let shaken = DedupeTracker::new();

        let filter = EligibilityFilter::new(&config, &agent, spring(22));
        assert_eq!(filter.bush(&Bush::new(tile, BushKind::Tea), &shaken), Ok(()));
        assert_eq!(
            filter.bush(&Bush::new(tile, BushKind::Tea).town(), &shaken),
            Err(Ineligible::TownBush)
        );
        assert_eq!(
            filter.bush(&Bush::new(tile, BushKind::Tea).blocked(), &shaken),
            Err(Ineligible::NotActionable)
        );

        let early = EligibilityFilter::new(&config, &agent, spring(3));
        assert_eq!(
            early.bush(&Bush::new(tile, BushKind::Tea), &shaken),
            Err(Ineligible::NotInBloom)
        );
    }

    #[test]
    fn shaken_bush_is_rejected_before_other_checks() {
        let config = ShakerConfig::default();
        let agent = forager();
        let bush = Bush::new(TilePoint::new(0, 1), BushKind::Decorative).town();
        let mut shaken = DedupeTracker::new();
        shaken.insert(bush.id);

        let filter = EligibilityFilter::new(&config, &agent, spring(1));
        assert_eq!(filter.bush(&bush, &shaken), Err(Ineligible::AlreadyShaken));
    }

    #[test]
    fn bushes_need_both_switches() {
        let agent = forager();
        let bush = Bush::new(TilePoint::new(0, 1), BushKind::Evergreen);
        let shaken = DedupeTracker::new();

        for (bushes, tea) in [(false, true), (true, false), (false, false)] {
            let config = ShakerConfig {
                shake_bushes: bushes,
                shake_tea_bushes: tea,
                ..ShakerConfig::default()
            };
            let filter = EligibilityFilter::new(&config, &agent, spring(1));
            assert_eq!(filter.bush(&bush, &shaken), Err(Ineligible::CategoryDisabled));
        }
    }
}
