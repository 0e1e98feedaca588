//! Daily counters and the end-of-day rollover.
//!
//! Trees and fruit trees are counted directly. Bushes are counted as the
//! size of the dedupe set, so a bush reached through two lookup paths is
//! still counted once.

use autoshaker_types::{EntityId, WorldDate};

use crate::config::ShakerConfig;
use crate::dedupe::DedupeTracker;

/// Notice emitted at day end while the shaker is deactivated.
pub const DEACTIVATED_NOTICE: &str =
    "AutoShaker is deactivated; nothing was nor will be shaken until it is reactivated.";

/// Suffix of the summary when nothing was shaken.
pub const NOTHING_SHAKEN: &str = "Nothing shaken today.";

/// Snapshot of the three counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShakeCounts {
    /// Regular trees shaken.
    pub trees: u32,
    /// Fruit trees shaken.
    pub fruit_trees: u32,
    /// Distinct bushes harvested.
    pub bushes: usize,
}

impl ShakeCounts {
    /// Whether every counter is zero.
    pub const fn is_zero(&self) -> bool {
        self.trees == 0 && self.fruit_trees == 0 && self.bushes == 0
    }
}

/// What the day-end hook did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloverReport {
    /// The shaker was active: the summary was logged and all state reset.
    Summary(String),
    /// The shaker was inactive: the deactivated notice was logged and state
    /// left untouched.
    Deactivated,
}

/// Per-window counters plus the bush dedupe set.
#[derive(Debug, Clone, Default)]
pub struct DailyStats {
    trees: u32,
    fruit_trees: u32,
    shaken_bushes: DedupeTracker,
}

impl DailyStats {
    /// Create empty stats.
    pub const fn new() -> Self {
        Self {
            trees: 0,
            fruit_trees: 0,
            shaken_bushes: DedupeTracker::new(),
        }
    }

    /// Count one regular tree.
    pub const fn record_tree(&mut self) {
        self.trees = self.trees.saturating_add(1);
    }

    /// Count one fruit tree.
    pub const fn record_fruit_tree(&mut self) {
        self.fruit_trees = self.fruit_trees.saturating_add(1);
    }

    /// Record a harvested bush. Returns `false` if it was already recorded.
    pub fn record_bush(&mut self, id: EntityId) -> bool {
        self.shaken_bushes.insert(id)
    }

    /// Bushes harvested since the last rollover.
    pub const fn shaken_bushes(&self) -> &DedupeTracker {
        &self.shaken_bushes
    }

    /// Current counter values.
    pub fn counts(&self) -> ShakeCounts {
        ShakeCounts {
            trees: self.trees,
            fruit_trees: self.fruit_trees,
            bushes: self.shaken_bushes.len(),
        }
    }

    /// Format the day summary. Only categories enabled in `config` get a
    /// line; if every counter is zero the fixed nothing-shaken text is used.
    pub fn summarize(&self, date: &WorldDate, config: &ShakerConfig) -> String {
        let counts = self.counts();
        let mut summary = format!("{date}:");
        if counts.is_zero() {
            summary.push(' ');
            summary.push_str(NOTHING_SHAKEN);
            return summary;
        }

        if config.shake_regular_trees {
            summary.push_str(&format!("\n\t[{}] Trees shaken", counts.trees));
        }
        if config.shake_fruit_trees {
            summary.push_str(&format!("\n\t[{}] Fruit Trees shaken", counts.fruit_trees));
        }
        if config.shake_bushes {
            summary.push_str(&format!("\n\t[{}] Bushes shaken", counts.bushes));
        }
        summary
    }

    /// Close the window for `date`.
    ///
    /// When the shaker is active the summary is logged at info level and
    /// every counter and the dedupe set are reset. When it is inactive the
    /// deactivated notice is logged at warn level and nothing changes.
    pub fn rollover(&mut self, date: &WorldDate, config: &ShakerConfig) -> RolloverReport {
        if !config.is_shaker_active {
            tracing::warn!("{DEACTIVATED_NOTICE}");
            return RolloverReport::Deactivated;
        }

        let summary = self.summarize(date, config);
        tracing::info!("{summary}");
        self.reset();
        RolloverReport::Summary(summary)
    }

    fn reset(&mut self) {
        self.trees = 0;
        self.fruit_trees = 0;
        self.shaken_bushes.clear();
    }
}
