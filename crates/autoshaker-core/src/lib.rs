//! Scan, filter, dispatch, and rollover engine for the AutoShaker.
//!
//! Every tick the engine checks whether an agent moved or its radius
//! changed, scans the square of tiles around it, runs each tree, fruit tree,
//! and bush it finds through the configured rules, and triggers the use
//! action of every eligible one. Bushes are harvested at most once per day.
//! At day end the counters are summarized and reset.
//!
//! # Modules
//!
//! - [`config`] -- [`ShakerConfig`] loaded from `autoshaker-config.yaml`.
//! - [`dedupe`] -- [`DedupeTracker`], bushes already harvested today.
//! - [`dispatch`] -- [`ActionDispatcher`] forwarding interactions to the host.
//! - [`eligibility`] -- [`EligibilityFilter`] rules per entity category.
//! - [`gate`] -- [`PositionChangeGate`], per-agent rescan memo.
//! - [`input`] -- Keybind parsing and just-pressed matching.
//! - [`scan`] -- Square-radius tile enumeration.
//! - [`shaker`] -- [`AutoShaker`], the host lifecycle hooks.
//! - [`stats`] -- [`DailyStats`] counters and the day-end rollover.
//! - [`store`] -- [`ConfigStore`] persistence and the YAML file store.
//! - [`toggle`] -- [`ActivationToggle`], the keybind-driven on/off switch.

pub mod config;
pub mod dedupe;
pub mod dispatch;
pub mod eligibility;
pub mod gate;
pub mod input;
pub mod scan;
pub mod shaker;
pub mod stats;
pub mod store;
pub mod toggle;

pub use config::{ConfigError, MAX_FRUITS_READY_TO_SHAKE, ShakerConfig};
pub use dedupe::DedupeTracker;
pub use dispatch::{ActionDispatcher, Target};
pub use eligibility::{EligibilityFilter, Ineligible, MIN_FORAGING_LEVEL};
pub use gate::{PositionChangeGate, ScanMemo};
pub use input::{Button, ButtonsChanged, Keybind, KeybindError, KeybindList};
pub use scan::tiles_in_radius;
pub use shaker::{AutoShaker, ScanReport, SkipReason, TickOutcome};
pub use stats::{DEACTIVATED_NOTICE, DailyStats, NOTHING_SHAKEN, RolloverReport, ShakeCounts};
pub use store::{ConfigStore, YamlFileStore};
pub use toggle::{ActivationToggle, PersistStatus, ShakerState, ToggleOutcome};
