//! The orchestrator wired to the host's lifecycle hooks.
//!
//! [`AutoShaker`] owns the configuration, the position gate, the daily
//! statistics (with the bush dedupe set), and the activation toggle. The
//! host calls three hooks:
//!
//! - [`AutoShaker::on_update_ticked`] every simulation step, once per agent
//! - [`AutoShaker::on_day_ending`] when the day closes
//! - [`AutoShaker::on_buttons_changed`] on every input change
//!
//! Every hook takes `&mut self`, so a tick can never interleave with the
//! day-end rollover.

use std::sync::Arc;

use autoshaker_types::{AgentSnapshot, TilePoint, WorldDate};
use autoshaker_world::{GameLocation, Hud, Interaction, InteractionSink, TerrainFeature, TickContext};
use tokio::runtime::Handle;

use crate::config::ShakerConfig;
use crate::dispatch::{ActionDispatcher, Target};
use crate::eligibility::{EligibilityFilter, Ineligible};
use crate::gate::PositionChangeGate;
use crate::input::ButtonsChanged;
use crate::scan::tiles_in_radius;
use crate::stats::{DailyStats, RolloverReport};
use crate::store::ConfigStore;
use crate::toggle::{ActivationToggle, ToggleOutcome};

/// Why a tick did no work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No save is loaded.
    WorldNotReady,
    /// The shaker is deactivated.
    Inactive,
    /// Every category is switched off.
    NothingEnabled,
    /// The host supplied no location.
    NoLocation,
    /// The host supplied no agent.
    NoAgent,
    /// An event has taken control from the player.
    EventInProgress,
    /// A blocking menu is open.
    MenuOpen,
    /// The agent has not moved and the radius is the same.
    Unchanged,
}

/// What a completed scan did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Scan center.
    pub center: TilePoint,
    /// Radius in tiles.
    pub radius: i32,
    /// Grid tiles looked up.
    pub tiles_checked: usize,
    /// Interactions sent, in dispatch order.
    pub dispatched: Vec<Interaction>,
}

/// Result of one per-tick hook call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A precondition failed; nothing was looked at.
    Skipped(SkipReason),
    /// The area around the agent was scanned.
    Scanned(ScanReport),
}

impl TickOutcome {
    /// Interactions sent this tick (empty when skipped).
    pub fn dispatched(&self) -> &[Interaction] {
        match self {
            Self::Skipped(_) => &[],
            Self::Scanned(report) => &report.dispatched,
        }
    }
}

/// The proximity dispatcher.
#[derive(Debug)]
pub struct AutoShaker {
    config: ShakerConfig,
    gate: PositionChangeGate,
    stats: DailyStats,
    toggle: ActivationToggle,
}

impl AutoShaker {
    /// Create a shaker with `config`, saving toggles through `store` on
    /// `runtime`.
    pub fn new(config: ShakerConfig, store: Arc<dyn ConfigStore>, runtime: Handle) -> Self {
        Self {
            config,
            gate: PositionChangeGate::new(),
            stats: DailyStats::new(),
            toggle: ActivationToggle::new(store, runtime),
        }
    }

    /// Current configuration.
    pub const fn config(&self) -> &ShakerConfig {
        &self.config
    }

    /// Swap in a new configuration (settings menu, reload). Every agent
    /// rescans on its next tick.
    pub fn replace_config(&mut self, config: ShakerConfig) {
        self.config = config;
        self.gate.reset();
    }

    /// Today's statistics.
    pub const fn stats(&self) -> &DailyStats {
        &self.stats
    }

    /// Drop the gate memo of an agent that left the session.
    pub fn forget_agent(&mut self, agent: &AgentSnapshot) {
        self.gate.forget(agent.id);
    }

    /// Per-tick hook for one agent.
    ///
    /// Checks the preconditions in order, consults the position gate, then
    /// scans the square around the agent: the terrain feature and the pot
    /// of each tile, followed by the location's large bushes within range.
    pub fn on_update_ticked(
        &mut self,
        ctx: &TickContext,
        location: Option<&dyn GameLocation>,
        agent: Option<&AgentSnapshot>,
        sink: &mut dyn InteractionSink,
    ) -> TickOutcome {
        if !ctx.world_ready {
            return TickOutcome::Skipped(SkipReason::WorldNotReady);
        }
        if !self.config.is_shaker_active {
            return TickOutcome::Skipped(SkipReason::Inactive);
        }
        if !self.config.any_category_enabled() {
            return TickOutcome::Skipped(SkipReason::NothingEnabled);
        }
        let Some(location) = location else {
            return TickOutcome::Skipped(SkipReason::NoLocation);
        };
        let Some(agent) = agent else {
            return TickOutcome::Skipped(SkipReason::NoAgent);
        };
        if ctx.event_blocks_control {
            return TickOutcome::Skipped(SkipReason::EventInProgress);
        }
        if ctx.menu_open {
            return TickOutcome::Skipped(SkipReason::MenuOpen);
        }

        let radius = self.config.effective_radius(agent.magnetic_radius);
        if !self.gate.should_rescan(agent.id, agent.tile, radius) {
            return TickOutcome::Skipped(SkipReason::Unchanged);
        }

        let report = self.scan(ctx.date, location, agent, radius, sink);
        TickOutcome::Scanned(report)
    }

    fn scan(
        &mut self,
        date: WorldDate,
        location: &dyn GameLocation,
        agent: &AgentSnapshot,
        radius: i32,
        sink: &mut dyn InteractionSink,
    ) -> ScanReport {
        let filter = EligibilityFilter::new(&self.config, agent, date);
        let stats = &mut self.stats;
        let mut dispatcher = ActionDispatcher::new(location.name(), sink);
        let mut tiles_checked: usize = 0;

        for tile in tiles_in_radius(agent.tile, radius) {
            tiles_checked = tiles_checked.saturating_add(1);

            if let Some(feature) = location.terrain_feature_at(tile) {
                if let Some(verdict) = evaluate_terrain(&filter, feature, tile, stats) {
                    settle(verdict, tile, stats, &mut dispatcher);
                }
            }
            check_pot(&filter, location, tile, stats, &mut dispatcher);
        }

        for feature in location.large_terrain_features() {
            let TerrainFeature::Bush(bush) = feature else {
                tracing::debug!(?feature, "non-bush large feature, skipping");
                continue;
            };
            if !agent.tile.within_radius(bush.tile(), radius) {
                continue;
            }
            let verdict = filter
                .bush(bush, stats.shaken_bushes())
                .map(|()| Target::Bush(bush));
            settle(verdict, bush.tile(), stats, &mut dispatcher);
        }

        let dispatched = dispatcher.finish();
        if !dispatched.is_empty() {
            tracing::debug!(
                agent = %agent.id,
                center = %agent.tile,
                radius,
                shaken = dispatched.len(),
                "scan complete"
            );
        }

        ScanReport {
            center: agent.tile,
            radius,
            tiles_checked,
            dispatched,
        }
    }

    /// Day-end hook. Logs the summary and resets the day's state when
    /// active; logs the deactivated notice and keeps state when not.
    pub fn on_day_ending(&mut self, date: &WorldDate) -> RolloverReport {
        self.stats.rollover(date, &self.config)
    }

    /// Input hook. Flips the active flag when the toggle keybind is just
    /// pressed with no menu open.
    pub fn on_buttons_changed(
        &mut self,
        input: &ButtonsChanged,
        menu_open: bool,
        hud: &mut dyn Hud,
    ) -> Option<ToggleOutcome> {
        self.toggle
            .handle_input(&mut self.config, input, menu_open, hud)
    }
}

/// Run the category rule for a terrain feature. `None` for features with no
/// rule.
fn evaluate_terrain<'f>(
    filter: &EligibilityFilter<'_>,
    feature: TerrainFeature<'f>,
    tile: TilePoint,
    stats: &DailyStats,
) -> Option<Result<Target<'f>, Ineligible>> {
    let verdict = match feature {
        TerrainFeature::Tree(tree) => filter.tree(tree).map(|()| Target::Tree(tree)),
        TerrainFeature::FruitTree(tree) => {
            filter.fruit_tree(tree).map(|()| Target::FruitTree(tree))
        }
        TerrainFeature::Bush(bush) => filter
            .bush(bush, stats.shaken_bushes())
            .map(|()| Target::Bush(bush)),
        TerrainFeature::Unknown { kind } => {
            tracing::debug!(kind, %tile, "unknown terrain feature, skipping");
            return None;
        }
    };
    Some(verdict)
}

/// Check the bush held by a pot on `tile`, if any.
fn check_pot(
    filter: &EligibilityFilter<'_>,
    location: &dyn GameLocation,
    tile: TilePoint,
    stats: &mut DailyStats,
    dispatcher: &mut ActionDispatcher<'_>,
) {
    let Some(bush) = location.container_at(tile).and_then(|pot| pot.held_bush()) else {
        return;
    };
    let verdict = filter
        .bush(bush, stats.shaken_bushes())
        .map(|()| Target::Bush(bush));
    settle(verdict, tile, stats, dispatcher);
}

fn settle(
    verdict: Result<Target<'_>, Ineligible>,
    tile: TilePoint,
    stats: &mut DailyStats,
    dispatcher: &mut ActionDispatcher<'_>,
) {
    match verdict {
        Ok(target) => dispatcher.dispatch(target, stats),
        Err(reason) => tracing::trace!(%tile, %reason, "not shaken"),
    }
}
