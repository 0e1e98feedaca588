//! The harness loop: walk agents over the farm and drive the hooks.
//!
//! Each in-world day runs `ticks_per_day` ticks. On every tick the agents
//! may take a random step, the per-tick hook runs for each of them, and
//! the requested interactions are applied to the world. Configured ticks
//! press the toggle keybind. At the end of the day the day-end hook runs,
//! the world grows overnight, and the calendar advances.

use autoshaker_core::{AutoShaker, ButtonsChanged, PersistStatus, RolloverReport, ToggleOutcome};
use autoshaker_types::{AgentId, AgentSnapshot, SkillKind, TilePoint};
use autoshaker_world::{GameLocation, GridWorld, Interaction, TickContext};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::farm::HarnessConfig;

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Days simulated.
    pub days: u32,
    /// Ticks simulated.
    pub ticks: u64,
    /// Interactions dispatched and applied.
    pub interactions: usize,
    /// Day-end reports in order.
    pub rollovers: Vec<RolloverReport>,
    /// Toggle presses that fired.
    pub toggles: usize,
    /// Background saves that failed.
    pub failed_saves: usize,
}

/// Spawn the walking agents at the farm's center.
pub fn spawn_agents(config: &HarnessConfig) -> Vec<AgentSnapshot> {
    let center = config.clamp(TilePoint::new(config.width / 2, config.height / 2));
    (0..config.agents)
        .map(|_| {
            AgentSnapshot::new(AgentId::new(), center, config.magnetic_radius)
                .with_skill(SkillKind::Foraging, config.foraging_level)
        })
        .collect()
}

/// The input event that presses the first chord of the toggle keybind:
/// the last button goes down while the others are held.
fn toggle_press(shaker: &AutoShaker) -> Option<ButtonsChanged> {
    let chord = shaker.config().toggle_shaker.keybinds().first()?;
    let (last, held) = chord.buttons().split_last()?;
    Some(ButtonsChanged::new(
        [last.name()],
        held.iter().map(autoshaker_core::Button::name),
    ))
}

/// Run the configured number of days.
///
/// # Errors
///
/// Returns [`EngineError::Calendar`] if the start date is invalid or the
/// calendar overflows.
pub async fn run(
    config: &HarnessConfig,
    shaker: &mut AutoShaker,
    world: &mut GridWorld,
) -> Result<SessionSummary, EngineError> {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));
    let mut agents = spawn_agents(config);
    let mut date = config.start_date()?;
    let mut summary = SessionSummary::default();
    let mut saves: Vec<JoinHandle<PersistStatus>> = Vec::new();
    let mut hud: Vec<String> = Vec::new();
    let move_every = u64::from(config.move_every.max(1));

    info!(
        agents = agents.len(),
        days = config.days,
        start = %date,
        "session starting"
    );

    for _ in 0..config.days {
        let ctx = TickContext::ready(date);

        for _ in 0..config.ticks_per_day {
            summary.ticks = summary.ticks.saturating_add(1);

            if config.toggle_at.contains(&summary.ticks) {
                if let Some(ToggleOutcome { persist, .. }) = press_toggle(shaker, &mut hud) {
                    summary.toggles = summary.toggles.saturating_add(1);
                    saves.push(persist);
                }
            }

            if summary.ticks.checked_rem(move_every) == Some(0) {
                for agent in &mut agents {
                    agent.tile = step(config, &mut rng, agent.tile);
                }
            }

            for agent in &agents {
                let mut sink: Vec<Interaction> = Vec::new();
                shaker.on_update_ticked(&ctx, Some(&*world as &dyn GameLocation), Some(agent), &mut sink);
                let applied = world.apply_all(sink);
                summary.interactions = summary.interactions.saturating_add(applied);
            }
        }

        let report = shaker.on_day_ending(&date);
        summary.rollovers.push(report);
        summary.days = summary.days.saturating_add(1);

        world.start_day();
        date = date.next_day()?;
        debug!(date = %date, "new day");
    }

    for save in saves {
        match save.await {
            Ok(PersistStatus::Saved | PersistStatus::Superseded) => {}
            Ok(PersistStatus::Failed(_)) => {
                summary.failed_saves = summary.failed_saves.saturating_add(1);
            }
            Err(e) => {
                warn!(error = %e, "config save task did not finish");
                summary.failed_saves = summary.failed_saves.saturating_add(1);
            }
        }
    }

    for notice in &hud {
        debug!(notice = %notice, "hud");
    }

    Ok(summary)
}

fn press_toggle(shaker: &mut AutoShaker, hud: &mut Vec<String>) -> Option<ToggleOutcome> {
    let Some(press) = toggle_press(shaker) else {
        warn!("toggle requested but no keybind is bound");
        return None;
    };
    shaker.on_buttons_changed(&press, false, hud)
}

fn step(config: &HarnessConfig, rng: &mut StdRng, tile: TilePoint) -> TilePoint {
    let dx = rng.random_range(-1..=1_i32);
    let dy = rng.random_range(-1..=1_i32);
    config.clamp(TilePoint::new(
        tile.x.saturating_add(dx),
        tile.y.saturating_add(dy),
    ))
}
