//! Runtime on/off switch bound to a keybind.
//!
//! When the configured keybind is just pressed and no menu is open, the
//! toggle flips `is_shaker_active`, shows a HUD notice, and saves the
//! configuration in the background. The save is fire-and-forget: its
//! outcome is only logged, it is never retried, and a failed save does not
//! undo the flip.
//!
//! Saves run one at a time. Each carries the generation of the press that
//! produced it; a save whose generation is not newer than the last one
//! attempted is dropped, so the store always ends on the latest flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use autoshaker_world::Hud;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::ShakerConfig;
use crate::input::ButtonsChanged;
use crate::store::ConfigStore;

/// Whether the shaker runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakerState {
    /// Scans and dispatches every tick.
    Active,
    /// Does nothing until re-activated.
    Inactive,
}

impl ShakerState {
    /// The state described by `is_shaker_active`.
    pub const fn from_flag(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }

    /// Word used in the HUD notice.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "ACTIVATED",
            Self::Inactive => "DEACTIVATED",
        }
    }
}

/// Result of a background save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistStatus {
    /// The store accepted the write.
    Saved,
    /// The write failed; the message is what was logged.
    Failed(String),
    /// A later press had already been saved; this snapshot was dropped.
    Superseded,
}

/// What a toggle press did.
#[derive(Debug)]
pub struct ToggleOutcome {
    /// State after the flip.
    pub state: ShakerState,
    /// The HUD notice shown.
    pub notice: String,
    /// The background save. Nothing on the tick path awaits it.
    pub persist: JoinHandle<PersistStatus>,
}

/// Flips the active flag and saves the result.
#[derive(Clone)]
pub struct ActivationToggle {
    store: Arc<dyn ConfigStore>,
    runtime: Handle,
    /// Generation of the most recent press.
    issued: Arc<AtomicU64>,
    /// Generation of the last save attempted. Held for the whole write.
    written: Arc<Mutex<u64>>,
}

impl core::fmt::Debug for ActivationToggle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActivationToggle").finish_non_exhaustive()
    }
}

impl ActivationToggle {
    /// Create a toggle saving through `store` on `runtime`.
    pub fn new(store: Arc<dyn ConfigStore>, runtime: Handle) -> Self {
        Self {
            store,
            runtime,
            issued: Arc::new(AtomicU64::new(0)),
            written: Arc::new(Mutex::new(0)),
        }
    }

    /// Handle one input event. Returns `None` unless the keybind fired
    /// with no menu open.
    pub fn handle_input(
        &self,
        config: &mut ShakerConfig,
        input: &ButtonsChanged,
        menu_open: bool,
        hud: &mut dyn Hud,
    ) -> Option<ToggleOutcome> {
        if menu_open || !config.toggle_shaker.just_pressed(input) {
            return None;
        }

        config.is_shaker_active = !config.is_shaker_active;
        let state = ShakerState::from_flag(config.is_shaker_active);
        let generation = self.issued.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        let persist = self.persist(config.clone(), generation);

        let notice = format!("AutoShaker has been {}", state.label());
        tracing::info!("{notice}");
        hud.add_hud_message(&notice);

        Some(ToggleOutcome {
            state,
            notice,
            persist,
        })
    }

    fn persist(&self, config: ShakerConfig, generation: u64) -> JoinHandle<PersistStatus> {
        let store = Arc::clone(&self.store);
        let written = Arc::clone(&self.written);
        self.runtime.spawn(async move {
            let mut last = written.lock().await;
            if *last >= generation {
                tracing::debug!(generation, last = *last, "stale config save dropped");
                return PersistStatus::Superseded;
            }
            *last = generation;
            let result = tokio::task::spawn_blocking(move || store.write(&config)).await;
            drop(last);
            match result {
                Ok(Ok(())) => {
                    tracing::info!("Config saved successfully!");
                    PersistStatus::Saved
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "Saving config unsuccessful");
                    PersistStatus::Failed(e.to_string())
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Saving config unsuccessful");
                    PersistStatus::Failed(e.to_string())
                }
            }
        })
    }
}
