//! Headless harness for the AutoShaker dispatcher.
//!
//! Stands in for a game host: loads the configuration, lays out a seeded
//! farm, walks agents over it for a few in-world days, and drives the
//! per-tick, day-end, and input hooks, logging each day's summary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load the shaker configuration from `autoshaker-config.yaml`
//!    (overridable with `AUTOSHAKER_CONFIG`)
//! 3. Load the `harness` section from the same file
//! 4. Plan and build the farm
//! 5. Run the session and wait for pending config saves
//! 6. Log the totals

mod error;
mod farm;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use autoshaker_core::{AutoShaker, YamlFileStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::farm::HarnessConfig;

/// Environment variable overriding the config file path.
const CONFIG_ENV: &str = "AUTOSHAKER_CONFIG";

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "autoshaker-config.yaml";

/// Application entry point for the harness.
///
/// # Errors
///
/// Returns an error if configuration loading, farm construction, or the
/// session fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("autoshaker-engine starting");

    // 2. Load shaker configuration.
    let config_path = config_path();
    let store = YamlFileStore::new(config_path.clone());
    let config = store.load_or_default()?;
    info!(
        path = %config_path.display(),
        active = config.is_shaker_active,
        shake_distance = config.shake_distance,
        use_player_magnetism = config.use_player_magnetism,
        toggle = %config.toggle_shaker,
        "Configuration loaded"
    );

    // 3. Load harness configuration.
    let harness = load_harness_config(&store)?;
    info!(
        seed = harness.seed,
        days = harness.days,
        ticks_per_day = harness.ticks_per_day,
        agents = harness.agents,
        "Harness configuration loaded"
    );

    // 4. Build the farm.
    let plan = farm::plan_farm(&harness);
    let mut world = plan.build()?;

    // 5. Run.
    let mut shaker = AutoShaker::new(config, Arc::new(store), tokio::runtime::Handle::current());
    let summary = session::run(&harness, &mut shaker, &mut world).await?;

    // 6. Log results.
    info!(
        days = summary.days,
        ticks = summary.ticks,
        interactions = summary.interactions,
        toggles = summary.toggles,
        failed_saves = summary.failed_saves,
        "autoshaker-engine shutdown complete"
    );

    Ok(())
}

/// The config file path, from `AUTOSHAKER_CONFIG` or the default.
fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load the `harness` section. Missing file or section means defaults.
fn load_harness_config(store: &YamlFileStore) -> Result<HarnessConfig, EngineError> {
    let Some(raw) = store.read_document()? else {
        return Ok(HarnessConfig::default());
    };

    if let Some(section) = raw.get("harness") {
        let harness: HarnessConfig =
            serde_yml::from_value(section.clone()).map_err(|e| EngineError::Harness {
                message: format!("failed to parse harness config: {e}"),
            })?;
        Ok(harness)
    } else {
        Ok(HarnessConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use autoshaker_types::AgentId;

    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("autoshaker-engine-{tag}-{}.yaml", AgentId::new()))
    }

    #[test]
    fn harness_section_is_read_next_to_shaker_keys() {
        let path = temp_path("harness");
        std::fs::write(&path, "shake_distance: 3\nharness:\n  seed: 9\n  days: 1\n").unwrap();
        let store = YamlFileStore::new(&path);

        let harness = load_harness_config(&store).unwrap();
        assert_eq!((harness.seed, harness.days), (9, 1));
        assert_eq!(store.load_or_default().unwrap().shake_distance, 3);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_or_section_gives_defaults() {
        let store = YamlFileStore::new(temp_path("missing"));
        assert_eq!(load_harness_config(&store).unwrap(), HarnessConfig::default());

        let path = temp_path("no-section");
        std::fs::write(&path, "shake_distance: 3\n").unwrap();
        let store = YamlFileStore::new(&path);
        assert_eq!(load_harness_config(&store).unwrap(), HarnessConfig::default());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_harness_section_is_reported() {
        let path = temp_path("bad");
        std::fs::write(&path, "harness:\n  seed: lots\n").unwrap();
        let store = YamlFileStore::new(&path);
        assert!(matches!(load_harness_config(&store), Err(EngineError::Harness { .. })));
        std::fs::remove_file(&path).unwrap();
    }
}
