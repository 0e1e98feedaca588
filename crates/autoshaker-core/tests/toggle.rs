//! Activation toggle through the orchestrator, saving to a real YAML file.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use autoshaker_core::{
    AutoShaker, ButtonsChanged, ConfigStore, PersistStatus, ShakerConfig, ShakerState, SkipReason,
    TickOutcome, YamlFileStore,
};
use autoshaker_types::{AgentId, AgentSnapshot, TilePoint, WorldDate};
use autoshaker_world::{GridWorld, Interaction, TickContext};
use tokio::runtime::Handle;

fn temp_config(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("autoshaker-toggle-{tag}-{}.yaml", AgentId::new()))
}

fn chord() -> ButtonsChanged {
    ButtonsChanged::new(["H"], ["LeftShift"])
}

#[tokio::test]
async fn toggle_deactivates_and_persists() {
    let path = temp_config("persist");
    let store = Arc::new(YamlFileStore::new(&path));
    let mut shaker = AutoShaker::new(ShakerConfig::default(), store.clone(), Handle::current());
    let mut hud: Vec<String> = Vec::new();

    let outcome = shaker.on_buttons_changed(&chord(), false, &mut hud).unwrap();
    assert_eq!(outcome.state, ShakerState::Inactive);
    assert_eq!(hud, vec!["AutoShaker has been DEACTIVATED".to_owned()]);
    assert_eq!(outcome.persist.await.unwrap(), PersistStatus::Saved);

    let saved = store.read().unwrap();
    assert!(!saved.is_shaker_active);
    assert_eq!(saved.toggle_shaker.to_string(), "LeftShift + H");

    // Ticks now short-circuit.
    let world = GridWorld::new("Farm");
    let agent = AgentSnapshot::new(AgentId::new(), TilePoint::new(0, 0), 128);
    let mut sink: Vec<Interaction> = Vec::new();
    let tick = shaker.on_update_ticked(
        &TickContext::ready(WorldDate::START),
        Some(&world),
        Some(&agent),
        &mut sink,
    );
    assert_eq!(tick, TickOutcome::Skipped(SkipReason::Inactive));

    std::fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn failed_write_still_flips_the_flag() {
    // The parent directory does not exist, so the write fails.
    let path = temp_config("missing-dir").join("config.yaml");
    let store = Arc::new(YamlFileStore::new(path));
    let mut shaker = AutoShaker::new(ShakerConfig::default(), store, Handle::current());
    let mut hud: Vec<String> = Vec::new();

    let outcome = shaker.on_buttons_changed(&chord(), false, &mut hud).unwrap();
    assert!(matches!(outcome.persist.await.unwrap(), PersistStatus::Failed(_)));
    assert!(!shaker.config().is_shaker_active);
}

#[tokio::test]
async fn menu_and_unbound_keybind_do_nothing() {
    let store = Arc::new(YamlFileStore::new(temp_config("unused")));
    let config = ShakerConfig {
        toggle_shaker: "None".parse().unwrap(),
        ..ShakerConfig::default()
    };
    let mut shaker = AutoShaker::new(config, store, Handle::current());
    let mut hud: Vec<String> = Vec::new();

    assert!(shaker.on_buttons_changed(&chord(), false, &mut hud).is_none());
    assert!(shaker.on_buttons_changed(&chord(), true, &mut hud).is_none());
    assert!(shaker.config().is_shaker_active);
    assert!(hud.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rapid_presses_leave_the_file_on_the_latest_flag() {
    let path = temp_config("rapid");
    std::fs::write(&path, "harness:\n  seed: 5\n").unwrap();
    let store = Arc::new(YamlFileStore::new(&path));
    let mut shaker = AutoShaker::new(ShakerConfig::default(), store.clone(), Handle::current());
    let mut hud: Vec<String> = Vec::new();

    let mut saves = Vec::new();
    for _ in 0..5 {
        saves.push(shaker.on_buttons_changed(&chord(), false, &mut hud).unwrap().persist);
    }
    for save in saves {
        let status = save.await.unwrap();
        assert!(matches!(status, PersistStatus::Saved | PersistStatus::Superseded));
    }

    assert!(!shaker.config().is_shaker_active);
    assert_eq!(store.read().unwrap().is_shaker_active, shaker.config().is_shaker_active);
    let raw = store.read_document().unwrap().unwrap();
    assert_eq!(
        raw.get("harness")
            .and_then(|h| h.get("seed"))
            .and_then(serde_yml::Value::as_u64),
        Some(5)
    );

    std::fs::remove_file(&path).unwrap();
}
