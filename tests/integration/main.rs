//! Integration tests for Warren
//!
//! These tests verify that multiple systems work together correctly.

use std::process::Command;

use tempfile::TempDir;
use warren_core::{Forest, JsonFile, LayoutParams, PageStore, Persistence, layout};

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let output = Command::new("cargo")
        .args(["run", "--", "--help"])
        .current_dir(".")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("warren"));
    assert!(stdout.contains("rabbit holes"));
}

/// Test that the server wraps a store and exposes its state
#[tokio::test]
async fn test_server_startup() {
    use warren_core::MemoryPersistence;
    use warren_server::{ServerConfig, WarrenServer};

    let store = PageStore::new();
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0, // Let OS assign port
    };

    let server = WarrenServer::new(store, Box::new(MemoryPersistence::new()), config);
    assert_eq!(server.state().store.read().await.len(), 0);
}

/// Full flow: record pages, persist, reload, derive the forest, lay it out
#[test]
fn test_record_persist_reload_layout() {
    let temp_dir = TempDir::new().unwrap();
    let backend = JsonFile::new(temp_dir.path());

    let mut store = PageStore::new();
    store.add_page("Rabbit hole", None, None).unwrap();
    store
        .add_page("Lewis Carroll", Some("Rabbit hole"), None)
        .unwrap();
    store
        .add_page("Logic", Some("Lewis Carroll"), None)
        .unwrap();
    store.add_page("Moon landing", None, None).unwrap();
    backend.save(&store.snapshot()).unwrap();

    // A fresh process would reload exactly this state
    let reloaded = PageStore::restore(backend.load().unwrap()).unwrap();
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded.parent_of("Logic"), Some("Lewis Carroll"));
    assert_eq!(
        reloaded.get_page("Rabbit hole").unwrap().url,
        "https://en.wikipedia.org/wiki/Rabbit_hole"
    );

    let forest = Forest::build(&reloaded);
    let mut roots = forest.roots().to_vec();
    roots.sort_unstable();
    assert_eq!(roots, ["Moon landing", "Rabbit hole"]);

    let result = layout(&forest, &LayoutParams::default());
    assert_eq!(result.positions.len(), 4);
    assert_eq!(result.edges.len(), 2);

    // Chain hangs straight down from its root
    let hole = result.positions["Rabbit hole"];
    let carroll = result.positions["Lewis Carroll"];
    let logic = result.positions["Logic"];
    assert_eq!(carroll.x, hole.x);
    assert_eq!(logic.x, hole.x);
    assert_eq!(carroll.y, hole.y - 1.0);
    assert_eq!(logic.y, hole.y - 2.0);
}

/// An invalid mutation leaves both memory and disk untouched
#[test]
fn test_rejected_mutation_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let backend = JsonFile::new(temp_dir.path());

    let mut store = PageStore::new();
    store.add_page("A", None, None).unwrap();
    store.add_page("B", Some("A"), None).unwrap();
    backend.save(&store.snapshot()).unwrap();
    let on_disk = backend.load().unwrap();

    assert!(store.add_page("A", Some("B"), None).is_err());

    assert_eq!(store.snapshot(), on_disk);
}
