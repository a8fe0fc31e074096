//! Integration tests for add-on data purge

use addon_engine::config::Config;
use addon_engine::purge::{purge_data, DataPurger};
use addon_engine::telemetry::{MemorySink, PolicyEvent};
use std::sync::Arc;
use tempfile::TempDir;

fn populate(folder: &std::path::Path) {
    std::fs::create_dir_all(folder.join("share").join("cache")).unwrap();
    std::fs::write(folder.join("options.json"), r#"{"log_level": "info"}"#).unwrap();
    std::fs::write(folder.join("share").join("cache").join("blob"), [0u8; 128]).unwrap();
}

#[tokio::test]
async fn test_purge_removes_addon_data() {
    let temp = TempDir::new().unwrap();
    let folder = temp.path().join("core_ssh");
    populate(&folder);

    let sink = MemorySink::new();
    purge_data(&folder, &sink).await;

    assert!(!folder.exists());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_purge_nonexistent_folder_returns_normally() {
    let temp = TempDir::new().unwrap();
    let folder = temp.path().join("missing");

    let sink = MemorySink::new();
    purge_data(&folder, &sink).await;

    assert_eq!(sink.len(), 1);
    assert!(matches!(
        &sink.events()[0],
        PolicyEvent::PurgeFailed { error, .. } if !error.is_empty()
    ));
}

#[tokio::test]
async fn test_purge_leaves_siblings_alone() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("a");
    let sibling = temp.path().join("b");
    populate(&target);
    populate(&sibling);

    let sink = MemorySink::new();
    purge_data(&target, &sink).await;

    assert!(!target.exists());
    assert!(sibling.join("options.json").exists());
}

#[tokio::test]
async fn test_configured_purge_command() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");
    let toml = format!(
        r#"
[core]
log_level = "debug"
data_dir = "{}"

[purge]
program = "rm"
args = ["-r", "-f"]
"#,
        data_dir.display()
    );
    let config = Config::from_toml(&toml).unwrap();

    let folder = config.addon_data_dir("mosquitto");
    populate(&folder);

    let sink = Arc::new(MemorySink::new());
    let purger = DataPurger::from_config(&config.purge, Arc::<MemorySink>::clone(&sink));
    purger.purge(&folder).await;
    assert!(!folder.exists());

    // -f tolerates missing folders
    purger.purge(&folder).await;
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_concurrent_purges_are_independent() {
    let temp = TempDir::new().unwrap();
    let folders: Vec<_> = (0..8)
        .map(|i| temp.path().join(format!("addon_{}", i)))
        .collect();
    for folder in &folders {
        populate(folder);
    }

    let sink = Arc::new(MemorySink::new());
    let mut handles = Vec::new();
    for folder in folders.clone() {
        let sink = Arc::clone(&sink);
        handles.push(tokio::spawn(async move {
            let purger = DataPurger::new(sink);
            purger.purge(&folder).await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert!(folders.iter().all(|folder| !folder.exists()));
    assert!(sink.is_empty());
}
