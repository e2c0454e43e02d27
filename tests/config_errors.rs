//! Configuration failures abort the run before any check executes.

mod helpers;

use helpers::Workspace;
use serde_json::json;
use site_monitor::config::{load_and_validate, write_template, TemplateFormat};
use site_monitor::{run_monitor, Config};

#[tokio::test]
async fn test_missing_config_is_an_error() {
    let ws = Workspace::new();
    let config = Config {
        config_path: ws.dir.path().join("nope.yaml"),
        ..Default::default()
    };

    let err = run_monitor(config).await.unwrap_err();
    assert!(format!("{err:#}").contains("Config not found"));
}

#[tokio::test]
async fn test_unsupported_extension() {
    let ws = Workspace::new();
    let path = ws.dir.path().join("config.toml");
    std::fs::write(&path, "checks = []").unwrap();

    let err = run_monitor(Config {
        config_path: path,
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert!(format!("{err:#}").contains("Unsupported config extension: .toml"));
}

#[tokio::test]
async fn test_invalid_config_creates_no_database() {
    let ws = Workspace::new();
    let config = ws.write_config(json!({
        "checks": [
            { "id": "a", "name": "A", "url": "https://example.com/" },
            { "id": "A", "name": "A again", "url": "https://example.com/" }
        ]
    }));

    let err = run_monitor(config).await.unwrap_err();
    assert!(format!("{err:#}").contains("Duplicate check id: A"));
    assert!(!ws.db_path().exists());
}

#[tokio::test]
async fn test_malformed_yaml() {
    let ws = Workspace::new();
    let path = ws.dir.path().join("config.yml");
    std::fs::write(&path, "checks: [unclosed").unwrap();

    let err = run_monitor(Config {
        config_path: path,
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert!(format!("{err:#}").contains("Invalid YAML config"));
}

#[test]
fn test_generated_templates_load() {
    let ws = Workspace::new();
    for (format, name) in [
        (TemplateFormat::Json, "generated.json"),
        (TemplateFormat::Yaml, "generated.yaml"),
    ] {
        let path = write_template(format, Some(&ws.dir.path().join(name))).unwrap();
        let cfg = load_and_validate(&path).unwrap();
        assert!(!cfg.checks.is_empty());
        assert!(cfg.notifications.is_some());
    }
}
