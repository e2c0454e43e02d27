// Shared test helpers: config files in a temp dir and access to the run database.

use std::path::{Path, PathBuf};

use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;

use site_monitor::Config;

/// A temp directory holding `config.json` and the SQLite database it points at.
pub struct Workspace {
    pub dir: TempDir,
}

#[allow(dead_code)] // Not every test file uses every helper
impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("data").join("monitor.db")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    /// Writes `config` (with `sqlite.dbPath` filled in) and returns the run configuration.
    pub fn write_config(&self, mut config: Value) -> Config {
        config["sqlite"] = serde_json::json!({ "dbPath": self.db_path() });
        std::fs::write(
            self.config_path(),
            serde_json::to_string_pretty(&config).expect("serialize config"),
        )
        .expect("Failed to write config");

        Config {
            config_path: self.config_path(),
            ..Default::default()
        }
    }

    pub async fn pool(&self) -> SqlitePool {
        open_pool(&self.db_path()).await
    }
}

#[allow(dead_code)]
pub async fn open_pool(path: &Path) -> SqlitePool {
    SqlitePool::connect(&format!("sqlite:{}", path.display()))
        .await
        .expect("Failed to open run database")
}

/// A check definition with the given id, URL and severity.
#[allow(dead_code)]
pub fn check(id: &str, url: &str, severity: &str) -> Value {
    serde_json::json!({
        "id": id,
        "name": format!("Check {id}"),
        "url": url,
        "severity": severity,
        "timeoutSeconds": 5
    })
}
