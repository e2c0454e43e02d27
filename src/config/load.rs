//! Locating and parsing the configuration file.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::constants::CONFIG_CANDIDATES;
use crate::config::env::expand_in_place;
use crate::config::model::AppConfig;
use crate::config::validate::validate_config;
use crate::error_handling::ConfigError;

/// Resolves the config path: the explicit path when given, otherwise the first
/// existing candidate in `dir`. When none exists the first candidate is
/// returned so the not-found error names a sensible file.
pub fn resolve_config_path(explicit: Option<&Path>, dir: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    CONFIG_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| dir.join(CONFIG_CANDIDATES[0]))
}

/// Parses the file at `path` as JSON or YAML, chosen by extension.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let cfg = match ext.as_str() {
        "json" => serde_json::from_str(&text)?,
        "yaml" | "yml" => serde_yaml::from_str(&text)?,
        _ => return Err(ConfigError::UnsupportedExtension(format!(".{ext}"))),
    };

    debug!("Loaded config from {}", path.display());
    Ok(cfg)
}

/// Loads, expands `${VAR}` references and validates the configuration.
pub fn load_and_validate(path: &Path) -> Result<AppConfig, ConfigError> {
    let mut cfg = load_config(path)?;
    expand_in_place(&mut cfg);
    validate_config(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL_JSON: &str =
        r#"{"checks":[{"id":"home","name":"Home","url":"https://example.com/"}]}"#;

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("custom.json");
        assert_eq!(
            resolve_config_path(Some(&explicit), dir.path()),
            explicit
        );
    }

    #[test]
    fn test_resolve_finds_first_existing_candidate() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), MINIMAL_JSON).unwrap();
        fs::write(dir.path().join("config.yml"), "checks: []").unwrap();
        assert_eq!(
            resolve_config_path(None, dir.path()),
            dir.path().join("config.yml")
        );
    }

    #[test]
    fn test_resolve_defaults_to_yaml_name() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            resolve_config_path(None, dir.path()),
            dir.path().join("config.yaml")
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_config(&dir.path().join("config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().starts_with("Config not found:"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "x = 1").unwrap();
        let err = load_config(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported config extension: .toml (use .json, .yaml, or .yml)"
        );
    }

    #[test]
    fn test_loads_json_and_yaml() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("a.json");
        fs::write(&json, MINIMAL_JSON).unwrap();
        assert_eq!(load_config(&json).unwrap().checks[0].id, "home");

        let yaml = dir.path().join("b.YML");
        fs::write(
            &yaml,
            "checks:\n  - id: api\n    name: API\n    url: https://api.example.com/health\n",
        )
        .unwrap();
        assert_eq!(load_config(&yaml).unwrap().checks[0].id, "api");
    }

    #[test]
    fn test_invalid_json_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON config:"));
    }

    #[test]
    fn test_load_and_validate_expands_env() {
        std::env::set_var("SITE_MONITOR_TEST_DB", "/var/lib/monitor.db");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"sqlite":{"dbPath":"${SITE_MONITOR_TEST_DB}"},"checks":[{"id":"a","name":"A","url":"https://a.example/"}]}"#,
        )
        .unwrap();
        let cfg = load_and_validate(&path).unwrap();
        assert_eq!(cfg.sqlite.db_path, "/var/lib/monitor.db");
    }

    #[test]
    fn test_load_and_validate_rejects_empty_checks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"checks":[]}"#).unwrap();
        assert!(matches!(
            load_and_validate(&path).unwrap_err(),
            ConfigError::Invalid(_)
        ));
    }
}
