//! Configuration for the HamQRG CLI.
//!
//! Provides the [`HamqrgConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `HAMQRG_CONFIG` environment variable
//! 3. XDG default: `~/.config/hamqrg/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use hamqrg_acl::DEFAULT_LANDING_ROUTE;
use hamqrg_actions::ActionSettings;
use hamqrg_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the HamQRG CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HamqrgConfig {
    /// Page-gating configuration.
    pub access: AccessConfig,

    /// Guarded-action configuration (message locale, sync procedure).
    pub actions: ActionSettings,
}

/// Page-gating configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Where callers are sent when a page refuses them.
    pub landing_route: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            landing_route: DEFAULT_LANDING_ROUTE.to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl HamqrgConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("HAMQRG");
        env_opts.add_section("access");
        env_opts.add_section("actions");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("HAMQRG_CONFIG") {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("hamqrg").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Flatten this config into environment variable pairs with `HAMQRG_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self)?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "HAMQRG", &mut vars);
        Ok(vars)
    }
}

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                flatten_toml_value(val, &format!("{prefix}_{}", key.to_uppercase()), out);
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hamqrg_actions::{DEFAULT_SYNC_FUNCTION, Locale};
    use std::collections::HashMap;

    #[test]
    fn test_config_default() {
        let config = HamqrgConfig::default();
        assert_eq!(config.access.landing_route, "/");
        assert_eq!(config.actions.locale, Locale::En);
        assert_eq!(config.actions.sync_function, DEFAULT_SYNC_FUNCTION);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [access]
            landing_route = "/welcome"

            [actions]
            locale = "it"
            sync_function = "sync_staging"
        "#;

        let config: HamqrgConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.access.landing_route, "/welcome");
        assert_eq!(config.actions.locale, Locale::It);
        assert_eq!(config.actions.sync_function, "sync_staging");
    }

    #[test]
    fn test_config_partial_toml_keeps_defaults() {
        let config: HamqrgConfig = toml::from_str("[actions]\nlocale = \"it\"\n").unwrap();
        assert_eq!(config.access.landing_route, "/");
        assert_eq!(config.actions.sync_function, DEFAULT_SYNC_FUNCTION);
    }

    #[test]
    fn test_config_to_toml() {
        let toml_str = HamqrgConfig::default().to_toml_string().unwrap();
        assert!(toml_str.contains("[access]"));
        assert!(toml_str.contains("landing_route = \"/\""));
        assert!(toml_str.contains("locale = \"en\""));
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[access]\nlanding_route = \"/public\"\n").unwrap();

        let config = HamqrgConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.access.landing_route, "/public");
    }

    #[test]
    fn test_config_load_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let config = HamqrgConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.access.landing_route, "/");
    }

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = HamqrgConfig::resolve_config_path(Some("/etc/hamqrg.toml"));
        assert_eq!(path, Some(PathBuf::from("/etc/hamqrg.toml")));
    }

    #[test]
    fn test_config_to_env_vars() {
        let vars = HamqrgConfig::default().to_env_vars().unwrap();
        let map: HashMap<_, _> = vars.into_iter().collect();
        assert_eq!(map.get("HAMQRG_ACCESS_LANDING_ROUTE").unwrap(), "/");
        assert_eq!(map.get("HAMQRG_ACTIONS_LOCALE").unwrap(), "en");
        assert_eq!(
            map.get("HAMQRG_ACTIONS_SYNC_FUNCTION").unwrap(),
            DEFAULT_SYNC_FUNCTION
        );
    }
}
