//! Handler functions for config CLI commands.
//!
//! Implements `hamqrg config {path,show,get,init,export}`.

use crate::cli::ConfigAction;
use crate::config::HamqrgConfig;
use hamqrg_core::{Error, Result};
use std::path::PathBuf;

/// Handle a config subcommand.
///
/// Receives the raw `--config` path (not a loaded config) because some
/// commands (path, init) work before a config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => {
            let config = HamqrgConfig::load(config_path)?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        ConfigAction::Get { key } => {
            let config = HamqrgConfig::load(config_path)?;
            println!("{}", config_value(&config, &key)?);
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            let path = init_config_file(file.as_deref(), force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
        ConfigAction::Export { docker_env } => {
            let config = HamqrgConfig::load(config_path)?;
            for (key, value) in config.to_env_vars()? {
                if docker_env {
                    println!("--env {key}={value}");
                } else {
                    println!("{key}={value}");
                }
            }
            Ok(())
        }
    }
}

fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = HamqrgConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist, run `hamqrg config init` to create it)");
    }
    Ok(())
}

/// Look up a dotted key in the effective configuration.
pub fn config_value(config: &HamqrgConfig, key: &str) -> Result<String> {
    let root = toml::Value::try_from(config)?;
    let mut current = &root;
    for part in key.split('.') {
        current = current
            .as_table()
            .and_then(|t| t.get(part))
            .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    }
    Ok(match current {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(_) => toml::to_string_pretty(current)?,
        other => other.to_string(),
    })
}

/// Write a default configuration file, returning where it went.
pub fn init_config_file(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => HamqrgConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, HamqrgConfig::default().to_toml_string()?)?;
    Ok(path)
}
