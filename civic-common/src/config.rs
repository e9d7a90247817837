//! Configuration resolution helpers
//!
//! Settings are resolved with a fixed priority order:
//! 1. Environment variable (highest priority)
//! 2. TOML config file key
//! 3. Compiled default (fallback)
//!
//! The config file is searched at `~/.config/civic/config.toml` first, then
//! `/etc/civic/config.toml` on Linux.

use crate::{Error, Result};
use std::path::PathBuf;

/// Resolve a single string setting via ENV -> TOML -> default
pub fn resolve_setting(env_var: &str, toml_key: &str, default: &str) -> String {
    if let Ok(value) = std::env::var(env_var) {
        if !value.trim().is_empty() {
            return value;
        }
    }

    if let Some(value) = toml_lookup(toml_key) {
        return value;
    }

    default.to_string()
}

/// Resolve a numeric setting via ENV -> TOML -> default
///
/// Unparseable values fall through to the next tier rather than failing.
pub fn resolve_setting_u64(env_var: &str, toml_key: &str, default: u64) -> u64 {
    if let Ok(value) = std::env::var(env_var) {
        if let Ok(parsed) = value.trim().parse::<u64>() {
            return parsed;
        }
    }

    if let Some(value) = toml_lookup(toml_key) {
        if let Ok(parsed) = value.trim().parse::<u64>() {
            return parsed;
        }
    }

    default
}

/// Look up a string key in the TOML config file, if one exists
fn toml_lookup(key: &str) -> Option<String> {
    let path = config_file_path().ok()?;
    let content = std::fs::read_to_string(&path).ok()?;
    let config = toml::from_str::<toml::Value>(&content).ok()?;
    config
        .get(key)
        .and_then(|v| match v {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            _ => None,
        })
}

/// Get the configuration file path for the platform
fn config_file_path() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("civic").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/civic/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default data folder for SQLite databases
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("civic"))
        .unwrap_or_else(|| PathBuf::from("./civic_data"))
}
