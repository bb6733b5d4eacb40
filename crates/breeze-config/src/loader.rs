use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::Config;

/// Config file name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "breeze.json";

/// Per-user directory holding `config.json` and the shell line history.
pub const USER_DIR: &str = ".breeze";

/// `~/.breeze`, if a home directory is known.
pub fn user_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(USER_DIR))
}

/// Expand a leading `~` in a configured path. Other paths are returned as
/// given, so relative ones stay relative to the current directory.
pub fn resolve_path(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Lookup order for the config file: `./breeze.json`, then
/// `~/.breeze/config.json`.
fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    candidates.extend(user_dir().map(|dir| dir.join("config.json")));
    candidates
}

/// First existing config file. When none exists, the per-user location is
/// returned so `init` knows where to write (or `./breeze.json` without a home
/// directory).
pub fn find_config_path() -> PathBuf {
    let candidates = config_candidates();
    if let Some(found) = candidates.iter().find(|p| p.exists()) {
        return found.clone();
    }
    candidates
        .into_iter()
        .last()
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
}

/// Load configuration from a JSON file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read config '{}'", path.display()))
        }
    };
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config '{}'", path.display()))
}

/// Write `config` as pretty JSON, creating the parent directory.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    let contents = serde_json::to_string_pretty(config).context("serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config '{}'", path.display()))
}
