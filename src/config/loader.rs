use std::fs;
use std::path::{Path, PathBuf};

use super::core::LobbymapConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".lobbymap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str) -> Result<LobbymapConfig> {
    Ok(toml::from_str::<LobbymapConfig>(contents)?)
}

/// Read and parse a specific config file.
pub fn load_config_from_path(path: &Path) -> Result<LobbymapConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::configuration(
            "config",
            format!("failed to read {}: {}", path.display(), e),
        )
    })?;
    parse_config(&contents).map_err(|e| {
        Error::configuration(
            "config",
            format!("failed to parse {}: {}", path.display(), e),
        )
    })
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Nearest `.lobbymap.toml` at or above `start`.
pub fn discover_config_path(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Load configuration.
///
/// An explicit path must exist and parse. Otherwise the nearest
/// `.lobbymap.toml` above the current directory is used; a discovered file
/// that fails to parse is still an error, since silently falling back to
/// defaults would publish scores under the wrong methodology. No file at all
/// means built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<LobbymapConfig> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!("Failed to get current directory: {}. Using default config.", e);
            return Ok(LobbymapConfig::default());
        }
    };

    match discover_config_path(&current) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_from_path(&path)
        }
        None => {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            Ok(LobbymapConfig::default())
        }
    }
}

/// Default configuration rendered as TOML, as written by `lobbymap init`.
pub fn default_config_toml() -> Result<String> {
    Ok(toml::to_string_pretty(&LobbymapConfig::default())?)
}
