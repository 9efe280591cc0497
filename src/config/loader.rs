// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.

use crate::error::{ConfigError, LintError, Result};
use std::path::{Path, PathBuf};

use super::schema::LintConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["ck-lint.toml", ".ck-lint.toml", ".config/ck-lint.toml"];

/// Find the project configuration file in the current directory or its parents.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the project configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    None
}

/// Find the user-wide configuration file.
pub fn find_global_config_file() -> Option<PathBuf> {
    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("ck-lint").join("config.toml");
        if path.exists() {
            return Some(path);
        }
    }

    let home = dirs::home_dir()?;
    CONFIG_FILES
        .iter()
        .map(|name| home.join(name))
        .find(|path| path.exists())
}

/// Keys whose arrays are concatenated rather than replaced when layering.
const APPENDED_KEYS: &[&str] = &["patterns"];

/// Load configuration from the default locations.
///
/// The project file is layered over the user-wide file, which is layered
/// over the defaults.
pub fn load_config() -> Result<LintConfig> {
    let global = find_global_config_file();
    let project = find_config_file().filter(|path| Some(path) != global.as_ref());

    let layers: Vec<PathBuf> = global.into_iter().chain(project).collect();
    if layers.is_empty() {
        tracing::debug!("No configuration file found, using defaults");
    }
    load_config_layers(&layers)
}

/// Load and layer configuration files, later files taking precedence.
///
/// A key missing from a later file is inherited from the earlier ones.
pub fn load_config_layers(paths: &[PathBuf]) -> Result<LintConfig> {
    let mut table = toml::Table::new();
    for path in paths {
        table = merge_tables(table, read_table(path)?);
    }
    config_from_table(table)
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<LintConfig> {
    config_from_table(read_table(path)?)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<LintConfig> {
    config_from_table(parse_table(content)?)
}

fn read_table(path: &Path) -> Result<toml::Table> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(LintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_table(&content)
}

fn parse_table(content: &str) -> Result<toml::Table> {
    content.parse::<toml::Table>().map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

fn config_from_table(table: toml::Table) -> Result<LintConfig> {
    toml::Value::Table(table).try_into().map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Invalid configuration: {}", e),
        })
    })
}

/// Layer one configuration table over another.
///
/// Tables merge key by key, so a rule or a `[ui]` setting absent from the
/// overlay keeps its base value. Ignore patterns are concatenated. Any other
/// value present in the overlay replaces the base value.
pub fn merge_tables(base: toml::Table, overlay: toml::Table) -> toml::Table {
    let mut merged = base;

    for (key, value) in overlay {
        let layered = match (merged.remove(&key), value) {
            (Some(toml::Value::Table(base)), toml::Value::Table(overlay)) => {
                toml::Value::Table(merge_tables(base, overlay))
            }
            (Some(toml::Value::Array(mut base)), toml::Value::Array(overlay))
                if APPENDED_KEYS.contains(&key.as_str()) =>
            {
                base.extend(overlay);
                toml::Value::Array(base)
            }
            (_, value) => value,
        };
        merged.insert(key, layered);
    }

    merged
}
