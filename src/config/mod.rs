// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for ck-lint.
//!
//! This module handles loading, parsing, and merging configuration from
//! the project file, the user-wide file and the built-in defaults.

pub mod default;
mod loader;
mod schema;

pub use default::{default_rules, example_config};
pub use loader::{
    find_config_file, find_config_file_from, load_config, load_config_from, load_config_layers,
    merge_tables, parse_config,
};
pub use schema::*;
