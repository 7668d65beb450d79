//! Configuration management for relcycle.
//!
//! This crate handles loading the `relcycle.toml` configuration file.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, find_and_load_config_from, load_config, save_config};
pub use schema::{
    ChangelogConfig, Config, DEFAULT_INDEX_TEMPLATE, LineChange, ProjectConfig, RemoteConfig,
    VersionConfig, VersionFile,
};
