//! Configuration parsing and types.

pub mod env;
pub mod parser;
pub mod types;
pub mod validate;

use std::path::Path;

use tracing::{info, warn};

use crate::common::error::ConfigError;

pub use types::*;

/// Load the config file (if any), apply environment overrides, and validate.
///
/// The default config path is optional: without it the bot runs purely from
/// environment variables. A path named through `DIPLOMAT_CONFIG` must exist.
pub fn load_and_validate() -> Result<Config, ConfigError> {
    let (path, explicit) = env::get_config_path();

    let config = if explicit || Path::new(&path).exists() {
        info!("Loading configuration from {}...", path);
        parser::load_config(&path)?
    } else {
        info!("No {} found, using defaults and environment", path);
        Config::default()
    };

    for var in env::check_empty_env_vars() {
        warn!("Environment variable {} is set but empty", var);
    }

    let config = env::apply_env_overrides(config);
    validate::validate_config(&config)?;
    Ok(config)
}
