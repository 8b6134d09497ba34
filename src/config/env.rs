//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `DISCORD_TOKEN` - Discord bot token
//! - `COMM_GUILD_ID` - Community guild ID
//! - `ADMIN_ROLE_ID` - Role allowed to reload the bot
//! - `OWNER_ID` - User allowed to reload the bot
//! - `GAME_ID` - Game number used in role and category names

use std::env;
use std::str::FromStr;

use crate::config::types::Config;

/// Prefix for variables that only concern this bot.
const ENV_PREFIX: &str = "DIPLOMAT";

/// Default config file, optional unless named explicitly.
pub const DEFAULT_CONFIG_PATH: &str = "diplomat.conf";

/// Apply environment variable overrides to a config.
///
/// This allows the token and guild identifiers to be provided through
/// the environment instead of the config file.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(token) = env::var("DISCORD_TOKEN") {
        config.discord.token = token;
    }

    if let Some(id) = parse_var("COMM_GUILD_ID") {
        config.discord.guild_id = id;
    }
    if let Some(id) = parse_var("ADMIN_ROLE_ID") {
        config.discord.admin_role_id = id;
    }
    if let Some(id) = parse_var("OWNER_ID") {
        config.discord.owner_id = id;
    }

    if let Some(id) = parse_var("GAME_ID") {
        config.game.id = id;
    }

    config
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}

/// Check if any required environment variables are set but empty.
///
/// Returns a list of variable names that are set but empty.
pub fn check_empty_env_vars() -> Vec<String> {
    let vars = ["DISCORD_TOKEN", "COMM_GUILD_ID", "ADMIN_ROLE_ID"];

    vars.into_iter()
        .filter(|var| env::var(var).map(|v| v.is_empty()).unwrap_or(false))
        .map(str::to_string)
        .collect()
}

/// Get the config file path from environment or use default.
///
/// Returns the path and whether it was named explicitly through `DIPLOMAT_CONFIG`.
pub fn get_config_path() -> (String, bool) {
    match env::var(format!("{}_CONFIG", ENV_PREFIX)) {
        Ok(path) => (path, true),
        Err(_) => (DEFAULT_CONFIG_PATH.to_string(), false),
    }
}
