//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    // Validate Discord config
    if config.discord.token.is_empty() {
        errors.push("discord.token is required (or set DISCORD_TOKEN)".to_string());
    }
    if config.discord.token == "YOUR_DISCORD_TOKEN_HERE" {
        errors.push("discord.token has not been configured (still using placeholder)".to_string());
    }
    if config.discord.guild_id == 0 {
        errors.push("discord.guild_id is required (or set COMM_GUILD_ID)".to_string());
    }
    if config.discord.admin_role_id == 0 {
        errors.push("discord.admin_role_id is required (or set ADMIN_ROLE_ID)".to_string());
    }
    if config.discord.owner_id == 0 {
        errors.push("discord.owner_id must be non-zero".to_string());
    }

    // Validate game config
    if config.game.category_prefix.trim().is_empty() {
        errors.push("game.category_prefix must not be empty".to_string());
    }
    for (key, role) in [
        ("game.ping_role", &config.game.ping_role),
        ("game.spectator_role", &config.game.spectator_role),
    ] {
        if role.as_deref().is_some_and(|name| name.trim().is_empty()) {
            errors.push(format!("{} must not be empty when set", key));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::*;

    fn make_valid_config() -> Config {
        Config {
            discord: DiscordConfig {
                token: "valid_token_here".to_string(),
                guild_id: 123456789,
                admin_role_id: 987654321,
                ..DiscordConfig::default()
            },
            game: GameConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let config = make_valid_config();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_token_fails() {
        let mut config = make_valid_config();
        config.discord.token = String::new();

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("discord.token"));
    }

    #[test]
    fn test_placeholder_token_fails() {
        let mut config = make_valid_config();
        config.discord.token = "YOUR_DISCORD_TOKEN_HERE".to_string();

        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("placeholder"));
    }

    #[test]
    fn test_missing_ids_reported_together() {
        let mut config = make_valid_config();
        config.discord.guild_id = 0;
        config.discord.admin_role_id = 0;

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("discord.guild_id"));
        assert!(message.contains("discord.admin_role_id"));
    }

    #[test]
    fn test_blank_spectator_role_fails() {
        let mut config = make_valid_config();
        config.game.spectator_role = Some("  ".to_string());

        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("game.spectator_role"));
    }
}
