//! Configuration file parsing (HOCON format).

use std::path::Path;

use crate::common::error::ConfigError;
use crate::config::types::Config;
use hocon::HoconLoader;

/// Load configuration from a HOCON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();

    HoconLoader::new()
        .load_file(path)
        .map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

/// Load configuration from a HOCON string.
pub fn load_config_str(content: &str) -> Result<Config, ConfigError> {
    HoconLoader::new()
        .load_str(content)
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_full_config() {
        let config = load_config_str(
            r#"
            discord {
                token = "abc"
                guild_id = 123456789
                admin_role_id = 42
                dm_only = false
            }
            game {
                id = 3
                spectator_role = "Spectator"
                detect_duplicates = false
            }
            "#,
        )
        .unwrap();

        assert_eq!(config.discord.token, "abc");
        assert_eq!(config.discord.guild_id, 123456789);
        assert_eq!(config.discord.admin_role_id, 42);
        assert!(!config.discord.dm_only);
        assert_eq!(config.game.id, 3);
        assert_eq!(config.game.spectator_role.as_deref(), Some("Spectator"));
        assert!(!config.game.detect_duplicates);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = load_config_str(r#"discord { token = "abc" }"#).unwrap();

        assert_eq!(config.discord.token, "abc");
        assert_eq!(config.discord.activity, "Backstabbr");
        assert_eq!(config.game.id, 1);
        assert_eq!(config.game.category_prefix, "Diplomacy Gaming");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config("/nonexistent/diplomat.conf");
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
