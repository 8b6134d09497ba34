//! Error types for the application.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Errors raised while binding nations to guild roles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Could not find role {role_name}")]
    MissingRole { role_name: String },
}

/// Failures of a chat command.
///
/// The `Display` text of every variant is sent back to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Please wait a moment for the bot to finish launching, then try again.")]
    NotReady,

    #[error("The game is not loaded yet. Ask an admin to reload the bot.")]
    GameNotLoaded,

    #[error("Join the server first: {invite_url}")]
    NotMember { invite_url: String },

    #[error("You don't have the right nation role. Contact an admin to !reload the bot.")]
    NoNation,

    #[error("Unknown nation name: {token}")]
    UnknownNation { token: String },

    #[error("The group channel needs {required} or more nations.")]
    TooFewNations { required: usize },

    #[error("That group channel already exists: {url}")]
    AlreadyExists { url: String },

    #[error("Ask an admin to reload the bot.")]
    NotPermitted,

    #[error("Could not reload: {0}")]
    ReloadFailed(#[from] GameError),
}

/// Discord-related errors.
#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Guild {guild_id} is not available")]
    GuildUnavailable { guild_id: u64 },

    #[error("Serenity error: {0}")]
    Serenity(#[from] serenity::Error),
}

/// Result type alias for Discord operations.
pub type DiscordResult<T> = std::result::Result<T, DiscordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        let err = CommandError::UnknownNation {
            token: "Prussia".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown nation name: Prussia");

        let err = CommandError::TooFewNations { required: 3 };
        assert_eq!(err.to_string(), "The group channel needs 3 or more nations.");
    }

    #[test]
    fn test_reload_failure_names_role() {
        let err: CommandError = GameError::MissingRole {
            role_name: "turkey 2".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Could not reload: Could not find role turkey 2");
    }
}
