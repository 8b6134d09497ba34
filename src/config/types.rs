//! Configuration type definitions.

use serde::Deserialize;

/// Owner that may always reload the bot, even without the admin role.
pub const DEFAULT_OWNER_ID: u64 = 730426592332873858;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub game: GameConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    pub token: String,
    /// Community guild the bot operates in.
    pub guild_id: u64,
    /// Members with this role may reload the bot.
    pub admin_role_id: u64,
    pub owner_id: u64,
    /// "Playing ..." presence text.
    pub activity: String,
    /// Sent to users that are not members of the guild.
    pub invite_url: String,
    /// Only answer direct messages; guild messages are ignored.
    pub dm_only: bool,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            guild_id: 0,
            admin_role_id: 0,
            owner_id: DEFAULT_OWNER_ID,
            activity: "Backstabbr".to_string(),
            invite_url: "https://discord.gg/zXCJHTb".to_string(),
            dm_only: true,
        }
    }
}

/// Game and channel provisioning settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Nation roles are named "<nation> <id>".
    pub id: u32,
    /// Group channels go into the category "<category_prefix> <id>".
    pub category_prefix: String,
    /// Role pinged in every new group channel.
    pub ping_role: Option<String>,
    /// Role that may read every group channel.
    pub spectator_role: Option<String>,
    /// Refuse to create a group whose nation set already has a channel.
    pub detect_duplicates: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            id: 1,
            category_prefix: "Diplomacy Gaming".to_string(),
            ping_role: Some("Current Player".to_string()),
            spectator_role: None,
            detect_duplicates: true,
        }
    }
}

impl GameConfig {
    /// Name of the category group channels are created in, lower-cased.
    pub fn category_name(&self) -> String {
        format!("{} {}", self.category_prefix, self.id).to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.discord.owner_id, DEFAULT_OWNER_ID);
        assert!(config.discord.dm_only);
        assert_eq!(config.game.id, 1);
        assert!(config.game.detect_duplicates);
        assert_eq!(config.game.ping_role.as_deref(), Some("Current Player"));
    }

    #[test]
    fn test_category_name() {
        let game = GameConfig {
            id: 4,
            ..GameConfig::default()
        };
        assert_eq!(game.category_name(), "diplomacy gaming 4");
    }
}
