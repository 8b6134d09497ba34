//! Group channel provisioning.
//!
//! Turns a `group ...` request into a [`GroupPlan`]: the nations involved,
//! the channel name, its permission overwrites and where to put it. The
//! Discord handler only has to execute the plan.

pub mod overwrites;
pub mod plan;

use std::collections::BTreeSet;

use serenity::model::channel::PermissionOverwrite;
use serenity::model::id::{ChannelId, GuildId, RoleId};
use tracing::{debug, warn};

use crate::common::error::CommandError;
use crate::config::GameConfig;
use crate::game::{Game, Nation, Roster};

pub use overwrites::{find_existing_group, group_overwrites};
pub use plan::{channel_name, resolve_nations, Requester, MIN_GROUP_NATIONS};

/// Everything needed to create one group channel.
#[derive(Debug, Clone)]
pub struct GroupPlan {
    pub nations: BTreeSet<Nation>,
    pub name: String,
    pub category: Option<ChannelId>,
    pub overwrites: Vec<PermissionOverwrite>,
    /// Role to ping once the channel exists.
    pub ping_role: Option<RoleId>,
}

impl GroupPlan {
    pub fn build(
        guild_id: GuildId,
        game: &Game,
        roster: &Roster,
        settings: &GameConfig,
        requester: Requester,
        nations_text: &str,
    ) -> Result<Self, CommandError> {
        let nations = resolve_nations(requester, nations_text)?;

        if settings.detect_duplicates {
            if let Some(existing) = find_existing_group(roster, game, &nations) {
                debug!("Group already served by #{}", existing.name);
                return Err(CommandError::AlreadyExists {
                    url: channel_url(guild_id, existing.id),
                });
            }
        }

        let category_name = settings.category_name();
        let category = roster.category_named(&category_name).map(|c| c.id);
        if category.is_none() {
            warn!("Category '{}' not found, creating channel at top level", category_name);
        }

        let spectator_role = settings
            .spectator_role
            .as_deref()
            .and_then(|name| lookup_role(roster, name));
        let ping_role = settings
            .ping_role
            .as_deref()
            .and_then(|name| lookup_role(roster, name));

        Ok(Self {
            name: channel_name(&nations),
            overwrites: group_overwrites(game, &nations, guild_id.everyone_role(), spectator_role),
            nations,
            category,
            ping_role,
        })
    }
}

fn lookup_role(roster: &Roster, name: &str) -> Option<RoleId> {
    let role = roster.role_named(name).map(|r| r.id);
    if role.is_none() {
        debug!("Role '{}' not found", name);
    }
    role
}

/// Web link to a guild channel.
pub fn channel_url(guild_id: GuildId, channel_id: ChannelId) -> String {
    format!("https://discord.com/channels/{}/{}", guild_id, channel_id)
}
