//! Discord message event handling.
//!
//! The [`SessionHandler`] owns the bot session: the community guild, the
//! currently loaded [`Game`] and the command router. It is driven by a single
//! event loop, so a reload swaps the game between two commands, never during
//! one.

use serenity::builder::CreateChannel;
use serenity::gateway::ActivityData;
use serenity::http::{Http, HttpError};
use serenity::model::channel::{ChannelType, Message};
use serenity::model::id::{GuildId, UserId};
use serenity::model::mention::Mentionable;
use serenity::prelude::*;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::commands::{help_text, AccessPolicy, Command, CommandRouter};
use crate::common::error::{CommandError, DiscordError, DiscordResult, GameError};
use crate::config::types::Config;
use crate::game::{ChannelInfo, Game, MemberInfo, Nation, RoleInfo, Roster};
use crate::provision::{channel_url, GroupPlan, Requester};

/// Members are listed in pages of this size.
const MEMBER_PAGE_SIZE: u64 = 1000;

const APOLOGY: &str = "Sorry, something went wrong. Please try again later.";

/// Why a command did not complete.
#[derive(Debug, Error)]
enum HandlerError {
    /// Told to the user as is.
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Discord(#[from] DiscordError),
}

impl From<serenity::Error> for HandlerError {
    fn from(error: serenity::Error) -> Self {
        Self::Discord(DiscordError::Serenity(error))
    }
}

/// Whether a message is for the bot at all.
///
/// Bots are never answered. Guild messages are dropped in DM-only mode, and
/// messages from guilds other than the community guild always are.
fn accepts_message(
    is_bot: bool,
    msg_guild: Option<GuildId>,
    home_guild: GuildId,
    dm_only: bool,
) -> bool {
    if is_bot {
        return false;
    }
    match msg_guild {
        None => true,
        Some(_) if dm_only => false,
        Some(guild_id) => guild_id == home_guild,
    }
}

/// Bot session: guild, game and command handling.
pub struct SessionHandler {
    config: Config,
    guild_id: GuildId,
    access: AccessPolicy,
    router: CommandRouter,
    game: Option<Game>,
    connected: bool,
}

impl SessionHandler {
    pub fn new(config: Config) -> Self {
        Self {
            guild_id: GuildId::new(config.discord.guild_id),
            access: AccessPolicy::new(config.discord.admin_role_id, config.discord.owner_id),
            router: CommandRouter::new(),
            game: None,
            connected: false,
            config,
        }
    }

    /// Set the presence and load the game from the guild's current roles.
    pub async fn handle_ready(&mut self, ctx: &Context) {
        ctx.set_activity(Some(ActivityData::playing(self.config.discord.activity.as_str())));
        self.connected = true;

        let game_id = self.config.game.id;
        let roster = match self.fetch_roster(&ctx.http).await {
            Ok(roster) => roster,
            Err(e) => {
                error!("Failed to load game {}: {}", game_id, e);
                return;
            }
        };
        if let Err(e) = self.install_game(&roster) {
            error!("Failed to load game {}: {}", game_id, e);
            error!("Create the missing role, then send `reload` to the bot.");
        }
    }

    pub fn handle_disconnect(&mut self) {
        debug!("Discord session closed");
        self.connected = false;
    }

    /// Handle one chat message, replying with the outcome.
    pub async fn handle_message(&mut self, ctx: &Context, msg: &Message) {
        let dm_only = self.config.discord.dm_only;
        if !accepts_message(msg.author.bot, msg.guild_id, self.guild_id, dm_only) {
            return;
        }

        debug!(user = %msg.author.name, "Message: {}", msg.content);

        let reply = match self.dispatch(ctx, msg).await {
            Ok(()) => return,
            Err(HandlerError::Command(e)) => {
                info!(user = %msg.author.name, "Command refused: {}", e);
                e.to_string()
            }
            Err(HandlerError::Discord(e)) => {
                error!(user = %msg.author.name, "Command failed: {}", e);
                APOLOGY.to_string()
            }
        };

        if let Err(e) = msg.channel_id.say(&ctx.http, reply).await {
            error!("Failed to reply to {}: {}", msg.author.name, e);
        }
    }

    async fn dispatch(&mut self, ctx: &Context, msg: &Message) -> Result<(), HandlerError> {
        self.ensure_ready()?;

        let member = self.fetch_member(&ctx.http, msg.author.id).await?;
        let command = self.router.classify(&msg.content);
        info!(user = %msg.author.name, command = ?command, "Command received");

        match command {
            Command::CreateGroup { nations } => {
                self.create_group(ctx, msg, &member, &nations).await
            }
            Command::Reload => self.reload(ctx, msg, &member).await,
            Command::Help => {
                let response = help_text(self.access.can_reload(&member));
                msg.channel_id.say(&ctx.http, response).await?;
                Ok(())
            }
        }
    }

    async fn reload(
        &mut self,
        ctx: &Context,
        msg: &Message,
        member: &MemberInfo,
    ) -> Result<(), HandlerError> {
        self.authorize_reload(member)?;

        let roster = self.fetch_roster(&ctx.http).await?;
        let game = self.install_game(&roster).map_err(CommandError::from)?;
        let response = reload_summary(game);

        msg.channel_id.say(&ctx.http, response).await?;
        Ok(())
    }

    async fn create_group(
        &self,
        ctx: &Context,
        msg: &Message,
        member: &MemberInfo,
        nations_text: &str,
    ) -> Result<(), HandlerError> {
        let game = self.current_game()?;

        let nation = game.find_nation_for_member(member).map(|(nation, _)| nation);
        let requester = Requester {
            nation,
            is_owner: self.access.is_owner(member.id),
        };

        let roster = self.fetch_layout(&ctx.http).await?;
        let plan = GroupPlan::build(
            self.guild_id,
            game,
            &roster,
            &self.config.game,
            requester,
            nations_text,
        )?;

        let mut builder = CreateChannel::new(plan.name.as_str())
            .kind(ChannelType::Text)
            .permissions(plan.overwrites.clone());
        if let Some(category) = plan.category {
            builder = builder.category(category);
        }

        let channel = self.guild_id.create_channel(&ctx.http, builder).await?;
        info!(
            channel = %channel.name,
            id = %channel.id,
            nations = ?plan.nations,
            requester = %msg.author.name,
            "Created group channel"
        );

        if let Some(role) = plan.ping_role {
            if let Err(e) = channel.say(&ctx.http, role.mention().to_string()).await {
                warn!("Failed to ping players in {}: {}", channel.name, e);
            }
        }

        msg.channel_id
            .say(
                &ctx.http,
                format!("Created {}", channel_url(self.guild_id, channel.id)),
            )
            .await?;
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), CommandError> {
        if self.connected {
            Ok(())
        } else {
            Err(CommandError::NotReady)
        }
    }

    fn authorize_reload(&self, member: &MemberInfo) -> Result<(), CommandError> {
        if self.access.can_reload(member) {
            Ok(())
        } else {
            Err(CommandError::NotPermitted)
        }
    }

    fn current_game(&self) -> Result<&Game, CommandError> {
        self.game.as_ref().ok_or(CommandError::GameNotLoaded)
    }

    /// Bind a fresh game from `roster` and make it current.
    ///
    /// On failure the current game, if any, is left untouched.
    fn install_game(&mut self, roster: &Roster) -> Result<&Game, GameError> {
        let game = Game::initialize(self.config.game.id, roster)?;
        debug!(game = game.id(), initialized = game.is_initialized(), "Game installed");
        Ok(self.game.insert(game))
    }

    /// Look up the author as a member of the community guild.
    async fn fetch_member(&self, http: &Http, user_id: UserId) -> Result<MemberInfo, HandlerError> {
        match self.guild_id.member(http, user_id).await {
            Ok(member) => Ok(MemberInfo::from(&member)),
            Err(serenity::Error::Http(HttpError::UnsuccessfulRequest(response)))
                if response.status_code.as_u16() == 404 =>
            {
                Err(CommandError::NotMember {
                    invite_url: self.config.discord.invite_url.clone(),
                }
                .into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Snapshot the guild's roles and channels, without members.
    async fn fetch_layout(&self, http: &Http) -> DiscordResult<Roster> {
        let mut roles: Vec<RoleInfo> = self
            .guild_id
            .roles(http)
            .await?
            .values()
            .map(RoleInfo::from)
            .collect();
        roles.sort_by_key(|r| r.id);
        if roles.is_empty() {
            return Err(DiscordError::GuildUnavailable {
                guild_id: self.guild_id.get(),
            });
        }

        let mut channels: Vec<ChannelInfo> = self
            .guild_id
            .channels(http)
            .await?
            .values()
            .map(ChannelInfo::from)
            .collect();
        channels.sort_by_key(|c| c.id);

        Ok(Roster {
            roles,
            members: Vec::new(),
            channels,
        })
    }

    /// Snapshot the guild's roles, channels and full member list.
    async fn fetch_roster(&self, http: &Http) -> DiscordResult<Roster> {
        let mut roster = self.fetch_layout(http).await?;

        let mut after: Option<UserId> = None;
        loop {
            let page = self.guild_id.members(http, Some(MEMBER_PAGE_SIZE), after).await?;
            roster.members.extend(page.iter().map(MemberInfo::from));
            match page.last() {
                Some(last) if page.len() as u64 == MEMBER_PAGE_SIZE => after = Some(last.user.id),
                _ => break,
            }
        }

        debug!(
            roles = roster.roles.len(),
            members = roster.members.len(),
            channels = roster.channels.len(),
            "Fetched guild roster"
        );
        Ok(roster)
    }
}

fn reload_summary(game: &Game) -> String {
    let players = Nation::ALL
        .into_iter()
        .filter(|nation| game.holder(*nation).is_some())
        .count();
    format!(
        "Reloaded game {}: {} of {} nations have a player.",
        game.id(),
        players,
        Nation::ALL.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::tests::{make_roster, member};
    use serenity::model::id::RoleId;

    const HOME: GuildId = GuildId::new(77);
    const ADMIN_ROLE: u64 = 5;

    fn make_handler() -> SessionHandler {
        let mut config = Config::default();
        config.discord.guild_id = HOME.get();
        config.discord.admin_role_id = ADMIN_ROLE;
        SessionHandler::new(config)
    }

    #[test]
    fn test_bots_are_ignored() {
        assert!(!accepts_message(true, None, HOME, true));
        assert!(!accepts_message(true, Some(HOME), HOME, false));
    }

    #[test]
    fn test_direct_messages_are_accepted() {
        assert!(accepts_message(false, None, HOME, true));
        assert!(accepts_message(false, None, HOME, false));
    }

    #[test]
    fn test_guild_messages_dropped_in_dm_only_mode() {
        assert!(!accepts_message(false, Some(HOME), HOME, true));
        assert!(accepts_message(false, Some(HOME), HOME, false));
    }

    #[test]
    fn test_other_guilds_are_always_dropped() {
        let other = GuildId::new(78);
        assert!(!accepts_message(false, Some(other), HOME, false));
        assert!(!accepts_message(false, Some(other), HOME, true));
    }

    #[test]
    fn test_not_ready_until_connected() {
        let mut handler = make_handler();
        assert_eq!(handler.ensure_ready(), Err(CommandError::NotReady));

        handler.connected = true;
        assert_eq!(handler.ensure_ready(), Ok(()));

        handler.handle_disconnect();
        assert_eq!(handler.ensure_ready(), Err(CommandError::NotReady));
    }

    #[test]
    fn test_reload_requires_permission() {
        let handler = make_handler();
        assert_eq!(
            handler.authorize_reload(&member(42, &[])),
            Err(CommandError::NotPermitted)
        );
        assert_eq!(handler.authorize_reload(&member(42, &[ADMIN_ROLE])), Ok(()));
    }

    #[test]
    fn test_group_needs_loaded_game() {
        let mut handler = make_handler();
        assert_eq!(handler.current_game().unwrap_err(), CommandError::GameNotLoaded);

        handler.install_game(&make_roster()).unwrap();
        assert_eq!(handler.current_game().unwrap().id(), 1);
    }

    #[test]
    fn test_failed_reload_keeps_previous_game() {
        let mut handler = make_handler();
        handler.install_game(&make_roster()).unwrap();

        let mut broken = make_roster();
        broken.roles.retain(|r| r.name != "Italy 1");
        let err = handler.install_game(&broken).unwrap_err();
        assert_eq!(
            err,
            GameError::MissingRole {
                role_name: "italy 1".to_string()
            }
        );

        let game = handler.current_game().unwrap();
        assert_eq!(game.nation_role(Nation::Italy), Some(RoleId::new(104)));
        assert_eq!(game.holder(Nation::Italy), Some(UserId::new(1004)));
    }

    #[test]
    fn test_reload_replaces_game() {
        let mut handler = make_handler();
        handler.install_game(&make_roster()).unwrap();

        let mut roster = make_roster();
        roster.members.retain(|m| m.id != UserId::new(1004));
        handler.install_game(&roster).unwrap();

        assert_eq!(handler.current_game().unwrap().holder(Nation::Italy), None);
    }

    #[test]
    fn test_reload_summary_counts_players() {
        let mut roster = make_roster();
        roster.members.retain(|m| m.id != UserId::new(1000));
        let game = Game::initialize(1, &roster).unwrap();

        assert_eq!(
            reload_summary(&game),
            "Reloaded game 1: 6 of 7 nations have a player."
        );
    }
}
