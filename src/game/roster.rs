//! Plain snapshot of the guild state the bot makes decisions on.
//!
//! Roles, members and channels are fetched over HTTP and copied into these
//! types so game and provisioning logic never touches serenity's models
//! directly.

use serenity::model::channel::{
    ChannelType, GuildChannel, PermissionOverwrite, PermissionOverwriteType,
};
use serenity::model::guild::{Member, Role};
use serenity::model::id::{ChannelId, RoleId, UserId};
use serenity::model::permissions::Permissions;

/// A guild role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    pub id: RoleId,
    pub name: String,
}

impl From<&Role> for RoleInfo {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
        }
    }
}

/// A guild member and the roles they currently hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub id: UserId,
    pub roles: Vec<RoleId>,
}

impl MemberInfo {
    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.roles.contains(&role_id)
    }
}

impl From<&Member> for MemberInfo {
    fn from(member: &Member) -> Self {
        Self {
            id: member.user.id,
            roles: member.roles.clone(),
        }
    }
}

/// Role-level permission overwrite on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleOverwrite {
    pub role_id: RoleId,
    pub allow: Permissions,
    pub deny: Permissions,
}

/// A guild channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: ChannelId,
    pub name: String,
    pub kind: ChannelType,
    pub overwrites: Vec<RoleOverwrite>,
}

impl ChannelInfo {
    /// Overwrite for the given role, if the channel has one.
    pub fn overwrite_for(&self, role_id: RoleId) -> Option<&RoleOverwrite> {
        self.overwrites.iter().find(|o| o.role_id == role_id)
    }
}

impl From<&GuildChannel> for ChannelInfo {
    fn from(channel: &GuildChannel) -> Self {
        Self {
            id: channel.id,
            name: channel.name.clone(),
            kind: channel.kind,
            overwrites: channel
                .permission_overwrites
                .iter()
                .filter_map(role_overwrite)
                .collect(),
        }
    }
}

/// Role overwrite view of a serenity overwrite; member overwrites are skipped.
pub(crate) fn role_overwrite(overwrite: &PermissionOverwrite) -> Option<RoleOverwrite> {
    match overwrite.kind {
        PermissionOverwriteType::Role(role_id) => Some(RoleOverwrite {
            role_id,
            allow: overwrite.allow,
            deny: overwrite.deny,
        }),
        _ => None,
    }
}

/// Everything the bot knows about the guild at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub roles: Vec<RoleInfo>,
    /// Members in the order the guild listed them.
    pub members: Vec<MemberInfo>,
    pub channels: Vec<ChannelInfo>,
}

impl Roster {
    /// Find a role by case-insensitive name.
    pub fn role_named(&self, name: &str) -> Option<&RoleInfo> {
        self.roles.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// First member holding the given role.
    pub fn first_holder(&self, role_id: RoleId) -> Option<&MemberInfo> {
        self.members.iter().find(|m| m.has_role(role_id))
    }

    /// Find a category channel by case-insensitive name.
    pub fn category_named(&self, name: &str) -> Option<&ChannelInfo> {
        self.channels
            .iter()
            .find(|c| c.kind == ChannelType::Category && c.name.eq_ignore_ascii_case(name))
    }

    pub fn text_channels(&self) -> impl Iterator<Item = &ChannelInfo> {
        self.channels.iter().filter(|c| c.kind == ChannelType::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_roster() -> Roster {
        Roster {
            roles: vec![
                RoleInfo {
                    id: RoleId::new(10),
                    name: "Austria 1".to_string(),
                },
                RoleInfo {
                    id: RoleId::new(11),
                    name: "Spectator".to_string(),
                },
            ],
            members: vec![
                MemberInfo {
                    id: UserId::new(100),
                    roles: vec![RoleId::new(11)],
                },
                MemberInfo {
                    id: UserId::new(101),
                    roles: vec![RoleId::new(10)],
                },
                MemberInfo {
                    id: UserId::new(102),
                    roles: vec![RoleId::new(10)],
                },
            ],
            channels: vec![
                ChannelInfo {
                    id: ChannelId::new(500),
                    name: "Diplomacy Gaming 1".to_string(),
                    kind: ChannelType::Category,
                    overwrites: Vec::new(),
                },
                ChannelInfo {
                    id: ChannelId::new(501),
                    name: "diplomacy gaming 1".to_string(),
                    kind: ChannelType::Text,
                    overwrites: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn test_role_named_ignores_case() {
        let roster = make_roster();
        assert_eq!(roster.role_named("austria 1").map(|r| r.id), Some(RoleId::new(10)));
        assert!(roster.role_named("austria 2").is_none());
    }

    #[test]
    fn test_first_holder_follows_member_order() {
        let roster = make_roster();
        let holder = roster.first_holder(RoleId::new(10)).unwrap();
        assert_eq!(holder.id, UserId::new(101));
        assert!(roster.first_holder(RoleId::new(99)).is_none());
    }

    #[test]
    fn test_role_overwrite_skips_members() {
        let role = PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL,
            deny: Permissions::SEND_MESSAGES,
            kind: PermissionOverwriteType::Role(RoleId::new(10)),
        };
        let user = PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(UserId::new(100)),
        };

        assert_eq!(
            role_overwrite(&role),
            Some(RoleOverwrite {
                role_id: RoleId::new(10),
                allow: Permissions::VIEW_CHANNEL,
                deny: Permissions::SEND_MESSAGES,
            })
        );
        assert_eq!(role_overwrite(&user), None);
    }

    #[test]
    fn test_category_named_skips_text_channels() {
        let roster = make_roster();
        let category = roster.category_named("DIPLOMACY GAMING 1").unwrap();
        assert_eq!(category.id, ChannelId::new(500));
        assert_eq!(roster.text_channels().count(), 1);
    }
}
