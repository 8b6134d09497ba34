//! Channel permission overwrites for group channels.

use std::collections::BTreeSet;

use serenity::model::channel::{PermissionOverwrite, PermissionOverwriteType};
use serenity::model::id::RoleId;
use serenity::model::permissions::Permissions;

use crate::game::{ChannelInfo, Game, Nation, Roster};

/// Permissions granted to members of a group and withheld from everyone else.
pub const GROUP_PERMISSIONS: Permissions = Permissions::READ_MESSAGE_HISTORY
    .union(Permissions::SEND_MESSAGES)
    .union(Permissions::VIEW_CHANNEL);

/// Spectators may read along but not talk.
pub const SPECTATOR_PERMISSIONS: Permissions =
    Permissions::READ_MESSAGE_HISTORY.union(Permissions::VIEW_CHANNEL);

/// Overwrites for a group of `nations`.
///
/// Every nation role gets an explicit allow or deny so that a later change
/// of the category's permissions cannot leak the channel. `@everyone` is
/// denied, and the spectator role (if any) is allowed to read.
pub fn group_overwrites(
    game: &Game,
    nations: &BTreeSet<Nation>,
    everyone_role: RoleId,
    spectator_role: Option<RoleId>,
) -> Vec<PermissionOverwrite> {
    let mut overwrites = vec![PermissionOverwrite {
        allow: Permissions::empty(),
        deny: GROUP_PERMISSIONS,
        kind: PermissionOverwriteType::Role(everyone_role),
    }];

    for (nation, role) in game.nation_roles() {
        let (allow, deny) = if nations.contains(&nation) {
            (GROUP_PERMISSIONS, Permissions::empty())
        } else {
            (Permissions::empty(), GROUP_PERMISSIONS)
        };
        overwrites.push(PermissionOverwrite {
            allow,
            deny,
            kind: PermissionOverwriteType::Role(role),
        });
    }

    if let Some(role) = spectator_role {
        overwrites.push(PermissionOverwrite {
            allow: SPECTATOR_PERMISSIONS,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Role(role),
        });
    }

    overwrites
}

/// Text channel that already serves exactly this set of nations.
///
/// A channel matches when every nation role is allowed to view it if and only
/// if the nation is part of the group.
pub fn find_existing_group<'a>(
    roster: &'a Roster,
    game: &Game,
    nations: &BTreeSet<Nation>,
) -> Option<&'a ChannelInfo> {
    roster.text_channels().find(|channel| {
        game.nation_roles().all(|(nation, role)| {
            let allowed = channel
                .overwrite_for(role)
                .is_some_and(|o| o.allow.contains(Permissions::VIEW_CHANNEL));
            allowed == nations.contains(&nation)
        })
    })
}
