//! Who may run admin commands.

use serenity::model::id::{RoleId, UserId};

use crate::game::MemberInfo;

/// Admin role and owner allowed to reload the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    pub admin_role: RoleId,
    pub owner: UserId,
}

impl AccessPolicy {
    pub fn new(admin_role_id: u64, owner_id: u64) -> Self {
        Self {
            admin_role: RoleId::new(admin_role_id),
            owner: UserId::new(owner_id),
        }
    }

    pub fn is_owner(&self, user_id: UserId) -> bool {
        user_id == self.owner
    }

    /// Reload is allowed for holders of the admin role and for the owner.
    pub fn can_reload(&self, member: &MemberInfo) -> bool {
        member.has_role(self.admin_role) || self.is_owner(member.id)
    }
}
