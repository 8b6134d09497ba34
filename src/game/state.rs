//! Nation to role and player bindings for one game.

use std::collections::BTreeMap;

use serenity::model::id::{RoleId, UserId};
use tracing::{info, warn};

use crate::common::error::GameError;
use crate::game::nation::Nation;
use crate::game::roster::{MemberInfo, Roster};

/// One round of role and member bindings.
///
/// A `Game` only exists once every nation role has been resolved, so holding
/// one means it is initialized. Reloading builds a new `Game` and drops the
/// old one.
#[derive(Debug, Clone)]
pub struct Game {
    id: u32,
    nation_roles: BTreeMap<Nation, RoleId>,
    nation_users: BTreeMap<Nation, UserId>,
}

impl Game {
    /// Bind every nation to its role "<nation> <id>" and to the first member
    /// holding that role.
    pub fn initialize(id: u32, roster: &Roster) -> Result<Self, GameError> {
        let mut nation_roles = BTreeMap::new();
        let mut nation_users = BTreeMap::new();

        for nation in Nation::ALL {
            let role_name = nation.role_name(id);
            let role = roster
                .role_named(&role_name)
                .ok_or(GameError::MissingRole { role_name })?;
            nation_roles.insert(nation, role.id);

            if let Some(member) = roster.first_holder(role.id) {
                nation_users.insert(nation, member.id);
            }
        }

        let game = Self {
            id,
            nation_roles,
            nation_users,
        };
        game.log_bindings();
        Ok(game)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Always true for a constructed `Game`; kept for callers that report
    /// binding state.
    pub fn is_initialized(&self) -> bool {
        self.nation_roles.len() == Nation::ALL.len()
    }

    pub fn nation_role(&self, nation: Nation) -> Option<RoleId> {
        self.nation_roles.get(&nation).copied()
    }

    /// All nation roles in nation order.
    pub fn nation_roles(&self) -> impl Iterator<Item = (Nation, RoleId)> + '_ {
        self.nation_roles.iter().map(|(nation, role)| (*nation, *role))
    }

    /// Player recorded for a nation when the game was loaded.
    pub fn holder(&self, nation: Nation) -> Option<UserId> {
        self.nation_users.get(&nation).copied()
    }

    /// Nation the member was recorded for, provided they still hold its role.
    ///
    /// Returns `None` when the member was never recorded, or when the nation
    /// role has been taken away from them since the game was loaded.
    pub fn find_nation_for_member(&self, member: &MemberInfo) -> Option<(Nation, RoleId)> {
        let nation = self
            .nation_users
            .iter()
            .find(|(_, user)| **user == member.id)
            .map(|(nation, _)| *nation)?;
        let role = self.nation_role(nation)?;

        member.has_role(role).then_some((nation, role))
    }

    fn log_bindings(&self) {
        info!("Game {} loaded", self.id);
        for (nation, role) in self.nation_roles() {
            match self.holder(nation) {
                Some(user) => {
                    info!(nation = %nation, role = %role, user = %user, "Nation assigned")
                }
                None => warn!(nation = %nation, role = %role, "Nation has no player"),
            }
        }
    }
}
