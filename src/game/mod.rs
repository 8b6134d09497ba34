//! Game state: nations, their roles, and who plays them.

pub mod nation;
pub mod roster;
pub mod state;

pub use nation::Nation;
pub use roster::{ChannelInfo, MemberInfo, RoleInfo, Roster};
pub use state::Game;
