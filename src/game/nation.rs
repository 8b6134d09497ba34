//! The seven Diplomacy nations.

use std::fmt;
use std::str::FromStr;

/// A Diplomacy faction.
///
/// Ordering follows the board's alphabetical order, which is also the order
/// nation names appear in group channel names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Nation {
    Austria,
    England,
    France,
    Germany,
    Italy,
    Russia,
    Turkey,
}

impl Nation {
    pub const ALL: [Nation; 7] = [
        Nation::Austria,
        Nation::England,
        Nation::France,
        Nation::Germany,
        Nation::Italy,
        Nation::Russia,
        Nation::Turkey,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Nation::Austria => "Austria",
            Nation::England => "England",
            Nation::France => "France",
            Nation::Germany => "Germany",
            Nation::Italy => "Italy",
            Nation::Russia => "Russia",
            Nation::Turkey => "Turkey",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|nation| nation.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Name of this nation's role in the given game, lower-cased.
    pub fn role_name(self, game_id: u32) -> String {
        format!("{} {}", self.name(), game_id).to_lowercase()
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a token that names no nation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNation(pub String);

impl FromStr for Nation {
    type Err = UnknownNation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownNation(s.to_string()))
    }
}
