//! Working out which nations a group channel is for.

use std::collections::BTreeSet;

use crate::common::error::CommandError;
use crate::game::nation::UnknownNation;
use crate::game::Nation;

/// Groups smaller than this are refused.
pub const MIN_GROUP_NATIONS: usize = 3;

/// Who asked for the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    /// The requester's own nation, if they play one.
    pub nation: Option<Nation>,
    /// The owner may create groups without playing a nation.
    pub is_owner: bool,
}

/// Resolve the nation list typed by the requester.
///
/// The requester's own nation is always part of the group. Every
/// whitespace-separated token must name a nation; the first one that does
/// not aborts the whole request.
pub fn resolve_nations(
    requester: Requester,
    nations_text: &str,
) -> Result<BTreeSet<Nation>, CommandError> {
    let mut nations = BTreeSet::new();

    match requester.nation {
        Some(nation) => {
            nations.insert(nation);
        }
        None if requester.is_owner => {}
        None => return Err(CommandError::NoNation),
    }

    for token in nations_text.split_whitespace() {
        let nation = token
            .parse::<Nation>()
            .map_err(|UnknownNation(token)| CommandError::UnknownNation { token })?;
        nations.insert(nation);
    }

    if nations.len() < MIN_GROUP_NATIONS {
        return Err(CommandError::TooFewNations {
            required: MIN_GROUP_NATIONS,
        });
    }

    Ok(nations)
}

/// Channel name for a group: nation names in order, lower-cased, hyphen-joined.
pub fn channel_name(nations: &BTreeSet<Nation>) -> String {
    nations
        .iter()
        .map(|n| n.name().to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(nation: Nation) -> Requester {
        Requester {
            nation: Some(nation),
            is_owner: false,
        }
    }

    #[test]
    fn test_requester_nation_is_included() {
        let nations = resolve_nations(player(Nation::Austria), "england france").unwrap();
        assert_eq!(
            nations.into_iter().collect::<Vec<_>>(),
            vec![Nation::Austria, Nation::England, Nation::France]
        );
    }

    #[test]
    fn test_channel_name_is_sorted() {
        let nations = resolve_nations(player(Nation::Turkey), "France austria").unwrap();
        assert_eq!(channel_name(&nations), "austria-france-turkey");
    }

    #[test]
    fn test_example_group() {
        let nations = resolve_nations(player(Nation::Austria), "england france").unwrap();
        assert_eq!(channel_name(&nations), "austria-england-france");
    }

    #[test]
    fn test_unknown_nation_aborts() {
        let err = resolve_nations(player(Nation::Austria), "england Prussia france").unwrap_err();
        assert_eq!(
            err,
            CommandError::UnknownNation {
                token: "Prussia".to_string()
            }
        );
    }

    #[test]
    fn test_duplicates_do_not_count() {
        let err = resolve_nations(player(Nation::Austria), "england ENGLAND").unwrap_err();
        assert_eq!(err, CommandError::TooFewNations { required: 3 });

        let err = resolve_nations(player(Nation::Austria), "austria england").unwrap_err();
        assert_eq!(err, CommandError::TooFewNations { required: 3 });
    }

    #[test]
    fn test_player_without_nation_is_refused() {
        let requester = Requester {
            nation: None,
            is_owner: false,
        };
        let err = resolve_nations(requester, "england france italy").unwrap_err();
        assert_eq!(err, CommandError::NoNation);
    }

    #[test]
    fn test_owner_without_nation() {
        let owner = Requester {
            nation: None,
            is_owner: true,
        };
        let nations = resolve_nations(owner, "england france italy").unwrap();
        assert_eq!(channel_name(&nations), "england-france-italy");

        let err = resolve_nations(owner, "england france").unwrap_err();
        assert_eq!(err, CommandError::TooFewNations { required: 3 });
    }

    #[test]
    fn test_extra_whitespace_is_ignored() {
        let nations = resolve_nations(player(Nation::Italy), "  germany   russia ").unwrap();
        assert_eq!(channel_name(&nations), "germany-italy-russia");
    }

    #[test]
    fn test_trailing_junk_aborts() {
        let err = resolve_nations(player(Nation::Austria), "england france prussia?").unwrap_err();
        assert_eq!(
            err,
            CommandError::UnknownNation {
                token: "prussia?".to_string()
            }
        );
    }
}
