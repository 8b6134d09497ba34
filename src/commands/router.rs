//! Classifies chat messages into bot commands.

use fancy_regex::Regex;
use tracing::warn;

/// A command recognised in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `group <nation> <nation>...` or `create group ...`.
    ///
    /// `nations` runs to the end of the message so that trailing junk reaches
    /// nation resolution instead of being dropped.
    CreateGroup { nations: String },
    /// `reload` or `restart`.
    Reload,
    /// Anything else.
    Help,
}

/// Regex-based command classifier.
///
/// Patterns are checked in priority order: group creation, then reload.
/// Everything that matches neither is a request for help.
#[derive(Debug, Clone)]
pub struct CommandRouter {
    create_group: Regex,
    reload: Regex,
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRouter {
    pub fn new() -> Self {
        Self {
            create_group: Regex::new(
                r"(?i)^!? *(create *)?group (?P<nations>([A-Za-z]+( +|$)){2,})",
            )
            .unwrap(),
            reload: Regex::new(r"(?i)^!? *(restart|reload)").unwrap(),
        }
    }

    pub fn classify(&self, content: &str) -> Command {
        match self.create_group.captures(content) {
            Ok(Some(caps)) => {
                let nations = caps
                    .name("nations")
                    .map(|m| content[m.start()..].trim().to_string())
                    .unwrap_or_default();
                return Command::CreateGroup { nations };
            }
            Ok(None) => {}
            Err(e) => warn!("Group command regex failed on '{}': {}", content, e),
        }

        if self.reload.is_match(content).unwrap_or(false) {
            return Command::Reload;
        }

        Command::Help
    }
}

/// Help text, with the reload command shown only to those allowed to use it.
pub fn help_text(can_reload: bool) -> String {
    let mut response = String::from(
        "`group <nation1> <nation2>` - Create a group chat with these nations\n\
         `help` - Show available commands",
    );
    if can_reload {
        response.push_str("\n`reload` - Reload the bot to internally update roles and players");
    }
    response
}
