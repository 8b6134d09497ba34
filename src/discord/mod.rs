//! Discord bot integration.
//!
//! This module connects to Discord and turns direct messages into
//! group channel, reload and help commands.

pub mod client;
pub mod handler;

// Re-export main types for external use
pub use client::DiscordBotBuilder;
