//! Chat commands: classification and access control.

pub mod access;
pub mod router;

pub use access::AccessPolicy;
pub use router::{help_text, Command, CommandRouter};
