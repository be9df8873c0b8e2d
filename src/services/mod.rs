// src/services/mod.rs

//! External collaborators: feed retrieval and command execution.

pub mod command;
pub mod feed;

pub use command::{CommandOutput, CommandRunner, ProcessRunner};
pub use feed::{FeedFetcher, ParsedFeed};
