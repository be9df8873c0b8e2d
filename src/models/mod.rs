// src/models/mod.rs

//! Data structures shared across the application.

pub mod config;
pub mod feed;

pub use config::{CommandSpec, FeedConfig, Operator, Requirement, Rule, Settings};
pub use feed::{FeedRoot, Item};
