// src/models/config.rs

//! Application configuration structures.
//!
//! These map one-to-one onto the JSON settings file. All of it is read-only
//! after load: rules and templates are created at settings load and never
//! mutated by the pipeline.

use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root settings object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Path to the dedup ledger database file
    pub db_path: String,

    /// Configured feeds
    #[serde(default)]
    pub feeds: Vec<FeedConfig>,
}

impl Settings {
    /// Validate settings for basic structural sanity.
    ///
    /// Runs before any feed is fetched, so a malformed settings file never
    /// gets as far as executing commands.
    pub fn validate(&self) -> Result<()> {
        if self.db_path.trim().is_empty() {
            return Err(AppError::config("dbPath is empty"));
        }
        for feed in &self.feeds {
            feed.validate()?;
        }
        Ok(())
    }
}

/// Configuration for one feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfig {
    /// Display name used in log output
    #[serde(default)]
    pub name: String,

    /// URL the feed is fetched from
    pub feed_source: String,

    /// Command to run for each matching item
    pub command: CommandSpec,

    /// Ordered rule list deciding item eligibility
    #[serde(default)]
    pub rules: Vec<Rule>,

    /// Template for the ledger bucket of each item
    pub bucket_name: String,

    /// Template for the ledger key of each item
    pub key: String,
}

impl FeedConfig {
    fn validate(&self) -> Result<()> {
        let label = if self.name.is_empty() {
            &self.feed_source
        } else {
            &self.name
        };
        if self.feed_source.trim().is_empty() {
            return Err(AppError::config(format!("feed '{label}': feedSource is empty")));
        }
        if self.command.executable.trim().is_empty() {
            return Err(AppError::config(format!(
                "feed '{label}': command.executable is empty"
            )));
        }
        if self.bucket_name.trim().is_empty() {
            return Err(AppError::config(format!("feed '{label}': bucketName is empty")));
        }
        if self.key.trim().is_empty() {
            return Err(AppError::config(format!("feed '{label}': key is empty")));
        }
        Ok(())
    }
}

/// External command invocation template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    /// Executable to invoke
    pub executable: String,

    /// Ordered argument templates, rendered per item
    #[serde(default)]
    pub argument_templates: Vec<String>,

    /// User variables available as `${ARG.name}`
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

/// How a rule chains onto the preceding rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Operator {
    /// AND into the current accumulator (also the default when omitted)
    #[default]
    And,
    /// Start a new accumulator slot
    Or,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

/// How the eight predicate families of one rule combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Requirement {
    /// Every family must pass (also the default when omitted)
    #[default]
    All,
    /// At least one family must pass
    Any,
}

impl Requirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Requirement::All => "ALL",
            Requirement::Any => "ANY",
        }
    }
}

// Operator and Requirement come from untyped JSON. Matching is
// case-insensitive, but anything outside the closed set is a configuration
// error at parse time rather than a silent default.

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.to_ascii_uppercase().as_str() {
            "AND" => Ok(Operator::And),
            "OR" => Ok(Operator::Or),
            other => Err(D::Error::unknown_variant(other, &["AND", "OR"])),
        }
    }
}

impl<'de> Deserialize<'de> for Requirement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Requirement::All),
            "ANY" => Ok(Requirement::Any),
            other => Err(D::Error::unknown_variant(other, &["ALL", "ANY"])),
        }
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for Requirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One per-field eligibility rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Chaining operator relative to the previous rule
    #[serde(default)]
    pub operator: Operator,

    /// Item field the rule inspects
    #[serde(default)]
    pub rss_item_field: String,

    /// Invert the final result of this rule
    #[serde(default)]
    pub negate: bool,

    /// ANY: one predicate family suffices; ALL: every family must pass
    #[serde(default)]
    pub requirement: Requirement,

    #[serde(default)]
    pub equals: Vec<String>,

    #[serde(default)]
    pub contains: Vec<String>,

    #[serde(default)]
    pub starts_with: Vec<String>,

    #[serde(default)]
    pub ends_with: Vec<String>,

    #[serde(default)]
    pub equals_ignore_case: Vec<String>,

    #[serde(default)]
    pub contains_ignore_case: Vec<String>,

    #[serde(default)]
    pub starts_with_ignore_case: Vec<String>,

    #[serde(default)]
    pub ends_with_ignore_case: Vec<String>,
}
