// src/config.rs

//! Settings file loading.
//!
//! Reads the JSON settings file, records a SHA-256 content hash of it, and
//! validates the result before any feed is processed.

use std::fs;
use std::path::Path;

use log::info;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::models::Settings;

/// A validated settings object plus the content hash of the file it came
/// from. The hash identifies the configuration a run executed under.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// Hex-encoded SHA-256 of the raw settings file
    pub hash: String,
}

/// Load, hash, and validate a settings file.
pub fn load_settings(path: impl AsRef<Path>) -> Result<LoadedSettings> {
    let path = path.as_ref();
    let raw = fs::read(path)?;
    let hash = hex::encode(Sha256::digest(&raw));

    let settings: Settings = serde_json::from_slice(&raw)?;
    settings.validate()?;

    info!(
        "Loaded settings from {:?} ({} feeds, sha256 {})",
        path,
        settings.feeds.len(),
        &hash[..12]
    );

    Ok(LoadedSettings { settings, hash })
}
