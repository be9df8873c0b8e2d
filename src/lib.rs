// src/lib.rs

//! feedhook library
//!
//! Polls RSS feeds, filters items through per-feed rules, renders a templated
//! external command per matching item, executes it, and records a persistent
//! (bucket, key) marker so no item is ever dispatched twice.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
