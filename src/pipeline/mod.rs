// src/pipeline/mod.rs

//! Per-item processing pipeline: field resolution, template rendering, rule
//! evaluation, and idempotent command dispatch.

pub mod dispatch;
pub mod fields;
pub mod rules;
pub mod run;
pub mod template;

pub use dispatch::{DispatchOutcome, Dispatcher};
pub use run::{RunStats, process_feed, run};
