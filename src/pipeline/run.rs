// src/pipeline/run.rs

//! Whole-run orchestration.
//!
//! Feeds are processed one at a time, items within a feed one at a time;
//! every dispatcher step runs to completion before the next begins. A feed
//! that fails to fetch is skipped; an item that fails never aborts its feed.

use chrono::Utc;
use log::{info, warn};

use crate::error::Result;
use crate::models::{FeedConfig, FeedRoot, Item, Settings};
use crate::pipeline::dispatch::{DispatchOutcome, Dispatcher};
use crate::pipeline::{rules, template};
use crate::services::{CommandRunner, FeedFetcher};
use crate::storage::DedupLedger;

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Feeds configured
    pub feeds_total: usize,
    /// Feeds that could not be fetched or decoded
    pub feeds_failed: usize,
    /// Items seen across all fetched feeds
    pub items_seen: usize,
    /// Items that passed their feed's rules
    pub items_matched: usize,
    /// Commands that ran and were marked done
    pub executed: usize,
    /// Items already marked done in the ledger
    pub skipped: usize,
    /// Commands that failed to start, exited nonzero, or failed to mark
    pub failed: usize,
    /// Items dropped on a rule or template error
    pub errors: usize,
}

/// Process every configured feed once.
pub async fn run(
    settings: &Settings,
    fetcher: &FeedFetcher,
    ledger: &dyn DedupLedger,
    runner: &dyn CommandRunner,
) -> Result<RunStats> {
    let started = Utc::now();
    let mut stats = RunStats {
        feeds_total: settings.feeds.len(),
        ..RunStats::default()
    };

    for feed in &settings.feeds {
        info!("Processing feed from {}", feed.feed_source);
        let parsed = match fetcher.fetch(&feed.feed_source).await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Failed to get feed from {}: {}", feed.feed_source, e);
                stats.feeds_failed += 1;
                continue;
            }
        };
        process_feed(feed, &parsed.root, &parsed.items, ledger, runner, &mut stats).await;
    }

    info!(
        "Run finished in {}ms: {}/{} feeds, {} items, {} matched, {} executed, {} skipped, {} failed, {} errors",
        (Utc::now() - started).num_milliseconds(),
        stats.feeds_total - stats.feeds_failed,
        stats.feeds_total,
        stats.items_seen,
        stats.items_matched,
        stats.executed,
        stats.skipped,
        stats.failed,
        stats.errors,
    );

    Ok(stats)
}

/// Evaluate and dispatch one fetched feed against its configuration.
pub async fn process_feed(
    feed: &FeedConfig,
    root: &FeedRoot,
    items: &[Item],
    ledger: &dyn DedupLedger,
    runner: &dyn CommandRunner,
    stats: &mut RunStats,
) {
    // ${ARG.*} placeholders expand once per feed.
    let expanded_args =
        template::expand_variables(&feed.command.argument_templates, &feed.command.variables);
    let dispatcher = Dispatcher::new(ledger, runner);

    for item in items {
        stats.items_seen += 1;

        let eligible = match rules::evaluate(item, &feed.rules) {
            Ok(eligible) => eligible,
            Err(e) => {
                warn!(
                    "Rule evaluation failed for item \"{}\" in feed {}: {}",
                    item.title, feed.feed_source, e
                );
                stats.errors += 1;
                continue;
            }
        };
        if !eligible {
            continue;
        }
        stats.items_matched += 1;

        match dispatcher.dispatch(feed, &expanded_args, root, item).await {
            Ok(DispatchOutcome::Done) => stats.executed += 1,
            Ok(DispatchOutcome::Skipped) => stats.skipped += 1,
            Ok(DispatchOutcome::Failed) => stats.failed += 1,
            Err(e) => {
                warn!(
                    "Dispatch failed for item \"{}\" in feed {}: {}",
                    item.title, feed.feed_source, e
                );
                stats.errors += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::models::{CommandSpec, Rule};
    use crate::services::ProcessRunner;
    use crate::storage::SqliteLedger;

    fn release_feed() -> FeedConfig {
        FeedConfig {
            name: "releases".into(),
            feed_source: "https://example.com/feed.xml".into(),
            command: CommandSpec {
                executable: "echo".into(),
                argument_templates: vec!["${ITEM.title}".into()],
                variables: HashMap::new(),
            },
            rules: vec![Rule {
                rss_item_field: "title".into(),
                contains: vec!["Release".into()],
                ..Rule::default()
            }],
            bucket_name: "releases".into(),
            key: "${ITEM.title}".into(),
        }
    }

    fn release_items() -> Vec<Item> {
        vec![
            Item {
                title: "Release v1.2.3".into(),
                ..Item::default()
            },
            Item {
                title: "Weekly digest".into(),
                ..Item::default()
            },
        ]
    }

    #[tokio::test]
    async fn test_end_to_end_dispatch_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = SqliteLedger::open(dir.path().join("ledger.db")).unwrap();
        let runner = ProcessRunner;
        let feed = release_feed();
        let root = FeedRoot::default();
        let items = release_items();

        // First run: the matching item executes once and is marked done.
        let mut stats = RunStats::default();
        process_feed(&feed, &root, &items, &ledger, &runner, &mut stats).await;
        assert_eq!(stats.items_seen, 2);
        assert_eq!(stats.items_matched, 1);
        assert_eq!(stats.executed, 1);
        assert_eq!(stats.skipped, 0);
        assert!(ledger.exists("releases", "Release v1.2.3").unwrap());

        // Second run over the same feed: zero executions.
        let mut again = RunStats::default();
        process_feed(&feed, &root, &items, &ledger, &runner, &mut again).await;
        assert_eq!(again.items_matched, 1);
        assert_eq!(again.executed, 0);
        assert_eq!(again.skipped, 1);
    }

    #[tokio::test]
    async fn test_rule_error_drops_item_only() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = SqliteLedger::open(dir.path().join("ledger.db")).unwrap();
        let runner = ProcessRunner;
        let mut feed = release_feed();
        feed.rules[0].rss_item_field = "bogus".into();

        let mut stats = RunStats::default();
        process_feed(&feed, &FeedRoot::default(), &release_items(), &ledger, &runner, &mut stats)
            .await;

        assert_eq!(stats.items_seen, 2);
        assert_eq!(stats.errors, 2);
        assert_eq!(stats.items_matched, 0);
        assert_eq!(stats.executed, 0);
    }

    #[tokio::test]
    async fn test_failed_command_leaves_item_retryable() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = SqliteLedger::open(dir.path().join("ledger.db")).unwrap();
        let runner = ProcessRunner;
        let mut feed = release_feed();
        feed.command.executable = "false".into();
        feed.command.argument_templates.clear();

        let mut stats = RunStats::default();
        process_feed(&feed, &FeedRoot::default(), &release_items(), &ledger, &runner, &mut stats)
            .await;

        assert_eq!(stats.failed, 1);
        assert!(!ledger.exists("releases", "Release v1.2.3").unwrap());
    }
}
