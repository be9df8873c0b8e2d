// src/pipeline/dispatch.rs

//! Idempotent command dispatch.
//!
//! Per eligible item: RENDER the argument list and (bucket, key) pair, CHECK
//! the ledger, EXECUTE the command, and MARK the ledger on success. The mark
//! happens only after a zero exit status, so a failed item stays eligible
//! for retry on the next run. The check/execute/mark sequence is not atomic
//! across process instances; see the ledger documentation.

use log::{debug, info, warn};

use crate::error::Result;
use crate::models::{FeedConfig, FeedRoot, Item};
use crate::pipeline::template;
use crate::services::CommandRunner;
use crate::storage::DedupLedger;

/// Terminal state of one item's dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Command ran with exit status zero and the ledger was marked
    Done,
    /// The (bucket, key) pair was already marked done
    Skipped,
    /// The command could not be started, exited nonzero, or the mark failed
    Failed,
}

/// Executes commands for eligible items, at most once per (bucket, key).
pub struct Dispatcher<'a> {
    ledger: &'a dyn DedupLedger,
    runner: &'a dyn CommandRunner,
}

impl<'a> Dispatcher<'a> {
    pub fn new(ledger: &'a dyn DedupLedger, runner: &'a dyn CommandRunner) -> Self {
        Self { ledger, runner }
    }

    /// Dispatch one item.
    ///
    /// `expanded_args` are the feed's argument templates with `${ARG.*}`
    /// already expanded (once per feed); the remaining placeholders are
    /// rendered here against the feed root and the item. `Err` is returned
    /// only for render failures (an unknown field name in a template).
    pub async fn dispatch(
        &self,
        feed: &FeedConfig,
        expanded_args: &[String],
        root: &FeedRoot,
        item: &Item,
    ) -> Result<DispatchOutcome> {
        // RENDER
        let vars = &feed.command.variables;
        let args: Vec<String> = expanded_args
            .iter()
            .map(|arg| template::render(arg, vars, root, item))
            .collect::<Result<_>>()?;
        let bucket = template::render(&feed.bucket_name, vars, root, item)?;
        let key = template::render(&feed.key, vars, root, item)?;

        // CHECK; a read failure counts as not-yet-done
        let already_done = match self.ledger.exists(&bucket, &key) {
            Ok(done) => done,
            Err(e) => {
                warn!("Ledger read failed for ({}, {}): {}", bucket, key, e);
                false
            }
        };
        if already_done {
            debug!(
                "Bucket/key ({}, {}) exists for item \"{}\"",
                bucket, key, item.title
            );
            return Ok(DispatchOutcome::Skipped);
        }

        // EXECUTE
        info!("Item: {}", item.title);
        info!("Running {} {:?}", feed.command.executable, args);
        let output = match self.runner.run(&feed.command.executable, &args).await {
            Ok(output) => output,
            Err(e) => {
                warn!("Command failed for item \"{}\": {}", item.title, e);
                return Ok(DispatchOutcome::Failed);
            }
        };
        if !output.success {
            warn!(
                "Command exited with {:?} for item \"{}\": {}",
                output.exit_code,
                item.title,
                output.stderr.trim()
            );
            return Ok(DispatchOutcome::Failed);
        }

        // MARK; the command already ran, so a write failure only means the
        // item may execute again next run
        if let Err(e) = self.ledger.mark(&bucket, &key) {
            warn!("Ledger write failed for ({}, {}): {}", bucket, key, e);
            return Ok(DispatchOutcome::Failed);
        }

        info!("Result: {}", output.stdout.trim());
        Ok(DispatchOutcome::Done)
    }
}
