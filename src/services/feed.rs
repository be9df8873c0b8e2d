// src/services/feed.rs

//! Feed retrieval and decoding.
//!
//! Fetches a feed over HTTP and maps it into the crate's own
//! [`FeedRoot`]/[`Item`] records. Parsing is a pure function so tests can
//! exercise it without hitting the network.

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::models::{FeedRoot, Item};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("feedhook/", env!("CARGO_PKG_VERSION"));

/// One fetched and decoded feed.
#[derive(Debug, Clone)]
pub struct ParsedFeed {
    pub root: FeedRoot,
    pub items: Vec<Item>,
}

/// HTTP feed fetcher.
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch and decode the feed at `url`.
    pub async fn fetch(&self, url: &str) -> Result<ParsedFeed> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Self::parse(&bytes)
    }

    /// Decode raw feed bytes into a [`ParsedFeed`].
    pub fn parse(bytes: &[u8]) -> Result<ParsedFeed> {
        let channel = rss::Channel::read_from(bytes)?;
        let root = FeedRoot::from(&channel);
        let items = channel.items().iter().map(Item::from).collect();
        Ok(ParsedFeed { root, items })
    }
}
