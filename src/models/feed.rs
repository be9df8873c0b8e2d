// src/models/feed.rs

//! Parsed feed data structures.
//!
//! `FeedRoot` and `Item` are the crate's own owned view of one fetched feed,
//! built from the `rss` crate's channel model. Templates and rules only ever
//! see these records, never the wire format.

use serde::{Deserialize, Serialize};

/// Channel-level feed metadata. Immutable for the duration of one
/// feed-processing pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedRoot {
    /// Feed title
    pub title: String,

    /// URL of the website corresponding to the feed
    pub link: String,

    /// Phrase or sentence describing the feed
    pub description: String,

    /// Language the feed is written in (e.g. "en-us")
    pub language: String,

    /// Copyright notice for feed content
    pub copyright: String,

    /// Email address of the person responsible for editorial content
    pub managing_editor: String,

    /// Email address of the person responsible for technical issues
    pub webmaster: String,

    /// Publication date for the feed content (RFC 822 string, verbatim)
    pub pub_date: String,

    /// Last time the feed content changed
    pub last_build_date: String,

    /// First category the feed belongs to
    pub category: String,

    /// Program used to generate the feed
    pub generator: String,

    /// URL of the documentation for the feed format
    pub docs: String,

    /// Cache time-to-live in minutes (0 when absent)
    pub ttl: u32,
}

/// One feed entry. Immutable; lifetime scoped to one processing pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Item title
    pub title: String,

    /// Item synopsis
    pub description: String,

    /// URL of the item
    pub link: String,

    /// Email address of the item's author
    pub author: String,

    /// First category the item belongs to
    pub category: String,

    /// URL of a page for comments on the item
    pub comments: String,

    /// Globally unique identifier of the item
    pub guid: String,

    /// Publication date of the item (RFC 822 string, verbatim)
    pub pub_date: String,

    /// Name of the source channel the item came from
    pub source: String,

    /// URL of the attached media object (empty when no enclosure)
    pub enclosure_url: String,

    /// MIME type of the attached media object
    pub enclosure_type: String,

    /// Size of the attached media object in bytes
    pub enclosure_length: u64,
}

impl From<&rss::Channel> for FeedRoot {
    fn from(channel: &rss::Channel) -> Self {
        Self {
            title: channel.title().to_string(),
            link: channel.link().to_string(),
            description: channel.description().to_string(),
            language: channel.language().unwrap_or_default().to_string(),
            copyright: channel.copyright().unwrap_or_default().to_string(),
            managing_editor: channel.managing_editor().unwrap_or_default().to_string(),
            webmaster: channel.webmaster().unwrap_or_default().to_string(),
            pub_date: channel.pub_date().unwrap_or_default().to_string(),
            last_build_date: channel.last_build_date().unwrap_or_default().to_string(),
            category: channel
                .categories()
                .first()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            generator: channel.generator().unwrap_or_default().to_string(),
            docs: channel.docs().unwrap_or_default().to_string(),
            ttl: channel.ttl().and_then(|t| t.parse().ok()).unwrap_or(0),
        }
    }
}

impl From<&rss::Item> for Item {
    fn from(item: &rss::Item) -> Self {
        // The <source> element's text is its display name; fall back to the
        // url attribute when the element is self-closing.
        let source = item
            .source()
            .map(|s| match s.title() {
                Some(title) if !title.is_empty() => title.to_string(),
                _ => s.url().to_string(),
            })
            .unwrap_or_default();

        Self {
            title: item.title().unwrap_or_default().to_string(),
            description: item.description().unwrap_or_default().to_string(),
            link: item.link().unwrap_or_default().to_string(),
            author: item.author().unwrap_or_default().to_string(),
            category: item
                .categories()
                .first()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            comments: item.comments().unwrap_or_default().to_string(),
            guid: item
                .guid()
                .map(|g| g.value().to_string())
                .unwrap_or_default(),
            pub_date: item.pub_date().unwrap_or_default().to_string(),
            source,
            enclosure_url: item
                .enclosure()
                .map(|e| e.url().to_string())
                .unwrap_or_default(),
            enclosure_type: item
                .enclosure()
                .map(|e| e.mime_type().to_string())
                .unwrap_or_default(),
            enclosure_length: item
                .enclosure()
                .and_then(|e| e.length().parse().ok())
                .unwrap_or(0),
        }
    }
}
