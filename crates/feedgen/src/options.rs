//! Feed-level options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::Author;

/// Feed metadata.
///
/// `id` and `title` are required; everything else is emitted only when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedOptions {
    /// Feed identifier (Atom `id`).
    pub id: String,
    /// Feed title.
    pub title: String,
    /// Last update time; renderers default to now.
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    /// Generator identifier.
    #[serde(default)]
    pub generator: Option<String>,
    /// Language code.
    #[serde(default)]
    pub language: Option<String>,
    /// Time to live in minutes.
    #[serde(default)]
    pub ttl: Option<u32>,
    /// Self URL shared by all formats.
    #[serde(default)]
    pub feed: Option<String>,
    /// Per-format self URLs.
    #[serde(default)]
    pub feed_links: FeedLinks,
    /// `WebSub` hub URL.
    #[serde(default)]
    pub hub: Option<String>,
    /// RSS `docs` URL.
    #[serde(default)]
    pub docs: Option<String>,
    /// Emit podcast (iTunes / Google Play) elements.
    #[serde(default)]
    pub podcast: bool,
    /// Podcast category.
    #[serde(default)]
    pub category: Option<String>,
    /// Feed author / podcast owner.
    #[serde(default)]
    pub author: Option<Author>,
    /// Site URL.
    #[serde(default)]
    pub link: Option<String>,
    /// Feed description.
    #[serde(default)]
    pub description: Option<String>,
    /// Feed image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Favicon URL.
    #[serde(default)]
    pub favicon: Option<String>,
    /// Copyright statement.
    #[serde(default)]
    pub copyright: Option<String>,
}

impl FeedOptions {
    /// Create options with the required fields set.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            updated: None,
            generator: None,
            language: None,
            ttl: None,
            feed: None,
            feed_links: FeedLinks::default(),
            hub: None,
            docs: None,
            podcast: false,
            category: None,
            author: None,
            link: None,
            description: None,
            image: None,
            favicon: None,
            copyright: None,
        }
    }
}

/// Self URLs per output format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedLinks {
    /// RSS 2.0 feed URL.
    pub rss: Option<String>,
    /// Atom 1.0 feed URL.
    pub atom: Option<String>,
    /// JSON Feed URL.
    pub json: Option<String>,
}
