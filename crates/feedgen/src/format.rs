//! Output format selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::feed::Feed;

/// Syndication format to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// RSS 2.0.
    #[default]
    Rss2,
    /// Atom 1.0.
    Atom1,
    /// JSON Feed 1.
    Json1,
}

impl Format {
    /// All formats, in display order.
    pub const ALL: [Self; 3] = [Self::Rss2, Self::Atom1, Self::Json1];

    /// Conventional file extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Rss2 => "rss",
            Self::Atom1 => "atom",
            Self::Json1 => "json",
        }
    }

    /// Name used in configuration and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rss2 => "rss2",
            Self::Atom1 => "atom1",
            Self::Json1 => "json1",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feed format {0:?} (expected rss2, atom1 or json1)")]
pub struct ParseFormatError(String);

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseFormatError(s.to_owned()))
    }
}

/// Render a feed in the given format.
///
/// # Errors
///
/// Returns an error if the renderer fails.
pub fn render(feed: &Feed, format: Format) -> Result<String, FeedError> {
    match format {
        Format::Rss2 => feed.rss2(),
        Format::Atom1 => feed.atom1(),
        Format::Json1 => feed.json1_string(),
    }
}
