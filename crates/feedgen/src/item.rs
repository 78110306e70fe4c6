//! Feed entries and the value records they carry.

use chrono::{DateTime, Utc};
use feedgen_xml::Extension;
use serde::{Deserialize, Serialize};

/// One feed entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Entry title.
    pub title: Option<String>,
    /// Stable identifier, used when `guid` is absent.
    pub id: Option<String>,
    /// Entry URL.
    pub link: Option<String>,
    /// Legacy / modification date.
    pub date: Option<DateTime<Utc>>,
    /// Short description or summary.
    pub description: Option<String>,
    /// Full content (HTML).
    pub content: Option<String>,
    /// Entry categories.
    pub categories: Vec<Category>,
    /// Globally unique identifier.
    pub guid: Option<String>,
    /// Image media.
    pub image: Option<Media>,
    /// Audio media.
    pub audio: Option<Media>,
    /// Video media.
    pub video: Option<Media>,
    /// Generic enclosure.
    pub enclosure: Option<Media>,
    /// Entry authors.
    pub authors: Vec<Author>,
    /// Entry contributors.
    pub contributors: Vec<Author>,
    /// Publication date.
    pub published: Option<DateTime<Utc>>,
    /// Entry rights statement.
    pub copyright: Option<String>,
    /// Custom elements appended after the built-in fields.
    pub extensions: Vec<Extension>,
}

impl Item {
    /// Create an item with a title and link.
    #[must_use]
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            link: Some(link.into()),
            ..Self::default()
        }
    }
}

/// Media reference: a bare URL or a structured enclosure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Media {
    /// Bare URL; type and length are derived.
    Url(String),
    /// Structured enclosure; present fields override derived values.
    Enclosure(Enclosure),
}

impl Media {
    /// Media URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Enclosure(enclosure) => &enclosure.url,
        }
    }
}

impl From<&str> for Media {
    fn from(url: &str) -> Self {
        Self::Url(url.to_owned())
    }
}

impl From<String> for Media {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<Enclosure> for Media {
    fn from(enclosure: Enclosure) -> Self {
        Self::Enclosure(enclosure)
    }
}

/// External media resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    /// Resource URL.
    pub url: String,
    /// MIME type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

impl Enclosure {
    /// Create an enclosure for a URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Person record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Home page URL.
    pub link: Option<String>,
    /// Avatar URL.
    pub avatar: Option<String>,
}

impl Author {
    /// Create an author with a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the home page URL.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Category record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Human-readable name.
    pub name: Option<String>,
    /// RSS categorization domain.
    pub domain: Option<String>,
    /// Atom categorization scheme.
    pub scheme: Option<String>,
    /// Atom term.
    pub term: Option<String>,
}

impl Category {
    /// Create a category with a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
