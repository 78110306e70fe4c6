//! Syndication feed rendering.
//!
//! A [`Feed`] is built from [`FeedOptions`] and grown with items, categories,
//! contributors and extensions. It can then be rendered any number of times
//! as RSS 2.0, Atom 1.0 or JSON Feed.
//!
//! # Example
//!
//! ```
//! use feedgen::{Feed, FeedOptions, Format, Item, render};
//!
//! let mut feed = Feed::new(FeedOptions::new("https://example.com/", "Example"));
//! feed.add_item(Item::new("Hello", "https://example.com/hello"));
//!
//! let rss = render(&feed, Format::Rss2).unwrap();
//! assert!(rss.contains("<title><![CDATA[Hello]]></title>"));
//!
//! let json = feed.json1().unwrap();
//! assert_eq!(json["items"][0]["url"], "https://example.com/hello");
//! ```
//!
//! Each renderer is also available as a free function:
//!
//! ```
//! use feedgen::{Feed, FeedOptions, atom1, json1, json1_string, rss2};
//!
//! let feed = Feed::new(FeedOptions::new("https://example.com/", "Example"));
//! assert!(rss2(&feed).unwrap().contains("<title>Example</title>"));
//! assert!(atom1(&feed).unwrap().contains("<id>https://example.com/</id>"));
//! assert_eq!(json1(&feed).unwrap()["title"], "Example");
//! assert!(json1_string(&feed).unwrap().starts_with("{\n    \"version\""));
//! ```
//!
//! ## Extensions
//!
//! Custom markup is attached as [`Extension`] trees, which are rendered as
//! XML in RSS and Atom and as nested objects in JSON Feed.

mod atom1;
pub mod consts;
mod error;
mod feed;
mod format;
mod item;
mod json1;
mod media;
mod options;
mod rss2;
mod util;

pub use atom1::atom1;
pub use error::FeedError;
pub use feed::Feed;
pub use format::{Format, ParseFormatError, render};
pub use item::{Author, Category, Enclosure, Item, Media};
pub use json1::{json1, json1_string};
pub use options::{FeedLinks, FeedOptions};
pub use rss2::rss2;

pub use feedgen_xml::{AttrValue, Attributes, Extension, Scalar, sanitize};
