//! Feed aggregate and accumulation API.

use feedgen_xml::Extension;

use crate::error::FeedError;
use crate::item::{Author, Item};
use crate::options::FeedOptions;
use crate::{atom1, json1, rss2};

/// Feed metadata plus everything appended to it.
///
/// A feed is built once from its options and only grows through the `add_*`
/// methods. Renderers borrow it immutably and can run any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    options: FeedOptions,
    items: Vec<Item>,
    categories: Vec<String>,
    contributors: Vec<Author>,
    extensions: Vec<Extension>,
}

impl Feed {
    /// Create an empty feed.
    #[must_use]
    pub fn new(options: FeedOptions) -> Self {
        Self {
            options,
            items: Vec::new(),
            categories: Vec::new(),
            contributors: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Append an item.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Append a feed category name.
    pub fn add_category(&mut self, category: impl Into<String>) {
        self.categories.push(category.into());
    }

    /// Append a contributor.
    pub fn add_contributor(&mut self, contributor: Author) {
        self.contributors.push(contributor);
    }

    /// Append a feed-level extension.
    pub fn add_extension(&mut self, extension: Extension) {
        self.extensions.push(extension);
    }

    /// Feed options.
    #[must_use]
    pub fn options(&self) -> &FeedOptions {
        &self.options
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Category names in insertion order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Contributors in insertion order.
    #[must_use]
    pub fn contributors(&self) -> &[Author] {
        &self.contributors
    }

    /// Feed-level extensions in insertion order.
    #[must_use]
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Render as RSS 2.0.
    pub fn rss2(&self) -> Result<String, FeedError> {
        rss2::rss2(self)
    }

    /// Render as Atom 1.0.
    pub fn atom1(&self) -> Result<String, FeedError> {
        atom1::atom1(self)
    }

    /// Render as a JSON Feed value.
    pub fn json1(&self) -> Result<serde_json::Value, FeedError> {
        json1::json1(self)
    }

    /// Render as JSON Feed text.
    pub fn json1_string(&self) -> Result<String, FeedError> {
        json1::json1_string(self)
    }
}
