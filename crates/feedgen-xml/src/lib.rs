//! Element tree model and XML printing for feedgen.
//!
//! This crate provides:
//! - [`Node`]: a text / CDATA / branch tree, used both as the generic markup
//!   tree ([`Element`]) and as the user extension tree ([`Extension`])
//! - [`normalize`]: lowering of extensions into generic elements
//! - [`Document`]: printing of a tree with an XML declaration
//! - [`sanitize`]: `&` escaping for URL-bearing values
//!
//! # Example
//!
//! ```
//! use feedgen_xml::{Attributes, BranchNode, Document, Element, Extension, normalize};
//!
//! let mut root = BranchNode::with_attributes("rss", Attributes::new().with("version", "2.0"));
//! root.push(Element::text_element("title", "Example"));
//! root.push(normalize(&Extension::text("custom", "value")));
//!
//! let xml = Document::new(root).print().unwrap();
//! assert!(xml.contains("<custom>value</custom>"));
//! ```

mod attributes;
mod error;
mod escape;
mod node;
mod normalize;
mod printer;

pub use attributes::{AttrValue, Attributes};
pub use error::XmlError;
pub use escape::{sanitize, sanitize_opt};
pub use node::{BranchNode, CDataNode, Element, Extension, Node, Scalar, TextNode};
pub use normalize::{normalize, normalize_all};
pub use printer::{Declaration, Document};
