//! Element tree model.
//!
//! A tree is a closed union of text leaves, CDATA leaves and branch nodes.
//! The leaf name type is a parameter: generic markup trees ([`Element`]) have
//! nameless leaves, user extension trees ([`Extension`]) name every node.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::error::XmlError;

/// Scalar text value carried by a text leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Text leaf.
///
/// The printer has no position for attributes on a bare text leaf; they are
/// kept for extension trees, where the normalizer moves them onto the
/// wrapping element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode<L> {
    /// Leaf name (`()` for generic trees).
    pub name: L,
    /// Text value.
    pub text: Scalar,
    /// Optional attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

/// Character data leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CDataNode<L> {
    /// Leaf name (`()` for generic trees).
    pub name: L,
    /// Character data, written verbatim.
    pub cdata: String,
    /// Optional attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

/// Named branch node.
///
/// A branch always has child elements, attributes, or both. Constructors and
/// deserialization reject a branch with neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawBranch<C>",
    bound(deserialize = "C: Deserialize<'de>")
)]
pub struct BranchNode<C> {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes: Option<Attributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elements: Option<Vec<C>>,
}

#[derive(Deserialize)]
struct RawBranch<C> {
    name: String,
    attributes: Option<Attributes>,
    elements: Option<Vec<C>>,
}

impl<C> TryFrom<RawBranch<C>> for BranchNode<C> {
    type Error = XmlError;

    fn try_from(raw: RawBranch<C>) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.attributes, raw.elements)
    }
}

impl<C> BranchNode<C> {
    /// Create a branch from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::EmptyBranch`] if both `attributes` and `elements`
    /// are `None`.
    pub fn new(
        name: impl Into<String>,
        attributes: Option<Attributes>,
        elements: Option<Vec<C>>,
    ) -> Result<Self, XmlError> {
        let name = name.into();
        if attributes.is_none() && elements.is_none() {
            return Err(XmlError::EmptyBranch { name });
        }
        Ok(Self {
            name,
            attributes,
            elements,
        })
    }

    /// Create a branch with child elements.
    #[must_use]
    pub fn with_elements(name: impl Into<String>, elements: Vec<C>) -> Self {
        Self {
            name: name.into(),
            attributes: None,
            elements: Some(elements),
        }
    }

    /// Create a branch with attributes only.
    #[must_use]
    pub fn with_attributes(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes: Some(attributes),
            elements: None,
        }
    }

    /// Create a branch with both attributes and child elements.
    #[must_use]
    pub fn with_attributes_and_elements(
        name: impl Into<String>,
        attributes: Attributes,
        elements: Vec<C>,
    ) -> Self {
        Self {
            name: name.into(),
            attributes: Some(attributes),
            elements: Some(elements),
        }
    }

    /// Element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes, if the branch carries any.
    #[must_use]
    pub fn attributes(&self) -> Option<&Attributes> {
        self.attributes.as_ref()
    }

    /// Child elements, if the branch carries any.
    #[must_use]
    pub fn elements(&self) -> Option<&[C]> {
        self.elements.as_deref()
    }

    /// Append a child element.
    pub fn push(&mut self, child: C) {
        self.elements.get_or_insert_with(Vec::new).push(child);
    }

    /// Append several child elements.
    pub fn extend(&mut self, children: impl IntoIterator<Item = C>) {
        self.elements.get_or_insert_with(Vec::new).extend(children);
    }

    /// Map child elements into another node type, keeping name and attributes.
    pub(crate) fn map_elements<D>(&self, f: impl FnMut(&C) -> D) -> BranchNode<D> {
        BranchNode {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            elements: self.elements.as_ref().map(|e| e.iter().map(f).collect()),
        }
    }
}

/// Tree node: text leaf, CDATA leaf or branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node<L> {
    /// Text leaf.
    Text(TextNode<L>),
    /// Character data leaf.
    #[serde(rename = "cdata")]
    CData(CDataNode<L>),
    /// Branch node.
    Element(BranchNode<Node<L>>),
}

/// Generic markup tree ready for printing.
pub type Element = Node<()>;

/// User-authored tree merged into rendered feeds.
pub type Extension = Node<String>;

impl<L> Node<L> {
    /// The branch, if this node is one.
    #[must_use]
    pub fn as_branch(&self) -> Option<&BranchNode<Node<L>>> {
        match self {
            Self::Element(branch) => Some(branch),
            Self::Text(_) | Self::CData(_) => None,
        }
    }
}

impl Node<()> {
    /// Nameless text leaf.
    #[must_use]
    pub fn text(text: impl Into<Scalar>) -> Self {
        Self::Text(TextNode {
            name: (),
            text: text.into(),
            attributes: None,
        })
    }

    /// Nameless CDATA leaf.
    #[must_use]
    pub fn cdata(cdata: impl Into<String>) -> Self {
        Self::CData(CDataNode {
            name: (),
            cdata: cdata.into(),
            attributes: None,
        })
    }

    /// Branch with child elements.
    #[must_use]
    pub fn branch(name: impl Into<String>, elements: Vec<Element>) -> Self {
        Self::Element(BranchNode::with_elements(name, elements))
    }

    /// Branch with attributes and child elements.
    #[must_use]
    pub fn branch_with_attributes(
        name: impl Into<String>,
        attributes: Attributes,
        elements: Vec<Element>,
    ) -> Self {
        Self::Element(BranchNode::with_attributes_and_elements(
            name, attributes, elements,
        ))
    }

    /// Attribute-only branch, printed as an empty element.
    #[must_use]
    pub fn empty(name: impl Into<String>, attributes: Attributes) -> Self {
        Self::Element(BranchNode::with_attributes(name, attributes))
    }

    /// `<name>text</name>`.
    #[must_use]
    pub fn text_element(name: impl Into<String>, text: impl Into<Scalar>) -> Self {
        Self::branch(name, vec![Self::text(text)])
    }

    /// `<name><![CDATA[cdata]]></name>`.
    #[must_use]
    pub fn cdata_element(name: impl Into<String>, cdata: impl Into<String>) -> Self {
        Self::branch(name, vec![Self::cdata(cdata)])
    }
}

impl Node<String> {
    /// Named text extension.
    #[must_use]
    pub fn text(name: impl Into<String>, text: impl Into<Scalar>) -> Self {
        Self::Text(TextNode {
            name: name.into(),
            text: text.into(),
            attributes: None,
        })
    }

    /// Named CDATA extension.
    #[must_use]
    pub fn cdata(name: impl Into<String>, cdata: impl Into<String>) -> Self {
        Self::CData(CDataNode {
            name: name.into(),
            cdata: cdata.into(),
            attributes: None,
        })
    }

    /// Extension element with children.
    #[must_use]
    pub fn element(name: impl Into<String>, elements: Vec<Extension>) -> Self {
        Self::Element(BranchNode::with_elements(name, elements))
    }

    /// Extension element with attributes only.
    #[must_use]
    pub fn empty(name: impl Into<String>, attributes: Attributes) -> Self {
        Self::Element(BranchNode::with_attributes(name, attributes))
    }

    /// Attach attributes to this extension node.
    #[must_use]
    pub fn with_attributes(mut self, attrs: Attributes) -> Self {
        match &mut self {
            Self::Text(leaf) => leaf.attributes = Some(attrs),
            Self::CData(leaf) => leaf.attributes = Some(attrs),
            Self::Element(branch) => branch.attributes = Some(attrs),
        }
        self
    }

    /// Extension name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text(leaf) => &leaf.name,
            Self::CData(leaf) => &leaf.name,
            Self::Element(branch) => branch.name(),
        }
    }
}
