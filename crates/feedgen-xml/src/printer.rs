//! XML printer for element trees.
//!
//! Writes an XML declaration followed by the root element, indented with four
//! spaces. Text is escaped on output; CDATA is written verbatim.

use quick_xml::Writer;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::escape::{escape_attr, escape_text};
use crate::error::XmlError;
use crate::node::{BranchNode, Element, Node};

/// Indentation width in spaces.
const INDENT: usize = 4;

/// XML declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// XML version.
    pub version: String,
    /// Document encoding.
    pub encoding: Option<String>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_owned(),
            encoding: Some("utf-8".to_owned()),
        }
    }
}

/// Printable XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Declaration written before the root.
    pub declaration: Declaration,
    /// Root element.
    pub root: BranchNode<Element>,
}

impl Document {
    /// Create a document with the default declaration.
    #[must_use]
    pub fn new(root: BranchNode<Element>) -> Self {
        Self {
            declaration: Declaration::default(),
            root,
        }
    }

    /// Print the document to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn print(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);

        let decl = BytesDecl::new(
            &self.declaration.version,
            self.declaration.encoding.as_deref(),
            None,
        );
        writer.write_event(Event::Decl(decl))?;
        write_branch(&mut writer, &self.root)?;

        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Element) -> Result<(), XmlError> {
    match node {
        Node::Text(leaf) => {
            let text = leaf.text.to_string();
            writer.write_event(Event::Text(BytesText::from_escaped(escape_text(&text))))?;
        }
        Node::CData(leaf) => write_cdata(writer, &leaf.cdata)?,
        Node::Element(branch) => write_branch(writer, branch)?,
    }
    Ok(())
}

fn write_branch(
    writer: &mut Writer<Vec<u8>>,
    branch: &BranchNode<Element>,
) -> Result<(), XmlError> {
    let mut start = BytesStart::new(branch.name());
    if let Some(attributes) = branch.attributes() {
        for (key, value) in attributes.iter() {
            let value = value.to_string();
            let escaped = escape_attr(&value);
            start.push_attribute(Attribute::from((key.as_bytes(), escaped.as_bytes())));
        }
    }

    match branch.elements() {
        Some(children) if !children.is_empty() => {
            writer.write_event(Event::Start(start))?;
            for child in children {
                write_node(writer, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(branch.name())))?;
        }
        _ => writer.write_event(Event::Empty(start))?,
    }
    Ok(())
}

/// Write character data, splitting on `]]>` so the section stays well-formed.
fn write_cdata(writer: &mut Writer<Vec<u8>>, cdata: &str) -> Result<(), XmlError> {
    let mut rest = cdata;
    while let Some(pos) = rest.find("]]>") {
        let (head, tail) = rest.split_at(pos + 2);
        writer.write_event(Event::CData(BytesCData::new(head)))?;
        rest = tail;
    }
    writer.write_event(Event::CData(BytesCData::new(rest)))?;
    Ok(())
}
