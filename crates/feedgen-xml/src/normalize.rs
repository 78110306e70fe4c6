//! Lowering of extension trees into generic element trees.

use crate::node::{BranchNode, CDataNode, Element, Extension, Node, TextNode};

/// Normalize an extension into a generic element.
///
/// Named leaves become a branch of the same name wrapping one nameless leaf;
/// leaf attributes move onto that branch. Branches keep their name and
/// attributes and have their children normalized recursively. Text is copied
/// as-is.
pub fn normalize(extension: &Extension) -> Element {
    match extension {
        Node::Text(leaf) => wrap(
            &leaf.name,
            leaf.attributes.clone(),
            Node::Text(TextNode {
                name: (),
                text: leaf.text.clone(),
                attributes: None,
            }),
        ),
        Node::CData(leaf) => wrap(
            &leaf.name,
            leaf.attributes.clone(),
            Node::CData(CDataNode {
                name: (),
                cdata: leaf.cdata.clone(),
                attributes: None,
            }),
        ),
        Node::Element(branch) => Node::Element(branch.map_elements(normalize)),
    }
}

/// Normalize a sequence of extensions, keeping their order.
pub fn normalize_all(extensions: &[Extension]) -> impl Iterator<Item = Element> + '_ {
    extensions.iter().map(normalize)
}

fn wrap(name: &str, attributes: Option<crate::Attributes>, child: Element) -> Element {
    let branch = match attributes {
        Some(attributes) => BranchNode::with_attributes_and_elements(name, attributes, vec![child]),
        None => BranchNode::with_elements(name, vec![child]),
    };
    Node::Element(branch)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Attributes;

    #[test]
    fn test_text_becomes_wrapped_leaf() {
        let ext = Extension::text("custom", "value");
        assert_eq!(normalize(&ext), Element::text_element("custom", "value"));
    }

    #[test]
    fn test_cdata_becomes_wrapped_leaf() {
        let ext = Extension::cdata("notes", "<p>a & b</p>");
        assert_eq!(normalize(&ext), Element::cdata_element("notes", "<p>a & b</p>"));
    }

    #[test]
    fn test_text_attributes_move_to_branch() {
        let ext = Extension::text("rating", 5_i64)
            .with_attributes(Attributes::new().with("scheme", "urn:simple"));
        let expected = Element::branch_with_attributes(
            "rating",
            Attributes::new().with("scheme", "urn:simple"),
            vec![Element::text(5_i64)],
        );
        assert_eq!(normalize(&ext), expected);
    }

    #[test]
    fn test_element_recurses() {
        let ext = Extension::element(
            "parent",
            vec![Extension::element("middle", vec![Extension::text("leaf", "v")])],
        );
        let expected = Element::branch(
            "parent",
            vec![Element::branch("middle", vec![Element::text_element("leaf", "v")])],
        );
        assert_eq!(normalize(&ext), expected);
    }

    #[test]
    fn test_attribute_only_element() {
        let attrs = Attributes::new().with("href", "https://example.com/?a=1&amp;b=2");
        let ext = Extension::empty("link", attrs.clone());
        assert_eq!(normalize(&ext), Element::empty("link", attrs));
    }

    #[test]
    fn test_text_not_reescaped() {
        let ext = Extension::text("q", "a &amp; b");
        assert_eq!(normalize(&ext), Element::text_element("q", "a &amp; b"));
    }

    #[test]
    fn test_deep_nesting() {
        let mut ext = Extension::text("leaf", "bottom");
        for depth in 0..500 {
            ext = Extension::element(format!("level{depth}"), vec![ext]);
        }
        let mut node = normalize(&ext);
        let mut depth = 0;
        while let Node::Element(branch) = node {
            node = branch.elements().unwrap()[0].clone();
            depth += 1;
        }
        assert_eq!(depth, 501);
        assert_eq!(node, Element::text("bottom"));
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let exts = vec![Extension::text("a", "1"), Extension::text("b", "2")];
        let names: Vec<String> = normalize_all(&exts)
            .filter_map(|e| e.as_branch().map(|b| b.name().to_owned()))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
