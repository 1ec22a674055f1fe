//! HTML ingest: `scraper` parse trees converted into the mutable element
//! tree.
//!
//! Parsing recovers instead of failing: malformed markup produces whatever
//! tree the HTML parser repairs it into, the same way a page would.
//! Comments, doctypes and processing instructions are discarded.

use ego_tree::NodeRef;
use scraper::{Html, Node as HtmlNode};

use super::element::{Element, Node};

/// The parse of a full document's `<body>`: its attributes and children.
pub(crate) struct ParsedBody {
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) nodes: Vec<Node>,
}

/// Parse an HTML fragment into a list of parentless nodes, ready to be
/// adopted by an element.
pub(crate) fn fragment_nodes(markup: &str) -> Vec<Node> {
    let fragment = Html::parse_fragment(markup);
    convert_children(*fragment.root_element())
}

/// Parse a full HTML document and extract its body. The HTML parser
/// synthesizes `<html>` and `<body>` when the input lacks them, so this
/// always finds a body even for bare fragments.
pub(crate) fn body(html: &str) -> ParsedBody {
    let document = Html::parse_document(html);
    for child in document.root_element().children() {
        if let HtmlNode::Element(source) = child.value() {
            if source.name() == "body" {
                return ParsedBody {
                    attrs: source
                        .attrs()
                        .map(|(name, value)| (name.to_string(), value.to_string()))
                        .collect(),
                    nodes: convert_children(child),
                };
            }
        }
    }
    ParsedBody {
        attrs: Vec::new(),
        nodes: Vec::new(),
    }
}

fn convert_children(parent: NodeRef<'_, HtmlNode>) -> Vec<Node> {
    let mut out = Vec::new();
    for child in parent.children() {
        match child.value() {
            HtmlNode::Element(source) => {
                let element = Element::new_internal(source.name());
                for (name, value) in source.attrs() {
                    element.set_attr_raw(name, value);
                }
                for node in convert_children(child) {
                    element.adopt(node);
                }
                out.push(Node::Element(element));
            }
            HtmlNode::Text(text) => out.push(Node::Text(text.to_string())),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_element(nodes: &[Node]) -> Element {
        let elements: Vec<Element> = nodes
            .iter()
            .filter_map(|node| match node {
                Node::Element(el) => Some(el.clone()),
                Node::Text(_) => None,
            })
            .collect();
        assert_eq!(elements.len(), 1);
        elements[0].clone()
    }

    #[test]
    fn test_fragment_parses_element_with_attrs() {
        let nodes = fragment_nodes("<div data-modal-id=\"video\" class=\"m-modal\"></div>");
        let el = only_element(&nodes);
        assert_eq!(el.tag(), "div");
        assert_eq!(el.attr("data-modal-id"), Some("video".to_string()));
        assert!(el.has_class("m-modal"));
    }

    #[test]
    fn test_fragment_keeps_text_nodes() {
        let nodes = fragment_nodes("before<span>inside</span>after");
        assert_eq!(nodes.len(), 3);
        assert!(matches!(&nodes[0], Node::Text(text) if text == "before"));
        assert!(matches!(&nodes[2], Node::Text(text) if text == "after"));
    }

    #[test]
    fn test_fragment_drops_comments() {
        let nodes = fragment_nodes("<!-- hidden --><b>kept</b>");
        let el = only_element(&nodes);
        assert_eq!(el.tag(), "b");
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_fragment_recovers_malformed_markup() {
        // An unclosed tag is repaired, not rejected.
        let nodes = fragment_nodes("<div><span>hi</div>");
        let el = only_element(&nodes);
        assert_eq!(el.tag(), "div");
        assert_eq!(el.children()[0].tag(), "span");
    }

    #[test]
    fn test_body_extraction_from_full_document() {
        let parsed = body("<!doctype html><html><body class=\"page\"><p>hi</p></body></html>");
        assert_eq!(
            parsed.attrs,
            vec![("class".to_string(), "page".to_string())]
        );
        let el = only_element(&parsed.nodes);
        assert_eq!(el.tag(), "p");
    }

    #[test]
    fn test_body_synthesized_for_bare_fragment() {
        let parsed = body("<p>loose</p>");
        let el = only_element(&parsed.nodes);
        assert_eq!(el.tag(), "p");
    }
}
