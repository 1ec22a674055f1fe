//! Serialization of the element tree back to HTML.
//!
//! Output conventions: the class list renders first (as a single `class`
//! attribute), remaining attributes follow in insertion order, text is
//! escaped for element content and attribute values for quoted context.
//! Void elements render without a closing tag.

use super::element::{Element, Node};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Escape for element text content.
///
/// Only escapes `& < >`; quotes are safe in element text.
pub(crate) fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape for double-quoted attribute values.
///
/// Escapes `& < > "`.
pub(crate) fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize an element including its own tag.
pub(crate) fn element_html(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

/// Serialize an element's children only.
pub(crate) fn children_html(element: &Element) -> String {
    let mut out = String::new();
    for node in element.nodes() {
        write_node(&node, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(el) => write_element(el, out),
        Node::Text(text) => out.push_str(&escape_text(text)),
    }
}

fn write_element(element: &Element, out: &mut String) {
    let tag = element.tag();
    out.push('<');
    out.push_str(&tag);
    let classes = element.class_names();
    if !classes.is_empty() {
        out.push_str(" class=\"");
        out.push_str(&escape_attr(&classes.join(" ")));
        out.push('"');
    }
    for (name, value) in element.attr_pairs() {
        out.push(' ');
        out.push_str(&name);
        out.push_str("=\"");
        out.push_str(&escape_attr(&value));
        out.push('"');
    }
    out.push('>');
    if is_void(&tag) {
        return;
    }
    for node in element.nodes() {
        write_node(&node, out);
    }
    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_text("\"quoted\""), "\"quoted\"");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape_attr("a&b"), "a&amp;b");
    }

    #[test]
    fn test_element_html_renders_classes_then_attrs() {
        let el = Element::new("div").unwrap();
        el.add_class("m-modal").unwrap();
        el.set_attr("data-modal-id", "video").unwrap();
        el.append_text("hi");
        assert_eq!(
            element_html(&el),
            "<div class=\"m-modal\" data-modal-id=\"video\">hi</div>"
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let el = Element::new("img").unwrap();
        el.set_attr("src", "x.png").unwrap();
        assert_eq!(element_html(&el), "<img src=\"x.png\">");
    }

    #[test]
    fn test_text_is_escaped_on_the_way_out() {
        let el = Element::new("span").unwrap();
        el.append_text("1 < 2");
        assert_eq!(element_html(&el), "<span>1 &lt; 2</span>");
    }

    #[test]
    fn test_parse_then_render_round_trip() {
        let el = Element::new("div").unwrap();
        el.set_inner_html("<p class=\"lead\" data-x=\"1\">hello <b>world</b></p>");
        assert_eq!(
            el.inner_html(),
            "<p class=\"lead\" data-x=\"1\">hello <b>world</b></p>"
        );
    }
}
