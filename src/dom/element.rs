//! Element nodes of the headless document tree.
//!
//! An [`Element`] is a cheap-to-clone handle (`Rc<RefCell>` inside) to one
//! node: tag name, attributes, class list, children and a weak link to the
//! parent. Handles compare by node identity, never by structure, and are
//! single-threaded (`!Send`).
//!
//! Tag names are ASCII-lowercased on [`Element::new`]. The `class`
//! attribute is backed by the class list: reading it joins the tokens,
//! writing it re-splits them.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::errors::{DomError, DomResult};
use super::events::{ClickEvent, ClickListener};
use super::{parse, render};

/// One entry in an element's child list.
#[derive(Clone, Debug)]
pub enum Node {
    Element(Element),
    Text(String),
}

pub(crate) struct ElementData {
    pub(crate) tag: String,
    /// Attribute (name, value) pairs in insertion order. The `class`
    /// attribute is not stored here; it lives in `classes`.
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) classes: Vec<String>,
    pub(crate) children: Vec<Node>,
    pub(crate) parent: Weak<RefCell<ElementData>>,
    pub(crate) click_listeners: Vec<Rc<ClickListener>>,
}

/// Handle to one element node.
#[derive(Clone)]
pub struct Element {
    pub(crate) inner: Rc<RefCell<ElementData>>,
}

/// Weak counterpart to [`Element`], for listeners that must not keep their
/// own subtree alive.
#[derive(Clone)]
pub struct WeakElement {
    inner: Weak<RefCell<ElementData>>,
}

impl WeakElement {
    /// Upgrade back to a strong handle if the node is still alive.
    pub fn upgrade(&self) -> Option<Element> {
        self.inner.upgrade().map(|inner| Element { inner })
    }
}

impl Element {
    /// Create a detached element. The tag name is ASCII-lowercased and must
    /// be non-empty and free of whitespace and markup metacharacters.
    pub fn new(tag: &str) -> DomResult<Self> {
        if !valid_name(tag) {
            return Err(DomError::InvalidTagName(tag.to_string()));
        }
        Ok(Self::new_internal(&tag.to_ascii_lowercase()))
    }

    /// Constructor for names that are already trusted (parser output,
    /// crate-internal tags).
    pub(crate) fn new_internal(tag: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementData {
                tag: tag.to_string(),
                attrs: Vec::new(),
                classes: Vec::new(),
                children: Vec::new(),
                parent: Weak::new(),
                click_listeners: Vec::new(),
            })),
        }
    }

    /// The element's tag name.
    pub fn tag(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    /// Downgrade to a weak handle.
    pub fn downgrade(&self) -> WeakElement {
        WeakElement {
            inner: Rc::downgrade(&self.inner),
        }
    }

    // --- Attributes ---------------------------------------------------

    /// Read an attribute value. `class` reads back the joined class list
    /// and is only visible while that list is non-empty.
    pub fn attr(&self, name: &str) -> Option<String> {
        if name == "class" {
            let classes = &self.inner.borrow().classes;
            if classes.is_empty() {
                return None;
            }
            return Some(classes.join(" "));
        }
        self.inner
            .borrow()
            .attrs
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.clone())
    }

    /// Set an attribute, replacing any previous value. Setting `class`
    /// replaces the whole class list.
    pub fn set_attr(&self, name: &str, value: &str) -> DomResult<()> {
        if !valid_name(name) {
            return Err(DomError::InvalidAttributeName(name.to_string()));
        }
        self.set_attr_raw(name, value);
        Ok(())
    }

    pub(crate) fn set_attr_raw(&self, name: &str, value: &str) {
        if name == "class" {
            self.inner.borrow_mut().classes =
                value.split_whitespace().map(str::to_string).collect();
            return;
        }
        let mut data = self.inner.borrow_mut();
        match data.attrs.iter_mut().find(|(attr_name, _)| attr_name == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => data.attrs.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove an attribute. Removing `class` clears the class list.
    /// Unknown names are a no-op.
    pub fn remove_attr(&self, name: &str) {
        if name == "class" {
            self.inner.borrow_mut().classes.clear();
            return;
        }
        self.inner
            .borrow_mut()
            .attrs
            .retain(|(attr_name, _)| attr_name != name);
    }

    pub fn has_attr(&self, name: &str) -> bool {
        if name == "class" {
            return !self.inner.borrow().classes.is_empty();
        }
        self.inner
            .borrow()
            .attrs
            .iter()
            .any(|(attr_name, _)| attr_name == name)
    }

    /// Non-`class` attribute pairs in insertion order, for serialization.
    pub(crate) fn attr_pairs(&self) -> Vec<(String, String)> {
        self.inner.borrow().attrs.clone()
    }

    // --- Classes ------------------------------------------------------

    /// Add a class token. Already-present tokens are left alone, which is
    /// what makes repeated adds idempotent.
    pub fn add_class(&self, token: &str) -> DomResult<()> {
        validate_class_token(token)?;
        let mut data = self.inner.borrow_mut();
        if !data.classes.iter().any(|existing| existing == token) {
            data.classes.push(token.to_string());
        }
        Ok(())
    }

    /// Remove a class token. Absent tokens are a no-op.
    pub fn remove_class(&self, token: &str) -> DomResult<()> {
        validate_class_token(token)?;
        self.inner
            .borrow_mut()
            .classes
            .retain(|existing| existing != token);
        Ok(())
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.inner
            .borrow()
            .classes
            .iter()
            .any(|existing| existing == token)
    }

    pub fn class_names(&self) -> Vec<String> {
        self.inner.borrow().classes.clone()
    }

    // --- Tree ---------------------------------------------------------

    /// Append `child`, detaching it from any previous parent first.
    /// Inserting an element into itself or its own subtree is rejected.
    pub fn append_child(&self, child: &Element) -> DomResult<()> {
        let mut cursor = Some(self.clone());
        while let Some(node) = cursor {
            if node == *child {
                return Err(DomError::HierarchyViolation);
            }
            cursor = node.parent();
        }
        child.detach();
        self.inner
            .borrow_mut()
            .children
            .push(Node::Element(child.clone()));
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        Ok(())
    }

    /// Append a text node.
    pub fn append_text(&self, text: &str) {
        self.inner
            .borrow_mut()
            .children
            .push(Node::Text(text.to_string()));
    }

    pub(crate) fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.inner.borrow_mut().children.retain(|node| match node {
                Node::Element(el) => el != self,
                Node::Text(_) => true,
            });
            self.inner.borrow_mut().parent = Weak::new();
        }
    }

    pub fn parent(&self) -> Option<Element> {
        self.inner
            .borrow()
            .parent
            .upgrade()
            .map(|inner| Element { inner })
    }

    /// Element children, in order. Text nodes are skipped; use [`nodes`]
    /// for the full child list.
    ///
    /// [`nodes`]: Element::nodes
    pub fn children(&self) -> Vec<Element> {
        self.inner
            .borrow()
            .children
            .iter()
            .filter_map(|node| match node {
                Node::Element(el) => Some(el.clone()),
                Node::Text(_) => None,
            })
            .collect()
    }

    /// All child nodes, elements and text, in order.
    pub fn nodes(&self) -> Vec<Node> {
        self.inner.borrow().children.clone()
    }

    /// Every element below this one, pre-order (document order). Does not
    /// include the element itself.
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }

    /// Ancestor chain, nearest first. Does not include the element itself.
    pub fn ancestors(&self) -> Vec<Element> {
        let mut out = Vec::new();
        let mut cursor = self.parent();
        while let Some(node) = cursor {
            out.push(node.clone());
            cursor = node.parent();
        }
        out
    }

    // --- Queries ------------------------------------------------------

    /// Descendants matching a predicate, document order.
    pub fn select<F>(&self, predicate: F) -> Vec<Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants()
            .into_iter()
            .filter(|el| predicate(el))
            .collect()
    }

    /// First descendant matching a predicate, document order.
    pub fn select_first<F>(&self, predicate: F) -> Option<Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants().into_iter().find(|el| predicate(el))
    }

    /// Descendants carrying an attribute, document order.
    pub fn select_with_attr(&self, name: &str) -> Vec<Element> {
        self.select(|el| el.has_attr(name))
    }

    /// First descendant carrying an attribute.
    pub fn select_first_with_attr(&self, name: &str) -> Option<Element> {
        self.select_first(|el| el.has_attr(name))
    }

    // --- Inner markup -------------------------------------------------

    /// Replace the element's children with the parse of an HTML fragment.
    /// Malformed markup is recovered, not rejected, matching what a page
    /// would do with assigned inner HTML.
    pub fn set_inner_html(&self, markup: &str) {
        let new_children = parse::fragment_nodes(markup);
        let old_children = std::mem::take(&mut self.inner.borrow_mut().children);
        for node in &old_children {
            if let Node::Element(el) = node {
                el.inner.borrow_mut().parent = Weak::new();
            }
        }
        for node in &new_children {
            if let Node::Element(el) = node {
                el.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
            }
        }
        self.inner.borrow_mut().children = new_children;
    }

    /// Serialize the element's children.
    pub fn inner_html(&self) -> String {
        render::children_html(self)
    }

    /// Serialize the element including its own tag.
    pub fn outer_html(&self) -> String {
        render::element_html(self)
    }

    // --- Listeners ----------------------------------------------------

    /// Attach a click listener to this element. It runs whenever a
    /// dispatched click targets this element or anything below it.
    pub fn on_click<F>(&self, listener: F)
    where
        F: Fn(&ClickEvent) -> DomResult<()> + 'static,
    {
        self.inner
            .borrow_mut()
            .click_listeners
            .push(Rc::new(listener));
    }

    pub(crate) fn click_listeners(&self) -> Vec<Rc<ClickListener>> {
        self.inner.borrow().click_listeners.clone()
    }

    pub(crate) fn adopt(&self, node: Node) {
        if let Node::Element(el) = &node {
            el.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        }
        self.inner.borrow_mut().children.push(node);
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("Element")
            .field("tag", &data.tag)
            .field("classes", &data.classes)
            .field("attrs", &data.attrs)
            .field("children", &data.children.len())
            .finish_non_exhaustive()
    }
}

fn collect_descendants(element: &Element, out: &mut Vec<Element>) {
    for child in element.children() {
        out.push(child.clone());
        collect_descendants(&child, out);
    }
}

fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            !c.is_whitespace()
                && !c.is_control()
                && !matches!(c, '<' | '>' | '"' | '\'' | '/' | '=')
        })
}

fn validate_class_token(token: &str) -> DomResult<()> {
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(DomError::InvalidClassToken(token.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lowercases_tag() {
        let el = Element::new("DIV").unwrap();
        assert_eq!(el.tag(), "div");
    }

    #[test]
    fn test_new_rejects_invalid_tags() {
        assert!(matches!(Element::new(""), Err(DomError::InvalidTagName(_))));
        assert!(matches!(
            Element::new("di v"),
            Err(DomError::InvalidTagName(_))
        ));
        assert!(matches!(
            Element::new("<div>"),
            Err(DomError::InvalidTagName(_))
        ));
    }

    #[test]
    fn test_attr_round_trip() {
        let el = Element::new("div").unwrap();
        assert_eq!(el.attr("data-x"), None);
        el.set_attr("data-x", "1").unwrap();
        assert_eq!(el.attr("data-x"), Some("1".to_string()));
        el.set_attr("data-x", "2").unwrap();
        assert_eq!(el.attr("data-x"), Some("2".to_string()));
        assert!(el.has_attr("data-x"));
        el.remove_attr("data-x");
        assert!(!el.has_attr("data-x"));
    }

    #[test]
    fn test_set_attr_rejects_invalid_names() {
        let el = Element::new("div").unwrap();
        assert!(matches!(
            el.set_attr("", "x"),
            Err(DomError::InvalidAttributeName(_))
        ));
        assert!(matches!(
            el.set_attr("a b", "x"),
            Err(DomError::InvalidAttributeName(_))
        ));
    }

    #[test]
    fn test_class_attr_is_backed_by_class_list() {
        let el = Element::new("div").unwrap();
        el.set_attr("class", "one  two").unwrap();
        assert!(el.has_class("one"));
        assert!(el.has_class("two"));
        assert_eq!(el.attr("class"), Some("one two".to_string()));

        el.add_class("three").unwrap();
        assert_eq!(el.attr("class"), Some("one two three".to_string()));

        el.remove_attr("class");
        assert!(!el.has_class("one"));
        assert_eq!(el.attr("class"), None);
    }

    #[test]
    fn test_add_class_is_idempotent() {
        let el = Element::new("div").unwrap();
        el.add_class("open").unwrap();
        el.add_class("open").unwrap();
        assert_eq!(el.class_names(), vec!["open".to_string()]);
    }

    #[test]
    fn test_class_token_validation() {
        let el = Element::new("div").unwrap();
        assert!(matches!(
            el.add_class(""),
            Err(DomError::InvalidClassToken(_))
        ));
        assert!(matches!(
            el.add_class("a b"),
            Err(DomError::InvalidClassToken(_))
        ));
        assert!(matches!(
            el.remove_class(""),
            Err(DomError::InvalidClassToken(_))
        ));
    }

    #[test]
    fn test_append_child_sets_parent() {
        let parent = Element::new("div").unwrap();
        let child = Element::new("span").unwrap();
        parent.append_child(&child).unwrap();
        assert_eq!(child.parent().unwrap(), parent);
        assert_eq!(parent.children(), vec![child]);
    }

    #[test]
    fn test_append_child_moves_between_parents() {
        let first = Element::new("div").unwrap();
        let second = Element::new("div").unwrap();
        let child = Element::new("span").unwrap();
        first.append_child(&child).unwrap();
        second.append_child(&child).unwrap();
        assert!(first.children().is_empty());
        assert_eq!(child.parent().unwrap(), second);
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let el = Element::new("div").unwrap();
        assert!(matches!(
            el.append_child(&el),
            Err(DomError::HierarchyViolation)
        ));

        let parent = Element::new("div").unwrap();
        let child = Element::new("div").unwrap();
        parent.append_child(&child).unwrap();
        assert!(matches!(
            child.append_child(&parent),
            Err(DomError::HierarchyViolation)
        ));
    }

    #[test]
    fn test_descendants_are_pre_order() {
        let root = Element::new("div").unwrap();
        let a = Element::new("section").unwrap();
        let a1 = Element::new("span").unwrap();
        let b = Element::new("footer").unwrap();
        root.append_child(&a).unwrap();
        a.append_child(&a1).unwrap();
        root.append_child(&b).unwrap();

        let tags: Vec<String> = root.descendants().iter().map(|el| el.tag()).collect();
        assert_eq!(tags, vec!["section", "span", "footer"]);
    }

    #[test]
    fn test_ancestors_are_nearest_first() {
        let root = Element::new("div").unwrap();
        let mid = Element::new("section").unwrap();
        let leaf = Element::new("span").unwrap();
        root.append_child(&mid).unwrap();
        mid.append_child(&leaf).unwrap();

        assert_eq!(leaf.ancestors(), vec![mid, root]);
    }

    #[test]
    fn test_select_with_attr() {
        let root = Element::new("div").unwrap();
        let hit = Element::new("span").unwrap();
        hit.set_attr("data-icon", "star").unwrap();
        let miss = Element::new("span").unwrap();
        root.append_child(&miss).unwrap();
        root.append_child(&hit).unwrap();

        assert_eq!(root.select_with_attr("data-icon"), vec![hit.clone()]);
        assert_eq!(root.select_first_with_attr("data-icon"), Some(hit));
        assert_eq!(root.select_first_with_attr("data-absent"), None);
    }

    #[test]
    fn test_set_inner_html_replaces_children() {
        let el = Element::new("div").unwrap();
        let old = Element::new("span").unwrap();
        el.append_child(&old).unwrap();

        el.set_inner_html("<b class=\"x\">hi</b> there");

        assert!(old.parent().is_none());
        let children = el.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].tag(), "b");
        assert!(children[0].has_class("x"));
        assert_eq!(children[0].parent().unwrap(), el);
        // The trailing text node is kept as well.
        assert_eq!(el.nodes().len(), 2);
    }

    #[test]
    fn test_identity_not_structure() {
        let a = Element::new("div").unwrap();
        let b = Element::new("div").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_weak_handle_upgrade() {
        let el = Element::new("div").unwrap();
        let weak = el.downgrade();
        assert_eq!(weak.upgrade().unwrap(), el);
        drop(el);
        assert!(weak.upgrade().is_none());
    }
}
