//! Predicate-based queries over a parsed HTML tree.
//!
//! Listing markup cannot be matched with CSS selectors alone: class
//! attributes must compare as exact strings (a multi-class value is not a
//! match) and the comment link is only reachable by walking sibling
//! pointers backwards. These helpers work directly on `ego_tree` node
//! handles, so absence is always structural (`None` / empty) and never an
//! error.

use ego_tree::NodeRef;
use scraper::node::{Element, Node};

/// Handle to one node of a parsed document.
pub type NodeHandle<'a> = NodeRef<'a, Node>;

/// Collect every node satisfying `predicate`, starting at `root`.
///
/// Visits `root`, then its subtree in pre-order, then continues through
/// `root`'s following siblings and their subtrees. Matches are returned in
/// document order. A `None` root yields no matches.
pub fn find_all<'a, P>(root: Option<NodeHandle<'a>>, predicate: P) -> Vec<NodeHandle<'a>>
where
    P: Fn(NodeHandle<'a>) -> bool,
{
    let mut matches = Vec::new();
    let mut stack = Vec::new();
    if let Some(root) = root {
        stack.push(root);
    }
    // Explicit work stack; sibling is pushed first so the subtree of the
    // current node is fully visited before the walk moves sideways.
    while let Some(node) = stack.pop() {
        if predicate(node) {
            matches.push(node);
        }
        if let Some(sibling) = node.next_sibling() {
            stack.push(sibling);
        }
        if let Some(child) = node.first_child() {
            stack.push(child);
        }
    }
    matches
}

/// Predicate matching element nodes whose attribute `key` equals `value`
/// exactly, case-sensitively.
pub fn by_attribute<'p>(key: &'p str, value: &'p str) -> impl Fn(NodeHandle<'_>) -> bool + 'p {
    move |node| {
        node.value()
            .as_element()
            .and_then(|element| first_attribute(element, key))
            == Some(value)
    }
}

/// Predicate matching elements with the exact class attribute `class`.
pub fn by_class(class: &str) -> impl Fn(NodeHandle<'_>) -> bool + '_ {
    by_attribute("class", class)
}

/// The first attribute named `key`, if any. Attribute lists are small, so
/// a linear scan is fine.
pub fn first_attribute<'a>(element: &'a Element, key: &str) -> Option<&'a str> {
    element
        .attrs()
        .find_map(|(name, value)| (name == key).then_some(value))
}

/// Walk strictly backwards through `node`'s siblings to the nearest
/// element, or `None` if the sibling chain runs out first.
pub fn previous_element_sibling(node: NodeHandle<'_>) -> Option<NodeHandle<'_>> {
    let mut current = node;
    while let Some(previous) = current.prev_sibling() {
        if previous.value().is_element() {
            return Some(previous);
        }
        current = previous;
    }
    None
}
