//! Helpers over a component's *immediate* children.
//!
//! Nothing here recurses: an element nested inside another element is part
//! of that element's children and is never visited.

use crate::props::Props;
use crate::view::Node;

/// Maps `f` over the immediate children, producing exactly one node per
/// input in the same order (empty children included).
pub fn map_children(children: &[Node], f: impl FnMut(&Node) -> Node) -> Vec<Node> {
    children.iter().map(f).collect()
}

/// Copies each immediate child element with `overrides` merged over its
/// properties. Text, empty and fragment children pass through unchanged.
pub fn clone_children_with(children: &[Node], overrides: &Props) -> Vec<Node> {
    map_children(children, |child| match child {
        Node::Element(el) => Node::Element(el.clone_with(overrides)),
        other => other.clone(),
    })
}
