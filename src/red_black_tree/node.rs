use crate::arena::Entry;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
///
/// Nodes live in an arena and refer to each other through entries, so a node carries a
/// back-reference to its parent in addition to its child links.
pub struct Node<T> {
    pub item: T,
    pub color: Color,
    pub parent: Option<Entry>,
    pub left: Option<Entry>,
    pub right: Option<Entry>,
}

impl<T> Node<T> {
    // New nodes are always red leaves; recoloring is the rebalancing pass's job.
    pub fn new(item: T, parent: Option<Entry>) -> Self {
        Node {
            item,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }
}
