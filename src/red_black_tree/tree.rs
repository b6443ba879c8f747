use crate::arena::{Arena, Entry};
use crate::compare::Compare;
use crate::red_black_tree::node::{Color, Node};
use std::cmp::Ordering;
use std::fmt;
use std::mem;

/// An enum representing which child slot of a parent a position occupies.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

/// A struct representing a red black tree of arena-allocated nodes linked by entries.
pub struct Tree<T> {
    nodes: Arena<Node<T>>,
    root: Option<Entry>,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Tree {
            nodes: Arena::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<Entry> {
        self.root
    }

    pub fn item(&self, node: Entry) -> &T {
        &self.nodes[node].item
    }

    pub fn left(&self, node: Entry) -> Option<Entry> {
        self.nodes[node].left
    }

    pub fn right(&self, node: Entry) -> Option<Entry> {
        self.nodes[node].right
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    // Frees a node without unlinking it. The caller is dismantling the whole
    // tree, so the stale links left behind are never followed twice.
    pub fn release(&mut self, node: Entry) -> Node<T> {
        self.nodes.free(node)
    }

    pub fn find<C>(&self, item: &T, cmp: &C) -> Option<Entry>
    where
        C: Compare<T>,
    {
        let mut current = self.root;
        while let Some(node) = current {
            current = match cmp.compare(item, &self.nodes[node].item) {
                Ordering::Less => self.nodes[node].left,
                Ordering::Greater => self.nodes[node].right,
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub fn leftmost(&self, mut node: Entry) -> Entry {
        while let Some(left) = self.nodes[node].left {
            node = left;
        }
        node
    }

    pub fn rightmost(&self, mut node: Entry) -> Entry {
        while let Some(right) = self.nodes[node].right {
            node = right;
        }
        node
    }

    pub fn successor(&self, node: Entry) -> Option<Entry> {
        if let Some(right) = self.nodes[node].right {
            return Some(self.leftmost(right));
        }
        let mut current = node;
        while let Some((parent, side)) = self.position(current) {
            if side == Side::Left {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    pub fn predecessor(&self, node: Entry) -> Option<Entry> {
        if let Some(left) = self.nodes[node].left {
            return Some(self.rightmost(left));
        }
        let mut current = node;
        while let Some((parent, side)) = self.position(current) {
            if side == Side::Right {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    pub fn floor<C>(&self, item: &T, cmp: &C) -> Option<Entry>
    where
        C: Compare<T>,
    {
        let mut current = self.root;
        let mut result = None;
        while let Some(node) = current {
            match cmp.compare(item, &self.nodes[node].item) {
                Ordering::Less => current = self.nodes[node].left,
                Ordering::Greater => {
                    result = Some(node);
                    current = self.nodes[node].right;
                },
                Ordering::Equal => return Some(node),
            }
        }
        result
    }

    pub fn ceil<C>(&self, item: &T, cmp: &C) -> Option<Entry>
    where
        C: Compare<T>,
    {
        let mut current = self.root;
        let mut result = None;
        while let Some(node) = current {
            match cmp.compare(item, &self.nodes[node].item) {
                Ordering::Greater => current = self.nodes[node].right,
                Ordering::Less => {
                    result = Some(node);
                    current = self.nodes[node].left;
                },
                Ordering::Equal => return Some(node),
            }
        }
        result
    }

    pub fn insert<C>(&mut self, item: T, cmp: &C) -> bool
    where
        C: Compare<T>,
    {
        let mut position = None;
        let mut current = self.root;
        while let Some(node) = current {
            match cmp.compare(&item, &self.nodes[node].item) {
                Ordering::Less => {
                    position = Some((node, Side::Left));
                    current = self.nodes[node].left;
                },
                Ordering::Greater => {
                    position = Some((node, Side::Right));
                    current = self.nodes[node].right;
                },
                Ordering::Equal => return false,
            }
        }

        let parent = position.map(|(parent, _)| parent);
        let node = self.nodes.allocate(Node::new(item, parent));
        match position {
            None => self.root = Some(node),
            Some((parent, Side::Left)) => self.nodes[parent].left = Some(node),
            Some((parent, Side::Right)) => self.nodes[parent].right = Some(node),
        }
        self.insert_fixup(node);
        true
    }

    pub fn remove<C>(&mut self, item: &T, cmp: &C) -> Option<T>
    where
        C: Compare<T>,
    {
        self.find(item, cmp).map(|node| self.unlink(node))
    }

    pub fn dump(&self) -> String
    where
        T: fmt::Debug,
    {
        let mut out = String::new();
        let mut current = self.root.map(|root| self.rightmost(root));
        while let Some(node) = current {
            out.push_str(&"    ".repeat(self.depth(node)));
            out.push_str(&format!(
                "|{:?},{:?}|\n",
                self.nodes[node].item, self.nodes[node].color
            ));
            current = self.predecessor(node);
        }
        out
    }

    fn depth(&self, node: Entry) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(parent) = self.nodes[current].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    fn position(&self, node: Entry) -> Option<(Entry, Side)> {
        let parent = self.nodes[node].parent?;
        let side = if self.nodes[parent].left == Some(node) {
            Side::Left
        } else {
            Side::Right
        };
        Some((parent, side))
    }

    // Null positions read as black.
    fn color_of(&self, tree: Option<Entry>) -> Color {
        match tree {
            None => Color::Black,
            Some(node) => self.nodes[node].color,
        }
    }

    fn is_red(&self, tree: Option<Entry>) -> bool {
        self.color_of(tree) == Color::Red
    }

    fn set_color(&mut self, tree: Option<Entry>, color: Color) {
        if let Some(node) = tree {
            self.nodes[node].color = color;
        }
    }

    fn left_of(&self, tree: Option<Entry>) -> Option<Entry> {
        tree.and_then(|node| self.nodes[node].left)
    }

    fn right_of(&self, tree: Option<Entry>) -> Option<Entry> {
        tree.and_then(|node| self.nodes[node].right)
    }

    // Repoints the link that leads into `node` at `to` and updates the parent
    // back-reference of `to` to match.
    fn replace_child(&mut self, parent: Option<Entry>, node: Entry, to: Option<Entry>) {
        match parent {
            None => self.root = to,
            Some(parent) => {
                if self.nodes[parent].left == Some(node) {
                    self.nodes[parent].left = to;
                } else {
                    self.nodes[parent].right = to;
                }
            },
        }
        if let Some(to) = to {
            self.nodes[to].parent = parent;
        }
    }

    fn rotate_left(&mut self, node: Entry) {
        let child = self.nodes[node]
            .right
            .expect("Expected right child node to be `Some`.");
        let grandchild = self.nodes[child].left;

        self.nodes[node].right = grandchild;
        if let Some(grandchild) = grandchild {
            self.nodes[grandchild].parent = Some(node);
        }

        let parent = self.nodes[node].parent;
        self.replace_child(parent, node, Some(child));

        self.nodes[child].left = Some(node);
        self.nodes[node].parent = Some(child);
    }

    fn rotate_right(&mut self, node: Entry) {
        let child = self.nodes[node]
            .left
            .expect("Expected left child node to be `Some`.");
        let grandchild = self.nodes[child].right;

        self.nodes[node].left = grandchild;
        if let Some(grandchild) = grandchild {
            self.nodes[grandchild].parent = Some(node);
        }

        let parent = self.nodes[node].parent;
        self.replace_child(parent, node, Some(child));

        self.nodes[child].right = Some(node);
        self.nodes[node].parent = Some(child);
    }

    fn insert_fixup(&mut self, mut node: Entry) {
        while let Some(parent) = self.nodes[node].parent {
            if self.nodes[parent].color == Color::Black {
                break;
            }
            // the root is always black, so a red parent has a parent itself
            let grandparent = self.nodes[parent]
                .parent
                .expect("Expected red node to have a parent.");
            if self.nodes[grandparent].left == Some(parent) {
                let uncle = self.nodes[grandparent].right;
                if self.is_red(uncle) {
                    // red uncle: push the violation up to the grandparent
                    self.nodes[parent].color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.nodes[grandparent].color = Color::Red;
                    node = grandparent;
                } else {
                    if self.nodes[parent].right == Some(node) {
                        // rotate the triangle into a line first
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.nodes[node]
                        .parent
                        .expect("Expected node to have a parent.");
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_right(grandparent);
                    break;
                }
            } else {
                // mirror image of the branch above
                let uncle = self.nodes[grandparent].left;
                if self.is_red(uncle) {
                    self.nodes[parent].color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.nodes[grandparent].color = Color::Red;
                    node = grandparent;
                } else {
                    if self.nodes[parent].left == Some(node) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.nodes[node]
                        .parent
                        .expect("Expected node to have a parent.");
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_left(grandparent);
                    break;
                }
            }
        }
        self.set_color(self.root, Color::Black);
    }

    fn unlink(&mut self, node: Entry) -> T {
        // a node with two children trades places with its in-order successor,
        // which cannot have a left child
        let target = if self.nodes[node].left.is_some() && self.nodes[node].right.is_some() {
            self.successor(node)
                .expect("Expected node with a right child to have a successor.")
        } else {
            node
        };

        let position = self.position(target);
        let child = self.nodes[target].left.or(self.nodes[target].right);
        self.replace_child(position.map(|(parent, _)| parent), target, child);

        let Node { item, color, .. } = self.nodes.free(target);
        if color == Color::Black {
            self.remove_fixup(child, position);
        }

        if target == node {
            item
        } else {
            mem::replace(&mut self.nodes[node].item, item)
        }
    }

    // `x` occupies the position that is short one black node. When `x` is a
    // null leaf it cannot be pointed at, so the (parent, side) context pins
    // the position down instead. A context of `None` means `x` is the root.
    fn remove_fixup(&mut self, mut x: Option<Entry>, mut context: Option<(Entry, Side)>) {
        while self.color_of(x) == Color::Black {
            let (parent, side) = match context {
                Some(context) => context,
                None => break,
            };
            match side {
                Side::Left => {
                    let mut sibling = self.nodes[parent].right;
                    if self.is_red(sibling) {
                        // red sibling: rotate it above the parent, which
                        // turns red, and retry against a black sibling
                        self.set_color(sibling, Color::Black);
                        self.nodes[parent].color = Color::Red;
                        self.rotate_left(parent);
                        sibling = self.nodes[parent].right;
                    }
                    if !self.is_red(self.left_of(sibling)) && !self.is_red(self.right_of(sibling))
                    {
                        // both nephews black: move the deficiency up
                        self.set_color(sibling, Color::Red);
                        x = Some(parent);
                        context = self.position(parent);
                    } else {
                        if !self.is_red(self.right_of(sibling)) {
                            // near nephew red: straighten it into the far slot
                            self.set_color(self.left_of(sibling), Color::Black);
                            self.set_color(sibling, Color::Red);
                            self.rotate_right(
                                sibling.expect("Expected sibling node to be `Some`."),
                            );
                            sibling = self.nodes[parent].right;
                        }
                        // far nephew red: rotating the parent away absorbs
                        // the deficiency
                        let parent_color = self.nodes[parent].color;
                        self.set_color(sibling, parent_color);
                        self.nodes[parent].color = Color::Black;
                        self.set_color(self.right_of(sibling), Color::Black);
                        self.rotate_left(parent);
                        x = self.root;
                        context = None;
                    }
                },
                Side::Right => {
                    let mut sibling = self.nodes[parent].left;
                    if self.is_red(sibling) {
                        self.set_color(sibling, Color::Black);
                        self.nodes[parent].color = Color::Red;
                        self.rotate_right(parent);
                        sibling = self.nodes[parent].left;
                    }
                    if !self.is_red(self.left_of(sibling)) && !self.is_red(self.right_of(sibling))
                    {
                        self.set_color(sibling, Color::Red);
                        x = Some(parent);
                        context = self.position(parent);
                    } else {
                        if !self.is_red(self.left_of(sibling)) {
                            self.set_color(self.right_of(sibling), Color::Black);
                            self.set_color(sibling, Color::Red);
                            self.rotate_left(
                                sibling.expect("Expected sibling node to be `Some`."),
                            );
                            sibling = self.nodes[parent].left;
                        }
                        let parent_color = self.nodes[parent].color;
                        self.set_color(sibling, parent_color);
                        self.nodes[parent].color = Color::Black;
                        self.set_color(self.left_of(sibling), Color::Black);
                        self.rotate_right(parent);
                        x = self.root;
                        context = None;
                    }
                },
            }
        }
        self.set_color(x, Color::Black);
    }
}
