use core::cmp::Ordering;
use core::mem;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Link, Node};
use crate::Color;

/// The core left-leaning red-black tree backing `LlrbTree`.
///
/// Every recursive helper receives the handle of a subtree root and returns the handle
/// of the subtree root after rebalancing, which the caller stores back into the parent
/// link. The five tree invariants may be broken inside a recursion but hold again once
/// a public method returns.
#[derive(Clone)]
pub(crate) struct RawLlrb {
    /// Arena storing all tree nodes.
    nodes: Arena<Node>,
    /// Handle to the root node, if the tree is non-empty.
    root: Link,
    /// Total number of key-value pairs in the tree.
    len: usize,
}

impl RawLlrb {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the root link.
    pub(crate) const fn root(&self) -> Link {
        self.root
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        self.height_of(self.root)
    }

    fn height_of(&self, link: Link) -> usize {
        link.map_or(0, |h| {
            let node = self.nodes.get(h);
            1 + self.height_of(node.left).max(self.height_of(node.right))
        })
    }

    // ─── Color and link helpers ─────────────────────────────────────────────

    #[inline]
    fn left(&self, h: Handle) -> Link {
        self.nodes.get(h).left
    }

    #[inline]
    fn right(&self, h: Handle) -> Link {
        self.nodes.get(h).right
    }

    /// An absent link is black.
    #[inline]
    fn is_red(&self, link: Link) -> bool {
        link.is_some_and(|h| self.nodes.get(h).is_red())
    }

    /// Is the left child of `link` red? False for an absent `link`.
    #[inline]
    fn is_left_red(&self, link: Link) -> bool {
        link.is_some_and(|h| self.is_red(self.left(h)))
    }

    fn blacken_root(&mut self) {
        if let Some(root) = self.root {
            self.nodes.get_mut(root).color = Color::Black;
        }
    }

    /// Lends the root's parent-less position to the descent: a root with two black
    /// children is temporarily reddened so the first move-red step has a red to push.
    fn redden_root_if_2_node(&mut self, root: Handle) {
        if !self.is_red(self.left(root)) && !self.is_red(self.right(root)) {
            self.nodes.get_mut(root).color = Color::Red;
        }
    }

    // ─── Rotation / recolor primitives ──────────────────────────────────────

    //          h                    x
    //         / \                  / \
    //        a   (x)     =>      (h)  c
    //            / \             / \
    //           b   c           a   b
    fn rotate_left(&mut self, h: Handle) -> Handle {
        let x = self.right(h).expect("`RawLlrb::rotate_left()` - right link is absent!");
        debug_assert!(self.is_red(Some(x)), "`RawLlrb::rotate_left()` - right link is black!");

        let node = self.nodes.get_mut(h);
        let color = mem::replace(&mut node.color, Color::Red);
        let x_node = self.nodes.get_mut(x);
        let b = mem::replace(&mut x_node.left, Some(h));
        x_node.color = color;
        self.nodes.get_mut(h).right = b;
        x
    }

    //            h                x
    //           / \              / \
    //         (x)  c     =>     a  (h)
    //         / \                  / \
    //        a   b                b   c
    fn rotate_right(&mut self, h: Handle) -> Handle {
        let x = self.left(h).expect("`RawLlrb::rotate_right()` - left link is absent!");
        debug_assert!(self.is_red(Some(x)), "`RawLlrb::rotate_right()` - left link is black!");

        let node = self.nodes.get_mut(h);
        let color = mem::replace(&mut node.color, Color::Red);
        let x_node = self.nodes.get_mut(x);
        let b = mem::replace(&mut x_node.right, Some(h));
        x_node.color = color;
        self.nodes.get_mut(h).left = b;
        x
    }

    /// Toggles `h` and both of its children. Splits a 4-node on the way up, merges
    /// siblings into a 4-node on the way down.
    fn flip_colors(&mut self, h: Handle) {
        let node = self.nodes.get_mut(h);
        node.flip_color();
        let left = node.left.expect("`RawLlrb::flip_colors()` - left link is absent!");
        let right = node.right.expect("`RawLlrb::flip_colors()` - right link is absent!");
        self.nodes.get_mut(left).flip_color();
        self.nodes.get_mut(right).flip_color();
    }

    /// Restores the left-leaning invariants at `h` given they hold for its children.
    fn fixup(&mut self, mut h: Handle) -> Handle {
        if self.is_red(self.right(h)) && !self.is_red(self.left(h)) {
            h = self.rotate_left(h);
        }
        if self.is_red(self.left(h)) && self.is_left_red(self.left(h)) {
            h = self.rotate_right(h);
        }
        if self.is_red(self.left(h)) && self.is_red(self.right(h)) {
            self.flip_colors(h);
        }
        h
    }

    /// Makes `h.left` or one of its children red, assuming `h` is red and both
    /// `h.left` and `h.left.left` are black.
    fn move_red_left(&mut self, mut h: Handle) -> Handle {
        self.flip_colors(h);
        if self.is_left_red(self.right(h)) {
            let right = self.right(h).expect("`RawLlrb::move_red_left()` - right link is absent!");
            let right = self.rotate_right(right);
            self.nodes.get_mut(h).right = Some(right);
            h = self.rotate_left(h);
            self.flip_colors(h);
        }
        h
    }

    /// Makes `h.right` or one of its children red, assuming `h` is red and both
    /// `h.right` and `h.right.left` are black.
    fn move_red_right(&mut self, mut h: Handle) -> Handle {
        self.flip_colors(h);
        if self.is_left_red(self.left(h)) {
            h = self.rotate_right(h);
            self.flip_colors(h);
        }
        h
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    /// Returns the value stored under `key`.
    pub(crate) fn search(&self, key: i64) -> Option<i64> {
        let mut link = self.root;
        while let Some(h) = link {
            let node = self.nodes.get(h);
            link = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(node.value),
            };
        }
        None
    }

    /// Returns the entry with the smallest key.
    pub(crate) fn first_key_value(&self) -> Option<(i64, i64)> {
        let mut h = self.root?;
        while let Some(left) = self.left(h) {
            h = left;
        }
        let node = self.nodes.get(h);
        Some((node.key, node.value))
    }

    /// Returns the entry with the largest key.
    pub(crate) fn last_key_value(&self) -> Option<(i64, i64)> {
        let mut h = self.root?;
        while let Some(right) = self.right(h) {
            h = right;
        }
        let node = self.nodes.get(h);
        Some((node.key, node.value))
    }

    // ─── Insert ─────────────────────────────────────────────────────────────

    /// Inserts or overwrites `key`, returning the previous value if there was one.
    pub(crate) fn insert(&mut self, key: i64, value: i64) -> Option<i64> {
        let (root, old_value) = self.insert_at(self.root, key, value);
        self.root = Some(root);
        self.blacken_root();
        if old_value.is_none() {
            self.len += 1;
        }
        debug_assert_eq!(self.nodes.len(), self.len);
        old_value
    }

    fn insert_at(&mut self, link: Link, key: i64, value: i64) -> (Handle, Option<i64>) {
        let Some(h) = link else {
            return (self.nodes.alloc(Node::new(key, value)), None);
        };

        let node = *self.nodes.get(h);
        let old_value = match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, old_value) = self.insert_at(node.left, key, value);
                self.nodes.get_mut(h).left = Some(left);
                old_value
            }
            Ordering::Greater => {
                let (right, old_value) = self.insert_at(node.right, key, value);
                self.nodes.get_mut(h).right = Some(right);
                old_value
            }
            Ordering::Equal => Some(mem::replace(&mut self.nodes.get_mut(h).value, value)),
        };

        (self.fixup(h), old_value)
    }

    // ─── Delete minimum / maximum ───────────────────────────────────────────

    /// Removes and returns the entry with the smallest key.
    pub(crate) fn pop_first(&mut self) -> Option<(i64, i64)> {
        let root = self.root?;
        self.redden_root_if_2_node(root);
        let (root, removed) = self.delete_min_at(root);
        self.root = root;
        self.blacken_root();
        self.len -= 1;
        Some(removed)
    }

    fn delete_min_at(&mut self, mut h: Handle) -> (Link, (i64, i64)) {
        if self.left(h).is_none() {
            // A node without a left child has no right child either.
            let node = self.nodes.take(h);
            return (None, (node.key, node.value));
        }

        if !self.is_red(self.left(h)) && !self.is_left_red(self.left(h)) {
            h = self.move_red_left(h);
        }
        let left = self.left(h).expect("`RawLlrb::delete_min_at()` - left link is absent!");
        let (left, removed) = self.delete_min_at(left);
        self.nodes.get_mut(h).left = left;
        (Some(self.fixup(h)), removed)
    }

    /// Removes and returns the entry with the largest key.
    pub(crate) fn pop_last(&mut self) -> Option<(i64, i64)> {
        let root = self.root?;
        self.redden_root_if_2_node(root);
        let (root, removed) = self.delete_max_at(root);
        self.root = root;
        self.blacken_root();
        self.len -= 1;
        Some(removed)
    }

    fn delete_max_at(&mut self, mut h: Handle) -> (Link, (i64, i64)) {
        // Lean the 3-node right so the maximum can be taken off the right spine.
        if self.is_red(self.left(h)) {
            h = self.rotate_right(h);
        }
        if self.right(h).is_none() {
            let node = self.nodes.take(h);
            return (None, (node.key, node.value));
        }

        if !self.is_red(self.right(h)) && !self.is_left_red(self.right(h)) {
            h = self.move_red_right(h);
        }
        let right = self.right(h).expect("`RawLlrb::delete_max_at()` - right link is absent!");
        let (right, removed) = self.delete_max_at(right);
        self.nodes.get_mut(h).right = right;
        (Some(self.fixup(h)), removed)
    }

    // ─── Delete by key ──────────────────────────────────────────────────────

    /// Removes `key`, returning its value. An absent key leaves the tree untouched.
    pub(crate) fn remove(&mut self, key: i64) -> Option<i64> {
        let value = self.search(key)?;
        let root = self.root?;
        self.redden_root_if_2_node(root);
        self.root = self.delete_at(root, key);
        self.blacken_root();
        self.len -= 1;
        debug_assert_eq!(self.nodes.len(), self.len);
        Some(value)
    }

    /// Deletes `key` from the subtree rooted at `h`. The key must be present.
    fn delete_at(&mut self, mut h: Handle, key: i64) -> Link {
        if key < self.nodes.get(h).key {
            if !self.is_red(self.left(h)) && !self.is_left_red(self.left(h)) {
                h = self.move_red_left(h);
            }
            let left = self.left(h).expect("`RawLlrb::delete_at()` - `key` is not in the tree!");
            let left = self.delete_at(left, key);
            self.nodes.get_mut(h).left = left;
        } else {
            if self.is_red(self.left(h)) {
                h = self.rotate_right(h);
            }
            if key == self.nodes.get(h).key && self.right(h).is_none() {
                self.nodes.take(h);
                return None;
            }
            if !self.is_red(self.right(h)) && !self.is_left_red(self.right(h)) {
                h = self.move_red_right(h);
            }
            let right = self.right(h).expect("`RawLlrb::delete_at()` - `key` is not in the tree!");
            if key == self.nodes.get(h).key {
                // Replace with the in-order successor, then drop the successor's node.
                let (right, (successor_key, successor_value)) = self.delete_min_at(right);
                let node = self.nodes.get_mut(h);
                node.key = successor_key;
                node.value = successor_value;
                node.right = right;
            } else {
                let right = self.delete_at(right, key);
                self.nodes.get_mut(h).right = right;
            }
        }
        Some(self.fixup(h))
    }
}
