use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::Color;
use crate::raw::{Handle, Link, RawLlrb};

/// Inline depth of the walk stack. An LLRB holding `n` keys is at most
/// `2 * log2(n + 1)` nodes tall, so the walk never spills to the heap for any tree
/// the arena can address.
const WALK_STACK: usize = 64;

/// An ordered map from `i64` keys to `i64` values based on a [left-leaning red-black tree].
///
/// Keys are kept in ascending order. Search, insertion and every flavor of deletion
/// take O(log n) time: the tree stays within a factor of two of perfect balance, since
/// every root-to-leaf path crosses the same number of black links and no two red
/// links are ever adjacent.
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbTree;
///
/// let mut ages = LlrbTree::new();
/// ages.insert(1984, 40);
/// ages.insert(1990, 34);
/// ages.insert(2001, 23);
///
/// assert_eq!(ages.search(1990), Some(34));
/// assert_eq!(ages.search(1970), None);
///
/// // Overwriting keeps a single entry per key.
/// ages.insert(1990, 35);
/// assert_eq!(ages.len(), 3);
///
/// assert!(ages.delete_max());
/// assert_eq!(ages.last_key_value(), Some((1990, 35)));
///
/// for (key, value, color) in ages.walk() {
///     println!("walk key:{key},val:{value},color:{color}");
/// }
/// ```
///
/// # Background
///
/// A 2-3 tree keeps perfect balance by letting a node hold one or two keys. The
/// left-leaning red-black tree encodes each 3-node as two binary nodes joined by a
/// red link that always leans left. Insertion descends as in a plain binary search
/// tree and, on the way back up, applies three local repairs: rotate a right-leaning
/// red link left, rotate a left-left red chain right, and flip the colors of a node
/// with two red children. Deletion additionally pushes a red link down the search
/// path before descending (move-red-left / move-red-right), so that the node finally
/// removed is never the only key of a 2-node.
///
/// [left-leaning red-black tree]: https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree
#[derive(Clone)]
pub struct LlrbTree {
    raw: RawLlrb,
}

/// A lazy in-order walk over the entries of a [`LlrbTree`].
///
/// Yields `(key, value, color)` in ascending key order. This `struct` is created by the
/// [`walk`] method on [`LlrbTree`]. See its documentation for more.
///
/// [`walk`]: LlrbTree::walk
#[derive(Clone)]
pub struct Walk<'a> {
    raw: &'a RawLlrb,
    /// Nodes whose left subtree is being visited, innermost last.
    stack: SmallVec<[Handle; WALK_STACK]>,
    remaining: usize,
}

impl LlrbTree {
    /// Makes a new, empty `LlrbTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::new();
    /// tree.insert(1, 10);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawLlrb::new() }
    }

    /// Returns the number of entries in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1, 10);
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the tree, removing all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::new();
    /// tree.insert(1, 10);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::new();
    /// tree.insert(1, 10);
    /// assert_eq!(tree.search(1), Some(10));
    /// assert_eq!(tree.search(2), None);
    /// ```
    #[must_use]
    pub fn search(&self, key: i64) -> Option<i64> {
        self.raw.search(key)
    }

    /// Returns `true` if the tree holds an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: i64) -> bool {
        self.raw.search(key).is_some()
    }

    /// Returns the entry with the smallest key, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::new();
    /// assert_eq!(tree.first_key_value(), None);
    /// tree.insert(2, 20);
    /// tree.insert(1, 10);
    /// assert_eq!(tree.first_key_value(), Some((1, 10)));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(i64, i64)> {
        self.raw.first_key_value()
    }

    /// Returns the entry with the largest key, if any.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(i64, i64)> {
        self.raw.last_key_value()
    }

    /// Inserts `value` under `key`.
    ///
    /// If the key was already present its value is overwritten in place, no node is
    /// added, and the old value is returned. Otherwise `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::new();
    /// assert_eq!(tree.insert(37, 1), None);
    /// assert_eq!(tree.insert(37, 2), Some(1));
    /// assert_eq!(tree.search(37), Some(2));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: i64, value: i64) -> Option<i64> {
        self.raw.insert(key, value)
    }

    /// Removes the entry with the smallest key. Does nothing on an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::new();
    /// tree.delete_min();
    /// tree.insert(1, 10);
    /// tree.insert(2, 20);
    /// tree.delete_min();
    /// assert_eq!(tree.first_key_value(), Some((2, 20)));
    /// ```
    pub fn delete_min(&mut self) {
        self.raw.pop_first();
    }

    /// Removes the entry with the largest key.
    ///
    /// Returns `false` if the tree was empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::new();
    /// assert!(!tree.delete_max());
    /// tree.insert(1, 10);
    /// tree.insert(2, 20);
    /// assert!(tree.delete_max());
    /// assert_eq!(tree.last_key_value(), Some((1, 10)));
    /// ```
    pub fn delete_max(&mut self) -> bool {
        self.raw.pop_last().is_some()
    }

    /// Removes the entry for `key`.
    ///
    /// Returns `false`, leaving the tree untouched, if the key was absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::new();
    /// tree.insert(1, 10);
    /// assert!(tree.delete(1));
    /// assert!(!tree.delete(1));
    /// assert_eq!(tree.search(1), None);
    /// ```
    pub fn delete(&mut self, key: i64) -> bool {
        self.raw.remove(key).is_some()
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(i64, i64)> {
        self.raw.pop_first()
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(i64, i64)> {
        self.raw.pop_last()
    }

    /// Removes `key`, returning the value it held.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::new();
    /// tree.insert(1, 10);
    /// assert_eq!(tree.remove(1), Some(10));
    /// assert_eq!(tree.remove(1), None);
    /// ```
    pub fn remove(&mut self, key: i64) -> Option<i64> {
        self.raw.remove(key)
    }

    /// Returns a lazy in-order walk yielding `(key, value, color)` for every entry.
    ///
    /// Each call starts again from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::new();
    /// for key in [3, 1, 2] {
    ///     tree.insert(key, -key);
    /// }
    ///
    /// let entries: Vec<(i64, i64)> = tree.walk().map(|(k, v, _)| (k, v)).collect();
    /// assert_eq!(entries, [(1, -1), (2, -2), (3, -3)]);
    /// ```
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.raw)
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// Never exceeds `2 * log2(len + 1)`.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the color of the root node, or `None` for an empty tree.
    ///
    /// The root of a non-empty tree is always [`Color::Black`].
    #[must_use]
    pub fn root_color(&self) -> Option<Color> {
        self.raw.root().map(|root| self.raw.node(root).color)
    }
}

impl Default for LlrbTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LlrbTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.walk().map(|(key, value, _)| (key, value))).finish()
    }
}

impl PartialEq for LlrbTree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.walk().map(|(k, v, _)| (k, v)).eq(other.walk().map(|(k, v, _)| (k, v)))
    }
}

impl Eq for LlrbTree {}

impl<'a> IntoIterator for &'a LlrbTree {
    type Item = (i64, i64, Color);
    type IntoIter = Walk<'a>;

    fn into_iter(self) -> Walk<'a> {
        self.walk()
    }
}

impl<'a> Walk<'a> {
    fn new(raw: &'a RawLlrb) -> Self {
        let mut walk = Self {
            raw,
            stack: SmallVec::new(),
            remaining: raw.len(),
        };
        walk.descend_left(raw.root());
        walk
    }

    fn descend_left(&mut self, mut link: Link) {
        while let Some(h) = link {
            self.stack.push(h);
            link = self.raw.node(h).left;
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = (i64, i64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.stack.pop()?;
        let node = *self.raw.node(h);
        self.descend_left(node.right);
        self.remaining -= 1;
        Some((node.key, node.value, node.color))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Walk<'_> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl FusedIterator for Walk<'_> {}

impl fmt::Debug for Walk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
