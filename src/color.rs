use core::fmt;

/// The color of the link from a node to its parent.
///
/// A red node is glued to its parent, together forming a 3-node of the underlying
/// 2-3 tree. An absent child link is always considered black.
///
/// # Examples
///
/// ```
/// use llrb_tree::{Color, LlrbTree};
///
/// let mut tree = LlrbTree::new();
/// tree.insert(1, 10);
/// tree.insert(2, 20);
///
/// // Two keys form a 3-node: a black root with a red left child.
/// let colors: Vec<Color> = tree.walk().map(|(_, _, color)| color).collect();
/// assert_eq!(colors, [Color::Red, Color::Black]);
/// assert_eq!(Color::Red.to_string(), "red");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns the opposite color.
    #[inline]
    #[must_use]
    pub(crate) const fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}
