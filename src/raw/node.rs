use super::handle::Handle;
use crate::Color;

/// A child link. `None` is an absent link, which counts as black.
pub(crate) type Link = Option<Handle>;

/// A single tree vertex.
///
/// Links are arena handles rather than boxes so that rotations only rewrite a few
/// `Copy` fields and never move keys or values.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) key: i64,
    pub(crate) value: i64,
    pub(crate) color: Color,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Node {
    /// Creates a detached red leaf; new keys always join their parent's 2-3 node.
    pub(crate) const fn new(key: i64, value: i64) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    #[inline]
    pub(crate) const fn flip_color(&mut self) {
        self.color = self.color.flipped();
    }
}
