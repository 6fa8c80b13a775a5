use core::num::NonZero;

// Narrow slots in test builds so the arena capacity guard is reachable.
#[cfg(test)]
type Slot = u16;
#[cfg(not(test))]
type Slot = u32;

/// Index of a node slot in the arena.
///
/// Stored off by one in a `NonZero` so that a child link, `Option<Handle>`, costs no
/// more than the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<Slot>);

impl Handle {
    /// The largest slot index a handle can address.
    pub(crate) const MAX: usize = (Slot::MAX - 1) as usize;

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        match NonZero::new((index + 1) as Slot) {
            Some(slot) => Self(slot),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
