//! Generational handles for objects owned by another structure.
//!
//! Names refer back to the card, ability, or player that registered them
//! through a [`Handle`] rather than an owning link. The owner keeps its
//! objects in an arena and bumps the generation whenever a slot is reused,
//! so a stale handle can be detected instead of silently aliasing.

use std::fmt;

/// Index plus generation counter into an arena owned elsewhere.
///
/// # Layout
/// - `index`: 64-bit slot index
/// - `generation`: 32-bit generation counter
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Handle {
    /// Slot index in the owning arena.
    pub index: u64,
    /// Generation counter for stale reference detection.
    pub generation: u32,
}

impl Handle {
    /// Creates a handle with the given index and generation.
    #[must_use]
    pub const fn new(index: u64, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns a sentinel value representing "no owner".
    ///
    /// This uses `u64::MAX` as the index, which should never be allocated.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            index: u64::MAX,
            generation: 0,
        }
    }

    /// Returns true if this is the null sentinel value.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.index == u64::MAX
    }

    /// Returns the handle for the same slot one generation later.
    #[must_use]
    pub const fn next_generation(self) -> Self {
        Self {
            index: self.index,
            generation: self.generation.wrapping_add(1),
        }
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Handle(null)")
        } else {
            write!(f, "Handle({}v{})", self.index, self.generation)
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "#null")
        } else {
            write!(f, "#{}", self.index)
        }
    }
}
