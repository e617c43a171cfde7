use core::fmt;
use core::num::NonZeroU32;

use crate::error::{NfError, NfResult};

/// Identifier of a node, control or connection.
///
/// Stored as index + 1 in a `NonZeroU32`, so `Option<Id>` costs nothing
/// extra.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Id(NonZeroU32);

impl Id {
    /// Largest index an id can carry.
    pub const MAX_INDEX: u32 = u32::MAX - 1;

    /// Id for a 0-based `index`.
    ///
    /// # Panics
    ///
    /// If `index` is above [`Id::MAX_INDEX`].
    pub fn from_index(index: u32) -> Self {
        match Self::try_from_index(index) {
            Some(id) => id,
            None => panic!("id index {index} out of range"),
        }
    }

    /// Like [`Id::from_index`], but `None` when `index` is out of range.
    pub fn try_from_index(index: u32) -> Option<Self> {
        index
            .checked_add(1)
            .and_then(NonZeroU32::new)
            .map(Self)
    }

    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.index()).finish()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.index(), f)
    }
}

/// Names for [`Id`] at the places each kind is expected.
///
/// They share one id space: an editor draws nodes, controls and connections
/// from a single [`IdAllocator`], so an id names at most one object.
pub type NodeId = Id;
pub type ControlId = Id;
pub type ConnectionId = Id;

/// Monotonic allocator handing out ids that are never reused.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next id. Fails once every index has been used, rather
    /// than wrapping around to ids that were already issued.
    pub fn allocate(&mut self) -> NfResult<Id> {
        let id = Id::try_from_index(self.next).ok_or(NfError::IdsExhausted)?;
        self.next = self.next.checked_add(1).ok_or(NfError::IdsExhausted)?;
        Ok(id)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}
