//! Strongly-typed caller-visible addresses.

use std::fmt;

/// An opaque address handed out by the manager.
///
/// The manager never dereferences an `Address`; it is the region's base
/// address plus the byte offset of an allocated block. Callers that own
/// real backing memory may translate it back into a pointer, but that is
/// outside the allocator's responsibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub usize);

impl Address {
    /// The null address, `0`.
    pub const NULL: Address = Address(0);

    /// Raw numeric value.
    pub fn get(self) -> usize {
        self.0
    }

    /// Address `offset` bytes past `self`, or `None` on overflow.
    pub fn checked_add(self, offset: usize) -> Option<Address> {
        self.0.checked_add(offset).map(Address)
    }

    /// Byte distance from `base` to `self`, or `None` if `self < base`.
    pub fn offset_from(self, base: Address) -> Option<usize> {
        self.0.checked_sub(base.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<usize> for Address {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

impl From<Address> for usize {
    fn from(a: Address) -> Self {
        a.0
    }
}
