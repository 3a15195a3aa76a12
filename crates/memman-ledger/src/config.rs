//! Region configuration.

use memman_core::{AllocError, Address};

/// The span of addresses a manager accounts for.
///
/// Validated at `init`; immutable while the manager is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionConfig {
    /// Address of the first managed byte. Returned addresses are this
    /// value plus a block offset.
    pub base_address: Address,

    /// Number of managed bytes. Must be non-zero, and the last managed
    /// byte must be a representable address.
    pub total_size: usize,
}

impl RegionConfig {
    /// Create a region config. Call [`validate`](Self::validate) before use.
    pub fn new(base_address: Address, total_size: usize) -> Self {
        Self {
            base_address,
            total_size,
        }
    }

    /// Check the structural constraints.
    pub fn validate(&self) -> Result<(), AllocError> {
        if self.total_size == 0 {
            return Err(AllocError::invalid_argument("region size must be non-zero"));
        }
        if self.base_address.checked_add(self.total_size - 1).is_none() {
            return Err(AllocError::invalid_argument(format!(
                "region at {} with {} bytes overflows the address space",
                self.base_address, self.total_size
            )));
        }
        Ok(())
    }

    /// One past the last managed address.
    ///
    /// Saturates at `usize::MAX` for a region ending at the top of the
    /// address space.
    pub fn end_address(&self) -> Address {
        Address(self.base_address.0.saturating_add(self.total_size))
    }

    /// The last managed address, or `None` for an empty or overflowing
    /// region.
    pub fn last_address(&self) -> Option<Address> {
        self.base_address.checked_add(self.total_size.checked_sub(1)?)
    }

    /// Whether `address` lies within `[base_address, last_address()]`.
    pub fn contains(&self, address: Address) -> bool {
        self.last_address()
            .is_some_and(|last| address >= self.base_address && address <= last)
    }

    /// Offset of `address` from the region base, if it lies inside.
    pub fn offset_of(&self, address: Address) -> Option<usize> {
        if self.contains(address) {
            address.offset_from(self.base_address)
        } else {
            None
        }
    }
}
