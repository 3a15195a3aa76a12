//! The thread-safe memory manager.
//!
//! [`MemoryManager`] owns one [`Ledger`] behind a single [`Mutex`] and
//! exposes the lifecycle, placement, free and statistics operations.
//!
//! # Ownership model
//!
//! `MemoryManager` is [`Send`] and [`Sync`]; every method takes `&self`.
//! Share it between threads with `Arc<MemoryManager>`. Each operation
//! holds the lock for its whole duration, so no caller ever observes a
//! ledger mid-split or mid-coalesce. Callers receive [`Address`] values
//! and copied [`Block`]s, never references into the ledger.
//!
//! # Failure
//!
//! Every operation returns `Result<_, AllocError>`. A failed operation
//! leaves the ledger and counters exactly as they were.

use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};
use memman_core::{Address, AllocError, FreeFault, Placement};
use memman_ledger::{Block, Ledger, PlacementPolicy, RegionConfig};

use crate::lifecycle::Lifecycle;
use crate::stats::ManagerStats;

// Compile-time assertion: MemoryManager can be shared across threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send_sync::<MemoryManager>();
    }
};

/// State of an active manager.
#[derive(Debug)]
struct Region {
    config: RegionConfig,
    ledger: Ledger,
    allocation_count: u64,
    free_count: u64,
}

impl Region {
    fn address_of(&self, offset: usize) -> Address {
        // validate() guarantees the last managed byte is addressable.
        Address(self.config.base_address.0 + offset)
    }
}

#[derive(Debug)]
enum ManagerState {
    Uninitialized,
    Active(Region),
    Destroyed,
}

impl ManagerState {
    fn lifecycle(&self) -> Lifecycle {
        match self {
            Self::Uninitialized => Lifecycle::Uninitialized,
            Self::Active(_) => Lifecycle::Active,
            Self::Destroyed => Lifecycle::Destroyed,
        }
    }

    fn not_initialized(&self) -> AllocError {
        AllocError::NotInitialized {
            lifecycle: self.lifecycle().name(),
        }
    }

    fn region(&self) -> Result<&Region, AllocError> {
        match self {
            Self::Active(region) => Ok(region),
            other => Err(other.not_initialized()),
        }
    }

    fn region_mut(&mut self) -> Result<&mut Region, AllocError> {
        match self {
            Self::Active(region) => Ok(region),
            other => Err(other.not_initialized()),
        }
    }
}

/// A simulated allocator over one fixed-size region.
///
/// # Example
///
/// ```
/// use memman_core::{Address, Placement};
/// use memman_engine::MemoryManager;
///
/// let mm = MemoryManager::new();
/// mm.init(Address(0), 100).unwrap();
/// let a = mm.allocate(Placement::FirstFit, 30).unwrap();
/// assert_eq!(a, Address(0));
/// assert_eq!(mm.free_bytes().unwrap(), 70);
/// mm.free(a).unwrap();
/// assert_eq!(mm.fragment_count().unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryManager {
    state: Mutex<ManagerState>,
}

impl MemoryManager {
    /// Create an uninitialized manager. Call [`init`](Self::init) before use.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ManagerState::Uninitialized),
        }
    }

    /// Create a manager that is already active over `config`.
    pub fn with_region(config: RegionConfig) -> Result<Self, AllocError> {
        let manager = Self::new();
        manager.init_region(config)?;
        Ok(manager)
    }

    fn lock(&self) -> MutexGuard<'_, ManagerState> {
        // No operation panics while holding the lock, so the state behind
        // a poisoned mutex is still a complete ledger.
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("memman: recovering poisoned manager lock");
            poisoned.into_inner()
        })
    }

    /// Start managing `total_size` bytes beginning at `base_address`.
    ///
    /// Discards any previous state, including when already active.
    /// Addresses issued before a re-init are the caller's responsibility.
    ///
    /// # Errors
    ///
    /// [`AllocError::InvalidArgument`] if `total_size` is zero or the
    /// region would overflow the address space.
    pub fn init(&self, base_address: Address, total_size: usize) -> Result<(), AllocError> {
        self.init_region(RegionConfig::new(base_address, total_size))
    }

    /// [`init`](Self::init) from a [`RegionConfig`].
    pub fn init_region(&self, config: RegionConfig) -> Result<(), AllocError> {
        config.validate()?;
        let ledger = Ledger::new(config.total_size)?;
        let mut state = self.lock();
        if state.lifecycle().is_active() {
            debug!("memman: re-initializing active manager, discarding prior ledger");
        }
        *state = ManagerState::Active(Region {
            config,
            ledger,
            allocation_count: 0,
            free_count: 0,
        });
        debug!(
            "memman: init region at {} ({} bytes)",
            config.base_address, config.total_size
        );
        Ok(())
    }

    /// Stop managing the region and release the ledger.
    ///
    /// Afterwards every operation except `init` fails with
    /// [`AllocError::NotInitialized`].
    pub fn destroy(&self) -> Result<(), AllocError> {
        let mut state = self.lock();
        state.region()?;
        *state = ManagerState::Destroyed;
        debug!("memman: destroyed");
        Ok(())
    }

    /// Current lifecycle state. Never fails.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lock().lifecycle()
    }

    /// Allocate `size` bytes using one of the built-in strategies.
    ///
    /// # Errors
    ///
    /// - [`AllocError::NotInitialized`] unless active.
    /// - [`AllocError::InvalidArgument`] if `size` is zero.
    /// - [`AllocError::OutOfMemory`] if no free block is large enough.
    pub fn allocate(&self, placement: Placement, size: usize) -> Result<Address, AllocError> {
        self.allocate_with(&placement, size)
    }

    /// Allocate `size` bytes using any [`PlacementPolicy`].
    ///
    /// A policy that selects an ineligible block fails the call with
    /// [`AllocError::InvalidArgument`].
    pub fn allocate_with<P>(&self, policy: &P, size: usize) -> Result<Address, AllocError>
    where
        P: PlacementPolicy + ?Sized,
    {
        let mut state = self.lock();
        let region = state.region_mut()?;
        let offset = region.ledger.allocate(policy, size).inspect_err(|e| {
            debug!("memman: {} allocation of {size} bytes failed: {e}", policy.name());
        })?;
        region.allocation_count += 1;
        let address = region.address_of(offset);
        debug!(
            "memman: {} allocated {size} bytes at {address}",
            policy.name()
        );
        Ok(address)
    }

    /// Return the allocation starting at `address` to the free pool,
    /// merging it with free neighbours.
    ///
    /// # Errors
    ///
    /// - [`AllocError::NotInitialized`] unless active.
    /// - [`AllocError::InvalidFree`] if `address` does not start an
    ///   allocated block (unknown address or double free).
    pub fn free(&self, address: Address) -> Result<(), AllocError> {
        let mut state = self.lock();
        let region = state.region_mut()?;
        let released = region
            .config
            .offset_of(address)
            .ok_or(FreeFault::UnknownAddress)
            .and_then(|offset| region.ledger.release(offset))
            .map_err(|fault| {
                warn!("memman: rejected free of {address}: {fault}");
                AllocError::InvalidFree { address, fault }
            })?;
        region.free_count += 1;
        debug!("memman: freed {address}, now part of free block {released}");
        Ok(())
    }

    /// Bytes currently held by allocated blocks.
    pub fn allocated_bytes(&self) -> Result<usize, AllocError> {
        Ok(self.lock().region()?.ledger.allocated_bytes())
    }

    /// Bytes currently held by free blocks.
    pub fn free_bytes(&self) -> Result<usize, AllocError> {
        Ok(self.lock().region()?.ledger.free_bytes())
    }

    /// Number of free blocks.
    pub fn fragment_count(&self) -> Result<usize, AllocError> {
        Ok(self.lock().region()?.ledger.fragment_count())
    }

    /// Successful allocations since the last `init`.
    pub fn allocation_count(&self) -> Result<u64, AllocError> {
        Ok(self.lock().region()?.allocation_count)
    }

    /// Every counter at once, taken under one lock acquisition.
    pub fn stats(&self) -> Result<ManagerStats, AllocError> {
        let state = self.lock();
        let region = state.region()?;
        Ok(ManagerStats::new(
            region.ledger.stats(),
            region.allocation_count,
            region.free_count,
        ))
    }

    /// Copy of the block list in ascending-base order.
    pub fn blocks(&self) -> Result<Vec<Block>, AllocError> {
        Ok(self.lock().region()?.ledger.blocks().to_vec())
    }

    /// The active region.
    pub fn region(&self) -> Result<RegionConfig, AllocError> {
        Ok(self.lock().region()?.config)
    }

    /// Copy of the ledger, for invariant checks and inspection.
    pub fn ledger_snapshot(&self) -> Result<Ledger, AllocError> {
        Ok(self.lock().region()?.ledger.clone())
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}
