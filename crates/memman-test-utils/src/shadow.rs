//! Reference model of the allocator.
//!
//! [`ShadowHeap`] tracks only the live allocations, keyed by address in
//! issue order. Because a sound ledger fully coalesces free space, its free
//! blocks are exactly the maximal gaps between live allocations. The model
//! derives every statistic and every placement decision from those gaps,
//! independently of the ledger's representation.

use indexmap::IndexMap;
use memman_core::{Address, Placement};

/// Independent model of a manager's observable state.
#[derive(Clone, Debug)]
pub struct ShadowHeap {
    base: Address,
    total_size: usize,
    /// Live allocations: address → length, in issue order.
    live: IndexMap<Address, usize>,
    allocations: u64,
}

impl ShadowHeap {
    pub fn new(base: Address, total_size: usize) -> Self {
        Self {
            base,
            total_size,
            live: IndexMap::new(),
            allocations: 0,
        }
    }

    /// Free gaps as `(address, len)`, ascending by address.
    pub fn gaps(&self) -> Vec<(Address, usize)> {
        let mut spans: Vec<(usize, usize)> = self
            .live
            .iter()
            .map(|(addr, &len)| (addr.0 - self.base.0, len))
            .collect();
        spans.sort_unstable();

        let mut gaps = Vec::new();
        let mut cursor = 0;
        for (offset, len) in spans {
            if offset > cursor {
                gaps.push((Address(self.base.0 + cursor), offset - cursor));
            }
            cursor = offset + len;
        }
        if cursor < self.total_size {
            gaps.push((Address(self.base.0 + cursor), self.total_size - cursor));
        }
        gaps
    }

    /// Address the given strategy must return for `size`, or `None` when
    /// the request must fail with out-of-memory.
    pub fn predict(&self, placement: Placement, size: usize) -> Option<Address> {
        let eligible = self.gaps().into_iter().filter(|&(_, len)| len >= size);
        let chosen = match placement {
            Placement::FirstFit => eligible.min_by_key(|&(addr, _)| addr),
            Placement::BestFit => eligible.min_by_key(|&(addr, len)| (len, addr)),
            Placement::WorstFit => eligible.min_by_key(|&(addr, len)| (usize::MAX - len, addr)),
        };
        chosen.map(|(addr, _)| addr)
    }

    /// Record a successful allocation.
    ///
    /// # Panics
    ///
    /// Panics if the range leaves the region or overlaps a live allocation.
    pub fn record_alloc(&mut self, address: Address, size: usize) {
        let offset = address
            .offset_from(self.base)
            .expect("allocation below region base");
        assert!(
            offset + size <= self.total_size,
            "allocation {address}+{size} leaves the region"
        );
        for (&other, &len) in &self.live {
            let disjoint = address.0 + size <= other.0 || other.0 + len <= address.0;
            assert!(disjoint, "allocation {address}+{size} overlaps {other}+{len}");
        }
        self.live.insert(address, size);
        self.allocations += 1;
    }

    /// Record a free. Returns the freed length, or `None` if the model
    /// expects the free to be rejected.
    pub fn record_free(&mut self, address: Address) -> Option<usize> {
        self.live.shift_remove(&address)
    }

    /// Whether `address` is a live allocation.
    pub fn is_live(&self, address: Address) -> bool {
        self.live.contains_key(&address)
    }

    /// The `index`-th live allocation in issue order.
    pub fn live_at(&self, index: usize) -> Option<Address> {
        self.live.get_index(index).map(|(&addr, _)| addr)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn allocated_bytes(&self) -> usize {
        self.live.values().sum()
    }

    pub fn free_bytes(&self) -> usize {
        self.total_size - self.allocated_bytes()
    }

    pub fn fragment_count(&self) -> usize {
        self.gaps().len()
    }

    pub fn allocation_count(&self) -> u64 {
        self.allocations
    }
}
