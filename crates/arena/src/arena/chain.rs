//! Append-only block chain arena
//!
//! Every allocation acquires its own block of exactly the requested size and
//! appends it to the chain. Blocks are never reused: they differ in size, so
//! the only way back is [`ChainArena::reset`], which releases them all.

use core::cell::RefCell;
use core::fmt;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

use super::region::RawRegion;
use super::stats::ArenaStats;
use super::{refuse, track};
use crate::allocator::{HostAllocator, SystemAllocator};
use crate::buffer::OwnedBuffer;
use crate::core::{ArenaConfig, MemoryUsage};
use crate::error::{ArenaError, ArenaResult};
use crate::view::MemView;

/// Unbounded chain of exactly-sized blocks
///
/// ```rust
/// use strata_arena::prelude::*;
///
/// let mut arena = ChainArena::new(SystemAllocator);
/// arena.alloc(10).unwrap();
/// arena.alloc(20).unwrap();
/// assert_eq!(arena.block_sizes(), vec![10, 20]);
///
/// arena.reset();
/// assert!(arena.is_empty());
/// ```
pub struct ChainArena<A: HostAllocator + Clone = SystemAllocator> {
    allocator: A,
    blocks: RefCell<Vec<RawRegion<A>>>,
    config: ArenaConfig,
    stats: ArenaStats,
}

impl<A: HostAllocator + Clone> ChainArena<A> {
    /// Create an empty chain with the default config
    pub fn new(allocator: A) -> Self {
        Self::with_config(allocator, ArenaConfig::default())
    }

    /// Create an empty chain
    pub fn with_config(allocator: A, config: ArenaConfig) -> Self {
        #[cfg(feature = "logging")]
        debug!("created chain arena");

        Self {
            allocator,
            blocks: RefCell::new(Vec::new()),
            config,
            stats: ArenaStats::new(),
        }
    }

    /// Append a new block of exactly `n` bytes
    pub fn alloc(&self, n: usize) -> ArenaResult<MemView<'_>> {
        let block = RawRegion::acquire(self.allocator.clone(), n)
            .map_err(|err| refuse(&self.config, &self.stats, err))?;

        track(&self.config, &self.stats, |stats| {
            stats.record_unit_acquired();
            stats.record_allocation(n);
        });

        // SAFETY: the block is brand new and handed out whole exactly once.
        // It is only released through `&mut self`.
        let view = unsafe { block.view(0, n) };

        let mut blocks = self.blocks.borrow_mut();
        blocks.push(block);

        #[cfg(feature = "logging")]
        trace!(block = blocks.len() - 1, size = n, "chain alloc");

        Ok(view)
    }

    /// Release every block
    pub fn reset(&mut self) {
        let blocks = self.blocks.get_mut();
        let released = blocks.len();
        blocks.clear();
        track(&self.config, &self.stats, |stats| {
            stats.record_units_released(released);
            stats.record_hard_reset();
        });

        #[cfg(feature = "logging")]
        debug!(released, "reset chain arena");
    }

    /// Copy one block, size and payload, into an independent buffer
    ///
    /// The buffer is allocated through this arena's allocator and releases
    /// itself when dropped.
    pub fn clone_block(&mut self, index: usize) -> ArenaResult<OwnedBuffer<A>> {
        let blocks = self.blocks.get_mut();
        let block = blocks
            .get(index)
            .ok_or_else(|| ArenaError::block_out_of_range(index, blocks.len()))?;

        let copy = block
            .duplicate(self.allocator.clone())
            .map_err(|err| refuse(&self.config, &self.stats, err))?;
        Ok(OwnedBuffer::from_region(copy))
    }

    /// Payload of block `index`
    pub fn block(&mut self, index: usize) -> Option<&mut [u8]> {
        self.blocks
            .get_mut()
            .get_mut(index)
            .map(RawRegion::as_mut_slice)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.borrow().len()
    }

    /// Size of every block, in insertion order
    pub fn block_sizes(&self) -> Vec<usize> {
        self.blocks.borrow().iter().map(RawRegion::len).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.borrow().is_empty()
    }

    /// Bytes held in blocks
    pub fn used(&self) -> usize {
        self.blocks.borrow().iter().map(RawRegion::len).sum()
    }

    pub fn stats(&self) -> &ArenaStats {
        &self.stats
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }
}

#[cfg(feature = "logging")]
impl<A: HostAllocator + Clone> Drop for ChainArena<A> {
    fn drop(&mut self) {
        debug!(blocks = self.blocks.get_mut().len(), "dropping chain arena");
    }
}

impl<A: HostAllocator + Clone> MemoryUsage for ChainArena<A> {
    fn used_memory(&self) -> usize {
        self.used()
    }

    fn available_memory(&self) -> Option<usize> {
        None
    }
}

impl<A: HostAllocator + Clone> fmt::Debug for ChainArena<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainArena")
            .field("blocks", &self.block_sizes())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::{LimitedAllocator, TrackedAllocator};

    fn arena() -> ChainArena {
        ChainArena::with_config(SystemAllocator, ArenaConfig::debug())
    }

    #[test]
    fn test_starts_empty() {
        let arena = arena();
        assert!(arena.is_empty());
        assert_eq!(arena.block_count(), 0);
        assert_eq!(arena.memory_usage().total, None);
    }

    #[test]
    fn test_blocks_in_insertion_order() {
        let arena = arena();
        let first = arena.alloc(10).unwrap();
        let second = arena.alloc(20).unwrap();

        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 20);
        assert_eq!(arena.block_sizes(), vec![10, 20]);
        assert_eq!(arena.used(), 30);
    }

    #[test]
    fn test_no_size_ceiling() {
        let arena = arena();
        assert_eq!(arena.alloc(1 << 20).unwrap().len(), 1 << 20);
    }

    #[test]
    fn test_reset_then_fresh_chain() {
        let mut arena = arena();
        arena.alloc(10).unwrap();
        arena.alloc(20).unwrap();
        arena.reset();
        assert!(arena.is_empty());

        arena.alloc(5).unwrap();
        assert_eq!(arena.block_sizes(), vec![5]);
        assert_eq!(arena.stats().units_released(), 2);
    }

    #[test]
    fn test_clone_block() {
        let mut arena = arena();
        arena.alloc(3).unwrap().copy_from_slice(b"one");
        arena.alloc(3).unwrap().copy_from_slice(b"two");

        let copy = arena.clone_block(1).unwrap();
        assert_eq!(copy.as_slice(), b"two");

        arena.block(1).unwrap()[0] = b'T';
        assert_eq!(copy.as_slice(), b"two");
        assert_eq!(arena.block(1).unwrap(), b"Two");
    }

    #[test]
    fn test_clone_block_out_of_range() {
        let mut arena = arena();
        arena.alloc(1).unwrap();
        let err = arena.clone_block(4).unwrap_err();
        assert_eq!(err, ArenaError::block_out_of_range(4, 1));
    }

    #[test]
    fn test_host_failure_leaves_chain() {
        let limited = LimitedAllocator::new(SystemAllocator, 16);
        let arena = ChainArena::new(&limited);
        arena.alloc(10).unwrap();

        assert!(arena.alloc(10).unwrap_err().is_allocation_failure());
        assert_eq!(arena.block_sizes(), vec![10]);
    }

    #[test]
    fn test_drop_releases_blocks() {
        let tracked = TrackedAllocator::new(SystemAllocator);
        {
            let mut arena = ChainArena::new(&tracked);
            arena.alloc(8).unwrap();
            arena.alloc(8).unwrap();
            let _copy = arena.clone_block(0).unwrap();
            assert_eq!(tracked.acquisitions(), 3);
        }
        assert!(!tracked.has_leaks());
        assert_eq!(tracked.live_bytes(), 0);
    }
}
