//! Paged bump arena
//!
//! # Layout
//!
//! Pages live in a vector in chain order. Index 0 is the head and is never
//! released while the arena lives; `tail` is the index of the page that
//! receives allocations. Pages past `tail` are headroom left by a soft
//! reset and hold no live data.
//!
//! Payload bytes live in host regions owned by each page, so growing the
//! vector never moves memory that a view points into.
//!
//! # Allocation
//!
//! Strictly forward: a request that does not fit the tail page moves the
//! tail to the next page (reusing it if one exists, acquiring one
//! otherwise). Free space in earlier pages is never revisited until a
//! reset.

use core::cell::{Cell, RefCell};
use core::fmt;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

use super::region::RawRegion;
use super::stats::ArenaStats;
use super::{refuse, track};
use crate::allocator::{HostAllocator, SystemAllocator};
use crate::core::{ArenaConfig, MemoryUsage};
use crate::error::{ArenaError, ArenaResult};
use crate::view::MemView;

/// One `page_size` unit of the chain
struct Page<A: HostAllocator> {
    region: RawRegion<A>,
    pos: usize,
}

/// Bump allocator over a chain of equal-size pages
///
/// No allocation may span pages: requests above `page_size` are refused
/// with [`ArenaError::ChunkTooLarge`].
pub struct PagedArena<A: HostAllocator + Clone = SystemAllocator> {
    allocator: A,
    page_size: usize,
    pages: RefCell<Vec<Page<A>>>,
    tail: Cell<usize>,
    config: ArenaConfig,
    stats: ArenaStats,
}

impl<A: HostAllocator + Clone> PagedArena<A> {
    /// Create an arena with one page and the default config
    pub fn new(page_size: usize, allocator: A) -> ArenaResult<Self> {
        Self::with_config(page_size, allocator, ArenaConfig::default())
    }

    /// Create an arena with one page of `page_size` bytes
    pub fn with_config(page_size: usize, allocator: A, config: ArenaConfig) -> ArenaResult<Self> {
        ArenaConfig::validate_page_size(page_size)?;

        let head = RawRegion::acquire(allocator.clone(), page_size)?;
        let stats = ArenaStats::new();
        track(&config, &stats, ArenaStats::record_unit_acquired);

        #[cfg(feature = "logging")]
        debug!(page_size, "created paged arena");

        Ok(Self {
            allocator,
            page_size,
            pages: RefCell::new(vec![Page {
                region: head,
                pos: 0,
            }]),
            tail: Cell::new(0),
            config,
            stats,
        })
    }

    fn acquire_page(&self) -> ArenaResult<Page<A>> {
        let region = RawRegion::acquire(self.allocator.clone(), self.page_size)?;
        track(&self.config, &self.stats, ArenaStats::record_unit_acquired);

        #[cfg(feature = "logging")]
        debug!(page_size = self.page_size, "acquired page");

        Ok(Page { region, pos: 0 })
    }

    /// Bump-allocate `n` bytes from the tail page
    pub fn alloc(&self, n: usize) -> ArenaResult<MemView<'_>> {
        if n > self.page_size {
            return Err(refuse(
                &self.config,
                &self.stats,
                ArenaError::chunk_too_large(n, self.page_size),
            ));
        }

        let mut pages = self.pages.borrow_mut();
        let mut tail = self.tail.get();

        let left = self.page_size - pages[tail].pos;
        if left < n {
            if tail + 1 == pages.len() {
                let page = self
                    .acquire_page()
                    .map_err(|err| refuse(&self.config, &self.stats, err))?;
                pages.push(page);
            }
            track(&self.config, &self.stats, |stats| stats.record_waste(left));
            tail += 1;
            self.tail.set(tail);
        }

        let page = &mut pages[tail];
        let offset = page.pos;
        page.pos += n;
        track(&self.config, &self.stats, |stats| stats.record_allocation(n));

        #[cfg(feature = "logging")]
        trace!(page = tail, offset, size = n, "paged alloc");

        // SAFETY: `[offset, offset + n)` is inside the tail page and past
        // every span it handed out since the last reset. The page region is
        // only released or rewound through `&mut self`.
        Ok(unsafe { page.region.view(offset, n) })
    }

    /// Soft reset: rewind every page and move the tail back to the head
    ///
    /// The chain is kept, so later allocations reuse the pages in order.
    pub fn reset(&mut self) {
        let zero = self.config.zero_on_reset;
        for page in self.pages.get_mut() {
            if zero {
                page.region.as_mut_slice()[..page.pos].fill(0);
            }
            page.pos = 0;
        }
        self.tail.set(0);
        track(&self.config, &self.stats, ArenaStats::record_soft_reset);

        #[cfg(feature = "logging")]
        debug!(pages = self.pages.get_mut().len(), "soft reset paged arena");
    }

    /// Hard reset: release every page after the head, then rewind it
    pub fn hard_reset(&mut self) {
        let zero = self.config.zero_on_reset;
        let pages = self.pages.get_mut();
        let released = pages.len() - 1;
        pages.truncate(1);

        let head = &mut pages[0];
        if zero {
            head.region.as_mut_slice()[..head.pos].fill(0);
        }
        head.pos = 0;
        self.tail.set(0);

        track(&self.config, &self.stats, |stats| {
            stats.record_units_released(released);
            stats.record_hard_reset();
        });

        #[cfg(feature = "logging")]
        debug!(released, "hard reset paged arena");
    }

    /// Mean fill ratio over all pages, in `0.0..=1.0`
    pub fn average_utilization(&self) -> f64 {
        let pages = self.pages.borrow();
        let filled: f64 = pages
            .iter()
            .map(|page| page.pos as f64 / self.page_size as f64)
            .sum();
        filled / pages.len() as f64
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Pages currently in the chain, headroom included
    pub fn page_count(&self) -> usize {
        self.pages.borrow().len()
    }

    /// Index of the page receiving allocations
    #[inline]
    pub fn tail_index(&self) -> usize {
        self.tail.get()
    }

    /// Write position of every page, in chain order
    pub fn page_positions(&self) -> Vec<usize> {
        self.pages.borrow().iter().map(|page| page.pos).collect()
    }

    /// Bytes handed out since the last reset
    pub fn used(&self) -> usize {
        self.pages.borrow().iter().map(|page| page.pos).sum()
    }

    /// Bytes `alloc` can still hand out before a new page is acquired
    ///
    /// Free space in the tail page plus the headroom pages after it. Bytes
    /// left behind in pages before the tail do not count until a reset.
    pub fn remaining_capacity(&self) -> usize {
        let pages = self.pages.borrow();
        let tail = self.tail.get();
        let headroom = pages.len() - tail - 1;
        (self.page_size - pages[tail].pos) + headroom * self.page_size
    }

    /// Bytes held in pages
    pub fn capacity(&self) -> usize {
        self.page_count() * self.page_size
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
impl<A: HostAllocator + Clone> Drop for PagedArena<A> {
    fn drop(&mut self) {
        debug!(pages = self.pages.get_mut().len(), "dropping paged arena");
    }
}

impl<A: HostAllocator + Clone> MemoryUsage for PagedArena<A> {
    fn used_memory(&self) -> usize {
        self.used()
    }

    fn available_memory(&self) -> Option<usize> {
        Some(self.remaining_capacity())
    }
}

impl<A: HostAllocator + Clone> fmt::Debug for PagedArena<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedArena")
            .field("page_size", &self.page_size)
            .field("positions", &self.page_positions())
            .field("tail", &self.tail.get())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::{LimitedAllocator, TrackedAllocator};

    fn arena(page_size: usize) -> PagedArena {
        PagedArena::with_config(page_size, SystemAllocator, ArenaConfig::debug()).unwrap()
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = PagedArena::new(0, SystemAllocator).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfig { .. }));
    }

    #[test]
    fn test_page_ceiling() {
        let arena = arena(40);
        arena.alloc(40).unwrap();

        let err = arena.alloc(64).unwrap_err();
        assert_eq!(err, ArenaError::chunk_too_large(64, 40));
        assert_eq!(arena.page_count(), 1);
        assert_eq!(arena.page_positions(), vec![40]);
    }

    #[test]
    fn test_advances_to_new_page() {
        let arena = arena(10);
        arena.alloc(6).unwrap();
        arena.alloc(6).unwrap();

        assert_eq!(arena.page_count(), 2);
        assert_eq!(arena.tail_index(), 1);
        assert_eq!(arena.page_positions(), vec![6, 6]);
        assert_eq!(arena.stats().bytes_wasted(), 4);
    }

    #[test]
    fn test_never_backfills() {
        let arena = arena(10);
        arena.alloc(8).unwrap();
        arena.alloc(5).unwrap();
        // Fits in page 0's leftover, but the tail has moved on.
        arena.alloc(2).unwrap();

        assert_eq!(arena.page_positions(), vec![8, 7]);
    }

    #[test]
    fn test_soft_reset_keeps_chain() {
        let mut arena = arena(10);
        arena.alloc(5).unwrap();
        arena.alloc(10).unwrap();
        arena.reset();

        assert_eq!(arena.tail_index(), 0);
        assert_eq!(arena.page_positions(), vec![0, 0]);

        // Headroom is reused before anything new is acquired.
        arena.alloc(10).unwrap();
        arena.alloc(10).unwrap();
        assert_eq!(arena.page_count(), 2);
        assert_eq!(arena.stats().units_acquired(), 2);
    }

    #[test]
    fn test_hard_reset_shrinks_to_head() {
        let mut arena = arena(10);
        arena.alloc(5).unwrap();
        arena.alloc(10).unwrap();
        arena.alloc(10).unwrap();
        arena.hard_reset();

        assert_eq!(arena.page_count(), 1);
        assert_eq!(arena.page_positions(), vec![0]);
        assert_eq!(arena.stats().units_released(), 2);
        assert_eq!(arena.stats().current_units(), 1);
    }

    #[test]
    fn test_average_utilization() {
        let arena = arena(10);
        arena.alloc(5).unwrap();
        assert_eq!(arena.average_utilization(), 0.5);

        arena.alloc(10).unwrap();
        assert_eq!(arena.average_utilization(), 0.75);
    }

    #[test]
    fn test_remaining_capacity_skips_left_behind_bytes() {
        let arena = arena(10);
        arena.alloc(6).unwrap();
        arena.alloc(6).unwrap();
        assert_eq!(arena.remaining_capacity(), 4);

        let before = arena.page_count();
        for _ in 0..4 {
            arena.alloc(1).unwrap();
        }
        assert_eq!(arena.page_count(), before);
        assert_eq!(arena.remaining_capacity(), 0);

        arena.alloc(1).unwrap();
        assert_eq!(arena.page_count(), before + 1);
    }

    #[test]
    fn test_zero_on_reset_scrubs_used_bytes() {
        let mut arena = arena(4);
        arena.alloc(4).unwrap().copy_from_slice(b"abcd");
        arena.reset();

        let view = arena.alloc(4).unwrap();
        assert_eq!(&*view, &[0u8; 4]);
    }

    #[test]
    fn test_failed_page_acquire_leaves_tail() {
        let limited = LimitedAllocator::new(SystemAllocator, 10);
        let arena = PagedArena::new(10, &limited).unwrap();
        arena.alloc(7).unwrap();

        let err = arena.alloc(7).unwrap_err();
        assert!(err.is_allocation_failure());
        assert_eq!(arena.tail_index(), 0);
        assert_eq!(arena.page_positions(), vec![7]);
    }

    #[test]
    fn test_teardown_releases_all_pages() {
        let tracked = TrackedAllocator::new(SystemAllocator);
        {
            let mut arena = PagedArena::new(16, &tracked).unwrap();
            for _ in 0..5 {
                arena.alloc(16).unwrap();
            }
            assert_eq!(tracked.acquisitions(), 5);

            arena.hard_reset();
            assert_eq!(tracked.releases(), 4);
        }
        assert!(!tracked.has_leaks());
    }

    #[test]
    fn test_views_stay_valid_across_growth() {
        let arena = arena(8);
        let mut first = arena.alloc(8).unwrap();
        first.copy_from_slice(b"first!!!");

        for _ in 0..32 {
            arena.alloc(8).unwrap().fill(0xEE);
        }
        assert_eq!(&*first, b"first!!!");
    }
}
