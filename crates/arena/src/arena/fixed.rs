//! Fixed-capacity bump arena
//!
//! One region of `size` bytes and a cursor. Allocation moves the cursor
//! forward; nothing is ever freed individually.

use core::cell::Cell;
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

/// Bump allocator over a single pre-sized region
///
/// Invariant: `0 <= used() <= capacity()`. A request that does not fit is
/// refused with [`ArenaError::CapacityExceeded`] and leaves the cursor
/// where it was.
///
/// ```rust
/// use strata_arena::prelude::*;
///
/// let arena = FixedArena::new(10, SystemAllocator).unwrap();
/// arena.alloc(5).unwrap();
/// assert_eq!(arena.remaining_capacity(), 5);
///
/// assert!(arena.alloc(6).is_err());
/// assert_eq!(arena.remaining_capacity(), 5);
/// ```
pub struct FixedArena<A: HostAllocator = SystemAllocator> {
    region: RawRegion<A>,
    cursor: Cell<usize>,
    config: ArenaConfig,
    stats: ArenaStats,
}

impl<A: HostAllocator> FixedArena<A> {
    /// Create an arena over `size` bytes with the default config
    pub fn new(size: usize, allocator: A) -> ArenaResult<Self> {
        Self::with_config(size, allocator, ArenaConfig::default())
    }

    /// Create an arena over `size` bytes
    ///
    /// A zero size is accepted; every non-empty request on such an arena
    /// is refused.
    pub fn with_config(size: usize, allocator: A, config: ArenaConfig) -> ArenaResult<Self> {
        let region = RawRegion::acquire(allocator, size)?;

        #[cfg(feature = "logging")]
        debug!(size, "created fixed arena");

        let stats = ArenaStats::new();
        track(&config, &stats, ArenaStats::record_unit_acquired);

        Ok(Self {
            region,
            cursor: Cell::new(0),
            config,
            stats,
        })
    }

    /// Bump-allocate `n` bytes
    pub fn alloc(&self, n: usize) -> ArenaResult<MemView<'_>> {
        let cursor = self.cursor.get();
        let available = self.region.len() - cursor;
        if n > available {
            return Err(refuse(
                &self.config,
                &self.stats,
                ArenaError::capacity_exceeded(n, available, self.region.len()),
            ));
        }

        self.cursor.set(cursor + n);
        track(&self.config, &self.stats, |stats| stats.record_allocation(n));

        #[cfg(feature = "logging")]
        trace!(offset = cursor, size = n, "fixed alloc");

        // SAFETY: `[cursor, cursor + n)` is inside the region and past every
        // span handed out since the last reset, which needs `&mut self`.
        Ok(unsafe { self.region.view(cursor, n) })
    }

    /// Bytes left before the region is exhausted
    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        self.region.len() - self.cursor.get()
    }

    /// Size of the region
    #[inline]
    pub fn capacity(&self) -> usize {
        self.region.len()
    }

    /// Bytes handed out since the last reset
    #[inline]
    pub fn used(&self) -> usize {
        self.cursor.get()
    }

    /// Rewind the cursor to the start of the region
    ///
    /// Payload bytes are left as they are unless
    /// [`ArenaConfig::zero_on_reset`] is set.
    pub fn reset(&mut self) {
        if self.config.zero_on_reset {
            self.region.as_mut_slice().fill(0);
        }
        self.cursor.set(0);
        track(&self.config, &self.stats, ArenaStats::record_soft_reset);

        #[cfg(feature = "logging")]
        debug!(size = self.region.len(), "reset fixed arena");
    }

    /// The whole region, allocated or not
    pub fn region_bytes(&mut self) -> &mut [u8] {
        self.region.as_mut_slice()
    }

    pub fn stats(&self) -> &ArenaStats {
        &self.stats
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn allocator(&self) -> &A {
        self.region.allocator()
    }
}

impl<A: HostAllocator + Clone> FixedArena<A> {
    /// Deep-copy the arena
    ///
    /// The new arena gets its own region with every byte of this one
    /// (including bytes past the cursor) and the same cursor. Takes
    /// `&mut self` because the copy reads bytes currently lent out as views.
    pub fn try_clone(&mut self) -> ArenaResult<Self> {
        let region = self
            .region
            .duplicate(self.region.allocator().clone())
            .map_err(|err| refuse(&self.config, &self.stats, err))?;

        let stats = ArenaStats::new();
        track(&self.config, &stats, ArenaStats::record_unit_acquired);

        #[cfg(feature = "logging")]
        debug!(size = region.len(), cursor = self.cursor.get(), "cloned fixed arena");

        Ok(Self {
            region,
            cursor: Cell::new(self.cursor.get()),
            config: self.config.clone(),
            stats,
        })
    }
}

#[cfg(feature = "logging")]
impl<A: HostAllocator> Drop for FixedArena<A> {
    fn drop(&mut self) {
        debug!(size = self.region.len(), used = self.cursor.get(), "dropping fixed arena");
    }
}

impl<A: HostAllocator> MemoryUsage for FixedArena<A> {
    fn used_memory(&self) -> usize {
        self.used()
    }

    fn available_memory(&self) -> Option<usize> {
        Some(self.remaining_capacity())
    }
}

impl<A: HostAllocator> fmt::Debug for FixedArena<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedArena")
            .field("capacity", &self.capacity())
            .field("used", &self.used())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
