//! Tracked allocator implementation
//!
//! Wraps another [`HostAllocator`] and records every acquire and release.
//! Useful for asserting that arena teardown returns everything it took.
//!
//! ## Invariants
//!
//! - Every successful acquisition is counted and adds to `live_bytes`
//! - Every release subtracts from `live_bytes`
//! - Failed acquisitions only bump the failure counter

use core::fmt;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "logging")]
use tracing::trace;

use super::HostAllocator;
use crate::error::ArenaResult;

/// A wrapper allocator that tracks host-level usage
///
/// Counters are atomic so one tracker can be shared by reference across
/// several arenas, including arenas living on different threads.
#[derive(Debug, Default)]
pub struct TrackedAllocator<A> {
    inner: A,
    acquisitions: AtomicUsize,
    releases: AtomicUsize,
    failed: AtomicUsize,
    live_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,
    total_bytes: AtomicUsize,
}

/// Point-in-time copy of a [`TrackedAllocator`]'s counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackedStats {
    /// Successful acquisitions
    pub acquisitions: usize,
    /// Releases
    pub releases: usize,
    /// Acquisitions refused by the inner allocator
    pub failed: usize,
    /// Bytes acquired and not yet released
    pub live_bytes: usize,
    /// High-water mark of `live_bytes`
    pub peak_bytes: usize,
    /// Bytes ever acquired
    pub total_bytes: usize,
}

impl TrackedStats {
    /// Regions acquired and not yet released
    #[must_use]
    pub const fn outstanding(&self) -> usize {
        self.acquisitions.saturating_sub(self.releases)
    }
}

impl fmt::Display for TrackedStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Host allocations:")?;
        writeln!(f, "  Acquisitions: {}", self.acquisitions)?;
        writeln!(f, "  Releases: {}", self.releases)?;
        writeln!(f, "  Failed: {}", self.failed)?;
        writeln!(f, "  Live: {} bytes", self.live_bytes)?;
        writeln!(f, "  Peak: {} bytes", self.peak_bytes)?;
        write!(f, "  Total: {} bytes", self.total_bytes)
    }
}

impl<A> TrackedAllocator<A> {
    /// Creates a new TrackedAllocator wrapping the provided allocator
    pub const fn new(allocator: A) -> Self {
        Self {
            inner: allocator,
            acquisitions: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            live_bytes: AtomicUsize::new(0),
            peak_bytes: AtomicUsize::new(0),
            total_bytes: AtomicUsize::new(0),
        }
    }

    /// Gets a reference to the underlying allocator
    pub const fn inner(&self) -> &A {
        &self.inner
    }

    /// Consumes the tracker and returns the underlying allocator
    pub fn into_inner(self) -> A {
        self.inner
    }

    /// Bytes currently acquired and not released
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.load(Ordering::Relaxed)
    }

    /// Number of successful acquisitions
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::Relaxed)
    }

    /// Number of releases
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::Relaxed)
    }

    /// Get a consistent-enough snapshot of all counters
    pub fn snapshot(&self) -> TrackedStats {
        TrackedStats {
            acquisitions: self.acquisitions.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            live_bytes: self.live_bytes.load(Ordering::Relaxed),
            peak_bytes: self.peak_bytes.load(Ordering::Relaxed),
            total_bytes: self.total_bytes.load(Ordering::Relaxed),
        }
    }

    /// Check if any acquired region was never released
    pub fn has_leaks(&self) -> bool {
        self.snapshot().outstanding() > 0
    }

    fn record_acquire(&self, size: usize) {
        self.acquisitions.fetch_add(1, Ordering::Relaxed);
        self.total_bytes.fetch_add(size, Ordering::Relaxed);
        let live = self.live_bytes.fetch_add(size, Ordering::Relaxed) + size;
        self.peak_bytes.fetch_max(live, Ordering::Relaxed);
    }

    fn record_release(&self, size: usize) {
        self.releases.fetch_add(1, Ordering::Relaxed);
        self.live_bytes.fetch_sub(size, Ordering::Relaxed);
    }
}

// SAFETY: forwards to `A`; bookkeeping has no effect on the regions.
unsafe impl<A: HostAllocator> HostAllocator for TrackedAllocator<A> {
    fn acquire(&self, size: usize) -> ArenaResult<NonNull<[u8]>> {
        match self.inner.acquire(size) {
            Ok(region) => {
                self.record_acquire(size);
                #[cfg(feature = "logging")]
                {
                    let ptr = region.cast::<u8>();
                    trace!(size, ?ptr, "host acquire");
                }
                Ok(region)
            }
            Err(err) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                Err(err)
            }
        }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, size: usize) {
        #[cfg(feature = "logging")]
        trace!(size, ?ptr, "host release");

        // SAFETY: caller upholds the release contract for `A`.
        unsafe { self.inner.release(ptr, size) };
        self.record_release(size);
    }
}
