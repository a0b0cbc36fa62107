//! Budgeted allocator
//!
//! [`LimitedAllocator`] caps the number of live bytes an inner allocator may
//! hand out. Requests that would cross the limit fail with
//! [`ArenaError::AllocationFailed`], which makes host exhaustion easy to
//! reproduce deterministically.

use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};

use super::HostAllocator;
use crate::error::{ArenaError, ArenaResult};

/// Allocator wrapper with a fixed byte budget
#[derive(Debug)]
pub struct LimitedAllocator<A> {
    inner: A,
    limit: usize,
    used: AtomicUsize,
}

impl<A> LimitedAllocator<A> {
    /// Wrap `allocator` with a budget of `limit` live bytes
    pub const fn new(allocator: A, limit: usize) -> Self {
        Self {
            inner: allocator,
            limit,
            used: AtomicUsize::new(0),
        }
    }

    /// Budget in bytes
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes currently reserved against the budget
    pub fn used(&self) -> usize {
        self.used.load(Ordering::Relaxed)
    }

    /// Bytes still available under the budget
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.used())
    }

    /// Check if a request of `size` bytes would fit right now
    pub fn can_acquire(&self, size: usize) -> bool {
        size <= self.remaining()
    }

    fn reserve(&self, size: usize) -> bool {
        self.used
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                used.checked_add(size).filter(|next| *next <= self.limit)
            })
            .is_ok()
    }

    fn unreserve(&self, size: usize) {
        // Never underflow, even if release sizes are inconsistent.
        let _ = self
            .used
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                Some(used.saturating_sub(size))
            });
    }
}

// SAFETY: forwards to `A`; the budget only refuses requests.
unsafe impl<A: HostAllocator> HostAllocator for LimitedAllocator<A> {
    fn acquire(&self, size: usize) -> ArenaResult<NonNull<[u8]>> {
        if size == 0 {
            return self.inner.acquire(0);
        }
        if !self.reserve(size) {
            return Err(ArenaError::allocation_failed(size));
        }

        self.inner.acquire(size).inspect_err(|_| self.unreserve(size))
    }

    unsafe fn release(&self, ptr: NonNull<u8>, size: usize) {
        // SAFETY: caller upholds the release contract for `A`.
        unsafe { self.inner.release(ptr, size) };
        self.unreserve(size);
    }
}
