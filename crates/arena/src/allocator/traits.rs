//! The host allocation primitive
//!
//! Arenas never call the global allocator directly. Every region they own is
//! obtained from a [`HostAllocator`] supplied at construction, so swapping
//! the allocator changes where raw bytes come from without changing any
//! arena semantics.

use core::ptr::NonNull;

use crate::error::ArenaResult;

/// Source of raw, byte-aligned memory regions
///
/// # Safety
///
/// Implementors must guarantee that:
/// - a successful `acquire(size)` returns a pointer valid for reads and
///   writes of exactly `size` bytes, not aliased by any other live region
/// - the region stays valid until it is passed back to `release` with the
///   same size
/// - `acquire(0)` returns a dangling, non-null pointer and `release` of a
///   zero-sized region is a no-op
pub unsafe trait HostAllocator {
    /// Acquire a region of exactly `size` bytes
    ///
    /// The returned slice pointer has length `size`. Contents are
    /// unspecified; callers that expose the bytes must initialize them.
    fn acquire(&self, size: usize) -> ArenaResult<NonNull<[u8]>>;

    /// Return a region previously obtained from [`acquire`](Self::acquire)
    ///
    /// # Safety
    ///
    /// - `ptr` must come from `acquire` on this allocator (or one that
    ///   shares its backing store) called with `size`
    /// - the region must not be used after this call
    unsafe fn release(&self, ptr: NonNull<u8>, size: usize);
}

// SAFETY: forwards both methods to `A` unchanged.
unsafe impl<A: HostAllocator + ?Sized> HostAllocator for &A {
    #[inline]
    fn acquire(&self, size: usize) -> ArenaResult<NonNull<[u8]>> {
        (**self).acquire(size)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, size: usize) {
        // SAFETY: caller upholds the contract of `A::release`.
        unsafe { (**self).release(ptr, size) }
    }
}
