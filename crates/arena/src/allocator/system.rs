//! System allocator implementation
//!
//! Delegates to `std::alloc::System` with an alignment of one byte, which is
//! all the arenas promise to their callers.

use core::alloc::{GlobalAlloc, Layout};
use core::ptr::NonNull;
use std::alloc::System;

use super::HostAllocator;
use crate::error::{ArenaError, ArenaResult};

/// Wrapper for the system's default allocator
///
/// Stateless and `Copy`, so every arena can hold its own handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl SystemAllocator {
    /// Creates a new SystemAllocator
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    fn layout(size: usize) -> ArenaResult<Layout> {
        Layout::from_size_align(size, 1).map_err(|_| ArenaError::allocation_failed(size))
    }
}

// SAFETY: regions come straight from `System` with a matching layout, and
// zero-sized requests never reach it.
unsafe impl HostAllocator for SystemAllocator {
    #[inline]
    fn acquire(&self, size: usize) -> ArenaResult<NonNull<[u8]>> {
        if size == 0 {
            return Ok(NonNull::slice_from_raw_parts(NonNull::dangling(), 0));
        }

        let layout = Self::layout(size)?;
        // SAFETY: layout has non-zero size.
        let raw = unsafe { System.alloc(layout) };
        NonNull::new(raw)
            .map(|ptr| NonNull::slice_from_raw_parts(ptr, size))
            .ok_or_else(|| ArenaError::allocation_failed(size))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, size: usize) {
        if size == 0 {
            return;
        }
        // `acquire` already validated this size, so the layout is valid.
        if let Ok(layout) = Self::layout(size) {
            // SAFETY: caller guarantees `ptr` came from `acquire(size)`.
            unsafe { System.dealloc(ptr.as_ptr(), layout) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_release() {
        let alloc = SystemAllocator::new();
        let region = alloc.acquire(64).unwrap();
        assert_eq!(region.len(), 64);

        let ptr = region.cast::<u8>();
        unsafe {
            ptr.as_ptr().write_bytes(0xAB, 64);
            assert_eq!(*ptr.as_ptr().add(63), 0xAB);
            alloc.release(ptr, 64);
        }
    }

    #[test]
    fn test_zero_sized() {
        let alloc = SystemAllocator;
        let region = alloc.acquire(0).unwrap();
        assert_eq!(region.len(), 0);
        unsafe { alloc.release(region.cast(), 0) };
    }

    #[test]
    fn test_oversized_request_fails() {
        let err = SystemAllocator.acquire(usize::MAX).unwrap_err();
        assert!(err.is_allocation_failure());
    }
}
