//! Raw host-allocated regions
//!
//! [`RawRegion`] is the unit every arena is built from: a FixedArena owns
//! one, each page of a PagedArena owns one, and each block of a ChainArena
//! is one. The region releases itself on drop.

use core::ptr::NonNull;

use crate::allocator::HostAllocator;
use crate::error::ArenaResult;
use crate::view::MemView;

/// Contiguous byte region obtained from a [`HostAllocator`]
pub(crate) struct RawRegion<A: HostAllocator> {
    allocator: A,
    ptr: NonNull<u8>,
    len: usize,
}

// SAFETY: the region exclusively owns its bytes; moving it to another
// thread is sound whenever its allocator handle can move too.
unsafe impl<A: HostAllocator + Send> Send for RawRegion<A> {}

impl<A: HostAllocator> RawRegion<A> {
    /// Acquire `len` zero-filled bytes
    pub(crate) fn acquire(allocator: A, len: usize) -> ArenaResult<Self> {
        let ptr = allocator.acquire(len)?.cast::<u8>();
        // SAFETY: `acquire` returned `len` writable bytes.
        unsafe { ptr.as_ptr().write_bytes(0, len) };
        Ok(Self {
            allocator,
            ptr,
            len,
        })
    }

    /// Acquire a region holding a copy of `bytes`
    pub(crate) fn copy_from(allocator: A, bytes: &[u8]) -> ArenaResult<Self> {
        let ptr = allocator.acquire(bytes.len())?.cast::<u8>();
        // SAFETY: fresh region of `bytes.len()` bytes, disjoint from `bytes`.
        unsafe {
            ptr.as_ptr()
                .copy_from_nonoverlapping(bytes.as_ptr(), bytes.len());
        }
        Ok(Self {
            allocator,
            ptr,
            len: bytes.len(),
        })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.allocator
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        // SAFETY: `len` initialized bytes owned by this region.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, with exclusive access through `&mut self`.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Hand out `[offset, offset + len)` as a view
    ///
    /// # Safety
    ///
    /// The span must lie inside the region, must not overlap any other live
    /// view, and the region must outlive `'a` without being accessed
    /// through `as_slice`/`as_mut_slice` meanwhile.
    #[inline]
    pub(crate) unsafe fn view<'a>(&self, offset: usize, len: usize) -> MemView<'a> {
        debug_assert!(offset + len <= self.len);
        // SAFETY: in bounds per the caller contract; offset == len is the
        // one-past-end address, valid for zero-length views.
        unsafe { MemView::from_raw_parts(self.ptr.add(offset), len) }
    }

    /// Duplicate the region, payload included, through `allocator`
    pub(crate) fn duplicate<B: HostAllocator>(&self, allocator: B) -> ArenaResult<RawRegion<B>> {
        RawRegion::copy_from(allocator, self.as_slice())
    }
}

impl<A: HostAllocator> Drop for RawRegion<A> {
    fn drop(&mut self) {
        // SAFETY: `ptr`/`len` came from `self.allocator.acquire(len)` and
        // the region is never used again.
        unsafe { self.allocator.release(self.ptr, self.len) }
    }
}
