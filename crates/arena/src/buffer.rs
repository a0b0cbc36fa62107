//! Owned, sized byte buffers
//!
//! [`OwnedBuffer`] exclusively owns its payload, allocated through a
//! [`HostAllocator`]. It is the owning counterpart of [`MemView`]:
//!
//! - [`OwnedBuffer::from_view`] allocates and copies
//! - [`OwnedBuffer::as_view`] borrows without copying
//!
//! Arenas never hand out owned buffers for their live allocations; turning a
//! view into one is the caller's choice.

use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::allocator::{HostAllocator, SystemAllocator};
use crate::arena::region::RawRegion;
use crate::error::ArenaResult;
use crate::view::MemView;

/// Heap buffer that owns exactly `len` bytes
pub struct OwnedBuffer<A: HostAllocator = SystemAllocator> {
    region: RawRegion<A>,
}

impl OwnedBuffer<SystemAllocator> {
    /// Copy `bytes` into a new buffer on the system allocator
    pub fn from_bytes(bytes: &[u8]) -> ArenaResult<Self> {
        Self::copy_in(bytes, SystemAllocator)
    }
}

impl<A: HostAllocator> OwnedBuffer<A> {
    /// Allocate `len` zeroed bytes
    pub fn zeroed(len: usize, allocator: A) -> ArenaResult<Self> {
        Ok(Self {
            region: RawRegion::acquire(allocator, len)?,
        })
    }

    /// Allocate a buffer and copy the view's bytes into it
    pub fn from_view(view: &MemView<'_>, allocator: A) -> ArenaResult<Self> {
        Self::copy_in(view.as_slice(), allocator)
    }

    /// Allocate a buffer and copy `bytes` into it
    pub fn copy_in(bytes: &[u8], allocator: A) -> ArenaResult<Self> {
        Ok(Self {
            region: RawRegion::copy_from(allocator, bytes)?,
        })
    }

    pub(crate) fn from_region(region: RawRegion<A>) -> Self {
        Self { region }
    }

    /// Borrow the payload as a view, without copying
    pub fn as_view(&mut self) -> MemView<'_> {
        MemView::from_slice(self.region.as_mut_slice())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.region.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.region.len() == 0
    }

    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.region.as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.region.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.region.as_mut_slice()
    }

    /// The allocator that owns the payload
    pub fn allocator(&self) -> &A {
        self.region.allocator()
    }
}

impl<A: HostAllocator + Clone> OwnedBuffer<A> {
    /// Deep copy through the same allocator
    pub fn try_clone(&self) -> ArenaResult<Self> {
        Ok(Self {
            region: self.region.duplicate(self.region.allocator().clone())?,
        })
    }
}

impl<A: HostAllocator> Deref for OwnedBuffer<A> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<A: HostAllocator> DerefMut for OwnedBuffer<A> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl<A: HostAllocator> AsRef<[u8]> for OwnedBuffer<A> {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl<A: HostAllocator> PartialEq for OwnedBuffer<A> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<A: HostAllocator> Eq for OwnedBuffer<A> {}

impl<A: HostAllocator> fmt::Debug for OwnedBuffer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedBuffer")
            .field("len", &self.len())
            .field("bytes", &self.as_slice())
            .finish()
    }
}
