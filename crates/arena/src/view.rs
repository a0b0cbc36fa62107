//! Non-owning memory views
//!
//! A [`MemView`] is an (address, length) pair over bytes owned by someone
//! else, usually an arena. The lifetime parameter ties it to the borrow of
//! its source, so a view can never outlive the memory it describes or
//! survive a reset.

use core::fmt;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use core::ptr::NonNull;
use core::slice;

/// Mutable, non-owning view over a span of bytes
///
/// Views handed out by one arena never overlap, so each can be written
/// independently while the others are alive.
pub struct MemView<'a> {
    ptr: NonNull<u8>,
    len: usize,
    _marker: PhantomData<&'a mut [u8]>,
}

impl<'a> MemView<'a> {
    /// Build a view from a raw span
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` initialized bytes
    /// for `'a`, and no other live reference or view may cover that span.
    #[inline]
    pub(crate) unsafe fn from_raw_parts(ptr: NonNull<u8>, len: usize) -> Self {
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// View over a caller-owned slice
    #[inline]
    pub fn from_slice(slice: &'a mut [u8]) -> Self {
        let len = slice.len();
        Self {
            ptr: NonNull::from(slice).cast(),
            len,
            _marker: PhantomData,
        }
    }

    /// Start address of the span
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: construction guarantees `len` valid, initialized bytes.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` makes this the only access path.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Give up the view and keep the underlying slice for `'a`
    #[inline]
    pub fn into_slice(self) -> &'a mut [u8] {
        // SAFETY: the view owned the unique borrow for `'a`.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Deref for MemView<'_> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl DerefMut for MemView<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl AsRef<[u8]> for MemView<'_> {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl AsMut<[u8]> for MemView<'_> {
    fn as_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl<'a> From<&'a mut [u8]> for MemView<'a> {
    fn from(slice: &'a mut [u8]) -> Self {
        Self::from_slice(slice)
    }
}

impl fmt::Debug for MemView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemView")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}
