//! Region-based arena allocators
//!
//! This crate hands out byte spans from pre-acquired regions and reclaims
//! them in bulk, for callers that want predictable allocation with explicit
//! lifetimes (per frame, per request, per parse pass):
//!
//! - [`FixedArena`]: bump allocation over one region of fixed size
//! - [`PagedArena`]: bump allocation over equal-size pages, reused across
//!   soft resets and trimmed by hard resets
//! - [`ChainArena`]: one exactly-sized block per allocation, released
//!   together
//!
//! Arenas return [`MemView`]s that borrow the arena. [`OwnedBuffer`] is the
//! owning counterpart for bytes that must outlive a reset.
//!
//! Raw memory comes from a [`HostAllocator`](allocator::HostAllocator)
//! chosen per arena. [`SystemAllocator`](allocator::SystemAllocator) is the
//! usual choice; [`TrackedAllocator`](allocator::TrackedAllocator) and
//! [`LimitedAllocator`](allocator::LimitedAllocator) observe or restrict
//! another allocator.
//!
//! # Features
//!
//! - `logging` (default): emit `tracing` events for arena lifecycle,
//!   refused requests and host failures
//!
//! # Example
//!
//! ```rust
//! use strata_arena::prelude::*;
//!
//! fn main() -> ArenaResult<()> {
//!     let mut arena = FixedArena::new(kib(4), SystemAllocator)?;
//!
//!     let mut greeting = arena.alloc(5)?;
//!     greeting.copy_from_slice(b"hello");
//!     let kept = OwnedBuffer::from_view(&greeting, SystemAllocator)?;
//!
//!     arena.reset();
//!     assert_eq!(kept.as_slice(), b"hello");
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(unsafe_code)]

pub mod allocator;
pub mod arena;
pub mod buffer;
pub mod core;
pub mod error;
pub mod units;
pub mod view;

pub use crate::arena::{ChainArena, FixedArena, PagedArena};
pub use crate::buffer::OwnedBuffer;
pub use crate::error::{ArenaError, ArenaResult};
pub use crate::view::MemView;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commonly used items
pub mod prelude {
    pub use crate::allocator::{
        HostAllocator, LimitedAllocator, SystemAllocator, TrackedAllocator,
    };
    pub use crate::arena::{ArenaStats, ChainArena, FixedArena, PagedArena};
    pub use crate::buffer::OwnedBuffer;
    pub use crate::core::{ArenaConfig, MemoryUsage};
    pub use crate::error::{ArenaError, ArenaResult};
    pub use crate::units::{gib, kib, mib};
    pub use crate::view::MemView;
}
