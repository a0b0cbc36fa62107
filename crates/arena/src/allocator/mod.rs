//! Host allocation primitives
//!
//! Every arena is generic over a [`HostAllocator`]. [`SystemAllocator`] is the
//! default; [`TrackedAllocator`] and [`LimitedAllocator`] wrap another
//! allocator to observe or restrict it.
//!
//! `HostAllocator` is implemented for `&A`, so one instrumented allocator can
//! back several arenas at once:
//!
//! ```rust
//! use strata_arena::allocator::{SystemAllocator, TrackedAllocator};
//! use strata_arena::arena::{ChainArena, FixedArena};
//!
//! let tracked = TrackedAllocator::new(SystemAllocator);
//! {
//!     let fixed = FixedArena::new(64, &tracked).unwrap();
//!     let chain = ChainArena::new(&tracked);
//!     fixed.alloc(8).unwrap();
//!     chain.alloc(8).unwrap();
//! }
//! assert!(!tracked.has_leaks());
//! ```

mod limited;
mod system;
mod tracked;
mod traits;

pub use limited::LimitedAllocator;
pub use system::SystemAllocator;
pub use tracked::{TrackedAllocator, TrackedStats};
pub use traits::HostAllocator;
