//! Region-based arenas
//!
//! Three independent strategies, each a concrete type with its own
//! operation set:
//!
//! - [`FixedArena`]: bump allocation over one pre-sized region
//! - [`PagedArena`]: bump allocation over a chain of equal-size pages that
//!   survive soft resets
//! - [`ChainArena`]: one exactly-sized block per allocation, released in bulk
//!
//! All three hand out [`MemView`](crate::MemView)s from `&self`. Anything
//! that rewinds or exposes whole regions takes `&mut self`, so no view can
//! outlive a reset.
//!
//! # Examples
//!
//! ```rust
//! use strata_arena::prelude::*;
//!
//! let mut arena = PagedArena::new(64, SystemAllocator).unwrap();
//! let mut header = arena.alloc(16).unwrap();
//! header.copy_from_slice(&[0xFF; 16]);
//! assert_eq!(arena.page_count(), 1);
//!
//! arena.reset();
//! assert_eq!(arena.average_utilization(), 0.0);
//! ```

mod chain;
mod fixed;
mod paged;
pub(crate) mod region;
mod stats;

pub use chain::ChainArena;
pub use fixed::FixedArena;
pub use paged::PagedArena;
pub use stats::{ArenaStats, ArenaStatsSnapshot};

#[cfg(feature = "logging")]
use tracing::warn;

use crate::core::ArenaConfig;
use crate::error::ArenaError;

/// Run `record` against `stats` when the config enables tracking
#[inline]
pub(crate) fn track(config: &ArenaConfig, stats: &ArenaStats, record: impl FnOnce(&ArenaStats)) {
    if config.track_stats {
        record(stats);
    }
}

/// Account for a refused or failed allocation and hand the error back
pub(crate) fn refuse(config: &ArenaConfig, stats: &ArenaStats, error: ArenaError) -> ArenaError {
    track(config, stats, ArenaStats::record_failure);

    #[cfg(feature = "logging")]
    if config.log_failures && error.is_policy_violation() {
        warn!(code = error.code(), "{error}");
    }

    error
}
