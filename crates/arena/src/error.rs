//! Error types for arena operations
//!
//! Uses thiserror for clean, idiomatic Rust error definitions.
//!
//! Every fallible arena operation reports through [`ArenaResult`]. Failures
//! fall into two families:
//!
//! - **policy violations** ([`ArenaError::CapacityExceeded`],
//!   [`ArenaError::ChunkTooLarge`]): the arena refused the request by its own
//!   rules. Retrying the same request against the same arena state fails the
//!   same way.
//! - **host failures** ([`ArenaError::AllocationFailed`]): the injected
//!   [`HostAllocator`](crate::allocator::HostAllocator) could not supply
//!   memory. Arenas never retry these internally.
//!
//! No operation partially mutates arena state before returning an error.

use thiserror::Error;

#[cfg(feature = "logging")]
use tracing::error;

// ============================================================================
// Main Error Type
// ============================================================================

/// Arena allocation errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// The host allocator could not supply the requested region.
    #[error("host allocation failed: {size} bytes")]
    AllocationFailed {
        /// Size of the region that was requested from the host.
        size: usize,
    },

    /// A fixed arena does not have enough room left for the request.
    #[error("fixed arena capacity exceeded: requested {requested} bytes, {available} of {capacity} available")]
    CapacityExceeded {
        /// Bytes requested by the caller.
        requested: usize,
        /// Bytes left in the region at the time of the request.
        available: usize,
        /// Total size of the region.
        capacity: usize,
    },

    /// A paged arena request is larger than a single page.
    #[error("chunk of {requested} bytes exceeds page size {page_size}")]
    ChunkTooLarge {
        /// Bytes requested by the caller.
        requested: usize,
        /// Fixed page size of the arena.
        page_size: usize,
    },

    /// A chain arena block index is past the end of the chain.
    #[error("block index {index} out of range for chain of {count} blocks")]
    BlockOutOfRange {
        /// Requested block index.
        index: usize,
        /// Number of blocks in the chain.
        count: usize,
    },

    /// A construction parameter was rejected.
    #[error("invalid arena configuration: {reason}")]
    InvalidConfig {
        /// Human-readable explanation.
        reason: String,
    },
}

impl ArenaError {
    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AllocationFailed { .. } => "ARENA:ALLOC:FAILED",
            Self::CapacityExceeded { .. } => "ARENA:FIXED:CAPACITY",
            Self::ChunkTooLarge { .. } => "ARENA:PAGED:CHUNK",
            Self::BlockOutOfRange { .. } => "ARENA:CHAIN:INDEX",
            Self::InvalidConfig { .. } => "ARENA:CONFIG:INVALID",
        }
    }

    /// Whether the arena refused the request by its own sizing rules
    #[must_use]
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. } | Self::ChunkTooLarge { .. })
    }

    /// Whether the host allocator ran out of memory
    #[must_use]
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }

    // ========================================================================
    // Convenience Constructors
    // ========================================================================

    /// Create allocation failed error
    pub fn allocation_failed(size: usize) -> Self {
        #[cfg(feature = "logging")]
        error!(size, "host allocation failed");

        Self::AllocationFailed { size }
    }

    /// Create capacity exceeded error
    pub fn capacity_exceeded(requested: usize, available: usize, capacity: usize) -> Self {
        Self::CapacityExceeded {
            requested,
            available,
            capacity,
        }
    }

    /// Create chunk too large error
    pub fn chunk_too_large(requested: usize, page_size: usize) -> Self {
        Self::ChunkTooLarge {
            requested,
            page_size,
        }
    }

    /// Create block out of range error
    pub fn block_out_of_range(index: usize, count: usize) -> Self {
        Self::BlockOutOfRange { index, count }
    }

    /// Create invalid config error
    pub fn invalid_config(reason: &str) -> Self {
        Self::InvalidConfig {
            reason: reason.to_string(),
        }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result type for arena operations
pub type ArenaResult<T> = core::result::Result<T, ArenaError>;

// ============================================================================
// Tests
// ============================================================================
