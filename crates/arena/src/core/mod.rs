//! Core functionality for strata-arena
//!
//! This module contains the building blocks shared by every arena:
//! - Configuration structures
//! - Diagnostic traits for memory usage

pub mod config;
pub mod traits;

// Re-export commonly used items
pub use config::ArenaConfig;
pub use traits::{BasicMemoryUsage, MemoryUsage};
