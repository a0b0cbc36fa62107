//! Configuration for strata arenas
//!
//! Sizing parameters (`size`, `page_size`) are passed to the arena
//! constructors directly because they are immutable for the arena's
//! lifetime. [`ArenaConfig`] carries the behavioural switches that every
//! arena kind understands.

use crate::error::{ArenaError, ArenaResult};

#[cfg(feature = "logging")]
use tracing::debug;

/// Behavioural switches shared by all arena kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Record allocation / reset / unit counters in [`ArenaStats`](crate::arena::ArenaStats)
    pub track_stats: bool,
    /// Zero page / region bytes on reset instead of leaving stale data
    pub zero_on_reset: bool,
    /// Emit a warning when an allocation is refused by arena policy
    pub log_failures: bool,
}

impl ArenaConfig {
    /// Creates new config with default values
    pub fn new() -> Self {
        Self {
            track_stats: cfg!(debug_assertions),
            zero_on_reset: false,
            log_failures: true,
        }
    }

    /// Production configuration - no counters, no zeroing, quiet refusals
    pub fn production() -> Self {
        Self {
            track_stats: false,
            zero_on_reset: false,
            log_failures: false,
        }
    }

    /// Debug configuration - full counters, scrubbed resets, loud refusals
    pub fn debug() -> Self {
        Self {
            track_stats: true,
            zero_on_reset: true,
            log_failures: true,
        }
    }

    /// Set statistics tracking
    #[must_use = "builder methods must be chained or built"]
    pub fn with_track_stats(mut self, track_stats: bool) -> Self {
        self.track_stats = track_stats;
        self
    }

    /// Set zeroing on reset
    #[must_use = "builder methods must be chained or built"]
    pub fn with_zero_on_reset(mut self, zero_on_reset: bool) -> Self {
        self.zero_on_reset = zero_on_reset;
        self
    }

    /// Set logging of refused allocations
    #[must_use = "builder methods must be chained or built"]
    pub fn with_log_failures(mut self, log_failures: bool) -> Self {
        self.log_failures = log_failures;
        self
    }

    /// Validate a page size for a paged arena
    ///
    /// A zero page size would make every non-empty request fail and leave
    /// the utilization metric undefined, so it is rejected up front.
    pub fn validate_page_size(page_size: usize) -> ArenaResult<()> {
        #[cfg(feature = "logging")]
        debug!(page_size, "validating page size");

        if page_size == 0 {
            return Err(ArenaError::invalid_config("page size must be non-zero"));
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let prod = ArenaConfig::production();
        assert!(!prod.track_stats);
        assert!(!prod.zero_on_reset);
        assert!(!prod.log_failures);

        let debug = ArenaConfig::debug();
        assert!(debug.track_stats);
        assert!(debug.zero_on_reset);
        assert!(debug.log_failures);
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(ArenaConfig::default(), ArenaConfig::new());
        assert_eq!(ArenaConfig::new().track_stats, cfg!(debug_assertions));
    }

    #[test]
    fn test_builders() {
        let config = ArenaConfig::production()
            .with_track_stats(true)
            .with_zero_on_reset(true)
            .with_log_failures(true);
        assert_eq!(config, ArenaConfig::debug());
    }

    #[test]
    fn test_validate_page_size() {
        assert!(ArenaConfig::validate_page_size(1).is_ok());
        let err = ArenaConfig::validate_page_size(0).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfig { .. }));
    }
}
