//! Diagnostic traits for arenas
//!
//! The arena kinds are unrelated concrete types; this trait is only a
//! common reporting surface for monitoring code, not an allocation API.

/// Byte accounting an arena can report about itself
///
/// `available_memory` means bytes the next allocations can still get
/// without touching the host allocator. `None` marks an arena with no
/// such bound.
pub trait MemoryUsage {
    /// Bytes handed out since the last reset
    fn used_memory(&self) -> usize;

    /// Bytes still servable without growing, if bounded
    fn available_memory(&self) -> Option<usize>;

    /// `used + available`, when available is bounded
    fn total_memory(&self) -> Option<usize> {
        let available = self.available_memory()?;
        Some(self.used_memory() + available)
    }

    /// Fill level in percent; an arena with zero total reads as empty
    fn memory_usage_percent(&self) -> Option<f32> {
        let total = self.total_memory()?;
        if total == 0 {
            return Some(0.0);
        }
        Some(self.used_memory() as f32 * 100.0 / total as f32)
    }

    /// All of the above in one value
    fn memory_usage(&self) -> BasicMemoryUsage {
        BasicMemoryUsage {
            used: self.used_memory(),
            available: self.available_memory(),
            total: self.total_memory(),
            usage_percent: self.memory_usage_percent(),
        }
    }
}

/// Point-in-time report produced by [`MemoryUsage::memory_usage`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMemoryUsage {
    pub used: usize,
    pub available: Option<usize>,
    pub total: Option<usize>,
    pub usage_percent: Option<f32>,
}

impl core::fmt::Display for BasicMemoryUsage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "used: {} bytes", self.used)?;
        if let Some(total) = self.total {
            write!(f, ", total: {total} bytes")?;
        }
        if let Some(percent) = self.usage_percent {
            write!(f, " ({percent:.1}%)")?;
        }
        Ok(())
    }
}
