//! Statistics tracking for arenas
//!
//! Arenas are single-threaded, so counters are plain [`Cell`]s. They are
//! only updated when [`ArenaConfig::track_stats`](crate::core::ArenaConfig)
//! is set.

use core::cell::Cell;
use core::fmt;

/// Live counters owned by an arena
#[derive(Debug, Default)]
pub struct ArenaStats {
    // Allocation statistics
    allocations: Cell<u64>,
    failed_allocations: Cell<u64>,
    bytes_allocated: Cell<usize>,
    bytes_wasted: Cell<usize>,

    // Reset statistics
    soft_resets: Cell<u64>,
    hard_resets: Cell<u64>,

    // Unit (region / page / block) statistics
    units_acquired: Cell<usize>,
    units_released: Cell<usize>,
    peak_units: Cell<usize>,
}

impl ArenaStats {
    /// Creates a new ArenaStats instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocations(&self) -> u64 {
        self.allocations.get()
    }

    pub fn failed_allocations(&self) -> u64 {
        self.failed_allocations.get()
    }

    pub fn bytes_allocated(&self) -> usize {
        self.bytes_allocated.get()
    }

    /// Bytes left behind at the end of a page when the tail advanced
    pub fn bytes_wasted(&self) -> usize {
        self.bytes_wasted.get()
    }

    pub fn soft_resets(&self) -> u64 {
        self.soft_resets.get()
    }

    pub fn hard_resets(&self) -> u64 {
        self.hard_resets.get()
    }

    pub fn units_acquired(&self) -> usize {
        self.units_acquired.get()
    }

    pub fn units_released(&self) -> usize {
        self.units_released.get()
    }

    /// Units acquired and not yet released
    pub fn current_units(&self) -> usize {
        self.units_acquired().saturating_sub(self.units_released())
    }

    pub fn peak_units(&self) -> usize {
        self.peak_units.get()
    }

    /// Calculates average allocation size in bytes
    pub fn average_allocation_size(&self) -> f64 {
        match self.allocations() {
            0 => 0.0,
            n => self.bytes_allocated() as f64 / n as f64,
        }
    }

    // Internal update methods
    pub(crate) fn record_allocation(&self, bytes: usize) {
        bump(&self.allocations);
        self.bytes_allocated
            .set(self.bytes_allocated.get().saturating_add(bytes));
    }

    pub(crate) fn record_failure(&self) {
        bump(&self.failed_allocations);
    }

    pub(crate) fn record_waste(&self, bytes: usize) {
        self.bytes_wasted
            .set(self.bytes_wasted.get().saturating_add(bytes));
    }

    pub(crate) fn record_unit_acquired(&self) {
        self.units_acquired.set(self.units_acquired.get() + 1);
        self.peak_units
            .set(self.peak_units.get().max(self.current_units()));
    }

    pub(crate) fn record_units_released(&self, count: usize) {
        self.units_released.set(self.units_released.get() + count);
    }

    pub(crate) fn record_soft_reset(&self) {
        bump(&self.soft_resets);
    }

    pub(crate) fn record_hard_reset(&self) {
        bump(&self.hard_resets);
    }

    /// Creates a snapshot of current statistics
    pub fn snapshot(&self) -> ArenaStatsSnapshot {
        ArenaStatsSnapshot {
            allocations: self.allocations(),
            failed_allocations: self.failed_allocations(),
            bytes_allocated: self.bytes_allocated(),
            bytes_wasted: self.bytes_wasted(),
            soft_resets: self.soft_resets(),
            hard_resets: self.hard_resets(),
            units_acquired: self.units_acquired(),
            units_released: self.units_released(),
            current_units: self.current_units(),
            peak_units: self.peak_units(),
        }
    }
}

fn bump(counter: &Cell<u64>) {
    counter.set(counter.get().saturating_add(1));
}

/// Immutable snapshot of arena statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStatsSnapshot {
    pub allocations: u64,
    pub failed_allocations: u64,
    pub bytes_allocated: usize,
    pub bytes_wasted: usize,
    pub soft_resets: u64,
    pub hard_resets: u64,
    pub units_acquired: usize,
    pub units_released: usize,
    pub current_units: usize,
    pub peak_units: usize,
}

impl fmt::Display for ArenaStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Arena Statistics:")?;
        writeln!(f, "  Allocations:")?;
        writeln!(f, "    Count: {}", self.allocations)?;
        writeln!(f, "    Failed: {}", self.failed_allocations)?;
        writeln!(f, "    Bytes: {}", self.bytes_allocated)?;
        writeln!(f, "    Wasted: {} bytes", self.bytes_wasted)?;
        writeln!(f, "  Resets:")?;
        writeln!(f, "    Soft: {}", self.soft_resets)?;
        writeln!(f, "    Hard: {}", self.hard_resets)?;
        writeln!(f, "  Units:")?;
        writeln!(f, "    Acquired: {}", self.units_acquired)?;
        writeln!(f, "    Released: {}", self.units_released)?;
        writeln!(f, "    Current: {}", self.current_units)?;
        write!(f, "    Peak: {}", self.peak_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_counters() {
        let stats = ArenaStats::new();
        stats.record_allocation(10);
        stats.record_allocation(30);
        stats.record_failure();

        assert_eq!(stats.allocations(), 2);
        assert_eq!(stats.failed_allocations(), 1);
        assert_eq!(stats.bytes_allocated(), 40);
        assert!((stats.average_allocation_size() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unit_peak() {
        let stats = ArenaStats::new();
        stats.record_unit_acquired();
        stats.record_unit_acquired();
        stats.record_unit_acquired();
        stats.record_units_released(2);
        stats.record_unit_acquired();

        assert_eq!(stats.current_units(), 2);
        assert_eq!(stats.peak_units(), 3);
    }

    #[test]
    fn test_snapshot_display() {
        let stats = ArenaStats::new();
        stats.record_soft_reset();
        stats.record_hard_reset();
        stats.record_waste(7);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.soft_resets, 1);
        assert_eq!(snapshot.hard_resets, 1);

        let text = snapshot.to_string();
        assert!(text.contains("Soft: 1"));
        assert!(text.contains("Wasted: 7 bytes"));
    }

    #[test]
    fn test_empty_average() {
        assert_eq!(ArenaStats::new().average_allocation_size(), 0.0);
    }
}
