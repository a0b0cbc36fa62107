//! Size-unit helpers for arena construction parameters
//!
//! Binary units (`KIB`, `MIB`, ...) are powers of 1024, decimal units
//! (`KB`, `MB`, ...) are powers of 1000. The const fns multiply without
//! overflow checks, so they are meant for literal sizes:
//!
//! ```rust
//! use strata_arena::units::{kib, KIB, MB};
//!
//! assert_eq!(kib(4), 4 * KIB);
//! assert_eq!(MB, 1_000_000);
//! ```

/// One kibibyte
pub const KIB: usize = 1024;
/// One mebibyte
pub const MIB: usize = KIB * 1024;
/// One gibibyte
pub const GIB: usize = MIB * 1024;
/// One tebibyte
#[cfg(target_pointer_width = "64")]
pub const TIB: usize = GIB * 1024;

/// One kilobyte
pub const KB: usize = 1000;
/// One megabyte
pub const MB: usize = KB * 1000;
/// One gigabyte
pub const GB: usize = MB * 1000;
/// One terabyte
#[cfg(target_pointer_width = "64")]
pub const TB: usize = GB * 1000;

/// `n` kibibytes
#[inline]
pub const fn kib(n: usize) -> usize {
    n * KIB
}

/// `n` mebibytes
#[inline]
pub const fn mib(n: usize) -> usize {
    n * MIB
}

/// `n` gibibytes
#[inline]
pub const fn gib(n: usize) -> usize {
    n * GIB
}

/// `n` kilobytes
#[inline]
pub const fn kb(n: usize) -> usize {
    n * KB
}

/// `n` megabytes
#[inline]
pub const fn mb(n: usize) -> usize {
    n * MB
}

/// `n` gigabytes
#[inline]
pub const fn gb(n: usize) -> usize {
    n * GB
}
