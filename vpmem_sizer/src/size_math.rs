//! Power-of-two rounding and the HPT size formula.
//!
//! Sizing buckets snap at the quarter breakpoint: a value more than 25%
//! past a power of two is treated as the next power of two, anything at or
//! below the breakpoint stays in the lower bucket.

use vpmem::consts::MIN_HPT_SIZE;

/// Largest power of two that is `<= n`. Zero for zero.
#[inline]
pub const fn lower_power_of_two(n: u64) -> u64 {
    if n == 0 { 0 } else { 1 << (u64::BITS - 1 - n.leading_zeros()) }
}

/// Whether `n` lies strictly past the quarter breakpoint above `lower`.
#[inline]
pub(crate) const fn past_quarter_breakpoint(n: u64, lower: u64) -> bool {
    4 * (n as u128) > 5 * (lower as u128)
}

/// Round `n` to its sizing bucket.
///
/// Returns the power of two below `n` unless `4n > 5p`, in which case the
/// next power of two is returned. Exact powers of two map to themselves.
/// Values past the breakpoint above `2^63` saturate at `u64::MAX`.
pub const fn round_up_pow2_quarter(n: u64) -> u64 {
    let lower = lower_power_of_two(n);
    if past_quarter_breakpoint(n, lower) {
        lower.saturating_mul(2)
    } else {
        lower
    }
}

/// Smallest power of two `>= n`, or `None` past `2^63`.
#[inline]
pub const fn round_up_pow2(n: u64) -> Option<u64> {
    n.checked_next_power_of_two()
}

/// HPT size needed for `total_memory_size` at `1 / 2^hpt_ratio`.
///
/// Never returns less than [`MIN_HPT_SIZE`].
pub const fn compute_hpt_size(total_memory_size: u64, hpt_ratio: u32) -> u64 {
    let bucket = round_up_pow2_quarter(total_memory_size);
    let scaled = match bucket.checked_shr(hpt_ratio) {
        Some(v) => v,
        None => 0,
    };
    if scaled > MIN_HPT_SIZE { scaled } else { MIN_HPT_SIZE }
}
