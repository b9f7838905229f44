//! Maximum memory growth along quarter breakpoints.
//!
//! Once the ratio floor is reached, the only way to enlarge the HPT is to
//! declare a larger maximum memory size. Each step lands on the next
//! `5/4 * 2^k` breakpoint; a value sitting exactly on one is nudged past
//! it by [`GROWTH_NUDGE`], since the HPT formula keeps the breakpoint
//! itself in the lower bucket.

use crate::error::{SizingError, SizingResult};
use crate::size_math::{compute_hpt_size, lower_power_of_two};
use tracing::debug;
use vpmem::consts::{GROWTH_NUDGE, MAX_MEMORY_SIZE};

/// Result of the growth search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Growth {
    /// Converged maximum memory size.
    pub max_memory_size: u64,
    /// HPT size at `max_memory_size`.
    pub actual_hpt_size: u64,
    /// Number of growth steps taken.
    pub steps: u32,
}

/// Single growth step from `size`.
///
/// # Errors
///
/// `GrowthStalled` if the step would not increase `size` (only below 4
/// bytes, where `5/4` of the power of two truncates back to it).
pub fn next_breakpoint(size: u64) -> SizingResult<u64> {
    let lower = lower_power_of_two(size);
    let quadruple = 4 * u128::from(size);
    let breakpoint = 5 * u128::from(lower);

    let next = if quadruple < breakpoint {
        breakpoint / 4
    } else if quadruple == breakpoint {
        u128::from(size) + u128::from(GROWTH_NUDGE)
    } else {
        5 * 2 * u128::from(lower) / 4
    };

    let next = u64::try_from(next).map_err(|_| SizingError::AddressSpaceOverflow {
        what: "maximum memory size",
    })?;
    if next <= size {
        return Err(SizingError::GrowthStalled { size });
    }
    Ok(next)
}

/// Grow `max_memory_size` until the HPT at `hpt_ratio` reaches `target`.
///
/// # Errors
///
/// - `ZeroMemory` for a zero starting size
/// - `GrowthCeiling` if the size would pass [`MAX_MEMORY_SIZE`]
/// - `GrowthStalled` if a step fails to advance
pub fn grow_max_memory(max_memory_size: u64, hpt_ratio: u32, target: u64) -> SizingResult<Growth> {
    grow_max_memory_with_ceiling(max_memory_size, hpt_ratio, target, MAX_MEMORY_SIZE)
}

/// [`grow_max_memory`] with an explicit ceiling.
pub fn grow_max_memory_with_ceiling(
    max_memory_size: u64,
    hpt_ratio: u32,
    target: u64,
    ceiling: u64,
) -> SizingResult<Growth> {
    if max_memory_size == 0 {
        return Err(SizingError::ZeroMemory);
    }

    let mut size = max_memory_size;
    let mut actual_hpt_size = compute_hpt_size(size, hpt_ratio);
    let mut steps = 0;

    while actual_hpt_size < target {
        let next = next_breakpoint(size)?;
        if next > ceiling {
            return Err(SizingError::GrowthCeiling {
                size: next,
                ceiling,
            });
        }
        size = next;
        steps += 1;
        actual_hpt_size = compute_hpt_size(size, hpt_ratio);
        debug!(
            max_memory_size = size,
            actual_hpt_size, target, steps, "memory growth step"
        );
    }

    Ok(Growth {
        max_memory_size: size,
        actual_hpt_size,
        steps,
    })
}
