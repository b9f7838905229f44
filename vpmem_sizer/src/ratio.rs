//! HPT/PPT ratio pair and the ratio reduction search.
//!
//! The HPT ratio is `1 / 2^hpt`, the PPT ratio `1 / (64 * 2^ppt)`. Both
//! exponents move together: [`RatioPair`] exposes no way to change one
//! without the other.

use crate::size_math::compute_hpt_size;
use serde::Serialize;
use std::fmt;
use tracing::debug;
use vpmem::consts::{HPT_RATIO_FLOOR, PPT_RATIO_SCALE};
use vpmem::partition::PartitionKind;

/// Lockstep HPT and PPT ratio exponents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatioPair {
    hpt: u32,
    ppt: u32,
}

impl RatioPair {
    /// Build a pair from explicit exponents.
    ///
    /// The pair can only step down while both exponents stay non-negative,
    /// so `ppt` should be at least `hpt - floor` for the search to reach
    /// the floor. [`RatioPair::for_partition`] always satisfies this.
    pub const fn new(hpt: u32, ppt: u32) -> Self {
        Self { hpt, ppt }
    }

    /// Starting ratios for a partition family.
    pub const fn for_partition(kind: PartitionKind) -> Self {
        Self::new(kind.initial_hpt_ratio(), kind.initial_ppt_ratio())
    }

    /// HPT ratio exponent.
    #[inline]
    pub const fn hpt(&self) -> u32 {
        self.hpt
    }

    /// PPT ratio exponent.
    #[inline]
    pub const fn ppt(&self) -> u32 {
        self.ppt
    }

    /// Denominator of the HPT ratio (`2^hpt`).
    pub const fn hpt_denominator(&self) -> u64 {
        1 << self.hpt
    }

    /// Denominator of the PPT ratio (`64 * 2^ppt`).
    pub const fn ppt_denominator(&self) -> u64 {
        PPT_RATIO_SCALE << self.ppt
    }

    /// Next finer-grained pair, or `None` once the HPT exponent is at `floor`
    /// or the PPT exponent is already zero.
    pub const fn step_down(self, floor: u32) -> Option<Self> {
        if self.hpt > floor && self.ppt > 0 {
            Some(Self::new(self.hpt - 1, self.ppt - 1))
        } else {
            None
        }
    }
}

impl fmt::Display for RatioPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HPT 1/{} PPT 1/{}",
            self.hpt_denominator(),
            self.ppt_denominator()
        )
    }
}

/// Where the ratio search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioSearch {
    /// Ratios reached.
    pub ratios: RatioPair,
    /// HPT size at `ratios` for the unchanged memory size.
    pub actual_hpt_size: u64,
}

impl RatioSearch {
    /// Whether the HPT reached `target` without touching memory.
    pub const fn meets(&self, target: u64) -> bool {
        self.actual_hpt_size >= target
    }
}

/// Lower the ratio pair one step at a time until the HPT for
/// `memory_size` reaches `target`, stopping at [`HPT_RATIO_FLOOR`].
pub fn search_ratios(memory_size: u64, initial: RatioPair, target: u64) -> RatioSearch {
    search_ratios_with_floor(memory_size, initial, target, HPT_RATIO_FLOOR)
}

/// [`search_ratios`] with an explicit floor.
pub fn search_ratios_with_floor(
    memory_size: u64,
    initial: RatioPair,
    target: u64,
    floor: u32,
) -> RatioSearch {
    let mut ratios = initial;
    let mut actual_hpt_size = compute_hpt_size(memory_size, ratios.hpt());

    while actual_hpt_size < target {
        let Some(next) = ratios.step_down(floor) else {
            break;
        };
        ratios = next;
        actual_hpt_size = compute_hpt_size(memory_size, ratios.hpt());
        debug!(
            hpt_ratio = ratios.hpt(),
            ppt_ratio = ratios.ppt(),
            actual_hpt_size,
            target,
            "ratio step"
        );
    }

    RatioSearch {
        ratios,
        actual_hpt_size,
    }
}
