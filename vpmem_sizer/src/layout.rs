//! ELMM tree layout estimate.
//!
//! The partition's effective logical memory map starts after the
//! HPT/PPT-addressable region, aligned to [`ELMM_ALIGNMENT`]. A fixed
//! [`PCI_VAS_XIVE_WINDOW`] comes first, then each LUN at an address
//! aligned to its own power-of-two backing size.

use crate::error::{SizingError, SizingResult};
use crate::size_math::round_up_pow2;
use serde::Serialize;
use tracing::{debug, warn};
use vpmem::consts::{ELMM_ALIGNMENT, LINUX_ADDRESS_CEILING, PCI_VAS_XIVE_WINDOW};
use vpmem::partition::PartitionKind;

/// What occupies a layout entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Region {
    /// PCI configuration, VAS windows and XIVE structures.
    PciVasXive,
    /// VPMEM LUN backing allocation.
    Lun {
        /// Position in the expanded LUN list.
        index: usize,
        /// Size the LUN was requested with.
        size: u64,
    },
}

/// One address range in the ELMM tree.
///
/// `start..end` covers the entry including any alignment padding;
/// `base` is where the aligned allocation itself begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutEntry {
    /// Occupant.
    pub region: Region,
    /// Cursor before this entry.
    pub start: u64,
    /// Aligned start of the allocation.
    pub base: u64,
    /// End of the allocation.
    pub end: u64,
}

impl LayoutEntry {
    /// Bytes spanned including padding.
    pub const fn span(&self) -> u64 {
        self.end - self.start
    }

    /// Bytes of the aligned allocation.
    pub const fn allocation(&self) -> u64 {
        self.end - self.base
    }
}

/// Ordered ELMM layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// First address after the HPT/PPT-addressable region.
    pub base_address: u64,
    /// Platform window first, then LUNs in input order.
    pub entries: Vec<LayoutEntry>,
    /// Address after the last entry.
    pub end_address: u64,
    /// Linux footprint past [`LINUX_ADDRESS_CEILING`].
    pub exceeds_linux_ceiling: bool,
}

/// Round `value` up to a multiple of `alignment` (non-zero).
fn align_up(value: u64, alignment: u64) -> SizingResult<u64> {
    match value % alignment {
        0 => Ok(value),
        rem => value
            .checked_add(alignment - rem)
            .ok_or(SizingError::AddressSpaceOverflow {
                what: "aligned address",
            }),
    }
}

fn advance(cursor: u64, by: u64, what: &'static str) -> SizingResult<u64> {
    cursor
        .checked_add(by)
        .ok_or(SizingError::AddressSpaceOverflow { what })
}

/// ELMM base address for a partition.
///
/// Linux and AIX start past an extra `max - desired` headroom; IBMi starts
/// right after `max_memory_size`.
pub fn elmm_base_address(
    max_memory_size: u64,
    desired_memory_size: u64,
    kind: PartitionKind,
) -> SizingResult<u64> {
    let mut base = max_memory_size;
    if kind.reserves_headroom() {
        let headroom = max_memory_size.saturating_sub(desired_memory_size);
        base = advance(base, headroom, "ELMM base address")?;
    }
    align_up(base, ELMM_ALIGNMENT)
}

/// Lay out the platform window and every LUN.
///
/// # Errors
///
/// - `ZeroLunSize` for a zero-byte LUN
/// - `AddressSpaceOverflow` if any address passes `u64::MAX`
pub fn plan_layout(
    max_memory_size: u64,
    desired_memory_size: u64,
    kind: PartitionKind,
    lun_sizes: &[u64],
) -> SizingResult<Layout> {
    let base_address = elmm_base_address(max_memory_size, desired_memory_size, kind)?;
    let mut entries = Vec::with_capacity(lun_sizes.len() + 1);

    let window_end = advance(base_address, PCI_VAS_XIVE_WINDOW, "PCI/VAS/XIVE window")?;
    entries.push(LayoutEntry {
        region: Region::PciVasXive,
        start: base_address,
        base: base_address,
        end: window_end,
    });
    let mut cursor = window_end;

    for (index, &size) in lun_sizes.iter().enumerate() {
        if size == 0 {
            return Err(SizingError::ZeroLunSize { index });
        }
        let allocation = round_up_pow2(size).ok_or(SizingError::AddressSpaceOverflow {
            what: "LUN allocation size",
        })?;
        let base = align_up(cursor, allocation)?;
        let end = advance(base, allocation, "LUN end address")?;
        debug!(index, size, allocation, base, end, "LUN placed");
        entries.push(LayoutEntry {
            region: Region::Lun { index, size },
            start: cursor,
            base,
            end,
        });
        cursor = end;
    }

    let exceeds_linux_ceiling = kind.has_64tb_ceiling() && cursor > LINUX_ADDRESS_CEILING;
    if exceeds_linux_ceiling {
        warn!(
            end_address = cursor,
            "configuration may not fit within Linux's 64TB memory footprint restriction"
        );
    }

    Ok(Layout {
        base_address,
        entries,
        end_address: cursor,
        exceeds_linux_ceiling,
    })
}
