//! Platform constants for VPMEM partition sizing.
//!
//! Single source of truth for byte units, ratio limits and ELMM layout
//! geometry. Imported by all crates; no duplication permitted.

use static_assertions::const_assert;

/// One kibibyte.
pub const KB: u64 = 1024;

/// One mebibyte.
pub const MB: u64 = 1024 * KB;

/// One gibibyte.
pub const GB: u64 = 1024 * MB;

/// One tebibyte.
pub const TB: u64 = 1024 * GB;

/// Smallest HPT the firmware will allocate, whatever the ratio.
pub const MIN_HPT_SIZE: u64 = 256 * KB;

/// PPT ratios are expressed as `1 / (PPT_RATIO_SCALE * 2^r)`.
pub const PPT_RATIO_SCALE: u64 = 64;

/// Lowest HPT ratio exponent the ratio search may reach (1/32).
pub const HPT_RATIO_FLOOR: u32 = 5;

/// Initial HPT ratio exponent for IBMi partitions (1/64).
pub const IBMI_HPT_RATIO: u32 = 6;

/// Initial HPT ratio exponent for Linux and AIX partitions (1/128).
pub const DEFAULT_HPT_RATIO: u32 = 7;

/// Initial PPT ratio exponent for every partition kind (1/4096).
pub const DEFAULT_PPT_RATIO: u32 = 6;

/// Increment applied when the growth search sits exactly on a breakpoint.
pub const GROWTH_NUDGE: u64 = GB;

/// Largest maximum memory size the growth search may propose (1 EiB).
pub const MAX_MEMORY_SIZE: u64 = 1 << 60;

/// ELMM base addresses are aligned to this boundary.
pub const ELMM_ALIGNMENT: u64 = 4 * TB;

/// Fixed window reserved after the ELMM base for PCI, VAS and XIVE.
pub const PCI_VAS_XIVE_WINDOW: u64 = 4 * TB;

/// Linux partitions may not address memory beyond this footprint.
pub const LINUX_ADDRESS_CEILING: u64 = 64 * TB;

const_assert!(PCI_VAS_XIVE_WINDOW % ELMM_ALIGNMENT == 0);
const_assert!(HPT_RATIO_FLOOR < IBMI_HPT_RATIO);
const_assert!(IBMI_HPT_RATIO < DEFAULT_HPT_RATIO);
const_assert!(MAX_MEMORY_SIZE.is_power_of_two());
const_assert!(LINUX_ADDRESS_CEILING < MAX_MEMORY_SIZE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_are_binary() {
        assert_eq!(KB, 1 << 10);
        assert_eq!(MB, 1 << 20);
        assert_eq!(GB, 1 << 30);
        assert_eq!(TB, 1 << 40);
    }

    #[test]
    fn min_hpt_is_256k() {
        assert_eq!(MIN_HPT_SIZE, 262_144);
    }

    #[test]
    fn growth_ceiling_leaves_shift_headroom() {
        // The growth search multiplies by 5 after doubling.
        assert!(MAX_MEMORY_SIZE.checked_mul(2 * 5).is_some());
    }
}
