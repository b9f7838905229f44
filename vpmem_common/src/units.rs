//! Byte-count presentation.

use crate::consts::{GB, KB, MB, TB};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit used when rendering a byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    /// Raw bytes, no suffix.
    Bytes,
    /// Kibibytes.
    Kb,
    /// Mebibytes.
    Mb,
    /// Gibibytes.
    #[default]
    Gb,
    /// Tebibytes.
    Tb,
}

impl SizeUnit {
    /// Number of bytes in one unit.
    pub const fn bytes(self) -> u64 {
        match self {
            SizeUnit::Bytes => 1,
            SizeUnit::Kb => KB,
            SizeUnit::Mb => MB,
            SizeUnit::Gb => GB,
            SizeUnit::Tb => TB,
        }
    }

    /// Suffix appended after the number.
    pub const fn suffix(self) -> &'static str {
        match self {
            SizeUnit::Bytes => "",
            SizeUnit::Kb => "KB",
            SizeUnit::Mb => "MB",
            SizeUnit::Gb => "GB",
            SizeUnit::Tb => "TB",
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeUnit::Bytes => f.write_str("B"),
            other => f.write_str(other.suffix()),
        }
    }
}

/// Render `bytes` in `unit`.
///
/// Exact multiples print as integers (`1000GB`); anything else prints the
/// shortest decimal form of the quotient (`1.5TB`).
pub fn format_size(bytes: u64, unit: SizeUnit) -> String {
    let per_unit = unit.bytes();
    if bytes % per_unit == 0 {
        format!("{}{}", bytes / per_unit, unit.suffix())
    } else {
        let blocks = bytes as f64 / per_unit as f64;
        format!("{}{}", blocks, unit.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_values_print_as_integers() {
        assert_eq!(format_size(1000 * GB, SizeUnit::Gb), "1000GB");
        assert_eq!(format_size(4 * TB, SizeUnit::Tb), "4TB");
        assert_eq!(format_size(0, SizeUnit::Tb), "0TB");
        assert_eq!(format_size(256 * KB, SizeUnit::Kb), "256KB");
    }

    #[test]
    fn fractional_values_keep_decimals() {
        assert_eq!(format_size(1536 * GB, SizeUnit::Tb), "1.5TB");
        assert_eq!(format_size(1000 * GB, SizeUnit::Tb), "0.9765625TB");
        assert_eq!(format_size(256 * KB, SizeUnit::Gb), "0.000244140625GB");
    }

    #[test]
    fn bytes_have_no_suffix() {
        assert_eq!(format_size(12345, SizeUnit::Bytes), "12345");
    }

    #[test]
    fn default_unit_is_gb() {
        assert_eq!(SizeUnit::default(), SizeUnit::Gb);
        assert_eq!(SizeUnit::Gb.to_string(), "GB");
        assert_eq!(SizeUnit::Bytes.to_string(), "B");
    }
}
