//! `[Nx]GB` LUN specifications.
//!
//! `"6000"` is one 6000GB LUN, `"3x1000"` three 1000GB LUNs. Replication
//! is expanded before sizing; the core only ever sees individual sizes.

use crate::error::{SizingError, SizingResult};
use std::fmt;
use std::str::FromStr;
use vpmem::consts::GB;

/// A replicated LUN size as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunSpec {
    /// Number of identical LUNs (may be zero).
    pub count: u64,
    /// Size of each LUN in GB.
    pub size_gb: u64,
}

impl LunSpec {
    /// Size of each LUN in bytes.
    pub fn size_bytes(&self) -> SizingResult<u64> {
        self.size_gb.checked_mul(GB).ok_or(SizingError::InvalidLun {
            spec: self.to_string(),
            reason: "size does not fit in 64 bits".to_string(),
        })
    }
}

impl fmt::Display for LunSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 {
            write!(f, "{}", self.size_gb)
        } else {
            write!(f, "{}x{}", self.count, self.size_gb)
        }
    }
}

fn parse_number(text: &str, field: &str, spec: &str) -> SizingResult<u64> {
    text.trim().parse().map_err(|e| SizingError::InvalidLun {
        spec: spec.to_string(),
        reason: format!("{field}: {e}"),
    })
}

impl FromStr for LunSpec {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        if spec.is_empty() {
            return Err(SizingError::InvalidLun {
                spec: s.to_string(),
                reason: "empty".to_string(),
            });
        }

        let (count, size_gb) = match spec.split_once(['x', 'X']) {
            Some((count, size)) => (
                parse_number(count, "count", spec)?,
                parse_number(size, "size", spec)?,
            ),
            None => (1, parse_number(spec, "size", spec)?),
        };

        if size_gb == 0 {
            return Err(SizingError::InvalidLun {
                spec: spec.to_string(),
                reason: "size must be positive".to_string(),
            });
        }

        Ok(Self { count, size_gb })
    }
}

/// Flatten specs into individual LUN sizes in bytes, in input order.
pub fn expand_luns(specs: &[LunSpec]) -> SizingResult<Vec<u64>> {
    let mut sizes = Vec::new();
    for spec in specs {
        let bytes = spec.size_bytes()?;
        let count = usize::try_from(spec.count).map_err(|_| SizingError::InvalidLun {
            spec: spec.to_string(),
            reason: "count too large".to_string(),
        })?;
        sizes.extend(std::iter::repeat_n(bytes, count));
    }
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_size() {
        let spec: LunSpec = "6000".parse().unwrap();
        assert_eq!(spec, LunSpec { count: 1, size_gb: 6000 });
        assert_eq!(spec.to_string(), "6000");
    }

    #[test]
    fn replicated_size() {
        let spec: LunSpec = " 16x1024 ".parse().unwrap();
        assert_eq!(spec, LunSpec { count: 16, size_gb: 1024 });
        assert_eq!(spec.to_string(), "16x1024");
        assert_eq!("3X1000".parse::<LunSpec>().unwrap().count, 3);
    }

    #[test]
    fn zero_count_expands_to_nothing() {
        let spec: LunSpec = "0x1000".parse().unwrap();
        assert!(expand_luns(&[spec]).unwrap().is_empty());
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "  ", "abc", "3x", "x100", "3x1000x2", "-5", "0", "2x0", "1.5"] {
            assert!(
                matches!(bad.parse::<LunSpec>(), Err(SizingError::InvalidLun { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn expansion_keeps_order() {
        let specs = ["6000", "2x5000", "1000"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect::<Vec<LunSpec>>();
        let sizes = expand_luns(&specs).unwrap();
        assert_eq!(sizes, vec![6000 * GB, 5000 * GB, 5000 * GB, 1000 * GB]);
    }

    #[test]
    fn oversized_lun_rejected() {
        let spec = LunSpec { count: 1, size_gb: u64::MAX / 2 };
        assert!(expand_luns(&[spec]).is_err());
    }
}
