//! Partition families and the sizing conventions each one follows.

use crate::consts::{DEFAULT_HPT_RATIO, DEFAULT_PPT_RATIO, IBMI_HPT_RATIO};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system family of the logical partition.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionKind {
    /// IBM i.
    Ibmi,
    /// Linux.
    Linux,
    /// AIX.
    Aix,
}

impl PartitionKind {
    /// HPT ratio exponent the partition starts from.
    pub const fn initial_hpt_ratio(self) -> u32 {
        match self {
            PartitionKind::Ibmi => IBMI_HPT_RATIO,
            PartitionKind::Linux | PartitionKind::Aix => DEFAULT_HPT_RATIO,
        }
    }

    /// PPT ratio exponent the partition starts from.
    pub const fn initial_ppt_ratio(self) -> u32 {
        DEFAULT_PPT_RATIO
    }

    /// Whether the ELMM base sits past an extra `max - desired` headroom.
    pub const fn reserves_headroom(self) -> bool {
        matches!(self, PartitionKind::Linux | PartitionKind::Aix)
    }

    /// Whether the 64TB address footprint restriction applies.
    pub const fn has_64tb_ceiling(self) -> bool {
        matches!(self, PartitionKind::Linux)
    }
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartitionKind::Ibmi => "IBMi",
            PartitionKind::Linux => "Linux",
            PartitionKind::Aix => "AIX",
        };
        f.write_str(name)
    }
}
