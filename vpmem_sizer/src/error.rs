//! Error types for sizing operations

use thiserror::Error;
use vpmem::config::ConfigError;

/// Errors that can occur while sizing a partition
#[derive(Error, Debug)]
pub enum SizingError {
    /// Desired memory size was zero
    #[error("Desired memory size must be positive")]
    ZeroMemory,

    /// A LUN of zero bytes reached the layout planner
    #[error("LUN #{index} has zero size")]
    ZeroLunSize {
        /// Position of the LUN in the expanded list
        index: usize,
    },

    /// A size or address does not fit the platform address space
    #[error("Address space overflow while computing {what}")]
    AddressSpaceOverflow {
        /// Quantity being computed
        what: &'static str,
    },

    /// Memory growth passed the largest proposable maximum memory size
    #[error("Maximum memory size {size:#x} exceeds growth ceiling {ceiling:#x}")]
    GrowthCeiling {
        /// Size the growth search wanted to propose
        size: u64,
        /// Ceiling it ran into
        ceiling: u64,
    },

    /// Memory growth could not advance past a breakpoint
    #[error("Maximum memory size {size:#x} cannot grow further")]
    GrowthStalled {
        /// Size at which the search stopped advancing
        size: u64,
    },

    /// LUN specification could not be parsed
    #[error("Invalid LUN specification '{spec}': {reason}")]
    InvalidLun {
        /// Offending text
        spec: String,
        /// Why it was rejected
        reason: String,
    },

    /// Profile loading error
    #[error("Configuration error: {source}")]
    Config {
        /// Source configuration error
        #[from]
        source: ConfigError,
    },

    /// JSON serialization error
    #[error("JSON error: {source}")]
    Json {
        /// Source JSON error
        #[from]
        source: serde_json::Error,
    },
}

/// Result type for sizing operations
pub type SizingResult<T> = Result<T, SizingError>;
