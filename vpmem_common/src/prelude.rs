//! Prelude module for common re-exports.
//!
//! ```rust
//! use vpmem_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig, SizingProfile};

// ─── Units ──────────────────────────────────────────────────────────
pub use crate::consts::{GB, KB, MB, TB};
pub use crate::units::{SizeUnit, format_size};

// ─── Partition ──────────────────────────────────────────────────────
pub use crate::partition::PartitionKind;
