//! VPMEM Common Library
//!
//! Shared units, platform constants and configuration loading utilities
//! for the VPMEM sizing workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Byte units, ratio limits, ELMM layout geometry
//! - [`units`] - Byte-count formatting
//! - [`partition`] - Partition families and their sizing conventions
//! - [`config`] - Configuration loading traits and the sizing profile
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! Add to your `Cargo.toml` with alias for shorter imports:
//! ```toml
//! [dependencies]
//! vpmem = { package = "vpmem_common", path = "../vpmem_common" }
//! ```
//!
//! Then import:
//! ```rust
//! use vpmem_common::consts::*;
//! use vpmem_common::units::{format_size, SizeUnit};
//! ```

pub mod config;
pub mod consts;
pub mod partition;
pub mod prelude;
pub mod units;
