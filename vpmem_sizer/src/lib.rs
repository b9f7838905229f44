//! # VPMEM Sizer Library
//!
//! HPT/PPT ratio and maximum memory sizing for logical partitions that use
//! virtualized persistent memory.
//!
//! # Module Structure
//!
//! - [`size_math`] - Quarter-breakpoint rounding and the HPT size formula
//! - [`ratio`] - Lockstep HPT/PPT ratio pair and ratio search
//! - [`growth`] - Maximum memory growth along breakpoints
//! - [`layout`] - ELMM tree layout estimate
//! - [`plan`] - End-to-end sizing pipeline and recommendations
//! - [`lun`] - `[Nx]GB` LUN specification parsing
//! - [`report`] - Text and JSON rendering
//! - [`error`] - Error types
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      vpmem_sizer (single crate)                  │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────────────┐  │
//! │  │  CLI / TOML │───►│    plan()    │───►│  report (text/json) │  │
//! │  │  LunSpec    │    │              │    │                     │  │
//! │  └─────────────┘    └──────┬───────┘    └─────────────────────┘  │
//! │                            │                                     │
//! │          ┌─────────────────┼──────────────────┐                  │
//! │          ▼                 ▼                  ▼                  │
//! │   ┌─────────────┐   ┌─────────────┐   ┌──────────────┐           │
//! │   │ ratio search│──►│ mem. growth │──►│ ELMM layout  │           │
//! │   └─────────────┘   └─────────────┘   └──────────────┘           │
//! │          └──────── size_math ─────────────┘                      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod growth;
pub mod layout;
pub mod lun;
pub mod plan;
pub mod ratio;
pub mod report;
pub mod size_math;

// Re-export key types for convenience
pub use crate::error::{SizingError, SizingResult};
pub use crate::layout::{Layout, LayoutEntry, Region};
pub use crate::lun::{LunSpec, expand_luns};
pub use crate::plan::{Recommendations, SizingOutcome, SizingPlan, SizingRequest, plan};
pub use crate::ratio::RatioPair;
pub use crate::size_math::{compute_hpt_size, round_up_pow2_quarter};
