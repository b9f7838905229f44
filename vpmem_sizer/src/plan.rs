//! End-to-end sizing pipeline.
//!
//! ```text
//! desired + Σ LUN ──► target HPT ──► ratio search ──► memory growth ──► ELMM layout
//! ```
//!
//! The target is the HPT the partition would get if all LUN storage were
//! DRAM. Ratios are lowered first because fewer internal structures depend
//! on them than on the maximum memory size.

use crate::error::{SizingError, SizingResult};
use crate::growth::grow_max_memory;
use crate::layout::{Layout, plan_layout};
use crate::ratio::{RatioPair, search_ratios};
use crate::size_math::compute_hpt_size;
use bitflags::bitflags;
use serde::Serialize;
use tracing::info;
use vpmem::consts::MAX_MEMORY_SIZE;
use vpmem::partition::PartitionKind;

bitflags! {
    /// Configuration changes the partition should make.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct Recommendations: u8 {
        /// HPT ratio lowered.
        const HPT_RATIO          = 0x01;
        /// PPT ratio lowered.
        const PPT_RATIO          = 0x02;
        /// Maximum memory size raised above the desired size.
        const MAX_MEMORY         = 0x04;
        /// Linux ELMM end address past 64TB.
        const LINUX_64TB_CEILING = 0x08;
    }
}

impl Default for Recommendations {
    fn default() -> Self {
        Self::empty()
    }
}

/// Validated sizing inputs, all in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizingRequest {
    /// DRAM the partition wants.
    pub desired_memory_size: u64,
    /// Individual LUN sizes in input order.
    pub lun_sizes: Vec<u64>,
    /// Partition family.
    pub partition_kind: PartitionKind,
}

impl SizingRequest {
    /// Total VPMEM capacity.
    pub fn vpmem_size(&self) -> SizingResult<u64> {
        self.lun_sizes
            .iter()
            .try_fold(0u64, |acc, &size| acc.checked_add(size))
            .ok_or(SizingError::AddressSpaceOverflow { what: "VPMEM size" })
    }
}

/// Converged sizing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizingOutcome {
    /// Maximum memory size to configure.
    pub max_memory_size: u64,
    /// Ratios to configure.
    pub ratios: RatioPair,
    /// HPT the partition will get.
    pub actual_hpt_size: u64,
    /// Growth steps taken after the ratio floor.
    pub growth_steps: u32,
}

/// Everything one run computes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizingPlan {
    /// Inputs.
    pub request: SizingRequest,
    /// Total VPMEM capacity.
    pub vpmem_size: u64,
    /// Ratios before any adjustment.
    pub initial_ratios: RatioPair,
    /// HPT size the search aims for.
    pub target_hpt_size: u64,
    /// Converged values.
    pub outcome: SizingOutcome,
    /// ELMM tree estimate.
    pub layout: Layout,
    /// Changes to make.
    pub recommendations: Recommendations,
}

/// Size HPT/PPT ratios and maximum memory, then lay out the ELMM tree.
///
/// # Errors
///
/// - `ZeroMemory` if the desired memory size is zero
/// - `AddressSpaceOverflow` if DRAM plus VPMEM exceeds the growth ceiling
/// - any error from memory growth or layout planning
pub fn plan(request: &SizingRequest) -> SizingResult<SizingPlan> {
    let desired = request.desired_memory_size;
    if desired == 0 {
        return Err(SizingError::ZeroMemory);
    }

    let vpmem_size = request.vpmem_size()?;
    let footprint = desired
        .checked_add(vpmem_size)
        .filter(|&total| total <= MAX_MEMORY_SIZE)
        .ok_or(SizingError::AddressSpaceOverflow {
            what: "DRAM + VPMEM footprint",
        })?;

    let initial_ratios = RatioPair::for_partition(request.partition_kind);
    let target_hpt_size = compute_hpt_size(footprint, initial_ratios.hpt());

    let search = search_ratios(desired, initial_ratios, target_hpt_size);
    let outcome = if search.meets(target_hpt_size) {
        SizingOutcome {
            max_memory_size: desired,
            ratios: search.ratios,
            actual_hpt_size: search.actual_hpt_size,
            growth_steps: 0,
        }
    } else {
        let growth = grow_max_memory(desired, search.ratios.hpt(), target_hpt_size)?;
        SizingOutcome {
            max_memory_size: growth.max_memory_size,
            ratios: search.ratios,
            actual_hpt_size: growth.actual_hpt_size,
            growth_steps: growth.steps,
        }
    };

    let layout = plan_layout(
        outcome.max_memory_size,
        desired,
        request.partition_kind,
        &request.lun_sizes,
    )?;

    let mut recommendations = Recommendations::empty();
    recommendations.set(
        Recommendations::HPT_RATIO,
        outcome.ratios.hpt() != initial_ratios.hpt(),
    );
    recommendations.set(
        Recommendations::PPT_RATIO,
        outcome.ratios.ppt() != initial_ratios.ppt(),
    );
    recommendations.set(
        Recommendations::MAX_MEMORY,
        outcome.max_memory_size != desired,
    );
    recommendations.set(
        Recommendations::LINUX_64TB_CEILING,
        layout.exceeds_linux_ceiling,
    );

    info!(
        partition = %request.partition_kind,
        max_memory_size = outcome.max_memory_size,
        hpt_ratio = outcome.ratios.hpt(),
        ppt_ratio = outcome.ratios.ppt(),
        actual_hpt_size = outcome.actual_hpt_size,
        target_hpt_size,
        elmm_end_address = layout.end_address,
        "sizing plan computed"
    );

    Ok(SizingPlan {
        request: request.clone(),
        vpmem_size,
        initial_ratios,
        target_hpt_size,
        outcome,
        layout,
        recommendations,
    })
}
