//! Human-readable and JSON rendering of a [`SizingPlan`].

use crate::error::SizingResult;
use crate::layout::Region;
use crate::plan::{Recommendations, SizingPlan};
use crate::ratio::RatioPair;
use std::fmt::Write;
use vpmem::units::{SizeUnit, format_size};

fn gb(bytes: u64) -> String {
    format_size(bytes, SizeUnit::Gb)
}

fn tb(bytes: u64) -> String {
    format_size(bytes, SizeUnit::Tb)
}

fn write_ratios(out: &mut String, ratios: &RatioPair) {
    let _ = writeln!(
        out,
        "    hpt_ratio           = 1/{} ({})",
        ratios.hpt_denominator(),
        ratios.hpt()
    );
    let _ = writeln!(
        out,
        "    ppt_ratio           = 1/{} ({})",
        ratios.ppt_denominator(),
        ratios.ppt()
    );
}

/// Render the plan as the multi-section text report.
pub fn render_text(plan: &SizingPlan) -> String {
    let mut out = String::new();
    let desired = plan.request.desired_memory_size;
    let outcome = &plan.outcome;

    out.push('\n');
    out.push_str("Inputs:\n");
    let _ = writeln!(out, "    desired_memory_size = {}", gb(desired));
    let _ = writeln!(out, "    vpmem_size          = {}", gb(plan.vpmem_size));
    write_ratios(&mut out, &plan.initial_ratios);

    out.push('\n');
    out.push_str("Goals:\n");
    let _ = writeln!(out, "    target_hpt_size     = {}", gb(plan.target_hpt_size));

    out.push('\n');
    out.push_str("Outputs:\n");
    let _ = writeln!(out, "    max_memory_size     = {}", gb(outcome.max_memory_size));
    write_ratios(&mut out, &outcome.ratios);
    let _ = writeln!(out, "    actual_hpt_size     = {}", gb(outcome.actual_hpt_size));

    out.push('\n');
    out.push_str("ELMM Tree Structure:\n");
    let _ = writeln!(out, "    elmm_base_address   = {}", tb(plan.layout.base_address));
    for entry in &plan.layout.entries {
        let range = format!("{}..{}", tb(entry.start), tb(entry.end));
        match entry.region {
            Region::PciVasXive => {
                let _ = writeln!(out, "    PCI/VAS/XIVE        = {range}");
            }
            Region::Lun { size, .. } => {
                let _ = writeln!(out, "    LUN {:<7}         = {range}", gb(size));
            }
        }
    }
    let _ = writeln!(out, "    elmm_end_address    = {}", tb(plan.layout.end_address));

    out.push('\n');
    out.push_str("Recommendations:\n");
    let initial = &plan.initial_ratios;
    let recs = plan.recommendations;
    if recs.contains(Recommendations::HPT_RATIO) {
        let _ = writeln!(
            out,
            "    Change the HPT ratio from 1/{} to 1/{}.",
            initial.hpt_denominator(),
            outcome.ratios.hpt_denominator()
        );
    }
    if recs.contains(Recommendations::PPT_RATIO) {
        let _ = writeln!(
            out,
            "    Change the PPT ratio from 1/{} to 1/{}.",
            initial.ppt_denominator(),
            outcome.ratios.ppt_denominator()
        );
    }
    if recs.contains(Recommendations::MAX_MEMORY) {
        let _ = writeln!(
            out,
            "    Change the maximum memory size from {} to {}.",
            gb(desired),
            gb(outcome.max_memory_size)
        );
    }
    if recs.contains(Recommendations::LINUX_64TB_CEILING) {
        out.push_str(
            "    *** WARNING: This configuration may not fit within Linux's 64TB memory footprint restriction. ***\n",
        );
    }
    out.push('\n');
    out
}

/// Render the plan as pretty-printed JSON.
pub fn render_json(plan: &SizingPlan) -> SizingResult<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{SizingRequest, plan};
    use vpmem::consts::GB;
    use vpmem::partition::PartitionKind;

    fn linux_1000_6000() -> SizingPlan {
        plan(&SizingRequest {
            desired_memory_size: 1000 * GB,
            lun_sizes: vec![6000 * GB],
            partition_kind: PartitionKind::Linux,
        })
        .unwrap()
    }

    #[test]
    fn text_report_matches_reference_layout() {
        let expected = "
Inputs:
    desired_memory_size = 1000GB
    vpmem_size          = 6000GB
    hpt_ratio           = 1/128 (7)
    ppt_ratio           = 1/4096 (6)

Goals:
    target_hpt_size     = 64GB

Outputs:
    max_memory_size     = 1281GB
    hpt_ratio           = 1/32 (5)
    ppt_ratio           = 1/1024 (4)
    actual_hpt_size     = 64GB

ELMM Tree Structure:
    elmm_base_address   = 4TB
    PCI/VAS/XIVE        = 4TB..8TB
    LUN 6000GB          = 8TB..16TB
    elmm_end_address    = 16TB

Recommendations:
    Change the HPT ratio from 1/128 to 1/32.
    Change the PPT ratio from 1/4096 to 1/1024.
    Change the maximum memory size from 1000GB to 1281GB.

";
        assert_eq!(render_text(&linux_1000_6000()), expected);
    }

    #[test]
    fn short_lun_sizes_are_padded() {
        let plan = plan(&SizingRequest {
            desired_memory_size: 1000 * GB,
            lun_sizes: vec![500 * GB],
            partition_kind: PartitionKind::Ibmi,
        })
        .unwrap();
        let text = render_text(&plan);
        assert!(text.contains("    LUN 500GB           = 8TB..8.5TB\n"), "{text}");
    }

    #[test]
    fn json_report_carries_flags() {
        let json = render_json(&linux_1000_6000()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcome"]["max_memory_size"], 1281 * GB);
        assert_eq!(value["outcome"]["ratios"]["hpt"], 5);
        assert_eq!(value["layout"]["entries"][1]["region"]["kind"], "lun");
        let flags = value["recommendations"].as_str().unwrap();
        assert!(flags.contains("MAX_MEMORY"));
        assert!(!flags.contains("LINUX_64TB_CEILING"));
    }
}
