// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use serde_json::json;

use crate::compare::result::{ComparisonResult, Difference, DifferenceKind, Severity};
use crate::compare::snapshot::MemoryModule;
use crate::normalize::parse_size_gb;
use crate::status::Status;

/// Compares memory configuration by aggregate roll-ups plus per-slot
/// population state.
///
/// Capacity loss is the critical signal: a total-GiB mismatch fails the
/// component, while population-count drift and individual slot flips are
/// warnings only.
pub fn compare_memory(baseline: &[MemoryModule], current: &[MemoryModule]) -> ComparisonResult {
    let mut result = ComparisonResult::new();

    let (current_populated, current_total_gb) = roll_up(current);
    let (baseline_populated, baseline_total_gb) = roll_up(baseline);

    if current_populated != baseline_populated {
        result.push(Difference::new(
            DifferenceKind::CountMismatch,
            Severity::Minor,
            format!(
                "Populated memory slot count changed: {current_populated} vs {baseline_populated}"
            ),
        ));
    }

    if current_total_gb != baseline_total_gb {
        result.push(Difference::new(
            DifferenceKind::CapacityMismatch,
            Severity::Major,
            format!(
                "Total memory capacity changed: {current_total_gb}GB vs {baseline_total_gb}GB"
            ),
        ));
    }

    // per-slot population state; a slot absent from one side counts as empty
    let current_by_slot: BTreeMap<&str, &MemoryModule> =
        current.iter().map(|m| (m.slot.as_str(), m)).collect();
    let baseline_by_slot: BTreeMap<&str, &MemoryModule> =
        baseline.iter().map(|m| (m.slot.as_str(), m)).collect();

    let mut slots: Vec<&str> = current_by_slot
        .keys()
        .chain(baseline_by_slot.keys())
        .copied()
        .collect();
    slots.sort_unstable();
    slots.dedup();

    let mut slot_comparison = Vec::new();
    for slot in slots {
        let seated_now = current_by_slot.get(slot).is_some_and(|m| m.populated);
        let seated_before = baseline_by_slot.get(slot).is_some_and(|m| m.populated);

        let state = match (seated_now, seated_before) {
            (true, true) => "POPULATED",
            (false, false) => "EMPTY",
            (true, false) => "ADDED",
            (false, true) => "REMOVED",
        };
        slot_comparison.push(json!({ "slot": slot, "status": state }));

        if seated_now != seated_before {
            result.push(Difference::new(
                DifferenceKind::PopulationChange,
                Severity::Minor,
                format!("Slot {slot}: {state}"),
            ));
        }
    }

    result.add_detail("current_slots", json!(current.len()));
    result.add_detail("baseline_slots", json!(baseline.len()));
    result.add_detail("slot_comparison", json!(slot_comparison));

    result.add_summary("total_differences", json!(result.difference_count()));
    result.add_summary("memory_slots_populated_current", json!(current_populated));
    result.add_summary("memory_slots_populated_baseline", json!(baseline_populated));
    result.add_summary("total_memory_current_gb", json!(current_total_gb));
    result.add_summary("total_memory_baseline_gb", json!(baseline_total_gb));
    result.add_summary(
        "status_description",
        json!(match result.status() {
            Status::Pass => "Memory matches the baseline",
            Status::Warning => "Minor memory configuration differences detected",
            _ => "Critical memory configuration differences detected",
        }),
    );

    result
}

fn roll_up(modules: &[MemoryModule]) -> (usize, u64) {
    let mut count = 0;
    let mut total_gb = 0;
    for module in modules.iter().filter(|m| m.populated) {
        count += 1;
        total_gb += parse_size_gb(&module.size);
    }
    (count, total_gb)
}
