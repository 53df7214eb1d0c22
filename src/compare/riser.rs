// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::json;

use crate::compare::reconcile::reconcile;
use crate::compare::result::{ComparisonResult, Difference, DifferenceKind, Severity};
use crate::compare::snapshot::RiserCard;
use crate::status::Status;

/// FRU serial placeholder written at the factory before programming. A
/// riser still carrying it was never serialized and fails the FRU check.
const SERIAL_PLACEHOLDER: &str = "Required";

const CRITICAL_PHRASES: [&str; 4] = [
    "missing in current",
    "serial number missing",
    "populated risers mismatch",
    "population status mismatch",
];

/// Whether a riser difference message names one of the conditions that make
/// the whole component fail. Classification is by message text so severity
/// follows the report wording the operators act on.
pub fn is_critical_riser_difference(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    CRITICAL_PHRASES.iter().any(|p| lower.contains(p))
}

/// Compares riser cards per slot: presence, population state, then the FRU
/// identity block. A population mismatch short-circuits the FRU checks for
/// that slot. Severity is classified post-hoc over the collected messages:
/// any critical difference fails the component, anything else is a warning.
pub fn compare_riser_cards(baseline: &[RiserCard], current: &[RiserCard]) -> ComparisonResult {
    let mut findings: Vec<(DifferenceKind, String)> = Vec::new();

    let reconciled = reconcile(baseline, current, |r| r.slot.as_str());

    for (slot, _) in &reconciled.missing {
        findings.push((
            DifferenceKind::Missing,
            format!("Slot {slot}: Missing in current configuration"),
        ));
    }
    for (slot, _) in &reconciled.extra {
        findings.push((
            DifferenceKind::Extra,
            format!("Slot {slot}: Extra riser found (not in baseline)"),
        ));
    }

    let mut populated_current = 0;
    let mut populated_baseline = 0;

    for (slot, base, cur) in &reconciled.matched {
        if cur.populated {
            populated_current += 1;
        }
        if base.populated {
            populated_baseline += 1;
        }

        if cur.populated != base.populated {
            findings.push((
                DifferenceKind::PopulationChange,
                format!(
                    "Slot {slot}: Population status mismatch - current={}, baseline={}",
                    population(cur.populated),
                    population(base.populated)
                ),
            ));
            continue;
        }

        if !(cur.populated && base.populated) {
            continue;
        }

        if cur.fru_product_name != base.fru_product_name {
            findings.push((
                DifferenceKind::FieldMismatch,
                format!(
                    "Slot {slot}: FRU Product Name mismatch - current='{}', baseline='{}'",
                    cur.fru_product_name, base.fru_product_name
                ),
            ));
        }
        if cur.fru_manufacturer != base.fru_manufacturer {
            findings.push((
                DifferenceKind::FieldMismatch,
                format!(
                    "Slot {slot}: FRU Manufacturer mismatch - current='{}', baseline='{}'",
                    cur.fru_manufacturer, base.fru_manufacturer
                ),
            ));
        }
        if cur.fru_part_number != base.fru_part_number {
            findings.push((
                DifferenceKind::FieldMismatch,
                format!(
                    "Slot {slot}: FRU Part Number mismatch - current='{}', baseline='{}'",
                    cur.fru_part_number, base.fru_part_number
                ),
            ));
        }

        if cur.fru_serial_number.is_empty() || cur.fru_serial_number == SERIAL_PLACEHOLDER {
            findings.push((
                DifferenceKind::SerialMissing,
                format!(
                    "Slot {slot}: FRU Serial Number missing or invalid - current='{}'",
                    cur.fru_serial_number
                ),
            ));
        }

        if cur.pcie_slots.len() != base.pcie_slots.len() {
            findings.push((
                DifferenceKind::CountMismatch,
                format!(
                    "Slot {slot}: PCIe slots count mismatch - current={}, baseline={}",
                    cur.pcie_slots.len(),
                    base.pcie_slots.len()
                ),
            ));
        }
    }

    if populated_current != populated_baseline {
        findings.push((
            DifferenceKind::CountMismatch,
            format!(
                "Total populated risers mismatch: current={populated_current}, baseline={populated_baseline}"
            ),
        ));
    }

    let mut result = ComparisonResult::new();
    let mut critical_messages = Vec::new();
    for (kind, message) in findings {
        let severity = if is_critical_riser_difference(&message) {
            critical_messages.push(message.clone());
            Severity::Major
        } else {
            Severity::Minor
        };
        result.push(Difference::new(kind, severity, message));
    }

    result.add_detail("current_populated", json!(populated_current));
    result.add_detail("baseline_populated", json!(populated_baseline));
    result.add_detail("current_slots", json!(current.len()));
    result.add_detail("baseline_slots", json!(baseline.len()));
    result.add_detail("critical_differences", json!(critical_messages));

    result.add_summary("total_differences", json!(result.difference_count()));
    result.add_summary(
        "status_description",
        json!(match result.status() {
            Status::Pass => "Riser cards match the baseline",
            Status::Warning => "Minor riser differences detected",
            _ => "Critical riser differences detected",
        }),
    );

    result
}

fn population(populated: bool) -> &'static str {
    if populated {
        "populated"
    } else {
        "empty"
    }
}
