// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use serde_json::json;

use crate::compare::result::{ComparisonResult, Difference, DifferenceKind, Severity};
use crate::compare::snapshot::PciDevice;
use crate::normalize::clean_device_class;
use crate::status::Status;

/// Device classes whose presence is load-bearing for the board: chipset
/// bridges, onboard network/USB/SATA controllers and system peripherals.
const CRITICAL_CLASSES: [&str; 7] = [
    "Host bridge",
    "PCI bridge",
    "ISA bridge",
    "Ethernet controller",
    "USB controller",
    "SATA controller",
    "System peripheral",
];

/// Whether a cleaned class string names a critical device class.
pub fn is_critical_class(cleaned_class: &str) -> bool {
    CRITICAL_CLASSES.iter().any(|c| cleaned_class.contains(c))
}

fn cleaned(device: &PciDevice) -> &str {
    clean_device_class(&device.device_class)
}

/// Two-tier PCI comparison.
///
/// Tier 1 reconciles per-class counts among critical devices: a count
/// mismatch fails the component, a wholly new critical class is a warning.
/// Tier 2 reconciles the critical devices by BDF: a missing critical BDF
/// fails, an extra one is informational, and a changed description on an
/// Ethernet/USB controller is a warning. Non-critical devices are counted
/// but never individually diffed.
pub fn compare_pci_devices(baseline: &[PciDevice], current: &[PciDevice]) -> ComparisonResult {
    let mut result = ComparisonResult::new();

    let baseline_by_bdf: BTreeMap<&str, &PciDevice> =
        baseline.iter().map(|d| (d.bdf.as_str(), d)).collect();
    let current_by_bdf: BTreeMap<&str, &PciDevice> =
        current.iter().map(|d| (d.bdf.as_str(), d)).collect();

    let baseline_critical: BTreeMap<&str, &PciDevice> = baseline_by_bdf
        .iter()
        .filter(|(_, d)| is_critical_class(cleaned(d)))
        .map(|(bdf, d)| (*bdf, *d))
        .collect();
    let current_critical: BTreeMap<&str, &PciDevice> = current_by_bdf
        .iter()
        .filter(|(_, d)| is_critical_class(cleaned(d)))
        .map(|(bdf, d)| (*bdf, *d))
        .collect();

    // tier 1: per-class counts among critical devices
    let baseline_by_class = group_by_class(&baseline_critical);
    let current_by_class = group_by_class(&current_critical);

    let mut class_checks = Vec::new();
    for (class, baseline_devices) in &baseline_by_class {
        let baseline_count = baseline_devices.len();
        let current_count = current_by_class.get(class).map_or(0, Vec::len);

        if baseline_count != current_count {
            let issue = format!("{class}: expected {baseline_count}, found {current_count}");
            result.push(Difference::new(
                DifferenceKind::CountMismatch,
                Severity::Major,
                issue.clone(),
            ));
            class_checks.push(json!({
                "class": class,
                "baseline_count": baseline_count,
                "current_count": current_count,
                "status": "MISMATCH",
                "issue": issue,
            }));
        } else {
            class_checks.push(json!({
                "class": class,
                "baseline_count": baseline_count,
                "current_count": current_count,
                "status": "MATCH",
            }));
        }
    }

    for (class, devices) in &current_by_class {
        if !baseline_by_class.contains_key(class) {
            let issue = format!("New device class detected: {class}");
            result.push(Difference::new(
                DifferenceKind::NewDeviceClass,
                Severity::Minor,
                issue.clone(),
            ));
            class_checks.push(json!({
                "class": class,
                "baseline_count": 0,
                "current_count": devices.len(),
                "status": "NEW",
                "issue": issue,
            }));
        }
    }

    // tier 2: per-BDF reconciliation, critical devices only. Presence is
    // checked against the full maps so a device that merely changed class
    // is not reported as missing.
    let mut critical_bdfs: Vec<&str> = baseline_critical
        .keys()
        .chain(current_critical.keys())
        .copied()
        .collect();
    critical_bdfs.sort_unstable();
    critical_bdfs.dedup();

    let mut device_comparison = Vec::new();
    for bdf in critical_bdfs {
        match (baseline_by_bdf.get(bdf), current_by_bdf.get(bdf)) {
            (Some(_), None) => {
                result.push(Difference::new(
                    DifferenceKind::Missing,
                    Severity::Major,
                    format!("Critical device {bdf} missing"),
                ));
                device_comparison.push(json!({ "bdf": bdf, "status": "MISSING" }));
            }
            (None, Some(cur)) => {
                // additional devices are not judged, only recorded
                device_comparison.push(json!({
                    "bdf": bdf,
                    "status": "EXTRA",
                    "description": cur.description,
                }));
            }
            (Some(base), Some(cur)) => {
                if cur.description != base.description && is_link_controller(cleaned(base)) {
                    result.push(Difference::new(
                        DifferenceKind::DescriptionChanged,
                        Severity::Minor,
                        format!(
                            "Critical device {bdf} description changed: {} vs {}",
                            cur.description, base.description
                        ),
                    ));
                }
                device_comparison.push(json!({ "bdf": bdf, "status": "PRESENT" }));
            }
            (None, None) => {}
        }
    }

    result.add_detail("current_count", json!(current.len()));
    result.add_detail("baseline_count", json!(baseline.len()));
    result.add_detail("critical_devices_check", json!(class_checks));
    result.add_detail("device_comparison", json!(device_comparison));

    result.add_summary("total_differences", json!(result.difference_count()));
    result.add_summary("pci_devices_current", json!(current.len()));
    result.add_summary("pci_devices_baseline", json!(baseline.len()));
    result.add_summary("critical_devices_current", json!(current_critical.len()));
    result.add_summary("critical_devices_baseline", json!(baseline_critical.len()));
    result.add_summary(
        "status_description",
        json!(if result.status() == Status::Pass {
            "PCIe devices match the baseline"
        } else {
            "PCIe device differences detected"
        }),
    );

    result
}

fn group_by_class<'a>(
    devices: &BTreeMap<&str, &'a PciDevice>,
) -> BTreeMap<&'a str, Vec<&'a PciDevice>> {
    let mut groups: BTreeMap<&str, Vec<&PciDevice>> = BTreeMap::new();
    for device in devices.values().copied() {
        groups.entry(cleaned(device)).or_default().push(device);
    }
    groups
}

fn is_link_controller(cleaned_class: &str) -> bool {
    ["Ethernet controller", "USB controller"]
        .iter()
        .any(|c| cleaned_class.contains(c))
}
