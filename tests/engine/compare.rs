// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use anyhow::Result;
use assert_json_diff::assert_json_eq;
use serde_json::json;

use hwqa::compare::{compare_snapshots, HardwareSnapshot, ScanInfo};
use hwqa::{BaselineDoc, Status};

use crate::fixture;

#[test]
fn test_healthy_unit_passes_end_to_end() -> Result<()> {
    let baseline = BaselineDoc::from_value(fixture::baseline_doc())?;
    let current = HardwareSnapshot::from_value(fixture::healthy_snapshot())?;

    let report = compare_snapshots(&baseline.snapshot, &current).with_scan_info(ScanInfo {
        baseline_date: baseline.baseline_date,
        current_scan_date: "2026-08-06".parse().ok(),
    });

    assert_eq!(report.overall_status, Status::Pass);
    assert_eq!(report.overall_status.exit_code(), 0);

    let value = json!(report);
    assert_eq!(value["overall_status"], json!("PASS"));
    assert_eq!(value["scan_info"]["baseline_date"], json!("2026-01-15"));
    assert_json_eq!(
        value["summary"],
        json!({
            "total_components_checked": 6,
            "components_passed": 6,
            "components_warning": 0,
            "components_failed": 0,
            "total_differences": 0
        })
    );

    Ok(())
}

#[test]
fn test_degraded_unit_fails_with_evidence() -> Result<()> {
    let baseline = BaselineDoc::from_value(fixture::baseline_doc())?;

    let mut doc = fixture::healthy_snapshot();
    // one Ethernet port gone
    let pci = doc["pci_devices"].as_array_mut().expect("pci array");
    pci.retain(|d| d["bdf"] != json!("01:00.1"));
    // a KVM session left its virtual hub behind
    let usb = doc["usb_devices"].as_array_mut().expect("usb array");
    usb.push(json!({
        "bus": "001", "device": "004",
        "vid_pid": "0557:8021",
        "description": "ATEN International Co., Ltd Hub"
    }));

    let current = HardwareSnapshot::from_value(doc)?;
    let report = compare_snapshots(&baseline.snapshot, &current);

    assert_eq!(report.overall_status, Status::Fail);
    assert_eq!(report.overall_status.exit_code(), 1);
    assert_eq!(report.component_results.pci_devices.status(), Status::Fail);
    assert_eq!(report.component_results.usb_devices.status(), Status::Pass);
    assert_eq!(report.summary.components_failed, 1);

    // the PCI evidence names the class and both counts
    assert!(report
        .component_results
        .pci_devices
        .differences()
        .iter()
        .any(|d| d.message == "Ethernet controller: expected 2, found 1"));

    // the ignored KVM hub is visible in the report but affects nothing
    let usb = json!(report.component_results.usb_devices);
    assert_eq!(usb["details"]["ignored_count"], json!(1));

    Ok(())
}

#[test]
fn test_memory_capacity_loss_dominates() -> Result<()> {
    let baseline = BaselineDoc::from_value(fixture::baseline_doc())?;

    // DIMM_B1 is still seated (population count stays at 4) but reports no
    // size: 128 GiB became 96 GiB
    let mut doc = fixture::healthy_snapshot();
    doc["memory_modules"][3]["size"] = json!("No Module Installed");

    let current = HardwareSnapshot::from_value(doc)?;
    let report = compare_snapshots(&baseline.snapshot, &current);

    assert_eq!(report.component_results.memory.status(), Status::Fail);
    assert!(report
        .component_results
        .memory
        .differences()
        .iter()
        .any(|d| d.message.contains("96GB vs 128GB")));

    Ok(())
}

#[test]
fn test_snapshot_missing_array_is_rejected() {
    let mut doc = fixture::healthy_snapshot();
    doc.as_object_mut().expect("object").remove("storage_devices");

    let err = HardwareSnapshot::from_value(doc).unwrap_err();
    assert!(err.to_string().contains("storage_devices"));
}

#[test]
fn test_report_is_byte_identical_across_runs() -> Result<()> {
    let baseline = BaselineDoc::from_value(fixture::baseline_doc())?;

    let mut doc = fixture::healthy_snapshot();
    doc["riser_cards"][0]["fru_serial_number"] = json!("Required");
    let current = HardwareSnapshot::from_value(doc)?;

    let first = serde_json::to_string(&compare_snapshots(&baseline.snapshot, &current))?;
    let second = serde_json::to_string(&compare_snapshots(&baseline.snapshot, &current))?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_unserialized_riser_fails_unit() -> Result<()> {
    let baseline = BaselineDoc::from_value(fixture::baseline_doc())?;

    let mut doc = fixture::healthy_snapshot();
    doc["riser_cards"][0]["fru_serial_number"] = json!("Required");
    let current = HardwareSnapshot::from_value(doc)?;

    let report = compare_snapshots(&baseline.snapshot, &current);
    assert_eq!(report.overall_status, Status::Fail);
    assert_eq!(report.component_results.riser_cards.status(), Status::Fail);
    assert_eq!(report.summary.total_differences, 1);

    Ok(())
}
