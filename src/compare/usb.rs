// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use serde_json::json;

use crate::compare::result::{ComparisonResult, Difference, DifferenceKind, Severity};
use crate::compare::snapshot::UsbDevice;
use crate::status::Status;

const CRITICAL_DESCRIPTION_KEYWORDS: [&str; 9] = [
    "hub",
    "controller",
    "xhci",
    "ehci",
    "ohci",
    "uhci",
    "keyboard",
    "mouse",
    "management",
];

const CRITICAL_VENDOR_KEYWORDS: [&str; 4] = ["intel", "amd", "via", "nvidia"];

/// VID:PID pairs of KVM and BMC virtual-media devices that come and go with
/// remote-console sessions. They are excluded from severity computation but
/// retained in the report for visibility.
const IGNORED_VID_PIDS: [&str; 7] = [
    "0557:8021", // ATEN KVM hub
    "046b:ff01", // AMI virtual hub
    "046b:ff20", // AMI virtual CDROM
    "046b:ff31", // AMI virtual HDisk
    "046b:ff10", // AMI virtual keyboard/mouse
    "046b:ffb0", // AMI virtual Ethernet
    "0557:223a", // ATEN CS1316 KVM switch
];

/// Whether a USB device is load-bearing: hubs, host controllers, input
/// devices, management endpoints, or anything from a chipset vendor.
pub fn is_critical_usb(device: &UsbDevice) -> bool {
    let description = device.description.to_ascii_lowercase();
    if CRITICAL_DESCRIPTION_KEYWORDS
        .iter()
        .any(|k| description.contains(k))
    {
        return true;
    }

    let vendor = device.vendor.to_ascii_lowercase();
    CRITICAL_VENDOR_KEYWORDS.iter().any(|k| vendor.contains(k))
}

/// Whether a VID:PID pair is on the KVM/virtual-media ignore list.
pub fn is_ignored_vid_pid(vid_pid: &str) -> bool {
    IGNORED_VID_PIDS.contains(&vid_pid)
}

/// Compares critical USB devices by VID:PID count, not individual instance:
/// enumeration order and bus/device numbers are unstable across boots. A
/// shortfall against the baseline fails the component; a surplus is a
/// warning.
pub fn compare_usb_devices(baseline: &[UsbDevice], current: &[UsbDevice]) -> ComparisonResult {
    let mut result = ComparisonResult::new();

    let judged = |d: &&UsbDevice| is_critical_usb(d) && !is_ignored_vid_pid(&d.vid_pid);
    let baseline_critical: Vec<&UsbDevice> = baseline.iter().filter(judged).collect();
    let current_critical: Vec<&UsbDevice> = current.iter().filter(judged).collect();

    let baseline_by_vid_pid = group_by_vid_pid(&baseline_critical);
    let current_by_vid_pid = group_by_vid_pid(&current_critical);

    let mut vid_pids: Vec<&str> = baseline_by_vid_pid
        .keys()
        .chain(current_by_vid_pid.keys())
        .copied()
        .collect();
    vid_pids.sort_unstable();
    vid_pids.dedup();

    let mut hub_comparison = Vec::new();
    for vid_pid in vid_pids {
        let baseline_devices = baseline_by_vid_pid.get(vid_pid);
        let baseline_count = baseline_devices.map_or(0, Vec::len);
        let current_count = current_by_vid_pid.get(vid_pid).map_or(0, Vec::len);

        if baseline_count == current_count {
            hub_comparison.push(json!({
                "vid_pid": vid_pid,
                "baseline_count": baseline_count,
                "current_count": current_count,
                "status": "MATCH",
            }));
            continue;
        }

        let known_as = baseline_devices
            .and_then(|devices| devices.first())
            .map_or("Unknown", |d| d.description.as_str());
        let issue = format!(
            "USB device {vid_pid} ({known_as}): expected {baseline_count}, found {current_count}"
        );

        let severity = if baseline_count > current_count {
            Severity::Major
        } else {
            Severity::Minor
        };
        result.push(Difference::new(
            DifferenceKind::CountMismatch,
            severity,
            issue.clone(),
        ));
        hub_comparison.push(json!({
            "vid_pid": vid_pid,
            "baseline_count": baseline_count,
            "current_count": current_count,
            "status": "MISMATCH",
            "issue": issue,
        }));
    }

    let ignored_devices: Vec<&UsbDevice> = current
        .iter()
        .filter(|d| is_ignored_vid_pid(&d.vid_pid))
        .collect();

    result.add_detail("current_count", json!(current.len()));
    result.add_detail("baseline_count", json!(baseline.len()));
    result.add_detail("hub_comparison", json!(hub_comparison));
    if !ignored_devices.is_empty() {
        result.add_detail(
            "ignored_devices",
            json!(ignored_devices
                .iter()
                .map(|d| json!({ "vid_pid": d.vid_pid, "description": d.description }))
                .collect::<Vec<_>>()),
        );
        result.add_detail("ignored_count", json!(ignored_devices.len()));
    }

    result.add_summary("total_differences", json!(result.difference_count()));
    result.add_summary("usb_devices_current", json!(current.len()));
    result.add_summary("usb_devices_baseline", json!(baseline.len()));
    result.add_summary("critical_usb_current", json!(current_critical.len()));
    result.add_summary("critical_usb_baseline", json!(baseline_critical.len()));
    result.add_summary("ignored_devices_count", json!(ignored_devices.len()));
    result.add_summary(
        "status_description",
        json!(if result.status() == Status::Pass {
            "USB devices match the baseline"
        } else {
            "USB device differences detected"
        }),
    );

    result
}

fn group_by_vid_pid<'a>(devices: &[&'a UsbDevice]) -> BTreeMap<&'a str, Vec<&'a UsbDevice>> {
    let mut groups: BTreeMap<&str, Vec<&UsbDevice>> = BTreeMap::new();
    for device in devices.iter().copied() {
        groups.entry(device.vid_pid.as_str()).or_default().push(device);
    }
    groups
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn usb(vid_pid: &str, description: &str) -> UsbDevice {
        UsbDevice {
            bus: "001".to_owned(),
            device: "002".to_owned(),
            vid_pid: vid_pid.to_owned(),
            description: description.to_owned(),
            vendor: String::new(),
        }
    }

    #[test]
    fn test_criticality_predicate() {
        assert!(is_critical_usb(&usb("1d6b:0002", "Linux Foundation 2.0 root hub")));
        assert!(is_critical_usb(&usb("046d:c31c", "Logitech Keyboard K120")));
        assert!(is_critical_usb(&usb("8087:0024", "xHCI Host Controller")));
        assert!(!is_critical_usb(&usb("0781:5567", "SanDisk Cruzer Blade")));

        let mut chipset = usb("8086:1234", "Unmarked device");
        chipset.vendor = "Intel Corp.".to_owned();
        assert!(is_critical_usb(&chipset));
    }

    #[test]
    fn test_identical_snapshots_pass() {
        let devices = vec![
            usb("1d6b:0002", "Linux Foundation 2.0 root hub"),
            usb("1d6b:0003", "Linux Foundation 3.0 root hub"),
        ];

        let result = compare_usb_devices(&devices, &devices.clone());
        assert_eq!(result.status(), Status::Pass);
        assert!(result.differences().is_empty());
    }

    #[test]
    fn test_critical_shortfall_fails() {
        let baseline = vec![
            usb("1d6b:0002", "Linux Foundation 2.0 root hub"),
            usb("1d6b:0002", "Linux Foundation 2.0 root hub"),
        ];
        let current = vec![usb("1d6b:0002", "Linux Foundation 2.0 root hub")];

        let result = compare_usb_devices(&baseline, &current);
        assert_eq!(result.status(), Status::Fail);
        assert!(result.differences().iter().any(|d| d.message.contains(
            "USB device 1d6b:0002 (Linux Foundation 2.0 root hub): expected 2, found 1"
        )));
    }

    #[test]
    fn test_critical_surplus_is_warning() {
        let baseline = vec![usb("1d6b:0002", "Linux Foundation 2.0 root hub")];
        let current = vec![
            usb("1d6b:0002", "Linux Foundation 2.0 root hub"),
            usb("046d:c31c", "Logitech Keyboard K120"),
        ];

        let result = compare_usb_devices(&baseline, &current);
        assert_eq!(result.status(), Status::Warning);
    }

    #[test]
    fn test_ignored_kvm_device_keeps_status_but_shows_in_report() {
        let baseline = vec![usb("1d6b:0002", "Linux Foundation 2.0 root hub")];
        let current = vec![
            usb("1d6b:0002", "Linux Foundation 2.0 root hub"),
            usb("0557:8021", "ATEN International KVM hub"),
        ];

        let result = compare_usb_devices(&baseline, &current);
        assert_eq!(result.status(), Status::Pass);
        assert!(result.differences().is_empty());

        let report = json!(result);
        assert_eq!(report["details"]["ignored_count"], json!(1));
        assert_eq!(
            report["details"]["ignored_devices"][0]["vid_pid"],
            json!("0557:8021")
        );
    }

    #[test]
    fn test_non_critical_churn_is_invisible() {
        let baseline = vec![usb("0781:5567", "SanDisk Cruzer Blade")];
        let current: Vec<UsbDevice> = Vec::new();

        let result = compare_usb_devices(&baseline, &current);
        assert_eq!(result.status(), Status::Pass);
    }
}
