// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The comparison engine: judges a freshly collected hardware snapshot
//! against a golden baseline, component by component, and folds the six
//! component verdicts into one diff report.

mod memory;
mod pci;
mod processors;
mod reconcile;
mod result;
mod riser;
mod snapshot;
mod storage;
mod usb;

pub use memory::*;
pub use pci::*;
pub use processors::*;
pub use result::*;
pub use riser::*;
pub use snapshot::*;
pub use storage::*;
pub use usb::*;

use serde::Serialize;

use crate::status::Status;

/// Dates describing the two snapshots being compared, carried from the
/// input documents. The engine never reads the clock itself.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ScanInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_date: Option<chrono::NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_scan_date: Option<chrono::NaiveDate>,
}

/// Per-component comparison outcomes.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ComponentResults {
    pub processors: ComparisonResult,
    pub memory: ComparisonResult,
    pub pci_devices: ComparisonResult,
    pub usb_devices: ComparisonResult,
    pub storage_devices: ComparisonResult,
    pub riser_cards: ComparisonResult,
}

impl ComponentResults {
    fn statuses(&self) -> [Status; 6] {
        [
            self.processors.status(),
            self.memory.status(),
            self.pci_devices.status(),
            self.usb_devices.status(),
            self.storage_devices.status(),
            self.riser_cards.status(),
        ]
    }

    fn total_differences(&self) -> usize {
        [
            &self.processors,
            &self.memory,
            &self.pci_devices,
            &self.usb_devices,
            &self.storage_devices,
            &self.riser_cards,
        ]
        .iter()
        .map(|r| r.difference_count())
        .sum()
    }
}

/// Roll-up counters across the six components.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DiffSummary {
    pub total_components_checked: usize,
    pub components_passed: usize,
    pub components_warning: usize,
    pub components_failed: usize,
    pub total_differences: usize,
}

/// The full diff report: one escalated overall status with per-component
/// evidence.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DiffReport {
    pub overall_status: Status,
    pub component_results: ComponentResults,
    pub summary: DiffSummary,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_info: Option<ScanInfo>,
}

impl DiffReport {
    /// Attaches snapshot dates to the report.
    pub fn with_scan_info(mut self, scan_info: ScanInfo) -> Self {
        self.scan_info = Some(scan_info);
        self
    }
}

/// Compares a current snapshot against the baseline and produces the diff
/// report. Pure: identical inputs always produce an identical report.
pub fn compare_snapshots(baseline: &HardwareSnapshot, current: &HardwareSnapshot) -> DiffReport {
    tracing::debug!("comparing snapshot against baseline");

    let components = ComponentResults {
        processors: compare_processors(&baseline.processors, &current.processors),
        memory: compare_memory(&baseline.memory_modules, &current.memory_modules),
        pci_devices: compare_pci_devices(&baseline.pci_devices, &current.pci_devices),
        usb_devices: compare_usb_devices(&baseline.usb_devices, &current.usb_devices),
        storage_devices: compare_storage_devices(
            &baseline.storage_devices,
            &current.storage_devices,
        ),
        riser_cards: compare_riser_cards(&baseline.riser_cards, &current.riser_cards),
    };

    let statuses = components.statuses();
    let overall_status = Status::fold(statuses);

    let summary = DiffSummary {
        total_components_checked: statuses.iter().filter(|s| **s != Status::Unknown).count(),
        components_passed: statuses.iter().filter(|s| **s == Status::Pass).count(),
        components_warning: statuses.iter().filter(|s| **s == Status::Warning).count(),
        components_failed: statuses.iter().filter(|s| **s == Status::Fail).count(),
        total_differences: components.total_differences(),
    };

    tracing::info!(
        status = ?overall_status,
        differences = summary.total_differences,
        "hardware diff complete"
    );

    DiffReport {
        overall_status,
        component_results: components,
        summary,
        scan_info: None,
    }
}
