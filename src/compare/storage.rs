// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::json;

use crate::compare::result::{ComparisonResult, Difference, DifferenceKind, Severity};
use crate::compare::snapshot::StorageDevice;
use crate::status::Status;

/// Transport/technology bucket a block device is sorted into before
/// comparison. Devices are only ever compared within their own bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StorageBucket {
    Nvme,
    Sata,
    Sas,
    Mmc,
    Usb,
    Raid,
    Other,
}

impl StorageBucket {
    const ALL: [StorageBucket; 7] = [
        StorageBucket::Nvme,
        StorageBucket::Sata,
        StorageBucket::Sas,
        StorageBucket::Mmc,
        StorageBucket::Usb,
        StorageBucket::Raid,
        StorageBucket::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StorageBucket::Nvme => "NVME",
            StorageBucket::Sata => "SATA",
            StorageBucket::Sas => "SAS",
            StorageBucket::Mmc => "MMC",
            StorageBucket::Usb => "USB",
            StorageBucket::Raid => "RAID",
            StorageBucket::Other => "OTHER",
        }
    }

    fn key(self) -> &'static str {
        match self {
            StorageBucket::Nvme => "nvme",
            StorageBucket::Sata => "sata",
            StorageBucket::Sas => "sas",
            StorageBucket::Mmc => "mmc",
            StorageBucket::Usb => "usb",
            StorageBucket::Raid => "raid",
            StorageBucket::Other => "other",
        }
    }
}

/// Whether a device is BMC-synthesized virtual media. Such devices appear
/// and disappear with remote-console sessions and are filtered from both
/// sides before any comparison.
pub fn is_virtual_media(device: &StorageDevice) -> bool {
    let model = device.model.to_ascii_lowercase();
    model.contains("virtual hdisk") || model.contains("ami virtual")
}

/// Sorts a block device into its type bucket using name-prefix and
/// model/transport keyword heuristics. Residual `sd*` devices with no
/// recognizable keywords are disambiguated by size: large spinning disks
/// (>100 GB, not SSD) are assumed SAS, everything else SATA.
pub fn classify_storage(device: &StorageDevice) -> StorageBucket {
    let name = device.name.to_ascii_lowercase();
    let model = device.model.to_ascii_lowercase();
    let transport = device.transport.to_ascii_lowercase();

    if name.starts_with("nvme") || model.contains("nvme") {
        return StorageBucket::Nvme;
    }
    if model.contains("sas") || transport.contains("sas") {
        return StorageBucket::Sas;
    }
    if ["raid", "logical", "virtual", "megaraid", "adaptec"]
        .iter()
        .any(|k| model.contains(k))
    {
        return StorageBucket::Raid;
    }
    if (name.starts_with("sd")
        && ["sata", "ata", "ssd"].iter().any(|k| model.contains(k)))
        || transport.contains("sata")
    {
        return StorageBucket::Sata;
    }
    if name.starts_with("mmcblk") || model.contains("mmc") {
        return StorageBucket::Mmc;
    }
    if transport.contains("usb") || model.contains("usb") {
        return StorageBucket::Usb;
    }
    if name.starts_with("sd") {
        return match size_gb(&device.size) {
            Some(size) if size > 100.0 && !model.contains("ssd") => StorageBucket::Sas,
            _ => StorageBucket::Sata,
        };
    }

    StorageBucket::Other
}

fn size_gb(size: &str) -> Option<f64> {
    let upper = size.to_ascii_uppercase();
    if !upper.contains("GB") {
        return None;
    }
    upper.replace("GB", "").trim().parse().ok()
}

/// Compares storage devices per type bucket.
///
/// There is no stable device identity within a bucket, so devices are
/// paired positionally after sorting each bucket by device name; a mere
/// enumeration-order change from the collector therefore cannot produce a
/// false mismatch. Any count or model difference fails the component:
/// storage has no warning tier.
pub fn compare_storage_devices(
    baseline: &[StorageDevice],
    current: &[StorageDevice],
) -> ComparisonResult {
    let mut result = ComparisonResult::new();

    let baseline_filtered: Vec<&StorageDevice> =
        baseline.iter().filter(|d| !is_virtual_media(d)).collect();
    let current_filtered: Vec<&StorageDevice> =
        current.iter().filter(|d| !is_virtual_media(d)).collect();

    let baseline_buckets = bucketize(&baseline_filtered);
    let current_buckets = bucketize(&current_filtered);

    let mut current_counts = serde_json::Map::new();
    let mut baseline_counts = serde_json::Map::new();

    for (index, bucket) in StorageBucket::ALL.iter().enumerate() {
        let label = bucket.label();
        let base_devices = &baseline_buckets[index];
        let cur_devices = &current_buckets[index];

        current_counts.insert(bucket.key().to_owned(), json!(cur_devices.len()));
        baseline_counts.insert(bucket.key().to_owned(), json!(base_devices.len()));

        if cur_devices.len() != base_devices.len() {
            result.push(Difference::new(
                DifferenceKind::CountMismatch,
                Severity::Major,
                format!(
                    "{label} count mismatch: current={}, baseline={}",
                    cur_devices.len(),
                    base_devices.len()
                ),
            ));
        }

        let slots = base_devices.len().max(cur_devices.len());
        for position in 0..slots {
            match (base_devices.get(position), cur_devices.get(position)) {
                (Some(base), None) => result.push(Difference::new(
                    DifferenceKind::Missing,
                    Severity::Major,
                    format!(
                        "{label} {}: missing in current (baseline has '{}')",
                        position + 1,
                        base.model
                    ),
                )),
                (None, Some(cur)) => result.push(Difference::new(
                    DifferenceKind::Extra,
                    Severity::Major,
                    format!(
                        "{label} {}: extra in current ('{}')",
                        position + 1,
                        cur.model
                    ),
                )),
                (Some(base), Some(cur)) if cur.model != base.model => {
                    result.push(Difference::new(
                        DifferenceKind::FieldMismatch,
                        Severity::Major,
                        format!(
                            "{label} {} model mismatch: current='{}', baseline='{}'",
                            position + 1,
                            cur.model,
                            base.model
                        ),
                    ));
                }
                _ => {}
            }
        }
    }

    result.add_detail("current_by_type", json!(current_counts));
    result.add_detail("baseline_by_type", json!(baseline_counts));
    result.add_detail(
        "virtual_devices_filtered",
        json!({
            "current": current.len() - current_filtered.len(),
            "baseline": baseline.len() - baseline_filtered.len(),
        }),
    );

    result.add_summary("total_differences", json!(result.difference_count()));
    result.add_summary("storage_devices_current", json!(current_filtered.len()));
    result.add_summary("storage_devices_baseline", json!(baseline_filtered.len()));
    result.add_summary(
        "status_description",
        json!(if result.status() == Status::Pass {
            "Storage devices match the baseline"
        } else {
            "Storage device differences detected"
        }),
    );

    result
}

/// Groups devices into the seven buckets, each sorted by device name so
/// positional pairing is stable across collector enumeration order.
fn bucketize<'a>(devices: &[&'a StorageDevice]) -> [Vec<&'a StorageDevice>; 7] {
    let mut buckets: [Vec<&StorageDevice>; 7] = Default::default();
    for device in devices.iter().copied() {
        buckets[classify_storage(device) as usize].push(device);
    }
    for bucket in &mut buckets {
        bucket.sort_by(|a, b| a.name.cmp(&b.name));
    }
    buckets
}
