// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity records for one hardware inventory snapshot, as handed over by
//! the collectors. Field spellings follow the collector documents
//! (`dmidecode`/`lspci`/`lsusb`/`lsblk`/`ipmitool fru` output parsed into
//! JSON).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Deserializes a core/thread count that collectors report as a number, a
/// numeric string, or a sentinel such as `"Unknown"` when running degraded.
/// Anything that is not a clean non-negative integer becomes `None`.
mod maybe_count {
    use serde::Deserialize;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::Number(n)) => n.as_u64().map(|v| v as u32),
            Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }
}

/// One CPU socket, keyed by its socket designation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Processor {
    pub socket: String,
    pub model: String,

    #[serde(default, deserialize_with = "maybe_count::deserialize")]
    pub cores: Option<u32>,

    #[serde(default, deserialize_with = "maybe_count::deserialize")]
    pub threads: Option<u32>,
}

/// One DIMM slot, keyed by its locator string. `size` stays in collector
/// form (`"32 GB"`, `"No Module Installed"`, …) and is normalized by the
/// memory comparator.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MemoryModule {
    pub slot: String,

    #[serde(default)]
    pub size: String,

    #[serde(default)]
    pub populated: bool,
}

/// One PCI device, keyed by its Bus:Device.Function address. The class
/// string may carry a trailing bracketed code (`"Ethernet controller
/// [0200]"`) and must be cleaned before any comparison.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PciDevice {
    pub bdf: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, rename = "class")]
    pub device_class: String,

    #[serde(default)]
    pub width: String,

    #[serde(default)]
    pub speed: String,
}

/// One enumerated USB device. VID:PID identifies the device model;
/// (bus, device) identifies the instance.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UsbDevice {
    #[serde(default)]
    pub bus: String,

    #[serde(default)]
    pub device: String,

    pub vid_pid: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub vendor: String,
}

/// One block device. There is no stable identity within a type bucket, so
/// the storage comparator pairs devices positionally after sorting by name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageDevice {
    pub name: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub size: String,

    #[serde(default)]
    pub transport: String,
}

/// One riser slot with its FRU identity block.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RiserCard {
    pub slot: String,

    #[serde(default)]
    pub populated: bool,

    #[serde(default)]
    pub fru_product_name: String,

    #[serde(default)]
    pub fru_manufacturer: String,

    #[serde(default)]
    pub fru_part_number: String,

    #[serde(default)]
    pub fru_serial_number: String,

    #[serde(default)]
    pub pcie_slots: Vec<String>,
}

/// A full inventory snapshot: what the collectors saw on one unit, or what
/// the golden baseline says they should see.
///
/// All six entity arrays are required. A document missing one fails
/// deserialization with an error naming the field; a snapshot is never
/// silently defaulted to empty.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HardwareSnapshot {
    pub processors: Vec<Processor>,
    pub memory_modules: Vec<MemoryModule>,
    pub pci_devices: Vec<PciDevice>,
    pub usb_devices: Vec<UsbDevice>,
    pub storage_devices: Vec<StorageDevice>,
    pub riser_cards: Vec<RiserCard>,
}

impl HardwareSnapshot {
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|source| Error::MalformedDocument {
            document: "snapshot",
            source,
        })
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|source| Error::MalformedDocument {
            document: "snapshot",
            source,
        })
    }
}
