// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::{json, Value};

/// A golden baseline document as the baseline builder would write it:
/// dual-socket board, four DIMMs, onboard networking, two NVMe drives and
/// one serialized riser.
pub fn baseline_doc() -> Value {
    json!({
        "board_model": "MB-93X",
        "baseline_date": "2026-01-15",
        "baseline_version": "1.0",
        "description": "Golden sample configuration",
        "processors": [
            { "socket": "CPU0", "model": "INTEL(R) XEON(R) GOLD 6530", "cores": 32, "threads": 64 },
            { "socket": "CPU1", "model": "INTEL(R) XEON(R) GOLD 6530", "cores": 32, "threads": 64 }
        ],
        "memory_modules": [
            { "slot": "DIMM_A0", "size": "32 GB", "populated": true },
            { "slot": "DIMM_A1", "size": "32 GB", "populated": true },
            { "slot": "DIMM_B0", "size": "32 GB", "populated": true },
            { "slot": "DIMM_B1", "size": "32 GB", "populated": true },
            { "slot": "DIMM_C0", "size": "No Module Installed", "populated": false }
        ],
        "pci_devices": [
            { "bdf": "00:00.0", "description": "Intel host bridge", "class": "Host bridge [0600]", "width": "x8", "speed": "8GT/s" },
            { "bdf": "01:00.0", "description": "Intel I350 port 1", "class": "Ethernet controller [0200]", "width": "x4", "speed": "5GT/s" },
            { "bdf": "01:00.1", "description": "Intel I350 port 2", "class": "Ethernet controller [0200]", "width": "x4", "speed": "5GT/s" },
            { "bdf": "03:00.0", "description": "ASPEED AST2600", "class": "VGA compatible controller [0300]", "width": "x1", "speed": "2.5GT/s" }
        ],
        "usb_devices": [
            { "bus": "001", "device": "001", "vid_pid": "1d6b:0002", "description": "Linux Foundation 2.0 root hub" },
            { "bus": "002", "device": "001", "vid_pid": "1d6b:0003", "description": "Linux Foundation 3.0 root hub" }
        ],
        "storage_devices": [
            { "name": "nvme0n1", "model": "SAMSUNG MZQL21T9HCJR", "size": "1920GB", "transport": "nvme" },
            { "name": "nvme1n1", "model": "SAMSUNG MZQL21T9HCJR", "size": "1920GB", "transport": "nvme" }
        ],
        "riser_cards": [
            {
                "slot": "RISER_SLOT_1",
                "populated": true,
                "fru_product_name": "MB93X-RISER-1",
                "fru_manufacturer": "GIGA-BYTE TECHNOLOGY CO., LTD",
                "fru_part_number": "25VH1-1A00-11NN",
                "fru_serial_number": "GBT12345678",
                "pcie_slots": ["SLOT2", "SLOT4"]
            }
        ],
        "expected_counts": {
            "cpu_sockets": 2,
            "memory_slots_populated": 4,
            "memory_size_total_gb": 128
        },
        "validation_rules": {
            "cpu_tolerance": "exact",
            "memory_tolerance": "slots_and_size"
        }
    })
}

/// The snapshot part of [`baseline_doc`], as a collector would report it on
/// a healthy unit.
pub fn healthy_snapshot() -> Value {
    let mut doc = baseline_doc();
    let snapshot = json!({
        "processors": doc["processors"].take(),
        "memory_modules": doc["memory_modules"].take(),
        "pci_devices": doc["pci_devices"].take(),
        "usb_devices": doc["usb_devices"].take(),
        "storage_devices": doc["storage_devices"].take(),
        "riser_cards": doc["riser_cards"].take(),
    });
    snapshot
}

/// A sensor limits document with the conventional `comment` keys that must
/// be ignored by iteration.
pub fn limits_doc() -> Value {
    json!({
        "board_model": "MB-93X",
        "voltage_limits": {
            "comment": "12V rail +/- 5% hard, +/- 3.3% soft",
            "P12V": { "min": 11.4, "max": 12.6, "warn_min": 11.6, "warn_max": 12.4 },
            "P5V":  { "min": 4.75, "max": 5.25 },
            "P3V3": { "min": 3.14, "max": 3.47 }
        },
        "temperature_limits": {
            "comment": "package and inlet limits per thermal spec",
            "CPU0_TEMP": { "min": 5, "max": 95, "warn": 85 },
            "CPU1_TEMP": { "min": 5, "max": 95, "warn": 85 },
            "MB_TEMP1": { "min": 0, "max": 75, "warn": 65 },
            "RISER3_TEMP": { "min": 0, "max": 75, "warn": 65 }
        },
        "discrete_sensors": {
            "acceptable_statuses": {
                "comment": "presence/fault bitfields",
                "PSU1_Status": ["ok", "0x0180"],
                "PSU2_Status": ["ok", "0x0180"]
            },
            "critical_if_different": ["PSU1_Status", "PSU2_Status"]
        },
        "validation_rules": {
            "critical_sensors": ["CPU0_TEMP", "CPU1_TEMP"],
            "optional_sensors": ["RISER3_TEMP"]
        }
    })
}

/// Live readings for a healthy unit, including the empty riser slot
/// reporting `na`/`nc`.
pub fn healthy_readings() -> Value {
    json!({
        "P12V": { "value": "12.1", "unit": "Volts", "status": "ok" },
        "P5V": { "value": "5.02", "unit": "Volts", "status": "ok" },
        "P3V3": { "value": "3,3", "unit": "Volts", "status": "ok" },
        "CPU0_TEMP": { "value": "47", "unit": "degrees C", "status": "ok" },
        "CPU1_TEMP": { "value": "45", "unit": "degrees C", "status": "ok" },
        "MB_TEMP1": { "value": "38", "unit": "degrees C", "status": "ok" },
        "RISER3_TEMP": { "value": "na", "unit": "degrees C", "status": "nc" },
        "SYS_FAN1": { "value": "5600", "unit": "RPM", "status": "ok" },
        "SYS_FAN2": { "value": "5700", "unit": "RPM", "status": "ok" },
        "PSU1_PIN": { "value": "420", "unit": "Watts", "status": "ok" },
        "PSU1_Status": { "value": "0x0", "unit": "discrete", "status": "ok" },
        "PSU2_Status": { "value": "0x0", "unit": "discrete", "status": "0x0180" }
    })
}
