// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One BMC sensor reading as reported by `ipmitool sensor list`: raw value,
/// unit, and status strings, all requiring normalization before judgment.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SensorReading {
    pub value: String,

    #[serde(default)]
    pub unit: String,

    pub status: String,
}

impl SensorReading {
    pub fn new(value: &str, unit: &str, status: &str) -> Self {
        SensorReading {
            value: value.to_owned(),
            unit: unit.to_owned(),
            status: status.to_owned(),
        }
    }

    /// Whether the BMC reports the value slot as empty. Whether that is
    /// benign depends on the sensor category and status.
    pub fn is_unavailable(&self) -> bool {
        self.value.trim() == "na"
    }
}

/// Live sensor snapshot keyed by sensor name, iterated in name order.
pub type SensorReadings = BTreeMap<String, SensorReading>;

/// Statuses that count as a full pass: `ok`, and `nc` (no contact, the
/// normal state of an unpopulated slot's sensor).
pub(crate) fn status_is_acceptable(status: &str) -> bool {
    matches!(status.to_ascii_lowercase().as_str(), "ok" | "nc")
}

/// Statuses tolerated with a warning: `nr` (no reading) and `ns` (not
/// specified) mean the BMC could not deliver data right now.
pub(crate) fn status_is_degraded(status: &str) -> bool {
    matches!(status.to_ascii_lowercase().as_str(), "nr" | "ns")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_sets() {
        assert!(status_is_acceptable("ok"));
        assert!(status_is_acceptable("OK"));
        assert!(status_is_acceptable("nc"));
        assert!(!status_is_acceptable("nr"));

        assert!(status_is_degraded("nr"));
        assert!(status_is_degraded("ns"));
        assert!(!status_is_degraded("ok"));
        assert!(!status_is_degraded("cr"));
    }

    #[test]
    fn test_unavailable_marker() {
        assert!(SensorReading::new("na", "Volts", "ok").is_unavailable());
        assert!(!SensorReading::new("12.1", "Volts", "ok").is_unavailable());
    }
}
