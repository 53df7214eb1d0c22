// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Already-deserialized configuration documents. Loading these from disk is
//! the caller's concern; the engine only defines the shapes and the
//! structural validation that happens during deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compare::HardwareSnapshot;
use crate::error::{Error, Result};

/// A raw category map from the limits document, keyed by sensor name.
///
/// Records stay untyped until a validator iterates them: a malformed record
/// then fails that one category instead of the whole document, and the
/// conventional `"comment"` key is skipped during iteration.
pub type LimitTable = BTreeMap<String, serde_json::Value>;

/// The golden-reference document a unit under test is judged against.
///
/// Carries the reference [`HardwareSnapshot`] plus free-form metadata
/// (`expected_counts`, `validation_rules`) that the engine does not
/// interpret. All six entity arrays are required; deserialization fails
/// fast naming any missing one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BaselineDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_date: Option<chrono::NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub snapshot: HardwareSnapshot,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expected_counts: BTreeMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub validation_rules: BTreeMap<String, serde_json::Value>,
}

impl BaselineDoc {
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|source| Error::MalformedDocument {
            document: "baseline",
            source,
        })
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|source| Error::MalformedDocument {
            document: "baseline",
            source,
        })
    }
}

/// Published operating limits for the board's BMC sensors.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SensorLimitsDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_model: Option<String>,

    pub voltage_limits: LimitTable,
    pub temperature_limits: LimitTable,
    pub discrete_sensors: DiscreteSpec,

    #[serde(default)]
    pub validation_rules: ValidationRules,
}

impl SensorLimitsDoc {
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|source| Error::MalformedDocument {
            document: "sensor limits",
            source,
        })
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|source| Error::MalformedDocument {
            document: "sensor limits",
            source,
        })
    }
}

/// Expectations for discrete (status-code) sensors: the per-sensor status
/// whitelist and the list of sensors where a mismatch is a hard failure.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DiscreteSpec {
    #[serde(default)]
    pub acceptable_statuses: LimitTable,

    #[serde(default)]
    pub critical_if_different: Vec<String>,
}

impl DiscreteSpec {
    pub fn is_critical(&self, sensor: &str) -> bool {
        self.critical_if_different.iter().any(|s| s == sensor)
    }
}

/// Sensor presence policy: which sensors must exist on the board and which
/// are allowed to be absent (optional risers, unpopulated slots).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ValidationRules {
    #[serde(default)]
    pub critical_sensors: Vec<String>,

    #[serde(default)]
    pub optional_sensors: Vec<String>,
}

impl ValidationRules {
    pub fn is_critical(&self, sensor: &str) -> bool {
        self.critical_sensors.iter().any(|s| s == sensor)
    }

    pub fn is_optional(&self, sensor: &str) -> bool {
        self.optional_sensors.iter().any(|s| s == sensor)
    }
}

/// Voltage rail limits: hard bounds and optional soft warning bounds.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct VoltageLimit {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub warn_min: Option<f64>,
    #[serde(default)]
    pub warn_max: Option<f64>,
}

/// Temperature limits: hard bounds plus a single-sided soft warning bound.
/// Undertemperature is rare and usually a sensor fault rather than a
/// thermal risk, so there is no `warn_min`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct TemperatureLimit {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub warn: Option<f64>,
}

/// Iterates a raw category map in sorted order, typing each record and
/// skipping the conventional `"comment"` key. A record that cannot be
/// typed fails the whole category with [`Error::LimitRecord`].
pub(crate) fn typed_entries<T>(table: &LimitTable) -> Result<Vec<(&str, T)>>
where
    T: serde::de::DeserializeOwned,
{
    let mut entries = Vec::with_capacity(table.len());
    for (name, record) in table {
        if name == "comment" {
            continue;
        }
        let typed = T::deserialize(record).map_err(|source| Error::LimitRecord {
            sensor: name.clone(),
            source,
        })?;
        entries.push((name.as_str(), typed));
    }
    Ok(entries)
}
