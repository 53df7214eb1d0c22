// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Serialize;

use crate::status::Status;

/// What a sensor violation is about. Threshold kinds are ordered hard
/// before soft in every validator, so a value breaking both bounds reports
/// the hard kind only.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    Missing,
    MissingCritical,
    Unavailable,
    StatusWarning,
    StatusError,
    ParseError,
    SensorDataInconsistent,
    Undervoltage,
    Overvoltage,
    VoltageWarningLow,
    VoltageWarningHigh,
    Undertemperature,
    Overtemperature,
    TemperatureWarning,
    OutOfRange,
    CriticalStatus,
    UnexpectedStatus,
}

/// One judged sensor violation with the evidence needed to act on it.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Violation {
    pub sensor: String,

    #[serde(rename = "type")]
    pub kind: ViolationKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<String>,

    pub message: String,
}

impl Violation {
    pub fn new(sensor: &str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Violation {
            sensor: sensor.to_owned(),
            kind,
            value: None,
            limit: None,
            expected: None,
            observed: None,
            message: message.into(),
        }
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn limit(mut self, limit: f64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn expected(mut self, expected: &[String]) -> Self {
        self.expected = Some(expected.to_vec());
        self
    }

    pub fn observed(mut self, observed: &str) -> Self {
        self.observed = Some(observed.to_owned());
        self
    }
}

/// Outcome of one sensor category: counters, the violations list, and the
/// derived status.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CategoryResult {
    pub actually_checked: u32,
    pub passed: u32,
    pub warning: u32,
    pub failed: u32,
    pub missing: u32,
    pub skipped: u32,
    pub violations: Vec<Violation>,
    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for CategoryResult {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryResult {
    pub fn new() -> Self {
        CategoryResult {
            actually_checked: 0,
            passed: 0,
            warning: 0,
            failed: 0,
            missing: 0,
            skipped: 0,
            violations: Vec::new(),
            status: Status::Pass,
            error: None,
        }
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Derives the category status from the counters: any failed sensor
    /// fails the category, otherwise any missing or warning sensor degrades
    /// it to WARNING.
    pub fn finalized(mut self) -> Self {
        self.status = if self.failed > 0 {
            Status::Fail
        } else if self.missing > 0 || self.warning > 0 {
            Status::Warning
        } else {
            Status::Pass
        };
        self
    }

    /// Stand-in for a category whose evaluation failed outright. Carries
    /// the error message and an ERROR status; the counters stay at zero
    /// because nothing was judged.
    pub fn error_stub(message: impl Into<String>) -> Self {
        CategoryResult {
            status: Status::Error,
            error: Some(message.into()),
            ..CategoryResult::new()
        }
    }
}
