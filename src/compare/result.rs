// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::status::Status;

/// How bad one observed difference is. Severity maps onto [`Status`] for
/// escalation: an informational note never moves the verdict, a minor
/// difference degrades it to WARNING, a major one to FAIL.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Minor,
    Major,
}

impl Severity {
    pub fn status(self) -> Status {
        match self {
            Severity::Info => Status::Pass,
            Severity::Minor => Status::Warning,
            Severity::Major => Status::Fail,
        }
    }
}

/// What kind of difference was observed, independent of the component it
/// was observed on.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    CountMismatch,
    Missing,
    Extra,
    FieldMismatch,
    DetectionDegraded,
    PopulationChange,
    CapacityMismatch,
    SerialMissing,
    NewDeviceClass,
    DescriptionChanged,
}

/// One judged difference between baseline and current.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Difference {
    pub kind: DifferenceKind,
    pub message: String,
    pub severity: Severity,
}

impl Difference {
    pub fn new(kind: DifferenceKind, severity: Severity, message: impl Into<String>) -> Self {
        Difference {
            kind,
            severity,
            message: message.into(),
        }
    }
}

/// The outcome of one component comparison.
///
/// The status is maintained by construction: every difference added through
/// [`ComparisonResult::push`] escalates it by the difference's severity, so
/// the status always equals the escalation of PASS with every recorded
/// difference and can never be edited out of step with the list.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ComparisonResult {
    status: Status,
    differences: Vec<Difference>,
    summary: BTreeMap<String, serde_json::Value>,
    details: BTreeMap<String, serde_json::Value>,
}

impl Default for ComparisonResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonResult {
    pub fn new() -> Self {
        ComparisonResult {
            status: Status::Pass,
            differences: Vec::new(),
            summary: BTreeMap::new(),
            details: BTreeMap::new(),
        }
    }

    /// Records a difference and escalates the component status accordingly.
    pub fn push(&mut self, difference: Difference) {
        self.status = self.status.escalate(difference.severity.status());
        self.differences.push(difference);
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    pub fn difference_count(&self) -> usize {
        self.differences.len()
    }

    pub fn add_summary(&mut self, key: &str, value: serde_json::Value) {
        self.summary.insert(key.to_owned(), value);
    }

    pub fn add_detail(&mut self, key: &str, value: serde_json::Value) {
        self.details.insert(key.to_owned(), value);
    }
}
