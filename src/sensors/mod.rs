// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The validation engine: judges a live BMC sensor snapshot against the
//! board's published operating limits, category by category, and folds the
//! five category verdicts into one validation report.

mod discrete;
mod fan;
mod power;
mod reading;
mod result;
mod temperature;
mod voltage;

pub use discrete::*;
pub use fan::*;
pub use power::*;
pub use reading::*;
pub use result::*;
pub use temperature::*;
pub use voltage::*;

use serde::Serialize;

use crate::config::SensorLimitsDoc;
use crate::status::Status;

const COLLECTION_FAILED: &str = "SENSOR_COLLECTION_FAILED";

/// Per-category validation outcomes.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CategoryResults {
    pub voltages: CategoryResult,
    pub temperatures: CategoryResult,
    pub fans: CategoryResult,
    pub power: CategoryResult,
    pub discrete: CategoryResult,
}

impl CategoryResults {
    fn all(&self) -> [&CategoryResult; 5] {
        [
            &self.voltages,
            &self.temperatures,
            &self.fans,
            &self.power,
            &self.discrete,
        ]
    }
}

/// Roll-up counters across the five categories. Only sensors that were
/// actually evaluated are counted; skipped optional sensors are not.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ValidationSummary {
    pub total_checked: u32,
    pub total_passed: u32,
    pub total_violations: usize,
    pub categories_checked: usize,
}

/// Why a validation run could not be judged at all.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ErrorDetails {
    pub error_type: String,
    pub message: String,
}

/// The full validation report: one escalated overall status with
/// per-category evidence.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ValidationReport {
    pub overall_status: Status,
    pub category_results: CategoryResults,
    pub summary: ValidationSummary,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<ErrorDetails>,
}

impl ValidationReport {
    /// Report for a run where the collector could not supply a sensor
    /// snapshot at all. The overall status is ERROR, never FAIL: nothing
    /// was judged.
    pub fn collection_failed(message: &str) -> Self {
        let stub = || CategoryResult::error_stub("not evaluated: sensor collection failed");
        ValidationReport {
            overall_status: Status::Error,
            category_results: CategoryResults {
                voltages: stub(),
                temperatures: stub(),
                fans: stub(),
                power: stub(),
                discrete: stub(),
            },
            summary: ValidationSummary {
                total_checked: 0,
                total_passed: 0,
                total_violations: 0,
                categories_checked: 0,
            },
            error_details: Some(ErrorDetails {
                error_type: COLLECTION_FAILED.to_owned(),
                message: message.to_owned(),
            }),
        }
    }
}

/// Validates a live sensor snapshot against the limits document.
///
/// Each category is evaluated independently; a category whose evaluation
/// fails (e.g. a malformed limit record) is replaced by an ERROR-status
/// stub carrying the message, and the remaining categories still run. The
/// overall status is the escalation across all five categories, so a
/// category ERROR takes precedence over any FAIL.
pub fn validate_readings(readings: &SensorReadings, limits: &SensorLimitsDoc) -> ValidationReport {
    tracing::debug!(sensors = readings.len(), "validating sensor snapshot");

    let rules = &limits.validation_rules;
    let categories = CategoryResults {
        voltages: run_category("voltages", || {
            validate_voltages(readings, &limits.voltage_limits, rules)
        }),
        temperatures: run_category("temperatures", || {
            validate_temperatures(readings, &limits.temperature_limits, rules)
        }),
        fans: run_category("fans", || validate_fans(readings)),
        power: run_category("power", || validate_power(readings)),
        discrete: run_category("discrete", || {
            validate_discrete(readings, &limits.discrete_sensors, rules)
        }),
    };

    let overall_status = Status::fold(categories.all().map(|c| c.status));

    let summary = ValidationSummary {
        total_checked: categories.all().iter().map(|c| c.actually_checked).sum(),
        total_passed: categories.all().iter().map(|c| c.passed).sum(),
        total_violations: categories.all().iter().map(|c| c.violations.len()).sum(),
        categories_checked: categories
            .all()
            .iter()
            .filter(|c| c.status != Status::Error)
            .count(),
    };

    tracing::info!(
        status = ?overall_status,
        checked = summary.total_checked,
        violations = summary.total_violations,
        "sensor validation complete"
    );

    ValidationReport {
        overall_status,
        category_results: categories,
        summary,
        error_details: None,
    }
}

fn run_category<F>(name: &'static str, evaluate: F) -> CategoryResult
where
    F: FnOnce() -> crate::error::Result<CategoryResult>,
{
    match evaluate() {
        Ok(result) => result,
        Err(error) => {
            tracing::error!(category = name, error = %error, "category evaluation failed");
            CategoryResult::error_stub(error.to_string())
        }
    }
}
