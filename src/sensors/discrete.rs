// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::{DiscreteSpec, ValidationRules};
use crate::error::{Error, Result};
use crate::sensors::reading::SensorReadings;
use crate::sensors::result::{CategoryResult, Violation, ViolationKind};

/// Validates discrete (status-code) sensors against their per-sensor
/// status whitelists. Status strings are compared verbatim: BMC event
/// strings are case-significant.
pub fn validate_discrete(
    readings: &SensorReadings,
    spec: &DiscreteSpec,
    rules: &ValidationRules,
) -> Result<CategoryResult> {
    let mut out = CategoryResult::new();

    for (name, record) in &spec.acceptable_statuses {
        if name == "comment" {
            continue;
        }
        let expected: Vec<String> =
            serde_json::from_value(record.clone()).map_err(|source| Error::LimitRecord {
                sensor: name.clone(),
                source,
            })?;

        let Some(reading) = readings.get(name) else {
            if rules.is_optional(name) {
                out.skipped += 1;
                continue;
            }
            out.missing += 1;
            let kind = if rules.is_critical(name) {
                ViolationKind::MissingCritical
            } else {
                ViolationKind::Missing
            };
            out.push(Violation::new(
                name,
                kind,
                format!("Discrete sensor {name} is not present in the live readings"),
            ));
            continue;
        };

        out.actually_checked += 1;

        if expected.iter().any(|s| *s == reading.status) {
            out.passed += 1;
            continue;
        }

        if spec.is_critical(name) {
            out.failed += 1;
            out.push(
                Violation::new(
                    name,
                    ViolationKind::CriticalStatus,
                    format!(
                        "{name}: critical status '{}', expected one of {expected:?}",
                        reading.status
                    ),
                )
                .observed(&reading.status)
                .expected(&expected),
            );
        } else {
            out.warning += 1;
            out.push(
                Violation::new(
                    name,
                    ViolationKind::UnexpectedStatus,
                    format!(
                        "{name}: unexpected status '{}', expected one of {expected:?}",
                        reading.status
                    ),
                )
                .observed(&reading.status)
                .expected(&expected),
            );
        }
    }

    Ok(out.finalized())
}
