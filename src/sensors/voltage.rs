// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::{typed_entries, LimitTable, ValidationRules, VoltageLimit};
use crate::error::Result;
use crate::normalize::parse_numeric;
use crate::sensors::reading::{status_is_acceptable, status_is_degraded, SensorReadings};
use crate::sensors::result::{CategoryResult, Violation, ViolationKind};

/// Validates voltage rails against their configured limits.
///
/// Hard bounds are checked before soft warning bounds, so a value breaking
/// both is reported as the hard violation only.
pub fn validate_voltages(
    readings: &SensorReadings,
    limits: &LimitTable,
    rules: &ValidationRules,
) -> Result<CategoryResult> {
    let mut out = CategoryResult::new();

    for (name, limit) in typed_entries::<VoltageLimit>(limits)? {
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
                format!("Sensor {name} is not present in the live readings"),
            ));
            continue;
        };

        out.actually_checked += 1;

        if reading.is_unavailable() {
            out.push(Violation::new(
                name,
                ViolationKind::Unavailable,
                format!("Sensor {name} unavailable: value=na"),
            ));
            continue;
        }

        if !status_is_acceptable(&reading.status) {
            if status_is_degraded(&reading.status) {
                out.warning += 1;
                out.push(
                    Violation::new(
                        name,
                        ViolationKind::StatusWarning,
                        format!("Sensor {name} reports degraded status: {}", reading.status),
                    )
                    .observed(&reading.status),
                );
            } else {
                out.push(
                    Violation::new(
                        name,
                        ViolationKind::StatusError,
                        format!("Sensor {name} reports unexpected status: {}", reading.status),
                    )
                    .observed(&reading.status),
                );
            }
            continue;
        }

        let Some(volts) = parse_numeric(&reading.value) else {
            out.push(Violation::new(
                name,
                ViolationKind::ParseError,
                format!("Could not parse value for {name}: '{}'", reading.value),
            ));
            continue;
        };

        // hard bounds first, then soft warning bounds
        if let Some(min) = limit.min.filter(|min| volts < *min) {
            out.failed += 1;
            out.push(
                Violation::new(
                    name,
                    ViolationKind::Undervoltage,
                    format!("{name}: {volts}V < {min}V"),
                )
                .value(volts)
                .limit(min),
            );
        } else if let Some(max) = limit.max.filter(|max| volts > *max) {
            out.failed += 1;
            out.push(
                Violation::new(
                    name,
                    ViolationKind::Overvoltage,
                    format!("{name}: {volts}V > {max}V"),
                )
                .value(volts)
                .limit(max),
            );
        } else if let Some(warn_min) = limit.warn_min.filter(|warn| volts < *warn) {
            out.warning += 1;
            out.push(
                Violation::new(
                    name,
                    ViolationKind::VoltageWarningLow,
                    format!("{name}: {volts}V < {warn_min}V (warning)"),
                )
                .value(volts)
                .limit(warn_min),
            );
        } else if let Some(warn_max) = limit.warn_max.filter(|warn| volts > *warn) {
            out.warning += 1;
            out.push(
                Violation::new(
                    name,
                    ViolationKind::VoltageWarningHigh,
                    format!("{name}: {volts}V > {warn_max}V (warning)"),
                )
                .value(volts)
                .limit(warn_max),
            );
        } else {
            out.passed += 1;
        }
    }

    Ok(out.finalized())
}
