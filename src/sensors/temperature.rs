// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::{typed_entries, LimitTable, TemperatureLimit, ValidationRules};
use crate::error::Result;
use crate::normalize::parse_numeric;
use crate::sensors::reading::{status_is_acceptable, status_is_degraded, SensorReadings};
use crate::sensors::result::{CategoryResult, Violation, ViolationKind};

/// Validates temperature sensors against their configured limits.
///
/// An `na` value is a legitimate empty-slot signal when the status is
/// `nc`/`nr`; with status `ok` it is an inconsistency (the sensor claims
/// healthy but reports nothing) and is flagged as a possible sensor fault.
/// The warning bound is single-sided: undertemperature is itself treated as
/// a probable sensor fault, not a thermal risk.
pub fn validate_temperatures(
    readings: &SensorReadings,
    limits: &LimitTable,
    rules: &ValidationRules,
) -> Result<CategoryResult> {
    let mut out = CategoryResult::new();

    for (name, limit) in typed_entries::<TemperatureLimit>(limits)? {
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
            let status = reading.status.to_ascii_lowercase();
            match status.as_str() {
                // empty-slot sensors legitimately report no value
                "nc" | "nr" => {
                    out.skipped += 1;
                }
                "ok" => {
                    out.warning += 1;
                    out.push(Violation::new(
                        name,
                        ViolationKind::SensorDataInconsistent,
                        format!(
                            "Sensor {name}: status ok but no reading available (possible sensor fault)"
                        ),
                    ));
                }
                _ => {
                    if rules.is_optional(name) {
                        out.skipped += 1;
                    } else {
                        out.push(
                            Violation::new(
                                name,
                                ViolationKind::Unavailable,
                                format!(
                                    "Sensor {name} unavailable: value=na, status={}",
                                    reading.status
                                ),
                            )
                            .observed(&reading.status),
                        );
                    }
                }
            }
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

        let Some(temperature) = parse_numeric(&reading.value) else {
            out.push(Violation::new(
                name,
                ViolationKind::ParseError,
                format!("Could not parse value for {name}: '{}'", reading.value),
            ));
            continue;
        };

        // hard bounds first, then the single-sided warning bound
        if let Some(min) = limit.min.filter(|min| temperature < *min) {
            out.failed += 1;
            out.push(
                Violation::new(
                    name,
                    ViolationKind::Undertemperature,
                    format!("{name}: {temperature}°C < {min}°C (possible sensor fault)"),
                )
                .value(temperature)
                .limit(min),
            );
        } else if let Some(max) = limit.max.filter(|max| temperature > *max) {
            out.failed += 1;
            out.push(
                Violation::new(
                    name,
                    ViolationKind::Overtemperature,
                    format!("{name}: {temperature}°C > {max}°C (critical overheat)"),
                )
                .value(temperature)
                .limit(max),
            );
        } else if let Some(warn) = limit.warn.filter(|warn| temperature > *warn) {
            out.warning += 1;
            out.push(
                Violation::new(
                    name,
                    ViolationKind::TemperatureWarning,
                    format!("{name}: {temperature}°C > {warn}°C (warning)"),
                )
                .value(temperature)
                .limit(warn),
            );
        } else {
            out.passed += 1;
        }
    }

    Ok(out.finalized())
}
