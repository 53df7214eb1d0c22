// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::Result;
use crate::normalize::parse_numeric;
use crate::sensors::reading::{status_is_acceptable, status_is_degraded, SensorReadings};
use crate::sensors::result::{CategoryResult, Violation, ViolationKind};

/// Sane fan speed range. Tachometer readings outside it indicate a seized
/// or disconnected fan rather than a configured threshold violation, so the
/// bounds are fixed constants instead of per-sensor limits.
const FAN_RPM_MIN: f64 = 100.0;
const FAN_RPM_MAX: f64 = 20000.0;

/// Validates every sensor reporting in RPM. Selection is by unit alone:
/// fan sensor naming varies between boards, but the unit does not.
pub fn validate_fans(readings: &SensorReadings) -> Result<CategoryResult> {
    let mut out = CategoryResult::new();

    for (name, reading) in readings {
        if !reading.unit.eq_ignore_ascii_case("rpm") {
            continue;
        }
        out.actually_checked += 1;

        let Some(rpm) = parse_numeric(&reading.value) else {
            out.skipped += 1;
            continue;
        };

        if !status_is_acceptable(&reading.status) {
            if status_is_degraded(&reading.status) {
                // degraded but still delivering a value; range-check it below
                out.warning += 1;
            } else {
                out.failed += 1;
                out.push(
                    Violation::new(
                        name,
                        ViolationKind::StatusError,
                        format!("Fan {name} reports unexpected status: {}", reading.status),
                    )
                    .value(rpm)
                    .observed(&reading.status),
                );
                continue;
            }
        }

        if !(FAN_RPM_MIN..=FAN_RPM_MAX).contains(&rpm) {
            out.failed += 1;
            out.push(
                Violation::new(
                    name,
                    ViolationKind::OutOfRange,
                    format!("Fan {name} speed outside sane range: {rpm} RPM"),
                )
                .value(rpm),
            );
        } else {
            out.passed += 1;
        }
    }

    Ok(out.finalized())
}
