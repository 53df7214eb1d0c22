// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::Result;
use crate::normalize::parse_numeric;
use crate::sensors::reading::{status_is_acceptable, status_is_degraded, SensorReadings};
use crate::sensors::result::{CategoryResult, Violation, ViolationKind};

/// Sane draw range for a single server chassis. As with fans, the bounds
/// are fixed constants selected by reported unit rather than per-sensor
/// configuration.
const POWER_WATTS_MIN: f64 = 0.0;
const POWER_WATTS_MAX: f64 = 2000.0;

/// Validates every sensor reporting in watts.
pub fn validate_power(readings: &SensorReadings) -> Result<CategoryResult> {
    let mut out = CategoryResult::new();

    for (name, reading) in readings {
        if !reading.unit.eq_ignore_ascii_case("watts") {
            continue;
        }
        out.actually_checked += 1;

        let Some(watts) = parse_numeric(&reading.value) else {
            out.skipped += 1;
            continue;
        };

        if !status_is_acceptable(&reading.status) {
            if status_is_degraded(&reading.status) {
                out.warning += 1;
            } else {
                out.failed += 1;
                out.push(
                    Violation::new(
                        name,
                        ViolationKind::StatusError,
                        format!(
                            "Power sensor {name} reports unexpected status: {}",
                            reading.status
                        ),
                    )
                    .value(watts)
                    .observed(&reading.status),
                );
                continue;
            }
        }

        if !(POWER_WATTS_MIN..=POWER_WATTS_MAX).contains(&watts) {
            out.failed += 1;
            out.push(
                Violation::new(
                    name,
                    ViolationKind::OutOfRange,
                    format!("Power draw outside sane range on {name}: {watts}W"),
                )
                .value(watts),
            );
        } else {
            out.passed += 1;
        }
    }

    Ok(out.finalized())
}
