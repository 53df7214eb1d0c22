// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use anyhow::Result;
use assert_json_diff::assert_json_eq;
use serde_json::json;

use hwqa::sensors::{validate_readings, SensorReadings, ValidationReport};
use hwqa::{SensorLimitsDoc, Status};

use crate::fixture;

fn readings() -> Result<SensorReadings> {
    Ok(serde_json::from_value(fixture::healthy_readings())?)
}

#[test]
fn test_healthy_unit_passes_end_to_end() -> Result<()> {
    let limits = SensorLimitsDoc::from_value(fixture::limits_doc())?;
    let report = validate_readings(&readings()?, &limits);

    assert_eq!(report.overall_status, Status::Pass);
    assert_eq!(report.overall_status.exit_code(), 0);

    let value = json!(report);
    assert_json_eq!(
        value["summary"],
        json!({
            // 3 voltages + 4 temperatures (one na/nc empty slot) + 2 fans
            // + 1 power + 2 discrete; the empty slot is checked but skipped
            "total_checked": 12,
            "total_passed": 11,
            "total_violations": 0,
            "categories_checked": 5
        })
    );
    for category in ["voltages", "temperatures", "fans", "power", "discrete"] {
        assert_eq!(
            value["category_results"][category]["status"],
            json!("PASS"),
            "category {category}"
        );
    }

    Ok(())
}

#[test]
fn test_empty_riser_slot_sensor_is_skipped_not_flagged() -> Result<()> {
    let limits = SensorLimitsDoc::from_value(fixture::limits_doc())?;
    let report = validate_readings(&readings()?, &limits);

    // RISER3_TEMP reads na/nc: an empty slot, not a violation
    assert_eq!(report.category_results.temperatures.skipped, 1);
    assert!(report.category_results.temperatures.violations.is_empty());

    Ok(())
}

#[test]
fn test_overvoltage_outranks_soft_warning() -> Result<()> {
    let limits = SensorLimitsDoc::from_value(fixture::limits_doc())?;
    let mut live = readings()?;
    if let Some(reading) = live.get_mut("P12V") {
        reading.value = "13.1".to_owned();
    }

    let report = validate_readings(&live, &limits);
    assert_eq!(report.overall_status, Status::Fail);

    let value = json!(report);
    assert_eq!(
        value["category_results"]["voltages"]["violations"][0]["type"],
        json!("OVERVOLTAGE")
    );

    Ok(())
}

#[test]
fn test_missing_critical_temperature_sensor_warns() -> Result<()> {
    let limits = SensorLimitsDoc::from_value(fixture::limits_doc())?;
    let mut live = readings()?;
    live.remove("CPU1_TEMP");

    let report = validate_readings(&live, &limits);
    assert_eq!(report.overall_status, Status::Warning);
    assert_eq!(report.overall_status.exit_code(), 2);

    let value = json!(report);
    assert_eq!(
        value["category_results"]["temperatures"]["violations"][0]["type"],
        json!("MISSING_CRITICAL")
    );

    Ok(())
}

#[test]
fn test_malformed_limit_record_degrades_one_category_only() -> Result<()> {
    let mut doc = fixture::limits_doc();
    doc["voltage_limits"]["P12V"] = json!({ "min": "eleven-ish" });
    let limits = SensorLimitsDoc::from_value(doc)?;

    let report = validate_readings(&readings()?, &limits);

    assert_eq!(report.overall_status, Status::Error);
    assert_eq!(report.overall_status.exit_code(), 3);
    assert_eq!(report.category_results.voltages.status, Status::Error);
    assert!(report
        .category_results
        .voltages
        .error
        .as_deref()
        .is_some_and(|e| e.contains("P12V")));
    assert_eq!(report.category_results.temperatures.status, Status::Pass);
    assert_eq!(report.category_results.fans.status, Status::Pass);
    assert_eq!(report.summary.categories_checked, 4);

    Ok(())
}

#[test]
fn test_collection_failure_is_error_not_fail() {
    let report = ValidationReport::collection_failed("ipmitool: Unable to establish IPMI v2 session");

    assert_eq!(report.overall_status, Status::Error);
    assert_eq!(report.overall_status.exit_code(), 3);

    let value = json!(report);
    assert_eq!(
        value["error_details"]["error_type"],
        json!("SENSOR_COLLECTION_FAILED")
    );
    assert_eq!(value["summary"]["categories_checked"], json!(0));
}

#[test]
fn test_comment_keys_are_ignored_everywhere() -> Result<()> {
    // every category map in the fixture carries a comment key; none may
    // surface as a sensor
    let limits = SensorLimitsDoc::from_value(fixture::limits_doc())?;
    let report = validate_readings(&readings()?, &limits);

    let value = json!(report);
    for category in ["voltages", "temperatures", "discrete"] {
        let violations = value["category_results"][category]["violations"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        assert!(
            violations.iter().all(|v| v["sensor"] != json!("comment")),
            "comment leaked into {category}"
        );
    }
    assert_eq!(report.category_results.discrete.actually_checked, 2);

    Ok(())
}

#[test]
fn test_report_is_byte_identical_across_runs() -> Result<()> {
    let limits = SensorLimitsDoc::from_value(fixture::limits_doc())?;
    let live = readings()?;

    let first = serde_json::to_string(&validate_readings(&live, &limits))?;
    let second = serde_json::to_string(&validate_readings(&live, &limits))?;
    assert_eq!(first, second);

    Ok(())
}
