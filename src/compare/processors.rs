// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::json;

use crate::compare::reconcile::reconcile;
use crate::compare::result::{ComparisonResult, Difference, DifferenceKind, Severity};
use crate::compare::snapshot::Processor;
use crate::status::Status;

/// Compares CPU sockets between baseline and current. Model and core/thread
/// counts must match exactly; a count that one collector could not read is
/// a degraded-detection warning instead, and is skipped entirely when
/// neither side has it.
pub fn compare_processors(baseline: &[Processor], current: &[Processor]) -> ComparisonResult {
    let mut result = ComparisonResult::new();
    let mut socket_comparison = Vec::new();

    if current.len() != baseline.len() {
        result.push(Difference::new(
            DifferenceKind::CountMismatch,
            Severity::Major,
            format!(
                "CPU count mismatch: current={}, baseline={}",
                current.len(),
                baseline.len()
            ),
        ));
    }

    let reconciled = reconcile(baseline, current, |p| p.socket.as_str());

    for (socket, _) in &reconciled.missing {
        result.push(Difference::new(
            DifferenceKind::Missing,
            Severity::Major,
            format!("CPU socket {socket} missing in current system"),
        ));
        socket_comparison.push(json!({ "socket": socket, "status": "MISSING" }));
    }

    for (socket, _) in &reconciled.extra {
        result.push(Difference::new(
            DifferenceKind::Extra,
            Severity::Minor,
            format!("Extra CPU socket {socket} in current system"),
        ));
        socket_comparison.push(json!({ "socket": socket, "status": "EXTRA" }));
    }

    for (socket, base, cur) in &reconciled.matched {
        if cur.model != base.model {
            result.push(Difference::new(
                DifferenceKind::FieldMismatch,
                Severity::Major,
                format!(
                    "CPU {socket} model mismatch: {} vs {}",
                    cur.model, base.model
                ),
            ));
        }
        compare_count(&mut result, socket, "cores", cur.cores, base.cores);
        compare_count(&mut result, socket, "threads", cur.threads, base.threads);
        socket_comparison.push(json!({ "socket": socket, "status": "MATCH" }));
    }

    result.add_detail("current_count", json!(current.len()));
    result.add_detail("baseline_count", json!(baseline.len()));
    result.add_detail("socket_comparison", json!(socket_comparison));

    result.add_summary("total_differences", json!(result.difference_count()));
    result.add_summary("cpu_sockets_current", json!(current.len()));
    result.add_summary("cpu_sockets_baseline", json!(baseline.len()));
    result.add_summary(
        "status_description",
        json!(if result.status() == Status::Pass {
            "Processors match the baseline"
        } else {
            "Processor differences detected"
        }),
    );

    result
}

fn compare_count(
    result: &mut ComparisonResult,
    socket: &str,
    field: &str,
    current: Option<u32>,
    baseline: Option<u32>,
) {
    match (current, baseline) {
        (Some(cur), Some(base)) if cur != base => result.push(Difference::new(
            DifferenceKind::FieldMismatch,
            Severity::Major,
            format!("CPU {socket} {field} mismatch: {cur} vs {base}"),
        )),
        (None, Some(base)) => result.push(Difference::new(
            DifferenceKind::DetectionDegraded,
            Severity::Minor,
            format!("CPU {socket}: {field} could not be determined on current system (baseline: {base})"),
        )),
        (Some(cur), None) => result.push(Difference::new(
            DifferenceKind::DetectionDegraded,
            Severity::Minor,
            format!("CPU {socket}: {field} missing from baseline (current: {cur})"),
        )),
        // equal, or unavailable on both sides
        _ => {}
    }
}
