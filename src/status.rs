// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Overall judgment for a component comparison, a sensor category, or a
/// whole report.
///
/// The variants form a strict total order used for escalation; the order is
/// the declaration order, so `escalate` is simply `max` and monotonicity is
/// a structural property rather than branching logic. ERROR ("could not
/// judge") is the top of the order and UNKNOWN ("never judged") outranks a
/// judged FAIL, so an unevaluated component can never soften a verdict.
///
/// # Examples
///
/// ```
/// use hwqa::Status;
///
/// let overall = Status::Pass
///     .escalate(Status::Warning)
///     .escalate(Status::Fail);
/// assert_eq!(overall, Status::Fail);
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "UNKNOWN")]
    Unknown,
    #[serde(rename = "ERROR")]
    Error,
}

impl Default for Status {
    fn default() -> Self {
        Status::Unknown
    }
}

impl Status {
    /// Returns the more severe of the two statuses. Never lowers severity:
    /// the result is always one of the operands and at least as severe as
    /// both. Commutative and associative, with [`Status::Pass`] as identity.
    pub fn escalate(self, candidate: Status) -> Status {
        self.max(candidate)
    }

    /// Folds a sequence of statuses into one, starting from PASS.
    pub fn fold<I>(statuses: I) -> Status
    where
        I: IntoIterator<Item = Status>,
    {
        statuses.into_iter().fold(Status::Pass, Status::escalate)
    }

    /// Process exit code the enclosing CLI maps this status to:
    /// 0 = PASS, 1 = FAIL, 2 = WARNING, 3 = could not judge.
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Pass => 0,
            Status::Fail => 1,
            Status::Warning => 2,
            Status::Unknown | Status::Error => 3,
        }
    }

    pub fn is_pass(self) -> bool {
        self == Status::Pass
    }
}
