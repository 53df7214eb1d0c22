// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors surfaced by the engine.
///
/// Per-value parse failures are not errors: they are recovered locally as
/// typed findings inside a report. Only structural problems reach this type,
/// either failing fast at document deserialization or being converted into
/// an ERROR-status category stub at the aggregator boundary.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A snapshot or limits document failed structural validation, e.g. a
    /// required entity array is absent. The underlying serde error names
    /// the missing field.
    #[error("malformed {document} document: {source}")]
    MalformedDocument {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A per-sensor limit record could not be typed, e.g. a voltage bound
    /// that is not a number. Caught at the category boundary so the other
    /// categories still evaluate.
    #[error("invalid limit record for sensor {sensor:?}: {source}")]
    LimitRecord {
        sensor: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
