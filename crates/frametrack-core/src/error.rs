use thiserror::Error;

/// Errors the tracking update and per-frame context can raise.
///
/// Configuration errors are checked at harness construction (see
/// `frametrack-pipeline`) and are not re-raised here; `CoreError` covers the
/// contract violations the core itself can detect while mutating the track
/// map for a single frame.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The tracking step ran before the detection step populated
    /// `object_detections` for this frame. Distinct from an empty list,
    /// which is a legitimate "nothing detected this frame".
    #[error("tracking update invoked before detections were populated for this frame")]
    DetectionsNotPopulated,

    /// An active class has no entry in the per-class configuration table.
    /// A programming error, not a recoverable runtime condition.
    #[error("no tracking configuration registered for active class {0:?}")]
    MissingClassConfig(String),
}
