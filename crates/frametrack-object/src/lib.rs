//! Persistent track identity: the capability set a tracked object exposes
//! to the core tracking update and to pipeline steps.

mod error;
mod key;
mod subclass_tally;
mod default_object;

pub use error::ObjectError;
pub use key::TrackKey;
pub use default_object::DefaultTrackableObject;

use frametrack_distance::ScoredObject;
use frametrack_predict::MovementPredictor;
use frametrack_types::Detection;

/// A persistent tracked object's capability set: construction from a
/// detection, per-frame update, lookahead prediction, and a fixed-key-set
/// attribute store.
///
/// `class_name` never changes after construction. `location_history` is
/// never truncated or reordered; `update` only ever appends to it.
pub trait TrackableObject: ScoredObject + std::fmt::Debug + Send {
    fn class_name(&self) -> &str;

    /// The plurality-winning subclass tag observed so far, ties broken by
    /// earliest observation.
    fn subclass_name(&self) -> &str;

    fn mask(&self) -> Option<&frametrack_types::Mask>;

    /// Ordered `(cx, cy)` points, one per accepted update including
    /// creation. Never empty.
    fn location_history(&self) -> &[(f64, f64)];

    fn first_seen(&self) -> u64;
    fn last_seen(&self) -> u64;

    /// Replaces box/mask/features with `detection`'s values, appends to the
    /// location history, and sets `last_seen = frame_number`.
    ///
    /// Postcondition: `last_seen() == frame_number` and
    /// `location_history().len()` increases by exactly one.
    fn update(&mut self, detection: &Detection, frame_number: u64);

    /// Delegates to the owned movement predictor, passing the current
    /// location and the history prefix excluding it.
    fn predict_locations(&mut self, n: usize) -> Vec<(f64, f64)>;

    fn get_tracking_attribute(&self, name: &str) -> Result<&serde_json::Value, ObjectError>;
    fn set_tracking_attribute(&mut self, name: &str, value: serde_json::Value) -> Result<(), ObjectError>;

    fn to_dict(&self) -> serde_json::Value;

    /// Explicit supertrait upcast, since `&dyn TrackableObject` cannot
    /// always be coerced to `&dyn ScoredObject` implicitly.
    fn as_scored_object(&self) -> &dyn ScoredObject;
}

/// Builds a [`TrackableObject`] for a newly-spawned track. Per-class
/// configuration tables store factories, not object instances, so the
/// tracking update never decides *how* a class's tracks are constructed —
/// only *when*.
pub trait TrackableObjectFactory: std::fmt::Debug + Send + Sync {
    fn from_detection(
        &self,
        detection: &Detection,
        predictor: Box<dyn MovementPredictor>,
        first_seen: u64,
    ) -> Box<dyn TrackableObject>;
}

/// Builds [`DefaultTrackableObject`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTrackableObjectFactory;

impl TrackableObjectFactory for DefaultTrackableObjectFactory {
    fn from_detection(
        &self,
        detection: &Detection,
        predictor: Box<dyn MovementPredictor>,
        first_seen: u64,
    ) -> Box<dyn TrackableObject> {
        Box::new(DefaultTrackableObject::from_detection(detection, predictor, first_seen))
    }
}
