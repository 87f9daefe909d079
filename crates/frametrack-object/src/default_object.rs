use std::collections::HashMap;

use frametrack_distance::{DistanceFeatures, ScoredObject};
use frametrack_predict::MovementPredictor;
use frametrack_types::{BoundingBox, Detection, Mask};
use tracing::debug;

use crate::error::ObjectError;
use crate::subclass_tally::SubclassTally;
use crate::TrackableObject;

/// The reference [`TrackableObject`] implementation.
///
/// `class_name` is the detection label the track was partitioned under at
/// creation (see the tracking update's per-class split). `subclass_name` is
/// a finer-grained tag tallied across every observed detection; since this
/// crate's [`Detection`] carries a single label, the default object uses
/// that same label for both slots and lets the tally track how that label
/// has drifted over the track's lifetime.
pub struct DefaultTrackableObject {
    class_name: String,
    subclass_tally: SubclassTally,
    bounding_box: BoundingBox,
    mask: Option<Mask>,
    features: Option<Box<dyn DistanceFeatures>>,
    location_history: Vec<(f64, f64)>,
    movement_predictor: Box<dyn MovementPredictor>,
    first_seen: u64,
    last_seen: u64,
    tracking_attributes: HashMap<String, serde_json::Value>,
}

impl std::fmt::Debug for DefaultTrackableObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultTrackableObject")
            .field("class_name", &self.class_name)
            .field("subclass_name", &self.subclass_tally.plurality())
            .field("first_seen", &self.first_seen)
            .field("last_seen", &self.last_seen)
            .field("location_history_len", &self.location_history.len())
            .finish()
    }
}

impl DefaultTrackableObject {
    /// Constructs a track from a detection, a freshly-minted movement
    /// predictor, and the tracking attributes it should carry forward.
    pub fn from_detection_with_attributes(
        detection: &Detection,
        movement_predictor: Box<dyn MovementPredictor>,
        first_seen: u64,
        tracking_attributes: HashMap<String, serde_json::Value>,
    ) -> Self {
        let centroid = (detection.bounding_box.cx, detection.bounding_box.cy);
        Self {
            class_name: detection.label.clone(),
            subclass_tally: SubclassTally::new(detection.label.clone()),
            bounding_box: detection.bounding_box,
            mask: detection.mask.clone(),
            features: None,
            location_history: vec![centroid],
            movement_predictor,
            first_seen,
            last_seen: first_seen,
            tracking_attributes,
        }
    }

    pub fn from_detection(
        detection: &Detection,
        movement_predictor: Box<dyn MovementPredictor>,
        first_seen: u64,
    ) -> Self {
        Self::from_detection_with_attributes(detection, movement_predictor, first_seen, HashMap::new())
    }
}

impl ScoredObject for DefaultTrackableObject {
    fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    fn cached_features(&self) -> Option<&dyn DistanceFeatures> {
        self.features.as_deref()
    }
}

impl TrackableObject for DefaultTrackableObject {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn subclass_name(&self) -> &str {
        self.subclass_tally.plurality()
    }

    fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    fn location_history(&self) -> &[(f64, f64)] {
        &self.location_history
    }

    fn first_seen(&self) -> u64 {
        self.first_seen
    }

    fn last_seen(&self) -> u64 {
        self.last_seen
    }

    fn update(&mut self, detection: &Detection, frame_number: u64) {
        self.bounding_box = detection.bounding_box;
        self.mask = detection.mask.clone();
        self.features = None;
        self.location_history.push((detection.bounding_box.cx, detection.bounding_box.cy));
        self.subclass_tally.observe(&detection.label);
        self.last_seen = frame_number;
        debug!(class = %self.class_name, last_seen = frame_number, "updated track");
    }

    fn predict_locations(&mut self, n: usize) -> Vec<(f64, f64)> {
        let (current, history) = self
            .location_history
            .split_last()
            .expect("location_history is never empty");
        self.movement_predictor.predict_n(current.0, current.1, history, n)
    }

    fn get_tracking_attribute(&self, name: &str) -> Result<&serde_json::Value, ObjectError> {
        self.tracking_attributes
            .get(name)
            .ok_or_else(|| ObjectError::UnknownAttribute(name.to_string()))
    }

    fn set_tracking_attribute(&mut self, name: &str, value: serde_json::Value) -> Result<(), ObjectError> {
        if !self.tracking_attributes.contains_key(name) {
            return Err(ObjectError::UnknownAttribute(name.to_string()));
        }
        self.tracking_attributes.insert(name.to_string(), value);
        Ok(())
    }

    fn to_dict(&self) -> serde_json::Value {
        serde_json::json!({
            "class_name": self.class_name,
            "subclass_name": self.subclass_tally.plurality(),
            "bounding_box": serde_json::to_value(self.bounding_box).unwrap(),
            "mask": self.mask,
            "features": self.features.as_ref().map(|f| f.to_json()),
            "tracking_attributes": self.tracking_attributes,
            "location_history": self.location_history,
            "first_seen": self.first_seen,
            "last_seen": self.last_seen,
        })
    }

    fn as_scored_object(&self) -> &dyn ScoredObject {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frametrack_predict::ConstantVelocityPredictor;

    fn detection_at(x: f64, y: f64) -> Detection {
        Detection::new("car", 0.9, BoundingBox::axis_aligned(x, y, 2.0, 2.0).unwrap(), None)
    }

    #[test]
    fn from_detection_seeds_history_with_one_point() {
        let track = DefaultTrackableObject::from_detection(&detection_at(10.0, 10.0), Box::new(ConstantVelocityPredictor), 0);
        assert_eq!(track.location_history(), &[(10.0, 10.0)]);
        assert_eq!(track.first_seen(), 0);
        assert_eq!(track.last_seen(), 0);
    }

    #[test]
    fn update_appends_history_and_advances_last_seen() {
        let mut track = DefaultTrackableObject::from_detection(&detection_at(10.0, 10.0), Box::new(ConstantVelocityPredictor), 0);
        track.update(&detection_at(12.0, 10.0), 1);
        assert_eq!(track.location_history(), &[(10.0, 10.0), (12.0, 10.0)]);
        assert_eq!(track.last_seen(), 1);
        assert_eq!(track.class_name(), "car");
    }

    #[test]
    fn unregistered_attribute_access_is_an_error() {
        let track = DefaultTrackableObject::from_detection(&detection_at(0.0, 0.0), Box::new(ConstantVelocityPredictor), 0);
        assert!(track.get_tracking_attribute("missing").is_err());
    }

    #[test]
    fn registered_attribute_can_be_updated_but_not_added() {
        let mut attrs = HashMap::new();
        attrs.insert("zone".to_string(), serde_json::json!("a"));
        let mut track = DefaultTrackableObject::from_detection_with_attributes(
            &detection_at(0.0, 0.0),
            Box::new(ConstantVelocityPredictor),
            0,
            attrs,
        );
        track.set_tracking_attribute("zone", serde_json::json!("b")).unwrap();
        assert_eq!(track.get_tracking_attribute("zone").unwrap(), &serde_json::json!("b"));
        assert!(track.set_tracking_attribute("new_key", serde_json::json!(1)).is_err());
    }
}
