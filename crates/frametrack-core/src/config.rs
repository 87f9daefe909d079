use std::collections::HashMap;
use std::sync::Arc;

use frametrack_distance::DistanceAlgorithm;
use frametrack_object::TrackableObjectFactory;
use frametrack_predict::MovementPredictorFactory;

/// Per-class tracking configuration: how long an unmatched track of this
/// class survives, how new tracks of this class are built, and how their
/// movement predictors are built.
#[derive(Clone)]
pub struct ClassTrackingConfig {
    pub delete_after: u64,
    pub track_factory: Arc<dyn TrackableObjectFactory>,
    pub predictor_factory: Arc<dyn MovementPredictorFactory>,
}

/// The full configuration the tracking update needs: which classes are
/// active this frame, their per-class settings, and the shared distance
/// algorithm and matching threshold.
#[derive(Clone)]
pub struct TrackingUpdateConfig {
    /// Active class names, in the order their matched/unmatched/new/deleted
    /// key sets should be concatenated.
    pub active_classes: Vec<String>,
    pub classes: HashMap<String, ClassTrackingConfig>,
    pub distance_algorithm: Arc<dyn DistanceAlgorithm>,
    pub threshold: f64,
}

impl TrackingUpdateConfig {
    pub fn class_config(&self, class_name: &str) -> Option<&ClassTrackingConfig> {
        self.classes.get(class_name)
    }
}
