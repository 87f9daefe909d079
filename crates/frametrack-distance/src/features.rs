use std::any::Any;
use std::fmt::Debug;

/// An implementation-defined, cacheable feature bundle computed by a
/// [`crate::DistanceAlgorithm`] for either a track or a detection.
pub trait DistanceFeatures: Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn to_json(&self) -> serde_json::Value;
}

/// The feature bundle produced by [`crate::EuclideanCentroidDistance`]: just
/// the centroid, since that algorithm scores on position alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentroidFeatures {
    pub cx: f64,
    pub cy: f64,
}

impl DistanceFeatures for CentroidFeatures {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "cx": self.cx, "cy": self.cy })
    }
}
