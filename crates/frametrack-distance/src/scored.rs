use frametrack_types::BoundingBox;

use crate::features::DistanceFeatures;

/// The minimal view of a tracked object a [`crate::DistanceAlgorithm`] needs:
/// its current geometry and any previously-cached features. Implemented by
/// `frametrack-object`'s `TrackableObject`; kept as a narrow trait here so
/// this crate does not depend on the object crate.
pub trait ScoredObject {
    fn bounding_box(&self) -> &BoundingBox;
    fn cached_features(&self) -> Option<&dyn DistanceFeatures>;
}
