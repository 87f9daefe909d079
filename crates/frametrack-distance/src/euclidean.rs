use frametrack_types::Detection;

use crate::features::{CentroidFeatures, DistanceFeatures};
use crate::scored::ScoredObject;
use crate::{sanitize_cost, DistanceAlgorithm};

/// The reference distance algorithm: Euclidean distance between box
/// centroids. Monotone in positional disagreement, symmetric, and never
/// `NaN` (box coordinates are always finite by construction).
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanCentroidDistance;

impl DistanceAlgorithm for EuclideanCentroidDistance {
    fn distance(&self, object: &dyn ScoredObject, detection: &Detection) -> f64 {
        let (tx, ty) = (object.bounding_box().cx, object.bounding_box().cy);
        let (dx, dy) = (detection.bounding_box.cx, detection.bounding_box.cy);
        let cost = ((tx - dx).powi(2) + (ty - dy).powi(2)).sqrt();
        sanitize_cost(cost)
    }

    fn compute_features(&self, object: &dyn ScoredObject) -> Box<dyn DistanceFeatures> {
        let bbox = object.bounding_box();
        Box::new(CentroidFeatures { cx: bbox.cx, cy: bbox.cy })
    }

    fn compute_detection_features(&self, detection: &Detection) -> Box<dyn DistanceFeatures> {
        Box::new(CentroidFeatures {
            cx: detection.bounding_box.cx,
            cy: detection.bounding_box.cy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frametrack_types::BoundingBox;

    struct StubObject(BoundingBox);
    impl ScoredObject for StubObject {
        fn bounding_box(&self) -> &BoundingBox {
            &self.0
        }
        fn cached_features(&self) -> Option<&dyn DistanceFeatures> {
            None
        }
    }

    #[test]
    fn distance_is_straight_line_centroid_distance() {
        let track = StubObject(BoundingBox::axis_aligned(0.0, 0.0, 2.0, 2.0).unwrap());
        let detection = Detection::new(
            "car",
            0.9,
            BoundingBox::axis_aligned(3.0, 4.0, 2.0, 2.0).unwrap(),
            None,
        );
        let algo = EuclideanCentroidDistance;
        assert_eq!(algo.distance(&track, &detection), 5.0);
    }

    #[test]
    fn zero_distance_for_coincident_centroids() {
        let track = StubObject(BoundingBox::axis_aligned(5.0, 5.0, 1.0, 1.0).unwrap());
        let detection = Detection::new("car", 0.9, BoundingBox::axis_aligned(5.0, 5.0, 3.0, 3.0).unwrap(), None);
        let algo = EuclideanCentroidDistance;
        assert_eq!(algo.distance(&track, &detection), 0.0);
    }
}
