use frametrack_distance::{sanitize_cost, DistanceAlgorithm, EuclideanCentroidDistance, ScoredObject};
use frametrack_types::{BoundingBox, Detection};

struct StubObject(BoundingBox);
impl ScoredObject for StubObject {
    fn bounding_box(&self) -> &BoundingBox {
        &self.0
    }
    fn cached_features(&self) -> Option<&dyn frametrack_distance::DistanceFeatures> {
        None
    }
}

#[test]
fn nan_cost_is_sanitized_to_infinity() {
    assert_eq!(sanitize_cost(f64::NAN).is_infinite(), true);
    assert_eq!(sanitize_cost(3.0), 3.0);
}

#[test]
fn euclidean_features_round_trip_centroid() {
    let algo = EuclideanCentroidDistance;
    let object = StubObject(BoundingBox::axis_aligned(7.0, 9.0, 2.0, 2.0).unwrap());
    let features = algo.compute_features(&object);
    assert_eq!(features.to_json()["cx"], 7.0);
    assert_eq!(features.to_json()["cy"], 9.0);

    let detection = Detection::new("car", 0.5, BoundingBox::axis_aligned(7.0, 9.0, 1.0, 1.0).unwrap(), None);
    let detection_features = algo.compute_detection_features(&detection);
    assert_eq!(detection_features.to_json(), features.to_json());
}
