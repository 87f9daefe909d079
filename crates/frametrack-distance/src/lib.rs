//! Scores `(track, detection)` pairs as a non-negative cost, and computes a
//! cacheable feature bundle for either side of that comparison.

mod euclidean;
mod features;
mod scored;

pub use euclidean::EuclideanCentroidDistance;
pub use features::DistanceFeatures;
pub use scored::ScoredObject;

use frametrack_types::Detection;

/// Scores how well a tracked object matches a new detection.
///
/// `distance` never returns `NaN`: implementations that would otherwise
/// produce one must return `f64::INFINITY` instead, signalling "never
/// match". Lower is better; `0.0` is a perfect match.
pub trait DistanceAlgorithm: std::fmt::Debug + Send + Sync {
    fn distance(&self, object: &dyn ScoredObject, detection: &Detection) -> f64;

    /// Computes the feature bundle this algorithm would cache on a track
    /// carrying `object`'s geometry.
    fn compute_features(&self, object: &dyn ScoredObject) -> Box<dyn DistanceFeatures>;

    /// Computes the feature bundle for a freshly-arrived detection.
    fn compute_detection_features(&self, detection: &Detection) -> Box<dyn DistanceFeatures>;
}

/// Replaces a `NaN` cost with `+infinity`, per the numeric error-handling
/// contract: a distance function must never report `NaN` as a cost.
#[must_use]
pub fn sanitize_cost(cost: f64) -> f64 {
    if cost.is_nan() {
        f64::INFINITY
    } else {
        cost
    }
}
