//! Movement predictors: given an object's location history, forecast its
//! next position(s).
//!
//! A predictor is consulted through the [`MovementPredictor`] trait rather
//! than as hidden process-wide state. A kNN predictor intended to be shared
//! across every track of a class is still an explicitly-constructed,
//! explicitly-passed instance; nothing here reaches for a global.

mod constant_velocity;
mod knn;

pub use constant_velocity::ConstantVelocityPredictor;
pub use knn::KnnPredictor;

/// A `(x, y)` centroid location.
pub type Location = (f64, f64);

/// Forecasts the next location(s) of a tracked object from its history.
///
/// `history` never includes the point currently being predicted from; it is
/// the prefix of prior locations. Implementations that accumulate state
/// across calls (a kNN training buffer) must treat `predict_n` as pure with
/// respect to that state: any mutation performed while generating the
/// lookahead is rolled back before `predict_n` returns.
pub trait MovementPredictor: std::fmt::Debug + Send {
    /// Predicts the next location given the current point and its history.
    /// With fewer than one prior history point, returns `(x, y)` unchanged.
    fn predict(&mut self, x: f64, y: f64, history: &[Location]) -> Location;

    /// Iteratively extends `predict` by `n` steps, chaining each prediction
    /// into the next step's current point and history.
    fn predict_n(&mut self, x: f64, y: f64, history: &[Location], n: usize) -> Vec<Location> {
        let mut locations = Vec::with_capacity(n);
        let mut extended_history = history.to_vec();
        let (mut cx, mut cy) = (x, y);
        for _ in 0..n {
            let (nx, ny) = self.predict(cx, cy, &extended_history);
            locations.push((nx, ny));
            extended_history.push((nx, ny));
            cx = nx;
            cy = ny;
        }
        locations
    }

    /// An opaque, implementation-defined snapshot of predictor state,
    /// suitable for persisting alongside a track.
    fn snapshot(&self) -> serde_json::Value;
}

/// Builds a fresh predictor instance for a newly-spawned track. Per-class
/// configuration tables store factories, never predictor singletons, so a
/// class that shares one kNN model across its tracks does so by having its
/// factory return clones of a handle to that shared model.
pub trait MovementPredictorFactory: std::fmt::Debug + Send + Sync {
    fn create(&self) -> Box<dyn MovementPredictor>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantVelocityFactory;

impl MovementPredictorFactory for ConstantVelocityFactory {
    fn create(&self) -> Box<dyn MovementPredictor> {
        Box::new(ConstantVelocityPredictor)
    }
}
