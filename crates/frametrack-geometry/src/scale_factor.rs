use serde::{Deserialize, Serialize};

/// A pair of positive scale factors tagging the coordinate frame a
/// [`crate::BoundingBox`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactor {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactor {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The identity scale factor, `(1.0, 1.0)`.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::identity()
    }
}
