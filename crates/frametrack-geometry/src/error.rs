use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("box width and height must be non-negative, got ({width}, {height})")]
    NegativeDimensions { width: f64, height: f64 },

    #[error("scale factor components must be positive, got ({x}, {y})")]
    NonPositiveScale { x: f64, y: f64 },
}
