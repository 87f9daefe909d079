//! Immutable per-frame observation records: [`Detection`] and [`Image`].

mod detection;
mod image;

pub use detection::{Detection, Mask};
pub use image::Image;

pub use frametrack_geometry::{BoundingBox, GeometryError, ScaleFactor};
