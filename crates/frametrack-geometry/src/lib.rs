//! Value types for oriented bounding boxes with scale metadata.
//!
//! Everything in this crate is an immutable, structurally-comparable value
//! type. There is no tracking state here, only geometry.

mod error;
mod rotate;
mod scale_factor;
mod bounding_box;

pub use error::GeometryError;
pub use rotate::rotate_point;
pub use scale_factor::ScaleFactor;
pub use bounding_box::BoundingBox;
