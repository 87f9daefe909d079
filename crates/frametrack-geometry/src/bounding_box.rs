use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::rotate::rotate_point;
use crate::scale_factor::ScaleFactor;

/// An oriented rectangle: center `(cx, cy)`, `width`, `height`, an `angle` in
/// degrees, and the [`ScaleFactor`] of the coordinate frame it is expressed
/// in.
///
/// Corners are derived lazily from the axis-aligned half-extents, rotated
/// about the center when `angle != 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
    pub scale_factor: ScaleFactor,
}

impl BoundingBox {
    pub fn new(
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
        angle: f64,
        scale_factor: ScaleFactor,
    ) -> Result<Self, GeometryError> {
        if width < 0.0 || height < 0.0 {
            return Err(GeometryError::NegativeDimensions { width, height });
        }
        Ok(Self {
            cx,
            cy,
            width,
            height,
            angle,
            scale_factor,
        })
    }

    /// An axis-aligned box (`angle = 0`) in the identity scale frame.
    pub fn axis_aligned(cx: f64, cy: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        Self::new(cx, cy, width, height, 0.0, ScaleFactor::identity())
    }

    #[must_use]
    pub fn rotated(&self) -> bool {
        self.angle != 0.0
    }

    fn corner(&self, base: (f64, f64)) -> (f64, f64) {
        if self.rotated() {
            rotate_point(base.0, base.1, self.cx, self.cy, self.angle)
        } else {
            base
        }
    }

    #[must_use]
    pub fn top_left(&self) -> (f64, f64) {
        self.corner((self.cx - self.width / 2.0, self.cy - self.height / 2.0))
    }

    #[must_use]
    pub fn top_right(&self) -> (f64, f64) {
        self.corner((self.cx + self.width / 2.0, self.cy - self.height / 2.0))
    }

    #[must_use]
    pub fn bottom_left(&self) -> (f64, f64) {
        self.corner((self.cx - self.width / 2.0, self.cy + self.height / 2.0))
    }

    #[must_use]
    pub fn bottom_right(&self) -> (f64, f64) {
        self.corner((self.cx + self.width / 2.0, self.cy + self.height / 2.0))
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[must_use]
    pub fn x1(&self) -> f64 {
        self.top_left().0
    }

    #[must_use]
    pub fn x2(&self) -> f64 {
        self.top_right().0
    }

    #[must_use]
    pub fn y1(&self) -> f64 {
        self.top_left().1
    }

    #[must_use]
    pub fn y2(&self) -> f64 {
        self.bottom_right().1
    }

    /// `(x1, y1, width, height)`.
    #[must_use]
    pub fn to_coco(&self) -> (f64, f64, f64, f64) {
        (self.x1(), self.y1(), self.width, self.height)
    }

    /// `(cx, cy, width, height)`.
    #[must_use]
    pub fn to_yolo(&self) -> (f64, f64, f64, f64) {
        (self.cx, self.cy, self.width, self.height)
    }

    /// Converts this box to the given scale frame. `(cx, cy, width, height)`
    /// are multiplied by `(target.x / self.scale_factor.x, target.y /
    /// self.scale_factor.y)`; `angle` is preserved and the new box adopts
    /// `target` as its scale factor.
    #[must_use]
    pub fn scale_to(&self, target: ScaleFactor) -> Self {
        let scale_x = target.x / self.scale_factor.x;
        let scale_y = target.y / self.scale_factor.y;
        Self {
            cx: self.cx * scale_x,
            cy: self.cy * scale_y,
            width: self.width * scale_x,
            height: self.height * scale_y,
            angle: self.angle,
            scale_factor: target,
        }
    }

    /// Rotates the box by `delta_degrees`, cumulative with any prior
    /// rotation.
    #[must_use]
    pub fn rotate(&self, delta_degrees: f64) -> Self {
        Self {
            angle: self.angle + delta_degrees,
            ..*self
        }
    }
}
