use serde::{Deserialize, Serialize};

use frametrack_geometry::BoundingBox;

/// A per-pixel object mask, rows of booleans.
pub type Mask = Vec<Vec<bool>>;

/// A single-frame observation: a class label, confidence, bounding box, and
/// an optional mask.
///
/// Equality is defined over `label`, `confidence`, and `box` only; two
/// detections that differ only in `mask` compare equal. This mirrors the
/// geometry round-trip property, which is stated "modulo mask equality".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    #[serde(rename = "box")]
    pub bounding_box: BoundingBox,
    pub mask: Option<Mask>,
}

impl Detection {
    #[must_use]
    pub fn new(label: impl Into<String>, confidence: f64, bounding_box: BoundingBox, mask: Option<Mask>) -> Self {
        Self {
            label: label.into(),
            confidence,
            bounding_box,
            mask,
        }
    }

    /// Returns a copy of this detection expressed in `target`'s scale frame.
    #[must_use]
    pub fn scaled(&self, target: frametrack_geometry::ScaleFactor) -> Self {
        Self {
            label: self.label.clone(),
            confidence: self.confidence,
            bounding_box: self.bounding_box.scale_to(target),
            mask: self.mask.clone(),
        }
    }
}

impl PartialEq for Detection {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.confidence == other.confidence
            && self.bounding_box == other.bounding_box
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frametrack_geometry::ScaleFactor;

    fn sample() -> Detection {
        let bbox = BoundingBox::axis_aligned(5.0, 5.0, 2.0, 2.0).unwrap();
        Detection::new("car", 0.9, bbox, Some(vec![vec![true, false], vec![false, true]]))
    }

    #[test]
    fn json_round_trip_ignores_mask_for_equality() {
        let d = sample();
        let json = serde_json::to_string(&d).unwrap();
        let back: Detection = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
        assert_eq!(d.mask, back.mask);
    }

    #[test]
    fn equality_ignores_mask() {
        let mut d = sample();
        let mut other = d.clone();
        other.mask = None;
        assert_eq!(d, other);
        d.confidence = 0.1;
        assert_ne!(d, other);
    }

    #[test]
    fn scaled_preserves_label_and_confidence() {
        let d = sample();
        let scaled = d.scaled(ScaleFactor::new(2.0, 2.0));
        assert_eq!(scaled.label, d.label);
        assert_eq!(scaled.confidence, d.confidence);
        assert_eq!(scaled.bounding_box.cx, d.bounding_box.cx * 2.0);
    }
}
