//! Hand landmark data model.
//!
//! A tracked hand is delivered as 21 normalized 3-D keypoints per frame,
//! following the usual skeleton convention: index 0 is the wrist, then four
//! landmarks per finger running base to tip (thumb 1-4, index 5-8, middle
//! 9-12, ring 13-16, pinky 17-20). Frames are produced fresh every tick by
//! an upstream detector; this crate never mutates or retains them.

use crate::constants::{INDEX_TIP, NUM_HAND_LANDMARKS, WRIST};
use serde::{Deserialize, Serialize};

/// One normalized 3-D keypoint on a tracked hand.
///
/// `x` and `y` are normalized to [0, 1] in the source video's coordinate
/// space; `z` is depth-relative and unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Optional visibility/presence confidence from the detector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    /// Create a landmark from normalized coordinates
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
        }
    }

    /// Euclidean distance to another landmark in normalized space
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<[f64; 3]> for Landmark {
    fn from(p: [f64; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

/// The complete landmark set for one hand at one instant.
///
/// A frame is only usable when it holds exactly 21 points; anything shorter
/// is treated as "no hand" by the classifier rather than partially
/// processed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HandFrame {
    landmarks: Vec<Landmark>,
}

impl HandFrame {
    /// Wrap raw detector output. No validation happens here; completeness
    /// is checked at classification time so short frames degrade to Idle.
    #[must_use]
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Build a frame from 21 normalized (x, y, z) triples
    #[must_use]
    pub fn from_points(points: &[[f64; 3]]) -> Self {
        Self {
            landmarks: points.iter().map(|&p| Landmark::from(p)).collect(),
        }
    }

    /// True when the frame carries the full 21-point skeleton
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() == NUM_HAND_LANDMARKS
    }

    /// Number of landmarks present
    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// True when no landmarks are present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Landmark at the given skeleton index, if present
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    /// Wrist landmark, if present
    #[must_use]
    pub fn wrist(&self) -> Option<&Landmark> {
        self.get(WRIST)
    }

    /// Index fingertip landmark, if present. This is the drawing pointer.
    #[must_use]
    pub fn index_tip(&self) -> Option<&Landmark> {
        self.get(INDEX_TIP)
    }

    /// All landmarks in skeleton order
    #[must_use]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completeness() {
        let frame = HandFrame::from_points(&[[0.5, 0.5, 0.0]; 21]);
        assert!(frame.is_complete());
        assert_eq!(frame.len(), 21);

        let short = HandFrame::from_points(&[[0.5, 0.5, 0.0]; 20]);
        assert!(!short.is_complete());

        let empty = HandFrame::default();
        assert!(!empty.is_complete());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_distance() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_index_tip_accessor() {
        let mut points = [[0.0, 0.0, 0.0]; 21];
        points[INDEX_TIP] = [0.25, 0.75, 0.1];
        let frame = HandFrame::from_points(&points);
        let tip = frame.index_tip().unwrap();
        assert_eq!(tip.x, 0.25);
        assert_eq!(tip.y, 0.75);
    }
}
