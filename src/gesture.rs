//! Gesture classification over a single hand frame.
//!
//! The classifier is a pure function from one [`HandFrame`] to one
//! [`Gesture`]: no state, no I/O, fixed-size input. Finger extension is a
//! distance-from-wrist heuristic (a coarse proxy for joint flexion, known
//! to misread fingers pointed straight at the camera; accepted as-is), and
//! the shape-to-gesture mapping is an ordered decision table where the
//! first matching row wins.

use crate::constants::{
    INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP, PINKY_MCP, PINKY_PIP,
    PINKY_TIP, RING_MCP, RING_PIP, RING_TIP,
};
use crate::hand::HandFrame;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete drawing intent derived from one hand frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// No hand, malformed frame, or an ambiguous/transition shape
    Idle,
    /// Index finger only: ink flows from the fingertip
    Draw,
    /// All four fingers up: pointer moves without drawing
    Hover,
    /// Index + middle: request the next palette color (cooldown-gated)
    ChangeColor,
    /// Index + pinky: erase along the fingertip path
    Erase,
    /// Closed fist: request a canvas wipe (performed by the UI, not here)
    Clear,
}

impl Default for Gesture {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Draw => "draw",
            Self::Hover => "hover",
            Self::ChangeColor => "change_color",
            Self::Erase => "erase",
            Self::Clear => "clear",
        };
        write!(f, "{name}")
    }
}

/// Per-finger extension flags for the four classification fingers.
/// The thumb is never evaluated; no gesture shape depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FingerState {
    index: bool,
    middle: bool,
    ring: bool,
    pinky: bool,
}

/// A finger counts as extended when its tip is farther from the wrist than
/// both its PIP and MCP joints. The MCP check rejects curled fingers whose
/// tip still clears the PIP at shallow camera angles.
fn finger_extended(frame: &HandFrame, tip: usize, pip: usize, mcp: usize) -> bool {
    let (Some(wrist), Some(tip), Some(pip), Some(mcp)) =
        (frame.wrist(), frame.get(tip), frame.get(pip), frame.get(mcp))
    else {
        return false;
    };

    let tip_dist = tip.distance_to(wrist);
    tip_dist > pip.distance_to(wrist) && tip_dist > mcp.distance_to(wrist)
}

fn finger_state(frame: &HandFrame) -> FingerState {
    FingerState {
        index: finger_extended(frame, INDEX_TIP, INDEX_PIP, INDEX_MCP),
        middle: finger_extended(frame, MIDDLE_TIP, MIDDLE_PIP, MIDDLE_MCP),
        ring: finger_extended(frame, RING_TIP, RING_PIP, RING_MCP),
        pinky: finger_extended(frame, PINKY_TIP, PINKY_PIP, PINKY_MCP),
    }
}

/// Classify one frame into a drawing intent.
///
/// `None` and incomplete frames classify as [`Gesture::Idle`]. The decision
/// table is order-sensitive: Erase and `ChangeColor` both require an
/// extended index finger and must be tested before Draw, or Draw would
/// shadow them.
#[must_use]
pub fn classify(frame: Option<&HandFrame>) -> Gesture {
    let Some(frame) = frame else {
        return Gesture::Idle;
    };
    if !frame.is_complete() {
        return Gesture::Idle;
    }

    let f = finger_state(frame);

    // Ordered decision table; first match wins.
    match (f.index, f.middle, f.ring, f.pinky) {
        (true, false, false, true) => Gesture::Erase,
        (true, true, false, false) => Gesture::ChangeColor,
        (true, true, true, true) => Gesture::Hover,
        (true, false, false, false) => Gesture::Draw,
        (false, false, false, false) => Gesture::Clear,
        _ => Gesture::Idle,
    }
}
