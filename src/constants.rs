//! Constants used throughout the application

/// Number of landmarks in a complete hand frame
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Wrist landmark index
pub const WRIST: usize = 0;

/// Fingertip landmark indices (thumb, index, middle, ring, pinky)
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// PIP (second joint) landmark indices
pub const INDEX_PIP: usize = 6;
pub const MIDDLE_PIP: usize = 10;
pub const RING_PIP: usize = 14;
pub const PINKY_PIP: usize = 18;

/// MCP (base knuckle) landmark indices
pub const INDEX_MCP: usize = 5;
pub const MIDDLE_MCP: usize = 9;
pub const RING_MCP: usize = 13;
pub const PINKY_MCP: usize = 17;

/// Default pen stroke width in pixels
pub const DEFAULT_PEN_WIDTH: f64 = 4.0;

/// Default eraser stroke width in pixels (3.5x pen width)
pub const DEFAULT_ERASER_WIDTH: f64 = 14.0;

/// Default exponential smoothing weight for the newest point
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.6;

/// Minimum elapsed milliseconds between color-cycle activations
pub const DEFAULT_COLOR_COOLDOWN_MS: f64 = 1500.0;

/// Default canvas dimensions (matches a 720p video source)
pub const DEFAULT_CANVAS_WIDTH: u32 = 1280;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 720;

/// Default pen color (white ink)
pub const DEFAULT_PEN_COLOR: &str = "#ffffff";

/// Default palette cycled by the replay app on color-change gestures
pub const DEFAULT_PALETTE: [&str; 5] = ["#ffffff", "#ff3b30", "#34c759", "#007aff", "#ffcc00"];

/// Smoothing alpha bounds
pub const SMOOTHING_ALPHA_MIN: f64 = 0.0;
pub const SMOOTHING_ALPHA_MAX: f64 = 1.0;
