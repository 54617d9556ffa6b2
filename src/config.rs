//! Configuration management for the air-canvas application

use crate::canvas::{Color, StrokeStyle};
use crate::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_COLOR_COOLDOWN_MS, DEFAULT_ERASER_WIDTH,
    DEFAULT_PALETTE, DEFAULT_PEN_WIDTH, DEFAULT_SMOOTHING_ALPHA,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Canvas configuration
    pub canvas: CanvasConfig,

    /// Stroke rendering configuration
    pub stroke: StrokeConfig,

    /// Gesture handling configuration
    pub gesture: GestureConfig,
}

/// Canvas dimensions and coordinate mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Backing buffer width (source video native resolution)
    pub width: u32,

    /// Backing buffer height
    pub height: u32,
}

/// Stroke rendering parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeConfig {
    /// Pen stroke width in pixels
    pub pen_width: f64,

    /// Eraser stroke width in pixels (typically 3-4x pen width)
    pub eraser_width: f64,

    /// Point smoother type ("exponential" or "none")
    pub smoothing: String,

    /// Exponential smoothing weight for the newest point (0.0-1.0)
    pub smoothing_alpha: f64,

    /// Palette cycled on color-change gestures, as hex colors
    pub palette: Vec<Color>,
}

/// Gesture handling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Minimum elapsed milliseconds between color-cycle activations
    pub color_cooldown_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            stroke: StrokeConfig::default(),
            gesture: GestureConfig::default(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            pen_width: DEFAULT_PEN_WIDTH,
            eraser_width: DEFAULT_ERASER_WIDTH,
            smoothing: "exponential".to_string(),
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            palette: DEFAULT_PALETTE
                .iter()
                .map(|hex| Color::from_hex(hex).expect("default palette is valid hex"))
                .collect(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            color_cooldown_ms: DEFAULT_COLOR_COOLDOWN_MS,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Stroke style derived from this configuration
    #[must_use]
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            pen_width: self.stroke.pen_width,
            eraser_width: self.stroke.eraser_width,
        }
    }

    /// Create a point smoother from configuration
    pub fn create_smoother(&self) -> Result<Box<dyn crate::smoothing::PointSmoother>> {
        crate::smoothing::create_smoother(&self.stroke.smoothing, self.stroke.smoothing_alpha)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(Error::ConfigError(
                "Canvas dimensions must be greater than 0".to_string(),
            ));
        }

        if self.stroke.pen_width <= 0.0 {
            return Err(Error::ConfigError(
                "Pen width must be greater than 0".to_string(),
            ));
        }
        if self.stroke.eraser_width <= 0.0 {
            return Err(Error::ConfigError(
                "Eraser width must be greater than 0".to_string(),
            ));
        }

        if self.stroke.smoothing_alpha <= 0.0 || self.stroke.smoothing_alpha > 1.0 {
            return Err(Error::ConfigError(
                "Smoothing alpha must be in (0.0, 1.0]".to_string(),
            ));
        }

        if self.stroke.palette.is_empty() {
            return Err(Error::ConfigError(
                "Palette must contain at least one color".to_string(),
            ));
        }

        if self.gesture.color_cooldown_ms < 0.0 {
            return Err(Error::ConfigError(
                "Color cooldown must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r##"# Air Canvas Configuration

# Canvas backing buffer (source video native resolution)
canvas:
  width: 1280
  height: 720

# Stroke rendering
stroke:
  pen_width: 4.0
  eraser_width: 14.0
  smoothing: "exponential"
  smoothing_alpha: 0.6
  palette:
    - "#ffffff"
    - "#ff3b30"
    - "#34c759"
    - "#007aff"
    - "#ffcc00"

# Gesture handling
gesture:
  color_cooldown_ms: 1500.0
"##;
