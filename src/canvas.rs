//! Persistent raster drawing surface.
//!
//! The canvas is an RGBA pixel buffer sized to the video source's native
//! resolution. Strokes persist across frames until explicitly cleared.
//! Segments are rendered by walking the line with Bresenham and stamping a
//! filled disc at every step, which yields round caps and round joins for
//! free: consecutive short segments overlap into a seamless curve.
//!
//! Software line rendering follows the pixel-buffer approach used in small
//! camera tools (bounds-checked `put_pixel`, integer Bresenham walk).

use crate::constants::{DEFAULT_ERASER_WIDTH, DEFAULT_PEN_WIDTH};
use crate::{Error, Result};
use image::{Rgba, RgbaImage};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// A 2-D pixel-space position. Sub-pixel precision is kept through the
/// smoothing stage and rounded only at rasterization time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    /// Create a point from pixel coordinates
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// RGBA paint color, externally represented as a hex string
/// (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 4]);

impl Color {
    /// Fully opaque color from RGB components
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` hex string
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let parse = |s: &str| {
            u8::from_str_radix(s, 16)
                .map_err(|_| Error::InvalidInput(format!("Invalid hex color: {hex}")))
        };
        match digits.len() {
            6 => Ok(Self([
                parse(&digits[0..2])?,
                parse(&digits[2..4])?,
                parse(&digits[4..6])?,
                255,
            ])),
            8 => Ok(Self([
                parse(&digits[0..2])?,
                parse(&digits[2..4])?,
                parse(&digits[4..6])?,
                parse(&digits[6..8])?,
            ])),
            _ => Err(Error::InvalidInput(format!("Invalid hex color: {hex}"))),
        }
    }

    fn to_rgba(self) -> Rgba<u8> {
        Rgba(self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}

/// Pixel-blending rule for stroke rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Normal paint: source pixels are blended over the destination
    SourceOver,
    /// Erase: covered destination pixels are cleared to transparent
    DestinationOut,
}

/// Stroke rendering defaults (widths; caps and joins are always round).
///
/// Resizing the canvas resets this to defaults, so callers that configured
/// custom widths must reassert them after every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Pen stroke width in pixels
    pub pen_width: f64,
    /// Eraser stroke width in pixels
    pub eraser_width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            pen_width: DEFAULT_PEN_WIDTH,
            eraser_width: DEFAULT_ERASER_WIDTH,
        }
    }
}

/// Persistent RGBA drawing surface
pub struct Canvas {
    pixels: RgbaImage,
    style: StrokeStyle,
    composite: CompositeMode,
}

impl Canvas {
    /// Create a transparent canvas with the given backing dimensions
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            style: StrokeStyle::default(),
            composite: CompositeMode::SourceOver,
        }
    }

    /// Backing width in pixels
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Backing height in pixels
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Current stroke style
    #[must_use]
    pub const fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Set the stroke style (pen and eraser widths)
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Current composite mode. Outside of a `stroke_segment` call this is
    /// always `SourceOver`; the mode never leaks past a segment.
    #[must_use]
    pub const fn composite_mode(&self) -> CompositeMode {
        self.composite
    }

    /// Wipe every pixel back to transparent
    pub fn clear(&mut self) {
        for px in self.pixels.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
    }

    /// Resize the backing buffer to match a new source resolution.
    ///
    /// A genuine dimension change reallocates the buffer, losing pixel
    /// content, and resets the stroke style to defaults; callers reassert
    /// their configured widths afterwards. Resizing to the current
    /// dimensions is a no-op.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width() && height == self.height() {
            return;
        }
        self.pixels = RgbaImage::new(width, height);
        self.style = StrokeStyle::default();
        self.composite = CompositeMode::SourceOver;
    }

    /// Read one pixel; `None` outside the buffer
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width() && y < self.height() {
            Some(self.pixels.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Borrow the backing image, e.g. for compositing onto a display
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Encode the canvas as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.pixels.save(path.as_ref()).map_err(Into::into)
    }

    /// Render a stroke segment from `from` to `to` with round caps and
    /// joins. The composite mode applies only for the duration of this
    /// segment and is restored to `SourceOver` before returning.
    pub fn stroke_segment(
        &mut self,
        from: PixelPoint,
        to: PixelPoint,
        width: f64,
        color: Color,
        mode: CompositeMode,
    ) {
        self.composite = mode;

        let radius = (width / 2.0).max(0.5);
        let rgba = color.to_rgba();

        // Bresenham walk; a filled disc at each step gives round caps at
        // both ends and a round join where consecutive segments meet.
        let (mut x0, mut y0) = (round_coord(from.x), round_coord(from.y));
        let (x1, y1) = (round_coord(to.x), round_coord(to.y));

        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp_disc(x0, y0, radius, rgba);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }

        self.composite = CompositeMode::SourceOver;
    }

    /// Stamp a filled disc under the current composite mode
    fn stamp_disc(&mut self, cx: i32, cy: i32, radius: f64, color: Rgba<u8>) {
        let r = radius.ceil() as i32;
        let r_sq = radius * radius;
        for dy in -r..=r {
            for dx in -r..=r {
                if f64::from(dx * dx + dy * dy) <= r_sq {
                    self.put_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Write one pixel under the current composite mode, ignoring
    /// coordinates outside the buffer
    fn put_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width() || y >= self.height() {
            return;
        }

        match self.composite {
            CompositeMode::DestinationOut => {
                self.pixels.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
            CompositeMode::SourceOver => {
                let blended = blend_over(color, *self.pixels.get_pixel(x, y));
                self.pixels.put_pixel(x, y, blended);
            }
        }
    }
}

/// Standard source-over alpha blend
fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = f64::from(src.0[3]) / 255.0;
    if sa >= 1.0 {
        return src;
    }
    let da = f64::from(dst.0[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = f64::from(src.0[c]);
        let d = f64::from(dst.0[c]);
        let v = (s * sa + d * da * (1.0 - sa)) / out_a;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Round a sub-pixel coordinate to the nearest raster coordinate
fn round_coord(v: f64) -> i32 {
    if v.is_finite() {
        v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#ffffff").unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(Color::from_hex("ff0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hex("#11223344").unwrap(), Color([0x11, 0x22, 0x33, 0x44]));
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(Color::rgb(255, 59, 48).to_string(), "#ff3b30");
        assert_eq!(Color([1, 2, 3, 4]).to_string(), "#01020304");
    }

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(16, 16);
        assert_eq!(canvas.pixel(8, 8), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_segment_paints_endpoints_and_midpoint() {
        let mut canvas = Canvas::new(64, 64);
        let white = Color::rgb(255, 255, 255);
        canvas.stroke_segment(
            PixelPoint::new(10.0, 32.0),
            PixelPoint::new(50.0, 32.0),
            4.0,
            white,
            CompositeMode::SourceOver,
        );
        assert_eq!(canvas.pixel(10, 32), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(30, 32), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(50, 32), Some([255, 255, 255, 255]));
        // Well off the stroke path nothing is painted
        assert_eq!(canvas.pixel(30, 10), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_round_cap_extends_past_endpoint() {
        let mut canvas = Canvas::new(64, 64);
        canvas.stroke_segment(
            PixelPoint::new(20.0, 32.0),
            PixelPoint::new(40.0, 32.0),
            8.0,
            Color::rgb(255, 0, 0),
            CompositeMode::SourceOver,
        );
        // The cap disc reaches beyond the endpoint along the stroke axis
        assert_eq!(canvas.pixel(43, 32), Some([255, 0, 0, 255]));
        // And above/below the endpoint
        assert_eq!(canvas.pixel(40, 29), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_eraser_clears_to_transparent() {
        let mut canvas = Canvas::new(64, 64);
        let white = Color::rgb(255, 255, 255);
        canvas.stroke_segment(
            PixelPoint::new(0.0, 32.0),
            PixelPoint::new(63.0, 32.0),
            6.0,
            white,
            CompositeMode::SourceOver,
        );
        assert_eq!(canvas.pixel(32, 32), Some([255, 255, 255, 255]));

        canvas.stroke_segment(
            PixelPoint::new(0.0, 32.0),
            PixelPoint::new(63.0, 32.0),
            12.0,
            white,
            CompositeMode::DestinationOut,
        );
        assert_eq!(canvas.pixel(32, 32), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_composite_mode_restored_after_segment() {
        let mut canvas = Canvas::new(16, 16);
        canvas.stroke_segment(
            PixelPoint::new(2.0, 2.0),
            PixelPoint::new(10.0, 10.0),
            2.0,
            Color::rgb(0, 0, 0),
            CompositeMode::DestinationOut,
        );
        assert_eq!(canvas.composite_mode(), CompositeMode::SourceOver);
    }

    #[test]
    fn test_clear_wipes_pixels() {
        let mut canvas = Canvas::new(32, 32);
        canvas.stroke_segment(
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(31.0, 31.0),
            4.0,
            Color::rgb(10, 20, 30),
            CompositeMode::SourceOver,
        );
        canvas.clear();
        assert_eq!(canvas.pixel(15, 15), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_resize_resets_style() {
        let mut canvas = Canvas::new(32, 32);
        canvas.set_style(StrokeStyle {
            pen_width: 9.0,
            eraser_width: 30.0,
        });

        // Same dimensions: no-op, style kept
        canvas.resize(32, 32);
        assert_eq!(canvas.style().pen_width, 9.0);

        // New dimensions: reallocated, style back to defaults
        canvas.resize(64, 48);
        assert_eq!(canvas.width(), 64);
        assert_eq!(canvas.height(), 48);
        assert_eq!(canvas.style(), StrokeStyle::default());
    }

    #[test]
    fn test_out_of_bounds_strokes_ignored() {
        let mut canvas = Canvas::new(8, 8);
        canvas.stroke_segment(
            PixelPoint::new(-50.0, -50.0),
            PixelPoint::new(100.0, 100.0),
            4.0,
            Color::rgb(255, 255, 255),
            CompositeMode::SourceOver,
        );
        // In-bounds part of the diagonal is painted, no panic on the rest
        assert_eq!(canvas.pixel(4, 4), Some([255, 255, 255, 255]));
    }
}
