//! Point smoothing for the drawing pointer.
//!
//! Raw fingertip positions jitter by a few pixels frame to frame; smoothing
//! blends each new position with the previously rendered one so consecutive
//! stroke segments approximate a steady curve while staying responsive.

use crate::canvas::PixelPoint;
use crate::Result;

/// Trait for pointer smoothers
pub trait PointSmoother: Send + Sync {
    /// Apply the smoother to a raw pointer position
    fn apply(&mut self, point: PixelPoint) -> PixelPoint;

    /// Reset smoother state (start of a new stroke session)
    fn reset(&mut self);

    /// Get smoother name
    fn name(&self) -> &str;
}

/// No-op smoother that passes positions through unchanged
pub struct NoSmoothing;

impl PointSmoother for NoSmoothing {
    fn apply(&mut self, point: PixelPoint) -> PixelPoint {
        point
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoSmoothing"
    }
}

/// Exponential smoother: `alpha * new + (1 - alpha) * previous` per axis.
///
/// The first point after a reset passes through unchanged; there is nothing
/// to smooth against at the start of a stroke.
pub struct ExponentialSmoother {
    alpha: f64,
    last: Option<PixelPoint>,
}

impl ExponentialSmoother {
    /// Create a smoother with the given weight for the newest sample.
    ///
    /// # Panics
    ///
    /// Panics if `alpha` is outside (0, 1].
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self { alpha, last: None }
    }
}

impl PointSmoother for ExponentialSmoother {
    fn apply(&mut self, point: PixelPoint) -> PixelPoint {
        let smoothed = match self.last {
            Some(last) => PixelPoint::new(
                self.alpha * point.x + (1.0 - self.alpha) * last.x,
                self.alpha * point.y + (1.0 - self.alpha) * last.y,
            ),
            None => point,
        };

        self.last = Some(smoothed);
        smoothed
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn name(&self) -> &str {
        "ExponentialSmoother"
    }
}

/// Create a point smoother by type name
pub fn create_smoother(smoother_type: &str, alpha: f64) -> Result<Box<dyn PointSmoother>> {
    match smoother_type.to_lowercase().as_str() {
        "none" | "nosmoothing" => Ok(Box::new(NoSmoothing)),
        "exponential" => Ok(Box::new(ExponentialSmoother::new(alpha))),
        _ => Err(crate::Error::SmootherError(format!(
            "Unknown smoother type: {smoother_type}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_smoothing() {
        let mut smoother = NoSmoothing;
        let p = smoother.apply(PixelPoint::new(10.0, 20.0));
        assert_eq!(p.x, 10.0);
        assert_eq!(p.y, 20.0);
    }

    #[test]
    fn test_first_point_passes_through() {
        let mut smoother = ExponentialSmoother::new(0.6);
        let p = smoother.apply(PixelPoint::new(500.0, 500.0));
        assert_eq!(p.x, 500.0);
        assert_eq!(p.y, 500.0);
    }

    #[test]
    fn test_exponential_blend() {
        let mut smoother = ExponentialSmoother::new(0.6);
        smoother.apply(PixelPoint::new(500.0, 500.0));
        let p = smoother.apply(PixelPoint::new(400.0, 500.0));
        // 0.6 * 400 + 0.4 * 500
        assert!((p.x - 440.0).abs() < 1e-9);
        assert!((p.y - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut smoother = ExponentialSmoother::new(0.6);
        smoother.apply(PixelPoint::new(100.0, 100.0));
        smoother.reset();
        let p = smoother.apply(PixelPoint::new(900.0, 900.0));
        assert_eq!(p.x, 900.0);
        assert_eq!(p.y, 900.0);
    }

    #[test]
    fn test_create_smoother() {
        assert!(create_smoother("none", 0.6).is_ok());
        assert!(create_smoother("exponential", 0.6).is_ok());
        assert!(create_smoother("kalman", 0.6).is_err());
    }
}
