//! Edge case tests for errors, configuration and degenerate canvas input

use air_canvas::canvas::{Canvas, Color, CompositeMode, PixelPoint};
use air_canvas::config::Config;
use air_canvas::smoothing::create_smoother;
use air_canvas::Error;

#[test]
fn test_error_display_messages() {
    let err = Error::InvalidInput("bad landmark count".to_string());
    assert_eq!(err.to_string(), "Invalid input: bad landmark count");

    let err = Error::ConfigError("pen width".to_string());
    assert_eq!(err.to_string(), "Configuration error: pen width");

    let err = Error::ScriptError("truncated".to_string());
    assert_eq!(err.to_string(), "Script error: truncated");
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: Error = io.into();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.to_string().contains("gone"));
}

#[test]
fn test_config_missing_file() {
    let result = Config::from_file("/nonexistent/path/config.yaml");
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_config_file_round_trip() {
    let mut path = std::env::temp_dir();
    path.push("air_canvas_config_round_trip.yaml");

    let mut config = Config::default();
    config.canvas.width = 640;
    config.stroke.pen_width = 2.5;
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.canvas.width, 640);
    assert_eq!(loaded.stroke.pen_width, 2.5);
    assert_eq!(loaded.stroke.palette, config.stroke.palette);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_config_garbage_yaml() {
    let mut path = std::env::temp_dir();
    path.push("air_canvas_config_garbage.yaml");
    std::fs::write(&path, ": not yaml : [").unwrap();

    let result = Config::from_file(&path);
    assert!(matches!(result, Err(Error::ConfigError(_))));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_unknown_smoother_name() {
    let result = create_smoother("kalman", 0.5);
    assert!(matches!(result, Err(Error::SmootherError(_))));
}

#[test]
fn test_zero_sized_canvas_does_not_panic() {
    let mut canvas = Canvas::new(0, 0);
    canvas.stroke_segment(
        PixelPoint::new(0.0, 0.0),
        PixelPoint::new(10.0, 10.0),
        4.0,
        Color::rgb(255, 255, 255),
        CompositeMode::SourceOver,
    );
    canvas.clear();
    assert_eq!(canvas.pixel(0, 0), None);
}

#[test]
fn test_non_finite_stroke_coordinates() {
    let mut canvas = Canvas::new(32, 32);
    canvas.stroke_segment(
        PixelPoint::new(f64::NAN, f64::INFINITY),
        PixelPoint::new(16.0, 16.0),
        4.0,
        Color::rgb(255, 255, 255),
        CompositeMode::SourceOver,
    );
    // Non-finite endpoints snap to the origin; the segment still lands
    assert_eq!(canvas.pixel(16, 16), Some([255, 255, 255, 255]));
}

#[test]
fn test_translucent_ink_blends() {
    let mut canvas = Canvas::new(32, 32);
    let half_red = Color([255, 0, 0, 128]);
    canvas.stroke_segment(
        PixelPoint::new(16.0, 16.0),
        PixelPoint::new(16.0, 16.0),
        4.0,
        half_red,
        CompositeMode::SourceOver,
    );
    let px = canvas.pixel(16, 16).unwrap();
    assert_eq!(px[0], 255);
    assert_eq!(px[3], 128);
}
