//! Gesture-driven freehand drawing over hand-skeleton keypoints.
//!
//! This library interprets a live stream of 21-point hand landmarks into a
//! small set of discrete drawing intents and drives a persistent raster
//! canvas from that intent stream:
//!
//! 1. A pure, stateless classifier maps each frame's landmark geometry to a
//!    gesture (draw, hover, change color, erase, clear, idle).
//! 2. A stateful stroke engine consumes classified frames, smooths the
//!    fingertip path, and renders pen or eraser segments onto the canvas,
//!    handling gesture-transition edges and cooldown-gated one-shot actions.
//!
//! Landmark detection itself is an upstream black box: callers hand in
//! either `None` (no hand) or a 21-point [`hand::HandFrame`] each tick.
//!
//! # Examples
//!
//! ## Classifying a frame
//!
//! ```
//! use air_canvas::gesture::{classify, Gesture};
//! use air_canvas::hand::HandFrame;
//!
//! // No hand in view classifies as Idle
//! assert_eq!(classify(None), Gesture::Idle);
//!
//! // As does an incomplete frame
//! let short = HandFrame::from_points(&[[0.5, 0.5, 0.0]; 10]);
//! assert_eq!(classify(Some(&short)), Gesture::Idle);
//! ```
//!
//! ## Driving the stroke engine
//!
//! ```
//! use air_canvas::canvas::Canvas;
//! use air_canvas::engine::{StrokeEngine, ToolState};
//! use air_canvas::hand::HandFrame;
//!
//! // The canvas matches the video source's native resolution
//! let mut canvas = Canvas::new(1280, 720);
//!
//! // Tool and color are owned by the UI and shared into the engine
//! let tools = ToolState::default().shared();
//! let mut engine = StrokeEngine::new(std::rc::Rc::clone(&tools));
//! engine.apply_style(&mut canvas);
//!
//! engine.set_on_gesture_changed(Box::new(|gesture| {
//!     println!("gesture: {gesture}");
//! }));
//!
//! // One tick per frame from the external driver; a missing hand is fine
//! engine.tick(None, 0.0, &mut canvas);
//! let frame = HandFrame::from_points(&[[0.5, 0.5, 0.0]; 21]);
//! engine.tick(Some(&frame), 16.7, &mut canvas);
//!
//! // The UI triggers the actual wipe for a Clear gesture explicitly
//! engine.clear_surface(&mut canvas);
//! ```
//!
//! ## Replaying a recorded session
//!
//! ```no_run
//! use air_canvas::app::{ReplayApp, ReplayScript};
//! use air_canvas::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let script = ReplayScript::from_file("session.yaml")?;
//! let mut app = ReplayApp::new(Config::default())?;
//! app.run(&script)?;
//! app.save("canvas.png")?;
//! # Ok(())
//! # }
//! ```

/// Hand landmark data model (21-point frames)
pub mod hand;

/// Gesture classification over single frames
pub mod gesture;

/// Pointer smoothing for jitter-free strokes
pub mod smoothing;

/// Persistent raster drawing surface
pub mod canvas;

/// Stateful stroke engine and session state machine
pub mod engine;

/// Replay application driving the pipeline from recorded scripts
pub mod app;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
