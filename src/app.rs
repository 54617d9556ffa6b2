//! Replay application: drives the gesture pipeline from a recorded
//! landmark script and writes the resulting canvas to a PNG.
//!
//! The live-camera UI (permission prompts, toolbar, palette display) sits
//! outside this crate; the replay app stands in for it as the external
//! driver. It supplies frames on whatever cadence the script recorded,
//! forwards gesture transitions to the log, owns the palette, and performs
//! the explicit canvas wipe when a Clear gesture is reported.

use crate::canvas::Canvas;
use crate::config::Config;
use crate::engine::{StrokeEngine, Tool, ToolState};
use crate::gesture::Gesture;
use crate::hand::HandFrame;
use crate::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// One recorded driver tick: a timestamp and the detector output for that
/// instant (`None` when no hand was in view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Wall-clock milliseconds, monotonic within the recording
    pub t_ms: f64,
    /// 21 normalized (x, y, z) landmark triples, or absent for no hand
    #[serde(default)]
    pub hand: Option<Vec<[f64; 3]>>,
    /// A toolbar tool selection recorded at this tick, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<Tool>,
    /// A toolbar clear-button press recorded at this tick
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub clear: bool,
}

/// A recorded drawing session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    pub frames: Vec<RecordedFrame>,
}

impl ReplayScript {
    /// Load a script from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::ScriptError(format!("Failed to read script: {e}")))?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::ScriptError(format!("Failed to parse script: {e}")))
    }
}

/// Replay application state
pub struct ReplayApp {
    config: Config,
    canvas: Canvas,
    engine: StrokeEngine,
    tools: Rc<RefCell<ToolState>>,
    palette_index: Rc<RefCell<usize>>,
}

impl ReplayApp {
    /// Build the pipeline from configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        info!(
            "Initializing air-canvas replay: {}x{} canvas",
            config.canvas.width, config.canvas.height
        );

        let tools = ToolState {
            tool: Tool::Pen,
            color: config.stroke.palette[0],
        }
        .shared();

        let mut canvas = Canvas::new(config.canvas.width, config.canvas.height);
        let mut engine = StrokeEngine::with_parts(
            Rc::clone(&tools),
            config.create_smoother()?,
            config.stroke_style(),
            config.gesture.color_cooldown_ms,
        );
        engine.apply_style(&mut canvas);

        let palette_index = Rc::new(RefCell::new(0usize));

        // Palette cycling is UI-side logic: the engine only reports the
        // activation, the app advances the color and pushes it into the
        // shared tool state.
        {
            let palette = config.stroke.palette.clone();
            let tools = Rc::clone(&tools);
            let index = Rc::clone(&palette_index);
            engine.set_on_color_cycle_requested(Box::new(move || {
                let mut i = index.borrow_mut();
                *i = (*i + 1) % palette.len();
                let color = palette[*i];
                tools.borrow_mut().color = color;
                info!("palette cycled to {color}");
            }));
        }

        engine.set_on_gesture_changed(Box::new(|gesture| {
            info!("gesture: {gesture}");
        }));

        Ok(Self {
            config,
            canvas,
            engine,
            tools,
            palette_index,
        })
    }

    /// Replay every recorded frame through the pipeline
    pub fn run(&mut self, script: &ReplayScript) -> Result<()> {
        info!("Replaying {} frames", script.frames.len());

        let mut prev = self.engine.last_gesture();
        for (i, recorded) in script.frames.iter().enumerate() {
            // Recorded toolbar actions apply before the tick, the way the
            // UI mutates the shared tool state between driver callbacks
            if let Some(tool) = recorded.tool {
                debug!("tool selected: {tool:?}");
                self.tools.borrow_mut().tool = tool;
            }
            if recorded.clear {
                self.engine.clear_surface(&mut self.canvas);
            }

            let frame = recorded
                .hand
                .as_ref()
                .map(|points| HandFrame::from_points(points));

            let gesture = self.engine.tick(frame.as_ref(), recorded.t_ms, &mut self.canvas);
            debug!("frame {i}: t={}ms gesture={gesture}", recorded.t_ms);

            // The engine performs no raster action on Clear; the wipe is
            // this explicit external call, issued once per fist shown.
            if gesture == Gesture::Clear && prev != Gesture::Clear {
                self.engine.clear_surface(&mut self.canvas);
            }
            prev = gesture;
        }

        Ok(())
    }

    /// Write the current canvas to a PNG file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        info!("Writing canvas to {}", path.as_ref().display());
        self.canvas.save_png(path)
    }

    /// Currently active tool state (for inspection)
    #[must_use]
    pub fn tool_state(&self) -> ToolState {
        *self.tools.borrow()
    }

    /// Currently active palette slot
    #[must_use]
    pub fn palette_index(&self) -> usize {
        *self.palette_index.borrow()
    }

    /// Borrow the canvas
    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The configuration this app was built from
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_yaml_round_trip() {
        let script = ReplayScript {
            frames: vec![
                RecordedFrame {
                    t_ms: 0.0,
                    hand: None,
                    tool: None,
                    clear: false,
                },
                RecordedFrame {
                    t_ms: 16.0,
                    hand: Some(vec![[0.5, 0.5, 0.0]; 21]),
                    tool: Some(Tool::Eraser),
                    clear: false,
                },
            ],
        };
        let yaml = serde_yaml::to_string(&script).unwrap();
        let parsed: ReplayScript = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.frames.len(), 2);
        assert!(parsed.frames[0].hand.is_none());
        assert_eq!(parsed.frames[1].hand.as_ref().unwrap().len(), 21);
        assert_eq!(parsed.frames[1].tool, Some(Tool::Eraser));
        assert!(!parsed.frames[1].clear);
    }

    #[test]
    fn test_app_construction() {
        let app = ReplayApp::new(Config::default()).unwrap();
        assert_eq!(app.palette_index(), 0);
        assert_eq!(app.tool_state().tool, Tool::Pen);
    }

    #[test]
    fn test_replay_empty_script() {
        let mut app = ReplayApp::new(Config::default()).unwrap();
        app.run(&ReplayScript::default()).unwrap();
        assert_eq!(app.canvas().width(), Config::default().canvas.width);
    }
}
