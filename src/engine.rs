//! Stateful stroke engine: turns the per-frame gesture stream into rendered
//! ink on a persistent canvas.
//!
//! The engine is driven by an external per-tick caller (nominally display
//! refresh rate, but any irregular cadence works) and owns the drawing
//! session state: the last smoothed point, the active-drawing flag, and the
//! cooldown timestamp for one-shot actions. Tool and color are owned by the
//! UI layer and shared in via [`ToolState`]; the engine re-reads them every
//! tick. Discrete events (gesture transitions, color-cycle activations) are
//! delivered through caller-supplied callbacks.

use crate::canvas::{Canvas, Color, CompositeMode, PixelPoint, StrokeStyle};
use crate::constants::DEFAULT_COLOR_COOLDOWN_MS;
use crate::gesture::{classify, Gesture};
use crate::hand::HandFrame;
use crate::smoothing::{ExponentialSmoother, PointSmoother};
use log::{debug, trace};
use std::cell::RefCell;
use std::rc::Rc;

/// Active drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Paint with the active color
    Pen,
    /// Clear pixels to transparent along the stroke
    Eraser,
}

impl Default for Tool {
    fn default() -> Self {
        Self::Pen
    }
}

/// Externally owned tool configuration, re-read by the engine each tick.
///
/// The UI layer keeps a clone of the `Rc` handle and mutates tool/color at
/// will between ticks; changes apply from the next rendered segment onward,
/// never retroactively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    pub tool: Tool,
    pub color: Color,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: Color::rgb(255, 255, 255),
        }
    }
}

impl ToolState {
    /// Wrap a tool state in the shared handle the engine consumes
    #[must_use]
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }
}

/// Callback invoked once per actual gesture transition
pub type GestureCallback = Box<dyn FnMut(Gesture)>;

/// Callback invoked per successful cooldown-gated color-cycle activation
pub type ColorCycleCallback = Box<dyn FnMut()>;

/// Stateful per-tick stroke processor.
///
/// One engine drives one canvas; the canvas itself is owned by the caller
/// and lent in for the duration of each tick.
pub struct StrokeEngine {
    last_gesture: Gesture,
    last_point: Option<PixelPoint>,
    is_drawing: bool,
    last_action_ms: f64,
    cooldown_ms: f64,
    style: StrokeStyle,
    smoother: Box<dyn PointSmoother>,
    tools: Rc<RefCell<ToolState>>,
    on_gesture_changed: Option<GestureCallback>,
    on_color_cycle_requested: Option<ColorCycleCallback>,
}

impl StrokeEngine {
    /// Create an engine with default smoothing, widths and cooldown
    #[must_use]
    pub fn new(tools: Rc<RefCell<ToolState>>) -> Self {
        Self::with_parts(
            tools,
            Box::new(ExponentialSmoother::new(
                crate::constants::DEFAULT_SMOOTHING_ALPHA,
            )),
            StrokeStyle::default(),
            DEFAULT_COLOR_COOLDOWN_MS,
        )
    }

    /// Create an engine from explicit parts
    #[must_use]
    pub fn with_parts(
        tools: Rc<RefCell<ToolState>>,
        smoother: Box<dyn PointSmoother>,
        style: StrokeStyle,
        cooldown_ms: f64,
    ) -> Self {
        Self {
            last_gesture: Gesture::Idle,
            last_point: None,
            is_drawing: false,
            last_action_ms: f64::NEG_INFINITY,
            cooldown_ms,
            style,
            smoother,
            tools,
            on_gesture_changed: None,
            on_color_cycle_requested: None,
        }
    }

    /// Register the gesture-transition callback
    pub fn set_on_gesture_changed(&mut self, callback: GestureCallback) {
        self.on_gesture_changed = Some(callback);
    }

    /// Register the color-cycle callback
    pub fn set_on_color_cycle_requested(&mut self, callback: ColorCycleCallback) {
        self.on_color_cycle_requested = Some(callback);
    }

    /// Most recently processed gesture
    #[must_use]
    pub const fn last_gesture(&self) -> Gesture {
        self.last_gesture
    }

    /// True while a stroke is actively being laid down
    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    /// The engine's configured stroke style
    #[must_use]
    pub const fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Assert the engine's stroke style on the canvas. Must be re-invoked
    /// after any canvas resize, which resets the style to defaults.
    pub fn apply_style(&self, canvas: &mut Canvas) {
        canvas.set_style(self.style);
    }

    /// Resize the canvas to a new source resolution and reassert stroke
    /// defaults, which the reallocation discards.
    pub fn resize_surface(&mut self, canvas: &mut Canvas, width: u32, height: u32) {
        canvas.resize(width, height);
        self.apply_style(canvas);
        // Reallocation lost the pixel content; a stale anchor point from
        // the old resolution must not seed the next segment.
        self.end_stroke();
    }

    /// Classify a frame and process it in one call. Malformed frames
    /// classify as Idle, so a single bad frame never halts the pipeline.
    pub fn tick(&mut self, frame: Option<&HandFrame>, now_ms: f64, canvas: &mut Canvas) -> Gesture {
        let gesture = classify(frame);
        self.process_frame(gesture, frame, now_ms, canvas);
        gesture
    }

    /// Process one already-classified frame.
    ///
    /// Called once per driver tick. Mutates session state and the canvas,
    /// and fires the registered callbacks on transitions / activations.
    pub fn process_frame(
        &mut self,
        gesture: Gesture,
        frame: Option<&HandFrame>,
        now_ms: f64,
        canvas: &mut Canvas,
    ) {
        // Edge detection: exactly one notification per actual transition.
        // "No hand" frames arrive here as Idle and get no special casing.
        if gesture != self.last_gesture {
            debug!("gesture changed: {} -> {}", self.last_gesture, gesture);
            self.last_gesture = gesture;
            if let Some(cb) = self.on_gesture_changed.as_mut() {
                cb(gesture);
            }
            if gesture != Gesture::Draw {
                // Drawing sessions never survive a gesture change, even a
                // momentary misdetection.
                self.end_stroke();
            }
        }

        match gesture {
            Gesture::Draw => self.handle_draw(frame, canvas),
            Gesture::ChangeColor => self.handle_color_change(now_ms),
            _ => {}
        }
    }

    /// Wipe the canvas. Decoupled from gesture handling: Clear gestures are
    /// only reported via the transition callback; the actual wipe is this
    /// explicit call, issued by the UI.
    pub fn clear_surface(&mut self, canvas: &mut Canvas) {
        debug!("clearing canvas");
        canvas.clear();
        // The next stroke must not join back to a pre-clear point.
        self.end_stroke();
    }

    fn handle_draw(&mut self, frame: Option<&HandFrame>, canvas: &mut Canvas) {
        let Some(tip) = frame.and_then(HandFrame::index_tip) else {
            return;
        };

        // The visual feed is horizontally mirrored for the user, so x flips.
        let raw = PixelPoint::new(
            (1.0 - tip.x) * f64::from(canvas.width()),
            tip.y * f64::from(canvas.height()),
        );

        // First point of a session passes through the smoother unchanged;
        // the smoother is reset whenever the session anchor is dropped.
        let smoothed = self.smoother.apply(raw);

        if let Some(prev) = self.last_point {
            let tools = *self.tools.borrow();
            let style = canvas.style();
            match tools.tool {
                Tool::Pen => {
                    trace!("pen segment ({:.1},{:.1}) -> ({:.1},{:.1})", prev.x, prev.y, smoothed.x, smoothed.y);
                    canvas.stroke_segment(
                        prev,
                        smoothed,
                        style.pen_width,
                        tools.color,
                        CompositeMode::SourceOver,
                    );
                }
                Tool::Eraser => {
                    trace!("eraser segment ({:.1},{:.1}) -> ({:.1},{:.1})", prev.x, prev.y, smoothed.x, smoothed.y);
                    canvas.stroke_segment(
                        prev,
                        smoothed,
                        style.eraser_width,
                        tools.color,
                        CompositeMode::DestinationOut,
                    );
                }
            }
        }

        self.last_point = Some(smoothed);
        self.is_drawing = true;
    }

    fn handle_color_change(&mut self, now_ms: f64) {
        if now_ms - self.last_action_ms > self.cooldown_ms {
            debug!("color cycle activated at {now_ms}ms");
            self.last_action_ms = now_ms;
            if let Some(cb) = self.on_color_cycle_requested.as_mut() {
                cb();
            }
        }
    }

    /// Drop the stroke anchor and smoothing history
    fn end_stroke(&mut self) {
        self.is_drawing = false;
        self.last_point = None;
        self.smoother.reset();
    }
}
