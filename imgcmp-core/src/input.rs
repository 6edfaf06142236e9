//! Input commands and pointer state.
//!
//! The viewer maps raw keys to [`Command`]s and forwards pointer events
//! here. `InputState` owns everything about the pointer plus the help
//! toggle, and applies each event to a borrowed [`ViewState`].

use crate::view::ViewState;

/// Blend change per Up/Down key press.
pub const DEFAULT_BLEND_STEP: f32 = 0.05;

/// A discrete user action, independent of how it was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    ResetView,
    BlendUp,
    BlendDown,
    ZoomIn,
    ZoomOut,
    /// Blend 0: image A only.
    ShowA,
    /// Blend 1: image B only.
    ShowB,
    /// Blend 0.5: the midpoint of the diff sweep.
    ShowDiff,
    ToggleHelp,
}

/// What the shell should do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// State may have changed; draw a new frame.
    Redraw,
    /// Nothing visible changed.
    Ignore,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    /// Last cursor position, framebuffer space.
    pub cursor: (f32, f32),
    pub pointer_down: bool,
    pub show_help: bool,
    pub blend_step: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            cursor: (0.0, 0.0),
            pointer_down: false,
            show_help: true,
            blend_step: DEFAULT_BLEND_STEP,
        }
    }
}

impl InputState {
    pub fn new(show_help: bool, blend_step: f32) -> Self {
        Self {
            show_help,
            blend_step,
            ..Self::default()
        }
    }

    /// Applies a keyboard command.
    pub fn apply(&mut self, view: &mut ViewState, command: Command) -> Response {
        match command {
            Command::Quit => return Response::Quit,
            Command::ResetView => view.reset(),
            Command::BlendUp => view.nudge_blend(self.blend_step),
            Command::BlendDown => view.nudge_blend(-self.blend_step),
            Command::ZoomIn => {
                if !view.zoom_in() {
                    return Response::Ignore;
                }
            }
            Command::ZoomOut => {
                if !view.zoom_out() {
                    return Response::Ignore;
                }
            }
            Command::ShowA => view.set_blend(0.0),
            Command::ShowB => view.set_blend(1.0),
            Command::ShowDiff => view.set_blend(0.5),
            Command::ToggleHelp => self.show_help = !self.show_help,
        }
        tracing::debug!(?command, zoom = view.zoom, blend = view.blend, "command applied");
        Response::Redraw
    }

    /// Pointer pressed. Returns the framebuffer position to probe.
    pub fn pointer_pressed(&mut self) -> (f32, f32) {
        self.pointer_down = true;
        self.cursor
    }

    pub fn pointer_released(&mut self) {
        self.pointer_down = false;
    }

    /// Cursor moved to `(x, y)` in window space. Pans while the pointer is down.
    pub fn cursor_moved(&mut self, view: &mut ViewState, x: f32, y: f32) -> Response {
        let (fx, fy) = view.window_to_framebuffer(x, y);
        let (px, py) = self.cursor;
        self.cursor = (fx, fy);

        if self.pointer_down {
            view.pan_by(fx - px, fy - py);
            Response::Redraw
        } else {
            Response::Ignore
        }
    }

    /// Vertical wheel motion. Positive zooms in about the cursor, negative zooms out.
    pub fn scrolled(&mut self, view: &mut ViewState, delta_y: f32) -> Response {
        let (fx, fy) = self.cursor;
        let changed = if delta_y > 0.0 {
            view.zoom_in_at(fx, fy)
        } else if delta_y < 0.0 {
            view.zoom_out_at(fx, fy)
        } else {
            false
        };

        if changed {
            Response::Redraw
        } else {
            Response::Ignore
        }
    }
}
