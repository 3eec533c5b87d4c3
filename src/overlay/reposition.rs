//! Drag-to-reposition mode.
//!
//! While active, the overlay accepts pointer input (it is click-through
//! otherwise) and shows a preview pill at the anchor. Dragging moves the
//! anchor in viewport percent, clamped away from the screen edges; Escape
//! ends the mode and the final coordinate is persisted as the custom
//! position.

use log::{debug, info};

use crate::util::clamp_percent;

/// How close to the anchor, in pixels, a press must land to start a drag.
const GRAB_RADIUS: f64 = 140.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Active { x: f64, y: f64, dragging: bool },
}

/// State machine for the reposition drag.
#[derive(Debug)]
pub struct RepositionController {
    state: State,
}

impl Default for RepositionController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositionController {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Enters reposition mode with the anchor at the given percent.
    pub fn enter(&mut self, x: f64, y: f64) {
        info!("Entering reposition mode at ({:.1}, {:.1})", x, y);
        self.state = State::Active {
            x: clamp_percent(x),
            y: clamp_percent(y),
            dragging: false,
        };
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// The anchor position in percent while active.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self.state {
            State::Active { x, y, .. } => Some((x, y)),
            State::Idle => None,
        }
    }

    /// Pointer button press at pixel coordinates within the viewport.
    ///
    /// Starts a drag when the press lands near the anchor. Returns whether
    /// the press was consumed.
    pub fn pointer_press(&mut self, px: f64, py: f64, width: f64, height: f64) -> bool {
        let State::Active { x, y, dragging } = &mut self.state else {
            return false;
        };
        let anchor_px = *x / 100.0 * width;
        let anchor_py = *y / 100.0 * height;
        let distance = ((px - anchor_px).powi(2) + (py - anchor_py).powi(2)).sqrt();
        if distance <= GRAB_RADIUS {
            *dragging = true;
            debug!("Drag started at ({:.0}, {:.0})", px, py);
        }
        *dragging
    }

    /// Pointer motion at pixel coordinates within the viewport.
    ///
    /// While dragging, the anchor follows the pointer in percent, clamped
    /// away from the edges. Returns whether the anchor moved.
    pub fn pointer_motion(&mut self, px: f64, py: f64, width: f64, height: f64) -> bool {
        let State::Active {
            x,
            y,
            dragging: true,
        } = &mut self.state
        else {
            return false;
        };
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        let new_x = clamp_percent(px / width * 100.0);
        let new_y = clamp_percent(py / height * 100.0);
        let moved = new_x != *x || new_y != *y;
        *x = new_x;
        *y = new_y;
        moved
    }

    /// Pointer button release ends the drag but stays in reposition mode.
    pub fn pointer_release(&mut self) {
        if let State::Active { dragging, .. } = &mut self.state {
            *dragging = false;
        }
    }

    /// Leaves reposition mode, returning the final anchor rounded to whole
    /// percent for persistence.
    pub fn exit(&mut self) -> Option<(f64, f64)> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Active { x, y, .. } => {
                info!("Reposition saved at ({:.0}, {:.0})", x.round(), y.round());
                Some((x.round(), y.round()))
            }
            State::Idle => None,
        }
    }
}
