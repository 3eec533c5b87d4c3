// Feeds pointer events into the reposition drag. Outside reposition mode the
// surface has an empty input region, so no events arrive here.
use log::debug;
use smithay_client_toolkit::seat::pointer::{
    BTN_LEFT, PointerEvent, PointerEventKind, PointerHandler,
};
use wayland_client::{Connection, QueueHandle, protocol::wl_pointer};

use super::super::state::WaylandState;

impl PointerHandler for WaylandState {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        let width = self.surface.width() as f64;
        let height = self.surface.height() as f64;

        for event in events {
            let (px, py) = event.position;
            match event.kind {
                PointerEventKind::Enter { .. } => {
                    debug!("Pointer entered at ({:.0}, {:.0})", px, py);
                }
                PointerEventKind::Leave { .. } => {
                    debug!("Pointer left surface");
                    self.reposition.pointer_release();
                }
                PointerEventKind::Motion { .. } => {
                    if self.reposition.pointer_motion(px, py, width, height) {
                        self.needs_redraw = true;
                    }
                }
                PointerEventKind::Press { button, .. } => {
                    if button == BTN_LEFT
                        && self.reposition.pointer_press(px, py, width, height)
                    {
                        self.needs_redraw = true;
                    }
                }
                PointerEventKind::Release { button, .. } => {
                    if button == BTN_LEFT {
                        self.reposition.pointer_release();
                    }
                }
                PointerEventKind::Axis { .. } => {}
            }
        }
    }
}
