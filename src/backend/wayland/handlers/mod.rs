// Wires the smithay handler trait impls, split per protocol, to `WaylandState`.
// Keyboard input deliberately has no handler here; keys come from the evdev hook.
use smithay_client_toolkit::{
    delegate_compositor, delegate_layer, delegate_output, delegate_pointer, delegate_registry,
    delegate_seat, delegate_shm,
};

use super::state::WaylandState;

delegate_compositor!(WaylandState);
delegate_output!(WaylandState);
delegate_shm!(WaylandState);
delegate_layer!(WaylandState);
delegate_seat!(WaylandState);
delegate_pointer!(WaylandState);
delegate_registry!(WaylandState);

mod buffer;
mod compositor;
mod layer;
mod output;
mod pointer;
mod registry;
mod seat;
mod shm;
