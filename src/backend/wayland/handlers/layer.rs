// Layer-shell configure/close events keep the surface dimensions in sync.
use log::info;
use smithay_client_toolkit::shell::wlr_layer::{
    LayerShellHandler, LayerSurface, LayerSurfaceConfigure,
};
use wayland_client::{Connection, QueueHandle};

use super::super::state::WaylandState;

impl LayerShellHandler for WaylandState {
    fn closed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _layer: &LayerSurface) {
        self.on_layer_closed();
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _layer: &LayerSurface,
        configure: LayerSurfaceConfigure,
        _serial: u32,
    ) {
        info!(
            "Layer surface configured: {}x{}",
            configure.new_size.0, configure.new_size.1
        );

        if configure.new_size.0 > 0
            && configure.new_size.1 > 0
            && self
                .surface
                .update_dimensions(configure.new_size.0, configure.new_size.1)
        {
            info!("Surface size changed, buffer pool will be recreated");
        }

        self.surface.set_configured(true);
        self.needs_redraw = true;
    }
}
