// Holds the live Wayland protocol state shared by the backend loop and the handler
// submodules; owns the pill pipeline and provides rendering and region helpers.
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::{CompositorState, Region},
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{WaylandSurface, wlr_layer::LayerShell},
    shm::Shm,
};
use wayland_client::{QueueHandle, protocol::wl_shm};

use super::surface::SurfaceState;
use crate::{
    config::Config,
    draw::{self, FontDescriptor, RenderParams},
    input::{HookSignal, KeyHook, ModifierDebouncer, classify},
    keymap::KeyTables,
    overlay::{PillManager, RepositionController},
    theme::{self, Palette},
    util,
};

/// Internal Wayland state shared across modules.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) layer_shell: LayerShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    // Surface and buffer management
    pub(super) surface: SurfaceState,

    // Configuration and resolved appearance
    pub(super) config: Config,
    tables: KeyTables,
    palette: Palette,
    font: FontDescriptor,

    // Key pipeline
    hook: KeyHook,
    debouncer: ModifierDebouncer,
    pills: PillManager,

    // Reposition drag
    pub(super) reposition: RepositionController,

    pub(super) needs_redraw: bool,
    pub(super) should_exit: bool,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        layer_shell: LayerShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        config: Config,
        hook: KeyHook,
    ) -> Self {
        let palette = theme::resolve(&config.theme);
        let font = FontDescriptor::new(
            config.theme.font_family.clone(),
            config.theme.font_weight.clone(),
        );
        let pills = PillManager::new(
            config.overlay.display_mode,
            std::time::Duration::from_secs_f64(config.overlay.duration),
        );

        Self {
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            surface: SurfaceState::new(),
            config,
            tables: KeyTables::new(),
            palette,
            font,
            hook,
            debouncer: ModifierDebouncer::new(),
            pills,
            reposition: RepositionController::new(),
            needs_redraw: false,
            should_exit: false,
        }
    }

    /// Periodic tick: drains the key hook, releases debounce holds, and
    /// advances pill lifecycles.
    pub(super) fn tick(&mut self) {
        let now = Instant::now();

        match self.hook.drain() {
            Ok(signals) => {
                for signal in signals {
                    match signal {
                        HookSignal::Key(event) => {
                            let classified = classify(
                                &event,
                                self.config.overlay.display_filter,
                                self.config.overlay.show_modifier_only,
                                &self.tables,
                            );
                            if let Some(parts) = classified
                                && let Some(parts) = self.debouncer.submit(parts, now)
                            {
                                self.pills.present(parts, now);
                                self.needs_redraw = true;
                            }
                        }
                        HookSignal::ExitReposition => self.finish_reposition(),
                    }
                }
            }
            Err(err) => warn!("Key hook read failed: {}", err),
        }

        if let Some(parts) = self.debouncer.poll(now) {
            self.pills.present(parts, now);
            self.needs_redraw = true;
        }

        if self.pills.tick(now) || self.pills.animating() {
            self.needs_redraw = true;
        }
    }

    /// Switches the overlay into drag-to-reposition mode.
    ///
    /// The drag starts at the persisted custom coordinate regardless of the
    /// current position mode. The input region opens up so the surface
    /// receives pointer events, and the hook swallows keys until Escape
    /// ends the mode.
    pub(super) fn enter_reposition(&mut self) {
        let (x, y) = util::reposition_seed(&self.config.overlay);
        self.reposition.enter(x, y);
        self.hook.set_reposition_active(true);
        self.pills.clear();
        self.set_click_through(false);
        self.needs_redraw = true;
    }

    fn finish_reposition(&mut self) {
        if let Some((x, y)) = self.reposition.exit()
            && let Err(err) = self.config.save_custom_position(x, y)
        {
            warn!("Failed to save custom position: {}", err);
        }
        self.hook.set_reposition_active(false);
        self.set_click_through(true);
        self.needs_redraw = true;
    }

    /// Sets whether pointer events pass through the overlay.
    ///
    /// Click-through uses an empty input region; reposition mode clears the
    /// region so the whole surface accepts pointer input.
    pub(super) fn set_click_through(&mut self, click_through: bool) {
        let Some(layer_surface) = self.surface.layer_surface() else {
            return;
        };
        let wl_surface = layer_surface.wl_surface();

        if click_through {
            match Region::new(&self.compositor_state) {
                Ok(region) => wl_surface.set_input_region(Some(region.wl_region())),
                Err(err) => {
                    warn!("Failed to create empty input region: {}", err);
                    return;
                }
            }
        } else {
            wl_surface.set_input_region(None);
        }
        wl_surface.commit();
        debug!("Input region updated (click_through={})", click_through);
    }

    pub(super) fn render(&mut self, qh: &QueueHandle<Self>) -> Result<()> {
        let buffer_count = self.config.performance.buffer_count as usize;
        let width = self.surface.width();
        let height = self.surface.height();

        // Get a buffer from the pool
        let (buffer, canvas) = {
            let pool = self.surface.ensure_pool(&self.shm, buffer_count)?;
            pool.create_buffer(
                width as i32,
                height as i32,
                (width * 4) as i32,
                wl_shm::Format::Argb8888,
            )
            .context("Failed to create buffer")?
        };

        // SAFETY: This unsafe block creates a Cairo surface from raw memory buffer.
        // Safety invariants that must be maintained:
        // 1. `canvas` is a valid mutable slice from SlotPool with exactly (width * height * 4) bytes
        // 2. The buffer format ARgb32 matches the allocation (4 bytes per pixel)
        // 3. The stride (width * 4) correctly represents the number of bytes per row
        // 4. `cairo_surface` and `ctx` are explicitly dropped before the buffer is
        //    committed to Wayland, so Cairo never touches memory after handoff
        // 5. No other references to this memory exist during Cairo's usage
        let cairo_surface = unsafe {
            cairo::ImageSurface::create_for_data_unsafe(
                canvas.as_mut_ptr(),
                cairo::Format::ARgb32,
                width as i32,
                height as i32,
                (width * 4) as i32,
            )
            .context("Failed to create Cairo surface")?
        };

        let ctx = cairo::Context::new(&cairo_surface).context("Failed to create Cairo context")?;

        // Clear with fully transparent background
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint().context("Failed to clear background")?;
        ctx.set_operator(cairo::Operator::Over);

        let (fw, fh) = (width as f64, height as f64);
        if self.reposition.is_active() {
            let (x, y) = self
                .reposition
                .position()
                .unwrap_or_else(|| util::anchor_percent(&self.config.overlay));
            let params = RenderParams {
                palette: &self.palette,
                font: &self.font,
                size: self.config.overlay.size,
                opacity: 1.0,
                anchor: (x / 100.0 * fw, y / 100.0 * fh),
                grows_up: util::stack_grows_up(&self.config.overlay),
            };
            draw::render_reposition(&ctx, &params, fw, fh);
        } else if !self.pills.is_empty() {
            let params = RenderParams {
                palette: &self.palette,
                font: &self.font,
                size: self.config.overlay.size,
                opacity: self.config.overlay.opacity as f64 / 100.0,
                anchor: util::anchor_point(&self.config.overlay, fw, fh),
                grows_up: util::stack_grows_up(&self.config.overlay),
            };
            draw::render_pills(&ctx, &params, self.pills.pills(), Instant::now());
        }

        // Flush Cairo and release the buffer before attaching
        cairo_surface.flush();
        drop(ctx);
        drop(cairo_surface);

        // Attach buffer and commit
        let wl_surface = self
            .surface
            .layer_surface()
            .context("Layer surface not created")?
            .wl_surface();
        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);
        wl_surface.damage_buffer(0, 0, width as i32, height as i32);
        wl_surface.frame(qh, wl_surface.clone());
        wl_surface.commit();

        Ok(())
    }

    pub(super) fn on_layer_closed(&mut self) {
        info!("Layer surface closed by compositor");
        self.should_exit = true;
    }
}
