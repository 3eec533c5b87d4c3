// Coordinates backend startup/shutdown and drives the event loop while delegating
// rendering & protocol state to `WaylandState` and its handler modules.
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    reexports::{
        calloop::{
            EventLoop,
            timer::{TimeoutAction, Timer},
        },
        calloop_wayland_source::WaylandSource,
    },
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        wlr_layer::{Anchor, KeyboardInteractivity, Layer, LayerShell},
    },
    shm::Shm,
};
use wayland_client::{Connection, globals::registry_queue_init};

use super::state::WaylandState;
use crate::{backend::RunOptions, config::Config, input::KeyHook};

/// How often the key hook is drained and pill lifecycles advance.
const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Wayland backend state
pub struct WaylandBackend {
    options: RunOptions,
}

impl WaylandBackend {
    pub fn new(options: RunOptions) -> Result<Self> {
        Ok(Self { options })
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting Wayland backend");

        // Connect to Wayland compositor
        let conn =
            Connection::connect_to_env().context("Failed to connect to Wayland compositor")?;
        debug!("Connected to Wayland display");

        // Initialize registry and event queue
        let (globals, event_queue) =
            registry_queue_init(&conn).context("Failed to initialize Wayland registry")?;
        let qh = event_queue.handle();

        // Bind global interfaces
        let compositor_state =
            CompositorState::bind(&globals, &qh).context("wl_compositor not available")?;
        debug!("Bound compositor");

        let layer_shell =
            LayerShell::bind(&globals, &qh).context("zwlr_layer_shell_v1 not available")?;
        debug!("Bound layer shell");

        let shm = Shm::bind(&globals, &qh).context("wl_shm not available")?;
        debug!("Bound shared memory");

        let output_state = OutputState::new(&globals, &qh);
        debug!("Initialized output state");

        let seat_state = SeatState::new(&globals, &qh);
        debug!("Initialized seat state");

        let registry_state = RegistryState::new(&globals);

        // Load configuration
        let mut config = Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Config::default()
        });
        if let Some(duration) = self.options.duration {
            config.overlay.duration = duration.clamp(0.5, 5.0);
        }
        info!("Configuration loaded");
        debug!("  Display mode: {:?}", config.overlay.display_mode);
        debug!("  Filter: {:?}", config.overlay.display_filter);
        debug!("  Duration: {:.1}s", config.overlay.duration);
        debug!("  Theme: {:?}", config.theme.theme);
        debug!("  Buffer count: {}", config.performance.buffer_count);

        // Open the keyboard capture hook before touching the surface so a
        // permissions problem fails fast.
        let hook = KeyHook::open().context("Failed to open keyboard devices")?;

        // Create application state
        let mut state = WaylandState::new(
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            config,
            hook,
        );

        // Create layer shell surface
        info!("Creating layer shell surface");
        let wl_surface = state.compositor_state.create_surface(&qh);
        let layer_surface = state.layer_shell.create_layer_surface(
            &qh,
            wl_surface,
            Layer::Overlay,
            Some("waycast"),
            None, // Default output
        );

        // Configure the layer surface for fullscreen overlay
        layer_surface.set_anchor(Anchor::all());
        // Keys arrive through the evdev hook; the surface never takes focus.
        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::None);
        layer_surface.set_size(0, 0); // Use full screen size
        layer_surface.set_exclusive_zone(-1);

        // Commit the surface
        layer_surface.commit();

        state.surface.set_layer_surface(layer_surface);
        info!("Layer shell surface created");

        if self.options.reposition {
            state.enter_reposition();
        } else {
            // Click-through: an empty input region lets all pointer events
            // pass to the windows underneath.
            state.set_click_through(true);
        }

        // Event loop: Wayland events plus a steady tick for the key hook,
        // debounce deadlines, and pill fades.
        let mut event_loop: EventLoop<WaylandState> =
            EventLoop::try_new().context("Failed to create event loop")?;
        WaylandSource::new(conn.clone(), event_queue)
            .insert(event_loop.handle())
            .map_err(|e| anyhow::anyhow!("Failed to insert Wayland source: {}", e))?;
        event_loop
            .handle()
            .insert_source(
                Timer::from_duration(TICK_INTERVAL),
                |_deadline, _, state: &mut WaylandState| {
                    state.tick();
                    TimeoutAction::ToDuration(TICK_INTERVAL)
                },
            )
            .map_err(|e| anyhow::anyhow!("Failed to insert tick timer: {}", e))?;

        // Track consecutive render failures for error recovery
        let mut consecutive_render_failures = 0u32;
        const MAX_RENDER_FAILURES: u32 = 10;

        loop {
            event_loop
                .dispatch(None, &mut state)
                .context("Event loop dispatch failed")?;

            if state.should_exit {
                info!("Exit requested, breaking event loop");
                break;
            }

            // Render if configured and needs redraw, but only if no frame
            // callback is pending. This throttles rendering to the display
            // refresh rate.
            let can_render = state.surface.is_configured()
                && state.needs_redraw
                && !state.surface.frame_callback_pending();

            if can_render {
                match state.render(&qh) {
                    Ok(()) => {
                        consecutive_render_failures = 0;
                        state.needs_redraw = false;
                        state.surface.set_frame_callback_pending(true);
                    }
                    Err(e) => {
                        consecutive_render_failures += 1;
                        warn!(
                            "Rendering error (attempt {}/{}): {}",
                            consecutive_render_failures, MAX_RENDER_FAILURES, e
                        );

                        if consecutive_render_failures >= MAX_RENDER_FAILURES {
                            return Err(anyhow::anyhow!(
                                "Too many consecutive render failures ({}), exiting: {}",
                                consecutive_render_failures,
                                e
                            ));
                        }

                        // Clear redraw flag to avoid an infinite error loop
                        state.needs_redraw = false;
                    }
                }
            }
        }

        info!("Wayland backend exiting");
        Ok(())
    }
}
