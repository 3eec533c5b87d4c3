use anyhow::Result;

pub mod wayland;

/// Options forwarded from the CLI into the backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Start in drag-to-reposition mode
    pub reposition: bool,
    /// Pill duration override in seconds
    pub duration: Option<f64>,
}

/// Run the Wayland backend with its full event loop.
pub fn run_wayland(options: RunOptions) -> Result<()> {
    let mut backend = wayland::WaylandBackend::new(options)?;
    backend.run()
}
