use clap::{ArgAction, Parser};

mod backend;
mod config;
mod draw;
mod input;
mod keymap;
mod overlay;
mod theme;
mod util;

#[derive(Parser, Debug)]
#[command(name = "waycast")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("WAYCAST_GIT_HASH"), ")"))]
#[command(about = "Keystroke overlay for Wayland compositors")]
struct Cli {
    /// Start in drag-to-reposition mode (drag the preview pill, Esc saves)
    #[arg(long, short = 'r', action = ArgAction::SetTrue)]
    reposition: bool,

    /// Override the pill display duration in seconds (0.5 - 5.0)
    #[arg(long, value_name = "SECS")]
    duration: Option<f64>,

    /// List readable keyboard devices and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list_devices: bool,

    /// Write a documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        config::Config::create_default_file()?;
        let path = config::Config::get_config_path()?;
        println!("Created default config at {}", path.display());
        return Ok(());
    }

    if cli.list_devices {
        let devices = input::KeyHook::list_devices()?;
        if devices.is_empty() {
            println!("No readable keyboard devices found.");
            println!("Make sure you have read access to /dev/input (input group).");
        } else {
            for device in devices {
                println!("{}\t{}", device.path, device.name);
            }
        }
        return Ok(());
    }

    // Check for Wayland environment
    if std::env::var("WAYLAND_DISPLAY").is_err() {
        log::error!("WAYLAND_DISPLAY not set - this application requires Wayland.");
        log::error!("Please run on a Wayland compositor (Hyprland, Sway, etc.).");
        return Err(anyhow::anyhow!("Wayland environment required"));
    }

    let options = backend::RunOptions {
        reposition: cli.reposition,
        duration: cli.duration,
    };

    log::info!("Starting keystroke overlay...");
    backend::run_wayland(options)?;
    log::info!("Keystroke overlay closed.");

    Ok(())
}
