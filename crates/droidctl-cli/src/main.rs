//! droidctl CLI — runs device facade operations against a simulated device.

mod simulation;

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use droidctl_device::setup::load_config_as;
use droidctl_device::ScalingMapper;
use droidctl_types::{DisplayId, LogicalPosition, MotionAction, Point, PowerMode};

use simulation::{describe_injection, describe_power_call, CliConfig, Simulation};

#[derive(Parser)]
#[command(
    name = "droidctl",
    about = "Drive a simulated device through the droidctl facade",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Target display (overrides `device.display_id`).
    #[arg(short, long, global = true)]
    display: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the simulated platform and the power strategy it selects.
    Info,

    /// Set the power mode of the physical displays.
    Power {
        #[arg(value_enum)]
        mode: PowerArg,
    },

    /// Press the power key if the screen is on.
    PowerOff,

    /// Toggle between portrait and landscape.
    Rotate,

    /// Press and release a keycode.
    Key {
        keycode: i32,
    },

    /// Tap at a position in capture coordinates.
    Tap {
        x: i32,
        y: i32,
    },

    /// Read or write the clipboard.
    Clipboard {
        #[command(subcommand)]
        action: ClipboardAction,
    },

    /// Open or close status bar panels.
    Panel {
        #[arg(value_enum)]
        panel: PanelArg,
    },
}

#[derive(Subcommand)]
enum ClipboardAction {
    /// Print the clipboard text.
    Get,
    /// Replace the clipboard text.
    Set { text: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum PowerArg {
    On,
    Off,
}

#[derive(Clone, Copy, ValueEnum)]
enum PanelArg {
    Notifications,
    Settings,
    Collapse,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config: CliConfig = load_config_as(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.base.device.log_level)
            }),
        )
        .init();

    let sim = Simulation::build(&config).context("failed to build simulated device")?;
    let device = &sim.device;
    let display = cli.display.map_or(config.base.device.display_id, DisplayId);
    let mode = config.base.device.inject_mode;
    let display_id = display;
    tracing::debug!(display = %display_id, %mode, "simulated device ready");

    match cli.command {
        Commands::Info => {
            let platform = device.platform();
            println!("Device:         {}", device.device_name());
            println!("Brand:          {}", platform.brand);
            println!("SDK:            {}", platform.sdk_version);
            println!("Power strategy: {:?}", device.power_strategy());
            println!("Screen on:      {}", device.is_screen_on());
            println!(
                "Input on display {display}: {}",
                device.supports_input_events(display)
            );
        }
        Commands::Power { mode: power } => {
            let power_mode = match power {
                PowerArg::On => PowerMode::Normal,
                PowerArg::Off => PowerMode::Off,
            };
            let ok = device.set_screen_power_mode(power_mode);
            for (token, mode) in sim.power.calls() {
                println!("{}", describe_power_call(token, mode));
            }
            check("set power mode", ok)?;
        }
        Commands::PowerOff => {
            ensure_input_supported(&sim, display)?;
            let ok = device.power_off_screen(display);
            print_injections(&sim);
            check("power off screen", ok)?;
        }
        Commands::Rotate => {
            let rotation = device.rotate_device(display)?;
            println!(
                "rotated display {display} to {} ({})",
                rotation.quarter_turns(),
                rotation.orientation_name()
            );
            if let Some((_, locked)) = sim.rotation_state(display) {
                println!("auto-rotation {}", if locked { "off" } else { "on" });
            }
        }
        Commands::Key { keycode } => {
            ensure_input_supported(&sim, display)?;
            let ok = device.press_release_keycode(keycode, display, mode);
            print_injections(&sim);
            check("press key", ok)?;
        }
        Commands::Tap { x, y } => {
            ensure_input_supported(&sim, display)?;
            let capture = config.simulation.capture_size;
            device.set_position_mapper(Arc::new(ScalingMapper::new(
                capture,
                config.simulation.display_size,
            )));
            let position = LogicalPosition::new(Point::new(x, y), capture);
            let ok = device.inject_touch(MotionAction::Down, 0, &position, 1.0, display, mode)
                && device.inject_touch(MotionAction::Up, 0, &position, 0.0, display, mode);
            print_injections(&sim);
            check("tap", ok)?;
        }
        Commands::Clipboard { action } => match action {
            ClipboardAction::Get => match device.clipboard_text() {
                Some(text) => println!("{text}"),
                None => println!("(empty)"),
            },
            ClipboardAction::Set { text } => {
                let written = device.set_clipboard_text(&text);
                println!(
                    "{}",
                    if written {
                        "clipboard updated"
                    } else {
                        "clipboard unchanged"
                    }
                );
                println!("{} clipboard write(s)", sim.clipboard.writes().len());
            }
        },
        Commands::Panel { panel } => match panel {
            PanelArg::Notifications => device.expand_notification_panel(),
            PanelArg::Settings => device.expand_settings_panel(),
            PanelArg::Collapse => device.collapse_panels(),
        },
    }

    Ok(())
}

/// Injecting into an unsupported display is a caller bug; refuse up front.
fn ensure_input_supported(sim: &Simulation, display: DisplayId) -> anyhow::Result<()> {
    if !sim.device.supports_input_events(display) {
        bail!("display {display} does not support input events on this platform");
    }
    Ok(())
}

fn print_injections(sim: &Simulation) {
    for injected in sim.input.injected_events() {
        println!("{}", describe_injection(&injected));
    }
}

fn check(what: &str, ok: bool) -> anyhow::Result<()> {
    if !ok {
        bail!("{what} failed");
    }
    println!("{what}: ok");
    Ok(())
}
