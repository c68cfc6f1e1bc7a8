//! A device facade wired over mock services, configured from TOML.

use std::sync::Arc;

use droidctl_device::{Config, Device, DeviceError, DisplayServices, Services};
use droidctl_services::mock::{
    InjectedEvent, ManualClock, MockClipboard, MockDisplays, MockInput, MockInputHandle,
    MockPower, MockScreenState, MockStatusBar, MockWindow,
};
use droidctl_services::{ClipboardService, DisplayEnumerationService};
use droidctl_types::{
    DisplayId, DisplayToken, InputEvent, PhysicalDisplayId, PowerMode, Rotation, Size,
};
use serde::Deserialize;

/// Device config plus the `[simulation]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    #[serde(flatten)]
    pub base: Config,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Initial state of the simulated device.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_physical_displays")]
    pub physical_displays: Vec<SimulatedPhysicalDisplay>,
    /// Whether the build ships the display-control service.
    #[serde(default = "default_true")]
    pub display_control: bool,
    #[serde(default = "default_true")]
    pub screen_on: bool,
    #[serde(default = "default_true")]
    pub clipboard_available: bool,
    #[serde(default)]
    pub clipboard: Option<String>,
    /// Rotation state of logical displays. The default display is added
    /// unlocked at rotation 0 if not listed.
    #[serde(default)]
    pub displays: Vec<SimulatedDisplay>,
    #[serde(default = "default_capture_size")]
    pub capture_size: Size,
    #[serde(default = "default_display_size")]
    pub display_size: Size,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            physical_displays: default_physical_displays(),
            display_control: true,
            screen_on: true,
            clipboard_available: true,
            clipboard: None,
            displays: Vec::new(),
            capture_size: default_capture_size(),
            display_size: default_display_size(),
        }
    }
}

/// A physical display output.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatedPhysicalDisplay {
    pub id: u64,
    /// Power mode changes on this display fail.
    #[serde(default)]
    pub fail: bool,
}

/// Rotation state of a logical display.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatedDisplay {
    pub id: DisplayId,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub locked: bool,
}

fn default_physical_displays() -> Vec<SimulatedPhysicalDisplay> {
    vec![SimulatedPhysicalDisplay { id: 0, fail: false }]
}

fn default_true() -> bool {
    true
}

fn default_capture_size() -> Size {
    Size::new(1080, 2400)
}

fn default_display_size() -> Size {
    Size::new(1080, 2400)
}

/// A simulated device and the observers of its services.
pub struct Simulation {
    pub device: Device,
    pub input: MockInputHandle,
    pub power: MockPower,
    pub window: MockWindow,
    pub clipboard: MockClipboard,
}

impl Simulation {
    pub fn build(config: &CliConfig) -> Result<Self, DeviceError> {
        let sim = &config.simulation;

        let ids: Vec<u64> = sim.physical_displays.iter().map(|d| d.id).collect();
        let surface_control = MockDisplays::new(&ids);
        let display_control = sim
            .display_control
            .then(|| Arc::new(MockDisplays::new(&ids)) as Arc<dyn DisplayEnumerationService>);

        let power = MockPower::new();
        for display in sim.physical_displays.iter().filter(|d| d.fail) {
            power.fail_display(MockDisplays::token_for(PhysicalDisplayId(display.id)));
        }

        let window = MockWindow::new();
        for display in &sim.displays {
            window.set_display(display.id, display.rotation, display.locked);
        }

        let clipboard = sim
            .clipboard
            .as_deref()
            .map_or_else(MockClipboard::new, MockClipboard::with_text);

        let input = MockInput::new();
        let input_handle = input.handle();

        let services = Services {
            input: Arc::new(input),
            power: Arc::new(power.clone()),
            displays: DisplayServices {
                surface_control: Arc::new(surface_control),
                display_control,
            },
            window: Arc::new(window.clone()),
            clipboard: sim
                .clipboard_available
                .then(|| Arc::new(clipboard.clone()) as Arc<dyn ClipboardService>),
            screen_state: Arc::new(MockScreenState::new(sim.screen_on)),
            status_bar: Arc::new(MockStatusBar::new()),
            clock: Arc::new(ManualClock::new(0)),
        };

        Ok(Self {
            device: Device::new(config.base.platform.to_platform(), services)?,
            input: input_handle,
            power,
            window,
            clipboard,
        })
    }

    /// Rotation and lock state of a display, for reporting.
    pub fn rotation_state(&self, display: DisplayId) -> Option<(Rotation, bool)> {
        Some((
            self.window.current_rotation(display)?,
            self.window.frozen(display)?,
        ))
    }
}

/// Render an injected event with the raw values the input service receives.
pub fn describe_injection(injected: &InjectedEvent) -> String {
    let mode = injected.mode.as_raw();
    match &injected.event {
        InputEvent::Key(key) => format!(
            "key(action={}, keycode={}, mode={mode})",
            key.action.as_raw(),
            key.keycode
        ),
        InputEvent::Motion(motion) => format!(
            "motion(action={}, x={}, y={}, mode={mode})",
            motion.action.as_raw(),
            motion.position.x,
            motion.position.y
        ),
    }
}

/// Render a power call with the raw mode the surface flinger receives.
pub fn describe_power_call(token: DisplayToken, mode: PowerMode) -> String {
    format!(
        "set_display_power_mode(token={:#x}, mode={})",
        token.as_raw(),
        mode.as_raw()
    )
}
