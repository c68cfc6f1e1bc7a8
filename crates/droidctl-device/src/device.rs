//! The device facade.

use std::sync::Arc;

use droidctl_services::{
    Clock, ClipboardService, DisplayEnumerationService, InputService, PowerService,
    ScreenStateService, StatusBarService, WindowService,
};
use droidctl_types::keycode::KEYCODE_POWER;
use droidctl_types::{
    DisplayId, InjectionMode, InputEvent, KeyAction, LogicalPosition, MotionAction,
    PhysicalPoint, Platform, PowerMode, Rotation,
};
use tracing::{debug, info};

use crate::clipboard::ClipboardMediator;
use crate::error::DeviceError;
use crate::injector::InputInjector;
use crate::position::{CoordinateResolver, PositionMapper};
use crate::power::{PowerModeController, PowerStrategy};
use crate::rotation::RotationController;

/// The two display enumeration services.
pub struct DisplayServices {
    pub surface_control: Arc<dyn DisplayEnumerationService>,
    /// Only present on builds that ship the display-control service.
    pub display_control: Option<Arc<dyn DisplayEnumerationService>>,
}

/// Every OS service the facade talks to.
pub struct Services {
    pub input: Arc<dyn InputService>,
    pub power: Arc<dyn PowerService>,
    pub displays: DisplayServices,
    pub window: Arc<dyn WindowService>,
    pub clipboard: Option<Arc<dyn ClipboardService>>,
    pub screen_state: Arc<dyn ScreenStateService>,
    pub status_bar: Arc<dyn StatusBarService>,
    pub clock: Arc<dyn Clock>,
}

/// Thread-safe entry point for every device operation.
pub struct Device {
    platform: Platform,
    resolver: CoordinateResolver,
    injector: InputInjector,
    power: PowerModeController,
    rotation: RotationController,
    clipboard: ClipboardMediator,
    screen_state: Arc<dyn ScreenStateService>,
    status_bar: Arc<dyn StatusBarService>,
}

impl Device {
    /// Wire the facade for `platform` over `services`.
    pub fn new(platform: Platform, services: Services) -> Result<Self, DeviceError> {
        let power = PowerModeController::new(&platform, services.power, &services.displays)?;
        let injector = InputInjector::new(&platform, services.input, services.clock);
        info!(
            model = %platform.model,
            sdk = platform.sdk_version,
            power_strategy = ?power.strategy(),
            "device facade ready"
        );
        Ok(Self {
            resolver: CoordinateResolver::new(),
            injector,
            power,
            rotation: RotationController::new(services.window),
            clipboard: ClipboardMediator::new(services.clipboard),
            screen_state: services.screen_state,
            status_bar: services.status_bar,
            platform,
        })
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn device_name(&self) -> &str {
        &self.platform.model
    }

    pub fn power_strategy(&self) -> PowerStrategy {
        self.power.strategy()
    }

    // -- positions ----------------------------------------------------------

    /// Install the mapper for the current capture session.
    pub fn set_position_mapper(&self, mapper: Arc<dyn PositionMapper>) {
        self.resolver.set_mapper(mapper);
    }

    pub fn clear_position_mapper(&self) {
        self.resolver.clear_mapper();
    }

    /// Map a client position to physical display space.
    pub fn physical_point(&self, position: &LogicalPosition) -> Option<PhysicalPoint> {
        self.resolver.resolve(position)
    }

    // -- input --------------------------------------------------------------

    pub fn supports_input_events(&self, display: DisplayId) -> bool {
        self.injector.supports_injection(display)
    }

    /// See [`InputInjector::inject_event`].
    pub fn inject_event(
        &self,
        event: impl Into<InputEvent>,
        display: DisplayId,
        mode: InjectionMode,
    ) -> bool {
        self.injector.inject_event(event, display, mode)
    }

    pub fn inject_key_event(
        &self,
        action: KeyAction,
        keycode: i32,
        repeat: u32,
        meta_state: u32,
        display: DisplayId,
        mode: InjectionMode,
    ) -> bool {
        self.injector
            .inject_key_event(action, keycode, repeat, meta_state, display, mode)
    }

    pub fn press_release_keycode(
        &self,
        keycode: i32,
        display: DisplayId,
        mode: InjectionMode,
    ) -> bool {
        self.injector.press_and_release(keycode, display, mode)
    }

    /// Inject a touch at a client position.
    ///
    /// Returns `false` without injecting if the position cannot be mapped.
    pub fn inject_touch(
        &self,
        action: MotionAction,
        pointer_id: u64,
        position: &LogicalPosition,
        pressure: f32,
        display: DisplayId,
        mode: InjectionMode,
    ) -> bool {
        let Some(point) = self.resolver.resolve(position) else {
            debug!(?position, "ignoring touch event, position unavailable");
            return false;
        };
        self.injector
            .inject_touch(action, pointer_id, point, pressure, display, mode)
    }

    // -- screen and power ---------------------------------------------------

    pub fn is_screen_on(&self) -> bool {
        self.screen_state.is_screen_on()
    }

    /// Set the power mode of the physical displays.
    pub fn set_screen_power_mode(&self, mode: PowerMode) -> bool {
        self.power.set_power_mode(mode)
    }

    /// Turn the screen off with a power key press.
    ///
    /// Returns `true` without pressing anything if the screen is already off.
    pub fn power_off_screen(&self, display: DisplayId) -> bool {
        if !self.is_screen_on() {
            return true;
        }
        self.injector
            .press_and_release(KEYCODE_POWER, display, InjectionMode::Async)
    }

    /// See [`RotationController::rotate_device`].
    pub fn rotate_device(&self, display: DisplayId) -> Result<Rotation, DeviceError> {
        self.rotation.rotate_device(display)
    }

    // -- clipboard ----------------------------------------------------------

    pub fn clipboard_text(&self) -> Option<String> {
        self.clipboard.get_text()
    }

    /// See [`ClipboardMediator::set_text`].
    pub fn set_clipboard_text(&self, text: &str) -> bool {
        self.clipboard.set_text(text)
    }

    // -- status bar ---------------------------------------------------------

    pub fn expand_notification_panel(&self) {
        self.status_bar.expand_notifications_panel();
    }

    pub fn expand_settings_panel(&self) {
        self.status_bar.expand_settings_panel();
    }

    pub fn collapse_panels(&self) {
        self.status_bar.collapse_panels();
    }
}
