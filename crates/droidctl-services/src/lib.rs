//! Capability interfaces to the OS services droidctl drives.
//!
//! The device core never talks to the OS directly. It holds these traits,
//! which a service-resolution layer implements over the real system
//! services, and which the [`mock`] module (feature `mock`) implements in
//! memory for tests and simulation.

use droidctl_types::{
    DisplayId, DisplayToken, InjectionMode, InputEvent, PhysicalDisplayId, PowerMode, Rotation,
};

pub mod clock;
pub mod error;

#[cfg(feature = "mock")]
pub mod mock;

pub use clock::{Clock, MonotonicClock};
pub use error::ServiceError;

/// Submits synthetic input events to the OS input subsystem.
pub trait InputService: Send + Sync {
    /// Submit an event. Returns `false` if the input service refused it.
    fn inject_event(&self, event: &InputEvent, mode: InjectionMode) -> bool;

    /// Tag an event with a target display. Returns `false` if the event
    /// cannot carry a display id on this platform.
    fn tag_display(&self, event: &mut InputEvent, display: DisplayId) -> bool;
}

/// Enumerates physical displays and resolves their tokens.
///
/// Two interchangeable implementations exist on real devices (surface
/// control and display control); which one is used is decided once at
/// startup.
pub trait DisplayEnumerationService: Send + Sync {
    /// All physical display ids, or `None` if enumeration failed.
    fn physical_display_ids(&self) -> Option<Vec<PhysicalDisplayId>>;

    /// Resolve the token of a physical display.
    fn display_token(&self, id: PhysicalDisplayId) -> Option<DisplayToken>;
}

/// Mutates display power state.
pub trait PowerService: Send + Sync {
    /// Set the power mode of one physical display.
    fn set_display_power_mode(&self, token: DisplayToken, mode: PowerMode) -> bool;

    /// Token of the single built-in display, on builds that still expose it.
    fn built_in_display_token(&self) -> Option<DisplayToken>;
}

/// Reads and changes display rotation and the auto-rotation lock.
pub trait WindowService: Send + Sync {
    /// Whether auto-rotation is disabled (rotation locked) on a display.
    fn is_rotation_frozen(&self, display: DisplayId) -> Result<bool, ServiceError>;

    /// Set the rotation of a display and lock it there.
    fn freeze_rotation(&self, display: DisplayId, rotation: Rotation) -> Result<(), ServiceError>;

    /// Re-enable sensor-driven auto-rotation on a display.
    fn thaw_rotation(&self, display: DisplayId) -> Result<(), ServiceError>;

    /// Current rotation of a display.
    fn rotation(&self, display: DisplayId) -> Result<Rotation, ServiceError>;
}

/// Shared OS clipboard.
pub trait ClipboardService: Send + Sync {
    /// Current clipboard text, if any.
    fn text(&self) -> Option<String>;

    /// Replace the clipboard text. Returns the OS write result.
    fn set_text(&self, text: &str) -> bool;
}

/// Screen interactive state.
pub trait ScreenStateService: Send + Sync {
    fn is_screen_on(&self) -> bool;
}

/// Status bar panels.
pub trait StatusBarService: Send + Sync {
    fn expand_notifications_panel(&self);

    fn expand_settings_panel(&self);

    fn collapse_panels(&self);
}
