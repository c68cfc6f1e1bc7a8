//! Synthetic input event types.
//!
//! These mirror the shape of the events the OS input subsystem accepts:
//! key events carrying a keycode and meta state, and single-pointer motion
//! events in physical display coordinates.

use serde::{Deserialize, Serialize};

use crate::display::DisplayId;
use crate::geometry::PhysicalPoint;

/// Android keycodes used by the device facade.
pub mod keycode {
    pub const KEYCODE_HOME: i32 = 3;
    pub const KEYCODE_BACK: i32 = 4;
    pub const KEYCODE_VOLUME_UP: i32 = 24;
    pub const KEYCODE_VOLUME_DOWN: i32 = 25;
    pub const KEYCODE_POWER: i32 = 26;
    pub const KEYCODE_MENU: i32 = 82;
    pub const KEYCODE_APP_SWITCH: i32 = 187;
}

/// Device id of the built-in virtual keyboard.
pub const VIRTUAL_KEYBOARD: i32 = -1;

/// Input source for keyboard events.
pub const SOURCE_KEYBOARD: u32 = 0x0000_0101;

/// Input source for touchscreen events.
pub const SOURCE_TOUCHSCREEN: u32 = 0x0000_1002;

/// How long an injection call blocks before returning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionMode {
    /// Return as soon as the event is queued.
    #[default]
    Async,
    /// Wait until the event has been delivered to its target.
    WaitForResult,
    /// Wait until the target has finished handling the event.
    WaitForFinish,
}

impl InjectionMode {
    /// Raw mode value understood by the input service.
    #[must_use]
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Async => 0,
            Self::WaitForResult => 1,
            Self::WaitForFinish => 2,
        }
    }
}

impl std::fmt::Display for InjectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Async => write!(f, "async"),
            Self::WaitForResult => write!(f, "wait_for_result"),
            Self::WaitForFinish => write!(f, "wait_for_finish"),
        }
    }
}

/// Key press direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    Down,
    Up,
}

impl KeyAction {
    #[must_use]
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Down => 0,
            Self::Up => 1,
        }
    }
}

/// A synthetic key event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Uptime (ms) at which the key went down.
    pub down_time_ms: u64,
    /// Uptime (ms) at which this event was generated.
    pub event_time_ms: u64,
    pub action: KeyAction,
    pub keycode: i32,
    pub repeat: u32,
    pub meta_state: u32,
    /// Originating input device; [`VIRTUAL_KEYBOARD`] for synthetic events.
    pub device_id: i32,
    pub scan_code: u32,
    pub flags: u32,
    pub source: u32,
    /// Target display, once tagged by the input service.
    pub display_id: Option<DisplayId>,
}

impl KeyEvent {
    /// Build a virtual-keyboard event stamped at `now_ms`.
    #[must_use]
    pub fn virtual_keyboard(
        now_ms: u64,
        action: KeyAction,
        keycode: i32,
        repeat: u32,
        meta_state: u32,
    ) -> Self {
        Self {
            down_time_ms: now_ms,
            event_time_ms: now_ms,
            action,
            keycode,
            repeat,
            meta_state,
            device_id: VIRTUAL_KEYBOARD,
            scan_code: 0,
            flags: 0,
            source: SOURCE_KEYBOARD,
            display_id: None,
        }
    }
}

/// Pointer action for a motion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionAction {
    Down,
    Up,
    Move,
    Cancel,
}

impl MotionAction {
    #[must_use]
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Down => 0,
            Self::Up => 1,
            Self::Move => 2,
            Self::Cancel => 3,
        }
    }
}

/// A single-pointer motion event in physical display coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    pub down_time_ms: u64,
    pub event_time_ms: u64,
    pub action: MotionAction,
    pub pointer_id: u64,
    pub position: PhysicalPoint,
    /// Normalised pressure (0.0..=1.0).
    pub pressure: f32,
    pub buttons: u32,
    pub source: u32,
    pub display_id: Option<DisplayId>,
}

/// Any event that can be submitted to the input service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Key(KeyEvent),
    Motion(MotionEvent),
}

impl InputEvent {
    /// Display this event has been tagged with, if any.
    #[must_use]
    pub fn display_id(&self) -> Option<DisplayId> {
        match self {
            Self::Key(e) => e.display_id,
            Self::Motion(e) => e.display_id,
        }
    }

    /// Tag the event with a target display.
    pub fn set_display_id(&mut self, display: DisplayId) {
        match self {
            Self::Key(e) => e.display_id = Some(display),
            Self::Motion(e) => e.display_id = Some(display),
        }
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self::Key(event)
    }
}

impl From<MotionEvent> for InputEvent {
    fn from(event: MotionEvent) -> Self {
        Self::Motion(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_keyboard_event_fields() {
        let event = KeyEvent::virtual_keyboard(1234, KeyAction::Down, keycode::KEYCODE_POWER, 0, 0);
        assert_eq!(event.down_time_ms, 1234);
        assert_eq!(event.event_time_ms, 1234);
        assert_eq!(event.device_id, VIRTUAL_KEYBOARD);
        assert_eq!(event.source, SOURCE_KEYBOARD);
        assert_eq!(event.display_id, None);
    }

    #[test]
    fn set_display_id_tags_event() {
        let mut event: InputEvent =
            KeyEvent::virtual_keyboard(0, KeyAction::Up, keycode::KEYCODE_HOME, 0, 0).into();
        event.set_display_id(DisplayId(3));
        assert_eq!(event.display_id(), Some(DisplayId(3)));
    }

    #[test]
    fn injection_mode_parses_snake_case() {
        let mode: InjectionMode = serde_json::from_str("\"wait_for_finish\"").unwrap();
        assert_eq!(mode, InjectionMode::WaitForFinish);
        assert_eq!(mode.as_raw(), 2);
        assert_eq!(InjectionMode::default(), InjectionMode::Async);
    }
}
