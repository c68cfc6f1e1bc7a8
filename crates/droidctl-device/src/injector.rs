//! Synthetic input injection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use droidctl_services::{Clock, InputService};
use droidctl_types::event::SOURCE_TOUCHSCREEN;
use droidctl_types::{
    sdk, DisplayId, InjectionMode, InputEvent, KeyAction, KeyEvent, MotionAction, MotionEvent,
    PhysicalPoint, Platform,
};
use tracing::{debug, warn};

/// Builds synthetic events and submits them to the input service.
pub struct InputInjector {
    input: Arc<dyn InputService>,
    clock: Arc<dyn Clock>,
    /// Events can target displays other than the default one.
    secondary_displays: bool,
    last_touch_down_ms: AtomicU64,
}

impl InputInjector {
    pub fn new(platform: &Platform, input: Arc<dyn InputService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            input,
            clock,
            secondary_displays: platform.at_least(sdk::Q),
            last_touch_down_ms: AtomicU64::new(0),
        }
    }

    /// Whether events can be injected into `display` on this platform.
    pub fn supports_injection(&self, display: DisplayId) -> bool {
        display.is_default() || self.secondary_displays
    }

    /// Submit an event to `display`.
    ///
    /// Returns `false` if the event could not be tagged with the display or
    /// the input service refused it.
    ///
    /// # Panics
    ///
    /// Panics if `display` does not support injection. Callers must check
    /// [`supports_injection`](Self::supports_injection) first.
    pub fn inject_event(
        &self,
        event: impl Into<InputEvent>,
        display: DisplayId,
        mode: InjectionMode,
    ) -> bool {
        assert!(
            self.supports_injection(display),
            "cannot inject input events into display {display} on this platform"
        );

        let display_id = display;
        let mut event = event.into();
        if !display.is_default() && !self.input.tag_display(&mut event, display) {
            warn!(display = %display_id, "could not tag input event with display");
            return false;
        }

        let injected = self.input.inject_event(&event, mode);
        if injected {
            debug!(?event, display = %display_id, %mode, "injected event");
        } else {
            warn!(display = %display_id, %mode, "input event rejected");
        }
        injected
    }

    /// Inject a key event stamped at the current uptime.
    pub fn inject_key_event(
        &self,
        action: KeyAction,
        keycode: i32,
        repeat: u32,
        meta_state: u32,
        display: DisplayId,
        mode: InjectionMode,
    ) -> bool {
        let now = self.clock.uptime_millis();
        let event = KeyEvent::virtual_keyboard(now, action, keycode, repeat, meta_state);
        self.inject_event(event, display, mode)
    }

    /// Press then release a key.
    ///
    /// The release is not attempted if the press fails.
    pub fn press_and_release(&self, keycode: i32, display: DisplayId, mode: InjectionMode) -> bool {
        self.inject_key_event(KeyAction::Down, keycode, 0, 0, display, mode)
            && self.inject_key_event(KeyAction::Up, keycode, 0, 0, display, mode)
    }

    /// Inject a single-pointer touch event at a physical point.
    ///
    /// The down time of every event in a gesture is the time of its
    /// `Down` event.
    pub fn inject_touch(
        &self,
        action: MotionAction,
        pointer_id: u64,
        position: PhysicalPoint,
        pressure: f32,
        display: DisplayId,
        mode: InjectionMode,
    ) -> bool {
        let now = self.clock.uptime_millis();
        if action == MotionAction::Down {
            self.last_touch_down_ms.store(now, Ordering::SeqCst);
        }
        let event = MotionEvent {
            down_time_ms: self.last_touch_down_ms.load(Ordering::SeqCst),
            event_time_ms: now,
            action,
            pointer_id,
            position,
            pressure: pressure.clamp(0.0, 1.0),
            buttons: 0,
            source: SOURCE_TOUCHSCREEN,
            display_id: None,
        };
        self.inject_event(event, display, mode)
    }
}
