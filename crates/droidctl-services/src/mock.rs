//! In-memory service fakes for testing and simulation.
//!
//! Every fake keeps its state behind an `Arc<Mutex<_>>`. [`MockInput`]
//! hands out a separate observer handle; the other fakes are `Clone` and a
//! clone acts as the observer.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use droidctl_types::{
    DisplayId, DisplayToken, InjectionMode, InputEvent, PhysicalDisplayId, PowerMode, Rotation,
};

use crate::error::ServiceError;
use crate::{
    Clock, ClipboardService, DisplayEnumerationService, InputService, PowerService,
    ScreenStateService, StatusBarService, WindowService,
};

// ---------------------------------------------------------------------------
// MockInput
// ---------------------------------------------------------------------------

/// Recorded injection for test observation.
#[derive(Debug, Clone)]
pub struct InjectedEvent {
    pub event: InputEvent,
    pub mode: InjectionMode,
}

#[derive(Debug, Default)]
struct MockInputState {
    injected: Vec<InjectedEvent>,
    attempts: usize,
    /// Accept only the first N injection attempts.
    accept_limit: Option<usize>,
    reject_tagging: bool,
    tag_attempts: usize,
}

/// Mock input service.
pub struct MockInput {
    state: Arc<Mutex<MockInputState>>,
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl MockInput {
    /// Create a mock input service that accepts everything.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockInputState::default())),
        }
    }

    /// Get a clonable handle for observing and scripting the service.
    pub fn handle(&self) -> MockInputHandle {
        MockInputHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable observer handle for `MockInput`.
#[derive(Clone)]
pub struct MockInputHandle {
    state: Arc<Mutex<MockInputState>>,
}

impl MockInputHandle {
    /// Snapshot of all accepted events.
    pub fn injected_events(&self) -> Vec<InjectedEvent> {
        self.state.lock().unwrap().injected.clone()
    }

    /// Number of `inject_event` calls, accepted or not.
    pub fn attempts(&self) -> usize {
        self.state.lock().unwrap().attempts
    }

    /// Number of `tag_display` calls.
    pub fn tag_attempts(&self) -> usize {
        self.state.lock().unwrap().tag_attempts
    }

    /// Accept the next `n` injections, reject every one after that.
    pub fn reject_injections_after(&self, n: usize) {
        let mut state = self.state.lock().unwrap();
        state.accept_limit = Some(state.attempts + n);
    }

    /// Reject every injection from now on.
    pub fn reject_injections(&self) {
        self.reject_injections_after(0);
    }

    /// Make `tag_display` fail.
    pub fn reject_display_tagging(&self, reject: bool) {
        self.state.lock().unwrap().reject_tagging = reject;
    }
}

impl InputService for MockInput {
    fn inject_event(&self, event: &InputEvent, mode: InjectionMode) -> bool {
        let mut state = self.state.lock().unwrap();
        state.attempts += 1;
        if state.accept_limit.is_some_and(|limit| state.attempts > limit) {
            return false;
        }
        state.injected.push(InjectedEvent {
            event: event.clone(),
            mode,
        });
        true
    }

    fn tag_display(&self, event: &mut InputEvent, display: DisplayId) -> bool {
        let mut state = self.state.lock().unwrap();
        state.tag_attempts += 1;
        if state.reject_tagging {
            return false;
        }
        event.set_display_id(display);
        true
    }
}

// ---------------------------------------------------------------------------
// MockDisplays
// ---------------------------------------------------------------------------

const TOKEN_BASE: u64 = 0x1000;
const BUILT_IN_TOKEN: u64 = 0x0B17;

#[derive(Debug, Default)]
struct MockDisplaysState {
    ids: Option<Vec<PhysicalDisplayId>>,
    unresolvable: HashSet<PhysicalDisplayId>,
    enumerations: usize,
    lookups: Vec<PhysicalDisplayId>,
}

/// Mock display enumeration service.
#[derive(Clone, Default)]
pub struct MockDisplays {
    state: Arc<Mutex<MockDisplaysState>>,
}

impl MockDisplays {
    /// A service exposing the given physical display ids.
    pub fn new(ids: &[u64]) -> Self {
        let displays = Self::default();
        displays.state.lock().unwrap().ids =
            Some(ids.iter().copied().map(PhysicalDisplayId).collect());
        displays
    }

    /// A service whose enumeration fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Token this mock hands out for a physical display.
    pub fn token_for(id: PhysicalDisplayId) -> DisplayToken {
        DisplayToken::from_raw(TOKEN_BASE.wrapping_add(id.0))
    }

    /// Make token resolution fail for one display.
    pub fn make_unresolvable(&self, id: PhysicalDisplayId) {
        self.state.lock().unwrap().unresolvable.insert(id);
    }

    /// Number of enumeration calls.
    pub fn enumerations(&self) -> usize {
        self.state.lock().unwrap().enumerations
    }

    /// Every id passed to `display_token`, in order.
    pub fn token_lookups(&self) -> Vec<PhysicalDisplayId> {
        self.state.lock().unwrap().lookups.clone()
    }
}

impl DisplayEnumerationService for MockDisplays {
    fn physical_display_ids(&self) -> Option<Vec<PhysicalDisplayId>> {
        let mut state = self.state.lock().unwrap();
        state.enumerations += 1;
        state.ids.clone()
    }

    fn display_token(&self, id: PhysicalDisplayId) -> Option<DisplayToken> {
        let mut state = self.state.lock().unwrap();
        state.lookups.push(id);
        if state.unresolvable.contains(&id) {
            None
        } else {
            Some(Self::token_for(id))
        }
    }
}

// ---------------------------------------------------------------------------
// MockPower
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct MockPowerState {
    built_in: Option<DisplayToken>,
    failing: HashSet<DisplayToken>,
    calls: Vec<(DisplayToken, PowerMode)>,
    modes: HashMap<DisplayToken, PowerMode>,
}

/// Mock power service. Every attempt is recorded, including failed ones.
#[derive(Clone)]
pub struct MockPower {
    state: Arc<Mutex<MockPowerState>>,
}

impl Default for MockPower {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPower {
    /// A power service with a resolvable built-in display.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockPowerState {
                built_in: Some(Self::built_in_token()),
                failing: HashSet::new(),
                calls: Vec::new(),
                modes: HashMap::new(),
            })),
        }
    }

    /// Token returned for the built-in display.
    pub fn built_in_token() -> DisplayToken {
        DisplayToken::from_raw(BUILT_IN_TOKEN)
    }

    /// Make the built-in display lookup fail.
    pub fn without_built_in_display(self) -> Self {
        self.state.lock().unwrap().built_in = None;
        self
    }

    /// Make power mode changes fail for one display.
    pub fn fail_display(&self, token: DisplayToken) {
        self.state.lock().unwrap().failing.insert(token);
    }

    /// Every `set_display_power_mode` call, in order.
    pub fn calls(&self) -> Vec<(DisplayToken, PowerMode)> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Last mode successfully applied to a display.
    pub fn mode_of(&self, token: DisplayToken) -> Option<PowerMode> {
        self.state.lock().unwrap().modes.get(&token).copied()
    }
}

impl PowerService for MockPower {
    fn set_display_power_mode(&self, token: DisplayToken, mode: PowerMode) -> bool {
        let mut state = self.state.lock().unwrap();
        state.calls.push((token, mode));
        if state.failing.contains(&token) {
            return false;
        }
        state.modes.insert(token, mode);
        true
    }

    fn built_in_display_token(&self) -> Option<DisplayToken> {
        self.state.lock().unwrap().built_in
    }
}

// ---------------------------------------------------------------------------
// MockWindow
// ---------------------------------------------------------------------------

/// Recorded rotation mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCall {
    Freeze(DisplayId, Rotation),
    Thaw(DisplayId),
}

#[derive(Debug, Clone, Copy)]
struct RotationState {
    rotation: Rotation,
    frozen: bool,
}

#[derive(Debug, Default)]
struct MockWindowState {
    displays: HashMap<DisplayId, RotationState>,
    calls: Vec<WindowCall>,
    failure: Option<String>,
}

/// Mock window service.
#[derive(Clone, Default)]
pub struct MockWindow {
    state: Arc<Mutex<MockWindowState>>,
}

impl MockWindow {
    /// A window service with the default display at rotation 0, unlocked.
    pub fn new() -> Self {
        let window = Self::default();
        window.set_display(DisplayId::DEFAULT, Rotation::ROTATION_0, false);
        window
    }

    /// Add or reset a display.
    pub fn set_display(&self, display: DisplayId, rotation: Rotation, frozen: bool) {
        self.state
            .lock()
            .unwrap()
            .displays
            .insert(display, RotationState { rotation, frozen });
    }

    /// Make every call fail with a remote error.
    pub fn fail_with(&self, message: &str) {
        self.state.lock().unwrap().failure = Some(message.to_string());
    }

    /// Current lock state of a display.
    pub fn frozen(&self, display: DisplayId) -> Option<bool> {
        self.state
            .lock()
            .unwrap()
            .displays
            .get(&display)
            .map(|d| d.frozen)
    }

    /// Current rotation of a display.
    pub fn current_rotation(&self, display: DisplayId) -> Option<Rotation> {
        self.state
            .lock()
            .unwrap()
            .displays
            .get(&display)
            .map(|d| d.rotation)
    }

    /// Every freeze/thaw call, in order.
    pub fn calls(&self) -> Vec<WindowCall> {
        self.state.lock().unwrap().calls.clone()
    }

    fn with_display<T>(
        &self,
        display: DisplayId,
        f: impl FnOnce(&mut RotationState) -> T,
    ) -> Result<T, ServiceError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.failure {
            return Err(ServiceError::Remote(message.clone()));
        }
        state
            .displays
            .get_mut(&display)
            .map(f)
            .ok_or_else(|| ServiceError::Remote(format!("no such display: {display}")))
    }
}

impl WindowService for MockWindow {
    fn is_rotation_frozen(&self, display: DisplayId) -> Result<bool, ServiceError> {
        self.with_display(display, |d| d.frozen)
    }

    fn freeze_rotation(&self, display: DisplayId, rotation: Rotation) -> Result<(), ServiceError> {
        self.with_display(display, |d| {
            d.rotation = rotation;
            d.frozen = true;
        })?;
        self.state
            .lock()
            .unwrap()
            .calls
            .push(WindowCall::Freeze(display, rotation));
        Ok(())
    }

    fn thaw_rotation(&self, display: DisplayId) -> Result<(), ServiceError> {
        self.with_display(display, |d| d.frozen = false)?;
        self.state
            .lock()
            .unwrap()
            .calls
            .push(WindowCall::Thaw(display));
        Ok(())
    }

    fn rotation(&self, display: DisplayId) -> Result<Rotation, ServiceError> {
        self.with_display(display, |d| d.rotation)
    }
}

// ---------------------------------------------------------------------------
// MockClipboard
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MockClipboardState {
    text: Option<String>,
    writes: Vec<String>,
    reject_writes: bool,
}

/// Mock clipboard service.
#[derive(Clone, Default)]
pub struct MockClipboard {
    state: Arc<Mutex<MockClipboardState>>,
}

impl MockClipboard {
    /// An empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard already holding `text`.
    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::default();
        clipboard.state.lock().unwrap().text = Some(text.to_string());
        clipboard
    }

    /// Make writes fail.
    pub fn reject_writes(&self, reject: bool) {
        self.state.lock().unwrap().reject_writes = reject;
    }

    /// Every write attempt, in order.
    pub fn writes(&self) -> Vec<String> {
        self.state.lock().unwrap().writes.clone()
    }

    /// Current content.
    pub fn content(&self) -> Option<String> {
        self.state.lock().unwrap().text.clone()
    }
}

impl ClipboardService for MockClipboard {
    fn text(&self) -> Option<String> {
        self.state.lock().unwrap().text.clone()
    }

    fn set_text(&self, text: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        state.writes.push(text.to_string());
        if state.reject_writes {
            return false;
        }
        state.text = Some(text.to_string());
        true
    }
}

// ---------------------------------------------------------------------------
// MockScreenState / MockStatusBar / ManualClock
// ---------------------------------------------------------------------------

/// Mock screen state.
#[derive(Clone)]
pub struct MockScreenState {
    on: Arc<AtomicBool>,
}

impl MockScreenState {
    pub fn new(on: bool) -> Self {
        Self {
            on: Arc::new(AtomicBool::new(on)),
        }
    }

    pub fn set_screen_on(&self, on: bool) {
        self.on.store(on, Ordering::SeqCst);
    }
}

impl ScreenStateService for MockScreenState {
    fn is_screen_on(&self) -> bool {
        self.on.load(Ordering::SeqCst)
    }
}

/// Recorded status bar call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBarCall {
    ExpandNotifications,
    ExpandSettings,
    Collapse,
}

/// Mock status bar service.
#[derive(Clone, Default)]
pub struct MockStatusBar {
    calls: Arc<Mutex<Vec<StatusBarCall>>>,
}

impl MockStatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<StatusBarCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl StatusBarService for MockStatusBar {
    fn expand_notifications_panel(&self) {
        self.calls
            .lock()
            .unwrap()
            .push(StatusBarCall::ExpandNotifications);
    }

    fn expand_settings_panel(&self) {
        self.calls.lock().unwrap().push(StatusBarCall::ExpandSettings);
    }

    fn collapse_panels(&self) {
        self.calls.lock().unwrap().push(StatusBarCall::Collapse);
    }
}

/// Clock that only moves when told to.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn uptime_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
