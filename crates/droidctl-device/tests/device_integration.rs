//! Integration tests exercising the device facade over mock services.

use std::sync::Arc;

use droidctl_device::{
    Device, DisplayServices, EnumerationSource, PowerStrategy, ScalingMapper, Services,
};
use droidctl_services::mock::{
    ManualClock, MockClipboard, MockDisplays, MockInput, MockInputHandle, MockPower,
    MockScreenState, MockStatusBar, MockWindow, StatusBarCall, WindowCall,
};
use droidctl_services::DisplayEnumerationService;
use droidctl_types::keycode::KEYCODE_POWER;
use droidctl_types::{
    DisplayId, InjectionMode, InputEvent, KeyAction, LogicalPosition, MotionAction,
    PhysicalDisplayId, PhysicalPoint, Platform, Point, PowerMode, Rotation, Size,
    SurfaceCapabilities,
};
use tracing_subscriber::EnvFilter;

/// Mock observers for one device.
#[allow(dead_code)]
struct Fixture {
    device: Device,
    input: MockInputHandle,
    power: MockPower,
    surface_control: MockDisplays,
    display_control: MockDisplays,
    window: MockWindow,
    clipboard: MockClipboard,
    screen_state: MockScreenState,
    status_bar: MockStatusBar,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fixture(platform: Platform, physical_displays: &[u64]) -> Fixture {
    init_tracing();

    let input = MockInput::new();
    let input_handle = input.handle();
    let power = MockPower::new();
    let surface_control = MockDisplays::new(physical_displays);
    let display_control = MockDisplays::new(physical_displays);
    let window = MockWindow::new();
    window.set_display(DisplayId(1), Rotation::ROTATION_90, true);
    let clipboard = MockClipboard::new();
    let screen_state = MockScreenState::new(true);
    let status_bar = MockStatusBar::new();

    let services = Services {
        input: Arc::new(input),
        power: Arc::new(power.clone()),
        displays: DisplayServices {
            surface_control: Arc::new(surface_control.clone()),
            display_control: Some(
                Arc::new(display_control.clone()) as Arc<dyn DisplayEnumerationService>
            ),
        },
        window: Arc::new(window.clone()),
        clipboard: Some(Arc::new(clipboard.clone())),
        screen_state: Arc::new(screen_state.clone()),
        status_bar: Arc::new(status_bar.clone()),
        clock: Arc::new(ManualClock::new(1_000)),
    };

    Fixture {
        device: Device::new(platform, services).unwrap(),
        input: input_handle,
        power,
        surface_control,
        display_control,
        window,
        clipboard,
        screen_state,
        status_bar,
    }
}

fn android_14() -> Platform {
    Platform::new(34, "google", "Pixel 8")
}

fn position(x: i32, y: i32) -> LogicalPosition {
    LogicalPosition::new(Point::new(x, y), Size::new(540, 1200))
}

#[test]
fn physical_point_unavailable_until_mapper_installed() {
    let f = fixture(android_14(), &[1]);
    assert_eq!(f.device.physical_point(&position(10, 10)), None);

    f.device.set_position_mapper(Arc::new(ScalingMapper::new(
        Size::new(540, 1200),
        Size::new(1080, 2400),
    )));
    assert_eq!(
        f.device.physical_point(&position(10, 10)),
        Some(PhysicalPoint::new(20, 20))
    );

    f.device.clear_position_mapper();
    assert_eq!(f.device.physical_point(&position(10, 10)), None);
}

#[test]
fn touch_without_mapper_is_not_injected() {
    let f = fixture(android_14(), &[1]);
    assert!(!f.device.inject_touch(
        MotionAction::Down,
        0,
        &position(10, 10),
        1.0,
        DisplayId::DEFAULT,
        InjectionMode::Async,
    ));
    assert_eq!(f.input.attempts(), 0);
}

#[test]
fn touch_is_injected_at_physical_point() {
    let f = fixture(android_14(), &[1]);
    f.device.set_position_mapper(Arc::new(ScalingMapper::new(
        Size::new(540, 1200),
        Size::new(1080, 2400),
    )));
    assert!(f.device.inject_touch(
        MotionAction::Down,
        0,
        &position(100, 300),
        1.0,
        DisplayId::DEFAULT,
        InjectionMode::Async,
    ));

    let events = f.input.injected_events();
    let InputEvent::Motion(event) = &events[0].event else {
        panic!("expected a motion event");
    };
    assert_eq!(event.position, PhysicalPoint::new(200, 600));
}

#[test]
fn press_release_short_circuits_on_failed_press() {
    let f = fixture(android_14(), &[1]);
    f.input.reject_injections();
    assert!(!f
        .device
        .press_release_keycode(KEYCODE_POWER, DisplayId::DEFAULT, InjectionMode::Async));
    assert_eq!(f.input.attempts(), 1);
}

#[test]
fn press_release_injects_down_then_up() {
    let f = fixture(android_14(), &[1]);
    assert!(f
        .device
        .press_release_keycode(KEYCODE_POWER, DisplayId::DEFAULT, InjectionMode::Async));
    let actions: Vec<KeyAction> = f
        .input
        .injected_events()
        .iter()
        .map(|e| match &e.event {
            InputEvent::Key(k) => k.action,
            InputEvent::Motion(_) => panic!("expected key events"),
        })
        .collect();
    assert_eq!(actions, vec![KeyAction::Down, KeyAction::Up]);
}

#[test]
fn supports_input_events_by_version() {
    let old = fixture(Platform::new(28, "google", "Pixel 3"), &[1]);
    assert!(old.device.supports_input_events(DisplayId::DEFAULT));
    assert!(!old.device.supports_input_events(DisplayId(1)));

    let new = fixture(Platform::new(29, "google", "Pixel 4"), &[1]);
    assert!(new.device.supports_input_events(DisplayId::DEFAULT));
    assert!(new.device.supports_input_events(DisplayId(1)));
}

#[test]
fn clipboard_set_twice_writes_once() {
    let f = fixture(android_14(), &[1]);
    assert!(f.device.set_clipboard_text("shared"));
    assert!(!f.device.set_clipboard_text("shared"));
    assert_eq!(f.clipboard.writes().len(), 1);
    assert_eq!(f.device.clipboard_text().as_deref(), Some("shared"));
}

#[test]
fn power_mode_attempts_every_display() {
    let f = fixture(android_14(), &[10, 20, 30]);
    assert_eq!(
        f.device.power_strategy(),
        PowerStrategy::AllPhysicalDisplays(EnumerationSource::SurfaceControl)
    );
    f.power
        .fail_display(MockDisplays::token_for(PhysicalDisplayId(20)));

    assert!(!f.device.set_screen_power_mode(PowerMode::Off));
    let attempted: Vec<_> = f.power.calls().into_iter().map(|(token, _)| token).collect();
    assert_eq!(
        attempted,
        [10, 20, 30]
            .map(|id| MockDisplays::token_for(PhysicalDisplayId(id)))
            .to_vec()
    );
}

#[test]
fn power_mode_on_android_14_without_surface_ids_uses_display_control() {
    let platform = android_14().with_surface(SurfaceCapabilities {
        built_in_display_lookup: false,
        physical_display_ids: false,
    });
    let f = fixture(platform, &[1, 2]);
    assert!(f.device.set_screen_power_mode(PowerMode::Normal));
    assert_eq!(f.surface_control.enumerations(), 0);
    assert_eq!(f.display_control.enumerations(), 1);
}

#[test]
fn honor_android_14_powers_only_built_in_display() {
    let platform = Platform::new(34, "Honor", "Magic5").with_surface(SurfaceCapabilities {
        built_in_display_lookup: true,
        physical_display_ids: true,
    });
    let f = fixture(platform, &[1, 2]);
    assert_eq!(f.device.power_strategy(), PowerStrategy::BuiltInDisplay);
    assert!(f.device.set_screen_power_mode(PowerMode::Off));
    assert_eq!(f.power.calls(), vec![(MockPower::built_in_token(), PowerMode::Off)]);
}

#[test]
fn rotate_keeps_auto_rotation_state() {
    let f = fixture(android_14(), &[1]);

    // Default display starts unlocked at 0.
    assert_eq!(
        f.device.rotate_device(DisplayId::DEFAULT).unwrap(),
        Rotation::ROTATION_90
    );
    assert_eq!(f.window.frozen(DisplayId::DEFAULT), Some(false));

    // Display 1 starts locked at 90.
    assert_eq!(f.device.rotate_device(DisplayId(1)).unwrap(), Rotation::ROTATION_0);
    assert_eq!(f.window.frozen(DisplayId(1)), Some(true));

    assert_eq!(
        f.window.calls(),
        vec![
            WindowCall::Freeze(DisplayId::DEFAULT, Rotation::ROTATION_90),
            WindowCall::Thaw(DisplayId::DEFAULT),
            WindowCall::Freeze(DisplayId(1), Rotation::ROTATION_0),
        ]
    );
}

#[test]
fn power_off_screen_skips_when_already_off() {
    let f = fixture(android_14(), &[1]);
    f.screen_state.set_screen_on(false);
    assert!(f.device.power_off_screen(DisplayId::DEFAULT));
    assert_eq!(f.input.attempts(), 0);

    f.screen_state.set_screen_on(true);
    assert!(f.device.power_off_screen(DisplayId::DEFAULT));
    let events = f.input.injected_events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.mode == InjectionMode::Async));
    assert!(events
        .iter()
        .all(|e| matches!(&e.event, InputEvent::Key(k) if k.keycode == KEYCODE_POWER)));
}

#[test]
fn status_bar_panels() {
    let f = fixture(android_14(), &[1]);
    f.device.expand_notification_panel();
    f.device.expand_settings_panel();
    f.device.collapse_panels();
    assert_eq!(
        f.status_bar.calls(),
        vec![
            StatusBarCall::ExpandNotifications,
            StatusBarCall::ExpandSettings,
            StatusBarCall::Collapse,
        ]
    );
}

#[test]
fn device_name_is_model() {
    let f = fixture(android_14(), &[1]);
    assert_eq!(f.device.device_name(), "Pixel 8");
}

#[test]
fn missing_display_control_fails_construction() {
    let platform = android_14().with_surface(SurfaceCapabilities {
        built_in_display_lookup: false,
        physical_display_ids: false,
    });
    let services = Services {
        input: Arc::new(MockInput::new()),
        power: Arc::new(MockPower::new()),
        displays: DisplayServices {
            surface_control: Arc::new(MockDisplays::new(&[1])),
            display_control: None,
        },
        window: Arc::new(MockWindow::new()),
        clipboard: None,
        screen_state: Arc::new(MockScreenState::new(true)),
        status_bar: Arc::new(MockStatusBar::new()),
        clock: Arc::new(ManualClock::new(0)),
    };
    assert!(Device::new(platform, services).is_err());
}

#[test]
fn device_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Device>();
}
