//! Shared types for droidctl.
//!
//! This crate contains the value types shared across the droidctl workspace:
//! display identifiers and tokens, capture/physical geometry, synthetic
//! input events, power and rotation state, and platform identity.

pub mod display;
pub mod event;
pub mod geometry;
pub mod platform;
pub mod power;

pub use display::{DisplayId, DisplayToken, PhysicalDisplayId, Rotation};
pub use event::{
    keycode, InjectionMode, InputEvent, KeyAction, KeyEvent, MotionAction, MotionEvent,
};
pub use geometry::{LogicalPosition, PhysicalPoint, Point, Size};
pub use platform::{sdk, Platform, SurfaceCapabilities};
pub use power::PowerMode;
