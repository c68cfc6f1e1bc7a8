//! Device-control facade for droidctl.
//!
//! Issues privileged operations against a running OS instance: maps client
//! positions to physical display space, injects synthetic input, toggles
//! display power across physical displays, flips screen orientation while
//! keeping the auto-rotation setting, and mediates the shared clipboard.
//!
//! All operations are synchronous. The only shared mutable state is the
//! installed [`PositionMapper`], which may be swapped from one thread while
//! others resolve positions.

pub mod clipboard;
pub mod config;
pub mod device;
pub mod error;
pub mod injector;
pub mod position;
pub mod power;
pub mod rotation;
pub mod setup;

pub use clipboard::ClipboardMediator;
pub use config::Config;
pub use device::{Device, DisplayServices, Services};
pub use error::DeviceError;
pub use injector::InputInjector;
pub use position::{CoordinateResolver, PositionMapper, ScalingMapper};
pub use power::{EnumerationSource, PowerModeController, PowerScope, PowerStrategy};
pub use rotation::RotationController;
