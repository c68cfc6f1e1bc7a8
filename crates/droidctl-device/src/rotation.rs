//! Screen orientation toggling.

use std::sync::Arc;

use droidctl_services::WindowService;
use droidctl_types::{DisplayId, Rotation};
use tracing::info;

use crate::error::DeviceError;

/// Flips display orientation without changing the auto-rotation setting.
pub struct RotationController {
    window: Arc<dyn WindowService>,
}

impl RotationController {
    pub fn new(window: Arc<dyn WindowService>) -> Self {
        Self { window }
    }

    /// Toggle between portrait and landscape on `display`.
    ///
    /// Freezing sets the new rotation; if auto-rotation was enabled before,
    /// it is re-enabled afterwards. Returns the rotation that was applied.
    pub fn rotate_device(&self, display: DisplayId) -> Result<Rotation, DeviceError> {
        let auto_rotation = !self.window.is_rotation_frozen(display)?;

        let current = self.window.rotation(display)?;
        let rotation = current.toggled();
        let display_id = display;
        info!(
            display = %display_id,
            orientation = rotation.orientation_name(),
            "device rotation requested"
        );
        self.window.freeze_rotation(display, rotation)?;

        if auto_rotation {
            self.window.thaw_rotation(display)?;
        }
        Ok(rotation)
    }
}
