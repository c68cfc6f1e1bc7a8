//! Platform identity: OS version, vendor and detected service capabilities.

use serde::{Deserialize, Serialize};

/// Android SDK levels the device facade branches on.
pub mod sdk {
    /// Android 10.
    pub const Q: u32 = 29;
    /// Android 14.
    pub const UPSIDE_DOWN_CAKE: u32 = 34;
}

/// Which lookups the surface-control service exposes on this build.
///
/// Detected once at startup by the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceCapabilities {
    /// The legacy single built-in display lookup is present.
    pub built_in_display_lookup: bool,
    /// Physical display ids can be enumerated through surface control.
    pub physical_display_ids: bool,
}

impl Default for SurfaceCapabilities {
    fn default() -> Self {
        Self {
            built_in_display_lookup: false,
            physical_display_ids: true,
        }
    }
}

/// Identity of the running OS instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub sdk_version: u32,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub surface: SurfaceCapabilities,
}

impl Platform {
    #[must_use]
    pub fn new(sdk_version: u32, brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            sdk_version,
            brand: brand.into(),
            model: model.into(),
            surface: SurfaceCapabilities::default(),
        }
    }

    #[must_use]
    pub fn with_surface(mut self, surface: SurfaceCapabilities) -> Self {
        self.surface = surface;
        self
    }

    /// Whether the OS is at least the given SDK level.
    #[must_use]
    pub fn at_least(&self, sdk_version: u32) -> bool {
        self.sdk_version >= sdk_version
    }

    /// Case-insensitive vendor brand comparison.
    #[must_use]
    pub fn is_brand(&self, brand: &str) -> bool {
        self.brand.eq_ignore_ascii_case(brand)
    }
}
