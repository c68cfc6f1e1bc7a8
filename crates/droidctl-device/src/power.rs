//! Display power mode across physical displays.
//!
//! Which displays a power change applies to depends on the OS version and,
//! for some vendors, on known firmware defects. The decision is expressed as
//! a small rule table ([`PowerStrategy::for_platform`]) and made once, when
//! the controller is built.

use std::sync::Arc;

use droidctl_services::{DisplayEnumerationService, PowerService};
use droidctl_types::{sdk, Platform, PowerMode};
use tracing::{debug, error, warn};

use crate::device::DisplayServices;
use crate::error::DeviceError;

/// Which displays a power change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerScope {
    /// Every physical display.
    AllPhysicalDisplays,
    /// Only the single built-in display.
    BuiltInDisplay,
}

/// Which service enumerates physical displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationSource {
    SurfaceControl,
    /// Android 14 moved the enumeration out of surface control on some builds.
    DisplayControl,
}

/// One row of the power policy table.
struct PowerRule {
    min_sdk: u32,
    brand: Option<&'static str>,
    needs_built_in_lookup: bool,
    scope: PowerScope,
}

impl PowerRule {
    fn matches(&self, platform: &Platform) -> bool {
        platform.at_least(self.min_sdk)
            && self.brand.map_or(true, |brand| platform.is_brand(brand))
            && (!self.needs_built_in_lookup || platform.surface.built_in_display_lookup)
    }
}

/// First matching rule wins; no match means [`PowerScope::BuiltInDisplay`].
const POWER_RULES: &[PowerRule] = &[
    // Honor on Android 14 corrupts display state when every physical
    // display is toggled.
    PowerRule {
        min_sdk: sdk::UPSIDE_DOWN_CAKE,
        brand: Some("honor"),
        needs_built_in_lookup: true,
        scope: PowerScope::BuiltInDisplay,
    },
    PowerRule {
        min_sdk: sdk::Q,
        brand: None,
        needs_built_in_lookup: false,
        scope: PowerScope::AllPhysicalDisplays,
    },
];

/// The resolved power-mode procedure for a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerStrategy {
    AllPhysicalDisplays(EnumerationSource),
    BuiltInDisplay,
}

impl PowerStrategy {
    pub fn for_platform(platform: &Platform) -> Self {
        let scope = POWER_RULES
            .iter()
            .find(|rule| rule.matches(platform))
            .map_or(PowerScope::BuiltInDisplay, |rule| rule.scope);

        match scope {
            PowerScope::BuiltInDisplay => Self::BuiltInDisplay,
            PowerScope::AllPhysicalDisplays => {
                let source = if platform.at_least(sdk::UPSIDE_DOWN_CAKE)
                    && !platform.surface.physical_display_ids
                {
                    EnumerationSource::DisplayControl
                } else {
                    EnumerationSource::SurfaceControl
                };
                Self::AllPhysicalDisplays(source)
            }
        }
    }
}

enum Target {
    AllPhysical(Arc<dyn DisplayEnumerationService>),
    BuiltIn,
}

/// Applies a power mode to the displays selected by the platform policy.
pub struct PowerModeController {
    strategy: PowerStrategy,
    target: Target,
    power: Arc<dyn PowerService>,
}

impl PowerModeController {
    /// Build a controller, picking the enumeration service for this platform.
    ///
    /// Fails if the platform needs the display-control service and none was
    /// provided.
    pub fn new(
        platform: &Platform,
        power: Arc<dyn PowerService>,
        displays: &DisplayServices,
    ) -> Result<Self, DeviceError> {
        let strategy = PowerStrategy::for_platform(platform);
        let target = match strategy {
            PowerStrategy::BuiltInDisplay => Target::BuiltIn,
            PowerStrategy::AllPhysicalDisplays(EnumerationSource::SurfaceControl) => {
                Target::AllPhysical(Arc::clone(&displays.surface_control))
            }
            PowerStrategy::AllPhysicalDisplays(EnumerationSource::DisplayControl) => {
                let display_control = displays
                    .display_control
                    .as_ref()
                    .ok_or(DeviceError::MissingService("display control"))?;
                Target::AllPhysical(Arc::clone(display_control))
            }
        };
        debug!(?strategy, "power mode strategy selected");
        Ok(Self {
            strategy,
            target,
            power,
        })
    }

    pub fn strategy(&self) -> PowerStrategy {
        self.strategy
    }

    /// Set the power mode of the targeted displays.
    ///
    /// With several physical displays every one is attempted; the result is
    /// `false` if any of them failed.
    pub fn set_power_mode(&self, mode: PowerMode) -> bool {
        match &self.target {
            Target::AllPhysical(enumerator) => self.set_all_physical(enumerator.as_ref(), mode),
            Target::BuiltIn => self.set_built_in(mode),
        }
    }

    fn set_all_physical(
        &self,
        enumerator: &dyn DisplayEnumerationService,
        mode: PowerMode,
    ) -> bool {
        let Some(ids) = enumerator.physical_display_ids() else {
            error!("could not get physical display ids");
            return false;
        };

        let mut all_ok = true;
        for id in ids {
            let Some(token) = enumerator.display_token(id) else {
                error!(display = %id, "could not get physical display token");
                all_ok = false;
                continue;
            };
            if !self.power.set_display_power_mode(token, mode) {
                warn!(display = %id, %mode, "could not set display power mode");
                all_ok = false;
            }
        }
        all_ok
    }

    fn set_built_in(&self, mode: PowerMode) -> bool {
        let Some(token) = self.power.built_in_display_token() else {
            error!("could not get built-in display");
            return false;
        };
        self.power.set_display_power_mode(token, mode)
    }
}
