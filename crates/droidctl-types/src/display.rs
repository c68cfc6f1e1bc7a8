//! Display identifiers, tokens and rotation.

use serde::{Deserialize, Serialize};

/// Logical display identifier.
///
/// `0` is the default (primary) display; any other value is a secondary
/// physical or virtual display.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DisplayId(pub u32);

impl DisplayId {
    /// The default display.
    pub const DEFAULT: Self = Self(0);

    /// Whether this is the default display.
    #[must_use]
    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl std::fmt::Display for DisplayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of a physical display output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhysicalDisplayId(pub u64);

impl std::fmt::Display for PhysicalDisplayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle referencing a physical display.
///
/// Only obtained from a display enumeration service; required to change the
/// power state of that display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayToken(u64);

impl DisplayToken {
    /// Wrap a raw handle value produced by a service backend.
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle value.
    #[must_use]
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

/// Display rotation in quarter turns (0..=3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rotation(u8);

impl Rotation {
    pub const ROTATION_0: Self = Self(0);
    pub const ROTATION_90: Self = Self(1);
    pub const ROTATION_180: Self = Self(2);
    pub const ROTATION_270: Self = Self(3);

    /// Build a rotation from a raw quarter-turn value, if in range.
    #[must_use]
    pub fn new(quarter_turns: u8) -> Option<Self> {
        (quarter_turns <= 3).then_some(Self(quarter_turns))
    }

    /// Raw quarter-turn value.
    #[must_use]
    pub fn quarter_turns(self) -> u8 {
        self.0
    }

    /// Whether this rotation is landscape-equivalent (1 or 3).
    #[must_use]
    pub fn is_landscape(self) -> bool {
        self.0 & 1 == 1
    }

    /// Flip between the two canonical orientations.
    ///
    /// 0 and 2 become 1, 1 and 3 become 0. The result is always 0 or 1.
    #[must_use]
    pub fn toggled(self) -> Self {
        Self((self.0 & 1) ^ 1)
    }

    /// Human-readable orientation name.
    #[must_use]
    pub fn orientation_name(self) -> &'static str {
        if self.is_landscape() {
            "landscape"
        } else {
            "portrait"
        }
    }
}

impl TryFrom<u8> for Rotation {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("invalid rotation {value}, expected 0..=3"))
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation.0
    }
}
