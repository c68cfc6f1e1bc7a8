//! Display power modes.

use serde::{Deserialize, Serialize};

/// Power mode of a physical display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerMode {
    Off,
    Normal,
}

impl PowerMode {
    /// Raw value understood by the surface flinger.
    #[must_use]
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Off => 0,
            Self::Normal => 2,
        }
    }
}

impl std::fmt::Display for PowerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Normal => write!(f, "normal"),
        }
    }
}
