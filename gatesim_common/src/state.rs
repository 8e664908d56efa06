//! Tri-state pin signal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The signal carried by a pin.
///
/// A pin starts out [`PinState::Unknown`] and only becomes [`PinState::Low`] or
/// [`PinState::High`] once something drives it. `Unknown` is never silently read
/// as `false`; see [`crate::UnsetPolicy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PinState {
    /// Never driven.
    #[default]
    Unknown,
    /// Logical `false`.
    Low,
    /// Logical `true`.
    High,
}

impl PinState {
    /// Returns true if the state has been driven to a concrete level.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns the boolean level, or `None` if the pin was never driven.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::Low => Some(false),
            Self::High => Some(true),
        }
    }
}

impl std::ops::Not for PinState {
    type Output = Self;

    /// Logical negation. `Unknown` stays `Unknown`.
    fn not(self) -> Self {
        match self {
            Self::Unknown => Self::Unknown,
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl From<bool> for PinState {
    fn from(level: bool) -> Self {
        if level { Self::High } else { Self::Low }
    }
}

impl From<Option<bool>> for PinState {
    fn from(level: Option<bool>) -> Self {
        level.map_or(Self::Unknown, Self::from)
    }
}

impl From<PinState> for Option<bool> {
    fn from(state: PinState) -> Self {
        state.as_bool()
    }
}

impl fmt::Display for PinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Unknown => 'X',
            Self::Low => '0',
            Self::High => '1',
        };
        write!(f, "{c}")
    }
}
