//! Rest-state flags deciding which fade may run next.

use std::fmt;
use std::str::FromStr;

/// Colour a fade-out ends at and a fade-in starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FadeEndpoint {
    #[default]
    Black,
    White,
}

impl FadeEndpoint {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

impl fmt::Display for FadeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FadeEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(Self::Black),
            "white" => Ok(Self::White),
            other => Err(format!("unknown fade endpoint '{}'", other)),
        }
    }
}

/// Whether the palettes rest at an endpoint, and which endpoint is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FadeState {
    faded: bool,
    endpoint: FadeEndpoint,
}

impl FadeState {
    /// True after a fade-out completes, false after a fade-in completes.
    pub fn is_faded(&self) -> bool {
        self.faded
    }

    pub fn endpoint(&self) -> FadeEndpoint {
        self.endpoint
    }

    pub(crate) fn set_faded(&mut self, faded: bool) {
        self.faded = faded;
    }

    pub(crate) fn set_endpoint(&mut self, endpoint: FadeEndpoint) {
        self.endpoint = endpoint;
    }
}
