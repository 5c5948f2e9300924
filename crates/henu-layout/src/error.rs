#![forbid(unsafe_code)]

//! Layout engine errors.
//!
//! Everything here is a programming error on the caller's side (bad sizes,
//! non-finite pointer coordinates, invalid configuration). Preset and
//! collapse operations are total and never produce these.

use std::fmt;

use crate::bounds::BoundsError;
use crate::config::ConfigValidationError;

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    Bounds(BoundsError),
    InvalidPointer { x: f64, y: f64 },
    InvalidViewport { width: f64, height: f64 },
    Config(ConfigValidationError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounds(error) => write!(f, "invalid size: {error}"),
            Self::InvalidPointer { x, y } => {
                write!(f, "pointer coordinates must be finite (got {x}, {y})")
            }
            Self::InvalidViewport { width, height } => write!(
                f,
                "viewport size must be finite and >= 0 (got {width}x{height})"
            ),
            Self::Config(error) => write!(f, "invalid layout config: {error}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bounds(error) => Some(error),
            Self::Config(error) => Some(error),
            Self::InvalidPointer { .. } | Self::InvalidViewport { .. } => None,
        }
    }
}

impl From<BoundsError> for LayoutError {
    fn from(error: BoundsError) -> Self {
        Self::Bounds(error)
    }
}

impl From<ConfigValidationError> for LayoutError {
    fn from(error: ConfigValidationError) -> Self {
        Self::Config(error)
    }
}
