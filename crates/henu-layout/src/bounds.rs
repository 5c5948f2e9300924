#![forbid(unsafe_code)]

//! Bounds policy: per-region min/max sizes and clamping.
//!
//! # Invariants
//!
//! 1. For valid input, [`BoundsPolicy::clamp`] returns a value in
//!    `[min, max]` of the region, and returns the input unchanged when it is
//!    already in range.
//! 2. Non-finite or negative proposals are rejected, never coerced.
//! 3. Every [`SizeBounds`] satisfies `0 <= min <= max` with finite ends
//!    ([`BoundsPolicy::validate`]).
//!
//! Presets bypass this module on purpose: they may write sizes outside the
//! drag bounds (0 for collapsed regions, 800 for the preview panel).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::region::RegionId;

/// Inclusive size range for one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeBounds {
    pub min: f64,
    pub max: f64,
}

impl SizeBounds {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `size` lies within `[min, max]`.
    #[must_use]
    pub fn contains(self, size: f64) -> bool {
        size >= self.min && size <= self.max
    }

    /// Validate the range for `region`.
    pub fn validate(self, region: RegionId) -> Result<(), BoundsError> {
        let well_formed = self.min.is_finite()
            && self.max.is_finite()
            && self.min >= 0.0
            && self.min <= self.max;
        if !well_formed {
            return Err(BoundsError::InvalidBounds {
                region,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Sidebar width range.
pub const SIDEBAR_BOUNDS: SizeBounds = SizeBounds::new(200.0, 500.0);
/// Terminal height range.
pub const TERMINAL_BOUNDS: SizeBounds = SizeBounds::new(150.0, 500.0);
/// Right panel width range.
pub const RIGHT_PANEL_BOUNDS: SizeBounds = SizeBounds::new(250.0, 500.0);

/// Min/max sizes for every region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsPolicy {
    pub sidebar: SizeBounds,
    pub terminal: SizeBounds,
    pub right_panel: SizeBounds,
}

impl BoundsPolicy {
    pub const DEFAULT: Self = Self {
        sidebar: SIDEBAR_BOUNDS,
        terminal: TERMINAL_BOUNDS,
        right_panel: RIGHT_PANEL_BOUNDS,
    };

    #[must_use]
    pub const fn bounds(&self, region: RegionId) -> SizeBounds {
        match region {
            RegionId::Sidebar => self.sidebar,
            RegionId::Terminal => self.terminal,
            RegionId::RightPanel => self.right_panel,
        }
    }

    /// Clamp a proposed size into the region's range.
    ///
    /// Returns `max(min, min(max, proposed))`.
    pub fn clamp(&self, region: RegionId, proposed: f64) -> Result<f64, BoundsError> {
        let proposed = check_size(Some(region), proposed)?;
        let bounds = self.bounds(region);
        Ok(proposed.min(bounds.max).max(bounds.min))
    }

    pub fn validate(&self) -> Result<(), BoundsError> {
        for region in RegionId::ALL {
            self.bounds(region).validate(region)?;
        }
        Ok(())
    }
}

impl Default for BoundsPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Clamp against the default bounds.
pub fn clamp(region: RegionId, proposed: f64) -> Result<f64, BoundsError> {
    BoundsPolicy::DEFAULT.clamp(region, proposed)
}

/// Reject sizes that are not finite and non-negative.
pub fn check_size(region: Option<RegionId>, value: f64) -> Result<f64, BoundsError> {
    if !value.is_finite() {
        return Err(BoundsError::NonFinite { region, value });
    }
    if value < 0.0 {
        return Err(BoundsError::Negative { region, value });
    }
    Ok(value)
}

/// Invalid input to the bounds policy.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundsError {
    NonFinite {
        region: Option<RegionId>,
        value: f64,
    },
    Negative {
        region: Option<RegionId>,
        value: f64,
    },
    UnknownRegion {
        name: String,
    },
    InvalidBounds {
        region: RegionId,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite {
                region: Some(region),
                value,
            } => write!(f, "size for {region} must be finite (got {value})"),
            Self::NonFinite {
                region: None,
                value,
            } => write!(f, "size must be finite (got {value})"),
            Self::Negative {
                region: Some(region),
                value,
            } => write!(f, "size for {region} must be >= 0 (got {value})"),
            Self::Negative {
                region: None,
                value,
            } => write!(f, "size must be >= 0 (got {value})"),
            Self::UnknownRegion { name } => write!(f, "unknown region {name:?}"),
            Self::InvalidBounds { region, min, max } => write!(
                f,
                "bounds for {region} must satisfy 0 <= min <= max (got min={min}, max={max})"
            ),
        }
    }
}

impl std::error::Error for BoundsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_match_table() {
        assert_eq!(BoundsPolicy::DEFAULT.sidebar, SizeBounds::new(200.0, 500.0));
        assert_eq!(BoundsPolicy::DEFAULT.terminal, SizeBounds::new(150.0, 500.0));
        assert_eq!(
            BoundsPolicy::DEFAULT.right_panel,
            SizeBounds::new(250.0, 500.0)
        );
    }

    #[test]
    fn clamp_in_range_is_identity() {
        assert_eq!(clamp(RegionId::Sidebar, 360.0).unwrap(), 360.0);
        assert_eq!(clamp(RegionId::Terminal, 150.0).unwrap(), 150.0);
        assert_eq!(clamp(RegionId::RightPanel, 500.0).unwrap(), 500.0);
    }

    #[test]
    fn clamp_limits_both_ends() {
        assert_eq!(clamp(RegionId::Sidebar, 10.0).unwrap(), 200.0);
        assert_eq!(clamp(RegionId::Sidebar, 900.0).unwrap(), 500.0);
        assert_eq!(clamp(RegionId::Terminal, 0.0).unwrap(), 150.0);
        assert_eq!(clamp(RegionId::RightPanel, 800.0).unwrap(), 500.0);
    }

    #[test]
    fn clamp_rejects_non_finite() {
        assert!(matches!(
            clamp(RegionId::Sidebar, f64::NAN),
            Err(BoundsError::NonFinite {
                region: Some(RegionId::Sidebar),
                ..
            })
        ));
        assert!(matches!(
            clamp(RegionId::Terminal, f64::INFINITY),
            Err(BoundsError::NonFinite { .. })
        ));
    }

    #[test]
    fn clamp_rejects_negative() {
        assert_eq!(
            clamp(RegionId::RightPanel, -1.0),
            Err(BoundsError::Negative {
                region: Some(RegionId::RightPanel),
                value: -1.0
            })
        );
    }

    #[test]
    fn validate_rejects_inverted_and_negative_bounds() {
        let mut policy = BoundsPolicy::DEFAULT;
        assert!(policy.validate().is_ok());

        policy.terminal = SizeBounds::new(400.0, 100.0);
        assert_eq!(
            policy.validate(),
            Err(BoundsError::InvalidBounds {
                region: RegionId::Terminal,
                min: 400.0,
                max: 100.0
            })
        );

        policy.terminal = SizeBounds::new(-5.0, 100.0);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn custom_policy_clamps_to_its_own_range() {
        let policy = BoundsPolicy {
            sidebar: SizeBounds::new(100.0, 150.0),
            ..BoundsPolicy::DEFAULT
        };
        assert_eq!(policy.clamp(RegionId::Sidebar, 300.0).unwrap(), 150.0);
        assert_eq!(policy.clamp(RegionId::Terminal, 300.0).unwrap(), 300.0);
    }

    #[test]
    fn error_messages_name_the_region() {
        let msg = clamp(RegionId::Terminal, -3.0).unwrap_err().to_string();
        assert!(msg.contains("terminal"), "{msg}");
    }
}
