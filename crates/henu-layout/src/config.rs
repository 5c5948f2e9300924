#![forbid(unsafe_code)]

//! Layout engine configuration.
//!
//! [`LayoutConfig`] groups every tunable of the engine. All fields default
//! to the built-in constants, so `LayoutConfig::default()` is the stock
//! workspace. Loading from files lives in `henu-runtime`; this module only
//! defines the schema and its validation.
//!
//! ```toml
//! custom_mode_epsilon = 0.5
//!
//! [bounds.sidebar]
//! min = 200.0
//! max = 500.0
//!
//! [breakpoints]
//! compact_below = 1024.0
//! medium_below = 1280.0
//!
//! [tier_defaults.sidebar]
//! compact = 240.0
//! medium = 280.0
//! wide = 300.0
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bounds::BoundsPolicy;
use crate::compose::CompositionGeometry;
use crate::drag::DEFAULT_CUSTOM_MODE_EPSILON;
use crate::preset::DEFAULT_PRESET_SIZES;
use crate::region::RegionId;
use crate::responsive::{BreakpointTier, Breakpoints, Responsive, TierDefaults};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Drag bounds per region.
    pub bounds: BoundsPolicy,
    /// Viewport width tiers.
    pub breakpoints: Breakpoints,
    /// Per-tier sidebar and right-panel sizes.
    pub tier_defaults: TierDefaultsConfig,
    /// Gap and handle dimensions used by composition.
    pub geometry: CompositionGeometry,
    /// Pixels a dragged size may differ from the preset before the mode
    /// becomes `custom`.
    pub custom_mode_epsilon: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bounds: BoundsPolicy::DEFAULT,
            breakpoints: Breakpoints::DEFAULT,
            tier_defaults: TierDefaultsConfig::default(),
            geometry: CompositionGeometry::default(),
            custom_mode_epsilon: DEFAULT_CUSTOM_MODE_EPSILON,
        }
    }
}

impl LayoutConfig {
    /// Validate every parameter.
    ///
    /// Returns a list of violations; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for region in RegionId::ALL {
            if let Err(error) = self.bounds.bounds(region).validate(region) {
                errors.push(error.to_string());
            }
        }

        if !self.breakpoints.is_valid() {
            errors.push(format!(
                "breakpoints must satisfy 0 < compact_below <= medium_below (got {} / {})",
                self.breakpoints.compact_below, self.breakpoints.medium_below
            ));
        }

        for (name, region, sizes) in [
            ("sidebar", RegionId::Sidebar, &self.tier_defaults.sidebar),
            ("right_panel", RegionId::RightPanel, &self.tier_defaults.right_panel),
        ] {
            let bounds = self.bounds.bounds(region);
            for (tier, &value) in sizes.to_responsive().explicit_values() {
                if !value.is_finite() || value < 0.0 {
                    errors.push(format!(
                        "tier_defaults.{name}.{tier} must be finite and >= 0, got {value}"
                    ));
                } else if bounds.validate(region).is_ok() && !bounds.contains(value) {
                    errors.push(format!(
                        "tier_defaults.{name}.{tier} = {value} is outside bounds.{name} [{}, {}]",
                        bounds.min, bounds.max
                    ));
                }
            }
        }

        let terminal = self.bounds.bounds(RegionId::Terminal);
        let restore = DEFAULT_PRESET_SIZES.terminal;
        if terminal.validate(RegionId::Terminal).is_ok() && !terminal.contains(restore) {
            errors.push(format!(
                "bounds.terminal [{}, {}] must contain the terminal restore height {restore}",
                terminal.min, terminal.max
            ));
        }

        let geometry = &self.geometry;
        for (name, value) in [
            ("gap", geometry.gap),
            ("handle_thickness", geometry.handle_thickness),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("geometry.{name} must be finite and >= 0, got {value}"));
            }
        }

        if !self.custom_mode_epsilon.is_finite() || self.custom_mode_epsilon < 0.0 {
            errors.push(format!(
                "custom_mode_epsilon must be finite and >= 0, got {}",
                self.custom_mode_epsilon
            ));
        }

        errors
    }

    /// Return `self` if valid.
    pub fn validated(self) -> Result<Self, ConfigValidationError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigValidationError { errors })
        }
    }

    /// Build the adapter's tier defaults.
    #[must_use]
    pub fn tier_defaults(&self) -> TierDefaults {
        TierDefaults {
            sidebar: self.tier_defaults.sidebar.to_responsive(),
            right_panel: self.tier_defaults.right_panel.to_responsive(),
        }
    }
}

/// Per-tier sizes of the sidebar and right panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierDefaultsConfig {
    pub sidebar: TierSizes,
    pub right_panel: TierSizes,
}

impl Default for TierDefaultsConfig {
    fn default() -> Self {
        Self {
            sidebar: TierSizes {
                compact: 240.0,
                medium: Some(280.0),
                wide: Some(300.0),
            },
            right_panel: TierSizes {
                compact: 320.0,
                medium: Some(350.0),
                wide: Some(380.0),
            },
        }
    }
}

/// Sizes per tier; omitted tiers inherit from the next smaller one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierSizes {
    pub compact: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wide: Option<f64>,
}

impl TierSizes {
    #[must_use]
    pub fn to_responsive(&self) -> Responsive<f64> {
        let mut value = Responsive::new(self.compact);
        if let Some(medium) = self.medium {
            value.set(BreakpointTier::Medium, medium);
        }
        if let Some(wide) = self.wide {
            value.set(BreakpointTier::Wide, wide);
        }
        value
    }

}

/// Configuration rejected by [`LayoutConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    pub errors: Vec<String>,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}

impl std::error::Error for ConfigValidationError {}
