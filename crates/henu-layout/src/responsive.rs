#![forbid(unsafe_code)]

//! Viewport responsiveness: breakpoint tiers and tier-dependent sizes.
//!
//! [`Responsive<T>`] maps [`BreakpointTier`]s to values with inheritance
//! from smaller tiers. [`ViewportAdapter`] classifies every container resize
//! into a tier and writes that tier's sidebar and right-panel sizes into the
//! store.
//!
//! # Invariants
//!
//! 1. `Compact` always has a value (set via [`Responsive::new`]).
//! 2. A missing tier inherits from the nearest smaller tier that has a value.
//! 3. A resize only touches the sidebar and right-panel sizes; the terminal
//!    height, collapse flags, mode, right content and focus are kept.
//! 4. Running the adapter twice for the same width produces the same state.

use std::fmt;

use henu_core::geometry::Size;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::error::LayoutError;
use crate::region::RegionId;
use crate::store::LayoutStore;

/// Width bucket of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakpointTier {
    Compact,
    Medium,
    Wide,
}

impl BreakpointTier {
    pub const ALL: [Self; 3] = [Self::Compact, Self::Medium, Self::Wide];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Medium => "medium",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for BreakpointTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier thresholds (exclusive upper bounds of the smaller tiers).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Widths below this are `Compact`.
    pub compact_below: f64,
    /// Widths below this (and not compact) are `Medium`.
    pub medium_below: f64,
}

impl Breakpoints {
    pub const DEFAULT: Self = Self {
        compact_below: 1024.0,
        medium_below: 1280.0,
    };

    #[must_use]
    pub fn classify(&self, width: f64) -> BreakpointTier {
        if width < self.compact_below {
            BreakpointTier::Compact
        } else if width < self.medium_below {
            BreakpointTier::Medium
        } else {
            BreakpointTier::Wide
        }
    }

    /// Thresholds must be finite, positive and ordered.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.compact_below.is_finite()
            && self.medium_below.is_finite()
            && self.compact_below > 0.0
            && self.compact_below <= self.medium_below
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A tier-aware value with inheritance from smaller tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responsive<T> {
    /// Indexed by `BreakpointTier` ordinal; slot 0 is always `Some`.
    values: [Option<T>; 3],
}

impl<T: Clone> Responsive<T> {
    /// Base value for `Compact`; larger tiers inherit it until overridden.
    #[must_use]
    pub fn new(base: T) -> Self {
        Self {
            values: [Some(base), None, None],
        }
    }

    /// Set the value for a tier (builder pattern).
    #[must_use]
    pub fn at(mut self, tier: BreakpointTier, value: T) -> Self {
        self.set(tier, value);
        self
    }

    pub fn set(&mut self, tier: BreakpointTier, value: T) {
        self.values[tier as usize] = Some(value);
    }

    /// Walk down from `tier` to the nearest explicit value.
    #[must_use]
    pub fn resolve(&self, tier: BreakpointTier) -> &T {
        self.values[..=tier as usize]
            .iter()
            .rev()
            .find_map(Option::as_ref)
            .unwrap_or_else(|| unreachable!("compact tier always has a value"))
    }

    #[must_use]
    pub fn resolve_cloned(&self, tier: BreakpointTier) -> T {
        self.resolve(tier).clone()
    }

    /// Explicitly set tiers and their values.
    pub fn explicit_values(&self) -> impl Iterator<Item = (BreakpointTier, &T)> {
        BreakpointTier::ALL
            .iter()
            .zip(self.values.iter())
            .filter_map(|(&tier, value)| value.as_ref().map(|v| (tier, v)))
    }
}

/// Tier-dependent default sizes of the horizontal regions.
#[derive(Debug, Clone, PartialEq)]
pub struct TierDefaults {
    pub sidebar: Responsive<f64>,
    pub right_panel: Responsive<f64>,
}

impl Default for TierDefaults {
    fn default() -> Self {
        Self {
            sidebar: Responsive::new(240.0)
                .at(BreakpointTier::Medium, 280.0)
                .at(BreakpointTier::Wide, 300.0),
            right_panel: Responsive::new(320.0)
                .at(BreakpointTier::Medium, 350.0)
                .at(BreakpointTier::Wide, 380.0),
        }
    }
}

/// Result of one adapter run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeOutcome {
    pub tier: BreakpointTier,
    pub tier_changed: bool,
    pub sidebar: f64,
    pub right_panel: f64,
}

/// Reacts to container resizes.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportAdapter {
    breakpoints: Breakpoints,
    defaults: TierDefaults,
    tier: Option<BreakpointTier>,
    viewport: Size,
}

impl Default for ViewportAdapter {
    fn default() -> Self {
        Self::new(Breakpoints::DEFAULT, TierDefaults::default())
    }
}

impl ViewportAdapter {
    #[must_use]
    pub fn new(breakpoints: Breakpoints, defaults: TierDefaults) -> Self {
        Self {
            breakpoints,
            defaults,
            tier: None,
            viewport: Size::default(),
        }
    }

    /// Tier of the last resize, `None` before the first one.
    #[must_use]
    pub const fn tier(&self) -> Option<BreakpointTier> {
        self.tier
    }

    /// Container size of the last resize.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    #[must_use]
    pub const fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    #[must_use]
    pub const fn defaults(&self) -> &TierDefaults {
        &self.defaults
    }

    /// Handle a container resize.
    pub fn on_resize(
        &mut self,
        store: &mut LayoutStore,
        viewport: Size,
    ) -> Result<ResizeOutcome, LayoutError> {
        if !viewport.is_valid() {
            return Err(LayoutError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let tier = self.breakpoints.classify(viewport.width);
        let sidebar = self.defaults.sidebar.resolve_cloned(tier);
        let right_panel = self.defaults.right_panel.resolve_cloned(tier);

        let mut state = store.layout();
        state.sidebar.size = sidebar;
        state.right_panel.size = right_panel;
        store.replace_all(state)?;
        store.set_restore_size(RegionId::Sidebar, sidebar)?;
        store.set_restore_size(RegionId::RightPanel, right_panel)?;

        let tier_changed = self.tier != Some(tier);
        if tier_changed {
            info!(%tier, width = viewport.width, sidebar, right_panel, "breakpoint tier");
        } else {
            trace!(%tier, width = viewport.width, "viewport resized");
        }
        self.tier = Some(tier);
        self.viewport = viewport;

        Ok(ResizeOutcome {
            tier,
            tier_changed,
            sidebar,
            right_panel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{LayoutMode, apply_preset};
    use crate::region::RegionLayout;

    #[test]
    fn classify_uses_exclusive_thresholds() {
        let bp = Breakpoints::DEFAULT;
        assert_eq!(bp.classify(0.0), BreakpointTier::Compact);
        assert_eq!(bp.classify(1023.9), BreakpointTier::Compact);
        assert_eq!(bp.classify(1024.0), BreakpointTier::Medium);
        assert_eq!(bp.classify(1279.0), BreakpointTier::Medium);
        assert_eq!(bp.classify(1280.0), BreakpointTier::Wide);
        assert_eq!(bp.classify(4000.0), BreakpointTier::Wide);
    }

    #[test]
    fn responsive_inherits_from_smaller_tier() {
        let value = Responsive::new(1).at(BreakpointTier::Wide, 3);
        assert_eq!(*value.resolve(BreakpointTier::Compact), 1);
        assert_eq!(*value.resolve(BreakpointTier::Medium), 1);
        assert_eq!(*value.resolve(BreakpointTier::Wide), 3);
    }

    #[test]
    fn explicit_values_lists_set_tiers() {
        let value = Responsive::new('a').at(BreakpointTier::Wide, 'c');
        let tiers: Vec<_> = value.explicit_values().map(|(t, _)| t).collect();
        assert_eq!(tiers, vec![BreakpointTier::Compact, BreakpointTier::Wide]);
    }

    #[test]
    fn default_tier_sizes() {
        let defaults = TierDefaults::default();
        let sizes: Vec<_> = BreakpointTier::ALL
            .iter()
            .map(|&t| {
                (
                    defaults.sidebar.resolve_cloned(t),
                    defaults.right_panel.resolve_cloned(t),
                )
            })
            .collect();
        assert_eq!(sizes, vec![(240.0, 320.0), (280.0, 350.0), (300.0, 380.0)]);
    }

    #[test]
    fn shrinking_viewport_rescales_horizontal_regions_only() {
        let mut store = LayoutStore::default();
        let mut adapter = ViewportAdapter::default();
        adapter
            .on_resize(&mut store, Size::new(1400.0, 900.0))
            .unwrap();
        store.set_collapsed(RegionId::Terminal, true);
        let before = store.layout();

        let outcome = adapter
            .on_resize(&mut store, Size::new(1000.0, 900.0))
            .unwrap();
        assert!(outcome.tier_changed);
        assert_eq!(outcome.tier, BreakpointTier::Compact);

        let after = store.layout();
        assert_eq!(after.sidebar.size, 240.0);
        assert_eq!(after.right_panel.size, 320.0);
        assert_eq!(after.terminal, before.terminal);
        assert_eq!(after.collapse_flags(), before.collapse_flags());
        assert_eq!(after.mode, before.mode);
    }

    #[test]
    fn repeated_resize_is_idempotent() {
        let mut store = LayoutStore::default();
        let mut adapter = ViewportAdapter::default();
        adapter
            .on_resize(&mut store, Size::new(1100.0, 800.0))
            .unwrap();
        let first = store.layout();
        let outcome = adapter
            .on_resize(&mut store, Size::new(1100.0, 800.0))
            .unwrap();
        assert!(!outcome.tier_changed);
        assert_eq!(store.layout(), first);
    }

    #[test]
    fn collapsed_regions_keep_flags_and_restore_to_tier_size() {
        let mut store = LayoutStore::default();
        apply_preset(&mut store, LayoutMode::Terminal);
        let mut adapter = ViewportAdapter::default();
        adapter
            .on_resize(&mut store, Size::new(1100.0, 800.0))
            .unwrap();
        let state = store.layout();
        assert!(state.sidebar.collapsed);
        assert!(state.right_panel.collapsed);
        assert_eq!(state.mode, LayoutMode::Terminal);

        store.set_collapsed(RegionId::Sidebar, false);
        assert_eq!(store.region(RegionId::Sidebar), RegionLayout::open(280.0));
    }

    #[test]
    fn invalid_viewport_is_rejected() {
        let mut store = LayoutStore::default();
        let mut adapter = ViewportAdapter::default();
        let err = adapter
            .on_resize(&mut store, Size::new(f64::NAN, 100.0))
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidViewport { .. }));
        assert_eq!(adapter.tier(), None);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn breakpoint_validity() {
        assert!(Breakpoints::DEFAULT.is_valid());
        assert!(
            !Breakpoints {
                compact_below: 1300.0,
                medium_below: 1200.0
            }
            .is_valid()
        );
    }
}
