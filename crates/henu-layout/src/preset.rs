#![forbid(unsafe_code)]

//! Layout presets.
//!
//! Each [`LayoutMode`] other than [`LayoutMode::Custom`] names a complete
//! target layout:
//!
//! ```text
//! mode      sidebar terminal right  collapsed             right content
//! default   300     250      380    -                     unchanged
//! code      300     0        0      terminal, right       unchanged
//! terminal  0       500      0      sidebar, right        unchanged
//! preview   0       0        800    sidebar, terminal     preview
//! ai        0       0        500    sidebar, terminal     agent
//! ```
//!
//! Preset sizes are written as-is; they are not clamped to drag bounds.
//! Application is a single store commit, so no intermediate state is ever
//! observable, and applying the same preset twice yields the same state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::region::{CollapseFlags, RegionId, RegionLayout, RegionSizes};
use crate::store::{LayoutState, LayoutStore, RightPanelContent};

/// Named layout selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    Default,
    Code,
    Terminal,
    Preview,
    Ai,
    /// Entered implicitly once a drag moves a size off the preset.
    Custom,
}

impl LayoutMode {
    pub const ALL: [Self; 6] = [
        Self::Default,
        Self::Code,
        Self::Terminal,
        Self::Preview,
        Self::Ai,
        Self::Custom,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Code => "code",
            Self::Terminal => "terminal",
            Self::Preview => "preview",
            Self::Ai => "ai",
            Self::Custom => "custom",
        }
    }

    /// Upper-case label shown in the status bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Code => "CODE",
            Self::Terminal => "TERMINAL",
            Self::Preview => "PREVIEW",
            Self::Ai => "AI",
            Self::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown layout mode {s:?}"))
    }
}

/// Sizes of the `default` preset; also the initial layout.
pub const DEFAULT_PRESET_SIZES: RegionSizes = RegionSizes::new(300.0, 250.0, 380.0);

/// Full target of a preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetLayout {
    pub sizes: RegionSizes,
    pub collapsed: CollapseFlags,
    /// Forced right-panel content, or `None` to keep the current one.
    pub right_content: Option<RightPanelContent>,
}

impl PresetLayout {
    /// Build the state this preset produces from `current`.
    ///
    /// Only the right-panel content (when not forced) and the center focus
    /// carry over.
    #[must_use]
    pub fn target_state(&self, mode: LayoutMode, current: &LayoutState) -> LayoutState {
        let region = |id: RegionId| RegionLayout {
            size: self.sizes.get(id),
            collapsed: self.collapsed.contains(id.flag()),
        };
        LayoutState {
            sidebar: region(RegionId::Sidebar),
            terminal: region(RegionId::Terminal),
            right_panel: region(RegionId::RightPanel),
            mode,
            right_content: self.right_content.unwrap_or(current.right_content),
            focus: current.focus,
        }
    }
}

/// Canonical layout of `mode`, or `None` for [`LayoutMode::Custom`].
#[must_use]
pub const fn preset_layout(mode: LayoutMode) -> Option<PresetLayout> {
    let preset = match mode {
        LayoutMode::Default => PresetLayout {
            sizes: DEFAULT_PRESET_SIZES,
            collapsed: CollapseFlags::empty(),
            right_content: None,
        },
        LayoutMode::Code => PresetLayout {
            sizes: RegionSizes::new(300.0, 0.0, 0.0),
            collapsed: CollapseFlags::TERMINAL.union(CollapseFlags::RIGHT_PANEL),
            right_content: None,
        },
        LayoutMode::Terminal => PresetLayout {
            sizes: RegionSizes::new(0.0, 500.0, 0.0),
            collapsed: CollapseFlags::SIDEBAR.union(CollapseFlags::RIGHT_PANEL),
            right_content: None,
        },
        LayoutMode::Preview => PresetLayout {
            sizes: RegionSizes::new(0.0, 0.0, 800.0),
            collapsed: CollapseFlags::SIDEBAR.union(CollapseFlags::TERMINAL),
            right_content: Some(RightPanelContent::Preview),
        },
        LayoutMode::Ai => PresetLayout {
            sizes: RegionSizes::new(0.0, 0.0, 500.0),
            collapsed: CollapseFlags::SIDEBAR.union(CollapseFlags::TERMINAL),
            right_content: Some(RightPanelContent::Agent),
        },
        LayoutMode::Custom => return None,
    };
    Some(preset)
}

/// Apply `mode` to the store in one commit and return the new state.
///
/// `Custom` has no canonical layout; selecting it only relabels the mode.
pub fn apply_preset(store: &mut LayoutStore, mode: LayoutMode) -> LayoutState {
    let _span = info_span!("layout.preset", mode = %mode).entered();
    match preset_layout(mode) {
        Some(preset) => {
            let target = preset.target_state(mode, &store.layout());
            store.commit(target);
            info!(
                sidebar = target.sidebar.size,
                terminal = target.terminal.size,
                right_panel = target.right_panel.size,
                "preset applied"
            );
        }
        None => store.set_mode(mode),
    }
    store.layout()
}

/// Reset to the `default` preset.
pub fn reset_layout(store: &mut LayoutStore) -> LayoutState {
    apply_preset(store, LayoutMode::Default)
}

/// Whether `size` for `region` is off the canonical size of `mode` by more
/// than `epsilon`. `Custom` never diverges from itself.
#[must_use]
pub fn diverges_from_preset(mode: LayoutMode, region: RegionId, size: f64, epsilon: f64) -> bool {
    match preset_layout(mode) {
        Some(preset) => (preset.sizes.get(region) - size).abs() > epsilon,
        None => false,
    }
}
