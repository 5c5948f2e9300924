#![forbid(unsafe_code)]

//! Layout state store.
//!
//! [`LayoutStore`] is the single piece of mutable layout state for one
//! workspace session. The drag controller, preset engine and viewport adapter
//! are its only writers; composition reads it after every write.
//!
//! # Invariants
//!
//! 1. Every stored size is finite and `>= 0`.
//! 2. Writes are all-or-nothing: a rejected write leaves the state and the
//!    revision untouched.
//! 3. `revision` increases by exactly one per accepted write.
//! 4. Collapsing keeps the size; restoring returns to it. A retained size of
//!    zero (written by a preset together with the collapsed flag) restores to
//!    the region's fallback size instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bounds::{BoundsError, check_size};
use crate::error::LayoutError;
use crate::preset::{DEFAULT_PRESET_SIZES, LayoutMode};
use crate::region::{CollapseFlags, RegionId, RegionLayout, RegionSizes};

/// Which view occupies the right panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RightPanelContent {
    Preview,
    #[default]
    Agent,
}

impl RightPanelContent {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Preview => Self::Agent,
            Self::Agent => Self::Preview,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Agent => "agent",
        }
    }
}

impl fmt::Display for RightPanelContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RightPanelContent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preview" => Ok(Self::Preview),
            "agent" => Ok(Self::Agent),
            other => Err(format!("unknown right panel content {other:?}")),
        }
    }
}

/// Active view of the center stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterFocus {
    #[default]
    Editor,
    Terminal,
}

/// Complete layout state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutState {
    pub sidebar: RegionLayout,
    pub terminal: RegionLayout,
    pub right_panel: RegionLayout,
    pub mode: LayoutMode,
    pub right_content: RightPanelContent,
    pub focus: CenterFocus,
}

impl LayoutState {
    #[must_use]
    pub const fn region(&self, region: RegionId) -> RegionLayout {
        match region {
            RegionId::Sidebar => self.sidebar,
            RegionId::Terminal => self.terminal,
            RegionId::RightPanel => self.right_panel,
        }
    }

    pub fn region_mut(&mut self, region: RegionId) -> &mut RegionLayout {
        match region {
            RegionId::Sidebar => &mut self.sidebar,
            RegionId::Terminal => &mut self.terminal,
            RegionId::RightPanel => &mut self.right_panel,
        }
    }

    #[must_use]
    pub fn collapse_flags(&self) -> CollapseFlags {
        RegionId::ALL
            .into_iter()
            .filter(|&region| self.region(region).collapsed)
            .fold(CollapseFlags::empty(), |flags, region| flags | region.flag())
    }

    #[must_use]
    pub fn sizes(&self) -> RegionSizes {
        RegionSizes::new(self.sidebar.size, self.terminal.size, self.right_panel.size)
    }

    /// Check every region size is finite and non-negative.
    pub fn validate(&self) -> Result<(), BoundsError> {
        for region in RegionId::ALL {
            check_size(Some(region), self.region(region).size)?;
        }
        Ok(())
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            sidebar: RegionLayout::open(DEFAULT_PRESET_SIZES.sidebar),
            terminal: RegionLayout::open(DEFAULT_PRESET_SIZES.terminal),
            right_panel: RegionLayout::open(DEFAULT_PRESET_SIZES.right_panel),
            mode: LayoutMode::Default,
            right_content: RightPanelContent::default(),
            focus: CenterFocus::default(),
        }
    }
}

/// Owner of the session's [`LayoutState`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStore {
    state: LayoutState,
    restore_sizes: RegionSizes,
    revision: u64,
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(LayoutState::default())
    }
}

impl LayoutStore {
    /// Create a store from a trusted initial state.
    #[must_use]
    pub fn new(state: LayoutState) -> Self {
        Self {
            state,
            restore_sizes: DEFAULT_PRESET_SIZES,
            revision: 0,
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn layout(&self) -> LayoutState {
        self.state
    }

    #[must_use]
    pub const fn region(&self, region: RegionId) -> RegionLayout {
        self.state.region(region)
    }

    #[must_use]
    pub const fn mode(&self) -> LayoutMode {
        self.state.mode
    }

    /// Number of accepted writes since construction.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Sizes used when restoring a region whose retained size is zero.
    #[must_use]
    pub const fn restore_sizes(&self) -> RegionSizes {
        self.restore_sizes
    }

    pub fn set_restore_size(&mut self, region: RegionId, size: f64) -> Result<(), LayoutError> {
        let size = check_size(Some(region), size)?;
        self.restore_sizes.set(region, size);
        Ok(())
    }

    /// Write one region's size, keeping its collapse flag.
    pub fn set_region_size(&mut self, region: RegionId, size: f64) -> Result<(), LayoutError> {
        let size = check_size(Some(region), size)?;
        self.state.region_mut(region).size = size;
        self.bump();
        Ok(())
    }

    /// Replace the whole state in one step.
    ///
    /// The new state is validated before anything is assigned.
    pub fn replace_all(&mut self, state: LayoutState) -> Result<(), LayoutError> {
        state.validate()?;
        self.state = state;
        self.bump();
        Ok(())
    }

    /// Collapse or restore a region.
    ///
    /// Returns `true` if the flag changed.
    pub fn set_collapsed(&mut self, region: RegionId, collapsed: bool) -> bool {
        let fallback = self.restore_sizes.get(region);
        let layout = self.state.region_mut(region);
        if layout.collapsed == collapsed {
            return false;
        }
        layout.collapsed = collapsed;
        if !collapsed && layout.size <= 0.0 {
            layout.size = fallback;
        }
        self.bump();
        true
    }

    /// Flip a region's collapse flag, returning the new value.
    pub fn toggle_collapsed(&mut self, region: RegionId) -> bool {
        let collapsed = !self.state.region(region).collapsed;
        self.set_collapsed(region, collapsed);
        collapsed
    }

    pub fn set_mode(&mut self, mode: LayoutMode) {
        if self.state.mode != mode {
            self.state.mode = mode;
            self.bump();
        }
    }

    pub fn set_right_content(&mut self, content: RightPanelContent) {
        if self.state.right_content != content {
            self.state.right_content = content;
            self.bump();
        }
    }

    /// Swap preview/agent, returning the new content.
    pub fn toggle_right_content(&mut self) -> RightPanelContent {
        let content = self.state.right_content.toggled();
        self.set_right_content(content);
        content
    }

    pub fn set_focus(&mut self, focus: CenterFocus) {
        if self.state.focus != focus {
            self.state.focus = focus;
            self.bump();
        }
    }

    /// Assign a state the caller built from validated constants.
    pub(crate) fn commit(&mut self, state: LayoutState) {
        debug_assert!(state.validate().is_ok());
        self.state = state;
        self.bump();
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_default_preset() {
        let state = LayoutState::default();
        assert_eq!(state.sidebar, RegionLayout::open(300.0));
        assert_eq!(state.terminal, RegionLayout::open(250.0));
        assert_eq!(state.right_panel, RegionLayout::open(380.0));
        assert_eq!(state.mode, LayoutMode::Default);
        assert_eq!(state.right_content, RightPanelContent::Agent);
        assert_eq!(state.focus, CenterFocus::Editor);
        assert!(state.collapse_flags().is_empty());
    }

    #[test]
    fn set_region_size_is_visible_on_next_read() {
        let mut store = LayoutStore::default();
        store.set_region_size(RegionId::Sidebar, 360.0).unwrap();
        assert_eq!(store.layout().sidebar.size, 360.0);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn set_region_size_rejects_invalid_without_writing() {
        let mut store = LayoutStore::default();
        let before = store.layout();
        assert!(store.set_region_size(RegionId::Terminal, f64::NAN).is_err());
        assert!(store.set_region_size(RegionId::Terminal, -1.0).is_err());
        assert_eq!(store.layout(), before);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn replace_all_is_all_or_nothing() {
        let mut store = LayoutStore::default();
        let before = store.layout();

        let mut bad = before;
        bad.sidebar.size = 100.0;
        bad.right_panel.size = f64::INFINITY;
        let err = store.replace_all(bad).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Bounds(BoundsError::NonFinite {
                region: Some(RegionId::RightPanel),
                ..
            })
        ));
        assert_eq!(store.layout(), before);

        let mut good = before;
        good.sidebar.size = 100.0;
        store.replace_all(good).unwrap();
        assert_eq!(store.layout(), good);
    }

    #[test]
    fn collapse_then_restore_keeps_size() {
        let mut store = LayoutStore::default();
        store.set_region_size(RegionId::RightPanel, 333.0).unwrap();
        assert!(store.set_collapsed(RegionId::RightPanel, true));
        assert_eq!(store.region(RegionId::RightPanel).effective_size(), 0.0);
        assert!(store.set_collapsed(RegionId::RightPanel, false));
        assert_eq!(store.region(RegionId::RightPanel), RegionLayout::open(333.0));
    }

    #[test]
    fn set_collapsed_to_same_value_is_noop() {
        let mut store = LayoutStore::default();
        assert!(!store.set_collapsed(RegionId::Sidebar, false));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn restoring_zero_size_uses_fallback() {
        let mut state = LayoutState::default();
        state.terminal = RegionLayout::collapsed(0.0);
        let mut store = LayoutStore::new(state);
        store.set_collapsed(RegionId::Terminal, false);
        assert_eq!(store.region(RegionId::Terminal), RegionLayout::open(250.0));

        store.set_restore_size(RegionId::Sidebar, 240.0).unwrap();
        store.set_collapsed(RegionId::Sidebar, true);
        store.set_region_size(RegionId::Sidebar, 0.0).unwrap();
        store.set_collapsed(RegionId::Sidebar, false);
        assert_eq!(store.region(RegionId::Sidebar).size, 240.0);
    }

    #[test]
    fn toggles_flip_and_report() {
        let mut store = LayoutStore::default();
        assert!(store.toggle_collapsed(RegionId::Terminal));
        assert!(!store.toggle_collapsed(RegionId::Terminal));
        assert_eq!(store.toggle_right_content(), RightPanelContent::Preview);
        assert_eq!(store.toggle_right_content(), RightPanelContent::Agent);
    }

    #[test]
    fn collapse_flags_reflect_regions() {
        let mut store = LayoutStore::default();
        store.set_collapsed(RegionId::Sidebar, true);
        store.set_collapsed(RegionId::RightPanel, true);
        assert_eq!(
            store.layout().collapse_flags(),
            CollapseFlags::SIDEBAR | CollapseFlags::RIGHT_PANEL
        );
    }

    #[test]
    fn right_content_parses() {
        assert_eq!(
            "preview".parse::<RightPanelContent>().unwrap(),
            RightPanelContent::Preview
        );
        assert!("chat".parse::<RightPanelContent>().is_err());
    }
}
