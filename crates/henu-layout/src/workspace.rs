#![forbid(unsafe_code)]

//! Workspace layout facade.
//!
//! [`WorkspaceLayout`] owns one session's store, drag controller and viewport
//! adapter, and re-derives the [`Composition`] after every action. Hosts talk
//! only to this type.

use henu_core::event::{PointerButton, PointerEvent, PointerEventKind};
use henu_core::geometry::{Point, Size};
use tracing::debug;

use crate::compose::{Composition, compose};
use crate::config::LayoutConfig;
use crate::drag::{CursorFeedback, DragInput, DragResizeController, DragState, DragTransition};
use crate::error::LayoutError;
use crate::preset::{self, LayoutMode};
use crate::region::RegionId;
use crate::responsive::{BreakpointTier, ResizeOutcome, ViewportAdapter};
use crate::store::{CenterFocus, LayoutState, LayoutStore, RightPanelContent};

/// One workspace session.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    config: LayoutConfig,
    store: LayoutStore,
    drag: DragResizeController,
    adapter: ViewportAdapter,
    pointer: Option<Point>,
    composition: Composition,
}

impl WorkspaceLayout {
    /// Create a session mounted in a `viewport`-sized container.
    ///
    /// Mounting runs the viewport adapter once, so the side panels start at
    /// the tier defaults for `viewport`.
    pub fn new(config: LayoutConfig, viewport: Size) -> Result<Self, LayoutError> {
        let config = config.validated()?;
        let mut store = LayoutStore::default();
        let drag = DragResizeController::new(config.bounds, config.custom_mode_epsilon);
        let mut adapter = ViewportAdapter::new(config.breakpoints, config.tier_defaults());
        adapter.on_resize(&mut store, viewport)?;

        let composition = compose(
            &store.layout(),
            viewport,
            drag.feedback(),
            &config.geometry,
        )
        .with_revision(store.revision());

        Ok(Self {
            config,
            store,
            drag,
            adapter,
            pointer: None,
            composition,
        })
    }

    /// Session with the default configuration.
    pub fn with_defaults(viewport: Size) -> Result<Self, LayoutError> {
        Self::new(LayoutConfig::default(), viewport)
    }

    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> LayoutState {
        self.store.layout()
    }

    #[must_use]
    pub const fn store(&self) -> &LayoutStore {
        &self.store
    }

    #[must_use]
    pub const fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    #[must_use]
    pub const fn feedback(&self) -> CursorFeedback {
        self.drag.feedback()
    }

    #[must_use]
    pub const fn tier(&self) -> Option<BreakpointTier> {
        self.adapter.tier()
    }

    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.adapter.viewport()
    }

    /// Latest composed frame.
    #[must_use]
    pub const fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Feed one pointer event.
    ///
    /// A press resolves its target through the current frame's handle hit
    /// areas; only the primary button can start a drag.
    pub fn pointer(&mut self, event: PointerEvent) -> Result<DragTransition, LayoutError> {
        let position = event.position();
        let input = match event.kind {
            PointerEventKind::Down(button) => DragInput::Down {
                region: (button == PointerButton::Primary)
                    .then(|| self.composition.handle_at(position))
                    .flatten(),
                position,
            },
            PointerEventKind::Move => DragInput::Move(position),
            PointerEventKind::Up(_) => DragInput::Up(position),
            PointerEventKind::Leave => DragInput::Leave(position),
        };

        let transition = self.drag.apply(input, &mut self.store)?;
        self.pointer = match event.kind {
            PointerEventKind::Leave => None,
            _ => position.is_finite().then_some(position),
        };
        self.recompose();
        Ok(transition)
    }

    /// Start a drag on `region` without hit-testing.
    pub fn begin_resize(
        &mut self,
        region: RegionId,
        position: Point,
    ) -> Result<DragTransition, LayoutError> {
        let transition = self.drag.apply(
            DragInput::Down {
                region: Some(region),
                position,
            },
            &mut self.store,
        )?;
        self.pointer = Some(position);
        self.recompose();
        Ok(transition)
    }

    /// Container resized.
    pub fn resize_viewport(&mut self, viewport: Size) -> Result<ResizeOutcome, LayoutError> {
        let outcome = self.adapter.on_resize(&mut self.store, viewport)?;
        self.recompose();
        Ok(outcome)
    }

    /// Apply a preset, ending any drag first.
    pub fn select_preset(&mut self, mode: LayoutMode) -> LayoutState {
        self.drag.force_release(&self.store);
        let state = preset::apply_preset(&mut self.store, mode);
        self.recompose();
        state
    }

    pub fn reset_layout(&mut self) -> LayoutState {
        self.select_preset(LayoutMode::Default)
    }

    /// Collapse or restore a region. Collapsing the region being dragged
    /// ends the drag.
    pub fn set_collapsed(&mut self, region: RegionId, collapsed: bool) -> bool {
        if collapsed && self.drag.session().is_some_and(|s| s.region == region) {
            self.drag.force_release(&self.store);
        }
        let changed = self.store.set_collapsed(region, collapsed);
        if changed {
            debug!(%region, collapsed, "collapse changed");
        }
        self.recompose();
        changed
    }

    /// Flip a region's collapse flag, returning the new value.
    pub fn toggle_collapsed(&mut self, region: RegionId) -> bool {
        let collapsed = !self.store.region(region).collapsed;
        self.set_collapsed(region, collapsed);
        collapsed
    }

    pub fn set_right_content(&mut self, content: RightPanelContent) {
        self.store.set_right_content(content);
        self.recompose();
    }

    pub fn toggle_right_content(&mut self) -> RightPanelContent {
        let content = self.store.toggle_right_content();
        self.recompose();
        content
    }

    pub fn set_focus(&mut self, focus: CenterFocus) {
        self.store.set_focus(focus);
        self.recompose();
    }

    fn recompose(&mut self) {
        self.composition = compose(
            &self.store.layout(),
            self.adapter.viewport(),
            self.drag.feedback(),
            &self.config.geometry,
        )
        .with_pointer(self.pointer)
        .with_revision(self.store.revision());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::{DragEffect, DragNoopReason, ReleaseReason};

    fn wide() -> WorkspaceLayout {
        WorkspaceLayout::with_defaults(Size::new(1400.0, 900.0)).unwrap()
    }

    #[test]
    fn mount_applies_tier_defaults() {
        let workspace = WorkspaceLayout::with_defaults(Size::new(1000.0, 800.0)).unwrap();
        assert_eq!(workspace.tier(), Some(BreakpointTier::Compact));
        assert_eq!(workspace.state().sidebar.size, 240.0);
        assert_eq!(workspace.state().right_panel.size, 320.0);
        assert_eq!(workspace.state().mode, LayoutMode::Default);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = LayoutConfig::default();
        config.custom_mode_epsilon = -1.0;
        let err = WorkspaceLayout::new(config, Size::new(800.0, 600.0)).unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));
    }

    #[test]
    fn drag_through_handle_hit_test() {
        let mut workspace = wide();
        let transition = workspace.pointer(PointerEvent::down(302.0, 100.0)).unwrap();
        assert!(matches!(
            transition.effect,
            DragEffect::Started {
                region: RegionId::Sidebar,
                ..
            }
        ));
        assert!(workspace.composition().feedback.resizing);

        workspace.pointer(PointerEvent::moved(362.0, 100.0)).unwrap();
        assert_eq!(workspace.state().sidebar.size, 360.0);
        assert_eq!(
            workspace.composition().sidebar.rect().map(|r| r.width),
            Some(360.0)
        );

        workspace.pointer(PointerEvent::up(362.0, 100.0)).unwrap();
        assert!(!workspace.composition().feedback.resizing);
        assert_eq!(workspace.state().mode, LayoutMode::Custom);
        assert_eq!(
            workspace.composition().status.pointer,
            Some(Point::new(362.0, 100.0))
        );
    }

    #[test]
    fn secondary_button_does_not_start_drag() {
        let mut workspace = wide();
        let event = PointerEvent::new(
            PointerEventKind::Down(PointerButton::Secondary),
            302.0,
            100.0,
        );
        let transition = workspace.pointer(event).unwrap();
        assert_eq!(
            transition.effect,
            DragEffect::Noop {
                reason: DragNoopReason::NotOnHandle
            }
        );
    }

    #[test]
    fn leave_releases_and_clears_pointer() {
        let mut workspace = wide();
        workspace
            .begin_resize(RegionId::Terminal, Point::new(500.0, 648.0))
            .unwrap();
        workspace.pointer(PointerEvent::moved(500.0, 600.0)).unwrap();
        let transition = workspace.pointer(PointerEvent::leave(500.0, 600.0)).unwrap();
        assert!(matches!(
            transition.effect,
            DragEffect::Released {
                reason: ReleaseReason::PointerLeave,
                ..
            }
        ));
        assert_eq!(workspace.state().terminal.size, 298.0);
        assert_eq!(workspace.composition().status.pointer, None);
    }

    #[test]
    fn leave_without_position_still_releases() {
        let mut workspace = wide();
        workspace
            .begin_resize(RegionId::Sidebar, Point::new(302.0, 10.0))
            .unwrap();
        workspace.pointer(PointerEvent::moved(352.0, 10.0)).unwrap();
        let transition = workspace
            .pointer(PointerEvent::leave(f64::NAN, f64::NAN))
            .unwrap();
        assert_eq!(transition.to, DragState::Idle);
        assert!(!workspace.feedback().resizing);
        assert!(!workspace.composition().feedback.resizing);
        assert_eq!(workspace.state().sidebar.size, 350.0);

        workspace
            .begin_resize(RegionId::Sidebar, Point::new(352.0, 10.0))
            .unwrap();
        workspace
            .pointer(PointerEvent::up(f64::NAN, 10.0))
            .unwrap();
        assert_eq!(workspace.drag_state(), DragState::Idle);
        assert_eq!(workspace.composition().status.pointer, None);
    }

    #[test]
    fn preset_mid_drag_releases_drag() {
        let mut workspace = wide();
        workspace
            .begin_resize(RegionId::Sidebar, Point::new(300.0, 10.0))
            .unwrap();
        workspace.select_preset(LayoutMode::Preview);
        assert_eq!(workspace.drag_state(), DragState::Idle);
        assert!(!workspace.feedback().resizing);

        workspace.pointer(PointerEvent::moved(400.0, 10.0)).unwrap();
        assert_eq!(workspace.state().sidebar.size, 0.0);
        assert_eq!(workspace.state().mode, LayoutMode::Preview);
    }

    #[test]
    fn collapsing_dragged_region_releases_drag() {
        let mut workspace = wide();
        workspace
            .begin_resize(RegionId::RightPanel, Point::new(1018.0, 10.0))
            .unwrap();
        assert!(workspace.toggle_collapsed(RegionId::RightPanel));
        assert_eq!(workspace.drag_state(), DragState::Idle);
        assert!(workspace.composition().right_panel.restore().is_some());

        assert!(!workspace.toggle_collapsed(RegionId::RightPanel));
        assert_eq!(workspace.state().right_panel.size, 380.0);
    }

    #[test]
    fn restoring_preset_collapsed_region_uses_tier_size() {
        let mut workspace = WorkspaceLayout::with_defaults(Size::new(1100.0, 800.0)).unwrap();
        workspace.select_preset(LayoutMode::Ai);
        workspace.set_collapsed(RegionId::Sidebar, false);
        assert_eq!(workspace.state().sidebar.size, 280.0);
        workspace.set_collapsed(RegionId::Terminal, false);
        assert_eq!(workspace.state().terminal.size, 250.0);
    }

    #[test]
    fn composition_revision_follows_store() {
        let mut workspace = wide();
        let before = workspace.composition().revision;
        workspace.toggle_right_content();
        assert_eq!(workspace.composition().revision, before + 1);
        assert_eq!(
            workspace.composition().right_content,
            RightPanelContent::Preview
        );
        workspace.set_focus(CenterFocus::Terminal);
        assert_eq!(workspace.composition().status.focus, CenterFocus::Terminal);
    }

    #[test]
    fn invalid_viewport_is_rejected() {
        let mut workspace = wide();
        let before = workspace.state();
        assert!(workspace.resize_viewport(Size::new(f64::NAN, 10.0)).is_err());
        assert_eq!(workspace.state(), before);
    }
}
