//! End-to-end workspace scenarios driven through `WorkspaceLayout`.

use henu_core::{Point, PointerEvent, Size};
use henu_layout::{
    BreakpointTier, CollapseFlags, LayoutMode, RegionId, RegionLayout, RightPanelContent,
    WorkspaceLayout,
};

fn wide() -> WorkspaceLayout {
    WorkspaceLayout::with_defaults(Size::new(1400.0, 900.0)).unwrap()
}

#[test]
fn sidebar_drag_grows_by_pointer_delta() {
    let mut workspace = wide();
    assert_eq!(workspace.state().sidebar.size, 300.0);

    workspace
        .begin_resize(RegionId::Sidebar, Point::new(500.0, 300.0))
        .unwrap();
    workspace.pointer(PointerEvent::moved(560.0, 300.0)).unwrap();
    workspace.pointer(PointerEvent::up(560.0, 300.0)).unwrap();

    assert_eq!(workspace.state().sidebar.size, 360.0);
}

#[test]
fn right_panel_drag_shrinks_when_moving_right() {
    let mut workspace = wide();
    assert_eq!(workspace.state().right_panel.size, 380.0);

    workspace
        .begin_resize(RegionId::RightPanel, Point::new(800.0, 300.0))
        .unwrap();
    workspace.pointer(PointerEvent::moved(850.0, 300.0)).unwrap();
    workspace.pointer(PointerEvent::up(850.0, 300.0)).unwrap();

    assert_eq!(workspace.state().right_panel.size, 330.0);
}

#[test]
fn preview_preset_focuses_right_panel() {
    let mut workspace = wide();
    let state = workspace.select_preset(LayoutMode::Preview);

    assert_eq!(
        state.collapse_flags(),
        CollapseFlags::SIDEBAR | CollapseFlags::TERMINAL
    );
    assert_eq!(state.right_panel, RegionLayout::open(800.0));
    assert_eq!(state.right_content, RightPanelContent::Preview);
    assert_eq!(state.mode, LayoutMode::Preview);

    let composition = workspace.composition();
    assert_eq!(composition.status.mode_label, "PREVIEW");
    assert!(!composition.status.sidebar_visible);
    assert!(!composition.status.terminal_visible);
    assert_eq!(
        composition.status.right_content,
        Some(RightPanelContent::Preview)
    );
    assert_eq!(composition.handles.len(), 1);
}

#[test]
fn narrowing_viewport_rescales_side_panels() {
    let mut workspace = wide();
    workspace.set_collapsed(RegionId::Terminal, true);
    let before = workspace.state();

    let outcome = workspace.resize_viewport(Size::new(1000.0, 900.0)).unwrap();

    assert_eq!(outcome.tier, BreakpointTier::Compact);
    assert!(outcome.tier_changed);
    let after = workspace.state();
    assert_eq!(after.sidebar.size, 240.0);
    assert_eq!(after.right_panel.size, 320.0);
    assert_eq!(after.terminal, before.terminal);
    assert_eq!(after.collapse_flags(), before.collapse_flags());
    assert_eq!(after.mode, before.mode);
}

#[test]
fn drag_hit_test_then_reset_restores_default() {
    let mut workspace = wide();
    // Terminal handle lives in the gap above the terminal.
    workspace.pointer(PointerEvent::down(600.0, 648.0)).unwrap();
    workspace.pointer(PointerEvent::moved(600.0, 448.0)).unwrap();
    workspace.pointer(PointerEvent::up(600.0, 448.0)).unwrap();
    assert_eq!(workspace.state().terminal.size, 450.0);
    assert_eq!(workspace.state().mode, LayoutMode::Custom);
    assert_eq!(workspace.composition().editor_height(), 900.0 - 458.0);

    let state = workspace.reset_layout();
    assert_eq!(state.terminal, RegionLayout::open(250.0));
    assert_eq!(state.mode, LayoutMode::Default);
}
