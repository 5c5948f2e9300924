#![forbid(unsafe_code)]

//! Render composition.
//!
//! [`compose`] turns a [`LayoutState`] and the container size into concrete
//! rectangles for every region, the resize handle hit areas, and a status
//! summary. It is a pure function of its inputs; the result is a read-only
//! snapshot for child views.
//!
//! ```text
//! +---------+-+----------------------+-+-----------+
//! |         | |        editor        | |           |
//! | sidebar |h|----------h-----------|h|   right   |
//! |         | |       terminal       | |           |
//! +---------+-+----------------------+-+-----------+
//! ```
//!
//! Side handles take their own column next to the panel. The terminal
//! handle sits at the bottom of the gap between editor and terminal.

use henu_core::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::drag::{CursorFeedback, CursorShape};
use crate::preset::LayoutMode;
use crate::region::RegionId;
use crate::store::{CenterFocus, LayoutState, RightPanelContent};

/// Fixed dimensions used when composing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionGeometry {
    /// Space between the editor and the terminal.
    pub gap: f64,
    /// Width (or height) of a resize handle's hit area.
    pub handle_thickness: f64,
}

impl CompositionGeometry {
    pub const DEFAULT: Self = Self {
        gap: 8.0,
        handle_thickness: 4.0,
    };
}

impl Default for CompositionGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Edge a collapsed region's restore affordance is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreEdge {
    Left,
    Bottom,
    Right,
}

impl RestoreEdge {
    #[must_use]
    pub const fn for_region(region: RegionId) -> Self {
        match region {
            RegionId::Sidebar => Self::Left,
            RegionId::Terminal => Self::Bottom,
            RegionId::RightPanel => Self::Right,
        }
    }
}

/// Control that restores a collapsed region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RestoreAffordance {
    pub region: RegionId,
    pub edge: RestoreEdge,
}

/// How a region is presented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum RegionView {
    Visible {
        /// Stored size; `rect` may be smaller when the container is tight.
        size: f64,
        rect: Rect,
    },
    Collapsed {
        restore: RestoreAffordance,
    },
}

impl RegionView {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    #[must_use]
    pub const fn rect(&self) -> Option<Rect> {
        match *self {
            Self::Visible { rect, .. } => Some(rect),
            Self::Collapsed { .. } => None,
        }
    }

    #[must_use]
    pub const fn restore(&self) -> Option<RestoreAffordance> {
        match *self {
            Self::Visible { .. } => None,
            Self::Collapsed { restore } => Some(restore),
        }
    }
}

/// Hit area that starts a drag for `region`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResizeHandle {
    pub region: RegionId,
    pub rect: Rect,
    pub cursor: CursorShape,
}

/// Data for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusSummary {
    pub mode: LayoutMode,
    pub mode_label: &'static str,
    pub sidebar_visible: bool,
    pub terminal_visible: bool,
    pub right_panel_visible: bool,
    /// Right-panel content, `None` while the panel is collapsed.
    pub right_content: Option<RightPanelContent>,
    pub focus: CenterFocus,
    /// Last known pointer position.
    pub pointer: Option<Point>,
}

/// Composed frame of the workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub viewport: Size,
    pub sidebar: RegionView,
    pub terminal: RegionView,
    pub right_panel: RegionView,
    /// Column between the side panels (editor, gap and terminal).
    pub center: Rect,
    pub editor: Rect,
    pub right_content: RightPanelContent,
    pub handles: Vec<ResizeHandle>,
    pub feedback: CursorFeedback,
    pub status: StatusSummary,
    /// Store revision the frame was composed from.
    pub revision: u64,
}

impl Composition {
    #[must_use]
    pub const fn region(&self, region: RegionId) -> &RegionView {
        match region {
            RegionId::Sidebar => &self.sidebar,
            RegionId::Terminal => &self.terminal,
            RegionId::RightPanel => &self.right_panel,
        }
    }

    /// Height available to the editor.
    #[must_use]
    pub fn editor_height(&self) -> f64 {
        self.editor.height
    }

    /// Region whose resize handle contains `point`.
    #[must_use]
    pub fn handle_at(&self, point: Point) -> Option<RegionId> {
        self.handles
            .iter()
            .find(|handle| handle.rect.contains(point))
            .map(|handle| handle.region)
    }

    /// Restore affordances of every collapsed region.
    pub fn restore_affordances(&self) -> impl Iterator<Item = RestoreAffordance> + '_ {
        RegionId::ALL
            .into_iter()
            .filter_map(|region| self.region(region).restore())
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: Option<Point>) -> Self {
        self.status.pointer = pointer;
        self
    }

    #[must_use]
    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }
}

/// Compose `state` into a `viewport`-sized container.
#[must_use]
pub fn compose(
    state: &LayoutState,
    viewport: Size,
    feedback: CursorFeedback,
    geometry: &CompositionGeometry,
) -> Composition {
    let container = Rect::from_size(viewport);
    let thickness = geometry.handle_thickness.max(0.0);
    let mut handles = Vec::with_capacity(3);

    let collapsed = |region: RegionId| RegionView::Collapsed {
        restore: RestoreAffordance {
            region,
            edge: RestoreEdge::for_region(region),
        },
    };
    let handle = |region: RegionId, rect: Rect| ResizeHandle {
        region,
        rect,
        cursor: CursorShape::for_axis(region.axis()),
    };

    let mut rest = container;
    let sidebar = if state.sidebar.collapsed {
        collapsed(RegionId::Sidebar)
    } else {
        let (rect, after) = rest.take_left(state.sidebar.size);
        let (grip, after) = after.take_left(thickness);
        handles.push(handle(RegionId::Sidebar, grip));
        rest = after;
        RegionView::Visible {
            size: state.sidebar.size,
            rect,
        }
    };

    let right_panel = if state.right_panel.collapsed {
        collapsed(RegionId::RightPanel)
    } else {
        let (before, rect) = rest.take_right(state.right_panel.size);
        let (before, grip) = before.take_right(thickness);
        handles.push(handle(RegionId::RightPanel, grip));
        rest = before;
        RegionView::Visible {
            size: state.right_panel.size,
            rect,
        }
    };

    let center = rest;
    let (editor, terminal) = if state.terminal.collapsed {
        (center, collapsed(RegionId::Terminal))
    } else {
        let (above, rect) = center.take_bottom(state.terminal.size);
        let (editor, gap) = above.take_bottom(geometry.gap.max(0.0));
        let (_, grip) = gap.take_bottom(thickness);
        handles.push(handle(RegionId::Terminal, grip));
        (
            editor,
            RegionView::Visible {
                size: state.terminal.size,
                rect,
            },
        )
    };

    let status = StatusSummary {
        mode: state.mode,
        mode_label: state.mode.label(),
        sidebar_visible: sidebar.is_visible(),
        terminal_visible: terminal.is_visible(),
        right_panel_visible: right_panel.is_visible(),
        right_content: right_panel.is_visible().then_some(state.right_content),
        focus: state.focus,
        pointer: None,
    };

    Composition {
        viewport,
        sidebar,
        terminal,
        right_panel,
        center,
        editor,
        right_content: state.right_content,
        handles,
        feedback,
        status,
        revision: 0,
    }
}
