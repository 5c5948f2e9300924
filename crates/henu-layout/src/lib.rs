#![forbid(unsafe_code)]

//! Constrained panel layout for the HENU workspace shell.
//!
//! The workspace has three resizable regions around a central editor: a
//! sidebar on the left, a terminal under the editor, and a right panel that
//! shows either a preview or an agent view.
//!
//! - [`bounds`]: min/max per region and clamping.
//! - [`store`]: the single mutable [`LayoutState`] of a session.
//! - [`drag`]: pointer-driven resize state machine.
//! - [`preset`]: named layouts applied in one write.
//! - [`responsive`]: breakpoint tiers reacting to container resizes.
//! - [`compose`]: pure derivation of rectangles, handles and status.
//! - [`workspace`]: facade owning all of the above for one session.

pub mod bounds;
pub mod compose;
pub mod config;
pub mod drag;
pub mod error;
pub mod preset;
pub mod region;
pub mod responsive;
pub mod store;
pub mod workspace;

pub use bounds::{BoundsError, BoundsPolicy, SizeBounds, clamp};
pub use compose::{
    Composition, CompositionGeometry, RegionView, ResizeHandle, RestoreAffordance, RestoreEdge,
    StatusSummary, compose,
};
pub use config::{ConfigValidationError, LayoutConfig};
pub use drag::{
    CursorFeedback, CursorShape, DragEffect, DragInput, DragNoopReason, DragResizeController,
    DragSession, DragState, DragTransition, ReleaseReason,
};
pub use error::LayoutError;
pub use preset::{LayoutMode, apply_preset, preset_layout, reset_layout};
pub use region::{CollapseFlags, RegionId, RegionLayout, RegionSizes, ResizeAxis};
pub use responsive::{BreakpointTier, Breakpoints, Responsive, ViewportAdapter};
pub use store::{CenterFocus, LayoutState, LayoutStore, RightPanelContent};
pub use workspace::WorkspaceLayout;
