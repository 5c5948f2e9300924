#![forbid(unsafe_code)]

//! Drag-resize controller.
//!
//! Converts pointer input into continuous size writes for one active resize
//! handle at a time.
//!
//! ```text
//! Idle --down(handle)--> Dragging --move--> Dragging
//!   ^                       |
//!   +------ up / leave -----+
//! ```
//!
//! Every move computes an absolute size from the drag-start baseline
//! (`start_size + sign * (coord - start_coord)`), so replaying the same
//! inputs from the same start size always yields the same final size, and
//! only the most recent move matters.

use henu_core::geometry::Point;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::bounds::BoundsPolicy;
use crate::error::LayoutError;
use crate::preset::{LayoutMode, diverges_from_preset};
use crate::region::{RegionId, ResizeAxis};
use crate::store::LayoutStore;

/// Default tolerance before a drag relabels the mode as `custom`.
pub const DEFAULT_CUSTOM_MODE_EPSILON: f64 = 0.5;

/// Baseline of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub region: RegionId,
    /// Pointer coordinate along the region's axis at pointer-down.
    pub start_coord: f64,
    /// Region size at pointer-down.
    pub start_size: f64,
}

impl DragSession {
    /// Raw proposal for a pointer at `position`, floored at zero and
    /// saturated at `f64::MAX`.
    #[must_use]
    pub fn proposed_size(&self, position: Point) -> f64 {
        let delta = self.region.axis().coordinate(position) - self.start_coord;
        (self.start_size + self.region.growth_sign() * delta).clamp(0.0, f64::MAX)
    }
}

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Pointer input as seen by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragInput {
    /// Pointer pressed; `region` is the handle under it, if any.
    Down {
        region: Option<RegionId>,
        position: Point,
    },
    Move(Point),
    /// Released anywhere in the viewport.
    Up(Point),
    /// Left the viewport bounds.
    Leave(Point),
}

impl DragInput {
    #[must_use]
    pub const fn position(&self) -> Point {
        match *self {
            Self::Down { position, .. } => position,
            Self::Move(position) | Self::Up(position) | Self::Leave(position) => position,
        }
    }

    /// Whether the coordinate takes part in the transition.
    #[must_use]
    pub const fn needs_position(&self) -> bool {
        matches!(self, Self::Down { .. } | Self::Move(_))
    }
}

/// Why a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseReason {
    PointerUp,
    PointerLeave,
    /// Ended by the workspace (preset applied or region collapsed mid-drag).
    Programmatic,
}

/// Inputs that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    ActiveDragAlreadyInProgress,
    NotOnHandle,
    RegionCollapsed,
}

/// Effect of one controller step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        region: RegionId,
        start_size: f64,
    },
    Resized {
        region: RegionId,
        size: f64,
    },
    Released {
        region: RegionId,
        reason: ReleaseReason,
        final_size: f64,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// One state-machine step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragState,
    pub to: DragState,
    pub effect: DragEffect,
}

/// Cursor shape hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorShape {
    #[default]
    Default,
    ColResize,
    RowResize,
}

impl CursorShape {
    #[must_use]
    pub const fn for_axis(axis: ResizeAxis) -> Self {
        match axis {
            ResizeAxis::Horizontal => Self::ColResize,
            ResizeAxis::Vertical => Self::RowResize,
        }
    }
}

/// Global feedback while a drag is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CursorFeedback {
    pub resizing: bool,
    pub cursor: CursorShape,
    /// Text/content selection is suppressed for the duration of the drag.
    pub select_suppressed: bool,
}

/// The drag-resize state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct DragResizeController {
    state: DragState,
    bounds: BoundsPolicy,
    custom_mode_epsilon: f64,
    transition_counter: u64,
}

impl Default for DragResizeController {
    fn default() -> Self {
        Self::new(BoundsPolicy::DEFAULT, DEFAULT_CUSTOM_MODE_EPSILON)
    }
}

impl DragResizeController {
    #[must_use]
    pub fn new(bounds: BoundsPolicy, custom_mode_epsilon: f64) -> Self {
        Self {
            state: DragState::Idle,
            bounds,
            custom_mode_epsilon,
            transition_counter: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub const fn bounds(&self) -> &BoundsPolicy {
        &self.bounds
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    #[must_use]
    pub const fn session(&self) -> Option<DragSession> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    /// Cursor/selection feedback for the current state.
    #[must_use]
    pub const fn feedback(&self) -> CursorFeedback {
        match self.state {
            DragState::Idle => CursorFeedback {
                resizing: false,
                cursor: CursorShape::Default,
                select_suppressed: false,
            },
            DragState::Dragging(session) => CursorFeedback {
                resizing: true,
                cursor: CursorShape::for_axis(session.region.axis()),
                select_suppressed: true,
            },
        }
    }

    /// Apply one pointer input, writing sizes into `store`.
    ///
    /// Non-finite coordinates on Down/Move are rejected before any state
    /// changes. Up and Leave ignore the coordinate and always release.
    pub fn apply(
        &mut self,
        input: DragInput,
        store: &mut LayoutStore,
    ) -> Result<DragTransition, LayoutError> {
        let position = input.position();
        if input.needs_position() && !position.is_finite() {
            warn!(x = position.x, y = position.y, "rejected non-finite pointer");
            return Err(LayoutError::InvalidPointer {
                x: position.x,
                y: position.y,
            });
        }

        let from = self.state;
        let effect = match (self.state, input) {
            (DragState::Idle, DragInput::Down { region: None, .. }) => DragEffect::Noop {
                reason: DragNoopReason::NotOnHandle,
            },
            (
                DragState::Idle,
                DragInput::Down {
                    region: Some(region),
                    position,
                },
            ) => {
                let layout = store.region(region);
                if layout.collapsed {
                    DragEffect::Noop {
                        reason: DragNoopReason::RegionCollapsed,
                    }
                } else {
                    let session = DragSession {
                        region,
                        start_coord: region.axis().coordinate(position),
                        start_size: layout.size,
                    };
                    self.state = DragState::Dragging(session);
                    debug!(%region, start_size = layout.size, "drag started");
                    DragEffect::Started {
                        region,
                        start_size: layout.size,
                    }
                }
            }
            (DragState::Idle, _) => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            },
            (DragState::Dragging(_), DragInput::Down { .. }) => DragEffect::Noop {
                reason: DragNoopReason::ActiveDragAlreadyInProgress,
            },
            (DragState::Dragging(session), DragInput::Move(position)) => {
                let size = self
                    .bounds
                    .clamp(session.region, session.proposed_size(position))?;
                store.set_region_size(session.region, size)?;
                if store.mode() != LayoutMode::Custom
                    && diverges_from_preset(
                        store.mode(),
                        session.region,
                        size,
                        self.custom_mode_epsilon,
                    )
                {
                    store.set_mode(LayoutMode::Custom);
                }
                trace!(region = %session.region, size, "drag resized");
                DragEffect::Resized {
                    region: session.region,
                    size,
                }
            }
            (DragState::Dragging(session), DragInput::Up(_)) => {
                self.release(session, ReleaseReason::PointerUp, store)
            }
            (DragState::Dragging(session), DragInput::Leave(_)) => {
                self.release(session, ReleaseReason::PointerLeave, store)
            }
        };

        Ok(self.record(from, effect))
    }

    /// Unconditionally return to `Idle`.
    ///
    /// Returns `None` if no drag was active.
    pub fn force_release(&mut self, store: &LayoutStore) -> Option<DragTransition> {
        let from = self.state;
        let DragState::Dragging(session) = from else {
            return None;
        };
        self.state = DragState::Idle;
        debug!(region = %session.region, "drag force-released");
        let effect = DragEffect::Released {
            region: session.region,
            reason: ReleaseReason::Programmatic,
            final_size: store.region(session.region).size,
        };
        Some(self.record(from, effect))
    }

    fn release(
        &mut self,
        session: DragSession,
        reason: ReleaseReason,
        store: &LayoutStore,
    ) -> DragEffect {
        self.state = DragState::Idle;
        let final_size = store.region(session.region).size;
        debug!(region = %session.region, ?reason, final_size, "drag released");
        DragEffect::Released {
            region: session.region,
            reason,
            final_size,
        }
    }

    fn record(&mut self, from: DragState, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state,
            effect,
        }
    }
}
