#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! These are the host-agnostic events the layout engine consumes. A browser
//! bridge maps `mousedown`/`mousemove`/`mouseup` on the window and
//! `mouseleave` of the document onto [`PointerEventKind`]; container resize
//! observations become [`ViewportEvent`].
//!
//! # Design Notes
//!
//! - Coordinates are viewport-relative device pixels (fractional allowed).
//! - `Leave` carries the last known position; it is the fail-safe signal for
//!   releases that happen outside the tracked element. Hosts without a
//!   position pass NaN, which serializes as `null` and reads back as NaN.

use serde::{Deserialize, Deserializer, Serialize};

use crate::geometry::{Point, Size};

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Primary button (left mouse, touch contact, pen tip).
    #[default]
    Primary,
    /// Secondary button (right mouse).
    Secondary,
    /// Auxiliary button (wheel click).
    Auxiliary,
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "button", rename_all = "snake_case")]
pub enum PointerEventKind {
    /// Button pressed down.
    Down(PointerButton),
    /// Pointer moved (with or without a button held).
    Move,
    /// Button released anywhere in the viewport.
    Up(PointerButton),
    /// Pointer left the viewport bounds.
    Leave,
}

/// A pointer event with viewport-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    #[serde(deserialize_with = "nullable_coord")]
    pub x: f64,
    #[serde(deserialize_with = "nullable_coord")]
    pub y: f64,
}

fn nullable_coord<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }

    /// Primary-button press at `(x, y)`.
    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), x, y)
    }

    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Primary-button release at `(x, y)`.
    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), x, y)
    }

    #[must_use]
    pub const fn leave(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Leave, x, y)
    }

    /// Get the position as a point.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Container/viewport resize notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportEvent {
    pub width: f64,
    pub height: f64,
}

impl ViewportEvent {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
