#![forbid(unsafe_code)]

//! Core: pixel geometry and canonical input events.
//!
//! # Role in HENU
//! `henu-core` is the input layer. It owns the device-pixel geometry types
//! and the normalized pointer/viewport events that the layout engine
//! consumes. It knows nothing about regions, presets or drag sessions.
//!
//! # How it fits in the system
//! Hosts (a browser bridge, a test harness, the trace replayer) translate
//! their native events into [`event::PointerEvent`] and
//! [`event::ViewportEvent`] values. `henu-layout` turns those into layout
//! state; `henu-runtime` records and replays them.

pub mod event;
pub mod geometry;

pub use event::{PointerButton, PointerEvent, PointerEventKind, ViewportEvent};
pub use geometry::{Point, Rect, Size};
