#![forbid(unsafe_code)]

//! Region identity, resize axes and per-region layout records.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use henu_core::geometry::Point;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundsError;

/// One of the three independently resizable regions.
///
/// The editor is not a region: it takes whatever the center column has left
/// after the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionId {
    Sidebar,
    Terminal,
    #[serde(alias = "right_panel")]
    RightPanel,
}

impl RegionId {
    pub const ALL: [Self; 3] = [Self::Sidebar, Self::Terminal, Self::RightPanel];

    /// Axis along which this region's handle resizes it.
    #[must_use]
    pub const fn axis(self) -> ResizeAxis {
        match self {
            Self::Sidebar | Self::RightPanel => ResizeAxis::Horizontal,
            Self::Terminal => ResizeAxis::Vertical,
        }
    }

    /// Multiplier applied to a pointer delta along [`Self::axis`].
    ///
    /// The sidebar handle sits on its right edge, so dragging right grows it.
    /// The right panel and terminal handles sit on their left/top edges, so
    /// dragging left/up grows them.
    #[must_use]
    pub const fn growth_sign(self) -> f64 {
        match self {
            Self::Sidebar => 1.0,
            Self::Terminal | Self::RightPanel => -1.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sidebar => "sidebar",
            Self::Terminal => "terminal",
            Self::RightPanel => "rightPanel",
        }
    }

    #[must_use]
    pub const fn flag(self) -> CollapseFlags {
        match self {
            Self::Sidebar => CollapseFlags::SIDEBAR,
            Self::Terminal => CollapseFlags::TERMINAL,
            Self::RightPanel => CollapseFlags::RIGHT_PANEL,
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionId {
    type Err = BoundsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sidebar" => Ok(Self::Sidebar),
            "terminal" => Ok(Self::Terminal),
            "rightPanel" | "right_panel" => Ok(Self::RightPanel),
            other => Err(BoundsError::UnknownRegion {
                name: other.to_string(),
            }),
        }
    }
}

/// Resize axis of a region handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeAxis {
    /// Width changes; tracks the pointer's x coordinate.
    Horizontal,
    /// Height changes; tracks the pointer's y coordinate.
    Vertical,
}

impl ResizeAxis {
    /// Project a pointer position onto this axis.
    #[must_use]
    pub const fn coordinate(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }
}

bitflags! {
    /// Which regions are collapsed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CollapseFlags: u8 {
        const SIDEBAR = 0b001;
        const TERMINAL = 0b010;
        const RIGHT_PANEL = 0b100;
    }
}

/// Size and collapse state of a single region.
///
/// `size` is the width (sidebar, right panel) or height (terminal) in device
/// pixels. While `collapsed` the size is not rendered but is kept so that
/// restoring returns to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionLayout {
    pub size: f64,
    pub collapsed: bool,
}

impl RegionLayout {
    #[must_use]
    pub const fn open(size: f64) -> Self {
        Self {
            size,
            collapsed: false,
        }
    }

    #[must_use]
    pub const fn collapsed(size: f64) -> Self {
        Self {
            size,
            collapsed: true,
        }
    }

    /// Size as rendered: zero while collapsed.
    #[must_use]
    pub fn effective_size(&self) -> f64 {
        if self.collapsed { 0.0 } else { self.size }
    }
}

/// One size per region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionSizes {
    pub sidebar: f64,
    pub terminal: f64,
    pub right_panel: f64,
}

impl RegionSizes {
    #[must_use]
    pub const fn new(sidebar: f64, terminal: f64, right_panel: f64) -> Self {
        Self {
            sidebar,
            terminal,
            right_panel,
        }
    }

    #[must_use]
    pub const fn get(&self, region: RegionId) -> f64 {
        match region {
            RegionId::Sidebar => self.sidebar,
            RegionId::Terminal => self.terminal,
            RegionId::RightPanel => self.right_panel,
        }
    }

    pub fn set(&mut self, region: RegionId, size: f64) {
        match region {
            RegionId::Sidebar => self.sidebar = size,
            RegionId::Terminal => self.terminal = size,
            RegionId::RightPanel => self.right_panel = size,
        }
    }
}
