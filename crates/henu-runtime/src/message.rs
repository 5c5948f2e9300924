#![forbid(unsafe_code)]

//! Inbound workspace messages.

use henu_core::event::{PointerEvent, ViewportEvent};
use henu_layout::{
    CenterFocus, LayoutError, LayoutMode, RegionId, RightPanelContent, WorkspaceLayout,
};
use serde::{Deserialize, Serialize};

/// One action delivered to a workspace session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg", rename_all = "snake_case")]
pub enum WorkspaceMsg {
    Pointer(PointerEvent),
    Viewport(ViewportEvent),
    SelectPreset { mode: LayoutMode },
    ResetLayout,
    SetCollapsed { region: RegionId, collapsed: bool },
    ToggleCollapsed { region: RegionId },
    SetRightContent { content: RightPanelContent },
    ToggleRightContent,
    SetFocus { focus: CenterFocus },
    /// Stops a dispatch loop or replay; no layout effect.
    Shutdown,
}

impl WorkspaceMsg {
    #[must_use]
    pub const fn is_shutdown(&self) -> bool {
        matches!(self, Self::Shutdown)
    }

    /// Apply to `workspace`.
    pub fn apply(self, workspace: &mut WorkspaceLayout) -> Result<(), LayoutError> {
        match self {
            Self::Pointer(event) => {
                workspace.pointer(event)?;
            }
            Self::Viewport(event) => {
                workspace.resize_viewport(event.size())?;
            }
            Self::SelectPreset { mode } => {
                workspace.select_preset(mode);
            }
            Self::ResetLayout => {
                workspace.reset_layout();
            }
            Self::SetCollapsed { region, collapsed } => {
                workspace.set_collapsed(region, collapsed);
            }
            Self::ToggleCollapsed { region } => {
                workspace.toggle_collapsed(region);
            }
            Self::SetRightContent { content } => workspace.set_right_content(content),
            Self::ToggleRightContent => {
                workspace.toggle_right_content();
            }
            Self::SetFocus { focus } => workspace.set_focus(focus),
            Self::Shutdown => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use henu_core::geometry::Size;

    #[test]
    fn json_shape() {
        let msg = WorkspaceMsg::SetCollapsed {
            region: RegionId::RightPanel,
            collapsed: true,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            json,
            r#"{"msg":"set_collapsed","region":"rightPanel","collapsed":true}"#
        );
        let back: WorkspaceMsg = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn pointer_message_parses() {
        let msg: WorkspaceMsg = serde_json::from_str(
            r#"{"msg":"pointer","kind":{"kind":"down","button":"primary"},"x":302.0,"y":10.0}"#,
        )
        .unwrap();
        assert_eq!(msg, WorkspaceMsg::Pointer(PointerEvent::down(302.0, 10.0)));
    }

    #[test]
    fn apply_drives_workspace() {
        let mut workspace = WorkspaceLayout::with_defaults(Size::new(1400.0, 900.0)).unwrap();
        WorkspaceMsg::SelectPreset {
            mode: LayoutMode::Code,
        }
        .apply(&mut workspace)
        .unwrap();
        assert_eq!(workspace.state().mode, LayoutMode::Code);

        WorkspaceMsg::Viewport(ViewportEvent::new(1000.0, 700.0))
            .apply(&mut workspace)
            .unwrap();
        assert_eq!(workspace.state().sidebar.size, 240.0);

        let err = WorkspaceMsg::Pointer(PointerEvent::moved(f64::NAN, 0.0))
            .apply(&mut workspace)
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidPointer { .. }));
    }
}
