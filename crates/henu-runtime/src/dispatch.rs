#![forbid(unsafe_code)]

//! Channel-driven dispatch loop.
//!
//! One consumer thread owns the [`WorkspaceLayout`] and applies messages in
//! delivery order. Producers hold clones of the [`mpsc::Sender`]. After each
//! applied message the fresh [`Composition`] is published on the frame
//! channel; a dropped frame receiver does not stop the loop.
//!
//! The loop ends when every sender is dropped or a
//! [`WorkspaceMsg::Shutdown`] arrives. [`DispatchHandle::join`] then returns
//! the final workspace.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use henu_layout::{Composition, WorkspaceLayout};
use tracing::{debug, warn};

use crate::error::{Result, RuntimeError};
use crate::message::WorkspaceMsg;

/// Outcome of a finished dispatch loop.
#[derive(Debug)]
pub struct DispatchReport {
    pub workspace: WorkspaceLayout,
    pub applied: u64,
    /// Messages rejected by the layout engine (logged and skipped).
    pub rejected: u64,
}

/// Handle to a running dispatch loop.
#[derive(Debug)]
pub struct DispatchHandle {
    sender: mpsc::Sender<WorkspaceMsg>,
    thread: JoinHandle<DispatchReport>,
}

impl DispatchHandle {
    /// A new producer for this loop.
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<WorkspaceMsg> {
        self.sender.clone()
    }

    pub fn send(&self, msg: WorkspaceMsg) -> Result<()> {
        self.sender
            .send(msg)
            .map_err(|_| RuntimeError::Disconnected)
    }

    /// Close this handle's sender and wait for the loop to finish.
    ///
    /// Blocks until every other sender is dropped or a shutdown message
    /// has been processed.
    pub fn join(self) -> Result<DispatchReport> {
        drop(self.sender);
        self.thread
            .join()
            .map_err(|_| RuntimeError::DispatchPanicked)
    }
}

/// Start a dispatch loop owning `workspace`.
///
/// Returns the handle and the receiver of published frames.
pub fn spawn(workspace: WorkspaceLayout) -> Result<(DispatchHandle, mpsc::Receiver<Composition>)> {
    let (sender, inbox) = mpsc::channel();
    let (frames, frame_rx) = mpsc::channel();
    let thread = thread::Builder::new()
        .name("henu-dispatch".into())
        .spawn(move || run_loop(workspace, &inbox, &frames))?;
    Ok((DispatchHandle { sender, thread }, frame_rx))
}

/// Drain `inbox` into `workspace` on the current thread.
pub fn run_loop(
    mut workspace: WorkspaceLayout,
    inbox: &mpsc::Receiver<WorkspaceMsg>,
    frames: &mpsc::Sender<Composition>,
) -> DispatchReport {
    let mut applied = 0_u64;
    let mut rejected = 0_u64;
    let mut publishing = true;

    for msg in inbox.iter() {
        if msg.is_shutdown() {
            debug!("dispatch shutdown requested");
            break;
        }
        match msg.apply(&mut workspace) {
            Ok(()) => {
                applied += 1;
                if publishing && frames.send(workspace.composition().clone()).is_err() {
                    debug!("frame receiver dropped; no longer publishing");
                    publishing = false;
                }
            }
            Err(error) => {
                rejected += 1;
                warn!(%error, ?msg, "message rejected");
            }
        }
    }

    debug!(applied, rejected, "dispatch loop finished");
    DispatchReport {
        workspace,
        applied,
        rejected,
    }
}
