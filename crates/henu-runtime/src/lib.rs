#![forbid(unsafe_code)]

//! Runtime plumbing around the HENU layout engine.
//!
//! - [`config`]: TOML/JSON configuration for the engine and logging.
//! - [`logging`]: `tracing-subscriber` setup.
//! - [`message`]: the inbound [`WorkspaceMsg`] vocabulary.
//! - [`dispatch`]: single-consumer loop applying messages on its own thread.
//! - [`trace`]: JSONL recording and deterministic replay.
//! - [`cli`]: the `henu-replay` command.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod message;
pub mod trace;

pub use config::{LogFormat, LoggingConfig, RuntimeConfig};
pub use dispatch::{DispatchHandle, DispatchReport};
pub use error::{Result, RuntimeError};
pub use message::WorkspaceMsg;
pub use trace::{TraceFile, TraceRecord, TraceWriter, replay_trace, replay_trace_with};
