#![forbid(unsafe_code)]

use henu_layout::{ConfigValidationError, LayoutError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigValidationError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("invalid trace at line {line}: {message}")]
    Trace { line: usize, message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("dispatch loop has stopped")]
    Disconnected,

    #[error("dispatch thread panicked")]
    DispatchPanicked,
}

impl RuntimeError {
    /// Process exit code for the CLI.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn trace(line: usize, message: impl Into<String>) -> Self {
        Self::Trace {
            line,
            message: message.into(),
        }
    }
}
