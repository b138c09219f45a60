//! Error types for the hook core.

use crate::native::UioHookResult;
use std::fmt;
use thiserror::Error;

/// The lifecycle action that produced a native failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookAction {
    Starting,
    Stopping,
    Posting,
}

impl fmt::Display for HookAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookAction::Starting => f.write_str("starting"),
            HookAction::Stopping => f.write_str("stopping"),
            HookAction::Posting => f.write_str("posting an event through"),
        }
    }
}

/// Hook-level errors.
#[derive(Debug, Error)]
pub enum HookError {
    /// An entry point was called after the hook was disposed.
    #[error("cannot call {method} - the global hook is disposed")]
    Disposed { method: &'static str },
    /// The native engine returned a non-success code.
    #[error("{message}")]
    Failed {
        action: HookAction,
        code: UioHookResult,
        message: String,
    },
    #[error("the global hook is already running")]
    AlreadyRunning,
    /// A panic unwound out of the hook thread.
    #[error("hook thread panicked: {0}")]
    Panicked(String),
    #[error("failed to spawn hook thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),
    #[error("event of type {0} cannot be posted")]
    NotPostable(String),
}

impl HookError {
    pub(crate) fn failed(action: HookAction, code: UioHookResult) -> Self {
        let message = format!(
            "Failed {} the global hook: {} ({:x})",
            action,
            code,
            code.to_raw()
        );
        HookError::Failed {
            action,
            code,
            message,
        }
    }

    /// The native result code, if this error carries one.
    pub fn code(&self) -> Option<UioHookResult> {
        match self {
            HookError::Failed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type for hook operations.
pub type HookResult<T> = Result<T, HookError>;
