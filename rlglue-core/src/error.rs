//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum GlueError {
    /// An agent or environment does not provide the operation.
    #[error("Operation not implemented: {0}")]
    NotImplemented(String),

    /// An agent or environment does not understand the message.
    #[error("Unknown message: {0}")]
    UnknownMessage(String),

    /// The coordinator was used before `rl_init`.
    #[error("Coordinator is not initialized, call rl_init first")]
    NotInitialized,

    /// `rl_step` was called without an action from `rl_start`.
    #[error("No action to step the environment with, call rl_start first")]
    NoLastAction,

    /// `rl_step` was called after the episode had terminated.
    #[error("Episode has ended, call rl_start to begin a new one")]
    EpisodeEnded,

    /// Config key error.
    #[error("Config key error: {0}")]
    ConfigKeyError(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
