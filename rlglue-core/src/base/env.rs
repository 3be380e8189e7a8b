//! Environment.
use super::{Config, Step};
use anyhow::Result;
use std::fmt::Debug;

/// Represents an environment, typically an MDP.
///
/// The coordinator never looks inside observations or actions; their types
/// are a contract between an environment and the agents acting on it.
/// Every operation must be supplied by the implementation. An environment
/// that deliberately refuses one returns
/// [`GlueError::NotImplemented`](crate::error::GlueError::NotImplemented).
pub trait Env {
    /// Observation of the environment.
    type Obs: Debug;

    /// Action of the environment.
    ///
    /// The coordinator keeps the last action to drive the next step,
    /// so actions must be cloneable.
    type Act: Clone + Debug;

    /// Out-of-band message accepted by [`Env::message`].
    type Msg;

    /// Answer to a message.
    type Reply;

    /// Setup called once when an experiment is initialized.
    ///
    /// When an instance is reused across experiments, this method must reset
    /// its whole internal state.
    fn init(&mut self, config: &Config) -> Result<()>;

    /// Resets the environment to an initial state and returns the first observation.
    fn start(&mut self) -> Result<Self::Obs>;

    /// Performs an environment step with the action of the agent.
    ///
    /// Must not be called after a terminal step without an intervening [`Env::start`].
    fn step(&mut self, act: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Releases resources held by the environment.
    fn cleanup(&mut self) -> Result<()>;

    /// Answers a message.
    ///
    /// Semantics are environment-specific. Unrecognized messages are either
    /// answered in some documented way or rejected with
    /// [`GlueError::UnknownMessage`](crate::error::GlueError::UnknownMessage).
    fn message(&mut self, msg: Self::Msg) -> Result<Self::Reply>;
}
