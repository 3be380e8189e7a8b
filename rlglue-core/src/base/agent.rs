//! Agent.
use super::{Config, Env};
use anyhow::Result;

/// Represents the decision side of an experiment on environment `E`.
///
/// Mirrors [`Env`]: every operation must be supplied by the implementation.
pub trait Agent<E: Env> {
    /// Out-of-band message accepted by [`Agent::message`].
    type Msg;

    /// Answer to a message.
    type Reply;

    /// Setup called once when an experiment is initialized,
    /// after the environment has been initialized.
    fn init(&mut self, config: &Config) -> Result<()>;

    /// Takes the first action of an episode given the observation
    /// returned by [`Env::start`].
    fn start(&mut self, obs: &E::Obs) -> Result<E::Act>;

    /// Takes an action given the reward for the last action and the
    /// observation where the agent ended up.
    fn step(&mut self, reward: f64, obs: &E::Obs) -> Result<E::Act>;

    /// Called exactly once per episode, in place of [`Agent::step`],
    /// with the reward for entering the terminal state.
    fn end(&mut self, reward: f64) -> Result<()>;

    /// Releases resources held by the agent.
    fn cleanup(&mut self) -> Result<()>;

    /// Answers a message, e.g., a request for the current value estimates.
    fn message(&mut self, msg: Self::Msg) -> Result<Self::Reply>;
}
