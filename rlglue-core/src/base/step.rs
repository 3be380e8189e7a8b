//! Environment step.
use super::Env;
use std::fmt;

/// Represents a transition result `(r_t, o_t+1, terminal)` emitted by [`Env::step`].
pub struct Step<E: Env> {
    /// Reward.
    pub reward: f64,

    /// Observation.
    pub obs: E::Obs,

    /// Flag denoting if the episode has ended.
    ///
    /// No further steps are valid until the environment is started again.
    pub is_terminal: bool,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(reward: f64, obs: E::Obs, is_terminal: bool) -> Self {
        Step {
            reward,
            obs,
            is_terminal,
        }
    }

    /// Constructs a non-terminal [`Step`] object.
    pub fn transition(reward: f64, obs: E::Obs) -> Self {
        Self::new(reward, obs, false)
    }

    /// Constructs a terminal [`Step`] object.
    pub fn terminal(reward: f64, obs: E::Obs) -> Self {
        Self::new(reward, obs, true)
    }
}

impl<E: Env> fmt::Debug for Step<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("reward", &self.reward)
            .field("obs", &self.obs)
            .field("is_terminal", &self.is_terminal)
            .finish()
    }
}
