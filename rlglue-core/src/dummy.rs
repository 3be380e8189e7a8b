//! This module is used for tests.
//!
//! [`ChainEnv`] moves along a chain of states and terminates at its end;
//! [`EchoAgent`] answers every observation with the same number. Both append
//! the name of every call to a shared [`CallLog`], so tests can check the
//! order in which the coordinator calls them.
use crate::{error::GlueError, Agent, Config, Env, Step};
use anyhow::Result;
use std::{cell::RefCell, rc::Rc};

/// Names of the calls made to [`ChainEnv`] and [`EchoAgent`], in call order.
pub type CallLog = Rc<RefCell<Vec<String>>>;

fn push(log: &Option<CallLog>, name: &str) {
    if let Some(log) = log {
        log.borrow_mut().push(name.to_string());
    }
}

/// A chain of states `0, 1, ..., len`.
///
/// Every step moves one state ahead and yields the reward set with the
/// `"reward"` key of the config (`1.0` by default). The step reaching state
/// `len` is terminal. An endless chain never terminates.
#[derive(Debug, Clone)]
pub struct ChainEnv {
    len: Option<usize>,
    reward: f64,
    pos: usize,
    log: Option<CallLog>,
}

impl ChainEnv {
    /// A chain terminating on the `len`-th step.
    pub fn new(len: usize) -> Self {
        Self {
            len: Some(len),
            reward: 1.0,
            pos: 0,
            log: None,
        }
    }

    /// A chain that never terminates.
    pub fn endless() -> Self {
        Self {
            len: None,
            ..Self::new(0)
        }
    }

    /// Logs the calls to the given log.
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }

    /// The current state.
    pub fn pos(&self) -> usize {
        self.pos
    }
}

impl Env for ChainEnv {
    type Obs = usize;
    type Act = i64;
    type Msg = String;
    type Reply = String;

    fn init(&mut self, config: &Config) -> Result<()> {
        push(&self.log, "env_init");
        self.reward = config.get_or("reward", 1.0)?;
        self.pos = 0;
        Ok(())
    }

    fn start(&mut self) -> Result<usize> {
        push(&self.log, "env_start");
        self.pos = 0;
        Ok(self.pos)
    }

    fn step(&mut self, _act: &i64) -> Result<Step<Self>> {
        push(&self.log, "env_step");
        self.pos += 1;
        let is_terminal = self.len.map_or(false, |len| self.pos >= len);
        Ok(Step::new(self.reward, self.pos, is_terminal))
    }

    fn cleanup(&mut self) -> Result<()> {
        push(&self.log, "env_cleanup");
        Ok(())
    }

    fn message(&mut self, msg: String) -> Result<String> {
        match msg.as_str() {
            "position" => Ok(self.pos.to_string()),
            _ => Err(GlueError::UnknownMessage(msg).into()),
        }
    }
}

/// An agent taking the observed state as its action.
///
/// Keeps the rewards it received at the end of each episode.
#[derive(Debug, Clone, Default)]
pub struct EchoAgent {
    /// Reward passed to each call of [`Agent::end`].
    pub end_rewards: Vec<f64>,

    /// Number of calls of [`Agent::step`].
    pub num_steps: usize,

    log: Option<CallLog>,
}

impl EchoAgent {
    /// Logs the calls to the given log.
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }
}

impl Agent<ChainEnv> for EchoAgent {
    type Msg = String;
    type Reply = String;

    fn init(&mut self, _config: &Config) -> Result<()> {
        push(&self.log, "agent_init");
        self.end_rewards.clear();
        self.num_steps = 0;
        Ok(())
    }

    fn start(&mut self, obs: &usize) -> Result<i64> {
        push(&self.log, "agent_start");
        Ok(*obs as i64)
    }

    fn step(&mut self, _reward: f64, obs: &usize) -> Result<i64> {
        push(&self.log, "agent_step");
        self.num_steps += 1;
        Ok(*obs as i64)
    }

    fn end(&mut self, reward: f64) -> Result<()> {
        push(&self.log, "agent_end");
        self.end_rewards.push(reward);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        push(&self.log, "agent_cleanup");
        Ok(())
    }

    fn message(&mut self, msg: String) -> Result<String> {
        match msg.as_str() {
            "num_episodes" => Ok(self.end_rewards.len().to_string()),
            _ => Err(GlueError::UnknownMessage(msg).into()),
        }
    }
}
