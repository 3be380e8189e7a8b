//! Coordinator of an agent and an environment.
use crate::{
    error::GlueError,
    record::{Record, RecordValue::Scalar},
    Agent, Config, Env, Step,
};
use anyhow::Result;
use log::{debug, info, trace};
use std::fmt;

/// Lifecycle of a [`Glue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlueState {
    /// Constructed or cleaned up; `rl_init` is the only valid next call.
    Uninitialized,

    /// Initialized, no episode has been started yet.
    Ready,

    /// An episode is running.
    InEpisode,

    /// The environment reported a terminal step.
    EpisodeEnded,
}

/// Result of [`Glue::rl_step`].
pub struct GlueStep<E: Env> {
    /// Reward of the transition.
    pub reward: f64,

    /// Observation after the transition.
    pub obs: E::Obs,

    /// Next action of the agent, `None` if the transition was terminal.
    pub act: Option<E::Act>,

    /// Flag denoting if the episode has ended.
    pub is_terminal: bool,
}

impl<E: Env> fmt::Debug for GlueStep<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlueStep")
            .field("reward", &self.reward)
            .field("obs", &self.obs)
            .field("act", &self.act)
            .field("is_terminal", &self.is_terminal)
            .finish()
    }
}

/// Glues together an agent and an environment.
///
/// A [`Glue`] owns exactly one agent and one environment for its whole
/// lifetime. It drives their interaction and keeps the statistics of the
/// run: the cumulative reward since the last reset, the number of
/// non-terminal steps and the number of finished episodes.
///
/// The interaction of one episode looks like following:
///
/// ```text
/// rl_start:  Env::start -> obs -> Agent::start -> act
/// rl_step:   Env::step(act) -> (r, obs, terminal)
///              non-terminal: Agent::step(r, obs) -> act
///              terminal:     Agent::end(r)
/// ```
///
/// Each call goes straight into the agent or the environment; nothing is
/// buffered. Parallel experiments use independent [`Glue`] values.
pub struct Glue<E, A>
where
    E: Env,
    A: Agent<E>,
{
    env: E,
    agent: A,
    total_reward: f64,
    num_steps: usize,
    num_episodes: usize,
    last_action: Option<E::Act>,
    state: GlueState,
}

impl<E, A> Glue<E, A>
where
    E: Env,
    A: Agent<E>,
{
    /// Constructs a coordinator owning the given environment and agent.
    pub fn new(env: E, agent: A) -> Self {
        Self {
            env,
            agent,
            total_reward: 0.0,
            num_steps: 0,
            num_episodes: 0,
            last_action: None,
            state: GlueState::Uninitialized,
        }
    }

    /// Constructs a coordinator from factories of the environment and the agent.
    ///
    /// Each factory is called exactly once.
    pub fn build<FE, FA>(env_fn: FE, agent_fn: FA) -> Self
    where
        FE: FnOnce() -> E,
        FA: FnOnce() -> A,
    {
        Self::new(env_fn(), agent_fn())
    }

    fn check_initialized(&self) -> Result<()> {
        match self.state {
            GlueState::Uninitialized => Err(GlueError::NotInitialized.into()),
            _ => Ok(()),
        }
    }

    /// Accumulates the reward and counts the step or the episode.
    fn count(&mut self, step: &Step<E>) {
        self.total_reward += step.reward;

        if step.is_terminal {
            self.num_episodes += 1;
            self.state = GlueState::EpisodeEnded;
            info!(
                "Episode {} ended, return = {}, steps = {}",
                self.num_episodes, self.total_reward, self.num_steps
            );
        } else {
            self.num_steps += 1;
        }
    }

    /// Initializes the environment, then the agent, and resets the statistics.
    pub fn rl_init(&mut self, agent_config: &Config, env_config: &Config) -> Result<()> {
        self.env.init(env_config)?;
        self.agent.init(agent_config)?;

        self.total_reward = 0.0;
        self.num_steps = 0;
        self.num_episodes = 0;
        self.last_action = None;
        self.state = GlueState::Ready;
        info!("Initialized environment and agent");

        Ok(())
    }

    /// Starts an episode.
    ///
    /// Feeds the first observation of the environment to the agent and
    /// keeps the agent's action for the next [`Glue::rl_step`].
    pub fn rl_start(&mut self) -> Result<(E::Obs, E::Act)> {
        self.check_initialized()?;

        let obs = self.env.start()?;
        let act = self.agent.start(&obs)?;
        debug!("Started episode {}", self.num_episodes + 1);
        trace!("obs = {:?}, act = {:?}", obs, act);

        self.last_action = Some(act.clone());
        self.state = GlueState::InEpisode;

        Ok((obs, act))
    }

    /// Starts only the environment.
    ///
    /// Resets the return to `0` and the number of steps to `1`. Used with
    /// [`Glue::rl_agent_start`] and [`Glue::rl_env_step`] by callers driving
    /// the agent themselves. The stored action is cleared, so
    /// [`Glue::rl_step`] cannot follow this call directly.
    pub fn rl_env_start(&mut self) -> Result<E::Obs> {
        self.check_initialized()?;

        self.total_reward = 0.0;
        self.num_steps = 1;

        let obs = self.env.start()?;
        trace!("obs = {:?}", obs);

        self.last_action = None;
        self.state = GlueState::InEpisode;

        Ok(obs)
    }

    /// Starts the agent with the given observation.
    pub fn rl_agent_start(&mut self, obs: &E::Obs) -> Result<E::Act> {
        self.agent.start(obs)
    }

    /// Takes a step of the agent, without bookkeeping.
    pub fn rl_agent_step(&mut self, reward: f64, obs: &E::Obs) -> Result<E::Act> {
        self.agent.step(reward, obs)
    }

    /// Ends the episode of the agent, without bookkeeping.
    pub fn rl_agent_end(&mut self, reward: f64) -> Result<()> {
        self.agent.end(reward)
    }

    /// Takes a step of the environment only.
    ///
    /// The statistics are updated as in [`Glue::rl_step`], but the agent is
    /// not called.
    pub fn rl_env_step(&mut self, act: &E::Act) -> Result<Step<E>> {
        self.check_initialized()?;

        let step = self.env.step(act)?;
        trace!("{:?}", step);
        self.count(&step);

        Ok(step)
    }

    /// Takes a step of the environment with the last action of the agent,
    /// then either a step of the agent or the end of its episode.
    ///
    /// The stored action is updated only on non-terminal steps. After a
    /// terminal step a new episode must be begun with [`Glue::rl_start`].
    pub fn rl_step(&mut self) -> Result<GlueStep<E>> {
        let act = match self.state {
            GlueState::EpisodeEnded => return Err(GlueError::EpisodeEnded.into()),
            _ => self.last_action.as_ref().ok_or(GlueError::NoLastAction)?,
        };

        let step = self.env.step(act)?;
        trace!("{:?}", step);
        self.count(&step);

        let Step {
            reward,
            obs,
            is_terminal,
        } = step;

        if is_terminal {
            self.agent.end(reward)?;

            Ok(GlueStep {
                reward,
                obs,
                act: None,
                is_terminal,
            })
        } else {
            let act = self.agent.step(reward, &obs)?;
            self.last_action = Some(act.clone());

            Ok(GlueStep {
                reward,
                obs,
                act: Some(act),
                is_terminal,
            })
        }
    }

    /// Cleans up the environment, then the agent.
    pub fn rl_cleanup(&mut self) -> Result<()> {
        self.env.cleanup()?;
        self.agent.cleanup()?;

        self.last_action = None;
        self.state = GlueState::Uninitialized;
        info!(
            "Cleaned up after {} episodes, return = {}",
            self.num_episodes, self.total_reward
        );

        Ok(())
    }

    /// Sends a message to the agent and returns its answer.
    pub fn rl_agent_message(&mut self, msg: A::Msg) -> Result<A::Reply> {
        self.agent.message(msg)
    }

    /// Sends a message to the environment and returns its answer.
    pub fn rl_env_message(&mut self, msg: E::Msg) -> Result<E::Reply> {
        self.env.message(msg)
    }

    /// Runs an episode.
    ///
    /// Steps until the episode terminates or the number of steps reaches
    /// `max_steps`. `max_steps == 0` means no limit. Returns `true` if the
    /// environment terminated the episode, `false` if it was cut off.
    pub fn rl_episode(&mut self, max_steps: usize) -> Result<bool> {
        let mut is_terminal = false;

        self.rl_start()?;

        while !is_terminal && (max_steps == 0 || self.num_steps < max_steps) {
            is_terminal = self.rl_step()?.is_terminal;
        }

        Ok(is_terminal)
    }

    /// The total reward.
    pub fn rl_return(&self) -> f64 {
        self.total_reward
    }

    /// The number of non-terminal steps.
    pub fn rl_num_steps(&self) -> usize {
        self.num_steps
    }

    /// The number of finished episodes.
    pub fn rl_num_episodes(&self) -> usize {
        self.num_episodes
    }

    /// The current lifecycle state.
    pub fn state(&self) -> GlueState {
        self.state
    }

    /// Returns the statistics of the run as a [`Record`].
    pub fn record(&self) -> Record {
        Record::from_slice(&[
            ("return", Scalar(self.total_reward)),
            ("num_steps", Scalar(self.num_steps as f64)),
            ("num_episodes", Scalar(self.num_episodes as f64)),
        ])
    }

    /// Returns a reference to the environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Returns a reference to the agent.
    pub fn agent(&self) -> &A {
        &self.agent
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dummy::{ChainEnv, EchoAgent};
    use test_log::test;

    fn glue(len: usize) -> Result<Glue<ChainEnv, EchoAgent>> {
        let mut glue = Glue::new(ChainEnv::new(len), EchoAgent::default());
        glue.rl_init(&Config::default(), &Config::default())?;
        Ok(glue)
    }

    #[test]
    fn test_lifecycle_states() -> Result<()> {
        let mut glue = Glue::new(ChainEnv::new(2), EchoAgent::default());
        assert_eq!(glue.state(), GlueState::Uninitialized);

        glue.rl_init(&Config::default(), &Config::default())?;
        assert_eq!(glue.state(), GlueState::Ready);

        glue.rl_start()?;
        assert_eq!(glue.state(), GlueState::InEpisode);

        glue.rl_step()?;
        assert_eq!(glue.state(), GlueState::InEpisode);

        assert!(glue.rl_step()?.is_terminal);
        assert_eq!(glue.state(), GlueState::EpisodeEnded);

        glue.rl_start()?;
        assert_eq!(glue.state(), GlueState::InEpisode);

        glue.rl_cleanup()?;
        assert_eq!(glue.state(), GlueState::Uninitialized);
        Ok(())
    }

    #[test]
    fn test_step_before_start() -> Result<()> {
        let mut glue = glue(3)?;
        let err = glue.rl_step().unwrap_err();
        assert_eq!(
            err.downcast_ref::<GlueError>(),
            Some(&GlueError::NoLastAction)
        );
        Ok(())
    }

    #[test]
    fn test_step_after_terminal() -> Result<()> {
        let mut glue = glue(1)?;
        glue.rl_start()?;
        assert!(glue.rl_step()?.is_terminal);

        let err = glue.rl_step().unwrap_err();
        assert_eq!(
            err.downcast_ref::<GlueError>(),
            Some(&GlueError::EpisodeEnded)
        );
        Ok(())
    }

    #[test]
    fn test_start_before_init() {
        let mut glue = Glue::new(ChainEnv::new(3), EchoAgent::default());
        for err in [
            glue.rl_start().map(|_| ()).unwrap_err(),
            glue.rl_env_start().map(|_| ()).unwrap_err(),
            glue.rl_env_step(&1).map(|_| ()).unwrap_err(),
            glue.rl_episode(0).map(|_| ()).unwrap_err(),
        ] {
            assert_eq!(
                err.downcast_ref::<GlueError>(),
                Some(&GlueError::NotInitialized)
            );
        }
    }

    #[test]
    fn test_step_after_env_start() -> Result<()> {
        let mut glue = glue(3)?;
        glue.rl_env_start()?;
        assert!(glue.rl_step().is_err());
        Ok(())
    }

    #[test]
    fn test_record() -> Result<()> {
        let mut glue = glue(4)?;
        glue.rl_episode(0)?;

        let record = glue.record();
        assert_eq!(record.get_scalar("return")?, 4.0);
        assert_eq!(record.get_scalar("num_steps")?, 3.0);
        assert_eq!(record.get_scalar("num_episodes")?, 1.0);
        Ok(())
    }
}
