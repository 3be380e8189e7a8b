#![warn(missing_docs)]
//! Agent/environment experiment harness for reinforcement learning.
//!
//! The crate decouples an agent from an environment behind a fixed set of
//! lifecycle operations. [`Env`] and [`Agent`] are the two contracts, and
//! [`Glue`] is the coordinator that owns one of each, drives their
//! interaction and keeps episode statistics.
//!
//! ```ignore
//! let mut glue = Glue::build(GridEnv::default, TdAgent::default);
//! glue.rl_init(&agent_config, &env_config)?;
//!
//! for _ in 0..n_episodes {
//!     glue.rl_episode(max_steps)?;
//!     recorder.write(glue.record());
//! }
//! glue.rl_cleanup()?;
//! ```
pub mod dummy;
pub mod error;
pub mod record;

mod base;
pub use base::{Agent, Config, Env, Step};

mod glue;
pub use glue::{Glue, GlueState, GlueStep};
