#![warn(missing_docs)]
//! Diagnostics of value functions on grid worlds.
//!
//! [`ValueDiagnostics`] turns the flat value estimates of an agent into a
//! value table of the grid, pairs it with the arrows of a [`PolicyTable`]
//! and, given the true values, measures the root mean squared value error
//! (RMSVE). The results are [`Record`](rlglue_core::record::Record)s, so any
//! [`Recorder`](rlglue_core::record::Recorder) can display them.
//!
//! The diagnostics are driven by the caller of the experiment, alongside the
//! [`Glue`](rlglue_core::Glue):
//!
//! ```ignore
//! let mut diag = ValueDiagnostics::new(&env_config, policy)?.with_true_values(true_values)?;
//! for episode in 1..=n_episodes {
//!     glue.rl_episode(0)?;
//!     let values = glue.rl_agent_message(ValuesRequest)?;
//!     recorder.write(diag.visualize(&values, episode)?);
//! }
//! diag.run_tests(&values, 0.1)?;
//! ```
mod diagnostics;
mod error;
mod grid;
mod policy;
pub use diagnostics::ValueDiagnostics;
pub use error::DiagnosticsError;
pub use grid::GridShape;
pub use policy::{GridAction, PolicyTable};
