//! Contracts between the coordinator, agents and environments.
mod agent;
mod config;
mod env;
mod step;
pub use agent::Agent;
pub use config::Config;
pub use env::Env;
pub use step::Step;
