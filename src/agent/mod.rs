//! Agents: configuration, the tool loop, and the factory that builds them.

#[allow(clippy::module_inception)]
pub mod agent;
pub mod config;
pub mod factory;
mod runner;

pub use agent::{Agent, AgentOutput, DEFAULT_RECURSION_LIMIT};
pub use config::AgentConfig;
pub use factory::AgentFactory;
