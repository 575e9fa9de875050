//! Playground: supervisor/sub-agent chat orchestration.
//!
//! A supervisor agent routes each user turn to scrape, research and writing
//! sub-agents through handoff tools. Every step is reported as an
//! [`events::AgentEvent`]; an [`aggregator::Aggregator`] folds a turn's events
//! into one [`aggregator::TurnResult`] that a [`session::Session`] records.
//!
//! # Quick Start
//!
//! ```no_run
//! use playground::prelude::*;
//!
//! # async fn example() -> playground::error::Result<()> {
//! let factory = AgentFactory::from_config(PlaygroundConfig::from_env());
//! let supervisor = assemble_team(&factory, &TeamSettings::default(), None).await?;
//!
//! let mut session = Session::new("demo");
//! let turn = session
//!     .submit("Summarize today's Rust news", &supervisor, &mut |_| {})
//!     .await;
//! println!("{}", turn.text);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod aggregator;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod prelude;
pub mod prompts;
pub mod provider;
pub mod render;
pub mod session;
pub mod supervisor;
pub mod team;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
