//! CLI entry point for the playground.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Supervisor/sub-agent chat playground
#[derive(Parser, Debug)]
#[command(name = "playground", version, about = "Chat with a supervisor and its sub-agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat with the supervisor team
    Chat(ChatArgs),
    /// Ask a single question and exit
    Ask(AskArgs),
    /// Aggregate a recorded event log (one JSON event per line)
    Replay(ReplayArgs),
    /// List the built-in tools
    Tools,
    /// List the models each team role may use
    Models,
}

/// Options shared by commands that run the team.
#[derive(Parser, Debug, Clone, Default)]
pub struct TeamArgs {
    /// TOML file overriding team settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not print tool calls and results
    #[arg(long)]
    pub hide_tools: bool,
}

#[derive(Parser, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub team: TeamArgs,
}

#[derive(Parser, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub team: TeamArgs,

    /// The question
    pub prompt: String,
}

#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// JSON Lines file of recorded events
    pub path: PathBuf,

    /// Format of the recorded events
    #[arg(long, value_enum, default_value_t = EventFormat::Native)]
    pub format: EventFormat,

    /// Do not print tool calls and results
    #[arg(long)]
    pub hide_tools: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventFormat {
    /// Events written by this crate's agents
    Native,
    /// LangGraph `astream_events` records
    Langgraph,
}
