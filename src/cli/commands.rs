//! Command handlers.

use std::path::Path;

use futures::stream;
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::agent::AgentFactory;
use crate::aggregator::{Aggregator, EventSchema, LangGraphSchema, NativeSchema, TurnResult};
use crate::config::PlaygroundConfig;
use crate::error::PlaygroundError;
use crate::prompts::{PromptHub, PromptSource};
use crate::render::{render_turn, LiveRenderer};
use crate::session::{ConversationTurn, Session};
use crate::supervisor::Supervisor;
use crate::team::{assemble_team, TeamOverrides, TeamRole, TeamSettings};
use crate::tools::ToolRegistry;

use super::{AskArgs, ChatArgs, Cli, Commands, EventFormat, ReplayArgs, TeamArgs};

pub async fn run(cli: Cli) -> Result<(), PlaygroundError> {
    match cli.command {
        Commands::Chat(args) => handle_chat(args).await,
        Commands::Ask(args) => handle_ask(args).await,
        Commands::Replay(args) => handle_replay(args).await,
        Commands::Tools => {
            handle_tools();
            Ok(())
        }
        Commands::Models => {
            handle_models();
            Ok(())
        }
    }
}

async fn build_team(args: &TeamArgs) -> Result<Supervisor, PlaygroundError> {
    let settings = match &args.config {
        Some(path) => TeamSettings::from_overrides(TeamOverrides::load(path)?),
        None => TeamSettings::default(),
    };
    let config = PlaygroundConfig::from_env();
    let hub = config
        .has_credentials("langsmith")
        .then(|| PromptHub::new(config.clone()));
    let factory = AgentFactory::from_config(config);
    assemble_team(
        &factory,
        &settings,
        hub.as_ref().map(|hub| hub as &dyn PromptSource),
    )
    .await
}

async fn run_turn(session: &mut Session, supervisor: &Supervisor, input: &str, show_tools: bool) {
    let mut live = LiveRenderer::stdout(show_tools);
    let turn = session
        .submit(input, supervisor, &mut |update| live.on_update(update))
        .await;
    live.finish(turn);
}

async fn handle_chat(args: ChatArgs) -> Result<(), PlaygroundError> {
    let supervisor = build_team(&args.team).await?;
    let show_tools = !args.team.hide_tools;
    let mut session = Session::new("cli");

    println!("Chatting with {} (/clear to reset, /exit to quit)", supervisor.name());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        match input {
            "" => continue,
            "/exit" | "/quit" => break,
            "/clear" => {
                session.clear();
                println!("History cleared.");
            }
            _ => run_turn(&mut session, &supervisor, input, show_tools).await,
        }
    }
    Ok(())
}

async fn handle_ask(args: AskArgs) -> Result<(), PlaygroundError> {
    let supervisor = build_team(&args.team).await?;
    let mut session = Session::new("ask");
    run_turn(&mut session, &supervisor, &args.prompt, !args.team.hide_tools).await;
    Ok(())
}

async fn handle_replay(args: ReplayArgs) -> Result<(), PlaygroundError> {
    let result = match args.format {
        EventFormat::Native => replay_with(&args.path, NativeSchema).await?,
        EventFormat::Langgraph => replay_with(&args.path, LangGraphSchema).await?,
    };
    println!("{}", render_turn(&ConversationTurn::from(result), !args.hide_tools));
    Ok(())
}

/// Aggregate a JSON Lines event log. A line that fails to parse fails the
/// turn the same way a broken live stream would.
async fn replay_with<S>(path: &Path, schema: S) -> Result<TurnResult, PlaygroundError>
where
    S: EventSchema,
    S::Event: serde::de::DeserializeOwned,
{
    let source = tokio::fs::read_to_string(path).await?;
    let events: Vec<Result<S::Event, serde_json::Error>> = source
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect();

    Ok(Aggregator::new(schema)
        .aggregate(stream::iter(events), &mut |_| {})
        .await)
}

fn handle_tools() {
    let registry = ToolRegistry::with_builtin_tools(&PlaygroundConfig::new());
    for name in registry.names() {
        if let Some(tool) = registry.get(name) {
            println!("{name:<24} {}", tool.description());
        }
    }
}

fn handle_models() {
    for role in TeamRole::iter() {
        println!("{} ({})", role, role.agent_name());
        for model in role.allowed_models() {
            println!("  {model}");
        }
    }
}
