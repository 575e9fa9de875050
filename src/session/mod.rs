//! Conversation sessions: history of turns and per-turn aggregation.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::aggregator::{Aggregator, NativeSchema, ToolCallRecord, ToolResultRecord, TurnResult, TurnUpdate};
use crate::error::PlaygroundError;
use crate::events::AgentEvent;
use crate::supervisor::Supervisor;
use crate::types::ModelMessage;

/// Stream of events produced by one turn.
pub type TurnEventStream = BoxStream<'static, Result<AgentEvent, PlaygroundError>>;

/// Anything a session can send a conversation to.
#[async_trait]
pub trait TurnRunner: Send + Sync {
    fn name(&self) -> &str;

    /// Start processing `history`; events arrive on the returned stream.
    async fn start_turn(&self, history: Vec<ModelMessage>) -> Result<TurnEventStream, PlaygroundError>;
}

#[async_trait]
impl TurnRunner for Agent {
    fn name(&self) -> &str {
        Agent::name(self)
    }

    async fn start_turn(&self, history: Vec<ModelMessage>) -> Result<TurnEventStream, PlaygroundError> {
        // Surface missing credentials before any event is produced.
        (self.provider_factory)(self.model(), &self.config)?;
        Ok(self.stream(history))
    }
}

#[async_trait]
impl TurnRunner for Supervisor {
    fn name(&self) -> &str {
        Supervisor::name(self)
    }

    async fn start_turn(&self, history: Vec<ModelMessage>) -> Result<TurnEventStream, PlaygroundError> {
        self.agent().start_turn(history).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One entry of the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
    pub tool_calls: Vec<ToolCallRecord>,
    pub tool_results: Vec<ToolResultRecord>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            ..Self::user(text)
        }
    }
}

impl From<TurnResult> for ConversationTurn {
    fn from(result: TurnResult) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: result.text,
            tool_calls: result.tool_calls,
            tool_results: result.tool_results,
        }
    }
}

/// A single conversation. Turns are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct Session {
    id: String,
    turns: Vec<ConversationTurn>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// History in model form: user messages and non-empty assistant answers.
    pub fn model_history(&self) -> Vec<ModelMessage> {
        self.turns
            .iter()
            .filter(|turn| !turn.text.is_empty())
            .map(|turn| match turn.role {
                TurnRole::User => ModelMessage::user(turn.text.clone()),
                TurnRole::Assistant => ModelMessage::assistant(turn.text.clone()),
            })
            .collect()
    }

    /// Run one turn: record `input`, run it through `runner`, record and
    /// return the assistant's turn.
    ///
    /// Errors never escape: they become the assistant turn's text.
    pub async fn submit(
        &mut self,
        input: &str,
        runner: &dyn TurnRunner,
        observer: &mut (dyn FnMut(TurnUpdate) + Send),
    ) -> &ConversationTurn {
        let mut history = self.model_history();
        history.push(ModelMessage::user(input));
        self.turns.push(ConversationTurn::user(input));

        let turn = match runner.start_turn(history).await {
            Ok(stream) => {
                let result = Aggregator::new(NativeSchema).aggregate(stream, observer).await;
                ConversationTurn::from(result)
            }
            Err(e) => {
                tracing::warn!(session = %self.id, runner = runner.name(), error = %e, "turn failed to start");
                ConversationTurn::assistant(format!("Sorry, I encountered an error: {e}"))
            }
        };
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }
}

/// Independent sessions keyed by id.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<String, Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a session by id.
    pub fn get_or_create(&mut self, session_id: &str) -> &mut Session {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id))
    }

    pub fn get(&self, session_id: &str) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    pub fn remove(&mut self, session_id: &str) -> Option<Session> {
        self.sessions.remove(session_id)
    }

    pub fn session_ids(&self) -> Vec<&str> {
        self.sessions.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_skips_empty_answers() {
        let mut session = Session::new("s");
        session.turns.push(ConversationTurn::user("hi"));
        session.turns.push(ConversationTurn::assistant(""));
        session.turns.push(ConversationTurn::user("again"));
        let texts: Vec<String> = session.model_history().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["hi", "again"]);
    }

    #[test]
    fn manager_keeps_sessions_apart() {
        let mut manager = SessionManager::new();
        manager.get_or_create("a").turns.push(ConversationTurn::user("x"));
        manager.get_or_create("b");
        assert_eq!(manager.get("a").map(|s| s.turns().len()), Some(1));
        assert_eq!(manager.get("b").map(|s| s.turns().len()), Some(0));
        assert!(manager.remove("a").is_some());
        assert_eq!(manager.session_ids(), vec!["b"]);
    }
}
