//! Folds a turn's event stream into one [`TurnResult`].
//!
//! Events are processed one at a time in arrival order. Text tokens are
//! concatenated, tool starts become call records (one per tool name per
//! turn), tool ends become result records and complete their call. Text that
//! resumes after tool activity starts a new paragraph, so a sub-agent's answer
//! and the supervisor's reply to it do not run together. A broken stream
//! produces a failed result instead of an error.

pub mod record;
pub mod schema;

use std::fmt::Display;
use std::pin::pin;

use futures::{Stream, StreamExt};

pub use record::{CallStatus, ToolCallRecord, ToolResultRecord, TurnResult, TurnStatus, TurnUpdate};
pub use schema::{EventKind, EventSchema, LangGraphSchema, NativeSchema};

/// Aggregation state of one turn.
#[derive(Debug, Default)]
pub struct TurnState {
    text: String,
    calls: Vec<ToolCallRecord>,
    results: Vec<ToolResultRecord>,
    /// Tool activity happened since the last token.
    tools_since_text: bool,
}

/// Put between text runs that have tool activity between them.
pub const PARAGRAPH_BREAK: &str = "\n\n";

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one classified event.
    pub fn apply(&mut self, kind: EventKind, observer: &mut dyn FnMut(TurnUpdate)) {
        match kind {
            EventKind::ModelToken { text } => {
                if std::mem::take(&mut self.tools_since_text) && !self.text.is_empty() {
                    let newlines = self.text.len() - self.text.trim_end_matches('\n').len();
                    self.text.push_str(&PARAGRAPH_BREAK[newlines.min(PARAGRAPH_BREAK.len())..]);
                }
                self.text.push_str(&text);
                observer(TurnUpdate::Text(self.text.clone()));
            }
            EventKind::ToolStarted {
                name,
                input,
                call_id,
            } => {
                self.tools_since_text = true;
                if self.calls.iter().any(|c| c.tool_name == name) {
                    return;
                }
                let call = ToolCallRecord {
                    call_id: call_id.unwrap_or_else(|| format!("call_{}", self.calls.len())),
                    tool_name: name,
                    arguments: input,
                    status: CallStatus::Running,
                };
                self.calls.push(call.clone());
                observer(TurnUpdate::ToolCall(call));
            }
            EventKind::ToolEnded {
                name,
                output,
                call_id,
            } => {
                self.tools_since_text = true;
                let position = self.results.len();
                let index = call_id
                    .as_deref()
                    .and_then(|id| self.calls.iter().position(|c| c.call_id == id))
                    .or_else(|| (position < self.calls.len()).then_some(position));

                let completed = index.map(|i| {
                    let call = &mut self.calls[i];
                    call.status = CallStatus::Completed;
                    call.clone()
                });
                let result = ToolResultRecord {
                    call_id: call_id
                        .or_else(|| completed.as_ref().map(|c| c.call_id.clone()))
                        .unwrap_or_default(),
                    tool_name: name,
                    content: output,
                };
                self.results.push(result.clone());
                observer(TurnUpdate::ToolResult { result, completed });
            }
            EventKind::ChainEnded { final_message } => {
                if self.text.is_empty() {
                    if let Some(message) = final_message {
                        self.text = message;
                    }
                }
            }
            EventKind::Other => {}
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn finish(self) -> TurnResult {
        TurnResult {
            status: TurnStatus::Completed,
            text: self.text,
            tool_calls: self.calls,
            tool_results: self.results,
        }
    }
}

/// One aggregator for every event format, parameterized by its schema.
#[derive(Debug, Clone, Default)]
pub struct Aggregator<S> {
    schema: S,
}

impl<S: EventSchema> Aggregator<S> {
    pub fn new(schema: S) -> Self {
        Self { schema }
    }

    /// Consume `stream` to its end.
    ///
    /// The first `Err` item stops aggregation and yields
    /// [`TurnResult::failed`]; partial records are discarded.
    pub async fn aggregate<St, E>(
        &self,
        stream: St,
        observer: &mut (dyn FnMut(TurnUpdate) + Send),
    ) -> TurnResult
    where
        St: Stream<Item = Result<S::Event, E>>,
        E: Display,
    {
        let mut stream = pin!(stream);
        let mut state = TurnState::new();
        while let Some(item) = stream.next().await {
            match item {
                Ok(event) => state.apply(self.schema.classify(&event), &mut *observer),
                Err(e) => {
                    tracing::warn!(error = %e, "event stream failed");
                    return TurnResult::failed(e);
                }
            }
        }
        state.finish()
    }

    /// Fold already collected events.
    pub fn aggregate_events<I>(&self, events: I) -> TurnResult
    where
        I: IntoIterator<Item = S::Event>,
    {
        let mut state = TurnState::new();
        for event in events {
            state.apply(self.schema.classify(&event), &mut |_| {});
        }
        state.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn started(name: &str, id: Option<&str>) -> EventKind {
        EventKind::ToolStarted {
            name: name.into(),
            input: json!({}),
            call_id: id.map(str::to_string),
        }
    }

    fn ended(name: &str, id: Option<&str>) -> EventKind {
        EventKind::ToolEnded {
            name: name.into(),
            output: json!("ok"),
            call_id: id.map(str::to_string),
        }
    }

    #[test]
    fn end_with_known_id_completes_that_call() {
        let mut state = TurnState::new();
        state.apply(started("a", Some("1")), &mut |_| {});
        state.apply(started("b", Some("2")), &mut |_| {});
        state.apply(ended("b", Some("2")), &mut |_| {});

        let result = state.finish();
        assert_eq!(result.tool_calls[0].status, CallStatus::Running);
        assert_eq!(result.tool_calls[1].status, CallStatus::Completed);
        assert_eq!(result.tool_results[0].call_id, "2");
    }

    #[test]
    fn end_without_id_matches_by_position() {
        let mut state = TurnState::new();
        state.apply(started("a", None), &mut |_| {});
        state.apply(started("b", None), &mut |_| {});
        state.apply(ended("a", None), &mut |_| {});

        let result = state.finish();
        assert_eq!(result.tool_calls[0].call_id, "call_0");
        assert_eq!(result.tool_calls[1].call_id, "call_1");
        assert_eq!(result.tool_calls[0].status, CallStatus::Completed);
        assert_eq!(result.tool_results[0].call_id, "call_0");
    }

    #[test]
    fn observer_sees_growing_text() {
        let mut seen = Vec::new();
        let mut state = TurnState::new();
        for token in ["He", "llo"] {
            state.apply(EventKind::ModelToken { text: token.into() }, &mut |u| seen.push(u));
        }
        assert_eq!(
            seen,
            vec![TurnUpdate::Text("He".into()), TurnUpdate::Text("Hello".into())]
        );
    }

    fn token(text: &str) -> EventKind {
        EventKind::ModelToken { text: text.into() }
    }

    #[test]
    fn text_after_tool_activity_starts_a_new_paragraph() {
        let mut state = TurnState::new();
        state.apply(token("rust is fast"), &mut |_| {});
        state.apply(started("transfer_back", Some("1")), &mut |_| {});
        state.apply(ended("transfer_back", Some("1")), &mut |_| {});
        state.apply(token("Here is "), &mut |_| {});
        state.apply(token("the summary"), &mut |_| {});
        assert_eq!(state.finish().text, "rust is fast\n\nHere is the summary");
    }

    #[test]
    fn paragraph_break_respects_trailing_newline_and_empty_text() {
        let mut state = TurnState::new();
        state.apply(started("a", None), &mut |_| {});
        state.apply(token("one\n"), &mut |_| {});
        state.apply(ended("a", None), &mut |_| {});
        state.apply(token("two"), &mut |_| {});
        assert_eq!(state.finish().text, "one\n\ntwo");
    }

    #[test]
    fn chain_end_does_not_override_streamed_text() {
        let mut state = TurnState::new();
        state.apply(EventKind::ModelToken { text: "streamed".into() }, &mut |_| {});
        state.apply(
            EventKind::ChainEnded {
                final_message: Some("final".into()),
            },
            &mut |_| {},
        );
        assert_eq!(state.finish().text, "streamed");
    }
}
