//! Terminal rendering of turns and of live turn progress.

use std::io::{self, Write};

use crate::aggregator::{CallStatus, ToolCallRecord, ToolResultRecord, TurnUpdate};
use crate::session::{ConversationTurn, TurnRole};

pub const NO_RESPONSE_PLACEHOLDER: &str = "No response generated";

/// Longest tool result shown before truncation, in characters.
pub const MAX_RESULT_CHARS: usize = 2000;

/// Cut `text` to at most `max_chars` characters, marking the cut.
pub fn truncate_for_display(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}... (truncated)", &text[..byte_index]),
        None => text.to_string(),
    }
}

pub fn render_tool_call(call: &ToolCallRecord) -> String {
    let status = match call.status {
        CallStatus::Running => "running",
        CallStatus::Completed => "completed",
    };
    let arguments = match &call.arguments {
        serde_json::Value::Object(map) if map.is_empty() => String::new(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    };
    format!("  [tool] {}({arguments}) [{status}]", call.tool_name)
}

pub fn render_tool_result(result: &ToolResultRecord) -> String {
    format!(
        "  [result] {}: {}",
        result.tool_name,
        truncate_for_display(&result.content_text(), MAX_RESULT_CHARS)
    )
}

/// Render a finished turn.
pub fn render_turn(turn: &ConversationTurn, show_tools: bool) -> String {
    let mut lines = Vec::new();
    match turn.role {
        TurnRole::User => lines.push(format!("You: {}", turn.text)),
        TurnRole::Assistant => {
            if show_tools {
                lines.extend(turn.tool_calls.iter().map(render_tool_call));
                lines.extend(turn.tool_results.iter().map(render_tool_result));
            }
            let text = if turn.text.is_empty() {
                NO_RESPONSE_PLACEHOLDER
            } else {
                turn.text.as_str()
            };
            lines.push(format!("Assistant: {text}"));
        }
    }
    lines.join("\n")
}

/// Prints turn progress as it arrives: text incrementally, tool activity
/// one line per event.
///
/// Call [`finish`](Self::finish) with the recorded turn once it is done. A
/// turn that failed after some text was shown replaces that text, so the
/// failure is printed as its own assistant line.
pub struct LiveRenderer<W> {
    out: W,
    show_tools: bool,
    printed: String,
    mid_line: bool,
}

impl LiveRenderer<io::Stdout> {
    pub fn stdout(show_tools: bool) -> Self {
        Self::new(io::stdout(), show_tools)
    }
}

impl<W: Write> LiveRenderer<W> {
    pub fn new(out: W, show_tools: bool) -> Self {
        Self {
            out,
            show_tools,
            printed: String::new(),
            mid_line: false,
        }
    }

    pub fn on_update(&mut self, update: TurnUpdate) {
        // Write errors leave the turn result unaffected.
        let _ = self.write_update(update);
    }

    fn write_update(&mut self, update: TurnUpdate) -> io::Result<()> {
        match update {
            TurnUpdate::Text(text) => self.write_text_after(&text)?,
            TurnUpdate::ToolCall(call) if self.show_tools => {
                self.break_line()?;
                writeln!(self.out, "{}", render_tool_call(&call))?;
            }
            TurnUpdate::ToolResult { result, .. } if self.show_tools => {
                self.break_line()?;
                writeln!(self.out, "{}", render_tool_result(&result))?;
            }
            _ => {}
        }
        self.out.flush()
    }

    /// Write the part of `text` not yet printed. `text` always extends what
    /// was printed before.
    fn write_text_after(&mut self, text: &str) -> io::Result<()> {
        let fresh: String = text.chars().skip(self.printed.chars().count()).collect();
        if !fresh.is_empty() {
            self.printed.push_str(&fresh);
            self.mid_line = !fresh.ends_with('\n');
            write!(self.out, "{fresh}")?;
        }
        Ok(())
    }

    /// Close the live output of a finished turn.
    pub fn finish(&mut self, turn: &ConversationTurn) {
        let _ = self.write_finish(turn);
    }

    fn write_finish(&mut self, turn: &ConversationTurn) -> io::Result<()> {
        if !self.printed.is_empty() && turn.text.starts_with(&self.printed) {
            self.write_text_after(&turn.text)?;
            self.break_line()?;
        } else {
            self.break_line()?;
            writeln!(self.out, "{}", render_turn(turn, false))?;
        }
        self.out.flush()
    }

    fn break_line(&mut self) -> io::Result<()> {
        if self.mid_line {
            writeln!(self.out)?;
            self.mid_line = false;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn long_results_are_truncated() {
        let text = "é".repeat(MAX_RESULT_CHARS + 5);
        let shown = truncate_for_display(&text, MAX_RESULT_CHARS);
        assert!(shown.ends_with("... (truncated)"));
        assert_eq!(shown.chars().filter(|c| *c == 'é').count(), MAX_RESULT_CHARS);
        assert_eq!(truncate_for_display("short", MAX_RESULT_CHARS), "short");
    }

    #[test]
    fn empty_answer_gets_placeholder() {
        let rendered = render_turn(&ConversationTurn::assistant(""), true);
        assert_eq!(rendered, "Assistant: No response generated");
    }

    #[test]
    fn tools_are_hidden_on_request() {
        let mut turn = ConversationTurn::assistant("done");
        turn.tool_calls.push(ToolCallRecord {
            tool_name: "get_todays_date".into(),
            arguments: json!({}),
            call_id: "c1".into(),
            status: CallStatus::Completed,
        });
        assert_eq!(render_turn(&turn, false), "Assistant: done");
        assert_eq!(
            render_turn(&turn, true),
            "  [tool] get_todays_date() [completed]\nAssistant: done"
        );
    }

    #[test]
    fn live_renderer_prints_only_new_text() {
        let mut live = LiveRenderer::new(Vec::new(), false);
        live.on_update(TurnUpdate::Text("Hel".into()));
        live.on_update(TurnUpdate::Text("Hello".into()));
        assert_eq!(String::from_utf8(live.into_inner()).unwrap(), "Hello");
    }

    #[test]
    fn finish_ends_a_streamed_answer_with_a_newline() {
        let mut live = LiveRenderer::new(Vec::new(), false);
        live.on_update(TurnUpdate::Text("It is sunny.".into()));
        live.finish(&ConversationTurn::assistant("It is sunny."));
        assert_eq!(String::from_utf8(live.into_inner()).unwrap(), "It is sunny.\n");
    }

    #[test]
    fn finish_renders_turn_when_nothing_streamed() {
        let mut live = LiveRenderer::new(Vec::new(), false);
        live.finish(&ConversationTurn::assistant(""));
        assert_eq!(
            String::from_utf8(live.into_inner()).unwrap(),
            "Assistant: No response generated\n"
        );
    }
}
