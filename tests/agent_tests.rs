mod common;

use std::sync::Arc;

use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::*;
use playground::agent::{Agent, AgentConfig};
use playground::config::PlaygroundConfig;
use playground::error::PlaygroundError;
use playground::events::AgentEventPayload;
use playground::tools::{AgentTool, AgentToolParameters, Tool};
use playground::types::{ModelMessage, Role, Usage};

fn echo_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "echo",
        "Echo the text back",
        AgentToolParameters::single_string("text", "Text to echo"),
        |args, _ctx| async move { Ok(json!(args.single_str("text")?.to_uppercase())) },
    ))
}

#[tokio::test]
async fn answer_without_tools_ends_the_run() {
    let script = Script::new(vec![answer(&["Hel", "lo"])]);
    let agent = scripted_agent("assistant", &script).with_system_prompt("be brief");

    let output = agent.invoke(vec![ModelMessage::user("hi")]).await.unwrap();

    assert_eq!(output.text, "Hello");
    assert_eq!(output.messages.len(), 1);
    assert_eq!(output.messages[0].role, Role::Assistant);
    assert_eq!(output.messages[0].name.as_deref(), Some("assistant"));

    let requests = script.requests();
    assert_eq!(requests.len(), 1);
    let (model_id, request) = &requests[0];
    assert_eq!(model_id, "gpt-4.1-mini");
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[0].text(), "be brief");
    assert!(request.tools.is_none());
}

/// Replaces the closing delta of `step` with one that reports `usage`.
fn with_usage(mut step: Step, input_tokens: u32, output_tokens: u32) -> Step {
    if let Some(done) = step.last_mut() {
        done.usage = Some(Usage {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        });
    }
    step
}

#[tokio::test]
async fn usage_is_summed_across_steps() {
    let script = Script::new(vec![
        with_usage(tool_calls(&[("call_a", "echo", json!({"text": "x"}))]), 10, 2),
        answer(&["X"]),
    ]);
    let script_with_usage = Script::new(vec![
        with_usage(tool_calls(&[("call_a", "echo", json!({"text": "x"}))]), 10, 2),
        with_usage(answer(&["X"]), 14, 1),
    ]);

    let partial = scripted_agent("assistant", &script)
        .with_tool(echo_tool())
        .invoke(vec![ModelMessage::user("shout")])
        .await
        .unwrap();
    assert_eq!(partial.usage.total_tokens, 12);

    let full = scripted_agent("assistant", &script_with_usage)
        .with_tool(echo_tool())
        .invoke(vec![ModelMessage::user("shout")])
        .await
        .unwrap();
    assert_eq!(
        full.usage,
        Usage {
            input_tokens: 24,
            output_tokens: 3,
            total_tokens: 27,
        }
    );
}

#[tokio::test]
async fn tool_calls_run_in_model_order_and_feed_back() {
    let script = Script::new(vec![
        tool_calls(&[
            ("call_a", "echo", json!({"text": "one"})),
            ("call_b", "echo", json!({"text": "two"})),
        ]),
        answer(&["ONE TWO"]),
    ]);
    let agent = scripted_agent("assistant", &script).with_tool(echo_tool());
    let (sink, events) = recording_sink();

    let output = agent
        .run_with_sink(vec![ModelMessage::user("shout")], Some(sink))
        .await
        .unwrap();
    assert_eq!(output.text, "ONE TWO");

    let events = events.lock().unwrap().clone();
    assert_eq!(
        event_types(&events),
        vec![
            "on_chain_start",
            "on_tool_start",
            "on_tool_end",
            "on_tool_start",
            "on_tool_end",
            "on_chat_model_stream",
            "on_chain_end",
        ]
    );
    let seqs: Vec<u64> = events.iter().map(|e| e.seq).collect();
    assert_eq!(seqs, (1..=7).collect::<Vec<u64>>());
    assert!(events.iter().all(|e| e.agent == "assistant"));

    match &events[2].payload {
        AgentEventPayload::ToolEnd {
            tool_call_id,
            output,
            is_error,
            ..
        } => {
            assert_eq!(tool_call_id, "call_a");
            assert_eq!(output, &json!("ONE"));
            assert!(!is_error);
        }
        other => panic!("expected tool end, got {other:?}"),
    }

    // The second request carries the assistant call message and both results.
    let (_, second) = &script.requests()[1];
    let results: Vec<_> = second
        .messages
        .iter()
        .flat_map(|m| m.tool_results())
        .map(|r| (r.tool_call_id.clone(), r.result.clone()))
        .collect();
    assert_eq!(
        results,
        vec![
            ("call_a".to_string(), json!("ONE")),
            ("call_b".to_string(), json!("TWO")),
        ]
    );
}

#[tokio::test]
async fn unknown_tool_and_bad_arguments_become_error_results() {
    let script = Script::new(vec![
        tool_calls(&[
            ("call_1", "does_not_exist", json!({})),
            ("call_2", "echo", json!({"a": 1, "b": 2})),
        ]),
        answer(&["sorry"]),
    ]);
    let agent = scripted_agent("assistant", &script).with_tool(echo_tool());
    let (sink, events) = recording_sink();

    let output = agent
        .run_with_sink(vec![ModelMessage::user("go")], Some(sink))
        .await
        .unwrap();
    assert_eq!(output.text, "sorry");

    let ends: Vec<_> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match &e.payload {
            AgentEventPayload::ToolEnd {
                output, is_error, ..
            } => Some((output.clone(), *is_error)),
            _ => None,
        })
        .collect();
    assert_eq!(ends.len(), 2);
    assert_eq!(ends[0], (json!({"error": "Tool 'does_not_exist' not found"}), true));
    assert!(ends[1].1);
    assert_eq!(
        ends[1].0["error"],
        "Tool execution error: echo: Invalid argument: Missing string argument: text"
    );
}

#[tokio::test]
async fn recursion_limit_stops_endless_tool_use() {
    let steps = (0..3)
        .map(|i| {
            let id = format!("call_{i}");
            tool_calls(&[(id.as_str(), "echo", json!({"text": "again"}))])
        })
        .collect();
    let script = Script::new(steps);
    let agent = scripted_agent("assistant", &script)
        .with_tool(echo_tool())
        .with_recursion_limit(2);

    let err = agent.invoke(vec![ModelMessage::user("loop")]).await.unwrap_err();
    assert!(matches!(err, PlaygroundError::RecursionLimit(2)));
    assert_eq!(script.remaining(), 1);
}

#[tokio::test]
async fn stream_yields_events_then_ends() {
    let script = Script::new(vec![answer(&["a", "b"])]);
    let agent = scripted_agent("assistant", &script);

    let items: Vec<_> = agent.stream(vec![ModelMessage::user("hi")]).collect().await;
    let types: Vec<_> = items
        .iter()
        .map(|item| item.as_ref().unwrap().event_type())
        .collect();
    assert_eq!(
        types,
        vec![
            "on_chain_start",
            "on_chat_model_stream",
            "on_chat_model_stream",
            "on_chain_end",
        ]
    );
}

#[tokio::test]
async fn broken_model_stream_ends_with_error_item() {
    let script = Script::new(vec![broken(&["par"], "connection reset")]);
    let agent = scripted_agent("assistant", &script);

    let items: Vec<_> = agent.stream(vec![ModelMessage::user("hi")]).collect().await;
    let last = items.last().unwrap();
    match last {
        Err(PlaygroundError::Stream(message)) => assert_eq!(message, "connection reset"),
        other => panic!("expected stream error, got {other:?}"),
    }
    assert_eq!(items.iter().filter(|i| i.is_err()).count(), 1);
}

#[tokio::test]
async fn missing_key_surfaces_on_first_invocation() {
    let factory = playground::agent::AgentFactory::from_config(PlaygroundConfig::new());
    let agent: Agent = factory
        .build_agent(&AgentConfig::new(
            "writing_agent",
            "openai/gpt-4.1-mini",
            "",
            ["get_todays_date"],
        ))
        .unwrap();

    let err = agent.invoke(vec![ModelMessage::user("hi")]).await.unwrap_err();
    assert!(matches!(err, PlaygroundError::Authentication(ref m) if m.contains("OPENAI_API_KEY")));
}
