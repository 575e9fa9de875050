//! OpenAI Chat Completions API provider.

use std::collections::BTreeMap;

use async_trait::async_trait;
use eventsource_stream::{EventStreamError, Eventsource};
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::Deserialize;
use tracing::debug;

use crate::error::PlaygroundError;
use crate::models::openai::OpenAiModel;
use crate::types::*;

use super::http::{bearer_headers, shared_client, status_to_error};
use super::{ModelProvider, ProviderRequest};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    model: OpenAiModel,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(model: OpenAiModel, api_key: String, base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model,
            api_key,
        }
    }

    fn build_request_body(&self, request: &ProviderRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_openai)
            .collect::<Vec<_>>();

        let mut obj = serde_json::Map::new();
        obj.insert("model".into(), self.model.as_str().into());
        obj.insert("messages".into(), messages.into());
        obj.insert("stream".into(), true.into());
        obj.insert(
            "stream_options".into(),
            serde_json::json!({ "include_usage": true }),
        );

        if let Some(max) = request.settings.max_tokens {
            obj.insert("max_tokens".into(), max.into());
        }
        if let Some(temp) = request.settings.temperature {
            obj.insert("temperature".into(), temp.into());
        }

        if let Some(ref tools) = request.tools {
            if !tools.is_empty() {
                let tool_defs: Vec<serde_json::Value> = tools
                    .iter()
                    .map(|t| {
                        serde_json::json!({
                            "type": "function",
                            "function": {
                                "name": t.name,
                                "description": t.description,
                                "parameters": t.parameters,
                            }
                        })
                    })
                    .collect();
                obj.insert("tools".into(), tool_defs.into());
                if let Some(parallel) = request.settings.parallel_tool_calls {
                    obj.insert("parallel_tool_calls".into(), parallel.into());
                }
            }
        }

        serde_json::Value::Object(obj)
    }

    async fn open_stream(&self, request: &ProviderRequest) -> Result<reqwest::Response, PlaygroundError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = self.model.as_str(), url = %url, "chat completions request");

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }
        Ok(resp)
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    async fn stream_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, PlaygroundError>>, PlaygroundError>
    {
        let resp = self.open_stream(request).await?;

        let stream = async_stream::stream! {
            let events = resp.bytes_stream().eventsource();
            futures::pin_mut!(events);
            let mut pending = PendingToolCalls::default();
            let mut finish_reason = None;
            let mut usage = None;

            while let Some(event) = events.next().await {
                let event = match event {
                    Ok(event) => event,
                    Err(EventStreamError::Transport(e)) => {
                        yield Err(PlaygroundError::Network(e));
                        return;
                    }
                    Err(e) => {
                        yield Err(PlaygroundError::Stream(e.to_string()));
                        return;
                    }
                };
                if event.data == "[DONE]" {
                    continue;
                }
                let Ok(chunk) = serde_json::from_str::<OpenAiStreamChunk>(&event.data) else {
                    continue;
                };
                if let Some(error) = chunk.error {
                    yield Err(PlaygroundError::Stream(error.message));
                    return;
                }
                // With include_usage the counts arrive in a trailing chunk
                // that has no choices.
                if let Some(reported) = chunk.usage {
                    usage = Some(Usage::from(reported));
                }
                let Some(choice) = chunk.choices.into_iter().next() else { continue };

                if let Some(text) = choice.delta.content.filter(|t| !t.is_empty()) {
                    yield Ok(TextStreamDelta::text(text));
                }
                for fragment in choice.delta.tool_calls.unwrap_or_default() {
                    pending.absorb(fragment);
                }

                if let Some(finish) = choice.finish_reason.as_deref() {
                    for call in pending.drain() {
                        yield Ok(TextStreamDelta::tool_call(call));
                    }
                    finish_reason = parse_finish_reason(finish);
                }
            }

            for call in pending.drain() {
                yield Ok(TextStreamDelta::tool_call(call));
            }
            yield Ok(TextStreamDelta::done(finish_reason, usage));
        };

        Ok(Box::pin(stream))
    }
}

/// Tool call fragments keyed by the `index` the API assigns them.
#[derive(Default)]
struct PendingToolCalls {
    calls: BTreeMap<usize, PartialToolCall>,
}

#[derive(Default)]
struct PartialToolCall {
    id: String,
    name: String,
    arguments: String,
}

impl PendingToolCalls {
    fn absorb(&mut self, fragment: OpenAiStreamToolCall) {
        let entry = self.calls.entry(fragment.index).or_default();
        if let Some(id) = fragment.id {
            entry.id = id;
        }
        if let Some(function) = fragment.function {
            if let Some(name) = function.name {
                entry.name.push_str(&name);
            }
            if let Some(args) = function.arguments {
                entry.arguments.push_str(&args);
            }
        }
    }

    fn drain(&mut self) -> Vec<AgentToolCall> {
        std::mem::take(&mut self.calls)
            .into_iter()
            .filter(|(_, call)| !call.name.is_empty())
            .map(|(index, call)| AgentToolCall {
                id: if call.id.is_empty() {
                    format!("call_{index}")
                } else {
                    call.id
                },
                name: call.name,
                arguments: parse_arguments(&call.arguments),
            })
            .collect()
    }
}

fn parse_arguments(raw: &str) -> serde_json::Value {
    if raw.trim().is_empty() {
        return serde_json::json!({});
    }
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    match s {
        "stop" => Some(FinishReason::Stop),
        "length" => Some(FinishReason::Length),
        "tool_calls" | "function_call" => Some(FinishReason::ToolCalls),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}

fn message_to_openai(msg: &ModelMessage) -> serde_json::Value {
    let role = match msg.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    };

    if let Some(tr) = msg.tool_results().first() {
        let content = match &tr.result {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return serde_json::json!({
            "role": "tool",
            "tool_call_id": tr.tool_call_id,
            "content": content,
        });
    }

    let text = msg.text();
    let mut obj = serde_json::Map::new();
    obj.insert("role".into(), role.into());

    let tool_calls = msg.tool_calls();
    if tool_calls.is_empty() {
        obj.insert("content".into(), text.into());
    } else {
        let tc_json: Vec<serde_json::Value> = tool_calls
            .iter()
            .map(|tc| {
                serde_json::json!({
                    "id": tc.id,
                    "type": "function",
                    "function": {
                        "name": tc.name,
                        "arguments": tc.arguments.to_string(),
                    }
                })
            })
            .collect();
        let content = if text.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::Value::String(text)
        };
        obj.insert("content".into(), content);
        obj.insert("tool_calls".into(), tc_json.into());
    }

    if msg.role == Role::Assistant {
        if let Some(ref name) = msg.name {
            obj.insert("name".into(), name.clone().into());
        }
    }

    serde_json::Value::Object(obj)
}

// Chat Completions wire types (internal)

#[derive(Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl From<OpenAiUsage> for Usage {
    fn from(u: OpenAiUsage) -> Self {
        Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }
    }
}

#[derive(Deserialize)]
struct OpenAiStreamChunk {
    #[serde(default)]
    choices: Vec<OpenAiStreamChoice>,
    usage: Option<OpenAiUsage>,
    error: Option<OpenAiStreamError>,
}

#[derive(Deserialize)]
struct OpenAiStreamError {
    message: String,
}

#[derive(Deserialize)]
struct OpenAiStreamChoice {
    delta: OpenAiStreamDelta,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiStreamDelta {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAiStreamToolCall>>,
}

#[derive(Deserialize)]
struct OpenAiStreamToolCall {
    #[serde(default)]
    index: usize,
    id: Option<String>,
    function: Option<OpenAiStreamFunction>,
}

#[derive(Deserialize)]
struct OpenAiStreamFunction {
    name: Option<String>,
    arguments: Option<String>,
}
