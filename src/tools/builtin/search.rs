//! Web search backed by the Tavily search API.

use async_trait::async_trait;
use serde_json::{json, Value};
use strum::{AsRefStr, Display};

use super::{post_json, require_key, service_url};
use crate::config::PlaygroundConfig;
use crate::error::PlaygroundError;
use crate::tools::{AgentToolParameters, Tool, ToolArguments, ToolExecutionContext};

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

/// `advanced_research` / `basic_research`.
#[derive(Debug)]
pub struct TavilySearchTool {
    name: &'static str,
    description: &'static str,
    depth: SearchDepth,
    max_results: u32,
    include_images: bool,
    query_prefix: Option<&'static str>,
    parameters: AgentToolParameters,
    config: PlaygroundConfig,
}

impl TavilySearchTool {
    /// Thorough search for detailed research.
    pub fn advanced(config: PlaygroundConfig) -> Self {
        Self {
            name: "advanced_research",
            description: "Perform comprehensive web searches for detailed research.",
            depth: SearchDepth::Advanced,
            max_results: 10,
            include_images: false,
            query_prefix: None,
            parameters: query_parameters(),
            config,
        }
    }

    /// Quick search biased towards trending content.
    pub fn basic(config: PlaygroundConfig) -> Self {
        Self {
            name: "basic_research",
            description: "Research trending topics for social media content.",
            depth: SearchDepth::Basic,
            max_results: 5,
            include_images: true,
            query_prefix: Some("trending"),
            parameters: query_parameters(),
            config,
        }
    }

    fn request_body(&self, query: &str) -> Value {
        let query = match self.query_prefix {
            Some(prefix) => format!("{prefix} {query}"),
            None => query.to_string(),
        };
        json!({
            "query": query,
            "search_depth": self.depth.as_ref(),
            "max_results": self.max_results,
            "include_images": self.include_images,
            "include_raw_content": false,
        })
    }

    async fn search(&self, query: &str) -> Result<Value, PlaygroundError> {
        let api_key = require_key(&self.config, "tavily", "TAVILY_API_KEY")?;
        let url = service_url(&self.config, "tavily", DEFAULT_BASE_URL, "/search");
        tracing::debug!(tool = self.name, depth = %self.depth, "tavily search");
        let response = post_json(&url, &api_key, &self.request_body(query)).await?;
        Ok(shape_results(&response, self.include_images))
    }
}

fn query_parameters() -> AgentToolParameters {
    AgentToolParameters::single_string("query", "The search query string")
}

/// Keep the fields an agent needs from each hit.
fn shape_results(response: &Value, include_images: bool) -> Value {
    let results: Vec<Value> = response
        .get("results")
        .and_then(Value::as_array)
        .map(|hits| {
            hits.iter()
                .map(|hit| {
                    json!({
                        "title": hit.get("title").cloned().unwrap_or(Value::Null),
                        "url": hit.get("url").cloned().unwrap_or(Value::Null),
                        "content": hit.get("content").cloned().unwrap_or(Value::Null),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    if !include_images {
        return Value::Array(results);
    }
    let images = response
        .get("images")
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));
    json!({ "results": results, "images": images })
}

#[async_trait]
impl Tool for TavilySearchTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        _ctx: &ToolExecutionContext,
    ) -> Result<Value, PlaygroundError> {
        let query = args.single_str("query")?;
        match self.search(query).await {
            Ok(results) => Ok(results),
            Err(e) => {
                tracing::warn!(tool = self.name, error = %e, "search failed");
                Ok(Value::String(format!("Error searching the web: {e}")))
            }
        }
    }
}
