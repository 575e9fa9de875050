//! Built-in web tools: Tavily search, Firecrawl scrape/crawl/map, date.
//!
//! Remote failures never escape these tools as `Err`: they are logged and
//! returned to the model as a descriptive error string so the agent can
//! explain or route around them.

pub mod crawl;
pub mod search;
pub mod utility;

use std::sync::Arc;

use serde_json::Value;

pub use crawl::{FirecrawlOp, FirecrawlTool};
pub use search::{SearchDepth, TavilySearchTool};
pub use utility::TodaysDateTool;

use super::Tool;
use crate::config::PlaygroundConfig;
use crate::error::PlaygroundError;
use crate::provider::http::{bearer_headers, shared_client, status_to_error};

/// Every built-in tool, in registry order.
pub fn all_tools(config: &PlaygroundConfig) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(TavilySearchTool::advanced(config.clone())),
        Arc::new(TavilySearchTool::basic(config.clone())),
        Arc::new(TodaysDateTool::new()),
        Arc::new(FirecrawlTool::new(FirecrawlOp::Scrape, config.clone())),
        Arc::new(FirecrawlTool::new(FirecrawlOp::Crawl, config.clone())),
        Arc::new(FirecrawlTool::new(FirecrawlOp::Map, config.clone())),
    ]
}

pub(crate) fn require_key(
    config: &PlaygroundConfig,
    service: &str,
    env_var: &str,
) -> Result<String, PlaygroundError> {
    config
        .get_api_key(service)
        .ok_or_else(|| PlaygroundError::Authentication(format!("Missing {env_var}")))
}

pub(crate) fn service_url(config: &PlaygroundConfig, service: &str, default: &str, path: &str) -> String {
    let base = config
        .get_base_url(service)
        .unwrap_or_else(|| default.to_string());
    format!("{}{path}", base.trim_end_matches('/'))
}

pub(crate) async fn post_json(url: &str, api_key: &str, body: &Value) -> Result<Value, PlaygroundError> {
    let response = shared_client()
        .post(url)
        .headers(bearer_headers(api_key))
        .json(body)
        .send()
        .await?;
    read_json(response).await
}

pub(crate) async fn get_json(url: &str, api_key: &str) -> Result<Value, PlaygroundError> {
    let response = shared_client()
        .get(url)
        .headers(bearer_headers(api_key))
        .send()
        .await?;
    read_json(response).await
}

async fn read_json(response: reqwest::Response) -> Result<Value, PlaygroundError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_to_error(status.as_u16(), &body));
    }
    Ok(response.json().await?)
}
