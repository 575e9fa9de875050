//! Website scraping, crawling and mapping via the Firecrawl API.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{get_json, post_json, require_key, service_url};
use crate::config::PlaygroundConfig;
use crate::error::PlaygroundError;
use crate::tools::{AgentToolParameters, Tool, ToolArguments, ToolExecutionContext};

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_CRAWL_POLLS: usize = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirecrawlOp {
    Scrape,
    Crawl,
    Map,
}

impl FirecrawlOp {
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Scrape => "scrape_with_firecrawl",
            Self::Crawl => "crawl_with_firecrawl",
            Self::Map => "map_with_firecrawl",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Scrape => "Use this to scrape a website with firecrawl",
            Self::Crawl => "Use this to crawl a website with firecrawl",
            Self::Map => "Use this to map a website with firecrawl",
        }
    }

    fn failure_prefix(self) -> &'static str {
        match self {
            Self::Scrape => "Error scraping website",
            Self::Crawl => "Error crawling website",
            Self::Map => "Error mapping website",
        }
    }
}

#[derive(Debug)]
pub struct FirecrawlTool {
    op: FirecrawlOp,
    parameters: AgentToolParameters,
    config: PlaygroundConfig,
    poll_interval: Duration,
}

impl FirecrawlTool {
    pub fn new(op: FirecrawlOp, config: PlaygroundConfig) -> Self {
        Self {
            op,
            parameters: AgentToolParameters::single_string("url", "URL of the website"),
            config,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Delay between crawl status checks.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    async fn run(&self, url: &str) -> Result<Value, PlaygroundError> {
        let api_key = require_key(&self.config, "firecrawl", "FIRECRAWL_API_KEY")?;
        tracing::debug!(tool = self.op.tool_name(), url, "firecrawl request");
        match self.op {
            FirecrawlOp::Scrape => {
                let endpoint = service_url(&self.config, "firecrawl", DEFAULT_BASE_URL, "/v1/scrape");
                let body = json!({ "url": url, "formats": ["markdown"] });
                let response = post_json(&endpoint, &api_key, &body).await?;
                ensure_success(&response)?;
                Ok(response.get("data").cloned().unwrap_or(response))
            }
            FirecrawlOp::Crawl => self.crawl(url, &api_key).await,
            FirecrawlOp::Map => {
                let endpoint = service_url(&self.config, "firecrawl", DEFAULT_BASE_URL, "/v1/map");
                let response = post_json(&endpoint, &api_key, &json!({ "url": url })).await?;
                ensure_success(&response)?;
                Ok(response
                    .get("links")
                    .cloned()
                    .unwrap_or_else(|| Value::Array(Vec::new())))
            }
        }
    }

    /// Start a crawl job and wait for it to finish.
    async fn crawl(&self, url: &str, api_key: &str) -> Result<Value, PlaygroundError> {
        let endpoint = service_url(&self.config, "firecrawl", DEFAULT_BASE_URL, "/v1/crawl");
        let body = json!({
            "url": url,
            "scrapeOptions": { "formats": ["markdown"] },
        });
        let started = post_json(&endpoint, api_key, &body).await?;
        ensure_success(&started)?;
        let job_id = started
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| PlaygroundError::api(200, "crawl response missing job id"))?;

        let status_url = format!("{endpoint}/{job_id}");
        for _ in 0..MAX_CRAWL_POLLS {
            let status = get_json(&status_url, api_key).await?;
            match status.get("status").and_then(Value::as_str) {
                Some("completed") => {
                    return Ok(status
                        .get("data")
                        .cloned()
                        .unwrap_or_else(|| Value::Array(Vec::new())))
                }
                Some(state @ ("failed" | "cancelled")) => {
                    return Err(PlaygroundError::api(
                        200,
                        format!("crawl job {job_id} ended with status {state}"),
                    ))
                }
                _ => tokio::time::sleep(self.poll_interval).await,
            }
        }
        Err(PlaygroundError::api(
            200,
            format!("crawl job {job_id} did not finish after {MAX_CRAWL_POLLS} checks"),
        ))
    }
}

fn ensure_success(response: &Value) -> Result<(), PlaygroundError> {
    if response.get("success").and_then(Value::as_bool) == Some(false) {
        let message = response
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("request was not successful");
        return Err(PlaygroundError::api(200, message));
    }
    Ok(())
}

#[async_trait]
impl Tool for FirecrawlTool {
    fn name(&self) -> &str {
        self.op.tool_name()
    }

    fn description(&self) -> &str {
        self.op.description()
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        _ctx: &ToolExecutionContext,
    ) -> Result<Value, PlaygroundError> {
        let url = args.single_str("url")?;
        match self.run(url).await {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(tool = self.op.tool_name(), error = %e, "firecrawl call failed");
                Ok(Value::String(format!("{}: {e}", self.op.failure_prefix())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsuccessful_body_is_an_error() {
        let err = ensure_success(&json!({"success": false, "error": "blocked"})).unwrap_err();
        assert!(err.to_string().contains("blocked"));
        assert!(ensure_success(&json!({"success": true})).is_ok());
    }

    #[tokio::test]
    async fn missing_key_is_reported_as_text() {
        let tool = FirecrawlTool::new(FirecrawlOp::Map, PlaygroundConfig::new());
        let out = tool
            .execute(
                &ToolArguments::new(json!({"url": "https://example.com"})),
                &ToolExecutionContext::default(),
            )
            .await
            .unwrap();
        assert_eq!(
            out,
            Value::String(
                "Error mapping website: Authentication error: Missing FIRECRAWL_API_KEY".into()
            )
        );
    }
}
