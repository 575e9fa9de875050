use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use playground::config::PlaygroundConfig;
use playground::tools::builtin::{FirecrawlOp, FirecrawlTool, TavilySearchTool};
use playground::tools::{Tool, ToolArguments, ToolExecutionContext};

fn config_for(service: &str, key: &str, server: &MockServer) -> PlaygroundConfig {
    let config = PlaygroundConfig::new();
    config.set_api_key(service, key.to_string());
    config.set_base_url(service, server.uri());
    config
}

async fn run(tool: &dyn Tool, args: Value) -> Value {
    tool.execute(&ToolArguments::new(args), &ToolExecutionContext::default())
        .await
        .expect("tool should not fail on remote errors")
}

#[tokio::test]
async fn basic_research_searches_trending_with_images() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("authorization", "Bearer tvly-key"))
        .and(body_partial_json(json!({
            "query": "trending rust",
            "search_depth": "basic",
            "max_results": 5,
            "include_images": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"title": "Rust 2.0?", "url": "https://example.com/r", "content": "rumours", "score": 0.9}
            ],
            "images": ["https://example.com/r.png"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tool = TavilySearchTool::basic(config_for("tavily", "tvly-key", &server));
    let out = run(&tool, json!({"query": "rust"})).await;

    assert_eq!(
        out,
        json!({
            "results": [{"title": "Rust 2.0?", "url": "https://example.com/r", "content": "rumours"}],
            "images": ["https://example.com/r.png"]
        })
    );
}

#[tokio::test]
async fn advanced_research_returns_plain_hits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({
            "query": "tokio scheduler",
            "search_depth": "advanced",
            "max_results": 10,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"title": "A", "url": "https://a", "content": "aa"},
                {"title": "B", "url": "https://b", "content": "bb"}
            ]
        })))
        .mount(&server)
        .await;

    let tool = TavilySearchTool::advanced(config_for("tavily", "k", &server));
    let out = run(&tool, json!("tokio scheduler")).await;

    assert_eq!(out.as_array().map(Vec::len), Some(2));
    assert_eq!(out[1]["title"], "B");
}

#[tokio::test]
async fn search_http_error_becomes_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let tool = TavilySearchTool::advanced(config_for("tavily", "k", &server));
    let out = run(&tool, json!({"query": "x"})).await;

    assert_eq!(out, json!("Error searching the web: API error (status 500): boom"));
}

#[tokio::test]
async fn scrape_returns_markdown_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .and(header("authorization", "Bearer fc-key"))
        .and(body_partial_json(json!({
            "url": "https://example.com",
            "formats": ["markdown"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"markdown": "# Example", "metadata": {"title": "Example"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tool = FirecrawlTool::new(FirecrawlOp::Scrape, config_for("firecrawl", "fc-key", &server));
    let out = run(&tool, json!({"url": "https://example.com"})).await;

    assert_eq!(out["markdown"], "# Example");
}

#[tokio::test]
async fn unsuccessful_scrape_becomes_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "blocked by robots.txt"
        })))
        .mount(&server)
        .await;

    let tool = FirecrawlTool::new(FirecrawlOp::Scrape, config_for("firecrawl", "k", &server));
    let out = run(&tool, json!({"url": "https://example.com"})).await;

    assert_eq!(
        out,
        json!("Error scraping website: API error (status 200): blocked by robots.txt")
    );
}

#[tokio::test]
async fn map_returns_links() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .and(body_partial_json(json!({"url": "https://example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "links": ["https://example.com/a", "https://example.com/b"]
        })))
        .mount(&server)
        .await;

    let tool = FirecrawlTool::new(FirecrawlOp::Map, config_for("firecrawl", "k", &server));
    let out = run(&tool, json!({"url": "https://example.com"})).await;

    assert_eq!(out, json!(["https://example.com/a", "https://example.com/b"]));
}

#[tokio::test]
async fn crawl_polls_until_completed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .and(body_partial_json(json!({
            "url": "https://example.com",
            "scrapeOptions": {"formats": ["markdown"]},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "job-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "scraping"})))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "data": [{"markdown": "page one"}, {"markdown": "page two"}]
        })))
        .mount(&server)
        .await;

    let tool = FirecrawlTool::new(FirecrawlOp::Crawl, config_for("firecrawl", "k", &server))
        .with_poll_interval(Duration::from_millis(5));
    let out = run(&tool, json!({"url": "https://example.com"})).await;

    assert_eq!(out, json!([{"markdown": "page one"}, {"markdown": "page two"}]));
}

#[tokio::test]
async fn failed_crawl_becomes_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "job-2"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "failed"})))
        .mount(&server)
        .await;

    let tool = FirecrawlTool::new(FirecrawlOp::Crawl, config_for("firecrawl", "k", &server))
        .with_poll_interval(Duration::from_millis(5));
    let out = run(&tool, json!({"url": "https://example.com"})).await;

    assert_eq!(
        out,
        json!("Error crawling website: API error (status 200): crawl job job-2 ended with status failed")
    );
}

#[tokio::test]
async fn missing_url_is_an_argument_error() {
    let tool = FirecrawlTool::new(FirecrawlOp::Scrape, PlaygroundConfig::new());
    let err = tool
        .execute(&ToolArguments::new(json!({})), &ToolExecutionContext::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: Missing string argument: url");
}
