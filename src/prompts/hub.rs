//! Prompt hub client (LangSmith-compatible commits endpoint).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use super::PromptSource;
use crate::config::PlaygroundConfig;
use crate::error::PlaygroundError;
use crate::provider::http::{shared_client, status_to_error};

const DEFAULT_BASE_URL: &str = "https://api.smith.langchain.com";

/// Pulls prompt commits from the hub. A prompt name is either `repo` or
/// `owner/repo`; the version is a commit hash and defaults to `latest`.
#[derive(Debug, Clone)]
pub struct PromptHub {
    config: PlaygroundConfig,
}

impl PromptHub {
    pub fn new(config: PlaygroundConfig) -> Self {
        Self { config }
    }

    fn commit_url(&self, name: &str, version: Option<&str>) -> String {
        let base = self
            .config
            .get_base_url("langsmith")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let (owner, repo) = name.split_once('/').unwrap_or(("-", name));
        let commit = version.unwrap_or("latest");
        format!("{}/commits/{owner}/{repo}/{commit}", base.trim_end_matches('/'))
    }
}

#[async_trait]
impl PromptSource for PromptHub {
    async fn pull(&self, name: &str, version: Option<&str>) -> Result<Option<String>, PlaygroundError> {
        let api_key = self
            .config
            .get_api_key("langsmith")
            .ok_or_else(|| PlaygroundError::Authentication("Missing LANGSMITH_API_KEY".into()))?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&api_key)
            .map_err(|e| PlaygroundError::Configuration(format!("invalid LANGSMITH_API_KEY: {e}")))?;
        headers.insert("x-api-key", key);

        let url = self.commit_url(name, version);
        tracing::debug!(%url, "pulling prompt");
        let response = shared_client().get(&url).headers(headers).send().await?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body));
        }
        let body: Value = response.json().await?;
        Ok(body.get("manifest").and_then(first_template))
    }
}

/// First message template in a serialized prompt manifest.
fn first_template(manifest: &Value) -> Option<String> {
    match manifest {
        Value::Object(map) => {
            if let Some(Value::String(template)) = map.get("template") {
                return Some(template.clone());
            }
            map.values().find_map(first_template)
        }
        Value::Array(items) => items.iter().find_map(first_template),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn commit_url_defaults_owner_and_version() {
        let config = PlaygroundConfig::new();
        config.set_base_url("langsmith", "http://hub.local/".into());
        let hub = PromptHub::new(config);
        assert_eq!(
            hub.commit_url("shopping_advisor", None),
            "http://hub.local/commits/-/shopping_advisor/latest"
        );
        assert_eq!(
            hub.commit_url("team/writer", Some("d2a18e1e")),
            "http://hub.local/commits/team/writer/d2a18e1e"
        );
    }

    #[test]
    fn template_is_found_in_nested_manifest() {
        let manifest = json!({
            "kwargs": {
                "messages": [
                    { "kwargs": { "prompt": { "kwargs": { "template": "Be brief. {today}" } } } },
                    { "kwargs": { "prompt": { "kwargs": { "template": "{question}" } } } }
                ]
            }
        });
        assert_eq!(first_template(&manifest).as_deref(), Some("Be brief. {today}"));
    }
}
