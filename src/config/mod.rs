//! Runtime configuration (layered: code > env > `.env` file).
//!
//! Holds API keys and base URL overrides for every remote service the
//! playground talks to: model providers (OpenAI, OpenRouter), tool backends
//! (Tavily, Firecrawl) and the prompt hub.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

/// Global default config (lazy-initialized from env).
static DEFAULT_CONFIG: OnceLock<PlaygroundConfig> = OnceLock::new();

const KEY_MAPPINGS: [(&str, &str); 5] = [
    ("OPENAI_API_KEY", "openai"),
    ("OPENROUTER_API_KEY", "openrouter"),
    ("TAVILY_API_KEY", "tavily"),
    ("FIRECRAWL_API_KEY", "firecrawl"),
    ("LANGSMITH_API_KEY", "langsmith"),
];

const URL_MAPPINGS: [(&str, &str); 5] = [
    ("OPENAI_BASE_URL", "openai"),
    ("OPENROUTER_BASE_URL", "openrouter"),
    ("TAVILY_BASE_URL", "tavily"),
    ("FIRECRAWL_BASE_URL", "firecrawl"),
    ("LANGSMITH_BASE_URL", "langsmith"),
];

/// Credentials and endpoints keyed by service name.
///
/// Cloning is cheap and clones share the same underlying maps, so a key set
/// after agents were built is still seen on their next invocation.
#[derive(Clone, Default)]
pub struct PlaygroundConfig {
    api_keys: Arc<RwLock<HashMap<String, String>>>,
    base_urls: Arc<RwLock<HashMap<String, String>>>,
}

impl fmt::Debug for PlaygroundConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let services: Vec<String> = self
            .api_keys
            .read()
            .map(|keys| keys.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("PlaygroundConfig")
            .field("api_keys", &services)
            .field("base_urls", &self.base_urls)
            .finish()
    }
}

impl PlaygroundConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::new();
        for (env_var, service) in &KEY_MAPPINGS {
            if let Some(key) = lookup(env_var).filter(|v| !v.trim().is_empty()) {
                config.set_api_key(service, key);
            }
        }
        for (env_var, service) in &URL_MAPPINGS {
            if let Some(url) = lookup(env_var).filter(|v| !v.trim().is_empty()) {
                config.set_base_url(service, url);
            }
        }
        config
    }

    /// Get (or create) the global default config.
    pub fn global() -> &'static PlaygroundConfig {
        DEFAULT_CONFIG.get_or_init(Self::from_env)
    }

    pub fn set_api_key(&self, service: &str, key: String) {
        if let Ok(mut keys) = self.api_keys.write() {
            keys.insert(service.to_string(), key);
        }
    }

    pub fn get_api_key(&self, service: &str) -> Option<String> {
        self.api_keys.read().ok()?.get(service).cloned()
    }

    pub fn set_base_url(&self, service: &str, url: String) {
        if let Ok(mut urls) = self.base_urls.write() {
            urls.insert(service.to_string(), url.trim_end_matches('/').to_string());
        }
    }

    pub fn get_base_url(&self, service: &str) -> Option<String> {
        self.base_urls.read().ok()?.get(service).cloned()
    }

    /// Check if a service has an API key configured.
    pub fn has_credentials(&self, service: &str) -> bool {
        self.get_api_key(service).is_some()
    }
}
