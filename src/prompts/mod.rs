//! System prompts: built-in defaults, an optional remote prompt hub, and
//! `{today}` rendering.

pub mod defaults;
pub mod hub;

use async_trait::async_trait;

pub use hub::PromptHub;

use crate::error::PlaygroundError;
use crate::tools::builtin::utility::todays_date;

/// Somewhere prompts can be pulled from by name.
#[async_trait]
pub trait PromptSource: Send + Sync {
    /// `Ok(None)` when the source has no such prompt.
    async fn pull(&self, name: &str, version: Option<&str>) -> Result<Option<String>, PlaygroundError>;
}

/// Pull `name` from `source`, falling back to `fallback` on any failure.
pub async fn prompt_with_fallback(
    source: &dyn PromptSource,
    name: &str,
    fallback: &str,
    version: Option<&str>,
) -> String {
    match source.pull(name, version).await {
        Ok(Some(prompt)) if !prompt.trim().is_empty() => prompt,
        Ok(_) => {
            tracing::warn!(prompt = name, "prompt not found, using default");
            fallback.to_string()
        }
        Err(e) => {
            tracing::warn!(prompt = name, error = %e, "failed to pull prompt, using default");
            fallback.to_string()
        }
    }
}

/// Replace every `{today}` with the local date.
pub fn render_prompt(template: &str) -> String {
    if template.contains("{today}") {
        template.replace("{today}", &todays_date())
    } else {
        template.to_string()
    }
}
