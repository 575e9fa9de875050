//! Per-role settings for the supervisor team, with TOML overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::PlaygroundError;
use crate::prompts::defaults;

pub const DEFAULT_MODEL: &str = "openai/gpt-4.1-mini";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TeamRole {
    Supervisor,
    Scrape,
    Research,
    Writing,
}

impl TeamRole {
    /// Display name of the agent playing this role.
    pub fn agent_name(self) -> &'static str {
        match self {
            Self::Supervisor => "supervisor",
            Self::Scrape => "scrape_agent",
            Self::Research => "general_research_agent",
            Self::Writing => "writing_agent",
        }
    }

    /// Models this role may run on.
    pub fn allowed_models(self) -> &'static [&'static str] {
        match self {
            Self::Supervisor => &[
                "openai/gpt-4.1",
                "openai/gpt-4.1-mini",
                "openai/gpt-4.1-nano",
                "openrouter/x-ai/grok-4",
                "openrouter/google/gemini-pro-1.5",
            ],
            Self::Scrape => &[
                "openai/gpt-4.1",
                "openai/gpt-4.1-mini",
                "openai/gpt-4.1-nano",
                "openrouter/grok-4",
                "openrouter/anthropic/claude-3-haiku",
                "openrouter/meta-llama/llama-3.1-8b-instruct",
            ],
            Self::Research | Self::Writing => &[
                "openai/gpt-4.1",
                "openai/gpt-4.1-mini",
                "openai/gpt-4.1-nano",
                "openrouter/grok-4",
                "openrouter/google/gemini-pro-1.5",
                "openrouter/anthropic/claude-3-haiku",
            ],
        }
    }

    fn default_settings(self) -> RoleSettings {
        let (system_prompt, tools): (&str, &[&str]) = match self {
            Self::Supervisor => (defaults::SUPERVISOR_PROMPT, &[]),
            Self::Scrape => (
                defaults::SCRAPE_PROMPT,
                &["scrape_with_firecrawl", "crawl_with_firecrawl", "get_todays_date"],
            ),
            Self::Research => (defaults::RESEARCH_PROMPT, &["advanced_research", "get_todays_date"]),
            Self::Writing => (defaults::WRITING_PROMPT, &["advanced_research", "get_todays_date"]),
        };
        RoleSettings {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: system_prompt.to_string(),
            tools: tools.iter().map(|t| t.to_string()).collect(),
            prompt: None,
        }
    }
}

/// A prompt to pull from the prompt hub in place of `system_prompt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRef {
    pub name: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSettings {
    pub model: String,
    /// Used as is, or as the fallback when `prompt` cannot be pulled.
    pub system_prompt: String,
    pub tools: Vec<String>,
    pub prompt: Option<PromptRef>,
}

/// Settings of the whole team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSettings {
    pub supervisor: RoleSettings,
    pub scrape: RoleSettings,
    pub research: RoleSettings,
    pub writing: RoleSettings,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            supervisor: TeamRole::Supervisor.default_settings(),
            scrape: TeamRole::Scrape.default_settings(),
            research: TeamRole::Research.default_settings(),
            writing: TeamRole::Writing.default_settings(),
        }
    }
}

impl TeamSettings {
    /// Defaults with `overrides` applied.
    pub fn from_overrides(overrides: TeamOverrides) -> Self {
        let mut settings = Self::default();
        settings.apply(overrides);
        settings
    }

    pub fn role(&self, role: TeamRole) -> &RoleSettings {
        match role {
            TeamRole::Supervisor => &self.supervisor,
            TeamRole::Scrape => &self.scrape,
            TeamRole::Research => &self.research,
            TeamRole::Writing => &self.writing,
        }
    }

    fn role_mut(&mut self, role: TeamRole) -> &mut RoleSettings {
        match role {
            TeamRole::Supervisor => &mut self.supervisor,
            TeamRole::Scrape => &mut self.scrape,
            TeamRole::Research => &mut self.research,
            TeamRole::Writing => &mut self.writing,
        }
    }

    pub fn apply(&mut self, overrides: TeamOverrides) {
        let TeamOverrides {
            supervisor,
            scrape,
            research,
            writing,
        } = overrides;
        for (role, role_overrides) in [
            (TeamRole::Supervisor, supervisor),
            (TeamRole::Scrape, scrape),
            (TeamRole::Research, research),
            (TeamRole::Writing, writing),
        ] {
            if let Some(role_overrides) = role_overrides {
                role_overrides.apply_to(self.role_mut(role));
            }
        }
    }

    /// Check every role's model against that role's allow-list.
    pub fn validate(&self) -> Result<(), PlaygroundError> {
        for role in TeamRole::iter() {
            let model = &self.role(role).model;
            if !role.allowed_models().contains(&model.as_str()) {
                return Err(PlaygroundError::Configuration(format!(
                    "model '{model}' is not allowed for the {role} role (allowed: {})",
                    role.allowed_models().join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Caller-supplied changes to the defaults. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TeamOverrides {
    pub supervisor: Option<RoleOverrides>,
    pub scrape: Option<RoleOverrides>,
    pub research: Option<RoleOverrides>,
    pub writing: Option<RoleOverrides>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoleOverrides {
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub tools: Option<Vec<String>>,
    /// Prompt hub name.
    pub prompt: Option<String>,
    pub prompt_version: Option<String>,
}

impl RoleOverrides {
    fn apply_to(self, settings: &mut RoleSettings) {
        if let Some(model) = self.model {
            settings.model = model;
        }
        if let Some(system_prompt) = self.system_prompt {
            settings.system_prompt = system_prompt;
        }
        if let Some(tools) = self.tools {
            settings.tools = tools;
        }
        if let Some(name) = self.prompt {
            settings.prompt = Some(PromptRef {
                name,
                version: self.prompt_version,
            });
        }
    }
}

impl TeamOverrides {
    pub fn from_toml_str(source: &str) -> Result<Self, PlaygroundError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlaygroundError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
