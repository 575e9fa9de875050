//! Model selection and parsing.

use std::str::FromStr;

use super::LanguageModel;
use crate::error::PlaygroundError;

/// Parse a "provider/model-name" string into a LanguageModel.
pub struct ModelSelector;

impl ModelSelector {
    /// Parse "provider/model_id" into a LanguageModel.
    ///
    /// Only the first `/` separates the provider, so OpenRouter ids keep their
    /// vendor prefix: "openrouter/x-ai/grok-4" routes `x-ai/grok-4` through
    /// OpenRouter.
    pub fn parse(s: &str) -> Result<LanguageModel, PlaygroundError> {
        let (provider, model_id) = s.trim().split_once('/').ok_or_else(|| {
            PlaygroundError::Configuration(format!(
                "Invalid model id '{s}': expected 'provider/model-name'"
            ))
        })?;

        if provider.is_empty() || model_id.is_empty() {
            return Err(PlaygroundError::Configuration(format!(
                "Invalid model id '{s}': provider and model name must be non-empty"
            )));
        }

        match provider {
            #[cfg(feature = "openai")]
            "openai" => {
                use super::openai::OpenAiModel;
                let m = OpenAiModel::from_str(model_id)
                    .unwrap_or_else(|_| OpenAiModel::Other(model_id.to_string()));
                if !m.is_gpt41_family() {
                    tracing::debug!(model_id, "using OpenAI model outside the gpt-4.1 family");
                }
                Ok(LanguageModel::OpenAi(m))
            }
            #[cfg(feature = "openrouter")]
            "openrouter" => Ok(LanguageModel::OpenRouter(model_id.to_string())),
            _ => Err(PlaygroundError::Configuration(format!(
                "Unsupported model provider '{provider}' in '{s}'"
            ))),
        }
    }
}

impl FromStr for LanguageModel {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelSelector::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::openai::OpenAiModel;

    #[test]
    fn parses_known_openai_model() {
        let model = ModelSelector::parse("openai/gpt-4.1-mini").unwrap();
        assert_eq!(model, LanguageModel::OpenAi(OpenAiModel::Gpt41Mini));
        assert_eq!(model.to_string(), "openai/gpt-4.1-mini");
    }

    #[test]
    fn unknown_openai_model_is_kept_verbatim() {
        let model = ModelSelector::parse("openai/gpt-9").unwrap();
        assert_eq!(model, LanguageModel::OpenAi(OpenAiModel::Other("gpt-9".into())));
        assert_eq!(model.model_id(), "gpt-9");
    }

    #[test]
    fn openrouter_keeps_vendor_prefix() {
        let model = ModelSelector::parse("openrouter/x-ai/grok-4").unwrap();
        assert_eq!(model.provider_name(), "openrouter");
        assert_eq!(model.model_id(), "x-ai/grok-4");
    }

    #[test]
    fn rejects_missing_separator() {
        let err = ModelSelector::parse("gpt-4.1").unwrap_err();
        assert!(matches!(err, PlaygroundError::Configuration(_)));
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(ModelSelector::parse("openai/").is_err());
        assert!(ModelSelector::parse("/gpt-4.1").is_err());
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = ModelSelector::parse("anthropic/claude-3-haiku").unwrap_err();
        assert!(err.to_string().contains("Unsupported model provider"));
    }
}
