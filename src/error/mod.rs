//! Error types for the playground.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Server,
    Api,
    Configuration,
    Serialization,
    ToolExecution,
    Unknown,
}

/// What a user can do about a failed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    RetryLater,
    CheckApiKeys,
    CheckTeamConfig,
    CheckToolService,
    InspectLogs,
}

impl RecoverySuggestion {
    /// One-line hint shown after an error in the CLI.
    pub fn hint(self) -> &'static str {
        match self {
            Self::RetryLater => "The service may be busy; try again in a moment.",
            Self::CheckApiKeys => {
                "Check the provider API keys in your environment or .env file."
            }
            Self::CheckTeamConfig => "Check the model ids and tools in your team config.",
            Self::CheckToolService => "A tool's backing service failed; check its API key and quota.",
            Self::InspectLogs => "Rerun with RUST_LOG=debug for details.",
        }
    }
}

/// Primary error type for all playground operations.
#[derive(Error, Debug)]
pub enum PlaygroundError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Recursion limit of {0} steps reached without a final answer")]
    RecursionLimit(usize),
}

impl PlaygroundError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a tool execution error.
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) => ErrorCategory::Network,
            Self::Configuration(_) | Self::Toml(_) | Self::ModelNotFound(_) => {
                ErrorCategory::Configuration
            }
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::ToolExecution { .. } => ErrorCategory::ToolExecution,
            _ => ErrorCategory::Unknown,
        }
    }

    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::CheckApiKeys,
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server => {
                RecoverySuggestion::RetryLater
            }
            ErrorCategory::Configuration => RecoverySuggestion::CheckTeamConfig,
            ErrorCategory::ToolExecution => RecoverySuggestion::CheckToolService,
            _ => RecoverySuggestion::InspectLogs,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PlaygroundError>;
