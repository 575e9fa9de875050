//! Convenience re-exports for common use.

pub use crate::agent::{Agent, AgentConfig, AgentFactory, AgentOutput};
pub use crate::aggregator::{
    Aggregator, LangGraphSchema, NativeSchema, ToolCallRecord, ToolResultRecord, TurnResult,
    TurnStatus, TurnUpdate,
};
pub use crate::config::PlaygroundConfig;
pub use crate::error::{PlaygroundError, Result};
pub use crate::events::{AgentEvent, AgentEventPayload};
pub use crate::models::LanguageModel;
pub use crate::provider::ModelProvider;
pub use crate::session::{ConversationTurn, Session, SessionManager, TurnRunner};
pub use crate::supervisor::Supervisor;
pub use crate::team::{assemble_team, TeamOverrides, TeamSettings};
pub use crate::tools::{AgentTool, AgentToolParameters, Tool, ToolArguments, ToolRegistry};
pub use crate::types::{GenerationSettings, ModelMessage, Role};
