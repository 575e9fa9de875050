//! Assembly of the default team: scrape, research and writing agents under
//! one supervisor.

pub mod settings;

pub use settings::{PromptRef, RoleOverrides, RoleSettings, TeamOverrides, TeamRole, TeamSettings};

use crate::agent::{AgentConfig, AgentFactory};
use crate::error::PlaygroundError;
use crate::prompts::{prompt_with_fallback, render_prompt, PromptSource};
use crate::supervisor::Supervisor;

const SUB_AGENT_ROLES: [TeamRole; 3] = [TeamRole::Scrape, TeamRole::Research, TeamRole::Writing];

/// Validate `settings`, build the three sub-agents and the supervisor.
///
/// Roles with a prompt reference pull it from `prompts`; without a source,
/// or when the pull fails, the role's `system_prompt` is used.
pub async fn assemble_team(
    factory: &AgentFactory,
    settings: &TeamSettings,
    prompts: Option<&dyn PromptSource>,
) -> Result<Supervisor, PlaygroundError> {
    settings.validate()?;

    let mut sub_agents = Vec::with_capacity(SUB_AGENT_ROLES.len());
    for role in SUB_AGENT_ROLES {
        let config = role_config(role, settings.role(role), prompts).await;
        sub_agents.push(factory.build_agent(&config)?);
    }

    let supervisor_config = role_config(TeamRole::Supervisor, &settings.supervisor, prompts).await;
    factory.build_supervisor(sub_agents, &supervisor_config)
}

async fn role_config(
    role: TeamRole,
    settings: &RoleSettings,
    prompts: Option<&dyn PromptSource>,
) -> AgentConfig {
    let template = match (&settings.prompt, prompts) {
        (Some(prompt), Some(source)) => {
            prompt_with_fallback(
                source,
                &prompt.name,
                &settings.system_prompt,
                prompt.version.as_deref(),
            )
            .await
        }
        _ => settings.system_prompt.clone(),
    };
    AgentConfig::new(
        role.agent_name(),
        settings.model.clone(),
        render_prompt(&template),
        settings.tools.iter().cloned(),
    )
}
