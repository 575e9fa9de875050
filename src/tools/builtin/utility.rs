use async_trait::async_trait;
use serde_json::Value;

use crate::error::PlaygroundError;
use crate::tools::{AgentToolParameters, Tool, ToolArguments, ToolExecutionContext};

/// Local date as `YYYY-MM-DD`.
pub fn todays_date() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// `get_todays_date`: takes no arguments.
#[derive(Debug)]
pub struct TodaysDateTool {
    parameters: AgentToolParameters,
}

impl TodaysDateTool {
    pub fn new() -> Self {
        Self {
            parameters: AgentToolParameters::empty(),
        }
    }
}

impl Default for TodaysDateTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for TodaysDateTool {
    fn name(&self) -> &str {
        "get_todays_date"
    }

    fn description(&self) -> &str {
        "Get the current date in YYYY-MM-DD format."
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        _args: &ToolArguments,
        _ctx: &ToolExecutionContext,
    ) -> Result<Value, PlaygroundError> {
        Ok(Value::String(todays_date()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn date_is_iso_formatted() {
        let out = TodaysDateTool::new()
            .execute(&ToolArguments::new(Value::Null), &ToolExecutionContext::default())
            .await
            .unwrap();
        let text = out.as_str().unwrap();
        assert!(chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok());
    }
}
