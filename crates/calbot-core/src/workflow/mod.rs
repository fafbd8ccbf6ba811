//! The Calendly scheduling workflow
//!
//! A fixed four-step pipeline: tool discovery, intent classification,
//! action execution, response synthesis. State flows strictly linearly;
//! only the execute step recovers from failures (as data), every other
//! step's error aborts the session.

pub mod catalog;
pub mod classify;
pub mod execute;
pub mod respond;
pub mod state;

use std::sync::Arc;

use crate::config::CalendlyConfig;
use crate::error::Result;
use crate::provider::LlmProvider;

pub use catalog::{cache_tools, CalendarTools, ToolDescriptor, ToolMap};
pub use classify::{classifier_prompt, classify, parse_plan};
pub use execute::{execute, remap_one_off_params};
pub use respond::{respond, responder_prompt};
pub use state::{Plan, PlanSource, SessionState};

/// The four-step scheduling workflow over shared client handles.
///
/// Client handles are read-only and shared; each question gets its own
/// state record, so concurrent runs only share the clients.
pub struct Workflow {
    tools: Arc<dyn CalendarTools>,
    provider: Option<Arc<dyn LlmProvider>>,
    config: CalendlyConfig,
}

impl Workflow {
    pub fn new(
        tools: Arc<dyn CalendarTools>,
        provider: Option<Arc<dyn LlmProvider>>,
        config: CalendlyConfig,
    ) -> Self {
        Self {
            tools,
            provider,
            config,
        }
    }

    /// Run one full pipeline pass and return the final state.
    pub async fn run(&self, question: &str) -> Result<SessionState> {
        let mut state = SessionState::new(question);
        let mut tool_map = ToolMap::new();

        cache_tools(&mut state, &mut tool_map, self.tools.as_ref()).await?;
        classify(&mut state, self.provider.as_ref()).await?;
        execute(&mut state, &tool_map, self.tools.as_ref(), &self.config).await;
        respond(&mut state, self.provider.as_ref()).await?;

        Ok(state)
    }

    /// Run one pass and return only the answer text.
    pub async fn answer(&self, question: &str) -> Result<String> {
        Ok(self.run(question).await?.output_text)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::error::Error;

    /// Calendar fake with a fixed catalog; get_current_user succeeds,
    /// everything else errors.
    struct FakeCalendar {
        fail_invocations: bool,
    }

    #[async_trait]
    impl CalendarTools for FakeCalendar {
        async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
            Ok(vec![
                ToolDescriptor {
                    name: "get_current_user".to_string(),
                    description: "Get the current user".to_string(),
                },
                ToolDescriptor {
                    name: "list_events".to_string(),
                    description: "List scheduled events".to_string(),
                },
            ])
        }

        async fn invoke(&self, name: &str, _arguments: Value) -> Result<Value> {
            if self.fail_invocations {
                return Err(Error::Provider("boom".to_string()));
            }
            match name {
                "get_current_user" => Ok(serde_json::json!({
                    "resource": {"name": "Ada Lovelace", "email": "ada@example.com"}
                })),
                other => Err(Error::Provider(format!("unexpected tool {other}"))),
            }
        }
    }

    #[tokio::test]
    async fn test_who_am_i_without_provider() {
        let workflow = Workflow::new(
            Arc::new(FakeCalendar {
                fail_invocations: false,
            }),
            None,
            CalendlyConfig::default(),
        );

        let state = workflow.run("Who am I?").await.unwrap();

        // No provider: default plan, raw passthrough answer
        assert_eq!(state.plan.action, "get_current_user");
        assert_eq!(state.plan_source, PlanSource::Default);
        assert!(!state.output_text.is_empty());
        assert!(state.output_text.contains("Ada Lovelace"));
        assert!(state.error_text.is_empty());
    }

    #[tokio::test]
    async fn test_invocation_failure_still_reaches_done() {
        let workflow = Workflow::new(
            Arc::new(FakeCalendar {
                fail_invocations: true,
            }),
            None,
            CalendlyConfig::default(),
        );

        let state = workflow.run("Who am I?").await.unwrap();

        assert!(!state.error_text.is_empty());
        assert!(state.action_result.contains("boom"));
        // Pipeline completed and produced an answer anyway
        assert!(!state.output_text.is_empty());
    }

    #[tokio::test]
    async fn test_answer_returns_output_text() {
        let workflow = Workflow::new(
            Arc::new(FakeCalendar {
                fail_invocations: false,
            }),
            None,
            CalendlyConfig::default(),
        );

        let answer = workflow.answer("Who am I?").await.unwrap();
        assert!(answer.contains("ada@example.com"));
    }
}
