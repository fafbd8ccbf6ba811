//! Intent classification: turn the user question into a plan

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Result;
use crate::provider::LlmProvider;

use super::state::{Plan, PlanSource, SessionState};

/// Build the classifier instruction for the given tool catalog.
///
/// The per-action parameter shapes are the exact schemas the Calendly MCP
/// server expects and must stay in sync with it.
pub fn classifier_prompt(available_tools: &[String]) -> String {
    let tools_list = available_tools.join(", ");

    format!(
        "You are a Calendly assistant. Using the following MCP tools: {tools_list}.\n\n\
         Analyze the USER MESSAGE and output ONLY valid JSON with this schema:\n\
         {{\n\
         \x20 action: string,           // One of the available tool names\n\
         \x20 params: object            // Parameters required for that tool\n\
         }}\n\n\
         Available actions and their parameters:\n\
         - get_current_user: no parameters\n\
         - list_events: {{ user_uri?, organization_uri?, status?, max_start_time?, min_start_time?, count? }}\n\
         - get_event: {{ event_uuid: string }}\n\
         - list_event_invitees: {{ event_uuid: string, status?, email?, count? }}\n\
         - cancel_event: {{ event_uuid: string, reason?: string }}\n\
         - list_organization_memberships: {{ user_uri?, organization_uri?, email?, count? }}\n\
         - send_booking_invitation: {{ to_email: string, to_name?: string, event_name: string, event_duration: number, available_days: array, booking_link: string, custom_message?: string }}\n\
         - create_and_invite_workflow: {{ event_name: string, duration: number, availability_days: array, invitee_email: string, invitee_name?: string, event_description?: string, custom_message?: string }}\n\
         - create_one_off_event_type: {{ event_name: string, duration: number, availability_days: array, invitee_email: string, invitee_name?: string, event_description?: string, custom_message?: string }}\n\n\
         Rules:\n\
         - Choose the most appropriate action based on user intent.\n\
         - NEVER wrap objects in strings; output real JSON.\n\
         - If dates are mentioned, convert them to ISO 8601 format (YYYY-MM-DDTHH:MM:SSZ).\n\
         - For list operations, default count to 20 if not specified.\n"
    )
}

/// Parse the model's output as a plan. None when the content is not the
/// expected JSON object.
pub fn parse_plan(content: &str) -> Option<Plan> {
    serde_json::from_str(content).ok()
}

/// Decide what Calendly action the user wants.
///
/// Without a provider the default plan is used unconditionally. With one,
/// unparseable output falls back to the default plan; a failed model call
/// is fatal to the session.
pub async fn classify(
    state: &mut SessionState,
    provider: Option<&Arc<dyn LlmProvider>>,
) -> Result<()> {
    let provider = match provider {
        Some(provider) => provider,
        None => {
            state.plan = Plan::default_plan();
            state.plan_source = PlanSource::Default;
            return Ok(());
        }
    };

    let prompt = format!(
        "{}\nUSER MESSAGE:\n{}\n",
        classifier_prompt(&state.available_tools),
        state.user_question
    );

    let content = provider.complete(&prompt).await?;

    match parse_plan(&content) {
        Some(plan) => {
            debug!(action = %plan.action, "LLM plan");
            state.plan = plan;
            state.plan_source = PlanSource::Parsed;
        }
        None => {
            warn!(
                content = %content,
                "Could not parse LLM plan, defaulting to get_current_user"
            );
            state.plan = Plan::default_plan();
            state.plan_source = PlanSource::Default;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::provider::LlmProvider;

    /// Provider returning a fixed response
    struct ScriptedProvider {
        response: String,
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.response.clone())
        }
    }

    fn provider_with(response: &str) -> Arc<dyn LlmProvider> {
        Arc::new(ScriptedProvider {
            response: response.to_string(),
        })
    }

    #[test]
    fn test_prompt_enumerates_tools() {
        let prompt = classifier_prompt(&[
            "get_current_user".to_string(),
            "list_events".to_string(),
        ]);

        assert!(prompt.contains("get_current_user, list_events"));
        assert!(prompt.contains("create_one_off_event_type"));
        assert!(prompt.contains("default count to 20"));
    }

    #[tokio::test]
    async fn test_no_provider_uses_default_plan() {
        let mut state = SessionState::new("cancel my 3pm");
        classify(&mut state, None).await.unwrap();

        assert_eq!(state.plan, Plan::default_plan());
        assert_eq!(state.plan_source, PlanSource::Default);
    }

    #[tokio::test]
    async fn test_parsed_plan() {
        let provider = provider_with(r#"{"action": "list_events", "params": {"count": 5}}"#);
        let mut state = SessionState::new("what's on my calendar?");

        classify(&mut state, Some(&provider)).await.unwrap();

        assert_eq!(state.plan.action, "list_events");
        assert_eq!(state.plan.params["count"], 5);
        assert_eq!(state.plan_source, PlanSource::Parsed);
    }

    #[tokio::test]
    async fn test_malformed_output_falls_back() {
        let provider = provider_with("Sure! I'd use list_events for that.");
        let mut state = SessionState::new("what's on my calendar?");

        classify(&mut state, Some(&provider)).await.unwrap();

        assert_eq!(state.plan, Plan::default_plan());
        assert_eq!(state.plan_source, PlanSource::Default);
    }
}
