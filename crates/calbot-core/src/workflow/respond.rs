//! Response synthesis: turn raw Calendly data into a user-facing answer

use std::sync::Arc;

use crate::error::Result;
use crate::provider::LlmProvider;

use super::state::SessionState;

/// Build the synthesizer prompt from the question, the action performed,
/// and the (possibly error-bearing) result data.
pub fn responder_prompt(state: &SessionState) -> String {
    format!(
        "You are a Calendly scheduling assistant. Using ONLY the data below, \
         provide a helpful and clear answer to the user's question.\n\n\
         USER QUESTION:\n{}\n\n\
         ACTION PERFORMED:\n{}\n\n\
         CALENDLY DATA (JSON):\n{}\n\n\
         Format your response in a user-friendly way:\n\
         - For events: show date, time, duration, and invitees\n\
         - For user info: show name, email, and organization\n\
         - For errors: explain what went wrong and suggest next steps\n\
         - Be concise but informative\n",
        state.user_question, state.plan.action, state.action_result
    )
}

/// Produce the final answer.
///
/// Without a provider the raw result string is returned verbatim.
pub async fn respond(
    state: &mut SessionState,
    provider: Option<&Arc<dyn LlmProvider>>,
) -> Result<()> {
    let provider = match provider {
        Some(provider) => provider,
        None => {
            state.output_text = state.action_result.clone();
            return Ok(());
        }
    };

    let content = provider.complete(&responder_prompt(state)).await?;
    state.output_text = content.trim().to_string();

    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::workflow::state::Plan;

    struct EchoPromptProvider;

    #[async_trait]
    impl LlmProvider for EchoPromptProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            Ok(format!("  answer for: {}  ", prompt.len()))
        }
    }

    #[tokio::test]
    async fn test_no_provider_passes_raw_data_through() {
        let mut state = SessionState::new("Who am I?");
        state.action_result = "{\"name\": \"Ada\"}".to_string();

        respond(&mut state, None).await.unwrap();

        assert_eq!(state.output_text, "{\"name\": \"Ada\"}");
    }

    #[tokio::test]
    async fn test_provider_answer_is_trimmed() {
        let provider: Arc<dyn LlmProvider> = Arc::new(EchoPromptProvider);
        let mut state = SessionState::new("Who am I?");
        state.action_result = "data".to_string();

        respond(&mut state, Some(&provider)).await.unwrap();

        assert!(state.output_text.starts_with("answer for:"));
        assert!(!state.output_text.ends_with(' '));
    }

    #[test]
    fn test_prompt_carries_question_action_and_data() {
        let mut state = SessionState::new("What meetings do I have?");
        state.plan = Plan {
            action: "list_events".to_string(),
            params: serde_json::json!({}),
        };
        state.action_result = "{\"collection\": []}".to_string();

        let prompt = responder_prompt(&state);

        assert!(prompt.contains("What meetings do I have?"));
        assert!(prompt.contains("list_events"));
        assert!(prompt.contains("{\"collection\": []}"));
        assert!(prompt.contains("explain what went wrong"));
    }
}
