//! Session state threaded through the workflow steps

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The classifier's decision: which Calendly action to take, with what
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub action: String,
    #[serde(default = "empty_params")]
    pub params: Value,
}

fn empty_params() -> Value {
    Value::Object(serde_json::Map::new())
}

impl Plan {
    /// The fallback plan used when no model is configured or its output
    /// cannot be parsed.
    pub fn default_plan() -> Self {
        Self {
            action: "get_current_user".to_string(),
            params: empty_params(),
        }
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::default_plan()
    }
}

/// Where the current plan came from.
///
/// The fallback is an explicit branch rather than exception-driven
/// control flow, so callers can tell a parsed plan from a degraded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanSource {
    /// Parsed from the model's JSON output
    Parsed,
    /// Fallback: no model configured, or its output failed to parse
    Default,
}

/// Per-question state record.
///
/// Created fresh for each incoming question, mutated by the four steps in
/// order, and discarded once the answer is returned.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The incoming natural-language question; immutable after creation
    pub user_question: String,
    /// Names of the remotely discovered actions; empty until cache_tools runs
    pub available_tools: Vec<String>,
    pub plan: Plan,
    pub plan_source: PlanSource,
    /// Raw or serialized output of invoking the plan's action
    pub action_result: String,
    /// Structured invocation result, when the action returned one
    pub raw_result: Option<Value>,
    /// Final natural-language answer
    pub output_text: String,
    /// Set when the execute step catches an invocation failure
    pub error_text: String,
}

impl SessionState {
    pub fn new(user_question: impl Into<String>) -> Self {
        Self {
            user_question: user_question.into(),
            available_tools: Vec::new(),
            plan: Plan::default_plan(),
            plan_source: PlanSource::Default,
            action_result: String::new(),
            raw_result: None,
            output_text: String::new(),
            error_text: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan() {
        let plan = Plan::default_plan();
        assert_eq!(plan.action, "get_current_user");
        assert_eq!(plan.params, serde_json::json!({}));
    }

    #[test]
    fn test_plan_deserializes_without_params() {
        let plan: Plan = serde_json::from_str(r#"{"action": "list_events"}"#).unwrap();
        assert_eq!(plan.action, "list_events");
        assert_eq!(plan.params, serde_json::json!({}));
    }

    #[test]
    fn test_fresh_state() {
        let state = SessionState::new("Who am I?");
        assert_eq!(state.user_question, "Who am I?");
        assert!(state.available_tools.is_empty());
        assert!(state.output_text.is_empty());
        assert!(state.error_text.is_empty());
    }
}
