//! Action execution: dispatch the plan against the calendar service
//!
//! Invocation failures here are data, not session failures: they are
//! captured into the state and flow on to the responder like any other
//! result.

use serde_json::{json, Value};
use tracing::{error, info};

use crate::config::CalendlyConfig;

use super::catalog::{CalendarTools, ToolMap};
use super::state::SessionState;

/// Resolve and invoke the planned action, storing the outcome in state.
pub async fn execute(
    state: &mut SessionState,
    tool_map: &ToolMap,
    tools: &dyn CalendarTools,
    config: &CalendlyConfig,
) {
    let action = state.plan.action.clone();

    // create_one_off_event_type takes the raw classifier output and maps
    // it onto the exact Calendly API schema
    let params = if action == "create_one_off_event_type" {
        remap_one_off_params(&state.plan.params, config)
    } else {
        state.plan.params.clone()
    };

    info!(%action, %params, "Executing Calendly action");

    if !tool_map.contains_key(&action) {
        state.action_result = format!("Tool '{}' not available", action);
        return;
    }

    match tools.invoke(&action, params.clone()).await {
        Ok(result) => {
            state.action_result = match &result {
                Value::String(text) => text.clone(),
                other => serde_json::to_string_pretty(other).unwrap_or_default(),
            };
            state.raw_result = Some(result);
            info!(%action, "Executed Calendly action");
        }
        Err(e) => {
            error!(%action, %params, error = %e, "Error executing Calendly action");
            state.action_result = format!("Error: {}", e);
            state.error_text = e.to_string();
        }
    }
}

/// Map raw classifier output for `create_one_off_event_type` into the
/// Calendly API schema.
///
/// The classifier emits several synonymous shapes (`event_name` vs
/// `name`, flat availability lists vs a prebuilt `date_setting`); all of
/// them must land on the one shape the server accepts.
pub fn remap_one_off_params(raw: &Value, config: &CalendlyConfig) -> Value {
    let name = str_field(raw, "event_name").or_else(|| str_field(raw, "name"));

    let host = str_field(raw, "host")
        .or_else(|| non_empty(&config.user_uri))
        .map(Value::from)
        .unwrap_or(Value::Null);

    let co_hosts = raw
        .get("co_hosts")
        .filter(|v| v.is_array())
        .cloned()
        .unwrap_or_else(|| json!([]));

    let duration = raw.get("duration").cloned().unwrap_or(Value::Null);

    let timezone = str_field(raw, "timezone")
        .or_else(|| non_empty(&config.timezone))
        .unwrap_or_else(|| "UTC".to_string());

    let date_setting = match raw.get("date_setting").filter(|v| v.is_object()) {
        Some(setting) => setting.clone(),
        None => {
            let days: Vec<&Value> = raw
                .get("availability_days")
                .and_then(|v| v.as_array())
                .map(|days| days.iter().collect())
                .unwrap_or_default();

            // Range defaults to first/last entry; a single day collapses
            // to start == end
            json!({
                "type": "date_range",
                "start_date": days.first().cloned().unwrap_or(&Value::Null),
                "end_date": days.last().cloned().unwrap_or(&Value::Null),
            })
        }
    };

    let location = match raw.get("location").filter(|v| v.is_object()) {
        Some(location) => location.clone(),
        None => {
            let description = str_field(raw, "event_description").unwrap_or_default();
            let details = str_field(raw, "location_details")
                .unwrap_or_else(|| description.clone());

            json!({
                "kind": str_field(raw, "location_kind").unwrap_or_else(|| "physical".to_string()),
                "location": details,
                "additional_info": description,
            })
        }
    };

    json!({
        "name": name,
        "host": host,
        "co_hosts": co_hosts,
        "duration": duration,
        "timezone": timezone,
        "date_setting": date_setting,
        "location": location,
    })
}

/// Non-empty string field lookup
fn str_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::{Error, Result};
    use crate::workflow::catalog::ToolDescriptor;
    use crate::workflow::state::Plan;

    fn test_config() -> CalendlyConfig {
        CalendlyConfig {
            user_uri: "https://api.calendly.com/users/abc".to_string(),
            timezone: "UTC".to_string(),
            ..Default::default()
        }
    }

    fn map_with(names: &[&str]) -> ToolMap {
        names
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    ToolDescriptor {
                        name: name.to_string(),
                        description: String::new(),
                    },
                )
            })
            .collect()
    }

    struct FakeTools {
        result: std::result::Result<Value, String>,
    }

    #[async_trait]
    impl CalendarTools for FakeTools {
        async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
            Ok(Vec::new())
        }

        async fn invoke(&self, _name: &str, _arguments: Value) -> Result<Value> {
            self.result
                .clone()
                .map_err(Error::Provider)
        }
    }

    #[tokio::test]
    async fn test_unknown_action_is_not_fatal() {
        let tools = FakeTools {
            result: Ok(Value::Null),
        };
        let mut state = SessionState::new("q");
        state.plan = Plan {
            action: "delete_everything".to_string(),
            params: serde_json::json!({}),
        };

        execute(&mut state, &map_with(&["get_current_user"]), &tools, &test_config()).await;

        assert_eq!(state.action_result, "Tool 'delete_everything' not available");
        assert!(state.error_text.is_empty());
    }

    #[tokio::test]
    async fn test_invocation_error_captured_as_data() {
        let tools = FakeTools {
            result: Err("connection reset".to_string()),
        };
        let mut state = SessionState::new("q");
        state.plan = Plan::default_plan();

        execute(&mut state, &map_with(&["get_current_user"]), &tools, &test_config()).await;

        assert!(state.action_result.starts_with("Error: "));
        assert!(state.action_result.contains("connection reset"));
        assert!(!state.error_text.is_empty());
    }

    #[tokio::test]
    async fn test_structured_result_is_pretty_printed() {
        let tools = FakeTools {
            result: Ok(serde_json::json!({"resource": {"name": "Ada"}})),
        };
        let mut state = SessionState::new("q");
        state.plan = Plan::default_plan();

        execute(&mut state, &map_with(&["get_current_user"]), &tools, &test_config()).await;

        assert!(state.action_result.contains("\"name\": \"Ada\""));
        assert!(state.raw_result.is_some());
    }

    #[test]
    fn test_remap_deterministic() {
        let raw = serde_json::json!({
            "event_name": "Sync",
            "duration": 30,
            "availability_days": ["2024-01-01", "2024-01-05"],
            "invitee_email": "a@b.com"
        });

        let params = remap_one_off_params(&raw, &test_config());

        assert_eq!(params["name"], "Sync");
        assert_eq!(params["duration"], 30);
        assert_eq!(
            params["date_setting"],
            serde_json::json!({
                "type": "date_range",
                "start_date": "2024-01-01",
                "end_date": "2024-01-05",
            })
        );
        assert_eq!(params["location"]["kind"], "physical");
    }

    #[test]
    fn test_remap_single_day_range() {
        let raw = serde_json::json!({
            "event_name": "Catch-up",
            "availability_days": ["2024-02-02"]
        });

        let params = remap_one_off_params(&raw, &test_config());

        assert_eq!(params["date_setting"]["start_date"], "2024-02-02");
        assert_eq!(params["date_setting"]["end_date"], "2024-02-02");
    }

    #[test]
    fn test_remap_accepts_name_synonym_and_defaults() {
        let raw = serde_json::json!({
            "name": "Planning",
            "event_description": "Quarterly planning"
        });

        let params = remap_one_off_params(&raw, &test_config());

        assert_eq!(params["name"], "Planning");
        assert_eq!(params["host"], "https://api.calendly.com/users/abc");
        assert_eq!(params["co_hosts"], serde_json::json!([]));
        assert_eq!(params["timezone"], "UTC");
        // Free-text description feeds both location fields
        assert_eq!(params["location"]["location"], "Quarterly planning");
        assert_eq!(params["location"]["additional_info"], "Quarterly planning");
    }

    #[test]
    fn test_remap_passes_through_prebuilt_objects() {
        let raw = serde_json::json!({
            "event_name": "Demo",
            "date_setting": {"type": "date_range", "start_date": "2024-03-01", "end_date": "2024-03-02"},
            "location": {"kind": "google_conference"}
        });

        let params = remap_one_off_params(&raw, &test_config());

        assert_eq!(params["date_setting"]["start_date"], "2024-03-01");
        assert_eq!(params["location"]["kind"], "google_conference");
    }

    #[test]
    fn test_remap_empty_days_yields_null_range() {
        let raw = serde_json::json!({"event_name": "Sync"});

        let params = remap_one_off_params(&raw, &test_config());

        assert_eq!(params["date_setting"]["start_date"], Value::Null);
        assert_eq!(params["date_setting"]["end_date"], Value::Null);
    }
}
