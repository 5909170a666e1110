//! Request/response entry points mirroring single walker steps.
//!
//! Each handler takes a JSON event and always answers with a
//! [`HandlerResponse`]; failures are status codes, never errors.

use crate::chain::{compose_prompt, failure_response};
use config::ConfigError;
use graph::GraphStore;
use providers::{BaseProvider, Generation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

/// A status code plus a JSON body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Value,
}

impl HandlerResponse {
    pub fn ok(body: Value) -> Self {
        HandlerResponse {
            status_code: 200,
            body,
        }
    }

    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        HandlerResponse {
            status_code,
            body: json!({ "error": message.into() }),
        }
    }

    /// The provider or store could not be built from the configuration
    pub fn configuration_failure(err: &ConfigError) -> Self {
        error!(error = %err, "Configuration failure");
        HandlerResponse::error(500, err.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AgentData {
    #[serde(default)]
    pub system_message: String,
    #[serde(default)]
    pub user_message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AgentEvent {
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub agent_data: AgentData,
    #[serde(default)]
    pub prev_response: Option<String>,
}

fn parse_event(event: &Value) -> Result<AgentEvent, HandlerResponse> {
    AgentEvent::deserialize(event)
        .map_err(|e| HandlerResponse::error(400, format!("Invalid event: {}", e)))
}

fn require_node_id(event: &AgentEvent) -> Result<&str, HandlerResponse> {
    event
        .node_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| HandlerResponse::error(400, "Missing required field: node_id"))
}

/// Returns `{system_message, user_message}` for `event.node_id`.
pub async fn get_agent_messages<S: GraphStore>(store: &S, event: &Value) -> HandlerResponse {
    let event = match parse_event(event) {
        Ok(event) => event,
        Err(response) => return response,
    };
    let node_id = match require_node_id(&event) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match store.fetch_instructions(node_id).await {
        Ok(found) => match found.into_iter().next() {
            Some(agent) => HandlerResponse::ok(json!({
                "system_message": agent.system_message,
                "user_message": agent.user_message,
            })),
            None => HandlerResponse::error(404, format!("No agent found with node_id {}", node_id)),
        },
        Err(e) => HandlerResponse::error(500, e.to_string()),
    }
}

/// Returns `{next_agent_id}` for the successor of `event.node_id`.
pub async fn get_next_agent<S: GraphStore>(store: &S, event: &Value) -> HandlerResponse {
    let event = match parse_event(event) {
        Ok(event) => event,
        Err(response) => return response,
    };
    let node_id = match require_node_id(&event) {
        Ok(id) => id,
        Err(response) => return response,
    };
    info!("Looking for next agent after node_id: {}", node_id);

    match store.fetch_successor(node_id).await {
        Ok(found) => match found.into_iter().next() {
            Some(next) => {
                info!("Found next agent with id: {}", next.next_id);
                HandlerResponse::ok(json!({ "next_agent_id": next.next_id }))
            }
            None => {
                info!("No next agent found for node_id: {}", node_id);
                HandlerResponse::error(404, format!("No next agent found for node_id {}", node_id))
            }
        },
        Err(e) => HandlerResponse::error(500, e.to_string()),
    }
}

/// Runs one agent: composes the prompt from `agent_data` and
/// `prev_response` and returns `{response, node_id}`.
pub async fn process_agent<P: BaseProvider>(provider: &P, event: &Value) -> HandlerResponse {
    let event = match parse_event(event) {
        Ok(event) => event,
        Err(response) => return response,
    };

    let AgentData {
        system_message,
        user_message,
    } = &event.agent_data;
    if system_message.is_empty() || user_message.is_empty() {
        let message = "Missing system_message or user_message in agent_data";
        error!("{}", message);
        return HandlerResponse::error(400, message);
    }

    let prompt = compose_prompt(user_message, event.prev_response.as_deref().unwrap_or_default());
    match provider.generate(system_message, &prompt).await {
        Ok(Generation::Success { text }) => HandlerResponse::ok(json!({
            "response": text,
            "node_id": event.node_id,
        })),
        Ok(Generation::Failure { status, error }) => {
            error!(status, "LLM API Error: {}", error);
            HandlerResponse {
                status_code: 500,
                body: json!({
                    "error": failure_response(&error),
                    "upstream_status": status,
                }),
            }
        }
        Err(e) => {
            error!(error = %e, "LLM request failed");
            HandlerResponse::error(500, format!("{:#}", e))
        }
    }
}
