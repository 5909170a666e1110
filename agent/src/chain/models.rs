use std::fmt::Display;

/// Marker prefixed to the final response when a provider rejects a request
pub const ERROR_MARKER: &str = "Error processing agent";

/// Errors that abort a walk instead of producing a response string
#[derive(Debug)]
pub enum WalkError {
    /// The provider could not be reached or its reply could not be read
    Provider(anyhow::Error),
    /// The walk visited `max_hops` agents and the chain still continued
    MaxHopsExceeded(usize),
}

impl Display for WalkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalkError::Provider(err) => write!(f, "Provider error: {}", err),
            WalkError::MaxHopsExceeded(max) => {
                write!(f, "Chain exceeded the maximum of {} agents", max)
            }
        }
    }
}

impl std::error::Error for WalkError {}

impl From<anyhow::Error> for WalkError {
    fn from(err: anyhow::Error) -> Self {
        WalkError::Provider(err)
    }
}

/// What happened at one agent of the chain
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The agent does not exist; the walk ends with the carried response
    NotFound { node_id: String },
    /// The agent's instructions could not be read; the walk ends with the
    /// carried response
    StoreFailed { node_id: String, error: String },
    /// The agent answered; `next` is the successor to visit, if any
    Answered {
        node_id: String,
        response: String,
        next: Option<String>,
    },
    /// The provider rejected the request; the walk ends with an error string
    Failed {
        node_id: String,
        status: u16,
        error: String,
    },
}

/// Mutable state threaded through one walk
#[derive(Debug)]
pub struct ChainState {
    pub current_node: Option<String>,
    pub carried_response: String,
    pub visited: usize,
}

/// The user instruction sent for an agent: its own task followed by the
/// previous agent's output.
pub fn compose_prompt(user_message: &str, carried_response: &str) -> String {
    format!("{} {}", user_message, carried_response)
}

/// The final response returned when the provider rejects a request.
pub fn failure_response(error: &str) -> String {
    format!("{}: LLM API Error: {}", ERROR_MARKER, error)
}
