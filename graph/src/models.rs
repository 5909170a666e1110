use serde_json::{Map, Value};
use thiserror::Error;

/// One result row, keyed by column name in projection order
pub type Row = Map<String, Value>;

const NO_SYSTEM_MESSAGE: &str = "No system message found";
const NO_USER_MESSAGE: &str = "No user message found";

/// Why a query produced no rows. Kept apart from an empty result so callers
/// can tell "nothing there" from "store unreachable".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Graph store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Graph store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Query failed: {code}: {message}")]
    Query { code: String, message: String },

    #[error("Malformed graph store response: {0}")]
    Malformed(String),
}

/// The two instructions an agent node carries
#[derive(Debug, Clone, PartialEq)]
pub struct AgentInstructions {
    pub system_message: String,
    pub user_message: String,
}

impl AgentInstructions {
    pub fn from_row(row: &Row) -> Self {
        AgentInstructions {
            system_message: text(row, "system_message").unwrap_or_else(|| NO_SYSTEM_MESSAGE.to_string()),
            user_message: text(row, "user_message").unwrap_or_else(|| NO_USER_MESSAGE.to_string()),
        }
    }
}

/// The agent reached over a node's outgoing `NEXT_AGENT` edge
#[derive(Debug, Clone, PartialEq)]
pub struct Successor {
    pub next_id: String,
    pub system_message: String,
    pub user_message: String,
}

impl Successor {
    /// `None` when the row carries no usable successor id.
    pub fn from_row(row: &Row) -> Option<Self> {
        let next_id = text(row, "next_agent_id")?;
        let instructions = AgentInstructions::from_row(row);
        Some(Successor {
            next_id,
            system_message: instructions.system_message,
            user_message: instructions.user_message,
        })
    }
}

/// Element ids are strings; numeric ids are accepted and stringified.
fn text(row: &Row, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
