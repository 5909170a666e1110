#![allow(dead_code)]

use anyhow::Result;
use graph::{GraphStore, Row, StoreError, FETCH_INSTRUCTIONS, FETCH_SUCCESSOR};
use providers::{BaseProvider, Generation};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// An agent graph held in memory, answering the two walker queries.
#[derive(Default)]
pub struct MemoryGraph {
    agents: HashMap<String, (String, String)>,
    edges: HashMap<String, String>,
    pub instruction_reads: AtomicUsize,
    pub successor_reads: AtomicUsize,
    pub unavailable: AtomicBool,
    /// Fail only the successor query
    pub successor_unavailable: AtomicBool,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agent(mut self, id: &str, system_message: &str, user_message: &str) -> Self {
        self.agents.insert(
            id.to_string(),
            (system_message.to_string(), user_message.to_string()),
        );
        self
    }

    pub fn edge(mut self, from: &str, to: &str) -> Self {
        self.edges.insert(from.to_string(), to.to_string());
        self
    }

    /// The pharmacist -> accuracy checker -> evaluator chain
    pub fn pharmacy_chain() -> Self {
        MemoryGraph::new()
            .agent("A", "You are a pharmacist.", "Explain Amoxicillin.")
            .agent(
                "B",
                "You are an accuracy checker.",
                "Verify the correctness of the pharmacist's explanation.",
            )
            .agent(
                "C",
                "You are an evaluator.",
                "Assess the accuracy checker's feedback and determine its validity and relevance.",
            )
            .edge("A", "B")
            .edge("B", "C")
    }

    pub fn reads(&self) -> (usize, usize) {
        (
            self.instruction_reads.load(Ordering::SeqCst),
            self.successor_reads.load(Ordering::SeqCst),
        )
    }

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap_or_default()
    }
}

impl GraphStore for MemoryGraph {
    async fn run(&self, query: &str, parameters: Value) -> Result<Vec<Row>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 503,
                body: "store unavailable".to_string(),
            });
        }
        let node_id = parameters["node_id"].as_str().unwrap_or_default();

        if query == FETCH_INSTRUCTIONS {
            self.instruction_reads.fetch_add(1, Ordering::SeqCst);
            return Ok(self
                .agents
                .get(node_id)
                .map(|(system, user)| {
                    vec![Self::row(json!({"system_message": system, "user_message": user}))]
                })
                .unwrap_or_default());
        }

        if query == FETCH_SUCCESSOR {
            self.successor_reads.fetch_add(1, Ordering::SeqCst);
            if self.successor_unavailable.load(Ordering::SeqCst) {
                return Err(StoreError::Status {
                    status: 503,
                    body: "store unavailable".to_string(),
                });
            }
            return Ok(self
                .edges
                .get(node_id)
                .and_then(|next| {
                    let (system, user) = self.agents.get(next)?;
                    Some(vec![Self::row(json!({
                        "next_agent_id": next,
                        "system_message": system,
                        "user_message": user,
                    }))])
                })
                .unwrap_or_default());
        }

        Err(StoreError::Query {
            code: "Test.UnknownQuery".to_string(),
            message: query.to_string(),
        })
    }
}

/// Deterministic provider: answers `<system> | <user>` and records every call.
#[derive(Default)]
pub struct EchoProvider {
    pub calls: Mutex<Vec<(String, String)>>,
    /// Reply with this failure when the system message matches
    pub fail_on: Option<(String, u16, String)>,
    /// Return a transport error when the system message matches
    pub unreachable_on: Option<String>,
}

impl EchoProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(system_message: &str, status: u16, error: &str) -> Self {
        EchoProvider {
            fail_on: Some((system_message.to_string(), status, error.to_string())),
            ..Self::default()
        }
    }

    pub fn unreachable_on(system_message: &str) -> Self {
        EchoProvider {
            unreachable_on: Some(system_message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn echo(system_message: &str, user_message: &str) -> String {
    format!("{} | {}", system_message, user_message)
}

impl BaseProvider for EchoProvider {
    async fn generate(&self, system_message: &str, user_message: &str) -> Result<Generation> {
        self.calls
            .lock()
            .unwrap()
            .push((system_message.to_string(), user_message.to_string()));

        if self.unreachable_on.as_deref() == Some(system_message) {
            anyhow::bail!("Failed to send request to OpenAI API: connection refused");
        }
        if let Some((system, status, error)) = &self.fail_on {
            if system == system_message {
                return Ok(Generation::Failure {
                    status: *status,
                    error: error.clone(),
                });
            }
        }
        Ok(Generation::Success {
            text: echo(system_message, user_message),
        })
    }
}
