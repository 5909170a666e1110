use crate::models::{AgentInstructions, Row, StoreError, Successor};
use serde_json::{json, Value};
use std::future::Future;

/// Match an agent by element id and project its two instructions
pub const FETCH_INSTRUCTIONS: &str = "MATCH (a:Agent) \
WHERE elementId(a) = $node_id \
RETURN a.system_message AS system_message, a.user_message AS user_message";

/// Follow the single outgoing `NEXT_AGENT` edge
pub const FETCH_SUCCESSOR: &str = "MATCH (a:Agent)-[:NEXT_AGENT]->(next:Agent) \
WHERE elementId(a) = $node_id \
RETURN elementId(next) AS next_agent_id, next.system_message AS system_message, next.user_message AS user_message";

/// Read access to the agent graph.
///
/// Implementors supply `run`; the typed fetches are built on top of it.
pub trait GraphStore: Send + Sync {
    /// Execute a parameterized query. `parameters` is a JSON object.
    fn run(
        &self,
        query: &str,
        parameters: Value,
    ) -> impl Future<Output = Result<Vec<Row>, StoreError>> + Send;

    /// Zero or one element: the instructions of `node_id`.
    fn fetch_instructions(
        &self,
        node_id: &str,
    ) -> impl Future<Output = Result<Vec<AgentInstructions>, StoreError>> + Send {
        async move {
            let rows = self
                .run(FETCH_INSTRUCTIONS, json!({ "node_id": node_id }))
                .await?;
            Ok(rows.iter().map(AgentInstructions::from_row).collect())
        }
    }

    /// Empty when `node_id` is the last agent of its chain.
    fn fetch_successor(
        &self,
        node_id: &str,
    ) -> impl Future<Output = Result<Vec<Successor>, StoreError>> + Send {
        async move {
            let rows = self
                .run(FETCH_SUCCESSOR, json!({ "node_id": node_id }))
                .await?;
            Ok(rows.iter().filter_map(Successor::from_row).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays canned rows and records every query it sees.
    struct Canned {
        rows: Vec<Row>,
        seen: Mutex<Vec<(String, Value)>>,
    }

    impl GraphStore for Canned {
        async fn run(&self, query: &str, parameters: Value) -> Result<Vec<Row>, StoreError> {
            self.seen
                .lock()
                .unwrap()
                .push((query.to_string(), parameters));
            Ok(self.rows.clone())
        }
    }

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn fetch_instructions_binds_node_id() {
        let store = Canned {
            rows: vec![row(json!({
                "system_message": "You are a pharmacist.",
                "user_message": "Explain Amoxicillin."
            }))],
            seen: Mutex::new(Vec::new()),
        };

        let found = store.fetch_instructions("4:abc:0").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].system_message, "You are a pharmacist.");

        let seen = store.seen.lock().unwrap();
        assert_eq!(seen[0].0, FETCH_INSTRUCTIONS);
        assert_eq!(seen[0].1, json!({"node_id": "4:abc:0"}));
    }

    #[tokio::test]
    async fn fetch_successor_skips_rows_without_id() {
        let store = Canned {
            rows: vec![
                row(json!({"next_agent_id": null, "system_message": "a", "user_message": "b"})),
                row(json!({"next_agent_id": "4:abc:1", "system_message": "c", "user_message": "d"})),
            ],
            seen: Mutex::new(Vec::new()),
        };

        let next = store.fetch_successor("4:abc:0").await.unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].next_id, "4:abc:1");
        assert_eq!(store.seen.lock().unwrap()[0].0, FETCH_SUCCESSOR);
    }
}
