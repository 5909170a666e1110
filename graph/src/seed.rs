use crate::models::StoreError;
use crate::store::GraphStore;
use serde_json::{json, Value};
use tracing::info;

pub const CLEAR_GRAPH: &str = "MATCH (n) DETACH DELETE n";

/// Three agents joined by `NEXT_AGENT`, returning the first one's id
pub const CREATE_DEMO_CHAIN: &str = r#"
CREATE (a1:Agent {
    system_message: "You are a pharmacist.",
    user_message: "Explain Amoxicillin."
})
CREATE (a2:Agent {
    system_message: "You are an accuracy checker.",
    user_message: "Verify the correctness of the pharmacist's explanation."
})
CREATE (a3:Agent {
    system_message: "You are an evaluator.",
    user_message: "Assess the accuracy checker's feedback and determine its validity and relevance."
})
CREATE (a1)-[:NEXT_AGENT]->(a2)
CREATE (a2)-[:NEXT_AGENT]->(a3)
WITH a1
RETURN elementId(a1) AS start_agent_id
"#;

/// Wipes the graph and provisions the pharmacist demo chain.
///
/// Returns the id of the first agent, or `None` if the store created the
/// chain without reporting it.
pub async fn seed_demo_chain<S: GraphStore>(store: &S) -> Result<Option<String>, StoreError> {
    store.run(CLEAR_GRAPH, json!({})).await?;
    let rows = store.run(CREATE_DEMO_CHAIN, json!({})).await?;

    let start = rows
        .first()
        .and_then(|row| row.get("start_agent_id"))
        .and_then(Value::as_str)
        .map(str::to_string);

    if let Some(id) = &start {
        info!(start_agent_id = %id, "Provisioned demo chain");
    }
    Ok(start)
}
