mod models;
mod neo4j;
mod seed;
mod store;

pub use models::{AgentInstructions, Row, StoreError, Successor};
pub use neo4j::Neo4jStore;
pub use seed::{seed_demo_chain, CLEAR_GRAPH, CREATE_DEMO_CHAIN};
pub use store::{GraphStore, FETCH_INSTRUCTIONS, FETCH_SUCCESSOR};
