pub mod iter;
pub mod models;
pub mod runner;

pub use iter::ChainIter;
pub use models::{compose_prompt, failure_response, ChainState, Step, WalkError, ERROR_MARKER};
pub use runner::ChainWalker;
