pub mod chain;
pub mod handlers;

pub use chain::{ChainIter, ChainState, ChainWalker, Step, WalkError};
pub use handlers::HandlerResponse;
