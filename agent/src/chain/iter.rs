use crate::chain::models::{compose_prompt, failure_response, ChainState, Step, WalkError};
use graph::GraphStore;
use providers::{BaseProvider, Generation};
use tracing::{error, info, warn};

/// A struct to hold the state of a chain walk
///
/// Each call to [`ChainIter::next`] visits exactly one agent: one
/// instruction read, one provider call, one successor read.
pub struct ChainIter<'a, S: GraphStore, P: BaseProvider> {
    store: &'a S,
    provider: &'a P,
    max_hops: Option<usize>,
    state: ChainState,
    finished: bool,
    result: Option<String>,
}

impl<'a, S: GraphStore, P: BaseProvider> ChainIter<'a, S, P> {
    pub fn new(
        store: &'a S,
        provider: &'a P,
        max_hops: Option<usize>,
        node_id: String,
        carried_response: String,
    ) -> Self {
        ChainIter {
            store,
            provider,
            max_hops,
            state: ChainState {
                current_node: Some(node_id),
                carried_response,
                visited: 0,
            },
            finished: false,
            result: None,
        }
    }

    /// Get the result of the walk, once it has finished
    pub fn get_result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn into_result(self) -> Option<String> {
        self.result
    }

    /// Get the current state
    pub fn state(&self) -> &ChainState {
        &self.state
    }

    /// Visit the next agent in the chain
    pub async fn next(&mut self) -> Option<Result<Step, WalkError>> {
        if self.finished {
            return None;
        }

        let Some(node_id) = self.state.current_node.take() else {
            return self.finish(self.state.carried_response.clone(), None);
        };

        if let Some(max) = self.max_hops {
            if self.state.visited >= max {
                error!(max_hops = max, node_id = %node_id, "Chain exceeded max hops");
                self.finished = true;
                return Some(Err(WalkError::MaxHopsExceeded(max)));
            }
        }

        let instructions = match self.store.fetch_instructions(&node_id).await {
            Ok(found) => found.into_iter().next(),
            Err(e) => {
                error!(node_id = %node_id, error = %e, "Failed to read agent instructions");
                let carried = self.state.carried_response.clone();
                return self.finish(
                    carried,
                    Some(Step::StoreFailed {
                        node_id,
                        error: e.to_string(),
                    }),
                );
            }
        };

        let Some(agent) = instructions else {
            warn!("No agent found with node_id {}", node_id);
            let carried = self.state.carried_response.clone();
            return self.finish(carried, Some(Step::NotFound { node_id }));
        };

        self.state.visited += 1;
        let prompt = compose_prompt(&agent.user_message, &self.state.carried_response);

        let generation = match self.provider.generate(&agent.system_message, &prompt).await {
            Ok(generation) => generation,
            Err(e) => {
                self.finished = true;
                return Some(Err(WalkError::Provider(e)));
            }
        };

        let response = match generation {
            Generation::Success { text } => text,
            Generation::Failure { status, error } => {
                error!(node_id = %node_id, status, "LLM API Error: {}", error);
                return self.finish(
                    failure_response(&error),
                    Some(Step::Failed {
                        node_id,
                        status,
                        error,
                    }),
                );
            }
        };
        info!("Agent (ID {}) Response: {}", node_id, response);

        let next = match self.store.fetch_successor(&node_id).await {
            Ok(found) => found.into_iter().next().map(|s| s.next_id),
            Err(e) => {
                error!(node_id = %node_id, error = %e, "Failed to read successor");
                None
            }
        };

        let step = Step::Answered {
            node_id,
            response: response.clone(),
            next: next.clone(),
        };

        match next {
            Some(next_id) => {
                self.state.current_node = Some(next_id);
                self.state.carried_response = response;
                Some(Ok(step))
            }
            None => {
                info!("Reached the last agent.");
                self.finish(response, Some(step))
            }
        }
    }

    fn finish(&mut self, result: String, step: Option<Step>) -> Option<Result<Step, WalkError>> {
        self.finished = true;
        self.result = Some(result);
        step.map(Ok)
    }
}
