//! The sequential pipeline runner.
//!
//! Terminal behaviour, guaranteed for any node sequence:
//!
//! 1. Nodes execute strictly in order; after all nodes have run the final
//!    state is returned.
//! 2. On the first node failure the runner stops immediately, records the
//!    failure (node name, kind, reason) in the state’s error slot and
//!    returns.  Updates applied by earlier nodes are **not rolled back**—
//!    partial progress stays visible so a caller can report, for instance,
//!    that the description succeeded while the diagnosis failed.
//!
//! There is no parallelism, looping or conditional branching: later nodes
//! depend on earlier output, and the one blocking operation per node is the
//! provider round-trip.  An extension to a DAG-shaped runner would have to
//! preserve the two terminal behaviours and the no-rollback rule above.

use crate::{
    node::PipelineNode,
    state::PipelineState,
};

/// A fixed, ordered sequence of nodes.
#[derive(Default)]
pub struct Pipeline {
    nodes: Vec<Box<dyn PipelineNode>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node, fluent style.  Order of calls is execution order.
    pub fn with_node(mut self, node: impl PipelineNode + 'static) -> Self {
        self.nodes.push(Box::new(node));
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Execute all nodes against `state` and return the final state.
    ///
    /// A state that already carries a failure marker runs nothing and is
    /// returned unchanged.
    pub async fn run(&self, mut state: PipelineState) -> PipelineState {
        for node in &self.nodes {
            if state.is_failed() {
                break;
            }
            tracing::debug!(node = node.name(), "running pipeline node");
            match node.run(&state).await {
                Ok(mut update) => {
                    let dropped = update.retain_field(node.output_field());
                    if !dropped.is_empty() {
                        tracing::warn!(
                            node = node.name(),
                            fields = ?dropped,
                            "node attempted to write fields it does not own; dropped"
                        );
                    }
                    state.apply(update);
                }
                Err(failure) => {
                    tracing::warn!(
                        node = node.name(),
                        kind = %failure.kind,
                        message = %failure.message,
                        "pipeline node failed; stopping run"
                    );
                    state.record_failure(node.name(), failure);
                }
            }
        }
        state
    }
}
