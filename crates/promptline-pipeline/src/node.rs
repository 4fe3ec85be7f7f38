//! The node abstraction executed by the [`crate::runner::Pipeline`].
//!
//! A node is a single-purpose step: it reads the fields it needs from the
//! shared [`PipelineState`], performs at most one model invocation, and
//! contributes exactly one output field via [`PartialUpdate`].  Failures are
//! ordinary values ([`NodeFailure`]), never panics—an erroring provider call
//! must degrade into a partial pipeline result, not a crashed process.

use std::{future::Future, marker::PhantomData, pin::Pin};

use promptline_core::generic::{FailureKind, InvocationResult};

use crate::state::{PartialUpdate, PipelineState};

/// What a node hands back to the runner.
pub type NodeResult = Result<PartialUpdate, NodeFailure>;

/// A recoverable, node-local failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl NodeFailure {
    pub fn provider(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::ProviderError,
            message: message.into(),
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::InvalidPayload,
            message: message.into(),
        }
    }
}

/// Unwrap a completed invocation, or convert the failure for the runner.
///
/// The usual tail of a provider-calling node:
///
/// ```rust,ignore
/// let result = invoker.invoke(request).await;
/// let text = completion_text(result)?;
/// Ok(PartialUpdate::text("description", text))
/// ```
pub fn completion_text(result: InvocationResult) -> Result<String, NodeFailure> {
    match result {
        InvocationResult::Completed { text, .. } => Ok(text),
        InvocationResult::Failed { kind, message } => Err(NodeFailure { kind, message }),
    }
}

/// One step of a pipeline.
///
/// `run` borrows the state immutably; all mutation happens in the runner when
/// it merges the returned [`PartialUpdate`].  The returned future is the sole
/// suspension point of the step (the provider round-trip).
pub trait PipelineNode: Send + Sync {
    /// Name used in failure markers and log events.
    fn name(&self) -> &str;

    /// The single state field this node is allowed to produce.
    fn output_field(&self) -> &str;

    fn run<'a>(
        &'a self,
        state: &'a PipelineState,
    ) -> Pin<Box<dyn Future<Output = NodeResult> + Send + 'a>>;
}

/// Adapter turning a closure into a [`PipelineNode`].
///
/// The closure receives the state synchronously, extracts (clones) whatever
/// it needs, and returns an owned future.  That split keeps lifetimes trivial
/// while still allowing the async part to await a provider call:
///
/// ```rust
/// use promptline_pipeline::{node::FnNode, state::PartialUpdate};
///
/// let node = FnNode::new("echo", "reply", |state| {
///     let input = state.require_str("input").map(str::to_owned);
///     async move { Ok(PartialUpdate::text("reply", input?)) }
/// });
/// ```
pub struct FnNode<F, Fut> {
    name: String,
    output_field: String,
    f: F,
    _marker: PhantomData<fn() -> Fut>,
}

impl<F, Fut> FnNode<F, Fut>
where
    F: Fn(&PipelineState) -> Fut + Send + Sync,
    Fut: Future<Output = NodeResult> + Send + 'static,
{
    pub fn new(name: impl Into<String>, output_field: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            output_field: output_field.into(),
            f,
            _marker: PhantomData,
        }
    }
}

impl<F, Fut> PipelineNode for FnNode<F, Fut>
where
    F: Fn(&PipelineState) -> Fut + Send + Sync,
    Fut: Future<Output = NodeResult> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn output_field(&self) -> &str {
        &self.output_field
    }

    fn run<'a>(
        &'a self,
        state: &'a PipelineState,
    ) -> Pin<Box<dyn Future<Output = NodeResult> + Send + 'a>> {
        Box::pin((self.f)(state))
    }
}
