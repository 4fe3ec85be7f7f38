//! Generic, lightweight invoker that executes an [`InvokeRequest`] against a
//! single concrete backend.
//!
//! The invoker is **generic over the backend type `B`**, so the compiler
//! guarantees that the message type produced by your prompt matches what the
//! backend expects—no dynamic dispatch or object-safety hurdles in user code.
//!
//! Its one job beyond delegation is the *recovery boundary* promised to
//! pipeline code: whatever the backend returns, [`ModelInvoker::invoke`]
//! yields an [`InvocationResult`].  Transport errors, rate limits and
//! malformed provider responses become `InvocationResult::Failed` values;
//! callers never see an unhandled fault from this layer.
//!
//! ```rust,no_run
//! use promptline_core::{ModelInvoker, generic::Turn,
//!                       model::{Model, OpenAiModel},
//!                       provider::InvokeRequest};
//! # async fn demo<B: promptline_core::provider::ChatCompletionProvider>(backend: B)
//! # where Turn: Into<B::Message> {
//! let invoker = ModelInvoker::new(backend);
//! let request = InvokeRequest::new(
//!     vec![Turn::user("Say hello!")],
//!     Model::OpenAi(OpenAiModel::Gpt4oMini),
//! ).with_max_tokens(200);
//!
//! let result = invoker.invoke(request).await;
//! if let Some(text) = result.text() {
//!     println!("{text}");
//! }
//! # }
//! ```

use std::sync::Arc;

use crate::{
    generic::{FailureKind, InvocationResult},
    provider::{ChatCompletionProvider, InvokeRequest},
};

/// An invoker bound to a single provider.
///
/// Clone the invoker if you need to share it across tasks—the backend sits
/// behind an `Arc`, so clones are cheap.
#[derive(Debug)]
pub struct ModelInvoker<B> {
    backend: Arc<B>,
}

impl<B> Clone for ModelInvoker<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> ModelInvoker<B>
where
    B: ChatCompletionProvider,
{
    /// Create a new invoker that delegates all calls to `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Access the underlying backend (e.g. to tweak provider-specific settings).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Perform exactly one completion call.
    ///
    /// The provider call is the single suspension point of a pipeline run;
    /// its latency is bounded by the transport timeout the backend was built
    /// with.  Every backend error is converted into
    /// [`InvocationResult::Failed`] with [`FailureKind::ProviderError`].
    pub async fn invoke<M>(&self, request: InvokeRequest<M>) -> InvocationResult
    where
        M: Into<B::Message> + Send + Sync,
    {
        match self.backend.chat_complete(request).await {
            Ok(reply) => InvocationResult::Completed {
                text: reply.text,
                usage: reply.usage,
            },
            Err(err) => InvocationResult::Failed {
                kind: FailureKind::ProviderError,
                message: err.to_string(),
            },
        }
    }
}
