//! The backend trait and the parameter bundle handed to it.
//!
//! A **backend** turns a chat prompt into a network call to a concrete
//! provider (OpenAI, an OpenAI-compatible gateway, a test fake, …) and parses
//! the reply.  The trait is intentionally minimal:
//!
//! * **One associated type** – the in-memory `Message` representation this
//!   provider accepts.
//! * **One async-ish method** – `chat_complete`, which performs a *single*
//!   non-streaming round-trip.
//!
//! The method returns a `Pin<Box<dyn Future>>` instead of being an
//! `async fn`, so the trait needs no `async_trait` dependency.  Because the
//! method borrows `&self` only for the duration of the call, implementations
//! are expected to clone their (cheap, `Arc`-backed) transport handle into
//! the returned future.

use std::{future::Future, pin::Pin};

use crate::{error::Result, generic::CompletionReply, model::Model};

/// Backend capable of a single, non-streaming chat completion round-trip.
///
/// Exactly one network call per `chat_complete` invocation; no retry happens
/// at this layer unless the concrete adapter was explicitly configured with a
/// retry policy.
pub trait ChatCompletionProvider: Send + Sync {
    /// Chat message type consumed by this backend.
    ///
    /// A simple setup can re-use [`crate::generic::Turn`].  Providers with
    /// richer wire formats supply their own struct and a `From<Turn>` impl.
    type Message: Send + Sync + 'static;

    /// Execute the prompt and return the provider’s reply as plain text plus
    /// optional usage accounting.
    fn chat_complete<'p, M>(
        &self,
        request: InvokeRequest<M>,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionReply>> + Send + 'p>>
    where
        M: Into<Self::Message> + Send + Sync + 'p;
}

/// Caller-supplied configuration for one model invocation.
///
/// `model` and the token budget travel with the messages so the invoker needs
/// no ambient configuration.
#[derive(Debug, Clone)]
pub struct InvokeRequest<M> {
    pub messages: Vec<M>,
    pub model: Model,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl<M> InvokeRequest<M> {
    pub fn new(messages: Vec<M>, model: Model) -> Self {
        Self {
            messages,
            model,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn messages(&self) -> &Vec<M> {
        &self.messages
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
