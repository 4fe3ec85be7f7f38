//! # `promptline-core`
//!
//! Provider-agnostic foundation of the *promptline* workspace:
//!
//! * [`generic`] – chat turns, roles, content parts and the
//!   [`InvocationResult`](generic::InvocationResult) produced by every model
//!   call.
//! * [`model`] – logical model identifiers, mapped to provider naming schemes
//!   by the adapter crates.
//! * [`provider`] – the [`ChatCompletionProvider`](provider::ChatCompletionProvider)
//!   trait implemented by backend adapters, plus the [`InvokeRequest`](provider::InvokeRequest)
//!   parameter bundle.
//! * [`invoker`] – the generic [`ModelInvoker`](invoker::ModelInvoker) that
//!   wraps a backend and converts every failure into a recoverable
//!   `InvocationResult` instead of letting it escape.
//! * [`compose`] – the [`IntoPrompt`](compose::IntoPrompt) trait used to turn
//!   arbitrary values (fragments, history, raw turns) into message lists.
//!
//! The crate carries no HTTP or provider dependency; backends live in sibling
//! crates such as `promptline-openai`.

pub mod compose;
pub mod error;
pub mod generic;
pub mod invoker;
pub mod model;
pub mod provider;

pub use invoker::ModelInvoker;
