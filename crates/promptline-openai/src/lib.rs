//! OpenAI-compatible backend for *promptline*.
//!
//! [`OpenAiAdapter`] implements
//! [`ChatCompletionProvider`](promptline_core::provider::ChatCompletionProvider)
//! over the `v1/chat/completions` endpoint, including vision requests whose
//! user message carries an inline data-URI image part.  Pointing the adapter
//! at another base URL makes it work with any OpenAI-compatible gateway
//! (e.g. Google’s Generative Language endpoint).

mod adapter;
mod model_map;
mod provider_impl;

pub use adapter::{OpenAiAdapter, OpenAiAdapterBuilder};
pub mod api_v1;
mod client;
pub use client::RetryPolicy;
pub mod error;
