//! Prompt construction for the *promptline* workspace.
//!
//! * [`builder`] – turn a semantic payload (plain text, or instruction +
//!   image) into a ready-to-send message list.
//! * [`chain`] – compose multiple fragments into one prompt in a fluent,
//!   linear fashion.
//! * [`fragments`] – small reusable [`IntoPrompt`](promptline_core::compose::IntoPrompt)
//!   implementors: a persona/system preamble and replayed conversation
//!   history.

pub mod builder;
pub mod chain;
pub mod fragments;
