//! Simple **builder** that concatenates multiple values implementing
//! [`IntoPrompt`](promptline_core::compose::IntoPrompt).
//!
//! # Motivation
//!
//! Real conversational prompts are **composed** of smaller, reusable
//! fragments:
//!
//! * a static persona / system preamble,
//! * the replayed conversation history,
//! * the fresh user input.
//!
//! `PromptChain` lines these up in a clear, linear fashion **without**
//! mutable vectors or verbose `extend()` calls.
//!
//! # Usage
//!
//! ```rust
//! use promptline_prompt::chain::PromptChain;
//! use promptline_prompt::fragments::{HistoryFragment, PersonaFragment};
//! use promptline_core::generic::Turn;
//!
//! let history = vec![Turn::user("hello"), Turn::assistant("hi there")];
//!
//! let messages: Vec<Turn> = PromptChain::new()
//!     .with(PersonaFragment::new("You are a helpful bot."))
//!     .with(HistoryFragment::new(history))
//!     .with(Turn::user("how are you"))
//!     .build();
//!
//! assert_eq!(messages.len(), 4);
//! ```
//!
//! The generic parameter `Message` allows back-ends to plug in their own,
//! richer message types while reusing the same chaining logic.

use promptline_core::compose::IntoPrompt;

/// Lightweight container that accumulates messages produced by
/// [`IntoPrompt`] implementors.
///
/// The single `Vec` field is kept private so the only way to obtain the result
/// is through [`Self::build`], ensuring the builder API remains fluent.
pub struct PromptChain<Message>(Vec<Message>);

impl<Message> Default for PromptChain<Message> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Message> PromptChain<Message> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self(vec![])
    }

    /// Append the messages produced by `with` to the chain.
    ///
    /// Takes `self` **by value** to encourage concise call-chaining.
    pub fn with(mut self, with: impl IntoPrompt<Message = Message>) -> Self {
        self.0.append(&mut with.into_prompt());
        self
    }

    /// Consume the builder and return the accumulated messages.
    pub fn build(self) -> Vec<Message> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptline_core::generic::{Role, Turn};

    #[test]
    fn chain_preserves_fragment_order() {
        let messages = PromptChain::new()
            .with(Turn::system("persona"))
            .with(vec![Turn::user("one"), Turn::assistant("two")])
            .with(Turn::user("three"))
            .build();

        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(messages[3].text(), Some("three"));
    }
}
