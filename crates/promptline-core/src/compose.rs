//! Converts a value into a series of chat messages.
//!
//! Prompt fragments (a persona, replayed history, a user question) all
//! implement [`IntoPrompt`] so they can be lined up by
//! `promptline_prompt::chain::PromptChain` without manual `Vec` juggling.
//! By making the `Message` type an **associated type** we keep the trait
//! flexible without resorting to dynamic dispatch—backends with richer
//! message structs plug in their own type.

/// Converts a value into an ordered list of chat messages.
pub trait IntoPrompt {
    /// Chat message representation emitted by the prompt.
    type Message: Send + Sync + 'static;

    /// Consume `self` and return **all** messages in the desired order.
    fn into_prompt(self) -> Vec<Self::Message>;
}

/// Convenience implementation so a single [`crate::generic::Turn`] can be
/// chained directly without wrapping it in a fragment struct.
impl IntoPrompt for crate::generic::Turn {
    type Message = crate::generic::Turn;

    fn into_prompt(self) -> Vec<Self::Message> {
        vec![self]
    }
}

/// A pre-assembled message list passes through unchanged.
impl IntoPrompt for Vec<crate::generic::Turn> {
    type Message = crate::generic::Turn;

    fn into_prompt(self) -> Vec<Self::Message> {
        self
    }
}
