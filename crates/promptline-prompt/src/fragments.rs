//! Reusable prompt fragments.
//!
//! A fragment is any value implementing
//! [`IntoPrompt`](promptline_core::compose::IntoPrompt); the two here cover
//! the recurring needs of a conversational pipeline: a fixed persona /
//! system preamble, and replay of the turns a
//! `promptline_store::ConversationStore` returned for the active
//! conversation id.

use promptline_core::{compose::IntoPrompt, generic::Turn};

/// A static persona or behaviour description, injected as a system turn.
///
/// ```rust
/// use promptline_prompt::fragments::PersonaFragment;
///
/// let persona = PersonaFragment::new(
///     "You are a plant pathology expert. Answer concisely.",
/// );
/// ```
///
/// Borrowing with lifetime `'a` lets callers reference large inline string
/// constants without a `String` allocation per request.
pub struct PersonaFragment<'a>(&'a str);

impl<'a> PersonaFragment<'a> {
    pub fn new(persona: &'a str) -> Self {
        Self(persona)
    }
}

impl<'a> From<&'a str> for PersonaFragment<'a> {
    fn from(value: &'a str) -> Self {
        Self(value)
    }
}

impl IntoPrompt for PersonaFragment<'_> {
    type Message = Turn;

    fn into_prompt(self) -> Vec<Self::Message> {
        vec![Turn::system(self.0)]
    }
}

/// Replays previously stored turns so the model sees the full exchange.
///
/// The fragment does not filter or reorder: the store already guarantees the
/// exact append order, and that order is what the provider must see.
pub struct HistoryFragment(Vec<Turn>);

impl HistoryFragment {
    pub fn new(turns: Vec<Turn>) -> Self {
        Self(turns)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoPrompt for HistoryFragment {
    type Message = Turn;

    fn into_prompt(self) -> Vec<Self::Message> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptline_core::generic::Role;

    #[test]
    fn persona_becomes_a_single_system_turn() {
        let turns = PersonaFragment::new("be brief").into_prompt();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, Role::System);
        assert_eq!(turns[0].text(), Some("be brief"));
    }

    #[test]
    fn history_replays_turns_unchanged() {
        let history = vec![Turn::user("a"), Turn::assistant("b")];
        let turns = HistoryFragment::new(history.clone()).into_prompt();
        assert_eq!(turns, history);
    }
}
