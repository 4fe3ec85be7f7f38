//! Model identifiers used throughout the **promptline** workspace.
//!
//! The enum hierarchy keeps the *public* API simple while allowing each
//! provider crate to map the variants onto its own naming scheme.  You never
//! have to scatter literal strings such as `"gpt-4o-mini"` through
//! application code—pick an enum variant and let the adapter translate it.
//!
//! # Adding more models
//!
//! 1. Add the variant to the provider-specific sub-enum (`OpenAiModel`, …).
//! 2. Update the mapping function in the provider crate
//!    (`promptline-openai::model_map::map_model`, etc.).
//! 3. The compiler will point at every match statement that needs the new
//!    variant.
//!
//! # Example
//!
//! ```rust
//! use promptline_core::model::{Model, OpenAiModel};
//! assert_eq!(Model::from(OpenAiModel::Gpt4oMini),
//!            Model::OpenAi(OpenAiModel::Gpt4oMini));
//! ```

/// Universal identifier for an LLM model.
///
/// * `OpenAi` – enumerated list of officially supported OpenAI models.
/// * `Custom` – any model name not covered by a dedicated enum.  Use this for
///   self-hosted deployments or OpenAI-compatible endpoints serving foreign
///   models (e.g. `"gemini-1.5-flash"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Built-in OpenAI models (chat completion API).
    OpenAi(OpenAiModel),
    /// Verbatim model name forwarded to the provider unchanged.
    Custom(String),
}

/// Models **officially** supported by the OpenAI back-end.
///
/// Keeping the list small avoids accidental typos while still allowing
/// arbitrary model names through [`Model::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenAiModel {
    Gpt41,
    Gpt41Mini,
    Gpt4o,
    Gpt4oMini,
}

impl From<OpenAiModel> for Model {
    fn from(val: OpenAiModel) -> Self {
        Model::OpenAi(val)
    }
}

impl From<&str> for Model {
    fn from(val: &str) -> Self {
        Model::Custom(val.to_owned())
    }
}
