//! Generic message and result types used across the *promptline* workspace.
//!
//! They deliberately mirror the concepts exposed by most provider APIs:
//! “system”, “user” and “assistant” turns, with content that is either plain
//! text or a list of typed parts (text block + inline image).  By staying
//! minimal and provider-agnostic we can:
//!
//! * convert them into provider-specific structs via a simple `From`/`Into`,
//! * serialize them without pulling in heavyweight dependencies, and
//! * use them in unit tests without mocking a full transport layer.
//!
//! ## When to add more fields?
//!
//! Only if the additional data is **required by multiple back-ends** or
//! **fundamentally provider-independent**.  Otherwise extend the
//! provider-specific message type instead of bloating this one.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// High-level chat roles recognised by most LLM providers.
///
/// The `Display` implementation renders the canonical lowercase name so you
/// can feed it directly into JSON without extra mapping logic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// “System” messages define global behaviour and style guidelines.
    System,
    /// Messages originating from the human user.
    User,
    /// Messages produced by the assistant / model.
    Assistant,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message exchanged in a conversation, independent of any provider.
///
/// A turn is immutable once created; conversation histories are append-only
/// sequences of turns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: TurnContent,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: TurnContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: TurnContent::Text(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: TurnContent::Text(content.into()),
        }
    }

    /// A user turn composed of multiple content parts (text + image).
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: TurnContent::Parts(parts),
        }
    }

    /// The plain-text content, if this turn carries any.
    ///
    /// For multi-part turns this returns the first text part; inline images
    /// have no textual representation.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            TurnContent::Text(text) => Some(text),
            TurnContent::Parts(parts) => parts.iter().find_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                ContentPart::ImageUrl { .. } => None,
            }),
        }
    }
}

/// Content of a [`Turn`]: a plain string for the common case, or a list of
/// typed parts when text and an image reference travel together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TurnContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A single block inside a multi-part turn.
///
/// The serialized form matches the `{"type": "text" | "image_url", ...}`
/// shape used by vision-capable chat APIs, so provider adapters can forward
/// parts with a plain field-by-field mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
}

/// Token accounting reported by the provider, when available.
#[derive(Debug, Clone)]
pub struct UsageReport {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

/// Successful reply of one completion round-trip, as returned by a backend.
#[derive(Debug, Clone)]
pub struct CompletionReply {
    pub text: String,
    pub usage: Option<UsageReport>,
}

/// Classification of everything that can go wrong inside the core.
///
/// * `InvalidPayload` – the caller handed malformed input to the prompt
///   builder (4xx-equivalent).
/// * `ProviderError` – the remote completion call failed; surfaced as a
///   partial result, never as a crash.
/// * `MissingUpstreamField` – a pipeline node ran without its required input.
///   The runner’s stop-on-failure rule prevents this; seeing it reported
///   indicates a bug in the runner or a mis-wired node sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidPayload,
    ProviderError,
    MissingUpstreamField,
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::InvalidPayload => write!(f, "invalid_payload"),
            FailureKind::ProviderError => write!(f, "provider_error"),
            FailureKind::MissingUpstreamField => write!(f, "missing_upstream_field"),
        }
    }
}

/// Outcome of exactly one model invocation.  Never mutated after creation.
///
/// The [`crate::ModelInvoker`] guarantees that *every* call produces one of
/// these two variants – transport faults, rate limits and malformed provider
/// responses all end up as [`InvocationResult::Failed`], never as a panic or
/// an error escaping the invoker boundary.
#[derive(Debug, Clone)]
pub enum InvocationResult {
    Completed {
        text: String,
        usage: Option<UsageReport>,
    },
    Failed {
        kind: FailureKind,
        message: String,
    },
}

impl InvocationResult {
    pub fn ok(&self) -> bool {
        matches!(self, InvocationResult::Completed { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            InvocationResult::Completed { text, .. } => Some(text),
            InvocationResult::Failed { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<FailureKind> {
        match self {
            InvocationResult::Completed { .. } => None,
            InvocationResult::Failed { kind, .. } => Some(*kind),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            InvocationResult::Completed { .. } => None,
            InvocationResult::Failed { message, .. } => Some(message),
        }
    }

    pub fn usage(&self) -> Option<&UsageReport> {
        match self {
            InvocationResult::Completed { usage, .. } => usage.as_ref(),
            InvocationResult::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_renders_canonical_lowercase_names() {
        assert_eq!(Role::System.to_string(), "system");
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn text_turn_roundtrips_through_serde() {
        let turn = Turn::user("hello");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
        let back: Turn = serde_json::from_value(json).unwrap();
        assert_eq!(back, turn);
    }

    #[test]
    fn multipart_turn_serializes_typed_parts() {
        let turn = Turn::user_parts(vec![
            ContentPart::Text {
                text: "describe this".into(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "data:image/png;base64,AAAA".into(),
                },
            },
        ]);
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(turn.text(), Some("describe this"));
    }

    #[test]
    fn failed_invocation_exposes_kind_and_message() {
        let result = InvocationResult::Failed {
            kind: FailureKind::ProviderError,
            message: "timed out".into(),
        };
        assert!(!result.ok());
        assert_eq!(result.error_kind(), Some(FailureKind::ProviderError));
        assert_eq!(result.error_message(), Some("timed out"));
        assert_eq!(result.text(), None);
    }
}
