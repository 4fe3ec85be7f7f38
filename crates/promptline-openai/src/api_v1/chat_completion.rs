//! Wire types for the `v1/chat/completions` endpoint.
//!
//! Request messages support both plain string content and the typed
//! part-list form (`{"type": "text"}` / `{"type": "image_url"}`) used for
//! vision prompts, so the adapter can forward inline data-URI images without
//! special-casing.

use promptline_core::generic::{self, Turn, TurnContent};
use serde::{Deserialize, Serialize};

use crate::impl_builder_methods;

use super::common;

#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<i64>,
}

impl ChatCompletionRequest {
    pub fn new(model: String, messages: Vec<ChatCompletionMessage>) -> Self {
        Self {
            model,
            messages,
            max_tokens: None,
            temperature: None,
            top_p: None,
            n: None,
        }
    }
}

impl_builder_methods!(
    ChatCompletionRequest,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    n: i64
);

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl From<generic::Role> for MessageRole {
    fn from(value: generic::Role) -> Self {
        match value {
            generic::Role::System => MessageRole::System,
            generic::Role::User => MessageRole::User,
            generic::Role::Assistant => MessageRole::Assistant,
        }
    }
}

/// Message content: the plain-string shorthand, or typed parts for vision.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatCompletionMessage {
    pub role: MessageRole,
    pub content: Content,
}

impl From<Turn> for ChatCompletionMessage {
    fn from(value: Turn) -> Self {
        let content = match value.content {
            TurnContent::Text(text) => Content::Text(text),
            TurnContent::Parts(parts) => Content::Parts(
                parts
                    .into_iter()
                    .map(|part| match part {
                        generic::ContentPart::Text { text } => ContentPart::Text { text },
                        generic::ContentPart::ImageUrl { image_url } => ContentPart::ImageUrl {
                            image_url: ImageUrl { url: image_url.url },
                        },
                    })
                    .collect(),
            ),
        };
        Self {
            role: value.role.into(),
            content,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionMessageForResponse {
    pub role: Option<MessageRole>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    pub index: Option<i64>,
    pub message: ChatCompletionMessageForResponse,
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    pub choices: Vec<ChatCompletionChoice>,
    pub usage: Option<common::Usage>,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptline_core::generic::{ContentPart as CorePart, ImageUrl as CoreImageUrl};

    #[test]
    fn text_message_serializes_as_plain_string() {
        let message: ChatCompletionMessage = Turn::user("hello").into();
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn vision_message_serializes_typed_parts() {
        let turn = Turn::user_parts(vec![
            CorePart::Text {
                text: "describe this leaf".into(),
            },
            CorePart::ImageUrl {
                image_url: CoreImageUrl {
                    url: "data:image/jpeg;base64,/9j/AAA".into(),
                },
            },
        ]);
        let message: ChatCompletionMessage = turn.into();
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(
            json["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,/9j/AAA"
        );
    }

    #[test]
    fn optional_parameters_are_omitted_when_unset() {
        let request = ChatCompletionRequest::new("gpt-4.1".into(), vec![]);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());

        let request = request.max_tokens(800).temperature(0.2);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 800);
        assert_eq!(json["temperature"], 0.2);
    }

    #[test]
    fn response_parses_with_and_without_usage() {
        let body = r#"{
            "id": "cmpl-1",
            "model": "gpt-4.1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "hi there"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("hi there"));
        assert_eq!(parsed.usage.unwrap().total_tokens, 5);

        let sparse = r#"{"choices": [{"message": {"content": "ok"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(sparse).unwrap();
        assert_eq!(parsed.choices[0].finish_reason, None);
        assert!(parsed.usage.is_none());
    }
}
