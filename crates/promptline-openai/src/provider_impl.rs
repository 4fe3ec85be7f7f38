use std::{future::Future, pin::Pin, sync::Arc};

use promptline_core::{
    error::{PromptlineError, Result},
    generic::{CompletionReply, UsageReport},
    provider::{ChatCompletionProvider, InvokeRequest},
};

use crate::{
    OpenAiAdapter,
    api_v1::{ChatCompletionMessage, ChatCompletionRequest, ChatCompletionResponse, FinishReason},
    error::OpenAiError,
    model_map::map_model,
};

/// Reduce a wire response to the reply text plus usage accounting.
///
/// Only the first choice is considered; requests never set `n`, and a gateway
/// that returns extra choices anyway gets the deterministic pick.
fn reply_from_response(response: ChatCompletionResponse) -> Result<CompletionReply> {
    let usage = response.usage.map(|usage| UsageReport {
        prompt_tokens: usage.prompt_tokens as i64,
        completion_tokens: usage.completion_tokens as i64,
        total_tokens: usage.total_tokens as i64,
    });

    let Some(first_choice) = response.choices.into_iter().next() else {
        return Err(OpenAiError::Format("response has no choices".into()).into());
    };

    match first_choice.finish_reason {
        // `Length` means the reply was clipped by the token budget; the
        // clipped text is still the result.
        None | Some(FinishReason::Stop) | Some(FinishReason::Length) => Ok(CompletionReply {
            text: first_choice.message.content.unwrap_or_default(),
            usage,
        }),
        Some(other) => Err(OpenAiError::Format(format!(
            "unhandled finish reason on API: {other:?}"
        ))
        .into()),
    }
}

impl ChatCompletionProvider for OpenAiAdapter {
    type Message = ChatCompletionMessage;

    fn chat_complete<'p, M>(
        &self,
        request: InvokeRequest<M>,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionReply>> + Send + 'p>>
    where
        M: Into<Self::Message> + Send + Sync + 'p,
    {
        let client = Arc::clone(&self.client);

        Box::pin(async move {
            if request.messages.is_empty() {
                return Err(PromptlineError::InvalidRequest(
                    "prompt contains no messages".into(),
                ));
            }

            let model = map_model(&request.model);
            let messages = request.messages.into_iter().map(Into::into).collect();

            let mut api_request = ChatCompletionRequest::new(model.into_owned(), messages);
            if let Some(max_tokens) = request.max_tokens {
                api_request = api_request.max_tokens(max_tokens);
            }
            if let Some(temperature) = request.temperature {
                api_request = api_request.temperature(temperature);
            }

            let response = client.chat_completion(api_request).await?;
            reply_from_response(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_v1::{ChatCompletionChoice, ChatCompletionMessageForResponse, MessageRole};

    fn choice(content: &str, finish_reason: Option<FinishReason>) -> ChatCompletionChoice {
        ChatCompletionChoice {
            index: None,
            message: ChatCompletionMessageForResponse {
                role: Some(MessageRole::Assistant),
                content: Some(content.to_owned()),
            },
            finish_reason,
        }
    }

    fn response(choices: Vec<ChatCompletionChoice>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: None,
            model: None,
            choices,
            usage: None,
        }
    }

    #[test]
    fn first_choice_wins_when_a_gateway_returns_several() {
        let reply = reply_from_response(response(vec![
            choice("the wanted reply", Some(FinishReason::Stop)),
            choice("a surplus choice", Some(FinishReason::Stop)),
        ]))
        .unwrap();
        assert_eq!(reply.text, "the wanted reply");
    }

    #[test]
    fn clipped_replies_still_carry_their_text() {
        let reply =
            reply_from_response(response(vec![choice("cut o", Some(FinishReason::Length))]))
                .unwrap();
        assert_eq!(reply.text, "cut o");
    }

    #[test]
    fn missing_choices_and_filtered_replies_are_format_errors() {
        assert!(reply_from_response(response(vec![])).is_err());

        let err = reply_from_response(response(vec![choice(
            "x",
            Some(FinishReason::ContentFilter),
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("finish reason"));
    }
}
