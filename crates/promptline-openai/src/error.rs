use promptline_core::error::PromptlineError;
use reqwest::StatusCode;

/// High-level error type covering every failure mode the client can hit.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t serialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("provider returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("provider format error: {0}")]
    Format(String),
}

impl OpenAiError {
    /// Whether re-sending the identical request has a chance of succeeding.
    ///
    /// Transport-level faults and throttling / server-side errors qualify;
    /// 4xx responses and malformed payloads do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            OpenAiError::Http(err) => err.is_timeout() || err.is_connect(),
            OpenAiError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            OpenAiError::Serde(_) | OpenAiError::Format(_) => false,
        }
    }
}

impl From<OpenAiError> for PromptlineError {
    fn from(value: OpenAiError) -> Self {
        PromptlineError::Backend(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: StatusCode) -> OpenAiError {
        OpenAiError::Api {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn throttling_and_server_errors_are_retryable() {
        assert!(api(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(api(StatusCode::INTERNAL_SERVER_ERROR).is_retryable());
        assert!(api(StatusCode::BAD_GATEWAY).is_retryable());
    }

    #[test]
    fn caller_and_format_errors_are_not_retryable() {
        assert!(!api(StatusCode::BAD_REQUEST).is_retryable());
        assert!(!api(StatusCode::UNAUTHORIZED).is_retryable());
        assert!(!OpenAiError::Format("no choices".into()).is_retryable());

        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(!OpenAiError::Serde(parse).is_retryable());
    }

    #[tokio::test]
    async fn connect_failures_are_retryable() {
        // Port 9 (discard) has no listener; the send fails at connect time.
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .unwrap_err();
        assert!(OpenAiError::Http(err).is_retryable());
    }
}
