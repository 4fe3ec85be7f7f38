use reqwest::{
    Client as HttpClient,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use std::time::Duration;

use crate::{
    api_v1::{ChatCompletionRequest, ChatCompletionResponse},
    error::OpenAiError,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Opt-in retry behaviour for the HTTP client.
///
/// Off by default: one invocation means one request.  When configured, only
/// retryable failures (timeouts, connect errors, 429, 5xx) are re-sent, with
/// a linearly growing pause between attempts.  The request body is identical
/// on every attempt; a chat completion holds no server-side state, so
/// re-sending the same prompt is safe.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first request.
    pub max_retries: u32,
    /// Pause before retry `n` is `backoff * n`.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Minimal HTTP client for a *chat/completions* endpoint.
///
/// * Non-streaming only (one request ▶ one response).
/// * Accepts and returns the `api_v1` request / response structs defined
///   in this crate.
/// * Shares a single `reqwest::Client`, so cloning `OpenAiClient` is cheap.
///
/// The 30 s default timeout doubles as the latency budget around the one
/// unbounded operation of a pipeline run.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    http: HttpClient,
    base: String,
    retry: Option<RetryPolicy>,
}

impl OpenAiClient {
    /// Build from an existing `reqwest::Client` so the caller controls proxy
    /// settings, custom TLS, timeout, etc.  `base_url` defaults to the
    /// official OpenAI endpoint.
    pub fn with_http(
        api_key: impl Into<String>,
        http: HttpClient,
        base_url: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            http,
            base: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            retry: None,
        }
    }

    /// Enable retries for retryable failures.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Perform a **non-streaming** chat completion.
    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        let max_retries = self.retry.map(|r| r.max_retries).unwrap_or(0);
        let mut attempt = 0u32;
        loop {
            match self.send(&request).await {
                Ok(response) => return Ok(response),
                Err(err) if attempt < max_retries && err.is_retryable() => {
                    attempt += 1;
                    let backoff = self
                        .retry
                        .map(|r| r.backoff)
                        .unwrap_or_default()
                        .saturating_mul(attempt);
                    tracing::warn!(
                        attempt,
                        error = %err,
                        "retryable provider failure; backing off"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|_| {
                OpenAiError::Format("API key contains non-header characters".into())
            })?,
        );

        let url = format!("{}/chat/completions", self.base.trim_end_matches('/'));
        let resp = self
            .http
            .post(url)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(OpenAiError::Api { status, body });
        }

        let bytes = resp.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::api_v1::ChatCompletionMessage;
    use promptline_core::generic::Turn;

    const OK_BODY: &str = r#"{"choices":[{"message":{"role":"assistant","content":"hi"},"finish_reason":"stop"}]}"#;

    fn request_complete(raw: &[u8]) -> bool {
        let Some(end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&raw[..end]);
        let length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        raw.len() >= end + 4 + length
    }

    /// Serves the scripted responses one connection each, counting requests.
    async fn spawn_server(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);

                let mut buf = vec![0u8; 16 * 1024];
                let mut read = 0;
                loop {
                    let n = stream.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    if request_complete(&buf[..read]) {
                        break;
                    }
                }

                let reply = format!(
                    "HTTP/1.1 {status} Scripted\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(reply.as_bytes()).await;
            }
        });

        (format!("http://{addr}"), hits)
    }

    fn request() -> ChatCompletionRequest {
        ChatCompletionRequest::new(
            "gpt-4.1".into(),
            vec![ChatCompletionMessage::from(Turn::user("hi"))],
        )
    }

    #[tokio::test]
    async fn no_policy_means_exactly_one_attempt() {
        let (base, hits) = spawn_server(vec![(500, "{}")]).await;
        let client = OpenAiClient::with_http("sk-test", reqwest::Client::new(), Some(base));

        let err = client.chat_completion(request()).await.unwrap_err();

        assert!(matches!(err, OpenAiError::Api { status, .. } if status.as_u16() == 500));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_policy_resends_until_exhausted() {
        let (base, hits) = spawn_server(vec![(500, "{}"), (500, "{}"), (500, "{}")]).await;
        let client = OpenAiClient::with_http("sk-test", reqwest::Client::new(), Some(base))
            .with_retry_policy(RetryPolicy {
                max_retries: 2,
                backoff: Duration::from_millis(1),
            });

        let err = client.chat_completion(request()).await.unwrap_err();

        assert!(matches!(err, OpenAiError::Api { .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retryable_failure_then_success_recovers() {
        let (base, hits) = spawn_server(vec![(429, "{}"), (200, OK_BODY)]).await;
        let client = OpenAiClient::with_http("sk-test", reqwest::Client::new(), Some(base))
            .with_retry_policy(RetryPolicy {
                max_retries: 2,
                backoff: Duration::from_millis(1),
            });

        let response = client.chat_completion(request()).await.unwrap();

        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("hi")
        );
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_retryable_status_fails_without_resending() {
        let (base, hits) = spawn_server(vec![(400, "{}"), (200, OK_BODY)]).await;
        let client = OpenAiClient::with_http("sk-test", reqwest::Client::new(), Some(base))
            .with_retry_policy(RetryPolicy::default());

        let err = client.chat_completion(request()).await.unwrap_err();

        assert!(matches!(err, OpenAiError::Api { status, .. } if status.as_u16() == 400));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
