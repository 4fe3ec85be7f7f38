use std::{env, sync::Arc};

use promptline_core::error::{PromptlineError, Result};

use crate::client::{OpenAiClient, RetryPolicy};

/// Thin wrapper that wires the HTTP client [`OpenAiClient`] into a value that
/// implements [`promptline_core::provider::ChatCompletionProvider`].
///
/// The adapter
///
/// * stores the API key and the (optionally overridden) base URL,
/// * owns a shareable, connection-pooled `reqwest::Client`,
/// * provides a fluent [`OpenAiAdapterBuilder`] so callers don’t have to
///   juggle `Option<String>` manually.
///
/// Build it **once at startup** and hand it to a
/// [`ModelInvoker`](promptline_core::ModelInvoker); the invoker clones the
/// inner `Arc`, so the connection pool is shared across all requests and
/// released when the last handle drops.
pub struct OpenAiAdapter {
    pub(crate) client: Arc<OpenAiClient>,
}

impl std::fmt::Debug for OpenAiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiAdapter").finish_non_exhaustive()
    }
}

/// Builder for [`OpenAiAdapter`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use promptline_openai::OpenAiAdapterBuilder;
///
/// let backend = OpenAiAdapterBuilder::new_from_env()
///     .build()
///     .expect("OPENAI_API_KEY must be set");
/// ```
///
/// The builder pattern keeps future options (proxy URL, organisation ID, …)
/// backwards compatible without breaking existing `build()` calls.
#[derive(Default)]
pub struct OpenAiAdapterBuilder {
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: Option<String>,
    pub(crate) retry: Option<RetryPolicy>,
}

impl OpenAiAdapterBuilder {
    /// Create an *empty* builder. Remember to supply an API key manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor that tries to load the `OPENAI_API_KEY`
    /// environment variable.
    ///
    /// Never panics; a missing key only surfaces during [`Self::build`].
    pub fn new_from_env() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").ok(),
            base_url: None,
            retry: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Target a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a retry policy for HTTP calls.  Without one, no call is retried.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`PromptlineError::Invalid`] – if the API key is missing.
    pub fn build(self) -> Result<OpenAiAdapter> {
        let api_key = self.api_key.ok_or(PromptlineError::Invalid(
            "missing env variable: `OPENAI_API_KEY`".into(),
        ))?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|err| PromptlineError::Invalid(format!("building http client: {err}")))?;

        let mut client = OpenAiClient::with_http(api_key, http, self.base_url);
        if let Some(retry) = self.retry {
            client = client.with_retry_policy(retry);
        }

        Ok(OpenAiAdapter {
            client: Arc::new(client),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_api_key_fails() {
        let err = OpenAiAdapterBuilder::new().build().unwrap_err();
        assert!(matches!(err, PromptlineError::Invalid(_)));
    }

    #[test]
    fn build_with_explicit_key_and_base_url_succeeds() {
        let adapter = OpenAiAdapterBuilder::new()
            .with_api_key("sk-test")
            .with_base_url("https://example.invalid/v1")
            .with_retry_policy(RetryPolicy::default())
            .build();
        assert!(adapter.is_ok());
    }
}
