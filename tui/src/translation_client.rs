//! HTTP client for the translation backend.
//!
//! Every call is exactly one round trip with no retry. Whatever happens on the wire is folded
//! into a [`TranslationOutcome`]; transport causes are logged and replaced with the fixed
//! fallback message.

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;
use reqwest::Url;
use translatica_protocol::TranslationOutcome;
use translatica_protocol::wire::TRANSLATE_PATH;
use translatica_protocol::wire::TranslateRequest;
use translatica_protocol::wire::TranslateResponse;

use crate::version::TRANSLATICA_VERSION;

/// Anything that can turn already-validated text into an outcome.
///
/// Callers pass trimmed, non-empty text; implementations do no validation of their own.
pub trait TranslationBackend: Send + Sync + 'static {
    fn translate(&self, text: String) -> impl Future<Output = TranslationOutcome> + Send;
}

#[derive(Debug, thiserror::Error)]
enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("malformed response body (status {status}): {source}")]
    MalformedBody {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
    #[error("response had neither a translation nor an error (status {0})")]
    UnrecognizedShape(StatusCode),
}

#[derive(Debug, Clone)]
pub struct HttpTranslationClient {
    client: reqwest::Client,
    translate_url: Url,
}

impl HttpTranslationClient {
    /// `endpoint` is the backend base URL, e.g. `http://127.0.0.1:8000`.
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let translate_url = translate_url(endpoint)?;
        let client = reqwest::Client::builder()
            .user_agent(format!("translatica/{TRANSLATICA_VERSION}"))
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            client,
            translate_url,
        })
    }

    pub fn translate_url(&self) -> &Url {
        &self.translate_url
    }

    async fn request(&self, text: String) -> Result<TranslationOutcome, TransportError> {
        let response = self
            .client
            .post(self.translate_url.clone())
            .json(&TranslateRequest::new(text))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let parsed: TranslateResponse = serde_json::from_slice(&body)
            .map_err(|source| TransportError::MalformedBody { status, source })?;

        parsed
            .into_outcome(status.is_success())
            .ok_or(TransportError::UnrecognizedShape(status))
    }
}

impl TranslationBackend for HttpTranslationClient {
    async fn translate(&self, text: String) -> TranslationOutcome {
        match self.request(text).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(url = %self.translate_url, "translation request failed: {err}");
                TranslationOutcome::transport_failure()
            }
        }
    }
}

fn translate_url(endpoint: &str) -> anyhow::Result<Url> {
    let endpoint = endpoint.trim().trim_end_matches('/');
    Url::parse(&format!("{endpoint}{TRANSLATE_PATH}"))
        .with_context(|| format!("invalid translation endpoint '{endpoint}'"))
}
