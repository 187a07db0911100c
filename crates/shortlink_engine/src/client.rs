use std::error::Error as StdError;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shortlink_logging::{shortlink_debug, shortlink_info, shortlink_warn};

use crate::{FailureKind, ShortenError, ShortenOutput, ShortenResult};

/// Service base URL, fixed at build time through `SHORTLINK_API_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = match option_env!("SHORTLINK_API_BASE_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:8000",
};

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ShortenSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ShortenSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ShortenSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Turns a long URL into a short one. Every failure comes back as an
/// `Err` value; nothing panics or escapes past this boundary.
#[async_trait::async_trait]
pub trait ShortenClient: Send + Sync {
    async fn shorten(&self, long_url: &str) -> ShortenResult;
}

#[derive(Serialize)]
struct ShortenRequest<'a> {
    long_url: &'a str,
}

#[derive(Deserialize)]
struct ShortenResponse {
    short_url: Option<String>,
    short_code: Option<String>,
    long_url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    detail: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct ReqwestShortenClient {
    settings: ShortenSettings,
}

impl ReqwestShortenClient {
    pub fn new(settings: ShortenSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ShortenError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ShortenError::new(FailureKind::Network, describe(&err)))
    }

    fn endpoint(&self) -> Result<reqwest::Url, ShortenError> {
        let base = self.settings.base_url.trim_end_matches('/');
        reqwest::Url::parse(&format!("{base}/shorten")).map_err(|err| {
            ShortenError::new(
                FailureKind::InvalidEndpoint,
                format!(
                    "Invalid shortening service URL {:?}: {err}",
                    self.settings.base_url
                ),
            )
        })
    }
}

#[async_trait::async_trait]
impl ShortenClient for ReqwestShortenClient {
    async fn shorten(&self, long_url: &str) -> ShortenResult {
        let endpoint = self.endpoint()?;
        let client = self.build_client()?;
        let body = serde_json::to_vec(&ShortenRequest { long_url })
            .map_err(|err| ShortenError::new(FailureKind::InvalidResponse, err.to_string()))?;

        shortlink_info!("POST {} long_url_len={}", endpoint, long_url.len());
        let response = client
            .post(endpoint)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message = error_detail(&bytes).unwrap_or_else(|| status_message(status));
            shortlink_warn!("Shorten rejected with {}: {}", status, message);
            return Err(ShortenError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let output = parse_success(&bytes)?;
        shortlink_debug!("Shortened to {}", output.short_url);
        Ok(output)
    }
}

fn status_message(status: reqwest::StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("Request failed with status {} ({reason})", status.as_u16()),
        None => format!("Request failed with status {}", status.as_u16()),
    }
}

fn parse_success(bytes: &[u8]) -> ShortenResult {
    let invalid = |reason: String| {
        ShortenError::new(
            FailureKind::InvalidResponse,
            format!("Invalid response from shortening service: {reason}"),
        )
    };
    let body: ShortenResponse =
        serde_json::from_slice(bytes).map_err(|err| invalid(err.to_string()))?;
    match body.short_url {
        Some(short_url) if !short_url.trim().is_empty() => Ok(ShortenOutput {
            short_url,
            short_code: body.short_code,
            long_url: body.long_url,
        }),
        _ => Err(invalid("missing short_url".to_string())),
    }
}

/// Extracts a readable message from an error body's `detail` field.
///
/// `detail` is either a plain string or a list of validation errors, each
/// with a `msg`.
fn error_detail(bytes: &[u8]) -> Option<String> {
    let body: ErrorResponse = serde_json::from_slice(bytes).ok()?;
    match body.detail? {
        Value::Null => None,
        Value::String(text) => Some(text).filter(|text| !text.trim().is_empty()),
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                Some(Value::Array(items).to_string())
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ShortenError {
    shortlink_warn!("Shorten transport failure: {}", describe(&err));
    if err.is_timeout() {
        return ShortenError::new(
            FailureKind::Timeout,
            format!("The shortening service timed out: {}", describe(&err)),
        );
    }
    ShortenError::new(
        FailureKind::Network,
        format!("Could not reach the shortening service: {}", describe(&err)),
    )
}

/// Flattens an error and its sources into one line.
fn describe(err: &dyn StdError) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let inner_text = inner.to_string();
        if !text.contains(&inner_text) {
            text.push_str(": ");
            text.push_str(&inner_text);
        }
        source = inner.source();
    }
    text
}
