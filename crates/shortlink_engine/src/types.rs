use std::fmt;

pub type RequestId = u64;

/// What the service answered for a successful shorten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutput {
    pub short_url: String,
    pub short_code: Option<String>,
    /// The long URL as echoed (and possibly normalized) by the service.
    pub long_url: Option<String>,
}

pub type ShortenResult = Result<ShortenOutput, ShortenError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ShortenCompleted {
        request_id: RequestId,
        result: ShortenResult,
    },
}

/// A failed shorten, carrying the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenError {
    pub kind: FailureKind,
    pub message: String,
}

impl ShortenError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ShortenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ShortenError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The configured base URL cannot be turned into an endpoint.
    InvalidEndpoint,
    /// Non-2xx answer from the service.
    HttpStatus(u16),
    /// 2xx answer without a usable `short_url`.
    InvalidResponse,
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
