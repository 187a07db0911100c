use url::Url;

/// A trimmed, non-empty string that parses as an absolute URL.
///
/// The text is kept exactly as typed (minus surrounding whitespace); it is
/// never re-serialized through [`Url`], so no trailing slash is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUrl(String);

impl ValidUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("Please enter a URL to shorten.")]
    Empty,
    #[error("Please enter a valid URL, including the scheme (e.g. https://).")]
    Malformed,
}

/// Checks that `text` is a well-formed absolute URL.
///
/// Relative paths and bare domains (`example.com`) have no scheme and are
/// rejected as [`InvalidInput::Malformed`]. So are bare domains with a port
/// (`localhost:8000`), which parse with the host taken as the scheme but
/// leave no authority behind.
pub fn validate(text: &str) -> Result<ValidUrl, InvalidInput> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InvalidInput::Empty);
    }
    match Url::parse(trimmed) {
        Ok(url) if !url.cannot_be_a_base() => Ok(ValidUrl(trimmed.to_string())),
        _ => Err(InvalidInput::Malformed),
    }
}
