use crate::RequestId;

/// Outcome of one shorten request as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenResult {
    Shortened { short_url: String },
    Failed { message: String },
}

/// Outcome of a clipboard copy as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Nothing to copy; no notice is shown.
    Skipped,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the long URL input.
    InputChanged(String),
    /// User asked for the current input to be shortened.
    ShortenClicked,
    /// The shortening service answered (or the transport failed).
    ShortenCompleted {
        request_id: RequestId,
        result: ShortenResult,
    },
    /// User asked for the displayed short URL to be copied.
    CopyClicked,
    /// Clipboard copy finished.
    CopyCompleted(CopyOutcome),
    /// A notice's display time elapsed.
    NoticeExpired { generation: u64 },
    /// UI/render tick.
    Tick,
    /// Fallback for unmapped input.
    NoOp,
}
