//! Shortlink engine: network and clipboard IO behind injectable traits.
mod client;
mod clipboard;
mod engine;
mod types;

pub use client::{ReqwestShortenClient, ShortenClient, ShortenSettings, DEFAULT_BASE_URL};
pub use clipboard::{osc52_sequence, ClipboardCopier, CopyFailed, CopyOutcome, SystemClipboard};
pub use engine::EngineHandle;
pub use types::{EngineEvent, FailureKind, RequestId, ShortenError, ShortenOutput, ShortenResult};
