//! Clipboard access.
//!
//! The native clipboard (`arboard`) is tried first. When it is unavailable,
//! as on a headless box or over SSH, the text is handed to the terminal
//! with an OSC 52 selection sequence instead.

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use shortlink_logging::{shortlink_debug, shortlink_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Empty text; nothing was touched.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CopyFailed {
    pub message: String,
}

pub trait ClipboardCopier {
    fn copy(&mut self, text: &str) -> Result<CopyOutcome, CopyFailed>;
}

/// Builds the OSC 52 sequence that asks the terminal to put `text` on the
/// system clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", BASE64.encode(text))
}

pub struct SystemClipboard<W: Write = io::Stdout> {
    native: Option<arboard::Clipboard>,
    use_native: bool,
    terminal: W,
}

impl SystemClipboard<io::Stdout> {
    pub fn new() -> Self {
        Self::with_terminal(io::stdout())
    }
}

impl Default for SystemClipboard<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> SystemClipboard<W> {
    /// Native clipboard first, `terminal` as the fallback.
    pub fn with_terminal(terminal: W) -> Self {
        Self {
            native: None,
            use_native: true,
            terminal,
        }
    }

    /// Skips the native clipboard entirely.
    pub fn terminal_only(terminal: W) -> Self {
        Self {
            native: None,
            use_native: false,
            terminal,
        }
    }

    pub fn into_terminal(self) -> W {
        self.terminal
    }

    fn copy_native(&mut self, text: &str) -> Result<(), arboard::Error> {
        if self.native.is_none() {
            self.native = Some(arboard::Clipboard::new()?);
        }
        let result = match self.native.as_mut() {
            Some(clipboard) => clipboard.set_text(text.to_owned()),
            None => Ok(()),
        };
        if result.is_err() {
            // Re-create the handle next time; the owner may have gone away.
            self.native = None;
        }
        result
    }

    fn copy_terminal(&mut self, text: &str) -> io::Result<()> {
        self.terminal.write_all(osc52_sequence(text).as_bytes())?;
        self.terminal.flush()
    }
}

impl<W: Write> ClipboardCopier for SystemClipboard<W> {
    fn copy(&mut self, text: &str) -> Result<CopyOutcome, CopyFailed> {
        if text.is_empty() {
            return Ok(CopyOutcome::Skipped);
        }

        let native_error = if self.use_native {
            match self.copy_native(text) {
                Ok(()) => {
                    shortlink_debug!("Copied {} chars to native clipboard", text.len());
                    return Ok(CopyOutcome::Copied);
                }
                Err(err) => {
                    shortlink_warn!("Native clipboard failed, using terminal: {}", err);
                    Some(err.to_string())
                }
            }
        } else {
            None
        };

        self.copy_terminal(text)
            .map(|()| CopyOutcome::Copied)
            .map_err(|err| CopyFailed {
                message: match native_error {
                    Some(native) => format!("{native}; terminal fallback failed: {err}"),
                    None => err.to_string(),
                },
            })
    }
}
