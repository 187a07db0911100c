use std::time::Duration;

/// How long a notification stays visible before it hides itself.
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    /// Identity of this notice; an expiry only hides the notice it was
    /// scheduled for.
    pub generation: u64,
}

/// Single-slot, last-write-wins notification holder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notifier {
    current: Option<Notice>,
    generation: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current notice and returns the generation the caller
    /// must pass to [`Notifier::expire`] once [`NOTICE_DURATION`] elapses.
    pub fn notify(&mut self, text: impl Into<String>, kind: NoticeKind) -> u64 {
        self.generation += 1;
        self.current = Some(Notice {
            text: text.into(),
            kind,
            generation: self.generation,
        });
        self.generation
    }

    /// Hides the notice if it is still the one with `generation`.
    /// Returns whether anything was hidden.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(notice) if notice.generation == generation => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
