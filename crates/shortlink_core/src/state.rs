use crate::notice::{NoticeKind, Notifier};
use crate::view_model::{AppViewModel, NoticeView};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting {
        request_id: RequestId,
    },
    Succeeded {
        short_url: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    submission: SubmissionState,
    /// Short URL currently revealed in the output field.
    displayed_short_url: Option<String>,
    last_request_id: RequestId,
    notifier: Notifier,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            submitting: self.is_submitting(),
            short_url: self.displayed_short_url.clone(),
            notice: self.notifier.current().map(|notice| NoticeView {
                text: notice.text.clone(),
                kind: notice.kind,
            }),
            dirty: self.dirty,
        }
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionState::Submitting { .. })
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    /// Moves to `Submitting` under a fresh request id.
    pub(crate) fn begin_submission(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.submission = SubmissionState::Submitting {
            request_id: self.last_request_id,
        };
        self.mark_dirty();
        self.last_request_id
    }

    pub(crate) fn in_flight(&self) -> Option<RequestId> {
        match self.submission {
            SubmissionState::Submitting { request_id } => Some(request_id),
            _ => None,
        }
    }

    pub(crate) fn complete_success(&mut self, short_url: String) {
        self.displayed_short_url = Some(short_url.clone());
        self.submission = SubmissionState::Succeeded { short_url };
        self.mark_dirty();
    }

    pub(crate) fn complete_failure(&mut self, message: String) {
        self.displayed_short_url = None;
        self.submission = SubmissionState::Failed { message };
        self.mark_dirty();
    }

    pub(crate) fn displayed_short_url(&self) -> Option<&str> {
        self.displayed_short_url.as_deref()
    }

    pub(crate) fn notify(&mut self, text: impl Into<String>, kind: NoticeKind) -> u64 {
        self.mark_dirty();
        self.notifier.notify(text, kind)
    }

    pub(crate) fn expire_notice(&mut self, generation: u64) {
        if self.notifier.expire(generation) {
            self.mark_dirty();
        }
    }
}
