use crate::NoticeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub text: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub submitting: bool,
    /// `Some` while the short-URL output is revealed.
    pub short_url: Option<String>,
    pub notice: Option<NoticeView>,
    pub dirty: bool,
}
