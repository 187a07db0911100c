//! Shortlink core: pure state machine, input validation and view-model helpers.
mod effect;
mod msg;
mod notice;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use msg::{CopyOutcome, Msg, ShortenResult};
pub use notice::{Notice, NoticeKind, Notifier, NOTICE_DURATION};
pub use state::{AppState, RequestId, SubmissionState};
pub use update::update;
pub use validate::{validate, InvalidInput, ValidUrl};
pub use view_model::{AppViewModel, NoticeView};
