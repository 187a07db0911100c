use crate::{
    validate, AppState, CopyOutcome, Effect, Msg, NoticeKind, ShortenResult, NOTICE_DURATION,
};

const SHORTENED_TEXT: &str = "URL shortened successfully!";
const COPIED_TEXT: &str = "Short URL copied to clipboard!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::ShortenClicked => {
            if state.is_submitting() {
                return (state, Vec::new());
            }
            match validate(state.input()) {
                // The displayed result, if any, is left as it was.
                Err(invalid) => notify(&mut state, invalid.to_string(), NoticeKind::Error),
                Ok(url) => {
                    let request_id = state.begin_submission();
                    vec![Effect::Shorten {
                        request_id,
                        url: url.into_string(),
                    }]
                }
            }
        }
        Msg::ShortenCompleted { request_id, result } => {
            if state.in_flight() != Some(request_id) {
                return (state, Vec::new());
            }
            match result {
                ShortenResult::Shortened { short_url } => {
                    state.complete_success(short_url);
                    notify(&mut state, SHORTENED_TEXT, NoticeKind::Success)
                }
                ShortenResult::Failed { message } => {
                    state.complete_failure(message.clone());
                    notify(&mut state, message, NoticeKind::Error)
                }
            }
        }
        Msg::CopyClicked => vec![Effect::CopyToClipboard {
            text: state.displayed_short_url().unwrap_or_default().to_string(),
        }],
        Msg::CopyCompleted(outcome) => match outcome {
            CopyOutcome::Copied => notify(&mut state, COPIED_TEXT, NoticeKind::Success),
            CopyOutcome::Skipped => Vec::new(),
            CopyOutcome::Failed { message } => notify(
                &mut state,
                format!("Could not copy to clipboard: {message}"),
                NoticeKind::Error,
            ),
        },
        Msg::NoticeExpired { generation } => {
            state.expire_notice(generation);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn notify(state: &mut AppState, text: impl Into<String>, kind: NoticeKind) -> Vec<Effect> {
    let generation = state.notify(text, kind);
    vec![Effect::ScheduleNoticeExpiry {
        generation,
        after: NOTICE_DURATION,
    }]
}
