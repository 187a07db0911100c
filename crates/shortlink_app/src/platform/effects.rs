use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use shortlink_core::{CopyOutcome, Effect, Msg, ShortenResult};
use shortlink_engine::{ClipboardCopier, EngineEvent, EngineHandle, ShortenClient};
use shortlink_logging::{shortlink_info, shortlink_warn};

/// Executes the effects produced by `update` and feeds their outcomes back
/// as messages on `msg_tx`.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn ClipboardCopier>,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        client: Arc<dyn ShortenClient>,
        clipboard: Box<dyn ClipboardCopier>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> io::Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::spawn(client, event_tx)?;
        spawn_event_loop(event_rx, msg_tx.clone());
        Ok(Self {
            engine,
            clipboard,
            msg_tx,
        })
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Shorten { request_id, url } => {
                    shortlink_info!("Shorten request_id={} url={}", request_id, url);
                    self.engine.shorten(request_id, url);
                }
                Effect::CopyToClipboard { text } => {
                    let outcome = match self.clipboard.copy(&text) {
                        Ok(shortlink_engine::CopyOutcome::Copied) => CopyOutcome::Copied,
                        Ok(shortlink_engine::CopyOutcome::Skipped) => CopyOutcome::Skipped,
                        Err(failed) => {
                            shortlink_warn!("Clipboard copy failed: {}", failed);
                            CopyOutcome::Failed {
                                message: failed.message,
                            }
                        }
                    };
                    let _ = self.msg_tx.send(Msg::CopyCompleted(outcome));
                }
                Effect::ScheduleNoticeExpiry { generation, after } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = msg_tx.send(Msg::NoticeExpired { generation });
                    });
                }
            }
        }
    }
}

fn spawn_event_loop(event_rx: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            let msg = match event {
                EngineEvent::ShortenCompleted { request_id, result } => Msg::ShortenCompleted {
                    request_id,
                    result: map_result(result),
                },
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

fn map_result(result: shortlink_engine::ShortenResult) -> ShortenResult {
    match result {
        Ok(output) => {
            shortlink_info!(
                "Shortened {} -> {} (code {:?})",
                output.long_url.as_deref().unwrap_or("?"),
                output.short_url,
                output.short_code
            );
            ShortenResult::Shortened {
                short_url: output.short_url,
            }
        }
        Err(err) => {
            shortlink_warn!("Shorten failed ({}): {}", err.kind, err.message);
            ShortenResult::Failed {
                message: err.message,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use shortlink_core::{update, AppState, NoticeKind};
    use shortlink_engine::{CopyFailed, ShortenError, ShortenOutput};

    use super::*;

    struct FakeClient {
        calls: AtomicUsize,
        reply: shortlink_engine::ShortenResult,
    }

    impl FakeClient {
        fn answering(reply: shortlink_engine::ShortenResult) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ShortenClient for FakeClient {
        async fn shorten(&self, _long_url: &str) -> shortlink_engine::ShortenResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    #[derive(Clone, Default)]
    struct FakeClipboard {
        copied: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl ClipboardCopier for FakeClipboard {
        fn copy(&mut self, text: &str) -> Result<shortlink_engine::CopyOutcome, CopyFailed> {
            if text.is_empty() {
                return Ok(shortlink_engine::CopyOutcome::Skipped);
            }
            if self.fail {
                return Err(CopyFailed {
                    message: "clipboard denied".to_string(),
                });
            }
            self.copied.lock().unwrap().push(text.to_string());
            Ok(shortlink_engine::CopyOutcome::Copied)
        }
    }

    struct Harness {
        state: AppState,
        runner: EffectRunner,
        msg_rx: mpsc::Receiver<Msg>,
    }

    impl Harness {
        fn new(client: Arc<FakeClient>, clipboard: FakeClipboard) -> Self {
            shortlink_logging::initialize_for_tests();
            let (msg_tx, msg_rx) = mpsc::channel();
            let runner =
                EffectRunner::new(client, Box::new(clipboard), msg_tx).expect("runner starts");
            Self {
                state: AppState::new(),
                runner,
                msg_rx,
            }
        }

        fn dispatch(&mut self, msg: Msg) {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            self.runner.run(effects);
        }

        /// Waits for the next message that is not a notice expiry and applies it.
        fn pump_one(&mut self) -> Msg {
            loop {
                let msg = self
                    .msg_rx
                    .recv_timeout(Duration::from_secs(5))
                    .expect("message from effect");
                if !matches!(msg, Msg::NoticeExpired { .. }) {
                    self.dispatch(msg.clone());
                    return msg;
                }
            }
        }
    }

    fn shortened(short_url: &str) -> shortlink_engine::ShortenResult {
        Ok(ShortenOutput {
            short_url: short_url.to_string(),
            short_code: None,
            long_url: None,
        })
    }

    #[test]
    fn shorten_end_to_end_reveals_short_url() {
        let client = FakeClient::answering(shortened("https://s.ly/x1"));
        let mut harness = Harness::new(client.clone(), FakeClipboard::default());

        harness.dispatch(Msg::InputChanged("https://example.com".to_string()));
        harness.dispatch(Msg::ShortenClicked);
        assert!(harness.state.view().submitting);

        let msg = harness.pump_one();
        assert!(matches!(msg, Msg::ShortenCompleted { .. }));

        let view = harness.state.view();
        assert_eq!(view.short_url.as_deref(), Some("https://s.ly/x1"));
        assert!(!view.submitting);
        assert_eq!(view.notice.unwrap().kind, NoticeKind::Success);
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn repeated_shorten_while_pending_sends_one_request() {
        let client = FakeClient::answering(shortened("https://s.ly/x1"));
        let mut harness = Harness::new(client.clone(), FakeClipboard::default());

        harness.dispatch(Msg::InputChanged("https://example.com".to_string()));
        harness.dispatch(Msg::ShortenClicked);
        harness.dispatch(Msg::ShortenClicked);
        harness.dispatch(Msg::ShortenClicked);

        harness.pump_one();
        assert!(harness
            .msg_rx
            .recv_timeout(Duration::from_millis(200))
            .map_or(true, |msg| matches!(msg, Msg::NoticeExpired { .. })));
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn empty_input_never_reaches_the_client() {
        let client = FakeClient::answering(shortened("https://s.ly/x1"));
        let mut harness = Harness::new(client.clone(), FakeClipboard::default());

        harness.dispatch(Msg::ShortenClicked);

        let notice = harness.state.view().notice.expect("error notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(harness
            .msg_rx
            .recv_timeout(Duration::from_millis(200))
            .is_err());
        assert_eq!(client.calls(), 0);
    }

    #[test]
    fn service_error_is_shown_and_output_hidden() {
        let client = FakeClient::answering(Err(ShortenError {
            kind: shortlink_engine::FailureKind::HttpStatus(400),
            message: "bad url".to_string(),
        }));
        let mut harness = Harness::new(client, FakeClipboard::default());

        harness.dispatch(Msg::InputChanged("https://example.com".to_string()));
        harness.dispatch(Msg::ShortenClicked);
        harness.pump_one();

        let view = harness.state.view();
        assert_eq!(view.short_url, None);
        let notice = view.notice.unwrap();
        assert_eq!(notice.text, "bad url");
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test]
    fn copy_hands_displayed_url_to_clipboard() {
        let client = FakeClient::answering(shortened("https://s.ly/x1"));
        let clipboard = FakeClipboard::default();
        let mut harness = Harness::new(client, clipboard.clone());

        harness.dispatch(Msg::InputChanged("https://example.com".to_string()));
        harness.dispatch(Msg::ShortenClicked);
        harness.pump_one();

        harness.dispatch(Msg::CopyClicked);
        let msg = harness.pump_one();

        assert_eq!(msg, Msg::CopyCompleted(CopyOutcome::Copied));
        assert_eq!(*clipboard.copied.lock().unwrap(), vec!["https://s.ly/x1"]);
        assert_eq!(
            harness.state.view().notice.unwrap().kind,
            NoticeKind::Success
        );
    }

    #[test]
    fn copy_failure_is_reported() {
        let client = FakeClient::answering(shortened("https://s.ly/x1"));
        let clipboard = FakeClipboard {
            fail: true,
            ..FakeClipboard::default()
        };
        let mut harness = Harness::new(client, clipboard);

        harness.dispatch(Msg::InputChanged("https://example.com".to_string()));
        harness.dispatch(Msg::ShortenClicked);
        harness.pump_one();
        harness.dispatch(Msg::CopyClicked);
        harness.pump_one();

        let notice = harness.state.view().notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.contains("clipboard denied"));
    }

    #[test]
    fn copy_without_result_does_nothing_visible() {
        let client = FakeClient::answering(shortened("https://s.ly/x1"));
        let clipboard = FakeClipboard::default();
        let mut harness = Harness::new(client, clipboard.clone());

        harness.dispatch(Msg::CopyClicked);
        let msg = harness.pump_one();

        assert_eq!(msg, Msg::CopyCompleted(CopyOutcome::Skipped));
        assert!(clipboard.copied.lock().unwrap().is_empty());
        assert_eq!(harness.state.view().notice, None);
    }
}
