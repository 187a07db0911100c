use std::io::{self, Stdout};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use shortlink_core::{update, AppState, Msg};
use shortlink_engine::{ReqwestShortenClient, ShortenSettings, SystemClipboard};
use shortlink_logging::{shortlink_error, shortlink_info};

use super::effects::EffectRunner;
use super::logging;
use super::ui;

type Term = Terminal<CrosstermBackend<Stdout>>;

const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> Result<()> {
    logging::initialize(Path::new(logging::LOG_FILE));

    let settings = ShortenSettings::default();
    shortlink_info!("Starting shortlink against {}", settings.base_url);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(
        Arc::new(ReqwestShortenClient::new(settings.clone())),
        Box::new(SystemClipboard::new()),
        msg_tx,
    )
    .context("Failed to start network engine")?;

    let mut terminal = setup_terminal()?;
    let mut app = App::new(runner, msg_rx, settings.base_url);
    let result = app.run(&mut terminal);
    restore_terminal(&mut terminal)?;

    if let Err(err) = &result {
        shortlink_error!("Event loop failed: {:#}", err);
    }
    result
}

fn setup_terminal() -> Result<Term> {
    with_raw_mode(enable_raw_mode, disable_raw_mode, || {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to setup terminal")?;
        Terminal::new(CrosstermBackend::new(stdout)).map_err(|err| {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
            anyhow::Error::new(err).context("Failed to create terminal")
        })
    })
}

/// Runs `rest` after switching raw mode on, and switches it back off if
/// `rest` fails so the shell is not left in raw mode.
fn with_raw_mode<T>(
    enable: impl FnOnce() -> io::Result<()>,
    disable: impl FnOnce() -> io::Result<()>,
    rest: impl FnOnce() -> Result<T>,
) -> Result<T> {
    enable().context("Failed to enable raw mode")?;
    rest().inspect_err(|_| {
        let _ = disable();
    })
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")
}

/// Owns the controller state and routes terminal events and effect
/// outcomes through `update`.
struct App {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    endpoint: String,
    should_quit: bool,
    needs_redraw: bool,
}

impl App {
    fn new(runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>, endpoint: String) -> Self {
        Self {
            state: AppState::new(),
            runner,
            msg_rx,
            endpoint,
            should_quit: false,
            needs_redraw: true,
        }
    }

    fn run(&mut self, terminal: &mut Term) -> Result<()> {
        while !self.should_quit {
            if self.state.consume_dirty() || std::mem::take(&mut self.needs_redraw) {
                let view = self.state.view();
                terminal
                    .draw(|frame| ui::render::render(frame, &view, &self.endpoint))
                    .context("Failed to draw terminal")?;
            }

            if event::poll(POLL_INTERVAL).context("Failed to poll terminal events")? {
                let event = event::read().context("Failed to read terminal event")?;
                if let Some(msg) = self.handle_event(event) {
                    self.dispatch(msg);
                }
            }

            self.process_pending_messages();
        }
        Ok(())
    }

    fn process_pending_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn handle_event(&mut self, event: Event) -> Option<Msg> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Paste(text) => {
                let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
                Some(Msg::InputChanged(format!("{}{}", self.state.input(), pasted)))
            }
            Event::Resize(..) => {
                self.needs_redraw = true;
                None
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Msg> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                None
            }
            KeyCode::Enter => Some(Msg::ShortenClicked),
            KeyCode::F(2) => Some(Msg::CopyClicked),
            KeyCode::Char('y') if ctrl => Some(Msg::CopyClicked),
            KeyCode::Char('u') if ctrl => Some(Msg::InputChanged(String::new())),
            KeyCode::Backspace => {
                let mut input = self.state.input().to_string();
                input.pop()?;
                Some(Msg::InputChanged(input))
            }
            KeyCode::Char(c) if !ctrl => {
                let mut input = self.state.input().to_string();
                input.push(c);
                Some(Msg::InputChanged(input))
            }
            _ => None,
        }
    }
}
