use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context;
use client_logging::{client_error, client_info, client_warn};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use scraper_api::EngineHandle;
use scraper_core::{update, AppState, AppViewModel, Msg};

use super::browser;
use super::effects::EffectRunner;
use super::ui::input::{self, Action};
use super::ui::{self, UiState};
use crate::config::ClientConfig;

/// How long to wait for terminal input before checking the engine again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

type Backend = CrosstermBackend<Stdout>;

pub fn run_app(config: &ClientConfig) -> anyhow::Result<()> {
    client_info!("Starting scraper client against {}", config.api.base_url);
    let engine = EngineHandle::new(config.api.clone()).context("starting request engine")?;
    let runner = EffectRunner::new(engine);

    let mut guard = TerminalGuard::enter().context("preparing terminal")?;
    let result = event_loop(&mut guard.terminal, &runner);
    if let Err(err) = &result {
        client_error!("UI loop stopped: {:#}", err);
    }
    result
}

/// Raw mode and alternate screen for the lifetime of the UI; restored on drop,
/// including when the loop exits with an error.
struct TerminalGuard {
    terminal: Terminal<Backend>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableBracketedPaste) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
        let _ = self.terminal.show_cursor();
    }
}

struct Session<'a> {
    state: AppState,
    ui: UiState,
    view: AppViewModel,
    runner: &'a EffectRunner,
}

impl Session<'_> {
    /// Applies a message and hands any effects to the runner. Returns whether
    /// the view needs redrawing.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.enqueue(effects);
        let changed = state.consume_dirty();
        if changed {
            self.view = state.view();
        }
        self.state = state;
        changed
    }
}

fn event_loop(terminal: &mut Terminal<Backend>, runner: &EffectRunner) -> anyhow::Result<()> {
    let mut session = Session {
        state: AppState::new(),
        ui: UiState::default(),
        view: AppViewModel::default(),
        runner,
    };
    session.view = session.state.view();
    session.dispatch(Msg::Mounted);
    let mut redraw = true;

    loop {
        for msg in runner.drain() {
            redraw |= session.dispatch(msg);
        }

        if redraw {
            terminal
                .draw(|frame| ui::render::render(frame, &session.view, &mut session.ui))
                .context("drawing frame")?;
            redraw = false;
        }

        if !event::poll(POLL_INTERVAL).context("polling terminal")? {
            continue;
        }
        let action = match event::read().context("reading terminal event")? {
            Event::Key(key) => input::handle_key(&mut session.ui, &session.view, key),
            Event::Paste(text) => input::handle_paste(&session.ui, &session.view, &text),
            Event::Resize(..) => Action::Redraw,
            _ => Action::Ignore,
        };
        match action {
            Action::Dispatch(msg) => redraw |= session.dispatch(msg),
            Action::Redraw => redraw = true,
            Action::OpenUrl(url) => {
                client_info!("Opening {} in browser", url);
                if let Err(err) = browser::open_url(&url) {
                    client_warn!("Could not open {}: {}", url, err);
                }
            }
            Action::Quit => break,
            Action::Ignore => {}
        }
    }

    client_info!("Scraper client exiting");
    Ok(())
}
