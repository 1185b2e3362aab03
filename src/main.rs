// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    event::{poll, read, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::{stdout, Stdout};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

mod app;
mod config;
mod core;
mod event;
mod logging;
mod timer;
mod ui;

use crate::app::{App, Focus, View};
use crate::core::client::AnalysisClient;
use crate::event::AppEvent;

/// How long the loop blocks waiting for a key while an animation is running.
const FRAME: Duration = Duration::from_millis(16);
const IDLE_FRAME: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = config::Args::parse();
    let service_url = args.service_url()?;
    let log_path = logging::initialize_logging()?;
    info!(log = %log_path.display(), service = %service_url, "PhishScope starting.");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let client = AnalysisClient::new(&service_url)?;
    let mut app = App::new(client, tx);
    app.check_health();

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let outcome = run(&mut terminal, &mut app, &mut rx);
    restore_terminal()?;

    info!("PhishScope exiting.");
    outcome
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableBracketedPaste)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    stdout().execute(DisableBracketedPaste)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    rx: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        let timeout = if app.has_running_timers() { FRAME } else { IDLE_FRAME };
        if poll(timeout)? {
            handle_terminal_event(app, read()?);
        }

        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
    }
    Ok(())
}

fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) if app.view == View::Submission && app.alert.is_none() => app.paste(&text),
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // A visible alert blocks everything else until acknowledged.
    if app.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_alert();
        }
        return;
    }

    match app.view {
        View::Submission => handle_submission_input(app, key),
        View::Scanning => {
            if key.code == KeyCode::Char('q') {
                app.quit();
            }
        }
        View::Results => handle_results_input(app, key.code),
    }
}

/// Editing keys go to whichever field has focus.
fn handle_submission_input(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::F(5) => app.submit(),
        KeyCode::Char('s') if ctrl => app.submit(),
        KeyCode::Char('r') if ctrl => app.remove_file(),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        _ if ctrl => {}
        code => match app.focus {
            Focus::Text => match code {
                KeyCode::Char(c) => app.input.push_char(c),
                KeyCode::Enter => app.input.push_char('\n'),
                KeyCode::Backspace => app.input.pop_char(),
                _ => {}
            },
            Focus::File => match code {
                KeyCode::Char(c) => app.input.push_path_char(c),
                KeyCode::Enter => app.attach_file(),
                KeyCode::Backspace => app.input.pop_path_char(),
                _ => {}
            },
        },
    }
}

fn handle_results_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.new_analysis(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        _ => {}
    }
}
