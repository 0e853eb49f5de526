mod app;
mod tui;
mod ui;

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, style::Style};
use tracing::level_filters::LevelFilter;
use triage_core::{DeletionReport, ExitReason, Screen};

use app::AppState;
use tui::{AppEvent, EventHandler, handle_key};
use ui::{
    AppLayout, CompleteView, ConfirmView, Footer, Header, LoadingView, ProgressView, ReviewView,
    Theme,
};

/// TRIAGE - Review the current directory one entry at a time
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(about = "Keep, delete or skip each entry of the current directory, then delete in one batch")]
#[command(version)]
struct Args {}

fn main() -> Result<()> {
    color_eyre::install()?;

    let _args = Args::parse();
    init_logging();

    let path = std::env::current_dir()?;
    tracing::info!(root = %path.display(), "starting review");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app
    let result = run_app(&mut terminal, path);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    let reason = result?;
    if let ExitReason::Fatal(message) = &reason {
        eprintln!("Error: {message}");
    }
    std::process::exit(reason.exit_code());
}

/// Log to a file in the user cache dir; the terminal belongs to the UI
fn init_logging() {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("triage")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("triage.log")) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(LevelFilter::INFO)
        .try_init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    path: PathBuf,
) -> Result<ExitReason> {
    let theme = Theme::default();
    let mut state = AppState::new(path);
    let mut event_handler = EventHandler::new(100); // 100ms tick rate

    state.start_loading();

    loop {
        // Drain catalog and deletion workers
        state.poll_background();
        if state.should_quit() {
            break;
        }

        terminal.draw(|frame| draw(frame, &state, &theme))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = handle_key(key, state.screen());
                state.handle_action(action);
            }
            AppEvent::Resize => {
                // Terminal will redraw on next loop
            }
            AppEvent::Tick => {
                state.handle_action(app::Action::Tick);
            }
        }

        if state.should_quit() {
            break;
        }
    }

    Ok(state
        .exit_reason()
        .cloned()
        .unwrap_or(ExitReason::Finished))
}

fn draw(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area();
    let layout = AppLayout::new(area);
    let controller = state.controller();

    // Background
    frame
        .buffer_mut()
        .set_style(area, Style::default().bg(theme.bg));

    frame.render_widget(Header::new(state, theme), layout.header);

    match controller.screen() {
        Screen::Loading => {
            frame.render_widget(
                LoadingView::new(controller.spinner_frame(), theme),
                layout.body,
            );
        }
        Screen::Review => {
            let session = controller.session();
            if let Some(item) = session.current() {
                frame.render_widget(
                    ReviewView::new(item, session.position(), theme)
                        .with_code_preview(state.code_preview()),
                    layout.body,
                );
            }
        }
        Screen::Confirm => {
            if let Some(pending) = controller.pending() {
                frame.render_widget(ConfirmView::new(pending, theme), layout.body);
            }
        }
        Screen::Progress => {
            frame.render_widget(
                ProgressView::new(controller.progress(), controller.spinner_frame(), theme),
                layout.body,
            );
        }
        Screen::Complete => {
            let empty = DeletionReport::default();
            let report = controller.report().unwrap_or(&empty);
            let deferred = controller.pending().map_or(0, |p| p.deferred.len());
            frame.render_widget(
                CompleteView::new(report, theme)
                    .deferred(deferred)
                    .nothing_to_review(controller.session().is_empty()),
                layout.body,
            );
        }
    }

    frame.render_widget(Footer::new(controller.screen(), theme), layout.footer);
}
