//! agenthub-tui: terminal browser for the agent marketplace.
//! Uses Ratatui + Crossterm for rendering.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tokio::sync::RwLock;
use tracing::info;

use agenthub_core::config::Config;
use agenthub_core::marketplace::Marketplace;

use app::{App, Tab};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to a file; the terminal belongs to the UI
    let _guard = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(|| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open("agenthub-tui.log")
                .map(|f| Box::new(f) as Box<dyn io::Write>)
                .unwrap_or_else(|_| Box::new(io::sink()))
        })
        .try_init();

    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = Config::load_from_dir(&project_root)?;

    let marketplace = Arc::new(RwLock::new(Marketplace::new(
        config.clone(),
        Box::new(agenthub_core::submission::JsonlInbox::new(config.submissions_file())),
    )));
    let mut rx = marketplace.read().await.subscribe();

    let mut app = App::new(Arc::clone(&marketplace), &config);
    app.reload().await;
    info!("Starting TUI with {} catalog entries", app.total);

    // Load the configured source in the background; the bundled catalog shows meanwhile
    tokio::spawn(app::refresh_catalog(Arc::clone(&marketplace)));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &mut rx).await;

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mut tokio::sync::broadcast::Receiver<agenthub_core::events::HubEvent>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Marketplace events (non-blocking)
        loop {
            match rx.try_recv() {
                Ok(event) => app.handle_event(event).await,
                Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }

        app.tick(Instant::now()).await;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    // Quit
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.should_quit = true,
                    (KeyCode::Char('q'), KeyModifiers::CONTROL) => app.should_quit = true,
                    // Tab switching
                    (KeyCode::Right, KeyModifiers::ALT) => app.next_tab(),
                    (KeyCode::Left, KeyModifiers::ALT) => app.prev_tab(),
                    (KeyCode::Tab, _) => app.next_tab(),
                    (KeyCode::BackTab, _) => app.prev_tab(),
                    // Filters
                    (KeyCode::Char('k'), KeyModifiers::CONTROL) => app.cycle_category().await,
                    (KeyCode::Char('d'), KeyModifiers::CONTROL) => app.cycle_difficulty().await,
                    (KeyCode::Char('s'), KeyModifiers::CONTROL) => app.cycle_sort().await,
                    (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                        tokio::spawn(app::refresh_catalog(Arc::clone(&app.marketplace)));
                    }
                    (KeyCode::Char('l'), KeyModifiers::CONTROL) if app.tab == Tab::Community => {
                        app.like_selected().await;
                    }
                    // Search input
                    (KeyCode::Char(c), m)
                        if app.tab == Tab::Marketplace
                            && (m.is_empty() || m == KeyModifiers::SHIFT) =>
                    {
                        app.type_char(c, Instant::now());
                    }
                    (KeyCode::Backspace, _) if app.tab == Tab::Marketplace => {
                        app.backspace(Instant::now());
                    }
                    (KeyCode::Esc, _) if app.tab == Tab::Marketplace => app.clear_search().await,
                    // Selection
                    (KeyCode::Up, _) => app.select_up(),
                    (KeyCode::Down, _) => app.select_down(),
                    _ => {}
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
