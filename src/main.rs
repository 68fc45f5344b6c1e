use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use arialog::theme::Theme;
use arialog::tui::LogView;
use arialog::ui::{Footer, FooterStatus, Header};
use arialog::{dependencies, logging, paths};
use arialog::{Config, LogPanel, PanelContent, RefreshError, SystemExecutor};

struct App {
    view: LogView,
    theme: Theme,
    header: Header,
    footer: Footer,
    /// Refreshes spawned but not yet completed. More than one can be in
    /// flight when a refresh outlives the poll interval; results apply
    /// in arrival order and the last one wins.
    in_flight: usize,
}

impl App {
    fn new(config: &Config) -> Self {
        Self {
            view: LogView::new(config.poll_interval_secs),
            theme: Theme::from_env(),
            header: Header::new("Aria2 - Log Data"),
            footer: Footer::new(),
            in_flight: 0,
        }
    }

    fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.view.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.view.scroll_down(1),
            KeyCode::PageUp => self.view.page_up(),
            KeyCode::PageDown => self.view.page_down(),
            KeyCode::Home => self.view.scroll_home(),
            KeyCode::End => self.view.scroll_end(),
            KeyCode::Esc | KeyCode::Char('q') => return false,
            _ => {}
        }
        true
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(frame.size());

        self.header.render(&self.theme, chunks[0], frame);
        self.view.render(&self.theme, frame, chunks[1]);

        self.footer.set_status(if self.in_flight > 0 {
            FooterStatus::Refreshing
        } else {
            FooterStatus::Ready
        });
        self.footer.render(&self.theme, chunks[2], frame);
    }
}

fn spawn_refresh(
    runtime: &tokio::runtime::Runtime,
    panel: &LogPanel,
    tx: &mpsc::Sender<Result<PanelContent, RefreshError>>,
) {
    let panel = panel.clone();
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = panel.refresh(&SystemExecutor).await;
        let _ = tx.send(result);
    });
}

fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging().context("Failed to initialize logging")?;

    info!("Starting arialog");

    // Ensure data and config directories exist
    paths::ensure_data_dir()?;
    paths::ensure_config_dir()?;

    // Load configuration
    let config = Config::load()?;
    config.validate()?;

    // Check that tail and logread are usable
    dependencies::verify_dependencies(&config).context("Missing required commands")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    let panel = LogPanel::new(
        config.uci_config_dir(),
        config.tail_bin.clone(),
        config.logread_bin.clone(),
        config.syslog_tag.clone(),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let (tx, rx) = mpsc::channel();

    // First refresh right away; the view shows its loading placeholder
    // until the result lands.
    spawn_refresh(&runtime, &panel, &tx);
    app.in_flight += 1;

    let poll_interval = Duration::from_secs(config.poll_interval_secs);
    let mut next_refresh = Instant::now() + poll_interval;
    let mut running = true;

    while running {
        terminal.draw(|f| app.render(f))?;

        // Apply completed refreshes in arrival order. A failed refresh
        // leaves the previous content on screen; the next tick is the
        // only retry.
        while let Ok(result) = rx.try_recv() {
            app.in_flight = app.in_flight.saturating_sub(1);
            match result {
                Ok(content) => app.view.set_content(content),
                Err(err) => warn!("Refresh failed: {}", err),
            }
        }

        if Instant::now() >= next_refresh {
            spawn_refresh(&runtime, &panel, &tx);
            app.in_flight += 1;
            next_refresh = Instant::now() + poll_interval;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('r') {
                        spawn_refresh(&runtime, &panel, &tx);
                        app.in_flight += 1;
                        next_refresh = Instant::now() + poll_interval;
                    } else {
                        running = app.handle_key(key.code);
                    }
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Application exiting");
    Ok(())
}
