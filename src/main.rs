use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::OpenOptions,
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;
use typehead::{
    app::{App, AppSettings},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    feed::{FeedSource, FileFeedSource, HttpFeedSource},
    history::ResultsLog,
    keys::{command_for_event, Command},
    runtime::{spawn_feed_loader, CrosstermEventSource, FixedTicker, Runner},
    share::parse_score_to_beat,
    ui::AppView,
};
use webbrowser::Browser;

/// typing speed test with live news headlines
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed test that fetches a news feed and asks you to retype its headlines, reporting elapsed time, words typed and words per minute."
)]
pub struct Cli {
    /// feed to pull headlines from
    #[clap(short = 'u', long)]
    feed_url: Option<String>,

    /// read the feed from a local file instead of the network
    #[clap(short = 'f', long, conflicts_with = "feed_url")]
    feed_file: Option<PathBuf>,

    /// title text to skip (the feed's own channel title)
    #[clap(long)]
    exclude_title: Option<String>,

    /// score to beat, as received in a share link
    #[clap(short = 'c', long)]
    challenge: Option<String>,

    /// milliseconds between display refreshes
    #[clap(long)]
    tick_ms: Option<u64>,

    /// do not append finished sessions to the results log
    #[clap(long)]
    no_log: bool,

    /// verbosity of the log file (overridden by TYPEHEAD_LOG)
    #[clap(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Everything the event loop needs, resolved from CLI flags over the config file.
struct RunOptions {
    source: Box<dyn FeedSource>,
    excluded_title: String,
    tick: Duration,
    settings: AppSettings,
    results: Option<ResultsLog>,
}

impl RunOptions {
    fn resolve(cli: Cli, config: Config) -> Self {
        let source: Box<dyn FeedSource> = match cli.feed_file {
            Some(path) => Box::new(FileFeedSource::new(path)),
            None => Box::new(HttpFeedSource::new(
                cli.feed_url.unwrap_or(config.feed_url),
            )),
        };
        let results = if cli.no_log {
            None
        } else {
            AppDirs::results_path().map(ResultsLog::with_path)
        };
        Self {
            source,
            excluded_title: cli.exclude_title.unwrap_or(config.excluded_title),
            tick: Duration::from_millis(cli.tick_ms.unwrap_or(config.tick_ms).max(10)),
            settings: AppSettings {
                share_url: config.share_url,
                score_to_beat: cli.challenge.as_deref().and_then(parse_score_to_beat),
            },
            results,
        }
    }
}

fn init_logging(level: LogLevel) -> Option<PathBuf> {
    let path = AppDirs::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    let filter = EnvFilter::try_from_env("TYPEHEAD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("typehead={level}")));

    // The terminal belongs to the TUI, so logs only go to the file
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Some(path)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_path = init_logging(cli.log_level);
    let store = FileConfigStore::new();
    let config = store.load();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log = ?log_path,
        config = %store.path().display(),
        "starting"
    );
    let options = RunOptions::resolve(cli, config);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, options);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(%err, "exiting with error");
    }
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    options: RunOptions,
) -> Result<(), Box<dyn Error>> {
    let events = CrosstermEventSource::new();
    spawn_feed_loader(options.source, options.excluded_title, events.sender());
    let runner = Runner::new(events, FixedTicker::new(options.tick));

    let mut app = App::new(options.settings);

    loop {
        terminal.draw(|f| f.render_widget(AppView::new(&app, Instant::now()), f.area()))?;

        match command_for_event(&app, runner.step()) {
            Some(Command::Quit) => break,
            Some(Command::OpenLink(link)) => {
                if Browser::is_available() {
                    if let Err(err) = webbrowser::open(&link) {
                        tracing::warn!(%err, "could not open share link");
                    }
                }
            }
            Some(Command::Apply(action)) => {
                let now = Instant::now();
                let was_running = app.is_running();
                app = app.update(action, now);
                if was_running && !app.is_running() {
                    record_result(&app, now, options.results.as_ref());
                }
            }
            None => {}
        }
    }

    Ok(())
}

fn record_result(app: &App, now: Instant, log: Option<&ResultsLog>) {
    if !app.show_wpm() {
        return;
    }
    let result = app.result(now, chrono::Local::now());
    tracing::info!(
        headlines = result.headlines,
        words = result.words,
        elapsed_secs = result.elapsed_secs,
        wpm = ?result.wpm,
        "session stopped"
    );
    if let Some(log) = log {
        if let Err(err) = log.append(&result) {
            tracing::warn!(%err, path = %log.path().display(), "could not write results log");
        }
    }
}
