//! LazyAmbar - a terminal client for the Ambar document search engine.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use lazyambar::api::{store_token, AmbarClient};
use lazyambar::app::App;
use lazyambar::config::{Config, Profile};
use lazyambar::events::EventHandler;
use lazyambar::logging;
use lazyambar::tasks::create_task_channel;

#[derive(Debug, Parser)]
#[command(name = "lazyambar", version, about)]
struct Cli {
    /// Profile to connect with. Defaults to the configured default profile.
    #[arg(short, long)]
    profile: Option<String>,

    /// Search for this query on startup.
    #[arg(short, long)]
    query: Option<String>,

    /// Path to the config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read a token from stdin, store it in the keyring for the profile and exit.
    #[arg(long)]
    store_token: bool,
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let result = run(cli).await;
    if let Err(e) = &result {
        error!(error = %e, "Exited with error");
    }
    logging::shutdown();
    result
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref());
    let profile = select_profile(&config, cli.profile.as_deref())?;

    if cli.store_token {
        let mut token = String::new();
        io::stdin()
            .lock()
            .read_line(&mut token)
            .context("failed to read token from stdin")?;
        store_token(&profile.name, token.trim())?;
        println!("Token stored for profile '{}'", profile.name);
        return Ok(());
    }

    let client = AmbarClient::from_profile(profile)
        .with_context(|| format!("failed to create client for profile '{}'", profile.name))?;
    info!(profile = %profile.name, url = %client.base_url(), "Connecting");

    let mut app = App::new(config.settings.clone(), cli.query.as_deref());

    let mut terminal = setup_terminal()?;
    install_panic_hook();
    let result = event_loop(&mut terminal, &mut app, &client);
    restore_terminal(&mut terminal)?;
    result
}

/// A missing or broken config falls back to the defaults.
fn load_config(path: Option<&std::path::Path>) -> Config {
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|e| {
        warn!(error = %e, "Could not load configuration, using defaults");
        Config::default()
    })
}

fn select_profile<'a>(config: &'a Config, name: Option<&str>) -> Result<&'a Profile> {
    if let Some(name) = name {
        return Ok(config.profile(name)?);
    }
    match config.get_default_profile() {
        Some(profile) => Ok(profile),
        None => {
            let path = Config::default_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "config.toml".to_string());
            bail!("no profile configured; add a [[profiles]] entry to {}", path)
        }
    }
}

fn event_loop(terminal: &mut Tui, app: &mut App, client: &AmbarClient) -> Result<()> {
    let (mut rx, spawner) = create_task_channel();
    let events = EventHandler::new();

    loop {
        for request in app.take_requests() {
            spawner.spawn(client, request);
        }

        terminal.draw(|frame| app.view(frame))?;

        let event = events.next()?;
        app.update(event);

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        if app.should_quit() {
            info!("Leaving event loop");
            return Ok(());
        }
    }
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Leave the alternate screen before the default hook prints the panic.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));
}
