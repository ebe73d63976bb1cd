//! folio - browse a GitHub user's most recently updated projects
//!
//! Starts the TUI by default; `--print` renders the same cards to stdout.

use std::fs;
use std::io;
use std::panic;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use folio::app::App;
use folio::cache::paths;
use folio::cli::Cli;
use folio::export::export_portfolio_data;
use folio::github::GitHubClient;
use folio::projects::ProjectLoader;
use folio::state::{DEFAULT_USERNAME, ProjectsState, resolve_identity};
use folio::ui::cards;

/// Initializes tracing, filtered by `RUST_LOG` (default "info").
///
/// The TUI owns the terminal, so interactive runs log to the cache directory
/// and fall back to no output if that file cannot be opened.
fn init_tracing(to_stderr: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if to_stderr {
        tracing_subscriber::registry()
            .with(fmt::layer().compact().with_target(false).with_writer(io::stderr))
            .with(filter)
            .init();
        return;
    }

    let log_file = paths::log_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
            .with(filter)
            .init();
    }
}

/// Sets up a panic hook that restores the terminal before printing the panic message.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.print);

    let client = match GitHubClient::new(&cli.api_base, cli.token.as_deref()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create GitHub client");
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    let loader = ProjectLoader::new(client);

    if cli.print {
        return print_projects(&cli, loader).await;
    }

    let projects = ProjectsState::new(loader, cli.username.clone(), cli.policy());
    match run_tui(App::new(projects)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "terminal failure");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load once and print the cards, optionally exporting the result.
async fn print_projects(cli: &Cli, mut loader: ProjectLoader<GitHubClient>) -> ExitCode {
    let identity = resolve_identity(&cli.username, DEFAULT_USERNAME);
    let listing = match loader.load_projects(&identity, cli.policy(), false).await {
        Ok(listing) => listing,
        Err(e) => {
            error!(error = %e, username = %identity, "failed to load projects");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", cards::plain_text(&listing));
    info!(count = listing.len(), "printed projects");

    if let Some(path) = &cli.export {
        if let Err(e) = export_portfolio_data(loader.cache(), path) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

async fn run_tui(mut app: App) -> io::Result<()> {
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}
