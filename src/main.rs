use std::path::PathBuf;
use std::time::{Duration, Instant};

use agent_desk::{
    app::{run_command, update, AppState},
    bootstrap,
    config::{self, IdentitySettings},
    event::AppEvent,
    logging,
    orchestrator::ChatOrchestrator,
    paths::Paths,
    view::render,
};
use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Terminal front end for remote conversational agents.
#[derive(Debug, Parser)]
#[command(name = "agent-desk", version, about)]
struct Cli {
    /// Path to config.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Environment block to use
    #[arg(long, env = "APP_ENV")]
    env: Option<String>,

    /// Keep profiles as JSON files in this directory instead of the hosted store
    #[arg(long)]
    profile_dir: Option<PathBuf>,

    /// Directory for the log file
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().wrap_err("failed to get current directory")?;
    let paths = Paths::resolve(&working_dir)
        .with_config(cli.config)
        .with_log_dir(cli.log_dir);

    let _log_guard = logging::init(&paths.log_dir, cli.verbose)?;

    let environment = config::selected_environment(cli.env.as_deref());
    let app_config = config::load(&paths.config, &environment)?;

    let http = reqwest::Client::builder()
        .build()
        .wrap_err("failed to build HTTP client")?;
    let boot = bootstrap::build(
        &app_config,
        IdentitySettings::from_env(),
        cli.profile_dir,
        http,
    )?;

    let mut state = AppState::new(app_config.environment.clone(), app_config.agents.clone());

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut state, &boot.orchestrator).await;

    // Terminal cleanup (always execute even if event loop errored)
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop following Elm Architecture.
/// Queued commands run one at a time; the screen is redrawn with the
/// in-flight command before each backend call so the user sees progress.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    orchestrator: &ChatOrchestrator,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| render(state, frame))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    apply(state, AppEvent::Key(key));
                }
            }
        }

        while let Some(command) = state.pending.pop_front() {
            state.running = Some(command.clone());
            terminal.draw(|frame| render(state, frame))?;

            let result = run_command(orchestrator, &mut state.session, &command).await;
            if let Err(ref e) = result {
                tracing::warn!(?command, error = %e, "command failed");
            }
            apply(state, AppEvent::CommandFinished { command, result });
        }

        if last_tick.elapsed() >= tick_rate {
            apply(state, AppEvent::Tick(Utc::now()));
            last_tick = Instant::now();
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Feed an event through the pure update function in place.
fn apply(state: &mut AppState, event: AppEvent) {
    let current = std::mem::replace(state, AppState::new(String::new(), Vec::new()));
    *state = update(current, event);
}
