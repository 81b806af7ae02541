//! Bloom Pizza - Terminal Order Form
//!
//! A terminal pizza order form. Fields are validated as you type, the submit
//! control stays disabled until the order is complete, and orders are posted
//! as JSON to the configured order service.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use bloom_pizza::application::App;
use bloom_pizza::infrastructure::{init_logging, AppConfig, CliArgs, HttpOrderClient};
use bloom_pizza::presentation::{render_ui, InputHandler};

/// How long the event loop waits for a key before checking on the order request.
const TICK: Duration = Duration::from_millis(100);

/// Entry point for the Bloom Pizza order client.
///
/// Reads configuration, starts file logging, sets up the terminal, and runs
/// the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log file cannot be
/// opened, or terminal setup fails.
fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = AppConfig::from_args(&args)?;
    init_logging(&config.log_file, config.verbose)?;

    let gateway = HttpOrderClient::from_config(&config).context("failed to create the HTTP client")?;
    info!(endpoint = %gateway.endpoint(), timeout = ?config.timeout, "starting bloom-pizza");
    let mut app = App::new(Arc::new(gateway));

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "terminal loop failed");
        println!("{err:?}");
    }

    if app.is_submitting() {
        info!("waiting for the in-flight order before exiting");
        println!("Waiting for the order service to answer...");
        app.wait_for_submission();
        if let Some(message) = &app.order_form.message {
            println!("{message}");
        }
        if let Some(fault) = &app.order_form.fault {
            println!("{fault}");
        }
    }
    info!("bloom-pizza exited");

    Ok(())
}

/// Main application event loop.
///
/// Redraws, waits up to one tick for a key, then applies the order response
/// if it has arrived, so the screen stays live while an order is in flight.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;
        if app.should_quit {
            return Ok(());
        }

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    InputHandler::handle_key_event(app, key.code, key.modifiers);
                }
            }
        }
        app.poll_submission();
    }
}
