//! Trip Guide - plan a trip in the terminal
//!
//! A terminal UI application that collects trip preferences, asks an
//! itinerary generation service for a day-by-day plan and shows the result
//! as itinerary, restaurant and tips tabs.

use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use tripguide::app::{App, Command};
use tripguide::background::{self, BackgroundMessage, HealthMonitor};
use tripguide::cli::{Cli, StartupConfig};
use tripguide::data::ItineraryClient;
use tripguide::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Applies a message from a background task to the app
fn apply_message(app: &mut App, message: BackgroundMessage) {
    match message {
        BackgroundMessage::Health(status) => app.apply_health(status),
        BackgroundMessage::Itinerary(result) => app.apply_itinerary(result),
    }
}

async fn run(config: StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = ItineraryClient::new(config.base_url.clone());
    let (tx, mut rx) = mpsc::channel::<BackgroundMessage>(16);
    let health = HealthMonitor::spawn(client.clone(), config.health_interval, tx.clone());

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_startup_config(&config);

    // Main event loop
    let result: Result<(), Box<dyn std::error::Error>> = loop {
        // Drain background results before drawing
        while let Some(message) = background::try_recv(&mut rx) {
            apply_message(&mut app, message);
        }

        if let Err(err) = terminal.draw(|f| ui::render(f, &app)) {
            break Err(err.into());
        }

        // Poll for keyboard events with 100ms timeout
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(Command::SubmitItinerary(request)) = app.handle_key(key) {
                        background::spawn_itinerary_request(client.clone(), request, tx.clone());
                    }
                }
                Ok(_) => {}
                Err(err) => break Err(err.into()),
            },
            Ok(false) => {}
            Err(err) => break Err(err.into()),
        }

        // Check if we should quit
        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    health.shutdown().await;
    tracing::info!("Trip Guide stopped");

    result
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(2);
        }
    };

    if let Err(err) = logging::init(config.log_file.as_deref()) {
        eprintln!("Warning: logging disabled: {}", err);
    }
    tracing::info!(base_url = %config.base_url, demo = config.demo, "Trip Guide starting");

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Trip Guide exited with an error");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
