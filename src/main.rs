//! Bay Mirror - a terminal smart mirror dashboard
//!
//! Runs fullscreen in the terminal and shows a clock, current weather with a
//! temperature forecast, surf and wind forecast charts, and news headlines.
//! Each panel polls its upstream source on its own timer; everything runs on
//! a single task driven by the terminal event loop.

mod app;
mod cache;
mod cli;
mod config;
mod data;
mod panel;
mod ui;

use std::env;
use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use cli::Cli;

/// Sets up a panic hook that restores the terminal before printing the panic
/// message, so a crash never leaves the kiosk shell in raw mode.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Kiosk deployments launch from a boot script with no display variable set;
/// default it so anything display-adjacent in the session behaves.
fn default_display_var() {
    let unset = env::var("DISPLAY").map(|v| v.is_empty()).unwrap_or(true);
    if unset {
        log::info!("no display found, defaulting DISPLAY to :0.0");
        env::set_var("DISPLAY", ":0.0");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    default_display_var();

    let config = Cli::parse().into_config();

    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // First frame before any network traffic: cached records or placeholders
    terminal.draw(|f| ui::render_dashboard(f, &app))?;

    // Initial fetch for every panel
    app.tick().await;

    // Main event loop: draw, poll keys briefly, then let due panels refresh.
    // A panel fetch blocks the loop for its duration, so the clock freezes
    // while an upstream drags; that is the accepted cost of one task.
    loop {
        terminal.draw(|f| ui::render_dashboard(f, &app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        app.tick().await;

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
