mod app;
mod config;
mod domain;
mod error;
mod input;
mod logging;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{format_duration, format_focus_time, Clock, SystemClock};
use persistence::{config_file, ensure_flow_dir, init_local_flow, store_file, FileStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::rc::Rc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "flow")]
#[command(about = "A terminal focus timer that works through a queue of tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .flow directory in the current directory
    Init,
    /// Print the task queue and today's focus time
    Status,
    /// Append a task to the queue
    Add {
        /// Task name
        label: String,
        /// Duration in whole minutes
        minutes: String,
    },
    /// Print focus time for recent days
    Focus {
        /// Number of days to show, ending today
        #[arg(short, long, default_value_t = 7)]
        days: u32,
    },
    /// Set today's focus time back to zero
    ResetFocus,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let flow_dir = init_local_flow()?;
        println!("Initialized flow directory: {}", flow_dir.display());
        println!();
        println!("Flow will now use this local directory for its queue and focus time.");
        println!("Run 'flow' to start the timer.");
        return Ok(());
    }

    let flow_dir = ensure_flow_dir()?;
    let (config, config_error) = Config::load_or_default(config_file(&flow_dir));

    // Logs go to a file; the guard flushes them on exit
    let _log_guard = match logging::init(&flow_dir, &config.log.filter) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: {}", e);
            None
        }
    };
    if let Some(e) = config_error {
        warn!(error = %e, "invalid config, using defaults");
        eprintln!("Warning: {:#}", e);
    }
    let store = FileStore::open(store_file(&flow_dir));
    info!(store = %store.path().display(), "starting");
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let mut app = AppState::new(Box::new(store), clock, config);

    match cli.command {
        Some(Commands::Status) => {
            println!("Using flow directory: {}", flow_dir.display());
            print_status(&app);
            Ok(())
        }
        Some(Commands::Add { label, minutes }) => {
            let secs = error::parse_minutes(&minutes)?;
            app.add_task(&label, secs)?;
            println!("Added '{}' ({})", label.trim(), format_duration(secs as u64));
            Ok(())
        }
        Some(Commands::Focus { days }) => {
            for bucket in app.focus.recent(days.max(1)) {
                println!("{}  {}", bucket.date, format_focus_time(bucket.seconds));
            }
            Ok(())
        }
        Some(Commands::ResetFocus) => {
            app.reset_focus();
            println!("Focus time for {} reset", app.focus.today());
            Ok(())
        }
        Some(Commands::Init) => Ok(()),
        None => {
            app.persist_seed();
            run_tui(&mut app)
        }
    }
}

fn print_status(app: &AppState) {
    println!("Focus today: {}", format_focus_time(app.focus_today()));
    println!();

    if app.queue.is_empty() {
        println!("Queue is empty. Add a task with 'flow add <name> <minutes>'.");
        return;
    }

    println!(
        "Queue ({} task{}, {} planned):",
        app.queue.len(),
        if app.queue.len() == 1 { "" } else { "s" },
        format_duration(app.queue.total_queued_secs())
    );
    let current = app.queue.current_id();
    for (i, task) in app.queue.iter().enumerate() {
        let marker = if Some(task.id) == current { "▶" } else { " " };
        println!("  {} {}. {} ({})", marker, i + 1, task.label, task.duration_formatted());
    }
}

fn run_tui(app: &mut AppState) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(focus_today = app.focus_today(), "exiting");

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = ticker::poll_duration(app.config.ui.poll_ms);

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout so the countdown keeps moving
        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}
