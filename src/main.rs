// listtrace: step-by-step linked-list algorithm player

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;

use listtrace::engine::{listing, Engine, OperationKind, Outcome, Params, Variant};
use listtrace::script::parse_script;
use listtrace::snapshot::Step;
use listtrace::ui::{App, Recording};

#[derive(Parser)]
#[command(name = "listtrace")]
#[command(
    version,
    about = "Replay linked-list algorithms one pointer assignment at a time"
)]
struct Args {
    /// List topology: singly, doubly, circular-singly or circular-doubly
    #[arg(long, default_value = "singly")]
    variant: Variant,

    /// Operations to run in order, e.g. insertTail:10 insertAt:15@1 reverse
    #[arg(value_name = "OP", required = true)]
    script: Vec<String>,

    /// Print the recorded steps as JSON instead of opening the player
    #[arg(long)]
    json: bool,

    /// With --json, print every operation instead of only the last one
    #[arg(long, requires = "json")]
    all: bool,

    /// Auto-play delay between steps in milliseconds
    #[arg(long, default_value_t = 800)]
    interval_ms: u64,
}

/// JSON form of one executed operation
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    variant: Variant,
    operation: OperationKind,
    params: &'a Params,
    outcome: Option<&'a Outcome>,
    listing: &'static [&'static str],
    steps: &'a [Step],
}

impl<'a> From<&'a Recording> for Report<'a> {
    fn from(recording: &'a Recording) -> Self {
        Report {
            variant: recording.variant,
            operation: recording.operation,
            params: &recording.params,
            outcome: recording.outcome.as_ref(),
            listing: recording.listing,
            steps: recording.cursor.steps(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let items = match parse_script(&args.script) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Script error: {}", e);
            std::process::exit(1);
        }
    };

    // Run every operation up front; the player only replays
    let mut engine = Engine::new();
    let mut recordings = Vec::with_capacity(items.len());
    for item in items {
        if let Err(e) = engine.execute(args.variant, item.operation, item.params.clone()) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        recordings.push(Recording {
            variant: args.variant,
            operation: item.operation,
            params: item.params,
            listing: listing(args.variant, item.operation).unwrap_or(&[]),
            cursor: engine.cursor(),
            outcome: engine.last_outcome().cloned(),
        });
    }

    if args.json {
        let output = if args.all {
            let reports: Vec<Report> = recordings.iter().map(Report::from).collect();
            serde_json::to_string_pretty(&reports)?
        } else {
            match recordings.last() {
                Some(last) => serde_json::to_string_pretty(&Report::from(last))?,
                None => "null".to_string(),
            }
        };
        println!("{}", output);
        return Ok(());
    }

    eprintln!(
        "Recorded {} operation(s) on a {} list.",
        recordings.len(),
        args.variant
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(recordings, Duration::from_millis(args.interval_ms));
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
