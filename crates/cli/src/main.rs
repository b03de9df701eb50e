//! CLI entry point for skysearch.
//!
//! Wires the orchestrator and the progress animation together: submits a
//! deep search, animates the step list while waiting, and prints one of
//! the four distinct outcomes (completed, failed, timed out, cancelled).

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use sky_core::backend::http::HttpTaskBackend;
use sky_core::backend::mock::MockTaskBackend;
use sky_core::backend::TaskBackend;
use sky_core::config::loader::load_config;
use sky_core::config::models::PollingSettings;
use sky_core::orchestrator::SearchOrchestrator;
use sky_core::progress::ProgressStepController;
use sky_protocol::ipc::Event;
use sky_protocol::search_models::{CabinClass, SearchParams};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Labels shown while the backend works. Purely presentational: the
/// backend emits no step-level events, so the cadence is simulated.
const LOADING_STEPS: &[&str] = &[
    "Analyzing route network",
    "Querying airlines",
    "Scanning fare classes",
    "Optimizing connections",
    "Ranking itineraries",
];

#[derive(Parser)]
#[command(name = "skysearch", about = "Deep flight search client", version)]
struct Cli {
    /// IATA code of the departure airport
    origin: String,

    /// IATA code of the arrival airport
    destination: String,

    /// Outbound date (YYYY-MM-DD)
    #[arg(long)]
    depart: NaiveDate,

    /// Return date for round trips (YYYY-MM-DD)
    #[arg(long)]
    return_date: Option<NaiveDate>,

    /// Cabin class
    #[arg(long, value_enum, default_value = "economy")]
    cabin: CabinArg,

    /// Number of travellers
    #[arg(long, default_value_t = 1)]
    passengers: u8,

    /// Override the backend base URL from config
    #[arg(long)]
    base_url: Option<String>,

    /// Directory containing the optional .skysearch/ config
    #[arg(long, default_value = ".")]
    root: String,

    /// Run against a scripted in-process backend with compressed timings
    #[arg(long)]
    mock: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CabinArg {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl From<CabinArg> for CabinClass {
    fn from(cabin: CabinArg) -> Self {
        match cabin {
            CabinArg::Economy => CabinClass::Economy,
            CabinArg::PremiumEconomy => CabinClass::PremiumEconomy,
            CabinArg::Business => CabinClass::Business,
            CabinArg::First => CabinClass::First,
        }
    }
}

enum Outcome {
    Completed,
    Failed(String),
    TimedOut(String),
    Cancelled,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(Path::new(&cli.root)).await?;

    let mut settings = config.polling.clone();
    let backend: Arc<dyn TaskBackend> = if cli.mock {
        // Compressed timings so the full flow is demonstrable offline
        settings = PollingSettings {
            grace_delay_ms: 2_000,
            poll_interval_ms: 1_000,
            overall_timeout_ms: 30_000,
        };
        Arc::new(MockTaskBackend::completing(sample_flights()))
    } else {
        let mut backend_config = config.backend.clone();
        if let Some(base_url) = cli.base_url.clone() {
            backend_config.base_url = base_url;
        }
        Arc::new(HttpTaskBackend::new(&backend_config)?)
    };

    let (events_tx, mut events_rx) = mpsc::channel(100);
    let orchestrator = Arc::new(SearchOrchestrator::new(backend, settings, events_tx));
    let controller = Arc::new(ProgressStepController::new());

    let params = SearchParams {
        origin: cli.origin.to_uppercase(),
        destination: cli.destination.to_uppercase(),
        depart_date: cli.depart,
        return_date: cli.return_date,
        cabin_class: cli.cabin.into(),
        passengers: cli.passengers,
    };

    println!(
        "{} {} → {} on {}",
        "Searching".bold(),
        params.origin.cyan(),
        params.destination.cyan(),
        params.depart_date
    );

    let task_id = orchestrator.start(params).await?;
    println!("Submitted task {}", task_id.dimmed());

    controller
        .start_loading(LOADING_STEPS.iter().map(|s| (*s).to_string()).collect())
        .await;
    let display = tokio::spawn(render_steps(Arc::clone(&controller)));

    // Ctrl-C cancels the search cooperatively; the cancelled event below
    // then ends the run
    let ctrl_c_orchestrator = Arc::clone(&orchestrator);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_orchestrator.cancel().await;
        }
    });

    let outcome = loop {
        match events_rx.recv().await {
            Some(Event::TaskStatusUpdate { progress, message, .. }) => {
                if !message.is_empty() {
                    println!("  {} {} ({progress}%)", "·".dimmed(), message.dimmed());
                }
            }
            Some(Event::TaskCompleted { .. }) => break Outcome::Completed,
            Some(Event::TaskFailed { error, .. }) => break Outcome::Failed(error),
            Some(Event::TaskTimedOut { error, .. }) => break Outcome::TimedOut(error),
            Some(Event::TaskCancelled { .. }) => break Outcome::Cancelled,
            Some(Event::TaskSubmitted { .. }) => {}
            None => break Outcome::Cancelled,
        }
    };

    // The animation is decoupled from the real outcome; stopping it on
    // terminal resolution is this layer's job
    controller.stop_loading().await;
    display.abort();

    match outcome {
        Outcome::Completed => {
            println!("{}", "Search completed".green().bold());
            let task = orchestrator.snapshot().await;
            if let Some(result) = task.result {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
        Outcome::Failed(error) => {
            println!("{} {error}", "Search failed:".red().bold());
            std::process::exit(1);
        }
        Outcome::TimedOut(error) => {
            println!("{} {error}", "Search timed out:".yellow().bold());
            std::process::exit(1);
        }
        Outcome::Cancelled => {
            println!("{}", "Search cancelled".yellow());
        }
    }

    Ok(())
}

/// Print each step label once as the cursor passes it.
async fn render_steps(controller: Arc<ProgressStepController>) {
    let mut last_step = 0usize;
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        ticker.tick().await;
        let state = controller.snapshot().await;
        if !state.active {
            return;
        }
        while last_step < state.current_step {
            if let Some(label) = state.steps.get(last_step) {
                println!("  {} {} ({}s)", "▸".cyan(), label, state.elapsed_seconds);
            }
            last_step += 1;
        }
    }
}

fn sample_flights() -> serde_json::Value {
    serde_json::json!({
        "flights": [
            {"carrier": "NH", "number": "NH107", "price": 843, "currency": "USD", "stops": 0},
            {"carrier": "UA", "number": "UA837", "price": 791, "currency": "USD", "stops": 0},
            {"carrier": "JL", "number": "JL57", "price": 1024, "currency": "USD", "stops": 1}
        ],
        "currency": "USD",
        "search_depth": "deep"
    })
}
