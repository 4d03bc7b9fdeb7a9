use std::time::Duration;

use anyhow::{bail, Context, Result};
use biodash::output::{format_home, format_person_dashboard};
use biodash::{AppState, Config};
use biodash_client::cli::calculations::CalculateArgs;
use biodash_client::cli::OutputFormat;
use biodash_client::output::{pretty, render};
use biodash_core::api::BiorhythmApi;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Biorhythm dashboard - cached views over the biorhythm API
#[derive(Parser, Debug)]
#[command(name = "biodash")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// API status, people and global statistics.
    Home {
        /// Re-render every N seconds until interrupted, reusing the cache.
        #[arg(long)]
        watch: Option<u64>,
    },
    /// Dashboard for one person.
    Person {
        id: i64,
        /// First day of the window (YYYY-MM-DD), defaults to a year ago.
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day of the window (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Re-render every N seconds until interrupted, reusing the cache.
        #[arg(long)]
        watch: Option<u64>,
    },
    /// Trigger a calculation and drop the person's cached data.
    Calculate(CalculateArgs),
}

impl Command {
    /// Refresh interval in seconds. Only read commands can repeat.
    fn watch(&self) -> Option<u64> {
        match self {
            Command::Home { watch } | Command::Person { watch, .. } => *watch,
            Command::Calculate(_) => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "biodash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let state = AppState::from_config(&config).context("failed to build API client")?;

    let Some(every) = cli.command.watch() else {
        return run(&state, &cli).await;
    };

    let mut ticker = tokio::time::interval(Duration::from_secs(every.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                state.cache.purge_expired().await;
                if let Err(err) = run(&state, &cli).await {
                    tracing::warn!(error = %err, "Render failed");
                }
            }
            _ = signal::ctrl_c() => {
                tracing::info!("Stopped");
                return Ok(());
            }
        }
    }
}

async fn run(state: &AppState, cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Home { .. } => {
            let home = state.home().await;
            println!("{}", render(&home, cli.format, format_home));
        }
        Command::Person { id, start, end, .. } => {
            let Some(page) = state.person_dashboard(*id, *start, *end).await else {
                bail!("Person with ID {} not found.", id);
            };
            println!("{}", render(&page, cli.format, format_person_dashboard));
        }
        Command::Calculate(args) => {
            let Some(result) = state.api.calculate(&args.request()).await else {
                bail!("calculation for person {} failed", args.person_id);
            };
            println!(
                "{}",
                render(&result, cli.format, pretty::format_calculation_result)
            );
        }
    }
    Ok(())
}
