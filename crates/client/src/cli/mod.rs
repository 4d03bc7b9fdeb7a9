//! CLI command definitions.

pub mod calculations;
pub mod people;
pub mod points;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_BASE_URL;

/// CLI client for the biorhythm API.
#[derive(Debug, Parser)]
#[command(name = "biodash-client")]
#[command(about = "CLI client for the biorhythm API", long_about = None)]
pub struct Cli {
    /// API base URL.
    #[arg(long, env = "BIORHYTHM_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API token sent as `Authorization: Token <token>`.
    #[arg(long, env = "BIORHYTHM_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "API_TIMEOUT_SECONDS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show API name and version.
    Info,
    /// Exchange credentials for a token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "BIORHYTHM_API_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// People queries.
    People(people::PeopleCommand),
    /// Fetch a person's biorhythm points.
    Points(points::PointsArgs),
    /// Trigger a new calculation for a person.
    Calculate(calculations::CalculateArgs),
    /// List calculations.
    Calculations {
        /// Only calculations for this person.
        #[arg(long)]
        person_id: Option<i64>,
    },
    /// Global statistics.
    Stats,
}
