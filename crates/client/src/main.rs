//! biodash-client CLI entry point.

use std::time::Duration;

use anyhow::{bail, Context};
use biodash_client::cli::people::PeopleAction;
use biodash_client::cli::{Cli, Commands, OutputFormat};
use biodash_client::output::{json, pretty, render};
use biodash_client::{BiorhythmClient, ClientConfig};
use biodash_core::api::PeopleQuery;
use biodash_core::biorhythm::reconstruct;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Upstream failures are reported through tracing; keep them on stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "biodash_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::new(&cli.base_url)
        .context("invalid --base-url")?
        .with_token(cli.token.clone())
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let client = BiorhythmClient::new(config).context("failed to build HTTP client")?;

    match cli.command {
        Commands::Info => {
            let Some(info) = client.get_api_info().await else {
                bail!("no data: unable to reach {}", client.base_url());
            };
            println!("{}", render(&info, cli.format, pretty::format_api_info));
        }
        Commands::Login { username, password } => {
            let Some(token) = client.authenticate(&username, &password).await else {
                bail!("authentication failed for {}", username);
            };
            if cli.quiet {
                println!("{}", token);
            } else {
                println!("Authenticated. Export BIORHYTHM_API_TOKEN={}", token);
            }
        }
        Commands::People(people_cmd) => match people_cmd.action {
            PeopleAction::List { search, page_size } => {
                let query = PeopleQuery { search, page_size };
                let Some(page) = client.get_people(&query).await else {
                    bail!("no data: people listing unavailable");
                };
                println!("{}", render(&page, cli.format, pretty::format_people));
            }
            PeopleAction::Get { id } => {
                let Some(person) = client.get_person(id).await else {
                    bail!("no data: person {} not found", id);
                };
                println!("{}", render(&person, cli.format, pretty::format_person));
            }
            PeopleAction::Stats { id } => {
                let Some(stats) = client.get_person_statistics(id).await else {
                    bail!("no data: statistics for person {} unavailable", id);
                };
                println!(
                    "{}",
                    render(&stats, cli.format, pretty::format_person_statistics)
                );
            }
        },
        Commands::Points(args) => {
            let Some(data) = client
                .get_biorhythm_data(args.person_id, &args.query())
                .await
            else {
                bail!("no data: points for person {} unavailable", args.person_id);
            };
            if args.dense {
                let series = reconstruct(&data.biorhythm_data)
                    .map_err(|e| anyhow::anyhow!("no data: {}", e))?;
                println!("{}", render(&series, cli.format, pretty::format_dense));
            } else {
                match cli.format {
                    OutputFormat::Json => {
                        println!("{}", json::format_json(&data))
                    }
                    OutputFormat::Pretty => {
                        println!("{}", pretty::format_points(&data.biorhythm_data))
                    }
                }
            }
        }
        Commands::Calculate(args) => {
            let Some(result) = client.calculate_biorhythm(&args.request()).await else {
                bail!("calculation for person {} failed", args.person_id);
            };
            println!(
                "{}",
                render(&result, cli.format, pretty::format_calculation_result)
            );
        }
        Commands::Calculations { person_id } => {
            let Some(page) = client.get_calculations(person_id).await else {
                bail!("no data: calculations unavailable");
            };
            println!("{}", render(&page, cli.format, pretty::format_calculations));
        }
        Commands::Stats => {
            let Some(stats) = client.get_global_statistics().await else {
                bail!("no data: global statistics unavailable");
            };
            println!(
                "{}",
                render(&stats, cli.format, pretty::format_global_statistics)
            );
        }
    }

    Ok(())
}
