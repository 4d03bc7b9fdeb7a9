//! People CLI commands.

use clap::{Parser, Subcommand};

/// People commands.
#[derive(Debug, Parser)]
pub struct PeopleCommand {
    #[command(subcommand)]
    pub action: PeopleAction,
}

/// Available people actions.
#[derive(Debug, Subcommand)]
pub enum PeopleAction {
    /// List people.
    List {
        /// Filter by name.
        #[arg(long)]
        search: Option<String>,
        /// Results per page.
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Get person by ID.
    Get {
        /// Person ID.
        id: i64,
    },
    /// Get a person's statistics.
    Stats {
        /// Person ID.
        id: i64,
    },
}
