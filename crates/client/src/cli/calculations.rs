//! Calculation CLI commands.

use biodash_core::api::CalculateRequest;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for triggering a calculation.
#[derive(Debug, Args)]
pub struct CalculateArgs {
    /// Person ID.
    pub person_id: i64,

    /// Number of days to calculate.
    #[arg(long, default_value_t = CalculateRequest::DEFAULT_DAYS)]
    pub days: u32,

    /// Free-form notes stored with the calculation.
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Reference date (YYYY-MM-DD), defaults to today upstream.
    #[arg(long)]
    pub target_date: Option<NaiveDate>,
}

impl CalculateArgs {
    pub fn request(&self) -> CalculateRequest {
        let request = CalculateRequest::new(self.person_id)
            .with_days(self.days)
            .with_notes(self.notes.clone());
        match self.target_date {
            Some(date) => request.with_target_date(date),
            None => request,
        }
    }
}
