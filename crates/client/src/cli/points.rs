//! Points CLI command.

use biodash_core::api::PointsQuery;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for fetching a point series.
#[derive(Debug, Args)]
pub struct PointsArgs {
    /// Person ID.
    pub person_id: i64,

    /// First date (YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date (YYYY-MM-DD).
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Maximum number of points.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Fill gaps with one point per day.
    #[arg(long)]
    pub dense: bool,
}

impl PointsArgs {
    pub fn query(&self) -> PointsQuery {
        PointsQuery {
            start_date: self.start,
            end_date: self.end,
            limit: self.limit,
        }
    }
}
