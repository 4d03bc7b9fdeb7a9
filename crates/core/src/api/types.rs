use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::biorhythm::{BiorhythmPoint, Person};
use crate::serde::deserialize_optional_date;

/// Root endpoint payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub api_name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub pybiorythm_available: bool,
}

/// A page of people as returned by `people/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeoplePage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<Person>,
}

/// Date span reported next to a point series or statistics block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportedRange {
    #[serde(
        default,
        alias = "start_date",
        deserialize_with = "deserialize_optional_date"
    )]
    pub start: Option<NaiveDate>,
    #[serde(
        default,
        alias = "end_date",
        deserialize_with = "deserialize_optional_date"
    )]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub days_covered: Option<i64>,
}

/// Payload of `people/{id}/biorhythm_data/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiorhythmData {
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub biorhythm_data: Vec<BiorhythmPoint>,
    #[serde(default)]
    pub data_points: u64,
    #[serde(default)]
    pub date_range: Option<ReportedRange>,
}

/// Average amplitude per cycle as computed upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportedAverages {
    #[serde(default)]
    pub physical: f64,
    #[serde(default)]
    pub emotional: f64,
    #[serde(default)]
    pub intellectual: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticalBreakdown {
    #[serde(default)]
    pub physical: u64,
    #[serde(default)]
    pub emotional: u64,
    #[serde(default)]
    pub intellectual: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportedCriticalDays {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub breakdown: CriticalBreakdown,
}

/// Upstream statistics block for one person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    #[serde(default)]
    pub total_data_points: u64,
    #[serde(default)]
    pub date_range: ReportedRange,
    #[serde(default)]
    pub cycle_averages: ReportedAverages,
    #[serde(default)]
    pub critical_days: ReportedCriticalDays,
}

/// Payload of `people/{id}/statistics/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonStatistics {
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub statistics: StatisticsSummary,
}

/// Body of `calculations/calculate/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub person_id: i64,
    pub days: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

impl CalculateRequest {
    pub const DEFAULT_DAYS: u32 = 365;

    pub fn new(person_id: i64) -> Self {
        Self {
            person_id,
            days: Self::DEFAULT_DAYS,
            notes: String::new(),
            target_date: None,
        }
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_target_date(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }
}

/// A calculation run recorded upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub person: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `calculations/calculate/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    #[serde(default)]
    pub calculation: Calculation,
    #[serde(default)]
    pub data_points_created: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationsPage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<Calculation>,
}

/// Payload of `statistics/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStatistics {
    #[serde(default)]
    pub total_people: u64,
    #[serde(default)]
    pub total_calculations: u64,
    #[serde(default)]
    pub total_data_points: u64,
    #[serde(default)]
    pub total_critical_days: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(default)]
    pub token: Option<String>,
}
