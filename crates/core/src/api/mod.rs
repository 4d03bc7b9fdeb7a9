//! Contract of the upstream biorhythm API.

mod query;
mod traits;
mod types;

pub use query::{PeopleQuery, PointsQuery};
pub use traits::BiorhythmApi;
pub use types::{
    ApiInfo, AuthToken, BiorhythmData, CalculateRequest, Calculation, CalculationResult,
    CalculationsPage, CriticalBreakdown, Credentials, GlobalStatistics, PeoplePage,
    PersonStatistics, ReportedAverages, ReportedCriticalDays, ReportedRange, StatisticsSummary,
};
