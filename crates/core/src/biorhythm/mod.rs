mod error;
mod range;
mod reconstruct;
mod statistics;
mod types;

pub use error::{DateRangeError, ReconstructionError};
pub use range::DateRange;
pub use reconstruct::{cycle_value, days_alive_at, reconstruct, reconstruct_within, sample_span};
pub use statistics::{
    critical_counts_by_date, histogram, latest_phases, pearson, phase_degrees, phases_for,
    summarize, CorrelationMatrix, CorrelationPair, CorrelationStrength, CriticalDaySummary,
    CycleAverages, CyclePhases, DateCoverage, HistogramBin, SeriesSummary,
    DEFAULT_HISTOGRAM_BINS,
};
pub use types::{BiorhythmPoint, CriticalFlags, Cycle, DensePoint, DenseSeries, Person};
