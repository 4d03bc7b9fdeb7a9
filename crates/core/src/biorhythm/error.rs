use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur when constructing a date range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Invalid date range: start date must be before or equal to end date")]
    InvalidRange,
}

/// Reasons a sparse series cannot be turned into a dense one.
///
/// Every variant is a "no data" outcome: callers render an empty state
/// instead of a curve.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconstructionError {
    #[error("No biorhythm samples to reconstruct from")]
    Empty,
    #[error("Sample on {date} has days_alive {actual}, anchor implies {expected}")]
    InconsistentSample {
        date: NaiveDate,
        expected: i64,
        actual: i64,
    },
    #[error("Requested range {start}..={end} does not overlap the available samples")]
    OutOfRange { start: NaiveDate, end: NaiveDate },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_error_display() {
        assert_eq!(
            DateRangeError::InvalidRange.to_string(),
            "Invalid date range: start date must be before or equal to end date"
        );
    }

    #[test]
    fn test_empty_display() {
        assert_eq!(
            ReconstructionError::Empty.to_string(),
            "No biorhythm samples to reconstruct from"
        );
    }

    #[test]
    fn test_inconsistent_sample_display() {
        let error = ReconstructionError::InconsistentSample {
            date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            expected: 10002,
            actual: 9000,
        };
        assert_eq!(
            error.to_string(),
            "Sample on 2024-01-03 has days_alive 9000, anchor implies 10002"
        );
    }
}
