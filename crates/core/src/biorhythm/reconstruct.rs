//! Dense series reconstruction.
//!
//! The upstream API returns whatever samples its last calculation window
//! produced, which may leave gaps or not line up with the requested range.
//! Every cycle is a closed-form function of the integer day offset, so a gap
//! is filled by recomputing from an anchor sample rather than interpolating.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use chrono::NaiveDate;

use super::types::{BiorhythmPoint, CriticalFlags, Cycle, DensePoint, DenseSeries};
use super::{DateRange, ReconstructionError};

/// `days_alive` on `date`, given a sample known to be `anchor_days_alive` on `anchor_date`.
pub fn days_alive_at(anchor_date: NaiveDate, anchor_days_alive: i64, date: NaiveDate) -> i64 {
    anchor_days_alive + (date - anchor_date).num_days()
}

/// Amplitude of `cycle` after `days_alive` days: `sin(2π · days_alive / period)`.
pub fn cycle_value(cycle: Cycle, days_alive: i64) -> f64 {
    (2.0 * PI * days_alive as f64 / cycle.period() as f64).sin()
}

/// Inclusive span `[min date, max date]` covered by the samples.
pub fn sample_span(points: &[BiorhythmPoint]) -> Option<DateRange> {
    let start = points.iter().map(|p| p.date).min()?;
    let end = points.iter().map(|p| p.date).max()?;
    Some(DateRange { start, end })
}

/// Reconstructs one point per calendar day across the samples' own span.
///
/// # Errors
///
/// - [`ReconstructionError::Empty`] when there are no samples.
/// - [`ReconstructionError::InconsistentSample`] when a sample's `days_alive`
///   disagrees with the anchor.
pub fn reconstruct(points: &[BiorhythmPoint]) -> Result<DenseSeries, ReconstructionError> {
    let span = sample_span(points).ok_or(ReconstructionError::Empty)?;
    reconstruct_within(points, span)
}

/// Reconstructs one point per calendar day over `range`, clamped to the
/// samples' span.
///
/// Days outside the samples' span are never synthesized. A range that does
/// not touch the span is a no-data result.
pub fn reconstruct_within(
    points: &[BiorhythmPoint],
    range: DateRange,
) -> Result<DenseSeries, ReconstructionError> {
    let anchor = anchor(points)?;
    check_consistency(points, anchor)?;

    let span = sample_span(points).ok_or(ReconstructionError::Empty)?;
    let window = span
        .intersect(&range)
        .ok_or(ReconstructionError::OutOfRange {
            start: range.start,
            end: range.end,
        })?;

    let sampled_flags = flags_by_date(points);

    let dense = window
        .iter_days()
        .map(|date| {
            let days_alive = days_alive_at(anchor.date, anchor.days_alive, date);
            DensePoint {
                date,
                days_alive,
                physical: cycle_value(Cycle::Physical, days_alive),
                emotional: cycle_value(Cycle::Emotional, days_alive),
                intellectual: cycle_value(Cycle::Intellectual, days_alive),
                critical: sampled_flags.get(&date).copied(),
            }
        })
        .collect();

    Ok(DenseSeries {
        anchor_date: anchor.date,
        anchor_days_alive: anchor.days_alive,
        points: dense,
    })
}

/// The earliest sample. Ties keep the first one seen.
fn anchor(points: &[BiorhythmPoint]) -> Result<&BiorhythmPoint, ReconstructionError> {
    points
        .iter()
        .min_by_key(|p| p.date)
        .ok_or(ReconstructionError::Empty)
}

fn check_consistency(
    points: &[BiorhythmPoint],
    anchor: &BiorhythmPoint,
) -> Result<(), ReconstructionError> {
    for point in points {
        let expected = days_alive_at(anchor.date, anchor.days_alive, point.date);
        if point.days_alive != expected {
            return Err(ReconstructionError::InconsistentSample {
                date: point.date,
                expected,
                actual: point.days_alive,
            });
        }
    }
    Ok(())
}

/// Critical flags per sampled date. Duplicate samples for a date are merged.
fn flags_by_date(points: &[BiorhythmPoint]) -> BTreeMap<NaiveDate, CriticalFlags> {
    let mut flags: BTreeMap<NaiveDate, CriticalFlags> = BTreeMap::new();
    for point in points {
        let sample = point.critical_flags();
        flags
            .entry(point.date)
            .and_modify(|merged| {
                merged.physical |= sample.physical;
                merged.emotional |= sample.emotional;
                merged.intellectual |= sample.intellectual;
            })
            .or_insert(sample);
    }
    flags
}
