//! Derived statistics over sparse samples.
//!
//! Everything here works on the points the upstream API returned, not on a
//! reconstructed series: correlation and critical-day counts only make sense
//! over authoritative samples.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::{BiorhythmPoint, CriticalFlags, Cycle};

/// Pearson correlation coefficient of two equally sized columns.
///
/// Undefined results (fewer than two points, mismatched lengths, a
/// zero-variance column, non-finite input) are reported as `0.0`.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return 0.0;
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let r = cov / (var_x * var_y).sqrt();
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Qualitative label for a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
}

impl CorrelationStrength {
    /// Classifies by absolute value: `>= 0.7` strong, `>= 0.3` moderate.
    pub fn from_coefficient(r: f64) -> Self {
        let r = r.abs();
        if r >= 0.7 {
            CorrelationStrength::Strong
        } else if r >= 0.3 {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CorrelationStrength::Strong => "Strong",
            CorrelationStrength::Moderate => "Moderate",
            CorrelationStrength::Weak => "Weak",
        }
    }
}

impl std::fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One off-diagonal entry of a [`CorrelationMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub a: Cycle,
    pub b: Cycle,
    pub coefficient: f64,
    pub strength: CorrelationStrength,
}

/// Symmetric 3x3 correlation matrix indexed by [`Cycle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    values: [[f64; 3]; 3],
}

impl CorrelationMatrix {
    /// Correlates the three cycle columns of the given samples.
    pub fn from_points(points: &[BiorhythmPoint]) -> Self {
        let columns: [Vec<f64>; 3] =
            Cycle::ALL.map(|cycle| points.iter().map(|p| p.value(cycle)).collect());

        let mut values = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in i..3 {
                let r = pearson(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self { values }
    }

    pub fn get(&self, a: Cycle, b: Cycle) -> f64 {
        self.values[a.index()][b.index()]
    }

    /// The three distinct cycle pairs, labelled.
    pub fn pairs(&self) -> Vec<CorrelationPair> {
        const PAIRS: [(Cycle, Cycle); 3] = [
            (Cycle::Physical, Cycle::Emotional),
            (Cycle::Physical, Cycle::Intellectual),
            (Cycle::Emotional, Cycle::Intellectual),
        ];
        PAIRS
            .iter()
            .map(|&(a, b)| {
                let coefficient = self.get(a, b);
                CorrelationPair {
                    a,
                    b,
                    coefficient,
                    strength: CorrelationStrength::from_coefficient(coefficient),
                }
            })
            .collect()
    }

    /// Row-major values in [`Cycle::ALL`] order.
    pub fn as_rows(&self) -> &[[f64; 3]; 3] {
        &self.values
    }
}

/// Critical-day counts over a set of samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticalDaySummary {
    pub physical: usize,
    pub emotional: usize,
    pub intellectual: usize,
    /// Samples with at least one critical cycle.
    pub total: usize,
    /// `total` as a percentage of the sample count.
    pub percentage: f64,
}

impl CriticalDaySummary {
    pub fn from_points(points: &[BiorhythmPoint]) -> Self {
        let mut summary = CriticalDaySummary::default();
        for point in points {
            summary.physical += point.is_physical_critical as usize;
            summary.emotional += point.is_emotional_critical as usize;
            summary.intellectual += point.is_intellectual_critical as usize;
            summary.total += point.is_any_critical() as usize;
        }
        if !points.is_empty() {
            summary.percentage = summary.total as f64 / points.len() as f64 * 100.0;
        }
        summary
    }

    pub fn count(&self, cycle: Cycle) -> usize {
        match cycle {
            Cycle::Physical => self.physical,
            Cycle::Emotional => self.emotional,
            Cycle::Intellectual => self.intellectual,
        }
    }
}

/// Position within each cycle, in degrees `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CyclePhases {
    pub date: NaiveDate,
    pub days_alive: i64,
    pub physical: f64,
    pub emotional: f64,
    pub intellectual: f64,
}

impl CyclePhases {
    pub fn get(&self, cycle: Cycle) -> f64 {
        match cycle {
            Cycle::Physical => self.physical,
            Cycle::Emotional => self.emotional,
            Cycle::Intellectual => self.intellectual,
        }
    }
}

/// Phase of `cycle` after `days_alive` days: `(days_alive mod period) / period * 360`.
pub fn phase_degrees(cycle: Cycle, days_alive: i64) -> f64 {
    let period = cycle.period();
    days_alive.rem_euclid(period) as f64 / period as f64 * 360.0
}

/// Phases of all three cycles for one day.
pub fn phases_for(date: NaiveDate, days_alive: i64) -> CyclePhases {
    CyclePhases {
        date,
        days_alive,
        physical: phase_degrees(Cycle::Physical, days_alive),
        emotional: phase_degrees(Cycle::Emotional, days_alive),
        intellectual: phase_degrees(Cycle::Intellectual, days_alive),
    }
}

/// Phases at the most recent sample. This is the latest data point, not today.
pub fn latest_phases(points: &[BiorhythmPoint]) -> Option<CyclePhases> {
    points
        .iter()
        .max_by_key(|p| p.date)
        .map(|p| phases_for(p.date, p.days_alive))
}

/// Mean amplitude per cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleAverages {
    pub physical: f64,
    pub emotional: f64,
    pub intellectual: f64,
}

impl CycleAverages {
    pub fn from_points(points: &[BiorhythmPoint]) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        let n = points.len() as f64;
        let mean = |cycle: Cycle| points.iter().map(|p| p.value(cycle)).sum::<f64>() / n;
        Self {
            physical: mean(Cycle::Physical),
            emotional: mean(Cycle::Emotional),
            intellectual: mean(Cycle::Intellectual),
        }
    }
}

/// First and last sampled dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCoverage {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Calendar days from start to end, both included.
    pub days_covered: i64,
}

/// Locally computed counterpart of the upstream statistics resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub total_data_points: usize,
    pub date_range: DateCoverage,
    pub cycle_averages: CycleAverages,
    pub critical_days: CriticalDaySummary,
}

/// Summarizes a sample set. `None` when there are no samples.
pub fn summarize(points: &[BiorhythmPoint]) -> Option<SeriesSummary> {
    let start = points.iter().map(|p| p.date).min()?;
    let end = points.iter().map(|p| p.date).max()?;

    Some(SeriesSummary {
        total_data_points: points.len(),
        date_range: DateCoverage {
            start,
            end,
            days_covered: (end - start).num_days() + 1,
        },
        cycle_averages: CycleAverages::from_points(points),
        critical_days: CriticalDaySummary::from_points(points),
    })
}

/// Number of critical cycles per sampled date, for the critical-days calendar.
///
/// Dates sampled more than once count each cycle at most once.
pub fn critical_counts_by_date(points: &[BiorhythmPoint]) -> BTreeMap<NaiveDate, u8> {
    let mut merged: BTreeMap<NaiveDate, CriticalFlags> = BTreeMap::new();
    for point in points {
        let flags = merged.entry(point.date).or_default();
        flags.physical |= point.is_physical_critical;
        flags.emotional |= point.is_emotional_critical;
        flags.intellectual |= point.is_intellectual_critical;
    }
    merged
        .into_iter()
        .map(|(date, flags)| (date, flags.count()))
        .collect()
}

pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// One bucket of an amplitude histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Buckets amplitudes into `bins` equal-width bins over `[-1, 1]`.
///
/// The last bin is closed so `1.0` is counted. Values outside the interval
/// and non-finite values are skipped.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 {
        return Vec::new();
    }
    let width = 2.0 / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: -1.0 + i as f64 * width,
            upper: -1.0 + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &value in values {
        if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
            continue;
        }
        let idx = (((value + 1.0) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}
