use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_flexible_date, deserialize_lenient_f64, deserialize_null_as_false};

/// One of the three biorhythm cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cycle {
    Physical,
    Emotional,
    Intellectual,
}

impl Cycle {
    /// All cycles in column order (physical, emotional, intellectual).
    pub const ALL: [Cycle; 3] = [Cycle::Physical, Cycle::Emotional, Cycle::Intellectual];

    /// Period of the cycle in days.
    pub fn period(self) -> i64 {
        match self {
            Cycle::Physical => 23,
            Cycle::Emotional => 28,
            Cycle::Intellectual => 33,
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            Cycle::Physical => "Physical",
            Cycle::Emotional => "Emotional",
            Cycle::Intellectual => "Intellectual",
        }
    }

    /// Position of the cycle in [`Cycle::ALL`].
    pub fn index(self) -> usize {
        match self {
            Cycle::Physical => 0,
            Cycle::Emotional => 1,
            Cycle::Intellectual => 2,
        }
    }
}

/// A person tracked by the upstream API.
///
/// The birthdate is fixed once the person exists upstream; this side only
/// ever holds read-only copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub birthdate: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biorhythm_data_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Person {
    /// Creates a person with just the identifying fields.
    pub fn new(id: i64, name: impl Into<String>, birthdate: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            birthdate,
            email: None,
            biorhythm_data_count: None,
            created_at: None,
        }
    }
}

/// Critical-day flags for the three cycles on one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalFlags {
    pub physical: bool,
    pub emotional: bool,
    pub intellectual: bool,
}

impl CriticalFlags {
    /// Returns the flag for a single cycle.
    pub fn get(&self, cycle: Cycle) -> bool {
        match cycle {
            Cycle::Physical => self.physical,
            Cycle::Emotional => self.emotional,
            Cycle::Intellectual => self.intellectual,
        }
    }

    /// Number of cycles flagged critical (0..=3).
    pub fn count(&self) -> u8 {
        self.physical as u8 + self.emotional as u8 + self.intellectual as u8
    }

    /// True if at least one cycle is critical.
    pub fn any(&self) -> bool {
        self.count() > 0
    }
}

/// A single sample as returned by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiorhythmPoint {
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub date: NaiveDate,
    pub days_alive: i64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub physical: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub emotional: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub intellectual: f64,
    #[serde(default, deserialize_with = "deserialize_null_as_false")]
    pub is_physical_critical: bool,
    #[serde(default, deserialize_with = "deserialize_null_as_false")]
    pub is_emotional_critical: bool,
    #[serde(default, deserialize_with = "deserialize_null_as_false")]
    pub is_intellectual_critical: bool,
}

impl BiorhythmPoint {
    /// Builds a sample whose cycle values come from the closed-form formulas.
    ///
    /// Critical flags start cleared; set them with [`BiorhythmPoint::with_critical`].
    pub fn computed(date: NaiveDate, days_alive: i64) -> Self {
        Self {
            date,
            days_alive,
            physical: super::cycle_value(Cycle::Physical, days_alive),
            emotional: super::cycle_value(Cycle::Emotional, days_alive),
            intellectual: super::cycle_value(Cycle::Intellectual, days_alive),
            is_physical_critical: false,
            is_emotional_critical: false,
            is_intellectual_critical: false,
        }
    }

    /// Sets the critical flags.
    pub fn with_critical(mut self, flags: CriticalFlags) -> Self {
        self.is_physical_critical = flags.physical;
        self.is_emotional_critical = flags.emotional;
        self.is_intellectual_critical = flags.intellectual;
        self
    }

    /// Amplitude of one cycle.
    pub fn value(&self, cycle: Cycle) -> f64 {
        match cycle {
            Cycle::Physical => self.physical,
            Cycle::Emotional => self.emotional,
            Cycle::Intellectual => self.intellectual,
        }
    }

    /// Critical flags as a group.
    pub fn critical_flags(&self) -> CriticalFlags {
        CriticalFlags {
            physical: self.is_physical_critical,
            emotional: self.is_emotional_critical,
            intellectual: self.is_intellectual_critical,
        }
    }

    /// True if the given cycle is critical on this date.
    pub fn is_critical(&self, cycle: Cycle) -> bool {
        self.critical_flags().get(cycle)
    }

    /// True if any cycle is critical on this date.
    pub fn is_any_critical(&self) -> bool {
        self.critical_flags().any()
    }

    /// Number of cycles critical on this date (0..=3).
    pub fn critical_count(&self) -> u8 {
        self.critical_flags().count()
    }
}

/// One day of a reconstructed series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensePoint {
    pub date: NaiveDate,
    pub days_alive: i64,
    pub physical: f64,
    pub emotional: f64,
    pub intellectual: f64,
    /// Flags from the authoritative sample on this date, `None` when the day
    /// was synthesized.
    pub critical: Option<CriticalFlags>,
}

impl DensePoint {
    /// Amplitude of one cycle.
    pub fn value(&self, cycle: Cycle) -> f64 {
        match cycle {
            Cycle::Physical => self.physical,
            Cycle::Emotional => self.emotional,
            Cycle::Intellectual => self.intellectual,
        }
    }

    /// True if this day came from an upstream sample.
    pub fn is_sampled(&self) -> bool {
        self.critical.is_some()
    }
}

/// A gap-free daily series, one point per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseSeries {
    pub anchor_date: NaiveDate,
    pub anchor_days_alive: i64,
    pub points: Vec<DensePoint>,
}

impl DenseSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First date in the series.
    pub fn start(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Last date in the series.
    pub fn end(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Dates that carry at least one critical flag from a sample.
    pub fn critical_dates(&self) -> Vec<NaiveDate> {
        self.points
            .iter()
            .filter(|p| p.critical.is_some_and(|flags| flags.any()))
            .map(|p| p.date)
            .collect()
    }
}
