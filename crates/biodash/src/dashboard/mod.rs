//! View models for the dashboard pages.
//!
//! Each loader pulls from a [`BiorhythmApi`](biodash_core::api::BiorhythmApi),
//! usually the cached decorator, and turns whatever comes back into plain
//! serializable data. Missing upstream data shows up as `None` or empty
//! collections, never as an error.

mod home;
mod person;
mod range;

pub use home::HomeOverview;
pub use person::{CycleDistribution, PersonDashboard};
pub use range::{resolve_range, DEFAULT_RANGE_DAYS};
