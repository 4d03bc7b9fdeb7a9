//! biodash_core - functional core for the biodash project.
//!
//! Everything in this crate is pure: domain types, series reconstruction,
//! statistics, cache key construction and the traits that I/O crates implement.

pub mod api;
pub mod biorhythm;
pub mod cache;
pub mod clock;
pub mod serde;
