//! biodash - cached data access and view models for the biorhythm dashboard.
//!
//! The crate wires the HTTP client from `biodash_client` behind an in-memory
//! read-through cache and assembles dashboard pages from the result.

pub mod cache;
pub mod cached;
pub mod config;
pub mod dashboard;
pub mod output;
pub mod state;

pub use cached::{CachePolicy, CachedBiorhythmApi};
pub use config::Config;
pub use state::AppState;
