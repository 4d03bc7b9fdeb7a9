//! Cache backend implementations.
//!
//! Concrete implementations of [`biodash_core::cache::Cache`]. Only the
//! in-process backend exists; anything that satisfies the trait can be handed
//! to [`CachedBiorhythmApi`](crate::cached::CachedBiorhythmApi) instead.

mod memory;

pub use memory::MemoryCache;
