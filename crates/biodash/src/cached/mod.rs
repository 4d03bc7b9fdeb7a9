//! Read-through caching over the upstream API.
//!
//! - **Cached reads**: people listings, single people and per-person
//!   statistics are served from the cache while fresh, otherwise fetched and
//!   stored with their TTL. Absent results are never stored.
//! - **Fresh reads**: point series, searches and everything else always go
//!   upstream.
//! - **Writes**: a calculation invalidates the person's cached resources and
//!   every people listing before its result is handed back.
//!
//! ```ignore
//! let client = BiorhythmClient::from_env()?;
//! let cache = MemoryCache::new(10_000);
//! let api = CachedBiorhythmApi::new(Arc::new(client), Arc::new(cache), CachePolicy::default());
//! ```

mod api;
mod policy;

pub use api::CachedBiorhythmApi;
pub use policy::CachePolicy;
