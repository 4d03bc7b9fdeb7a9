mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    extract_person_id_from_key, is_people_list_key, people_list_key, people_list_pattern,
    person_key, person_statistics_key,
};
pub use patterns::pattern_matches;
pub use serialization::{deserialize_value, serialize_value, SerializationError};
pub use traits::Cache;
