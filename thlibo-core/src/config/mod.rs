//! Configuration types
//!
//! Board-agnostic configuration structures stored as postcard binary data.

pub mod persist;
pub mod types;

pub use persist::StoredTimestamp;
pub use types::*;
