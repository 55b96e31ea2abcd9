//! Configuration types
//!
//! Board-agnostic timing and wiring descriptions. With the `serde` feature
//! they can be stored as postcard binary data alongside other firmware
//! settings.

pub mod types;

pub use types::*;
