//! Commonly used utilities.

pub mod memory;

pub use self::memory::{as_bytes, Pod};
