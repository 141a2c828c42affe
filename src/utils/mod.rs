//! Utility functions and helpers
//!
//! Timestamps for stored entries and atomic file writes for persistence.

pub mod atomic;
pub mod time;

pub use atomic::{atomic_write_with, cleanup_temp_file, AtomicError};
pub use time::{current_timestamp, TIMESTAMP_FORMAT};
