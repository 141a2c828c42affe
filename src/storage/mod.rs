//! Persistence backends for the QA data document
//!
//! The knowledge base owns no persistence logic; it hands the whole
//! [`QaData`] document to a [`Storage`] after every write.

mod json_file;
mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use crate::error::QaResult;
use crate::types::QaData;

/// Where the data document lives
pub trait Storage: Send + Sync {
    /// Load the stored document, or an empty one if nothing is stored yet
    fn load(&self) -> QaResult<QaData>;

    /// Replace the stored document
    fn save(&self, data: &QaData) -> QaResult<()>;

    /// Human readable location, for logs
    fn describe(&self) -> String;
}
