//! In-process storage, nothing touches disk

use parking_lot::Mutex;

use super::Storage;
use crate::error::QaResult;
use crate::types::QaData;

/// Keeps the last saved document in memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Mutex<QaData>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-loaded with a document
    pub fn with_data(data: QaData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> QaResult<QaData> {
        Ok(self.data.lock().clone())
    }

    fn save(&self, data: &QaData) -> QaResult<()> {
        *self.data.lock() = data.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_replaces_document() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().questions.is_empty());

        let mut data = QaData::new();
        data.next_id = 9;
        storage.save(&data).unwrap();
        assert_eq!(storage.load().unwrap().next_id, 9);
    }
}
