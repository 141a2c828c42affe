//! JSON document on disk

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::Storage;
use crate::error::QaResult;
use crate::types::QaData;
use crate::utils::atomic::{atomic_write_with, cleanup_temp_file};

/// Stores the whole document as pretty-printed JSON, written atomically
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable document is moved before starting over
    fn corrupt_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".corrupt");
        self.path.with_file_name(name)
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> QaResult<QaData> {
        if cleanup_temp_file(&self.path)? {
            warn!(path = %self.path.display(), "removed leftover temp file from an interrupted write");
        }

        if !self.path.exists() {
            debug!(path = %self.path.display(), "data file missing, starting empty");
            return Ok(QaData::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(QaData::default());
        }

        match serde_json::from_str::<QaData>(&content) {
            Ok(data) => Ok(data),
            Err(e) => {
                let aside = self.corrupt_path();
                warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    error = %e,
                    "data file is not valid, starting empty"
                );
                fs::rename(&self.path, &aside)?;
                Ok(QaData::default())
            }
        }
    }

    fn save(&self, data: &QaData) -> QaResult<()> {
        atomic_write_with(&self.path, |file: &mut File| {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, data)?;
            writer.write_all(b"\n")?;
            writer.flush()
        })?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
