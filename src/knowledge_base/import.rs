//! Bulk import from a JSON file

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{QaError, QaResult};
use crate::types::{BatchRecord, BatchReport};

use super::KnowledgeBase;

/// Accepted file layouts: a bare array of records, or a data document whose
/// `questions` hold them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Records(Vec<BatchRecord>),
    Document { questions: Vec<BatchRecord> },
}

impl ImportFile {
    fn into_records(self) -> Vec<BatchRecord> {
        match self {
            ImportFile::Records(records) => records,
            ImportFile::Document { questions } => questions,
        }
    }
}

/// Add every usable record of a JSON file, as one batch
pub fn import_file(kb: &KnowledgeBase, path: &Path) -> QaResult<BatchReport> {
    let content = fs::read_to_string(path)?;
    let file: ImportFile = serde_json::from_str(&content).map_err(|e| {
        QaError::invalid(format!("{} is not a QA import file: {}", path.display(), e))
    })?;

    let records = file.into_records();
    let total = records.len();
    let report = kb.batch_add(records)?;

    info!(
        path = %path.display(),
        total,
        added = report.added.len(),
        "import finished"
    );
    Ok(report)
}
