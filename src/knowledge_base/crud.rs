//! Write operations for the knowledge base

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{QaError, QaResult};
use crate::search::{SearchIndex, Tokenizer};
use crate::types::{Alias, BatchRecord, BatchReport, Entry, QaData};
use crate::utils::time::current_timestamp;

use super::KnowledgeBase;

/// Trimmed text, or an error naming the blank field
fn required<'a>(field: &str, value: &'a str) -> QaResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(QaError::invalid(format!("{} must not be empty", field)));
    }
    Ok(value)
}

/// Blank category names mean "no category"
fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Build and register a new entry in both the document and the index
fn insert_entry(
    tokenizer: &Tokenizer,
    data: &mut QaData,
    index: &mut SearchIndex,
    question: &str,
    answer: &str,
    category: Option<String>,
) -> u64 {
    let id = data.allocate_id();
    let entry = Entry::new(
        id,
        question.to_string(),
        answer.to_string(),
        tokenizer.tokenize(question),
        category,
        current_timestamp(),
    );

    if let Some(category) = &entry.category {
        data.add_to_category(category, id);
    }
    index.index_entry(entry.clone());
    data.questions.push(entry);
    id
}

/// Remove an entry, its category membership and its feedback
fn remove_entry(data: &mut QaData, index: &mut SearchIndex, id: u64) -> bool {
    let Some(pos) = data.position(id) else {
        return false;
    };
    let entry = data.questions.remove(pos);
    if let Some(category) = &entry.category {
        data.remove_from_category(category, id);
    }
    data.feedback.remove(&id.to_string());
    index.remove_entry(id);
    true
}

/// Create a new entry and return its id
pub fn create(
    kb: &KnowledgeBase,
    question: &str,
    answer: &str,
    category: Option<&str>,
) -> QaResult<u64> {
    let question = required("question", question)?;
    let answer = required("answer", answer)?;
    let category = normalize_category(category);

    let id = kb
        .write(|data, index| {
            Ok(Some(insert_entry(
                &kb.tokenizer,
                data,
                index,
                question,
                answer,
                category,
            )))
        })?
        .ok_or_else(|| QaError::invalid("entry was not created"))?;

    info!(id, "entry created");
    Ok(id)
}

/// Replace the question and/or answer of an entry. Keywords follow the new
/// question; aliases and category are kept.
pub fn update(
    kb: &KnowledgeBase,
    id: u64,
    question: Option<&str>,
    answer: Option<&str>,
) -> QaResult<bool> {
    let question = question.map(|q| required("question", q)).transpose()?;
    let answer = answer.map(|a| required("answer", a)).transpose()?;
    if question.is_none() && answer.is_none() {
        return Err(QaError::invalid("nothing to update"));
    }

    let updated = kb.write(|data, index| {
        let Some(entry) = data.get_mut(id) else {
            return Ok(None);
        };
        if let Some(question) = question {
            entry.question = question.to_string();
            entry.keywords = kb.tokenizer.tokenize(question);
        }
        if let Some(answer) = answer {
            entry.answer = answer.to_string();
        }
        index.update_entry(entry.clone());
        Ok(Some(()))
    })?;

    if updated.is_some() {
        debug!(id, "entry updated");
    }
    Ok(updated.is_some())
}

/// Move an entry to `category`, or out of any category with `None`
pub fn set_category(kb: &KnowledgeBase, id: u64, category: Option<&str>) -> QaResult<bool> {
    let category = normalize_category(category);

    let changed = kb.write(|data, index| {
        let Some(entry) = data.get_mut(id) else {
            return Ok(None);
        };
        let previous = std::mem::replace(&mut entry.category, category.clone());
        let entry = entry.clone();

        if let Some(previous) = &previous {
            data.remove_from_category(previous, id);
        }
        if let Some(category) = &category {
            data.add_to_category(category, id);
        }
        index.update_entry(entry);
        Ok(Some(()))
    })?;

    Ok(changed.is_some())
}

/// Attach another phrasing to an entry's question
pub fn add_alias(kb: &KnowledgeBase, id: u64, text: &str) -> QaResult<bool> {
    let text = required("similar question", text)?;

    let added = kb.write(|data, index| {
        let Some(entry) = data.get_mut(id) else {
            return Ok(None);
        };
        entry
            .aliases
            .push(Alias::new(text.to_string(), kb.tokenizer.tokenize(text)));
        index.update_entry(entry.clone());
        Ok(Some(()))
    })?;

    if added.is_some() {
        debug!(id, alias = text, "alias added");
    }
    Ok(added.is_some())
}

/// Delete an entry; false if no entry has this id
pub fn delete(kb: &KnowledgeBase, id: u64) -> QaResult<bool> {
    let deleted = kb.write(|data, index| Ok(remove_entry(data, index, id).then_some(())))?;
    if deleted.is_some() {
        info!(id, "entry deleted");
    }
    Ok(deleted.is_some())
}

/// Add many entries in one write. Records without a question or an answer are
/// skipped and reported by position.
pub fn batch_add(kb: &KnowledgeBase, records: Vec<BatchRecord>) -> QaResult<BatchReport> {
    let mut report = BatchReport::default();

    let valid: Vec<(String, String, Option<String>)> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| {
            let question = record.question.as_deref().map(str::trim).unwrap_or("");
            let answer = record.answer.as_deref().map(str::trim).unwrap_or("");
            if question.is_empty() || answer.is_empty() {
                report.skipped.push(i);
                return None;
            }
            Some((
                question.to_string(),
                answer.to_string(),
                normalize_category(record.category.as_deref()),
            ))
        })
        .collect();

    if !valid.is_empty() {
        let added = kb.write(|data, index| {
            let ids = valid
                .into_iter()
                .map(|(question, answer, category)| {
                    insert_entry(&kb.tokenizer, data, index, &question, &answer, category)
                })
                .collect::<Vec<u64>>();
            Ok(Some(ids))
        })?;
        report.added = added.unwrap_or_default();
    }

    info!(
        added = report.added.len(),
        skipped = report.skipped.len(),
        "batch add finished"
    );
    Ok(report)
}

/// Delete many entries in one write; returns the ids that existed
pub fn batch_delete(kb: &KnowledgeBase, ids: &[u64]) -> QaResult<Vec<u64>> {
    let deleted = kb.write(|data, index| {
        let mut seen = HashSet::new();
        let deleted: Vec<u64> = ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .filter(|&id| remove_entry(data, index, id))
            .collect();
        Ok((!deleted.is_empty()).then_some(deleted))
    })?;

    let deleted = deleted.unwrap_or_default();
    info!(requested = ids.len(), deleted = deleted.len(), "batch delete finished");
    Ok(deleted)
}
