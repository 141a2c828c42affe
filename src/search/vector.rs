//! TF-IDF vector space model
//!
//! Every phrasing of every entry (primary question and each alias) is one
//! document. Rows are L2-normalized so cosine similarity is a dot product.

use std::collections::HashMap;
use std::ops::Range;

use crate::types::Entry;

/// Sparse weight vector, sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_weights(weights: HashMap<usize, f64>) -> Self {
        let mut entries: Vec<(usize, f64)> =
            weights.into_iter().filter(|(_, w)| *w != 0.0).collect();
        entries.sort_by_key(|(col, _)| *col);
        Self { entries }
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in self.entries.iter_mut() {
                *w /= norm;
            }
        }
    }

    fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < self.entries.len() && j < other.entries.len() {
            let (ci, wi) = self.entries[i];
            let (cj, wj) = other.entries[j];
            if ci == cj {
                sum += wi * wj;
                i += 1;
                j += 1;
            } else if ci < cj {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }
}

/// Cosine similarity clamped to [0, 1]; 0 when either vector is zero
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Vocabulary, IDF weights and one row per indexed phrasing
#[derive(Debug, Clone, Default)]
pub struct VectorSpaceModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
    /// entry id → its rows, primary first then aliases in order
    row_ranges: HashMap<u64, Range<usize>>,
}

impl VectorSpaceModel {
    /// Build the model over every phrasing of `entries`.
    ///
    /// Documents are the stored keyword lists, so the model sees exactly the
    /// tokens the tokenizer produced. IDF is smoothed:
    /// `ln((1 + n) / (1 + df)) + 1`.
    pub fn build(entries: &[Entry]) -> Self {
        let mut documents: Vec<&[String]> = Vec::new();
        let mut row_ranges = HashMap::with_capacity(entries.len());

        for entry in entries {
            let start = documents.len();
            documents.extend(entry.phrasings().map(|(_, keywords)| keywords));
            row_ranges.insert(entry.id, start..documents.len());
        }

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        for doc in &documents {
            let mut seen: Vec<usize> = Vec::new();
            for token in doc.iter() {
                let col = match vocabulary.get(token) {
                    Some(&col) => col,
                    None => {
                        let col = vocabulary.len();
                        vocabulary.insert(token.clone(), col);
                        doc_freq.push(0);
                        col
                    }
                };
                if !seen.contains(&col) {
                    seen.push(col);
                    doc_freq[col] += 1;
                }
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut model = Self {
            vocabulary,
            idf,
            rows: Vec::with_capacity(documents.len()),
            row_ranges,
        };
        let rows: Vec<SparseVector> = documents
            .iter()
            .map(|doc| model.vectorize_tokens(doc))
            .collect();
        model.rows = rows;
        model
    }

    /// Project tokens onto the vocabulary; unknown tokens carry no weight
    pub fn vectorize_tokens(&self, tokens: &[String]) -> SparseVector {
        let mut weights: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&col) = self.vocabulary.get(token) {
                *weights.entry(col).or_insert(0.0) += 1.0;
            }
        }
        for (col, tf) in weights.iter_mut() {
            *tf *= self.idf[*col];
        }
        let mut vector = SparseVector::from_weights(weights);
        vector.normalize();
        vector
    }

    /// Rows for an entry, primary question first
    pub fn rows_for(&self, id: u64) -> Option<&[SparseVector]> {
        self.row_ranges
            .get(&id)
            .map(|range| &self.rows[range.clone()])
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column(&self, token: &str) -> Option<usize> {
        self.vocabulary.get(token).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Alias;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn make_entry(id: u64, keywords: &[&str]) -> Entry {
        Entry::new(id, format!("q{}", id), format!("a{}", id), kw(keywords), None, String::new())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_build_vocabulary_and_rows() {
        let mut first = make_entry(1, &["重启", "系统"]);
        first.aliases.push(Alias::new("电脑重启".into(), kw(&["电脑", "重启"])));
        let entries = vec![first, make_entry(2, &["群规"])];

        let model = VectorSpaceModel::build(&entries);
        assert_eq!(model.vocabulary_size(), 4);
        assert_eq!(model.row_count(), 3);
        assert_eq!(model.rows_for(1).map(|r| r.len()), Some(2));
        assert_eq!(model.rows_for(2).map(|r| r.len()), Some(1));
        assert!(model.rows_for(3).is_none());
    }

    #[test]
    fn test_rows_are_unit_length() {
        let entries = vec![make_entry(1, &["重启", "系统", "系统"]), make_entry(2, &["系统"])];
        let model = VectorSpaceModel::build(&entries);
        for id in [1, 2] {
            let row = &model.rows_for(id).unwrap()[0];
            assert!(approx(row.norm(), 1.0));
        }
    }

    #[test]
    fn test_identical_text_has_cosine_one() {
        let entries = vec![make_entry(1, &["重启", "系统"]), make_entry(2, &["群规"])];
        let model = VectorSpaceModel::build(&entries);
        let query = model.vectorize_tokens(&kw(&["重启", "系统"]));
        let row = &model.rows_for(1).unwrap()[0];
        assert!(approx(cosine(&query, row), 1.0));
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let entries = vec![
            make_entry(1, &["系统", "重启"]),
            make_entry(2, &["系统", "更新"]),
            make_entry(3, &["系统", "安装"]),
        ];
        let model = VectorSpaceModel::build(&entries);
        let common = model.idf[model.column("系统").unwrap()];
        let rare = model.idf[model.column("重启").unwrap()];
        assert!(rare > common);
    }

    #[test]
    fn test_out_of_vocabulary_is_zero() {
        let model = VectorSpaceModel::build(&[make_entry(1, &["重启"])]);
        let query = model.vectorize_tokens(&kw(&["天气"]));
        assert!(query.is_zero());
        assert_eq!(cosine(&query, &model.rows_for(1).unwrap()[0]), 0.0);
    }

    #[test]
    fn test_cosine_zero_magnitude() {
        let zero = SparseVector::default();
        assert_eq!(cosine(&zero, &zero), 0.0);
    }

    #[test]
    fn test_empty_corpus() {
        let model = VectorSpaceModel::build(&[]);
        assert_eq!(model.vocabulary_size(), 0);
        assert!(model.vectorize_tokens(&kw(&["重启"])).is_zero());
    }
}
