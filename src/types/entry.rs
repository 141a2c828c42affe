//! Question/answer entry types

use serde::{Deserialize, Serialize};

/// Alternative phrasing of an entry's question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    pub text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Alias {
    pub fn new(text: String, keywords: Vec<String>) -> Self {
        Self { text, keywords }
    }
}

/// A stored question/answer pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u64,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "similar_questions", alias = "aliases", default)]
    pub aliases: Vec<Alias>,
    #[serde(default)]
    pub created_at: String,
}

impl Entry {
    /// Create an entry with no aliases
    pub fn new(
        id: u64,
        question: String,
        answer: String,
        keywords: Vec<String>,
        category: Option<String>,
        created_at: String,
    ) -> Self {
        Self {
            id,
            question,
            answer,
            keywords,
            category,
            aliases: Vec::new(),
            created_at,
        }
    }

    /// Every phrasing of the question with its keywords, primary first
    pub fn phrasings(&self) -> impl Iterator<Item = (&str, &[String])> {
        std::iter::once((self.question.as_str(), self.keywords.as_slice())).chain(
            self.aliases
                .iter()
                .map(|a| (a.text.as_str(), a.keywords.as_slice())),
        )
    }

    /// Number of indexed phrasings (primary question plus aliases)
    pub fn phrasing_count(&self) -> usize {
        1 + self.aliases.len()
    }
}

/// Lightweight listing view of an entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryBrief {
    pub id: u64,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<&Entry> for EntryBrief {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            question: entry.question.clone(),
            category: entry.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrasings_primary_first() {
        let mut entry = Entry::new(
            1,
            "如何重启系统?".to_string(),
            "点击开始菜单".to_string(),
            vec!["重启".to_string(), "系统".to_string()],
            None,
            String::new(),
        );
        entry
            .aliases
            .push(Alias::new("电脑怎么重启".to_string(), vec!["电脑".to_string()]));

        let texts: Vec<&str> = entry.phrasings().map(|(t, _)| t).collect();
        assert_eq!(texts, vec!["如何重启系统?", "电脑怎么重启"]);
        assert_eq!(entry.phrasing_count(), 2);
    }

    #[test]
    fn test_deserialize_legacy_record() {
        // Records written before categories and aliases existed
        let json = r#"{"id": 3, "question": "群规是什么?", "answer": "互相尊重", "keywords": ["群规"]}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 3);
        assert!(entry.category.is_none());
        assert!(entry.aliases.is_empty());
        assert!(entry.created_at.is_empty());
    }

    #[test]
    fn test_aliases_serialize_as_similar_questions() {
        let mut entry = Entry::new(1, "q".into(), "a".into(), vec![], Some("c".into()), "t".into());
        entry.aliases.push(Alias::new("q2".into(), vec![]));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["similar_questions"][0]["text"], "q2");
        assert_eq!(value["category"], "c");
    }
}
