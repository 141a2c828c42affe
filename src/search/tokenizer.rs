//! Word segmentation and keyword extraction

use std::collections::HashSet;
use std::sync::OnceLock;

use jieba_rs::Jieba;

use super::stopwords::STOP_WORDS;

/// Shared segmenter; loading the dictionary is the expensive part.
pub(crate) fn jieba() -> &'static Jieba {
    static INSTANCE: OnceLock<Jieba> = OnceLock::new();
    INSTANCE.get_or_init(Jieba::new)
}

/// Splits text into normalized keyword tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: HashSet<String>,
}

impl Tokenizer {
    /// Tokenizer with the built-in stop-word list
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Tokenizer with the built-in list plus `extra` stop words
    pub fn with_extra_stop_words<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokenizer = Self::new();
        for word in extra {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() {
                tokenizer.stop_words.insert(word);
            }
        }
        tokenizer
    }

    /// Extract keywords from `text`.
    ///
    /// Lowercases, strips punctuation, segments, then drops stop words and
    /// single-character tokens. Order follows the text; duplicates are kept.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = strip_punctuation(&text.to_lowercase());

        jieba()
            .cut(&cleaned, true)
            .into_iter()
            .map(str::trim)
            .filter(|w| w.chars().count() > 1)
            .filter(|w| !self.stop_words.contains(*w))
            .map(|w| w.to_string())
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep word characters and whitespace, drop everything else
fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(strip_punctuation("如何重启系统?"), "如何重启系统");
        assert_eq!(strip_punctuation("Hello, World!"), "Hello World");
        assert_eq!(strip_punctuation("请大家互相尊重，不要发广告。"), "请大家互相尊重不要发广告");
    }

    #[test]
    fn test_tokenize_chinese_question() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("如何重启系统?");
        assert!(tokens.contains(&"重启".to_string()));
        assert!(tokens.contains(&"系统".to_string()));
        // Interrogative is a stop word
        assert!(!tokens.contains(&"如何".to_string()));
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_stop_words() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("How do I reset the router?");
        assert!(tokens.contains(&"reset".to_string()));
        assert!(tokens.contains(&"router".to_string()));
        assert!(!tokens.contains(&"the".to_string()));
        assert!(!tokens.contains(&"i".to_string()));
        assert!(tokens.iter().all(|t| t.chars().count() > 1));
    }

    #[test]
    fn test_tokenize_lowercases() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("RESET Router");
        assert_eq!(tokens, vec!["reset".to_string(), "router".to_string()]);
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let tokenizer = Tokenizer::new();
        let text = "电脑死机了怎么重启?";
        assert_eq!(tokenizer.tokenize(text), tokenizer.tokenize(text));
    }

    #[test]
    fn test_tokenize_empty_and_punctuation_only() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("?!。，").is_empty());
    }

    #[test]
    fn test_extra_stop_words() {
        let tokenizer = Tokenizer::with_extra_stop_words(["Router", " "]);
        assert!(tokenizer.is_stop_word("router"));
        assert_eq!(tokenizer.stop_word_count(), STOP_WORDS.len() + 1);
        assert_eq!(tokenizer.tokenize("reset router"), vec!["reset".to_string()]);
    }
}
