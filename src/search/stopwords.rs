//! Built-in stop-word list

/// Words dropped by the tokenizer before indexing or matching.
///
/// Chinese function words, interrogatives (a question's wording should not
/// decide which question it matches), and common English function words.
pub const STOP_WORDS: &[&str] = &[
    // Function words
    "的", "了", "是", "在", "我", "有", "和", "就", "不", "人", "都", "一", "一个", "上", "也",
    "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好", "自己", "这",
    // Interrogatives and sentence particles
    "如何", "怎么", "怎样", "怎么样", "什么", "为什么", "哪些", "哪里", "请问", "吗", "呢",
    "吧", "啊",
    // English
    "a", "an", "the", "is", "are", "was", "be", "to", "of", "and", "or", "in", "on", "for",
    "with", "it", "this", "that", "how", "what", "do", "does", "can", "my", "your", "you", "me",
];

/// Check whether `word` is in the built-in list
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}
