// Text preprocessing — punctuation stripping, lowercasing, whitespace tokenizing.
//
// "Punctuation" is anything that is neither a word character nor whitespace,
// using the regex crate's Unicode classes. That keeps accented letters, CJK,
// digits and underscores, and drops symbols like `,.!?'"-`.

use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

/// Remove punctuation and lowercase the text.
///
/// Whitespace is left untouched so that `tokenize` can split on it.
pub fn preprocess_text(text: &str) -> String {
    NON_WORD.replace_all(text, "").to_lowercase()
}

/// Preprocess and split into tokens.
///
/// Runs of whitespace (including leading and trailing) never produce empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    preprocess_text(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
