use lazy_static::lazy_static;
use regex::Regex;

use crate::stopwords::StopWords;

lazy_static! {
    // Anything that is neither alphanumeric nor an underscore.
    static ref NON_WORD: Regex = Regex::new(r"[^\p{Alphabetic}\p{N}_]+").expect("valid regex");
}

/// Lowercase `token` and strip every non-word character.
pub fn strip_non_word(token: &str) -> String {
    NON_WORD.replace_all(&token.to_lowercase(), "").into_owned()
}

/// Lowercase a whitespace-delimited token and strip non-word characters.
/// Returns `None` unless what remains is non-empty and purely alphabetic.
pub fn normalize_token(token: &str) -> Option<String> {
    let stripped = strip_non_word(token);
    if !stripped.is_empty() && stripped.chars().all(char::is_alphabetic) {
        Some(stripped)
    } else {
        None
    }
}

/// Split text on whitespace into normalized terms, dropping stop-words.
/// Multiplicity is preserved.
pub fn tokenize<'a>(text: &'a str, stopwords: &'a StopWords) -> impl Iterator<Item = String> + 'a {
    text.split_whitespace()
        .filter_map(normalize_token)
        .filter(move |term| !stopwords.contains(term))
}
