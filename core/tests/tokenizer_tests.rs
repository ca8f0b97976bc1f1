use wordindex_core::stopwords::StopWords;
use wordindex_core::tokenizer::tokenize;

#[test]
fn it_lowercases_and_strips_punctuation() {
    let stop = StopWords::new();
    let words: Vec<String> = tokenize("Running, RUNNERS run! (quickly)...", &stop).collect();
    assert_eq!(words, vec!["running", "runners", "run", "quickly"]);
}

#[test]
fn it_filters_stopwords_regardless_of_case() {
    let stop = StopWords::english();
    let words: Vec<String> = tokenize("The quick brown fox AND the lazy dog", &stop).collect();
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words, vec!["quick", "brown", "fox", "lazy", "dog"]);
}

#[test]
fn it_drops_numbers_and_punctuation_only_tokens() {
    let stop = StopWords::new();
    let words: Vec<String> = tokenize("1984 -- 3.14 ... cat42 snake_case !!! ok", &stop).collect();
    assert_eq!(words, vec!["ok"]);
}

#[test]
fn it_keeps_non_ascii_letters() {
    let stop = StopWords::new();
    let words: Vec<String> = tokenize("Café Ärger naïve", &stop).collect();
    assert_eq!(words, vec!["café", "ärger", "naïve"]);
}

#[test]
fn empty_text_yields_nothing() {
    let stop = StopWords::english();
    assert_eq!(tokenize("", &stop).count(), 0);
    assert_eq!(tokenize("   \n\t ", &stop).count(), 0);
}

#[test]
fn it_drops_tokens_carrying_non_digit_numerals() {
    let stop = StopWords::new();
    let words: Vec<String> = tokenize("word\u{b2} x\u{b2} y\u{bd} 3\u{bc}", &stop).collect();
    assert!(words.is_empty(), "{words:?}");
}

#[test]
fn it_strips_combining_marks_and_joiners() {
    let stop = StopWords::new();
    let words: Vec<String> = tokenize("cafe\u{301} hello\u{200d} \u{200b}zero", &stop).collect();
    assert_eq!(words, vec!["cafe", "hello", "zero"]);
}

#[test]
fn it_drops_latin1_superscripts_and_fractions() {
    use wordindex_core::source::{decode, DecodePolicy};
    let text = decode(b"x\xb2 y\xbd ok", DecodePolicy::Latin1).unwrap();
    let stop = StopWords::new();
    let words: Vec<String> = tokenize(&text, &stop).collect();
    assert_eq!(words, vec!["ok"]);
}

#[test]
fn contractions_in_the_builtin_list_are_filtered() {
    let stop = StopWords::english();
    let words: Vec<String> = tokenize("Don't you CAN'T stop", &stop).collect();
    assert_eq!(words, vec!["stop"]);
}
