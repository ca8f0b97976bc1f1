use lazy_static::lazy_static;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IndexError, Result};
use crate::source::{decode, DecodePolicy};
use crate::tokenizer::strip_non_word;

lazy_static! {
    static ref ENGLISH: Vec<&'static str> = vec![
        "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
        "be","because","been","before","being","below","between","both","but","by",
        "can","can't","cannot","could","couldn't",
        "did","didn't","do","does","doesn't","doing","don't","down","during",
        "each","few","for","from","further",
        "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
        "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
        "let's","me","more","most","mustn't","my","myself",
        "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
        "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
        "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
        "under","until","up","very",
        "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
        "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
    ];
}

/// A fixed set of lowercase words excluded from indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self { Self::default() }

    /// Built-in English list.
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    /// Entries get the same lowercasing and punctuation stripping as
    /// document tokens, so `"don't"` is stored as `"dont"`. Blank entries
    /// are ignored.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| strip_non_word(w.as_ref().trim()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// One word per line.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }
    pub fn len(&self) -> usize { self.words.len() }
    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

/// Supplies the stop-word set once per run.
pub trait StopwordSource {
    fn load_stopwords(&self) -> Result<StopWords>;
}

impl StopwordSource for StopWords {
    fn load_stopwords(&self) -> Result<StopWords> {
        Ok(self.clone())
    }
}

pub struct BuiltinStopwords;

impl StopwordSource for BuiltinStopwords {
    fn load_stopwords(&self) -> Result<StopWords> {
        Ok(StopWords::english())
    }
}

/// Newline-separated stop-word file.
pub struct FileStopwords {
    path: PathBuf,
    decode: DecodePolicy,
}

impl FileStopwords {
    pub fn new<P: AsRef<Path>>(path: P, decode: DecodePolicy) -> Self {
        Self { path: path.as_ref().to_path_buf(), decode }
    }
}

impl StopwordSource for FileStopwords {
    fn load_stopwords(&self) -> Result<StopWords> {
        let target = self.path.display().to_string();
        let bytes = fs::read(&self.path).map_err(|e| IndexError::unavailable("read stopwords", target.clone(), e))?;
        let text = decode(&bytes, self.decode).map_err(|e| {
            IndexError::unavailable("decode stopwords", target, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        let words = StopWords::parse(&text);
        tracing::debug!(path = %self.path.display(), count = words.len(), "loaded stopwords");
        Ok(words)
    }
}
