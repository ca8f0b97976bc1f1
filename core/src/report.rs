//! Flat-text serialization of a finished index.
//!
//! Both artifacts list terms in ascending lexicographic order. Document
//! lists within an index line are ascending too, so output is byte-for-byte
//! reproducible across runs on the same corpus.

use std::fmt::Write as _;

use crate::config::ArtifactNames;
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::sink::BlobSink;

/// `<term> : <doc1>,<doc2>,...` per line.
pub fn render_index(index: &InvertedIndex) -> String {
    let mut out = String::new();
    for (term, docs) in index.postings() {
        let joined = docs.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        let _ = writeln!(out, "{term} : {joined}");
    }
    out
}

/// `<term>: <count>` per line.
pub fn render_frequencies(index: &InvertedIndex) -> String {
    let mut out = String::new();
    for (term, count) in index.frequencies() {
        let _ = writeln!(out, "{term}: {count}");
    }
    out
}

pub struct ReportEmitter<'a> {
    names: &'a ArtifactNames,
}

impl<'a> ReportEmitter<'a> {
    pub fn new(names: &'a ArtifactNames) -> Self {
        Self { names }
    }

    /// Writes the index and frequency artifacts. A failure on one does not
    /// prevent the other from being attempted; each gets its own result.
    pub fn emit(&self, index: &InvertedIndex, sink: &mut dyn BlobSink) -> Vec<Result<String>> {
        let artifacts = [
            (self.names.index.as_str(), render_index(index)),
            (self.names.frequencies.as_str(), render_frequencies(index)),
        ];
        artifacts
            .into_iter()
            .map(|(name, body)| sink.write_blob(name, body.as_bytes()).map(|()| name.to_string()))
            .collect()
    }
}
