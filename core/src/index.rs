use std::collections::{BTreeMap, BTreeSet};

pub type DocumentId = String;
pub type PostingSet = BTreeMap<String, BTreeSet<DocumentId>>;
pub type FrequencyTable = BTreeMap<String, u64>;

/// Posting set and frequency table from one complete pass over a corpus.
/// Both maps always share the same key set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: PostingSet,
    frequencies: FrequencyTable,
    documents: usize,
}

impl InvertedIndex {
    pub fn postings(&self) -> &PostingSet { &self.postings }
    pub fn frequencies(&self) -> &FrequencyTable { &self.frequencies }

    pub fn documents(&self, term: &str) -> Option<&BTreeSet<DocumentId>> {
        self.postings.get(term)
    }

    pub fn frequency(&self, term: &str) -> u64 {
        self.frequencies.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize { self.frequencies.len() }
    pub fn is_empty(&self) -> bool { self.frequencies.is_empty() }

    pub fn total_occurrences(&self) -> u64 { self.frequencies.values().sum() }

    /// Documents fed to the builder, including those that contributed no terms.
    pub fn document_count(&self) -> usize { self.documents }
}

/// Owns both accumulator maps while a corpus is streamed through it.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    index: InvertedIndex,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn add_occurrence(&mut self, term: &str, doc_id: &str) {
        self.index.postings.entry(term.to_owned()).or_default().insert(doc_id.to_owned());
        *self.index.frequencies.entry(term.to_owned()).or_insert(0) += 1;
    }

    /// Feed every term of one document. Returns the number of occurrences added.
    pub fn add_document<I, S>(&mut self, doc_id: &str, terms: I) -> u64
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.index.documents += 1;
        let mut added = 0;
        for term in terms {
            self.add_occurrence(term.as_ref(), doc_id);
            added += 1;
        }
        added
    }

    pub fn finish(self) -> InvertedIndex { self.index }
}
