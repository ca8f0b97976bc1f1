//! Inverted index and word-frequency report over a corpus of text documents.
//!
//! Documents flow from a [`DocumentSource`] through [`tokenize`] into an
//! [`IndexBuilder`]; the finished [`InvertedIndex`] is written out as flat
//! text by [`report`] and as a word cloud by [`cloud`], both through a
//! [`BlobSink`].

pub mod cloud;
pub mod config;
pub mod error;
pub mod index;
pub mod pipeline;
pub mod report;
pub mod sink;
pub mod source;
pub mod stopwords;
pub mod tokenizer;

pub use cloud::{CloudRenderer, RasterCloudRenderer};
pub use config::{ArtifactNames, CloudConfig, ImageKind, PipelineConfig};
pub use error::{IndexError, Result};
pub use index::{DocumentId, FrequencyTable, IndexBuilder, InvertedIndex, PostingSet};
pub use pipeline::{index_corpus, run, run_from_config, RunSummary};
pub use sink::{BlobSink, FsSink, MemorySink};
pub use source::{DecodePolicy, DocumentSource, FsDocumentSource, MemorySource};
pub use stopwords::{StopWords, StopwordSource};
pub use tokenizer::tokenize;
