use crate::cloud::{emit_cloud, CloudRenderer, RasterCloudRenderer};
use crate::config::PipelineConfig;
use crate::error::{IndexError, Result};
use crate::index::{IndexBuilder, InvertedIndex};
use crate::report::ReportEmitter;
use crate::sink::{BlobSink, FsSink};
use crate::source::{DecodePolicy, DocumentSource, FsDocumentSource};
use crate::stopwords::{BuiltinStopwords, FileStopwords, StopwordSource, StopWords};
use crate::tokenizer::tokenize;
use crate::DocumentId;

/// Outcome of one complete run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Documents that were indexed.
    pub documents: usize,
    /// Documents skipped because they could not be decoded.
    pub skipped: Vec<DocumentId>,
    pub terms: usize,
    pub occurrences: u64,
    pub written: Vec<String>,
    pub failed_artifacts: Vec<IndexError>,
}

impl RunSummary {
    pub fn is_complete(&self) -> bool {
        self.failed_artifacts.is_empty()
    }
}

/// Stream every document of `source` through the tokenizer into a fresh index.
///
/// Retrieval errors abort the pass. Documents that fail to decode are
/// skipped and returned alongside the index.
pub fn index_corpus(
    source: &dyn DocumentSource,
    stopwords: &StopWords,
    decode: DecodePolicy,
) -> Result<(InvertedIndex, Vec<DocumentId>)> {
    let mut builder = IndexBuilder::new();
    let mut skipped = Vec::new();

    for id in source.list_documents()? {
        let text = match source.read_document(&id, decode) {
            Ok(text) => text,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::warn!(document = %id, error = %e, "skipping undecodable document");
                skipped.push(id);
                continue;
            }
        };
        let added = builder.add_document(&id, tokenize(&text, stopwords));
        tracing::debug!(document = %id, terms = added, "indexed document");
    }

    Ok((builder.finish(), skipped))
}

/// Index the corpus, then write the reports and (optionally) the word cloud.
pub fn run(
    source: &dyn DocumentSource,
    stopwords: &dyn StopwordSource,
    sink: &mut dyn BlobSink,
    renderer: Option<&dyn CloudRenderer>,
    config: &PipelineConfig,
) -> Result<RunSummary> {
    let stopwords = stopwords.load_stopwords()?;
    tracing::info!(stopwords = stopwords.len(), "starting index pass");

    let (index, skipped) = index_corpus(source, &stopwords, config.decode)?;
    let mut summary = RunSummary {
        documents: index.document_count(),
        skipped,
        terms: index.len(),
        occurrences: index.total_occurrences(),
        ..RunSummary::default()
    };
    tracing::info!(
        documents = summary.documents,
        skipped = summary.skipped.len(),
        terms = summary.terms,
        occurrences = summary.occurrences,
        "index pass complete"
    );

    let mut results = ReportEmitter::new(&config.artifacts).emit(&index, sink);
    if let Some(renderer) = renderer {
        results.push(emit_cloud(renderer, index.frequencies(), sink, &config.artifacts.cloud));
    }

    for result in results {
        match result {
            Ok(name) => summary.written.push(name),
            Err(e) => {
                tracing::error!(error = %e, "artifact not written");
                summary.failed_artifacts.push(e);
            }
        }
    }
    Ok(summary)
}

/// Filesystem corpus in, filesystem artifacts out, as described by `config`.
pub fn run_from_config(config: &PipelineConfig, with_cloud: bool) -> Result<RunSummary> {
    config.validate()?;
    let source = FsDocumentSource::new(&config.input_dir, config.suffix.clone());
    let mut sink = FsSink::new(&config.output_dir);
    let stopwords: Box<dyn StopwordSource> = match &config.stopwords {
        Some(path) => Box::new(FileStopwords::new(path, config.decode)),
        None => Box::new(BuiltinStopwords),
    };
    let renderer = RasterCloudRenderer::new(config.cloud.clone());
    let renderer = with_cloud.then_some(&renderer as &dyn CloudRenderer);
    run(&source, stopwords.as_ref(), &mut sink, renderer, config)
}
