use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::Utf8Error;
use walkdir::WalkDir;

use crate::error::{IndexError, Result};
use crate::DocumentId;

/// How raw document bytes become text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Every byte maps to the char with the same code point. Never fails.
    #[default]
    Latin1,
    /// Invalid sequences are replaced with U+FFFD. Never fails.
    Utf8Lossy,
    Utf8,
}

pub fn decode(bytes: &[u8], policy: DecodePolicy) -> std::result::Result<String, Utf8Error> {
    match policy {
        DecodePolicy::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        DecodePolicy::Utf8Lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
        DecodePolicy::Utf8 => std::str::from_utf8(bytes).map(str::to_owned),
    }
}

/// Supplies the documents of one corpus pass.
pub trait DocumentSource {
    fn list_documents(&self) -> Result<Vec<DocumentId>>;

    fn read_bytes(&self, id: &str) -> Result<Vec<u8>>;

    fn read_document(&self, id: &str, policy: DecodePolicy) -> Result<String> {
        let bytes = self.read_bytes(id)?;
        decode(&bytes, policy).map_err(|source| IndexError::DecodeFailure { id: id.to_string(), source })
    }
}

/// Documents under a directory tree, named by their `/`-separated path
/// relative to the root.
pub struct FsDocumentSource {
    root: PathBuf,
    suffix: String,
}

impl FsDocumentSource {
    /// An empty `suffix` accepts every file.
    pub fn new<P: AsRef<Path>>(root: P, suffix: impl Into<String>) -> Self {
        Self { root: root.as_ref().to_path_buf(), suffix: suffix.into() }
    }

    /// `None` for paths outside the root or with a component that is not
    /// valid UTF-8, since such an id could not be joined back onto the root.
    fn document_id(&self, path: &Path) -> Option<DocumentId> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts = rel.components().map(|c| c.as_os_str().to_str()).collect::<Option<Vec<_>>>()?;
        Some(parts.join("/"))
    }
}

impl DocumentSource for FsDocumentSource {
    fn list_documents(&self) -> Result<Vec<DocumentId>> {
        let target = self.root.display().to_string();
        if !self.root.is_dir() {
            return Err(IndexError::unavailable(
                "list documents",
                target,
                std::io::Error::new(std::io::ErrorKind::NotFound, "corpus directory does not exist"),
            ));
        }
        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|e| IndexError::unavailable("list documents", target.clone(), e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(id) = self.document_id(entry.path()) else {
                tracing::warn!(path = %entry.path().display(), "skipping file with a non UTF-8 name");
                continue;
            };
            if id.ends_with(&self.suffix) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn read_bytes(&self, id: &str) -> Result<Vec<u8>> {
        let path = self.root.join(id);
        fs::read(&path).map_err(|e| IndexError::unavailable("read document", id, e))
    }
}

/// In-memory corpus, listed in id order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    docs: BTreeMap<DocumentId, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self { Self::default() }

    pub fn with_document(mut self, id: impl Into<DocumentId>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(id, body);
        self
    }

    pub fn insert(&mut self, id: impl Into<DocumentId>, body: impl Into<Vec<u8>>) {
        self.docs.insert(id.into(), body.into());
    }
}

impl DocumentSource for MemorySource {
    fn list_documents(&self) -> Result<Vec<DocumentId>> {
        Ok(self.docs.keys().cloned().collect())
    }

    fn read_bytes(&self, id: &str) -> Result<Vec<u8>> {
        self.docs.get(id).cloned().ok_or_else(|| {
            IndexError::unavailable("read document", id, std::io::Error::new(std::io::ErrorKind::NotFound, "no such document"))
        })
    }
}
