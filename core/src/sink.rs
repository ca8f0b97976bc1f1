use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{IndexError, Result};

/// Destination for named output artifacts.
pub trait BlobSink {
    fn write_blob(&mut self, name: &str, bytes: &[u8]) -> Result<()>;
}

/// Writes each blob to `<root>/<name>`.
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
}

impl BlobSink for FsSink {
    fn write_blob(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.root.join(name);
        let write = || -> std::io::Result<()> {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let mut f = File::create(&path)?;
            f.write_all(bytes)?;
            f.flush()
        };
        write().map_err(|source| IndexError::SinkWriteFailure { name: name.to_string(), source })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote artifact");
        Ok(())
    }
}

/// Keeps blobs in memory, keyed by name.
#[derive(Debug, Default)]
pub struct MemorySink {
    blobs: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.blobs.get(name).map(Vec::as_slice)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|b| std::str::from_utf8(b).ok())
    }
}

impl BlobSink for MemorySink {
    fn write_blob(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.blobs.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}
