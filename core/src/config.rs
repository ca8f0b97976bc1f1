use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IndexError, Result};
use crate::source::DecodePolicy;

/// Everything a run needs to locate its inputs and name its outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Only documents whose id ends with this suffix are indexed.
    pub suffix: String,
    /// Newline-separated stop-word file. The built-in English list is used when unset.
    pub stopwords: Option<PathBuf>,
    pub decode: DecodePolicy,
    pub artifacts: ArtifactNames,
    pub cloud: CloudConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./corpus"),
            output_dir: PathBuf::from("./output"),
            suffix: ".txt".to_string(),
            stopwords: None,
            decode: DecodePolicy::default(),
            artifacts: ArtifactNames::default(),
            cloud: CloudConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads a JSON config file. Absent fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let err = |reason: String| IndexError::Config { path: path.display().to_string(), reason };
        let text = fs::read_to_string(path).map_err(|e| err(e.to_string()))?;
        let cfg: PipelineConfig = serde_json::from_str(&text).map_err(|e| err(e.to_string()))?;
        cfg.cloud.validate().map_err(err)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.cloud
            .validate()
            .map_err(|reason| IndexError::Config { path: "<inline>".to_string(), reason })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactNames {
    pub index: String,
    pub frequencies: String,
    /// File stem; the renderer supplies the extension.
    pub cloud: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            index: "inverted_index_output.txt".to_string(),
            frequencies: "word_frequency.txt".to_string(),
            cloud: "word_cloud".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    #[default]
    Png,
    Jpeg,
}

/// Word-cloud canvas and sizing. The default canvas has a 10:6 aspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloudConfig {
    pub format: ImageKind,
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub min_font_size: f32,
    pub max_font_size: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            format: ImageKind::default(),
            width: 1000,
            height: 600,
            max_words: 200,
            min_font_size: 10.0,
            max_font_size: 96.0,
        }
    }
}

impl CloudConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("cloud canvas must be non-empty, got {}x{}", self.width, self.height));
        }
        if !(self.min_font_size > 0.0 && self.min_font_size <= self.max_font_size) {
            return Err(format!(
                "cloud font sizes must satisfy 0 < min <= max, got {}..{}",
                self.min_font_size, self.max_font_size
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_json_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{ "input_dir": "docs", "decode": "utf8_lossy", "cloud": { "max_words": 5, "format": "jpeg" } }"#).unwrap();
        let cfg = PipelineConfig::load(&path).unwrap();
        assert_eq!(cfg.input_dir, PathBuf::from("docs"));
        assert_eq!(cfg.decode, DecodePolicy::Utf8Lossy);
        assert_eq!(cfg.suffix, ".txt");
        assert_eq!(cfg.cloud.max_words, 5);
        assert_eq!(cfg.cloud.width, 1000);
        assert_eq!(cfg.cloud.format, ImageKind::Jpeg);
        assert_eq!(cfg.artifacts.cloud, "word_cloud");
        assert_eq!(cfg.artifacts.frequencies, "word_frequency.txt");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{ "bucket": "index-corpus" }"#).unwrap();
        assert!(matches!(PipelineConfig::load(&path), Err(IndexError::Config { .. })));
    }

    #[test]
    fn bad_font_range_is_rejected() {
        let mut cfg = PipelineConfig::default();
        cfg.cloud.min_font_size = 50.0;
        cfg.cloud.max_font_size = 10.0;
        assert!(cfg.validate().is_err());
        assert!(PipelineConfig::default().validate().is_ok());
    }
}
