// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Archive configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, ScandexError};

/// Name of the optional configuration file in the archive root.
pub const CONFIG_FILENAME: &str = "scandex.json";

/// Settings for one scan archive. Every field has a default, so a partial
/// `scandex.json` only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScandexConfig {
    /// Tesseract language codes used for OCR, in priority order.
    pub ocr_languages: Vec<String>,
    /// `scanimage --source` used for regular batches.
    pub default_scan_source: String,
    /// `scanimage --source` used with `--flatbed`.
    pub alternate_scan_source: String,
    /// Scan resolution in DPI.
    pub scan_resolution: u32,
    /// Category directory new scans and uncategorised merges land in.
    pub default_category: String,
    /// Directory (relative to the archive root) holding the symlink index.
    pub index_dir: String,
    /// Minimum zero-padding width of sheet numbers in index entries.
    pub min_number_width: usize,
}

impl Default for ScandexConfig {
    fn default() -> Self {
        Self {
            ocr_languages: vec!["deu".into(), "eng".into()],
            default_scan_source: "ADF Duplex".into(),
            alternate_scan_source: "Flatbed".into(),
            scan_resolution: 600,
            default_category: "_toSort".into(),
            index_dir: ".index".into(),
            min_number_width: 6,
        }
    }
}

impl ScandexConfig {
    /// Load `scandex.json` from the archive root, falling back to defaults
    /// when the file does not exist.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let path = root.as_ref().join(CONFIG_FILENAME);
        if !path.is_file() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ocr_languages.is_empty() {
            return Err(ScandexError::Config(
                "ocr_languages must name at least one language".into(),
            ));
        }
        if self.default_category.is_empty() {
            return Err(ScandexError::Config("default_category must not be empty".into()));
        }
        Ok(())
    }

    /// Languages joined the way tesseract and ocrmypdf expect them (`deu+eng`).
    pub fn ocr_language_arg(&self) -> String {
        self.ocr_languages.join("+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ScandexConfig::load(dir.path()).expect("load");
        assert_eq!(config, ScandexConfig::default());
        assert_eq!(config.ocr_language_arg(), "deu+eng");
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "ocr_languages": ["eng"], "scan_resolution": 300 }"#,
        )
        .expect("write config");

        let config = ScandexConfig::load(dir.path()).expect("load");
        assert_eq!(config.ocr_languages, vec!["eng".to_string()]);
        assert_eq!(config.scan_resolution, 300);
        assert_eq!(config.default_category, "_toSort");
    }

    #[test]
    fn empty_language_list_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILENAME), r#"{ "ocr_languages": [] }"#)
            .expect("write config");
        assert!(matches!(
            ScandexConfig::load(dir.path()),
            Err(ScandexError::Config(_))
        ));
    }

    #[test]
    fn malformed_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILENAME), "{ not json").expect("write config");
        assert!(matches!(
            ScandexConfig::load(dir.path()),
            Err(ScandexError::Serialization(_))
        ));
    }
}
