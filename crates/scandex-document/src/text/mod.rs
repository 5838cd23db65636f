// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text acquisition — turning a scan file into plain text.
//
// PDFs that already went through OCR carry a text layer which is read
// directly. Images are handed to an external OCR engine (see `ocr`).

pub mod ocr;

use std::path::Path;

use scandex_core::error::{Result, ScandexError};
use scandex_core::{ScanFormat, ScandexConfig};
use tracing::instrument;

use crate::pdf::PdfReader;

pub use ocr::TesseractOcr;

/// Source of plain text for scan files.
///
/// Implementations may be slow (an OCR run takes seconds per page), so
/// callers cache the result per file.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of `path`, using `languages` as OCR hints.
    fn extract_text(&self, path: &Path, languages: &[String]) -> Result<String>;
}

/// The default extractor: text layer for PDFs, tesseract for images.
#[derive(Debug, Default, Clone)]
pub struct DocumentTextExtractor {
    ocr: TesseractOcr,
}

impl DocumentTextExtractor {
    pub fn new(ocr: TesseractOcr) -> Self {
        Self { ocr }
    }
}

impl TextExtractor for DocumentTextExtractor {
    #[instrument(skip(self, languages), fields(path = %path.display()))]
    fn extract_text(&self, path: &Path, languages: &[String]) -> Result<String> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ScanFormat::from_extension)
            .ok_or_else(|| ScandexError::UnsupportedDocument(path.display().to_string()))?;

        if format.has_text_layer() {
            PdfReader::open(path)?.extract_text()
        } else {
            self.ocr.recognize(path, languages)
        }
    }
}

/// An extractor together with the OCR languages configured for the archive.
pub struct TextSource {
    extractor: Box<dyn TextExtractor>,
    languages: Vec<String>,
}

impl TextSource {
    pub fn new(extractor: impl TextExtractor + 'static, config: &ScandexConfig) -> Self {
        Self {
            extractor: Box::new(extractor),
            languages: config.ocr_languages.clone(),
        }
    }

    /// The default extractor with the languages from `config`.
    pub fn from_config(config: &ScandexConfig) -> Self {
        Self::new(DocumentTextExtractor::default(), config)
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn extract(&self, path: &Path) -> Result<String> {
        self.extractor.extract_text(path, &self.languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_unsupported() {
        let extractor = DocumentTextExtractor::default();
        let err = extractor
            .extract_text(Path::new("notes.txt"), &["eng".into()])
            .unwrap_err();
        assert!(matches!(err, ScandexError::UnsupportedDocument(_)));
    }

    struct Echo;

    impl TextExtractor for Echo {
        fn extract_text(&self, path: &Path, languages: &[String]) -> Result<String> {
            Ok(format!("{} {}", path.display(), languages.join("+")))
        }
    }

    #[test]
    fn source_passes_configured_languages() {
        let source = TextSource::new(Echo, &ScandexConfig::default());
        assert_eq!(source.languages(), ["deu".to_string(), "eng".to_string()]);
        assert_eq!(source.extract(Path::new("3+.png")).unwrap(), "3+.png deu+eng");
    }

    #[test]
    fn broken_pdf_is_a_pdf_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("5+.pdf");
        std::fs::write(&path, b"not a pdf").expect("write");

        let err = DocumentTextExtractor::default()
            .extract_text(&path, &["eng".into()])
            .unwrap_err();
        assert!(matches!(err, ScandexError::PdfError(_)));
    }
}
