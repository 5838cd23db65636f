// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR for scanned images through the `tesseract` command-line tool.
//
// Tesseract must be installed with the trained data for every configured
// language (`tesseract --list-langs`). The program name can be overridden,
// e.g. to point at a wrapper script.

use std::path::Path;

use scandex_core::error::Result;
use tracing::{debug, info, instrument};

use crate::tools;

const DEFAULT_PROGRAM: &str = "tesseract";

/// Runs tesseract on image scans.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    program: String,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.into(),
        }
    }
}

impl TesseractOcr {
    /// Use a different executable than `tesseract` from `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Recognise the text of `image`.
    ///
    /// # Errors
    ///
    /// [`ScandexError::ToolUnavailable`](scandex_core::ScandexError::ToolUnavailable)
    /// if the program cannot be started, `ExternalTool` if it exits non-zero.
    #[instrument(skip(self, languages), fields(image = %image.display()))]
    pub fn recognize(&self, image: &Path, languages: &[String]) -> Result<String> {
        info!(languages = %languages.join("+"), "Starting OCR text recognition");
        let text = tools::tesseract(&self.program, languages, image).output()?;
        debug!(
            line_count = text.lines().count(),
            char_count = text.len(),
            "OCR recognition complete"
        );
        Ok(text)
    }
}
