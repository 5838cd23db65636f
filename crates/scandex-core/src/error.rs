// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scandex.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Scandex operations.
#[derive(Debug, Error)]
pub enum ScandexError {
    // -- Id expressions --
    #[error("id \"{input}\" is invalid: {reason}")]
    InvalidIdRange { input: String, reason: String },

    #[error("internal contract violated: {0}")]
    ContractViolation(String),

    // -- Catalog --
    #[error("{}: seems like a scanned document, but name is invalid", path.display())]
    MalformedScanFilename { path: PathBuf },

    #[error("no scan with id {0} found")]
    NothingFound(String),

    #[error("nothing to merge: {0}")]
    NothingToMerge(String),

    #[error("{0} sheet(s) are covered by more than one scan")]
    DuplicatesFound(usize),

    // -- Documents and external tools --
    #[error("failed to run {program}, exited with {status}: {stderr}")]
    ExternalTool {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("external tool {0} is not available")]
    ToolUnavailable(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("unsupported document: {0}")]
    UnsupportedDocument(String),

    // -- Interaction --
    #[error("aborted by user")]
    UserAbort,

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScandexError {
    /// Shorthand for an [`ScandexError::InvalidIdRange`] about `input`.
    pub fn invalid_id(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdRange {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScandexError>;
