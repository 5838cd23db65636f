// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scandex-document — Everything Scandex learns from the content of a scan.
//
// Provides PDF operations (text extraction, merging), text acquisition through
// external OCR programs, a small runner for those programs, and the signals
// derived from extracted text (candidate document dates, title words).

pub mod pdf;
pub mod signals;
pub mod text;
pub mod tools;

// Re-export the primary items so callers can use `scandex_document::PdfReader` etc.
pub use pdf::reader::PdfReader;
pub use signals::dates::{DATE_FORMAT, date_candidates, dates_from_text, format_date, resolve_dates};
pub use signals::title::{TITLE_WORD_COUNT, title_from_ranking, word_ranking};
pub use text::{DocumentTextExtractor, TextExtractor, TextSource};
pub use tools::ExternalCommand;
