// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One scan file in the archive.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use scandex_core::error::Result;
use scandex_core::{IdRange, ScanFormat};
use scandex_document::{TextSource, dates_from_text, title_from_ranking, word_ranking};
use tracing::{debug, instrument};

use crate::filename::{self, NameMatch, ScanName};
use crate::memo::Memo;

/// A scan file with the metadata encoded in its name.
///
/// Everything derived from the file's content (text, word ranking, dates)
/// is computed on first request and kept for the lifetime of the record.
/// Records compare equal by path.
#[derive(Debug)]
pub struct ScanRecord {
    path: PathBuf,
    date: Option<NaiveDate>,
    id_range: IdRange,
    description: Option<String>,
    format: ScanFormat,
    text: Memo<String>,
    ranking: Memo<Vec<String>>,
    dates: Memo<Vec<NaiveDate>>,
}

impl ScanRecord {
    pub fn new(path: impl Into<PathBuf>, name: ScanName) -> Self {
        Self {
            path: path.into(),
            date: name.date,
            id_range: name.id_range,
            description: name.description,
            format: name.format,
            text: Memo::new(),
            ranking: Memo::new(),
            dates: Memo::new(),
        }
    }

    /// Record for `path` if its file name classifies as a scan.
    ///
    /// Returns `Ok(None)` for unrelated and malformed names alike; use
    /// [`filename::classify`] to tell them apart.
    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        Ok(match filename::classify(file_name)? {
            NameMatch::Scan(name) => Some(Self::new(path, name)),
            NameMatch::Malformed | NameMatch::Unrelated => None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Date from the file name.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn id_range(&self) -> IdRange {
        self.id_range
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn format(&self) -> ScanFormat {
        self.format
    }

    pub fn is_digital(&self) -> bool {
        self.id_range.is_digital()
    }

    pub fn has_text_layer(&self) -> bool {
        self.format.has_text_layer()
    }

    /// Description, or the file stem when the name has none.
    pub fn title(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| {
            self.path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
        })
    }

    /// Plain text of the scan, extracted once.
    #[instrument(skip(self, source), fields(path = %self.path.display()))]
    pub fn text(&self, source: &TextSource) -> Result<&str> {
        self.text
            .get_or_try_init(|| {
                debug!("Extracting text");
                source.extract(&self.path)
            })
            .map(String::as_str)
    }

    /// Distinct words of the text, least frequent first.
    pub fn word_ranking(&self, source: &TextSource) -> Result<&[String]> {
        self.ranking
            .get_or_try_init(|| self.text(source).map(word_ranking))
            .map(Vec::as_slice)
    }

    /// Dates found in the text, most plausible first.
    pub fn content_dates(&self, source: &TextSource) -> Result<&[NaiveDate]> {
        self.dates
            .get_or_try_init(|| self.text(source).map(dates_from_text))
            .map(Vec::as_slice)
    }

    /// Best date from the text, if any.
    pub fn content_date(&self, source: &TextSource) -> Result<Option<NaiveDate>> {
        Ok(self.content_dates(source)?.first().copied())
    }

    /// The description if the name has one, else the rarest words of the text.
    pub fn suggest_title(&self, source: &TextSource) -> Result<String> {
        match &self.description {
            Some(description) => Ok(description.clone()),
            None => Ok(title_from_ranking(self.word_ranking(source)?)),
        }
    }
}

impl PartialEq for ScanRecord {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for ScanRecord {}

impl Hash for ScanRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}
