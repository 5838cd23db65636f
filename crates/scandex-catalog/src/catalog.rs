// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The catalog: all scan records below an archive root.
//
// Hidden directories (the generated `.index` among them) are not descended
// into. Files with a scan extension whose name does not parse are reported
// and skipped; everything else that is not a scan is ignored silently.

use std::path::{Path, PathBuf};

use scandex_core::error::{Result, ScandexError};
use tracing::{debug, info, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use crate::filename::{self, NameMatch};
use crate::index::PerIdIndex;
use crate::record::ScanRecord;

#[derive(Debug)]
pub struct Catalog {
    root: PathBuf,
    records: Vec<ScanRecord>,
    malformed: Vec<PathBuf>,
}

impl Catalog {
    /// Walk `root` and collect every scan file.
    ///
    /// # Errors
    ///
    /// I/O errors while walking, and `InvalidIdRange` for a scan name whose
    /// id range is decreasing.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn build(root: &Path) -> Result<Self> {
        let mut records = Vec::new();
        let mut malformed = Vec::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !is_hidden_dir(entry));
        for entry in walker {
            let entry = entry.map_err(|err| ScandexError::Io(err.into()))?;
            // Symlinked files count, symlinked directories are not followed.
            if !entry.path().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                debug!(path = %entry.path().display(), "Skipping non-UTF-8 file name");
                continue;
            };
            match filename::classify(file_name)? {
                NameMatch::Scan(name) => records.push(ScanRecord::new(entry.path(), name)),
                NameMatch::Malformed => {
                    let path = entry.path().to_path_buf();
                    warn!("{}", ScandexError::MalformedScanFilename { path: path.clone() });
                    malformed.push(path);
                }
                NameMatch::Unrelated => {}
            }
        }

        let catalog = Self::from_records(root, records, malformed);
        for record in catalog.below_first_sheet() {
            warn!(
                path = %record.path().display(),
                range = %record.id_range(),
                "Scan lies entirely below sheet 1; duplicate and gap checks skip it"
            );
        }
        info!(
            scans = catalog.records.len(),
            malformed = catalog.malformed.len(),
            highest_id = catalog.highest_id(),
            "Catalog built"
        );
        Ok(catalog)
    }

    /// A catalog over already parsed records, sorted by id range then path.
    pub fn from_records(
        root: impl Into<PathBuf>,
        mut records: Vec<ScanRecord>,
        malformed: Vec<PathBuf>,
    ) -> Self {
        records.sort_by(|a, b| {
            a.id_range()
                .cmp(&b.id_range())
                .then_with(|| a.path().cmp(b.path()))
        });
        Self {
            root: root.into(),
            records,
            malformed,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    /// Files that look like scans but whose names do not parse.
    pub fn malformed(&self) -> &[PathBuf] {
        &self.malformed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Highest sheet number in use, 0 when only digital records exist.
    pub fn highest_id(&self) -> i64 {
        self.records
            .iter()
            .filter(|record| !record.is_digital())
            .map(|record| record.id_range().last())
            .max()
            .unwrap_or(0)
            .max(0)
    }

    /// Physical records without a sheet from 1 up, such as `0.pdf`.
    pub fn below_first_sheet(&self) -> impl Iterator<Item = &ScanRecord> + '_ {
        self.records
            .iter()
            .filter(|record| !record.is_digital() && record.id_range().last() < 1)
    }

    pub fn index(&self) -> PerIdIndex<'_> {
        PerIdIndex::build(&self.records)
    }

    /// `path` relative to the archive root, or unchanged if outside it.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}
