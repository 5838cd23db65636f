// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `rebuild-index`: a flat directory of symlinks, one per physical scan,
// named so that a plain `ls` lists the archive in sheet order.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};

use scandex_catalog::ScanRecord;
use scandex_core::error::{Result, ScandexError};
use tracing::{info, instrument, warn};

use crate::archive::Archive;

#[instrument(skip_all)]
pub fn rebuild_index(archive: &Archive) -> Result<()> {
    let index_dir = archive.root().join(&archive.config.index_dir);
    if let Ok(meta) = fs::symlink_metadata(&index_dir) {
        if !meta.is_dir() {
            return Err(ScandexError::Io(io::Error::new(
                ErrorKind::AlreadyExists,
                format!(
                    "expected {} to be a directory or to not exist",
                    index_dir.display()
                ),
            )));
        }
        fs::remove_dir_all(&index_dir)?;
    }
    fs::create_dir_all(&index_dir)?;

    let width = number_width(archive.catalog.highest_id(), archive.config.min_number_width);
    let up = parent_steps(Path::new(&archive.config.index_dir));
    let mut linked = 0;
    for record in archive.catalog.records().iter().filter(|r| !r.is_digital()) {
        let link = index_dir.join(link_name(record, width));
        let target = up.join(archive.display_path(record.path()));
        match symlink(&target, &link) {
            Ok(()) => linked += 1,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                warn!(link = %link.display(), "Two scans share an index name; keeping the first");
            }
            Err(err) => return Err(err.into()),
        }
    }
    info!(linked, dir = %index_dir.display(), "Index rebuilt");
    Ok(())
}

/// Digits used for sheet numbers in link names.
fn number_width(highest: i64, min_width: usize) -> usize {
    highest.to_string().len().max(min_width)
}

/// `<range>_<title><.ext>`, e.g. `000012+_Miete.pdf`.
pub fn link_name(record: &ScanRecord, width: usize) -> String {
    let ext = record
        .path()
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    format!("{}_{}{}", record.id_range().render(width), record.title(), ext)
}

/// `..` once per component of `dir`.
fn parent_steps(dir: &Path) -> PathBuf {
    dir.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .map(|_| Component::ParentDir)
        .collect()
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
