// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Archive consistency: `check-duplicates`, `missing-ids`, `next-id`.

use std::io::Write;

use scandex_core::error::{Result, ScandexError};
use tracing::info;

use crate::archive::Archive;
use crate::format::{OutputFormat, print_records};

const GROUP_SEPARATOR: &str = "---";

/// Print every group of scans sharing sheets. Finding any is an error
/// (`DuplicatesFound`) so the exit code tells scripts about it.
pub fn check_duplicates(archive: &Archive, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let index = archive.catalog.index();
    let groups = index.duplicates();
    for (n, group) in groups.iter().enumerate() {
        if n > 0 {
            writeln!(out, "{GROUP_SEPARATOR}")?;
        }
        print_records(out, &group.records, format, archive)?;
    }
    if groups.is_empty() {
        info!("No duplicate sheets");
        return Ok(());
    }
    let sheets: u64 = groups.iter().map(|group| group.sheets.len()).sum();
    Err(ScandexError::DuplicatesFound(sheets as usize))
}

/// Print each duplex pair without a scan as `N+`.
pub fn missing_ids(archive: &Archive, out: &mut dyn Write) -> Result<()> {
    for pair in archive.catalog.index().missing() {
        writeln!(out, "{pair}")?;
    }
    Ok(())
}

pub fn next_id(archive: &Archive, forced: Option<i64>, out: &mut dyn Write) -> Result<()> {
    let id = forced.unwrap_or_else(|| archive.catalog.index().next_id());
    writeln!(out, "{id}")?;
    Ok(())
}
