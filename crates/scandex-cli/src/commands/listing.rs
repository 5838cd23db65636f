// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `list` and `by-id`.

use std::io::Write;

use scandex_catalog::ScanRecord;
use scandex_core::IdRange;
use scandex_core::error::Result;
use tracing::debug;

use crate::archive::Archive;
use crate::format::{OutputFormat, print_records};

/// Every scan, ordered by id.
pub fn list(archive: &Archive, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let records: Vec<&ScanRecord> = archive.catalog.records().iter().collect();
    print_records(out, &records, format, archive)
}

/// Scans covering any of the comma-separated id expressions in `ids`.
pub fn by_id(archive: &Archive, ids: &str, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let ranges = IdRange::parse_list(ids)?;
    let found = archive.catalog.index().lookup(&ranges);
    debug!(ids, found = found.len(), "Looked up scans");
    print_records(out, &found, format, archive)
}
