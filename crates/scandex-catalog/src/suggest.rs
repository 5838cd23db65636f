// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Date suggestions for a set of scans about to be merged.

use chrono::NaiveDate;
use scandex_core::error::Result;
use scandex_document::TextSource;

use crate::record::ScanRecord;

/// Candidate dates for `records`, best first.
///
/// Dates already in file names come first (someone typed them in), then
/// each record's content dates in record order. Repeats are dropped.
pub fn suggest_dates(records: &[&ScanRecord], source: &TextSource) -> Result<Vec<NaiveDate>> {
    let mut suggestions: Vec<NaiveDate> = Vec::new();
    let mut push = |date: NaiveDate| {
        if !suggestions.contains(&date) {
            suggestions.push(date);
        }
    };

    records.iter().filter_map(|record| record.date()).for_each(&mut push);
    for record in records {
        record.content_dates(source)?.iter().copied().for_each(&mut push);
    }
    Ok(suggestions)
}
