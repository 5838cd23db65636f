// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan file names.
//
//   [YYYY-MM-DD_][out]<id>[#][_<description>].<pdf|png|jpg|jpeg>
//
// `out` is the prefix left behind by the scanner's batch mode. The id uses
// the grammar of `IdExpr`; `#` widens it by the around margin.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scandex_core::error::Result;
use scandex_core::{IdExpr, IdRange, ScanFormat};
use scandex_document::DATE_FORMAT;

static SCAN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?<date>\d{4}-\d{2}-\d{2})_)?(?:out)?(?<id>d(?:igital)?|\d+(?:\+\+|\+|-\d+)?#?)(?:_(?<description>.*))?\.(?<ext>(?i:jpe?g|pdf|png))$",
    )
    .expect("scan name pattern is valid")
});

static SCAN_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(?:jpe?g|pdf|png)$").expect("extension pattern is valid"));

/// The parts of a well-formed scan file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanName {
    pub date: Option<NaiveDate>,
    pub id_range: IdRange,
    pub description: Option<String>,
    pub format: ScanFormat,
}

/// How a file name relates to the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    Scan(ScanName),
    /// Scan extension, but the rest of the name does not fit.
    Malformed,
    /// Not a scan at all.
    Unrelated,
}

/// Classify `file_name` (the final path component).
///
/// # Errors
///
/// `InvalidIdRange` when the id has the right shape but its arithmetic
/// fails, e.g. `15-12.pdf`. Such names are not skipped: the archive would
/// silently lose a scan.
pub fn classify(file_name: &str) -> Result<NameMatch> {
    let Some(caps) = SCAN_NAME.captures(file_name) else {
        return Ok(if SCAN_EXTENSION.is_match(file_name) {
            NameMatch::Malformed
        } else {
            NameMatch::Unrelated
        });
    };

    let date = match caps.name("date") {
        Some(m) => match NaiveDate::parse_from_str(m.as_str(), DATE_FORMAT) {
            Ok(date) => Some(date),
            // 2024-13-45 has the shape of a date but is none.
            Err(_) => return Ok(NameMatch::Malformed),
        },
        None => None,
    };

    let id = &caps["id"];
    let id_range = id.parse::<IdExpr>()?.resolve(file_name)?;

    let description = caps
        .name("description")
        .map(|m| m.as_str().to_string())
        .filter(|d| !d.is_empty());

    let Some(format) = ScanFormat::from_extension(&caps["ext"]) else {
        return Ok(NameMatch::Malformed);
    };

    Ok(NameMatch::Scan(ScanName {
        date,
        id_range,
        description,
        format,
    }))
}
