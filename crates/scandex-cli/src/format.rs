// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-line renderings of a scan for listings.

use std::io::Write;

use clap::ValueEnum;
use scandex_catalog::ScanRecord;
use scandex_core::error::Result;
use scandex_document::format_date;

use crate::archive::Archive;

/// Ids in the composite formats are right-aligned to this many columns.
const ID_COLUMN: usize = 12;
const DATE_COLUMN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full extracted text
    Content,
    /// Best date found in the text
    Date,
    Id,
    IdDateTitle,
    IdPath,
    IdTitle,
    Path,
    /// Description, or title words from the text
    Title,
}

impl OutputFormat {
    /// Render `record`. Formats showing content or titles may run OCR.
    pub fn render(self, record: &ScanRecord, archive: &Archive) -> Result<String> {
        let id = record.id_range();
        let path = archive.display_path(record.path()).display();
        Ok(match self {
            Self::Content => record.text(&archive.text)?.to_string(),
            Self::Date => record
                .content_date(&archive.text)?
                .map(format_date)
                .unwrap_or_default(),
            Self::Id => id.to_string(),
            Self::IdDateTitle => {
                let date = record.date().map(format_date).unwrap_or_default();
                let title = record.suggest_title(&archive.text)?;
                format!("{id:>ID_COLUMN$}  {date:<DATE_COLUMN$}  {title}")
            }
            Self::IdPath => format!("{id:>ID_COLUMN$}  {path}"),
            Self::IdTitle => {
                let title = record.suggest_title(&archive.text)?;
                format!("{id:>ID_COLUMN$}  {title}")
            }
            Self::Path => path.to_string(),
            Self::Title => record.suggest_title(&archive.text)?,
        })
    }
}

/// Write one line per record.
pub fn print_records(
    out: &mut dyn Write,
    records: &[&ScanRecord],
    format: OutputFormat,
    archive: &Archive,
) -> Result<()> {
    for record in records {
        writeln!(out, "{}", format.render(record, archive)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::{archive_with_text, touch};

    fn rendered(format: OutputFormat, name: &str, body: &'static str) -> String {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), name);
        let archive = archive_with_text(dir.path(), body);
        format
            .render(&archive.catalog.records()[0], &archive)
            .expect("render")
    }

    #[test]
    fn id_date_title_columns() {
        assert_eq!(
            rendered(OutputFormat::IdDateTitle, "A/2024-01-05_12+_Miete.pdf", ""),
            "         12+  2024-01-05  Miete"
        );
        assert_eq!(
            rendered(OutputFormat::IdDateTitle, "A/7.pdf", "Kfz Steuer"),
            "           7              Kfz,Steuer"
        );
    }

    #[test]
    fn path_is_relative_to_root() {
        assert_eq!(
            rendered(OutputFormat::IdPath, "Bank/3-6.pdf", ""),
            "         3-6  Bank/3-6.pdf"
        );
        assert_eq!(rendered(OutputFormat::Path, "Bank/d.pdf", ""), "Bank/d.pdf");
    }

    #[test]
    fn date_comes_from_the_text() {
        assert_eq!(
            rendered(OutputFormat::Date, "9.png", "Datum: 03.04.2022"),
            "2022-04-03"
        );
        assert_eq!(rendered(OutputFormat::Date, "9.png", "undatiert"), "");
    }

    #[test]
    fn plain_id_and_title() {
        assert_eq!(rendered(OutputFormat::Id, "digital_Rente.pdf", ""), "digital");
        assert_eq!(rendered(OutputFormat::Title, "5_Rente.pdf", "ignored"), "Rente");
        assert_eq!(rendered(OutputFormat::IdTitle, "5_Rente.pdf", ""), "           5  Rente");
        assert_eq!(rendered(OutputFormat::Content, "5.pdf", "Hallo"), "5 Hallo");
    }
}
