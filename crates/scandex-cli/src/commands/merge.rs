// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `merge`: combine the scans of one document into a single dated, titled,
// searchable PDF filed under a category.
//
// The merged file is assembled in a hidden work directory inside the archive
// root (so the final rename stays on one filesystem) and only moved into
// place after ocrmypdf succeeded. Sources are removed last.

use std::fs;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use scandex_catalog::{ScanRecord, suggest_dates};
use scandex_core::error::{Result, ScandexError};
use scandex_core::{IdRange, ScanFormat};
use scandex_document::tools::ocrmypdf;
use scandex_document::{PdfReader, format_date};
use tracing::{debug, info, instrument};

use crate::archive::Archive;
use crate::cli::{Cli, MergeArgs};
use crate::format::print_records;
use crate::interrupt::INTERRUPT;

/// Everything decided before any file is touched.
#[derive(Debug)]
pub struct MergePlan<'a> {
    pub sources: Vec<&'a ScanRecord>,
    pub range: IdRange,
    pub date: NaiveDate,
    pub title: Option<String>,
    pub category: String,
    pub destination: PathBuf,
}

/// `<date>_<range>[_<title>].pdf`
pub fn merged_file_name(date: NaiveDate, range: IdRange, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("{}_{}_{}.pdf", format_date(date), range, title),
        None => format!("{}_{}.pdf", format_date(date), range),
    }
}

/// Select the sources for `ids` and settle date, title, and destination.
///
/// `today` is the date of last resort when neither `--date` nor the scans
/// provide one.
#[instrument(skip(archive, args))]
pub fn plan_merge<'a>(
    archive: &'a Archive,
    ids: &str,
    args: &MergeArgs,
    today: NaiveDate,
) -> Result<MergePlan<'a>> {
    let requested = ids.trim().parse::<IdRange>()?.align();
    let sources = archive.catalog.index().lookup(&[requested]);

    let [first, ..] = sources.as_slice() else {
        return Err(ScandexError::NothingFound(requested.to_string()));
    };
    if sources.len() == 1 && first.format() == ScanFormat::Pdf && first.date().is_some() {
        return Err(ScandexError::NothingToMerge(format!(
            "only {} matches {requested}, and it is already a dated PDF",
            archive.display_path(first.path()).display()
        )));
    }
    if let Some(image) = sources.iter().find(|record| !record.has_text_layer()) {
        return Err(ScandexError::UnsupportedDocument(format!(
            "{} is an image; run `scandex convert` first",
            archive.display_path(image.path()).display()
        )));
    }

    let mut range = IdRange::enclosing(sources.iter().map(|r| r.id_range())).unwrap_or(requested);
    if range.len() > 2 {
        range = range.align();
    }

    let date = match args.date {
        Some(date) => date,
        None => suggest_dates(&sources, &archive.text)?
            .first()
            .copied()
            .unwrap_or(today),
    };
    let title = args
        .title
        .clone()
        .or_else(|| sources.iter().find_map(|r| r.description().map(str::to_string)))
        .filter(|title| !title.is_empty());
    let category = args
        .category
        .clone()
        .unwrap_or_else(|| archive.config.default_category.clone());
    let destination = archive
        .root()
        .join(&category)
        .join(merged_file_name(date, range, title.as_deref()));

    debug!(%range, %date, destination = %destination.display(), "Merge planned");
    Ok(MergePlan {
        sources,
        range,
        date,
        title,
        category,
        destination,
    })
}

pub fn merge(
    archive: &Archive,
    cli: &Cli,
    args: &MergeArgs,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<()> {
    let plan = plan_merge(archive, cli.required_ids()?, args, Local::now().date_naive())?;

    writeln!(out, "will merge following scans:")?;
    print_records(out, &plan.sources, cli.format, archive)?;
    writeln!(out)?;
    writeln!(out, "into {}", archive.display_path(&plan.destination).display())?;

    if cli.dry_run {
        return Ok(());
    }
    if !args.yes && !confirm(out, input)? {
        return Err(ScandexError::UserAbort);
    }
    execute(archive, &plan, cli.keep)
}

fn confirm(out: &mut dyn Write, input: &mut dyn BufRead) -> Result<bool> {
    write!(out, "Proceed? [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[instrument(skip_all, fields(destination = %plan.destination.display()))]
fn execute(archive: &Archive, plan: &MergePlan<'_>, keep: bool) -> Result<()> {
    let is_source = |path: &Path| plan.sources.iter().any(|r| r.path() == path);
    if plan.destination.exists() && !is_source(&plan.destination) {
        return Err(ScandexError::Io(io::Error::new(
            ErrorKind::AlreadyExists,
            format!("{} already exists", plan.destination.display()),
        )));
    }

    // Dropped after `work`.
    let _guard = INTERRUPT.guard();
    let work = tempfile::Builder::new()
        .prefix(".scandex-merge-")
        .tempdir_in(archive.root())?;
    let combined = work.path().join("combined.pdf");
    let paths: Vec<&Path> = plan.sources.iter().map(|r| r.path()).collect();
    fs::write(&combined, PdfReader::merge_files(&paths)?)?;
    INTERRUPT.checkpoint()?;

    let searchable = work.path().join("merged.pdf");
    ocrmypdf(&archive.config, &combined, &searchable)
        .run()
        .map_err(|err| INTERRUPT.or_abort(err))?;
    INTERRUPT.checkpoint()?;

    if let Some(dir) = plan.destination.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::rename(&searchable, &plan.destination)?;
    info!(sources = plan.sources.len(), "Merged document written");

    if !keep {
        for path in paths.iter().filter(|path| **path != plan.destination) {
            fs::remove_file(path)?;
            debug!(path = %path.display(), "Removed merged source");
        }
    }
    Ok(())
}
