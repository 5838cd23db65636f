// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use scandex_core::error::{Result, ScandexError};
use scandex_document::DATE_FORMAT;

use crate::format::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "scandex", version)]
#[command(about = "Maintain an archive of scans named by sheet number")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Archive root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// How each scan is printed
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::IdDateTitle)]
    pub format: OutputFormat,

    /// Id expressions, e.g. `5+`, `1203-05`, `12#`, `digital`; comma-separated
    /// where several are accepted
    #[arg(long, visible_alias = "id", global = true)]
    pub ids: Option<String>,

    /// Show what would happen without changing anything
    #[arg(short = 's', long, visible_alias = "simulate", global = true)]
    pub dry_run: bool,

    /// Keep source files after merging
    #[arg(short, long, global = true)]
    pub keep: bool,

    /// Scan from the flatbed instead of the document feeder
    #[arg(short = 'F', long, global = true)]
    pub flatbed: bool,

    /// Use this id instead of the computed next id
    #[arg(long, global = true)]
    pub force_next_id: Option<i64>,

    /// Print shell commands instead of running them
    #[arg(long, global = true)]
    pub output_commands: bool,

    /// Do not convert new scans to PDF after scanning
    #[arg(long, global = true)]
    pub skip_convert: bool,
}

impl Cli {
    /// The `--ids` value, which the command cannot do without.
    pub fn required_ids(&self) -> Result<&str> {
        self.ids
            .as_deref()
            .filter(|ids| !ids.trim().is_empty())
            .ok_or_else(|| ScandexError::invalid_id("", "--ids is required for this command"))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all scans, ordered by id
    List,
    /// List the scans covering `--ids`
    ById,
    /// Report sheets claimed by more than one scan
    CheckDuplicates,
    /// Report duplex pairs with no scan
    MissingIds,
    /// Print the id the next scan should start at
    NextId,
    /// Convert image scans to searchable PDFs
    Convert,
    /// Merge the scans covering one id expression into a single PDF
    Merge(MergeArgs),
    /// Recreate the index directory of symlinks
    RebuildIndex,
    /// Scan a new batch starting at the next id
    Scan,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Document date (YYYY-MM-DD); defaults to the best date found in the scans
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Document title; defaults to the first description among the scans
    #[arg(long)]
    pub title: Option<String>,

    /// Directory below the root to file the result in
    #[arg(long)]
    pub category: Option<String>,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|err| format!("{value}: {err}"))
}
