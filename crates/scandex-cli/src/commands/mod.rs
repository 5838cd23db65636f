// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command dispatch. Each command writes its results to the given writer;
// anything that goes wrong is returned as a `ScandexError`.

pub mod convert;
pub mod index;
pub mod integrity;
pub mod listing;
pub mod merge;
pub mod scan;

use std::io::{self, Write};

use scandex_core::error::Result;

use crate::archive::Archive;
use crate::cli::{Cli, Command};

pub fn run(cli: &Cli) -> Result<()> {
    let archive = Archive::open(&cli.root)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::List => listing::list(&archive, cli.format, &mut out),
        Command::ById => listing::by_id(&archive, cli.required_ids()?, cli.format, &mut out),
        Command::CheckDuplicates => integrity::check_duplicates(&archive, cli.format, &mut out),
        Command::MissingIds => integrity::missing_ids(&archive, &mut out),
        Command::NextId => integrity::next_id(&archive, cli.force_next_id, &mut out),
        Command::Convert => convert::convert(&archive, cli.output_commands, &mut out),
        Command::Merge(args) => {
            let stdin = io::stdin();
            merge::merge(&archive, cli, args, &mut out, &mut stdin.lock())
        }
        Command::RebuildIndex => index::rebuild_index(&archive),
        Command::Scan => scan::scan(&archive, cli, &mut out),
    }?;
    out.flush()?;
    Ok(())
}
