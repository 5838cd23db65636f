// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scandex — maintenance of a sheet-numbered scan archive.
//
// Entry point. Initialises logging, parses the command line, runs one
// command against the archive, and turns its error (if any) into a message
// on stderr and a distinct exit code.

mod archive;
mod cli;
mod commands;
mod format;
mod interrupt;

use std::process::ExitCode;

use clap::Parser;
use scandex_core::ScandexError;
use scandex_core::outcome::outcome_of;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> ExitCode {
    // stdout carries command output; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    interrupt::install(abort_now);

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, root = %cli.root.display(), "Scandex starting");

    match commands::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn report(err: &ScandexError) -> ExitCode {
    let outcome = outcome_of(err);
    tracing::debug!(error = ?err, kind = ?outcome.kind, "Command failed");
    eprintln!("{}", outcome.message);
    if let Some(suggestion) = &outcome.suggestion {
        eprintln!("  {suggestion}");
    }
    ExitCode::from(outcome.kind.exit_code())
}

/// Ctrl-C outside a guarded section: nothing to clean up, end right away.
fn abort_now() {
    let outcome = outcome_of(&ScandexError::UserAbort);
    eprintln!("{}", outcome.message);
    std::process::exit(i32::from(outcome.kind.exit_code()));
}
