// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `scan`: run a scanimage batch into the default category, numbering pages
// from the next free id, then convert the new images.

use std::fs;
use std::io::Write;

use scandex_core::error::Result;
use scandex_document::ExternalCommand;
use tracing::{info, instrument};

use crate::archive::Archive;
use crate::cli::Cli;
use crate::commands::convert::convert;

/// The scanimage invocation for the next batch.
///
/// `--batch-print` makes scanimage print every file name as it finishes;
/// the pattern leaves files named `out<id>.png`.
pub fn scan_command(archive: &Archive, cli: &Cli) -> ExternalCommand {
    let config = &archive.config;
    let source = if cli.flatbed {
        &config.alternate_scan_source
    } else {
        &config.default_scan_source
    };
    let start = cli
        .force_next_id
        .unwrap_or_else(|| archive.catalog.index().next_id());

    let command = ExternalCommand::new("scanimage")
        .arg("--source")
        .arg(source)
        .arg("--batch")
        .arg("--batch-start")
        .arg(start.to_string())
        .args(["--batch-print", "--format", "png", "--resolution"])
        .arg(config.scan_resolution.to_string())
        .current_dir(archive.default_category_dir());
    // The flatbed holds one sheet; wait for a keypress between pages.
    if cli.flatbed {
        command.arg("--batch-prompt")
    } else {
        command
    }
}

#[instrument(skip_all)]
pub fn scan(archive: &Archive, cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let command = scan_command(archive, cli);
    if cli.dry_run {
        writeln!(out, "{}", command.shell_line())?;
        return Ok(());
    }

    fs::create_dir_all(archive.default_category_dir())?;
    command.run()?;
    info!("Scan batch finished");

    if cli.skip_convert {
        return Ok(());
    }
    // The batch added files; look at the archive again.
    let refreshed = Archive::open(archive.root())?;
    convert(&refreshed, cli.output_commands, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::{archive_with_text, touch};
    use clap::Parser;
    use scandex_document::tools::shell_quote;

    fn cli(extra: &[&str]) -> Cli {
        let mut argv = vec!["scandex", "scan"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).expect("parse")
    }

    #[test]
    fn feeder_batch_starts_at_next_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "Bank/1-6.pdf");
        let archive = archive_with_text(dir.path(), "");
        let line = scan_command(&archive, &cli(&[])).shell_line();
        let category = shell_quote(&dir.path().join("_toSort").to_string_lossy());
        assert_eq!(
            line,
            format!(
                "cd {category} && scanimage --source 'ADF Duplex' --batch --batch-start 7 \
                 --batch-print --format png --resolution 600"
            )
        );
    }

    #[test]
    fn flatbed_prompts_between_pages() {
        let dir = tempfile::tempdir().expect("tempdir");
        let archive = archive_with_text(dir.path(), "");
        let line = scan_command(&archive, &cli(&["-F", "--force-next-id", "41"])).shell_line();
        assert!(line.contains("--source Flatbed"));
        assert!(line.contains("--batch-start 41"));
        assert!(line.ends_with("--batch-prompt"));
    }

    #[test]
    fn dry_run_only_prints() {
        let dir = tempfile::tempdir().expect("tempdir");
        let archive = archive_with_text(dir.path(), "");
        let mut out = Vec::new();
        scan(&archive, &cli(&["--dry-run"]), &mut out).expect("dry run");
        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains("scanimage"));
        assert!(text.contains("--batch-start 1"));
        assert!(!dir.path().join("_toSort").exists());
    }
}
