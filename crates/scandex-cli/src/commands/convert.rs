// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `convert`: image scans become searchable PDFs next to the image, and the
// image is removed once ocrmypdf succeeded.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use scandex_core::error::Result;
use scandex_document::ExternalCommand;
use scandex_document::tools::{ocrmypdf, shell_quote};
use tracing::{info, instrument};

use crate::archive::Archive;
use crate::interrupt::INTERRUPT;

/// One pending image-to-PDF conversion.
#[derive(Debug)]
pub struct Conversion {
    pub image: PathBuf,
    pub command: ExternalCommand,
}

impl Conversion {
    /// The conversion as a shell line, removal of the image included.
    pub fn shell_line(&self) -> String {
        format!(
            "{} && rm {}",
            self.command.shell_line(),
            shell_quote(&self.image.to_string_lossy())
        )
    }
}

/// Conversions for every scan without a text layer, in id order.
pub fn pending_conversions(archive: &Archive) -> Vec<Conversion> {
    archive
        .catalog
        .records()
        .iter()
        .filter(|record| !record.has_text_layer())
        .map(|record| {
            let image = record.path().to_path_buf();
            let pdf = image.with_extension("pdf");
            Conversion {
                command: ocrmypdf(&archive.config, &image, &pdf),
                image,
            }
        })
        .collect()
}

#[instrument(skip_all)]
pub fn convert(archive: &Archive, output_commands: bool, out: &mut dyn Write) -> Result<()> {
    let conversions = pending_conversions(archive);
    if output_commands {
        for conversion in &conversions {
            writeln!(out, "{}", conversion.shell_line())?;
        }
        return Ok(());
    }
    let _guard = INTERRUPT.guard();
    for conversion in &conversions {
        INTERRUPT.checkpoint()?;
        conversion
            .command
            .run()
            .map_err(|err| INTERRUPT.or_abort(err))?;
        remove_image(&conversion.image)?;
    }
    info!(converted = conversions.len(), "Conversion finished");
    Ok(())
}

fn remove_image(image: &Path) -> Result<()> {
    fs::remove_file(image)?;
    info!(image = %image.display(), "Removed converted image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::{archive_with_text, touch};

    #[test]
    fn only_images_are_converted() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "_toSort/out43.png");
        touch(dir.path(), "_toSort/45.JPG");
        touch(dir.path(), "Bank/1+.pdf");
        let archive = archive_with_text(dir.path(), "");

        let conversions = pending_conversions(&archive);
        let images: Vec<&Path> = conversions
            .iter()
            .map(|c| archive.display_path(&c.image))
            .collect();
        assert_eq!(images, vec![Path::new("_toSort/out43.png"), Path::new("_toSort/45.JPG")]);
    }

    #[test]
    fn output_commands_prints_instead_of_running() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "7+.png");
        let archive = archive_with_text(dir.path(), "");

        let mut buf = Vec::new();
        convert(&archive, true, &mut buf).expect("convert");
        let text = String::from_utf8(buf).expect("utf-8");
        let image = dir.path().join("7+.png");
        let pdf = dir.path().join("7+.pdf");
        assert_eq!(
            text.trim_end(),
            format!(
                "ocrmypdf --skip-text --pdfa-image-compression jpeg --jpeg-quality 100 -l deu+eng \
                 --jobs 1 {} {} && rm {}",
                shell_quote(&image.to_string_lossy()),
                shell_quote(&pdf.to_string_lossy()),
                shell_quote(&image.to_string_lossy()),
            )
        );
        assert!(image.exists());
    }
}
