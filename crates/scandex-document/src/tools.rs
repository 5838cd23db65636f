// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External programs — OCR engines, PDF/A converters, and the scanner frontend
// are invoked as child processes. A failed invocation is never retried; it is
// reported as `ScandexError::ExternalTool` and aborts the current command.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use scandex_core::ScandexConfig;
use scandex_core::error::{Result, ScandexError};
use tracing::{debug, info, instrument};

/// A fully described invocation of an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the program inside `dir` instead of the current directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run with inherited stdio; the program talks to the terminal directly.
    #[instrument(skip(self), fields(program = %self.program))]
    pub fn run(&self) -> Result<()> {
        info!(command = %self.shell_line(), "Running external tool");
        let status = self
            .command()
            .status()
            .map_err(|err| self.spawn_error(err))?;
        if !status.success() {
            return Err(ScandexError::ExternalTool {
                program: self.program.clone(),
                status: status.to_string(),
                stderr: String::new(),
            });
        }
        Ok(())
    }

    /// Run and return stdout as (lossily decoded) text.
    #[instrument(skip(self), fields(program = %self.program))]
    pub fn output(&self) -> Result<String> {
        debug!(command = %self.shell_line(), "Capturing external tool output");
        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .map_err(|err| self.spawn_error(err))?;
        if !output.status.success() {
            return Err(ScandexError::ExternalTool {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// The invocation as a line a POSIX shell would run unchanged.
    pub fn shell_line(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(shell_quote(&self.program));
        words.extend(self.args.iter().map(|arg| shell_quote(&arg.to_string_lossy())));
        let line = words.join(" ");
        match &self.cwd {
            Some(dir) => format!("cd {} && {}", shell_quote(&dir.to_string_lossy()), line),
            None => line,
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command
    }

    fn spawn_error(&self, err: std::io::Error) -> ScandexError {
        if err.kind() == ErrorKind::NotFound {
            ScandexError::ToolUnavailable(self.program.clone())
        } else {
            ScandexError::Io(err)
        }
    }
}

/// Quote `word` for a POSIX shell. Words made only of safe characters are
/// left alone.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// `ocrmypdf` invocation adding a text layer to `input`, written to `output`.
///
/// Existing text layers are kept (`--skip-text`). Images are stored at full
/// JPEG quality since the conversion only ever runs once per scan.
pub fn ocrmypdf(config: &ScandexConfig, input: &Path, output: &Path) -> ExternalCommand {
    ExternalCommand::new("ocrmypdf")
        .args([
            "--skip-text",
            "--pdfa-image-compression",
            "jpeg",
            "--jpeg-quality",
            "100",
            "-l",
        ])
        .arg(config.ocr_language_arg())
        .args(["--jobs", "1"])
        .arg(input)
        .arg(output)
}

/// `tesseract` invocation printing the recognised text of `image` to stdout.
pub fn tesseract(program: &str, languages: &[String], image: &Path) -> ExternalCommand {
    ExternalCommand::new(program)
        .arg(image)
        .arg("-")
        .args(["-l".to_string(), languages.join("+")])
}
