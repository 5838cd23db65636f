// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command outcomes — every error is mapped to a process exit code plus a short
// message and a suggestion of what to try next.
//
// Exit codes are part of the command-line contract, so scripts wrapping
// `scandex` can tell "duplicates found" apart from "ocrmypdf crashed".

use crate::error::ScandexError;

/// Class of a failed command, each with its own exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// The archive has overlapping scans.
    DuplicatesFound,
    /// A user-supplied id expression (or other argument) was rejected.
    InvalidInput,
    /// Nothing in the archive matched the request.
    NothingFound,
    /// The request was valid but there is nothing to do.
    NothingToDo,
    /// An external program failed or is missing.
    ExternalTool,
    /// Anything else: I/O, PDF parsing, configuration.
    Failure,
    /// An internal invariant did not hold.
    ContractViolation,
    /// The user declined or interrupted.
    UserAbort,
}

impl OutcomeKind {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::DuplicatesFound => 1,
            Self::InvalidInput => 2,
            Self::NothingFound => 3,
            Self::NothingToDo => 4,
            Self::ExternalTool => 5,
            Self::Failure => 6,
            Self::ContractViolation => 70,
            Self::UserAbort => 130,
        }
    }
}

/// A failed command, ready to be reported on stderr.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub kind: OutcomeKind,
    /// One-line summary.
    pub message: String,
    /// What to try next, if there is anything useful to say.
    pub suggestion: Option<String>,
}

/// Map a `ScandexError` to the outcome the command exits with.
pub fn outcome_of(err: &ScandexError) -> Outcome {
    match err {
        ScandexError::InvalidIdRange { .. } => Outcome {
            kind: OutcomeKind::InvalidInput,
            message: err.to_string(),
            suggestion: Some(
                "Ids look like 5, 5+, 5++, 1203-05, 12# or digital; separate several with commas."
                    .into(),
            ),
        },

        ScandexError::ContractViolation(_) => Outcome {
            kind: OutcomeKind::ContractViolation,
            message: err.to_string(),
            suggestion: Some("This is a bug; please report it with the command line used.".into()),
        },

        // Normally only logged, but callers may still surface it.
        ScandexError::MalformedScanFilename { .. } => Outcome {
            kind: OutcomeKind::InvalidInput,
            message: err.to_string(),
            suggestion: Some("Rename the file to [YYYY-MM-DD_]<id>[_description].<ext>.".into()),
        },

        ScandexError::NothingFound(_) => Outcome {
            kind: OutcomeKind::NothingFound,
            message: err.to_string(),
            suggestion: Some("Check the id with `scandex by-id --ids <id>`.".into()),
        },

        ScandexError::NothingToMerge(_) => Outcome {
            kind: OutcomeKind::NothingToDo,
            message: err.to_string(),
            suggestion: None,
        },

        ScandexError::DuplicatesFound(_) => Outcome {
            kind: OutcomeKind::DuplicatesFound,
            message: err.to_string(),
            suggestion: Some("Merge or renumber the scans listed above.".into()),
        },

        ScandexError::ExternalTool { program, .. } => Outcome {
            kind: OutcomeKind::ExternalTool,
            message: err.to_string(),
            suggestion: Some(format!("Run {program} by hand on the same file to see the full error.")),
        },

        ScandexError::ToolUnavailable(program) => Outcome {
            kind: OutcomeKind::ExternalTool,
            message: err.to_string(),
            suggestion: Some(format!("Install {program} and make sure it is on PATH.")),
        },

        ScandexError::UnsupportedDocument(_) => Outcome {
            kind: OutcomeKind::Failure,
            message: err.to_string(),
            suggestion: Some("Run `scandex convert` first so every scan is a PDF.".into()),
        },

        ScandexError::UserAbort => Outcome {
            kind: OutcomeKind::UserAbort,
            message: "Aborted by user".into(),
            suggestion: None,
        },

        ScandexError::Config(_) | ScandexError::Serialization(_) => Outcome {
            kind: OutcomeKind::Failure,
            message: err.to_string(),
            suggestion: Some(format!(
                "Fix or remove {} in the archive root.",
                crate::config::CONFIG_FILENAME
            )),
        },

        ScandexError::PdfError(_) | ScandexError::Io(_) => Outcome {
            kind: OutcomeKind::Failure,
            message: err.to_string(),
            suggestion: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_is_invalid_input() {
        let err = ScandexError::invalid_id("x", "expected a sheet number");
        assert_eq!(outcome_of(&err).kind.exit_code(), 2);
    }

    #[test]
    fn duplicates_exit_with_one() {
        let outcome = outcome_of(&ScandexError::DuplicatesFound(3));
        assert_eq!(outcome.kind, OutcomeKind::DuplicatesFound);
        assert_eq!(outcome.kind.exit_code(), 1);
    }

    #[test]
    fn external_tool_failures_have_their_own_code() {
        let err = ScandexError::ExternalTool {
            program: "ocrmypdf".into(),
            status: "exit status: 2".into(),
            stderr: String::new(),
        };
        let outcome = outcome_of(&err);
        assert_eq!(outcome.kind, OutcomeKind::ExternalTool);
        assert!(outcome.suggestion.unwrap().contains("ocrmypdf"));
        assert_eq!(
            outcome_of(&ScandexError::ToolUnavailable("tesseract".into())).kind,
            OutcomeKind::ExternalTool
        );
    }

    #[test]
    fn user_abort_is_distinct() {
        let outcome = outcome_of(&ScandexError::UserAbort);
        assert_eq!(outcome.kind.exit_code(), 130);
        assert_eq!(outcome.message, "Aborted by user");
    }

    #[test]
    fn exit_codes_are_unique() {
        let kinds = [
            OutcomeKind::DuplicatesFound,
            OutcomeKind::InvalidInput,
            OutcomeKind::NothingFound,
            OutcomeKind::NothingToDo,
            OutcomeKind::ExternalTool,
            OutcomeKind::Failure,
            OutcomeKind::ContractViolation,
            OutcomeKind::UserAbort,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(OutcomeKind::exit_code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }
}
