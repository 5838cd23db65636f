// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scandex — Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod id_range;
pub mod outcome;
pub mod types;

pub use config::ScandexConfig;
pub use error::ScandexError;
pub use id_range::{IdExpr, IdRange};
pub use types::*;
