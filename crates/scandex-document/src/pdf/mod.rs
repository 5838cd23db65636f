// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF handling — reading embedded text and merging scans into one document.

pub mod reader;

pub use reader::PdfReader;
