// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signals derived from the extracted text of a scan: which date the document
// most likely carries, and which words could serve as its title.
//
// Everything here is a pure function of the text, so results can be computed
// from an immutable snapshot and cached per record by the caller.

pub mod dates;
pub mod title;
