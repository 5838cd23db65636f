// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scandex catalog — every scan under an archive root, indexed by sheet.
//
// The catalog is built once per invocation by walking the archive. Text,
// word rankings, and dates derived from a scan's content are computed on
// first use and cached on the record.

pub mod catalog;
pub mod filename;
pub mod index;
pub mod memo;
pub mod record;
pub mod suggest;

pub use catalog::Catalog;
pub use filename::{NameMatch, ScanName};
pub use index::{DuplicateGroup, PerIdIndex};
pub use memo::Memo;
pub use record::ScanRecord;
pub use suggest::suggest_dates;
