// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-sheet index over a catalog.
//
// Physical records are swept into disjoint segments of consecutive sheets
// covered by the same set of records, so the index grows with the number of
// records, not with the highest sheet number. Digital records are kept apart.
// Duplicate and gap detection only look at sheets from 1 up.

use std::collections::BTreeSet;

use scandex_core::IdRange;
use tracing::{debug, instrument};

use crate::record::ScanRecord;

/// Sheets claimed by more than one scan, with the scans claiming them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup<'a> {
    pub sheets: IdRange,
    pub records: Vec<&'a ScanRecord>,
}

/// Sheets `first..=last`, all covered by exactly `records`.
#[derive(Debug)]
struct Segment {
    first: i64,
    last: i64,
    records: Vec<usize>,
}

#[derive(Debug)]
pub struct PerIdIndex<'a> {
    records: &'a [ScanRecord],
    digital: Vec<usize>,
    /// Sorted, disjoint, never empty.
    segments: Vec<Segment>,
    highest: i64,
}

impl<'a> PerIdIndex<'a> {
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn build(records: &'a [ScanRecord]) -> Self {
        let mut digital = Vec::new();
        let mut highest = 0;
        // (sheet, opens, record): a record opens at its first sheet and
        // closes after its last.
        let mut events: Vec<(i64, bool, usize)> = Vec::with_capacity(records.len() * 2);
        for (position, record) in records.iter().enumerate() {
            let range = record.id_range();
            if range.is_digital() {
                digital.push(position);
                continue;
            }
            highest = highest.max(range.last());
            events.push((range.first(), true, position));
            if let Some(end) = range.last().checked_add(1) {
                events.push((end, false, position));
            }
        }
        events.sort_unstable();

        let mut active = BTreeSet::new();
        let mut segments = Vec::new();
        let mut events = events.into_iter().peekable();
        while let Some((sheet, opens, position)) = events.next() {
            if opens {
                active.insert(position);
            } else {
                active.remove(&position);
            }
            let last = match events.peek() {
                Some(&(next, _, _)) if next == sheet => continue,
                Some(&(next, _, _)) => next - 1,
                None => i64::MAX,
            };
            if !active.is_empty() {
                segments.push(Segment {
                    first: sheet,
                    last,
                    records: active.iter().copied().collect(),
                });
            }
        }

        debug!(highest, segments = segments.len(), "Per-sheet index built");
        Self {
            records,
            digital,
            segments,
            highest,
        }
    }

    /// Highest occupied sheet, 0 for an archive without physical scans.
    pub fn highest_id(&self) -> i64 {
        self.highest
    }

    /// Records covering any sheet of `ranges`, each once, in catalog order.
    ///
    /// A digital range selects the digital records. Sheets nobody covers
    /// simply match nothing.
    pub fn lookup(&self, ranges: &[IdRange]) -> Vec<&'a ScanRecord> {
        let mut hits = BTreeSet::new();
        for range in ranges {
            if range.is_digital() {
                hits.extend(self.digital.iter().copied());
                continue;
            }
            let start = self
                .segments
                .partition_point(|segment| segment.last < range.first());
            for segment in self.segments[start..]
                .iter()
                .take_while(|segment| segment.first <= range.last())
            {
                hits.extend(segment.records.iter().copied());
            }
        }
        hits.into_iter().map(|position| &self.records[position]).collect()
    }

    /// Physical sheets covered by two or more records.
    ///
    /// Consecutive sheets shared by the same set of records form one group,
    /// so a scan filed twice is reported once.
    pub fn duplicates(&self) -> Vec<DuplicateGroup<'a>> {
        self.segments
            .iter()
            .filter(|segment| segment.records.len() >= 2 && segment.last >= 1)
            .filter_map(|segment| {
                let sheets = IdRange::new(segment.first.max(1), segment.last).ok()?;
                Some(DuplicateGroup {
                    sheets,
                    records: segment.records.iter().map(|&p| &self.records[p]).collect(),
                })
            })
            .collect()
    }

    /// Duplex pairs with nothing on their front side, in ascending order.
    ///
    /// Only odd sheets are checked; an empty back side is a blank page, not
    /// a lost scan. Pairs are produced lazily from the gaps between covered
    /// sheets.
    pub fn missing(&self) -> impl Iterator<Item = IdRange> + '_ {
        self.gaps().into_iter().flat_map(|(first, last)| {
            let front = if first % 2 == 0 { first + 1 } else { first };
            (front..=last).step_by(2).map(IdRange::pair)
        })
    }

    /// First id for a new scan: the front of the pair after the highest
    /// sheet. Always odd.
    pub fn next_id(&self) -> i64 {
        let next = self.highest.saturating_add(1);
        if next % 2 == 0 { next + 1 } else { next }
    }

    /// Uncovered stretches of `1..=highest`, as inclusive bounds.
    fn gaps(&self) -> Vec<(i64, i64)> {
        let mut gaps = Vec::new();
        let mut cursor = 1;
        for segment in &self.segments {
            if segment.last < cursor {
                continue;
            }
            if segment.first > cursor {
                gaps.push((cursor, segment.first - 1));
            }
            match segment.last.checked_add(1) {
                Some(next) => cursor = next,
                None => return gaps,
            }
        }
        if cursor <= self.highest {
            gaps.push((cursor, self.highest));
        }
        gaps
    }
}
