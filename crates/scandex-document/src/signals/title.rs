// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Title words from word frequencies.
//
// Words are ranked from least to most frequent. Letterheads, addresses, and
// legal footers repeat on every page and dominate the counts, so the rare
// words at the front of the ranking are the ones that tell documents apart.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Number of ranked words joined into a suggested title.
pub const TITLE_WORD_COUNT: usize = 6;

/// Words shorter than this (in characters) are ignored.
const MIN_WORD_LEN: usize = 3;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

/// Split `text` on runs of non-word characters, keeping words of at least
/// three characters.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    NON_WORD
        .split(text)
        .filter(|word| word.chars().count() >= MIN_WORD_LEN)
}

/// Distinct words of `text`, least frequent first. Words with equal counts
/// keep the order of their first appearance.
pub fn word_ranking(text: &str) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for word in words(text) {
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }
    // Stable sort: ties stay in first-appearance order.
    order.sort_by_key(|word| counts[word]);
    order.into_iter().map(str::to_string).collect()
}

/// Join the first [`TITLE_WORD_COUNT`] ranked words with commas.
pub fn title_from_ranking(ranking: &[String]) -> String {
    ranking
        .iter()
        .take(TITLE_WORD_COUNT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
