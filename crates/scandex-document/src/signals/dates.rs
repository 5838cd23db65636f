// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document dates from extracted text.
//
// A letter typically mentions several dates: when it was written, deadlines,
// contract start dates, the customer's birthday. `date_candidates` finds every
// date-like substring, `resolve_dates` orders them by how likely each one is
// the date of the document itself:
//
// 1. Very old dates are peeled off as outliers while dropping the earliest one
//    shrinks the remaining span to less than half.
// 2. The remaining dates are ranked by distance to their mean shifted by 20 %
//    of their span towards the most recent date, since documents are dated
//    when they are finished rather than when they were first referenced.
// 3. The outliers follow, most recent first.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Rendering used for dates in file names and suggestions.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Share of the span the target is moved towards the newest date.
const RECENCY_BIAS: f64 = 0.2;

static CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d{2,4}-\d{1,2}-\d{1,2}|\d{1,2}\.\d{1,2}\.\d{2,4}|\d{1,2}\.\s+\p{L}+\s+\d{2,4})",
    )
    .expect("candidate pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// The shapes a candidate is tried against, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTemplate {
    /// `2024-05-01`
    IsoFullYear,
    /// `24-05-01`
    IsoShortYear,
    /// `01.05.2024`
    EuropeanFullYear,
    /// `01.05.24`
    EuropeanShortYear,
    /// `1. Mai 2024`, `1. May 2024`, `1. Dez 2024`
    NamedMonthFullYear,
    /// `1. Mai 24`
    NamedMonthShortYear,
}

impl DateTemplate {
    pub const ALL: [DateTemplate; 6] = [
        Self::IsoFullYear,
        Self::IsoShortYear,
        Self::EuropeanFullYear,
        Self::EuropeanShortYear,
        Self::NamedMonthFullYear,
        Self::NamedMonthShortYear,
    ];

    fn pattern(&self) -> &'static Regex {
        static PATTERNS: LazyLock<[Regex; 6]> = LazyLock::new(|| {
            [
                r"^(?<y>\d{4})-(?<m>\d{1,2})-(?<d>\d{1,2})$",
                r"^(?<y>\d{2})-(?<m>\d{1,2})-(?<d>\d{1,2})$",
                r"^(?<d>\d{1,2})\.(?<m>\d{1,2})\.(?<y>\d{4})$",
                r"^(?<d>\d{1,2})\.(?<m>\d{1,2})\.(?<y>\d{2})$",
                r"^(?<d>\d{1,2})\. (?<month>\p{L}+) (?<y>\d{4})$",
                r"^(?<d>\d{1,2})\. (?<month>\p{L}+) (?<y>\d{2})$",
            ]
            .map(|pattern| Regex::new(pattern).expect("date template is valid"))
        });
        &PATTERNS[*self as usize]
    }

    /// Interpret `candidate` with this template.
    pub fn parse(&self, candidate: &str) -> Option<NaiveDate> {
        let caps = self.pattern().captures(candidate)?;
        let day: u32 = caps["d"].parse().ok()?;
        let month = match caps.name("month") {
            Some(name) => month_from_name(name.as_str())?,
            None => caps["m"].parse().ok()?,
        };
        let year: i32 = caps["y"].parse().ok()?;
        let year = if caps["y"].len() == 2 {
            expand_short_year(year)
        } else {
            year
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Two-digit years: 69–99 are 19xx, 00–68 are 20xx.
pub fn expand_short_year(year: i32) -> i32 {
    if year >= 69 { 1900 + year } else { 2000 + year }
}

/// Month number for an English or German month name or abbreviation.
pub fn month_from_name(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().trim_end_matches('.') {
        "january" | "januar" | "jänner" | "jan" | "jän" => 1,
        "february" | "februar" | "feb" => 2,
        "march" | "märz" | "maerz" | "mar" | "mär" | "mrz" => 3,
        "april" | "apr" => 4,
        "may" | "mai" => 5,
        "june" | "juni" | "jun" => 6,
        "july" | "juli" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oktober" | "oct" | "okt" => 10,
        "november" | "nov" => 11,
        "december" | "dezember" | "dec" | "dez" => 12,
        _ => return None,
    };
    Some(month)
}

/// Interpret one candidate substring, trying every template in order.
pub fn interpret_date(candidate: &str) -> Option<NaiveDate> {
    let normalized = WHITESPACE.replace_all(candidate.trim(), " ");
    DateTemplate::ALL
        .iter()
        .find_map(|template| template.parse(&normalized))
}

/// Every distinct date mentioned in `text`, in order of first mention.
pub fn date_candidates(text: &str) -> Vec<NaiveDate> {
    let mut seen = BTreeSet::new();
    CANDIDATE
        .find_iter(text)
        .filter_map(|m| interpret_date(m.as_str()))
        .filter(|date| seen.insert(*date))
        .collect()
}

/// Order `dates` from most to least likely document date. Duplicates are
/// removed; the result is empty only if `dates` is.
pub fn resolve_dates(dates: &[NaiveDate]) -> Vec<NaiveDate> {
    let mut remaining: Vec<NaiveDate> = dates
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if remaining.len() <= 1 {
        return remaining;
    }

    // `remaining` is ascending, so the minimum is always at the front.
    let mut outliers = Vec::new();
    while remaining.len() > 1 {
        let newest = remaining[remaining.len() - 1];
        let span = (newest - remaining[0]).num_days();
        let span_without_oldest = (newest - remaining[1]).num_days();
        if span_without_oldest * 2 < span {
            outliers.push(remaining.remove(0));
        } else {
            break;
        }
    }

    let oldest = remaining[0];
    let offsets: Vec<f64> = remaining
        .iter()
        .map(|date| (*date - oldest).num_days() as f64)
        .collect();
    let mean = offsets.iter().sum::<f64>() / offsets.len() as f64;
    let span = offsets.last().copied().unwrap_or_default();
    let target = mean + span * RECENCY_BIAS;

    let mut ranked: Vec<(f64, NaiveDate)> = offsets
        .iter()
        .map(|offset| (offset - target).abs())
        .zip(remaining)
        .collect();
    // Equal distances favour the more recent date.
    ranked.sort_by(|(da, a), (db, b)| da.total_cmp(db).then_with(|| b.cmp(a)));

    ranked
        .into_iter()
        .map(|(_, date)| date)
        .chain(outliers.into_iter().rev())
        .collect()
}

/// Candidates of `text`, resolved. The head is the suggested document date.
pub fn dates_from_text(text: &str) -> Vec<NaiveDate> {
    resolve_dates(&date_candidates(text))
}

/// Render `date` as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn templates_in_order() {
        assert_eq!(interpret_date("2024-05-01"), Some(date(2024, 5, 1)));
        assert_eq!(interpret_date("24-5-1"), Some(date(2024, 5, 1)));
        assert_eq!(interpret_date("01.05.2024"), Some(date(2024, 5, 1)));
        assert_eq!(interpret_date("1.5.99"), Some(date(1999, 5, 1)));
        assert_eq!(interpret_date("1. Mai 2024"), Some(date(2024, 5, 1)));
        assert_eq!(interpret_date("1. May 2024"), Some(date(2024, 5, 1)));
        assert_eq!(interpret_date("3. März 68"), Some(date(2068, 3, 3)));
        assert_eq!(interpret_date("3. Dez 2021"), Some(date(2021, 12, 3)));
    }

    #[test]
    fn impossible_dates_are_dropped() {
        assert_eq!(interpret_date("2024-13-01"), None);
        assert_eq!(interpret_date("31.02.2024"), None);
        assert_eq!(interpret_date("123-4-5"), None);
        assert_eq!(interpret_date("1. Foo 2024"), None);
    }

    #[test]
    fn whitespace_inside_named_dates_is_normalised() {
        assert_eq!(interpret_date("1.\n  Juni\t2020"), Some(date(2020, 6, 1)));
    }

    #[test]
    fn candidates_are_distinct_and_ordered_by_mention() {
        let text = "Datum: 12.03.2023\nRechnung vom 2023-03-10, fällig am 12.03.2023; \
                    Kunde seit 1. Januar 2010.";
        assert_eq!(
            date_candidates(text),
            vec![date(2023, 3, 12), date(2023, 3, 10), date(2010, 1, 1)]
        );
    }

    #[test]
    fn no_or_one_date() {
        assert!(dates_from_text("nothing here").is_empty());
        assert_eq!(
            dates_from_text("2020-02-02 and again 02.02.2020"),
            vec![date(2020, 2, 2)]
        );
    }

    #[test]
    fn ancient_date_is_demoted() {
        let text = "born 1999-01-01; invoice 2024-05-01, due 2024-05-01, paid 2024-05-01";
        assert_eq!(
            dates_from_text(text),
            vec![date(2024, 5, 1), date(1999, 1, 1)]
        );
    }

    #[test]
    fn cluster_is_ranked_around_biased_mean() {
        let dates = [
            date(2024, 1, 10),
            date(2024, 1, 20),
            date(2024, 2, 1),
            date(2010, 6, 1),
        ];
        // Offsets 0, 10, 22: mean 10.67 plus 20 % of 22 puts the target
        // between the 20th and the 1st.
        assert_eq!(
            resolve_dates(&dates),
            vec![
                date(2024, 1, 20),
                date(2024, 2, 1),
                date(2024, 1, 10),
                date(2010, 6, 1)
            ]
        );
    }

    #[test]
    fn several_outliers_follow_most_recent_first() {
        let dates = [
            date(1950, 1, 1),
            date(1990, 1, 1),
            date(2020, 3, 1),
            date(2020, 3, 5),
        ];
        assert_eq!(
            resolve_dates(&dates),
            vec![
                date(2020, 3, 5),
                date(2020, 3, 1),
                date(1990, 1, 1),
                date(1950, 1, 1)
            ]
        );
    }

    #[test]
    fn evenly_spread_dates_are_not_peeled() {
        let dates = [date(2020, 1, 1), date(2020, 1, 11), date(2020, 1, 21)];
        let resolved = resolve_dates(&dates);
        assert_eq!(resolved.len(), 3);
        // Target: mean 10 + 4 = day 14 → the 11th, then the 21st, then the 1st.
        assert_eq!(
            resolved,
            vec![date(2020, 1, 11), date(2020, 1, 21), date(2020, 1, 1)]
        );
    }

    #[test]
    fn ranking_uses_biased_target() {
        // Offsets 0, 4, 10: mean 4.67 + 2 = 6.67, so the 5th is closest.
        let dates = [date(2020, 1, 1), date(2020, 1, 5), date(2020, 1, 11)];
        assert_eq!(
            resolve_dates(&dates),
            vec![date(2020, 1, 5), date(2020, 1, 11), date(2020, 1, 1)]
        );
    }

    #[test]
    fn equal_distance_prefers_recent() {
        // Offsets 0, 2, 10: mean 4 + 2 = 6, four days from both the 3rd and
        // the 11th.
        let dates = [date(2020, 1, 1), date(2020, 1, 3), date(2020, 1, 11)];
        assert_eq!(
            resolve_dates(&dates),
            vec![date(2020, 1, 11), date(2020, 1, 3), date(2020, 1, 1)]
        );
    }

    #[test]
    fn month_names() {
        assert_eq!(month_from_name("Oktober"), Some(10));
        assert_eq!(month_from_name("OCT"), Some(10));
        assert_eq!(month_from_name("Sept."), Some(9));
        assert_eq!(month_from_name("Jänner"), Some(1));
        assert_eq!(month_from_name("Brumaire"), None);
    }

    #[test]
    fn short_years_pivot_at_69() {
        assert_eq!(expand_short_year(68), 2068);
        assert_eq!(expand_short_year(69), 1969);
        assert_eq!(expand_short_year(0), 2000);
    }

    #[test]
    fn format_is_iso() {
        assert_eq!(format_date(date(2024, 5, 1)), "2024-05-01");
    }
}
