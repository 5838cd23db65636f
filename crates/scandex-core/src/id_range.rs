// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sheet id ranges — the canonical `IdRange` and the grammar of hand-typed id
// expressions (`5`, `5+`, `5++`, `1203-05`, `12#`, `digital`).
//
// Parsing happens in two steps: the text is first recognised as one of the
// `IdExpr` variants, then the variant is resolved into an `IdRange`. The
// arithmetic for abbreviated range ends (`merge_prefix`, `roll_over`) lives in
// pure functions so it can be tested without going through the parser.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{Result, ScandexError};

/// How far a trailing `#` widens a range on both ends.
pub const AROUND_MARGIN: i64 = 10;

/// An inclusive range of physical sheet numbers, or the digital sentinel.
///
/// Ranges order by `(first, last)`. The digital sentinel covers no sheets and
/// sorts before every range starting at sheet 0 or later; ranges widened by
/// `#` below sheet -1 sort before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdRange {
    first: i64,
    last: i64,
}

impl IdRange {
    /// The "no physical sheet" sentinel.
    pub const DIGITAL: Self = Self { first: -1, last: -1 };

    /// Build a physical range. `last` must not be below `first`.
    pub fn new(first: i64, last: i64) -> Result<Self> {
        if last < first {
            return Err(ScandexError::ContractViolation(format!(
                "IdRange invalid, last < first, {last} < {first}"
            )));
        }
        Ok(Self { first, last })
    }

    /// A range covering exactly one sheet.
    pub fn single(id: i64) -> Self {
        Self {
            first: id,
            last: id,
        }
    }

    /// A duplex pair starting at `id`.
    pub fn pair(id: i64) -> Self {
        Self {
            first: id,
            last: id.saturating_add(1),
        }
    }

    pub fn first(&self) -> i64 {
        self.first
    }

    pub fn last(&self) -> i64 {
        self.last
    }

    pub fn is_digital(&self) -> bool {
        self.last < 0
    }

    /// Number of sheets covered (zero for the digital sentinel).
    pub fn len(&self) -> u64 {
        if self.is_digital() {
            0
        } else {
            self.last.abs_diff(self.first).saturating_add(1)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sheet numbers covered, in ascending order.
    pub fn sheets(&self) -> RangeInclusive<i64> {
        if self.is_digital() {
            return RangeInclusive::new(1, 0);
        }
        self.first..=self.last
    }

    /// Whether `id` lies within this range.
    pub fn contains(&self, id: i64) -> bool {
        !self.is_digital() && self.first <= id && id <= self.last
    }

    /// Widen to whole duplex pairs: the start becomes odd, the end even.
    /// An end at `i64::MAX` stays where it is.
    pub fn align(&self) -> Self {
        if self.is_digital() {
            return *self;
        }
        let first = if self.first.rem_euclid(2) == 0 {
            self.first.saturating_sub(1)
        } else {
            self.first
        };
        let last = if self.last.rem_euclid(2) == 1 {
            self.last.saturating_add(1)
        } else {
            self.last
        };
        Self { first, last }
    }

    /// Widen by `margin` sheets on both ends. `None` if either end leaves
    /// the `i64` range.
    pub fn widen(&self, margin: i64) -> Option<Self> {
        if self.is_digital() {
            return Some(*self);
        }
        Some(Self {
            first: self.first.checked_sub(margin)?,
            last: self.last.checked_add(margin)?,
        })
    }

    /// Human form: `N`, `N+` for a pair, `N-M` otherwise, each number
    /// left-padded with zeros to `width`.
    pub fn render(&self, width: usize) -> String {
        if self.is_digital() {
            return "digital".to_string();
        }
        if self.first == self.last {
            format!("{:0width$}", self.first)
        } else if self.first == self.last - 1 {
            format!("{:0width$}+", self.first)
        } else {
            format!("{:0width$}-{:0width$}", self.first, self.last)
        }
    }

    /// Smallest physical range covering all given ranges. Digital ranges are
    /// ignored; `None` if no physical range was given.
    pub fn enclosing(ranges: impl IntoIterator<Item = IdRange>) -> Option<Self> {
        ranges
            .into_iter()
            .filter(|range| !range.is_digital())
            .fold(None, |acc: Option<Self>, range| match acc {
                None => Some(range),
                Some(acc) => Some(Self {
                    first: acc.first.min(range.first),
                    last: acc.last.max(range.last),
                }),
            })
    }

    /// Parse a comma-separated list of id expressions. A single invalid
    /// element rejects the whole list.
    pub fn parse_list(input: &str) -> Result<Vec<Self>> {
        input
            .split(',')
            .map(|part| part.trim().parse())
            .collect()
    }
}

impl fmt::Display for IdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Padding applies to the whole rendered string (`{:>12}`).
        f.pad(&self.render(0))
    }
}

impl FromStr for IdRange {
    type Err = ScandexError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<IdExpr>()?.resolve(s)
    }
}

impl IntoIterator for IdRange {
    type Item = i64;
    type IntoIter = RangeInclusive<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets()
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// A recognised id expression, before arithmetic is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdExpr {
    /// `d` or `digital`.
    Digital,
    /// `N`
    Simple(i64),
    /// `N+`: this sheet and the next one.
    FollowingOne(i64),
    /// `N++`: this sheet and the next three (two duplex pairs).
    FollowingThree(i64),
    /// `A-B`, kept as digit strings because the width of `B` matters.
    ExplicitRange { begin: String, end: String },
    /// Any of the numeric forms followed by `#`.
    AroundMargin(Box<IdExpr>),
}

impl FromStr for IdExpr {
    type Err = ScandexError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "d" || s == "digital" {
            return Ok(Self::Digital);
        }
        let (body, around) = match s.strip_suffix('#') {
            Some(body) => (body, true),
            None => (s, false),
        };

        let digit_count = body.bytes().take_while(u8::is_ascii_digit).count();
        if digit_count == 0 {
            return Err(ScandexError::invalid_id(s, "expected a sheet number or \"digital\""));
        }
        let (digits, rest) = body.split_at(digit_count);

        let expr = match rest {
            "" => Self::Simple(parse_number(s, digits)?),
            "+" => Self::FollowingOne(parse_number(s, digits)?),
            "++" => Self::FollowingThree(parse_number(s, digits)?),
            _ => match rest.strip_prefix('-') {
                Some(end) if !end.is_empty() && end.bytes().all(|b| b.is_ascii_digit()) => {
                    Self::ExplicitRange {
                        begin: digits.to_string(),
                        end: end.to_string(),
                    }
                }
                _ => {
                    return Err(ScandexError::invalid_id(
                        s,
                        format!("unexpected \"{rest}\" after sheet number"),
                    ));
                }
            },
        };

        Ok(if around {
            Self::AroundMargin(Box::new(expr))
        } else {
            expr
        })
    }
}

impl IdExpr {
    /// Apply the expression's arithmetic. `input` is only used for error
    /// messages.
    pub fn resolve(&self, input: &str) -> Result<IdRange> {
        let overflow = || ScandexError::invalid_id(input, "sheet number out of range");
        match self {
            Self::Digital => Ok(IdRange::DIGITAL),
            Self::Simple(id) => Ok(IdRange::single(*id)),
            Self::FollowingOne(id) => Ok(IdRange {
                first: *id,
                last: id.checked_add(1).ok_or_else(overflow)?,
            }),
            Self::FollowingThree(id) => Ok(IdRange {
                first: *id,
                last: id.checked_add(3).ok_or_else(overflow)?,
            }),
            Self::ExplicitRange { begin, end } => {
                let merged = merge_prefix(begin, end);
                let first = parse_number(input, begin)?;
                let mut last = parse_number(input, &merged)?;
                if end.len() < begin.len() {
                    last = roll_over(first, last, end.len() as u32).ok_or_else(overflow)?;
                }
                if last < first {
                    return Err(ScandexError::invalid_id(
                        input,
                        format!("IdRange invalid, last < first, {last} < {first}"),
                    ));
                }
                Ok(IdRange { first, last })
            }
            Self::AroundMargin(inner) => {
                let range = inner.resolve(input)?;
                if range.is_digital() {
                    return Err(ScandexError::invalid_id(input, "\"#\" needs a sheet number"));
                }
                range.widen(AROUND_MARGIN).ok_or_else(overflow)
            }
        }
    }
}

/// Complete an abbreviated range end with the leading digits of `begin`:
/// `("1203", "05")` gives `"1205"`. Ends at least as long as `begin` are
/// returned unchanged.
pub fn merge_prefix(begin: &str, end: &str) -> String {
    if end.len() >= begin.len() {
        return end.to_string();
    }
    let prefix_len = begin.len() - end.len();
    format!("{}{}", &begin[..prefix_len], end)
}

/// Correct a prefix-merged end that fell below `begin` by carrying into the
/// shared prefix: `(1298, 1202, 2)` gives `1302`. Ends already at or above
/// `begin` are returned unchanged.
pub fn roll_over(begin: i64, end: i64, end_digits: u32) -> Option<i64> {
    if end >= begin {
        return Some(end);
    }
    10_i64
        .checked_pow(end_digits)
        .and_then(|carry| end.checked_add(carry))
}

fn parse_number(input: &str, digits: &str) -> Result<i64> {
    digits
        .parse()
        .map_err(|_| ScandexError::invalid_id(input, "sheet number out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> IdRange {
        s.parse().expect("valid id expression")
    }

    fn range(first: i64, last: i64) -> IdRange {
        IdRange::new(first, last).expect("valid range")
    }

    #[test]
    fn parses_simple_forms() {
        assert_eq!(parse("5"), range(5, 5));
        assert_eq!(parse("5+"), range(5, 6));
        assert_eq!(parse("5++"), range(5, 8));
        assert_eq!(parse("12-40"), range(12, 40));
    }

    #[test]
    fn abbreviated_end_inherits_prefix() {
        assert_eq!(parse("1203-05"), range(1203, 1205));
        assert_eq!(parse("1203-5"), range(1203, 1205));
    }

    #[test]
    fn abbreviated_end_rolls_over() {
        assert_eq!(parse("1298-02"), range(1298, 1302));
        assert_eq!(parse("99-3"), range(99, 103));
    }

    #[test]
    fn longer_end_is_taken_literally() {
        assert_eq!(parse("5-123"), range(5, 123));
    }

    #[test]
    fn around_marker_widens_by_margin() {
        assert_eq!(parse("5#"), range(-5, 15));
        assert_eq!(parse("5+#"), range(-5, 16));
        assert_eq!(parse("100-05#"), range(90, 115));
    }

    #[test]
    fn around_marker_near_the_top_is_out_of_range() {
        let err = "9223372036854775800#".parse::<IdRange>().unwrap_err();
        assert!(
            matches!(err, ScandexError::InvalidIdRange { .. }),
            "got {err:?}"
        );
        assert_eq!(range(i64::MAX - 3, i64::MAX).widen(1), None);
        assert_eq!(range(i64::MIN, 0).widen(1), None);
        assert_eq!(IdRange::DIGITAL.widen(5), Some(IdRange::DIGITAL));
    }

    #[test]
    fn length_of_the_widest_range() {
        let widest = parse("0-9223372036854775807");
        assert_eq!(widest.len(), 9_223_372_036_854_775_808);
        assert!(!widest.is_empty());
        assert_eq!(widest.align(), range(-1, i64::MAX));
        assert_eq!(IdRange::pair(i64::MAX), range(i64::MAX, i64::MAX));
    }

    #[test]
    fn digital_forms() {
        assert!(parse("digital").is_digital());
        assert!(parse("d").is_digital());
        assert_eq!(parse("d"), IdRange::DIGITAL);
    }

    #[test]
    fn digital_takes_no_around_marker() {
        assert!("d#".parse::<IdRange>().is_err());
        assert!("digital#".parse::<IdRange>().is_err());
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "abc", "5-", "-5", "5+++", "5 ", "5-a", "5##", "dig", "+5"] {
            let err = input.parse::<IdRange>().unwrap_err();
            assert!(
                matches!(err, ScandexError::InvalidIdRange { .. }),
                "{input:?} should be an invalid id, got {err:?}"
            );
        }
    }

    #[test]
    fn descending_range_is_invalid() {
        let err = "15-12".parse::<IdRange>().unwrap_err();
        assert!(matches!(err, ScandexError::InvalidIdRange { .. }));
    }

    #[test]
    fn expressions_are_tagged() {
        assert_eq!("7".parse::<IdExpr>().unwrap(), IdExpr::Simple(7));
        assert_eq!("7+".parse::<IdExpr>().unwrap(), IdExpr::FollowingOne(7));
        assert_eq!("7++".parse::<IdExpr>().unwrap(), IdExpr::FollowingThree(7));
        assert_eq!(
            "7#".parse::<IdExpr>().unwrap(),
            IdExpr::AroundMargin(Box::new(IdExpr::Simple(7)))
        );
        assert_eq!(
            "0012-4".parse::<IdExpr>().unwrap(),
            IdExpr::ExplicitRange {
                begin: "0012".into(),
                end: "4".into()
            }
        );
    }

    #[test]
    fn merge_prefix_cases() {
        assert_eq!(merge_prefix("1203", "05"), "1205");
        assert_eq!(merge_prefix("1203", "5"), "1205");
        assert_eq!(merge_prefix("12", "34"), "34");
        assert_eq!(merge_prefix("12", "345"), "345");
    }

    #[test]
    fn roll_over_cases() {
        assert_eq!(roll_over(1298, 1202, 2), Some(1302));
        assert_eq!(roll_over(1203, 1205, 2), Some(1205));
        assert_eq!(roll_over(19, 11, 1), Some(21));
    }

    #[test]
    fn align_widens_to_pairs() {
        assert_eq!(range(1, 2).align(), range(1, 2));
        assert_eq!(range(1, 3).align(), range(1, 4));
        assert_eq!(range(4, 4).align(), range(3, 4));
        assert_eq!(range(4, 8).align(), range(3, 8));
        assert_eq!(range(4, 7).align(), range(3, 8));
    }

    #[test]
    fn align_is_idempotent() {
        for first in -12..12 {
            for last in first..first + 7 {
                let once = range(first, last).align();
                assert_eq!(once.align(), once, "align({first}, {last})");
            }
        }
        assert_eq!(IdRange::DIGITAL.align(), IdRange::DIGITAL);
    }

    #[test]
    fn render_forms() {
        assert_eq!(range(5, 5).render(0), "5");
        assert_eq!(range(5, 6).render(0), "5+");
        assert_eq!(range(5, 8).render(0), "5-8");
        assert_eq!(range(5, 6).render(6), "000005+");
        assert_eq!(range(5, 8).render(3), "005-008");
        assert_eq!(IdRange::DIGITAL.render(6), "digital");
    }

    #[test]
    fn render_survives_reparse() {
        for input in ["5", "5+", "5++", "1203-05", "1298-02", "17-170", "digital"] {
            let rendered = parse(input).render(0);
            assert_eq!(parse(&rendered).render(0), rendered, "{input}");
        }
    }

    #[test]
    fn display_honours_padding() {
        assert_eq!(format!("{:>6}", range(5, 6)), "    5+");
        assert_eq!(format!("{}", range(3, 9)), "3-9");
    }

    #[test]
    fn enclosing_takes_extremes() {
        let ranges = [range(3, 4), range(5, 12), range(7, 8)];
        assert_eq!(IdRange::enclosing(ranges), Some(range(3, 12)));
        assert_eq!(
            IdRange::enclosing([IdRange::DIGITAL, range(9, 10)]),
            Some(range(9, 10))
        );
        assert_eq!(IdRange::enclosing([IdRange::DIGITAL]), None);
        assert_eq!(IdRange::enclosing([]), None);
    }

    #[test]
    fn iteration_and_length() {
        assert_eq!(range(3, 6).into_iter().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
        assert_eq!(range(3, 6).len(), 4);
        assert_eq!(IdRange::DIGITAL.sheets().count(), 0);
        assert!(IdRange::DIGITAL.is_empty());
    }

    #[test]
    fn ordering_is_first_then_last() {
        let mut ranges = vec![range(5, 8), range(3, 4), range(5, 6), IdRange::DIGITAL];
        ranges.sort();
        assert_eq!(
            ranges,
            vec![IdRange::DIGITAL, range(3, 4), range(5, 6), range(5, 8)]
        );

        let mut widened = vec![parse("0"), IdRange::DIGITAL, parse("5#")];
        widened.sort();
        assert_eq!(widened, vec![range(-5, 15), IdRange::DIGITAL, range(0, 0)]);
    }

    #[test]
    fn list_parsing() {
        assert_eq!(
            IdRange::parse_list("5, 12-14,d").unwrap(),
            vec![range(5, 5), range(12, 14), IdRange::DIGITAL]
        );
        assert!(IdRange::parse_list("5,x").is_err());
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        assert!(matches!(
            IdRange::new(4, 3),
            Err(ScandexError::ContractViolation(_))
        ));
    }
}
