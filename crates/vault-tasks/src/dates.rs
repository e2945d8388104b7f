//! Date expression resolution and comparison.
//!
//! Query lines carry either a fixed relative phrase (`today`, `in two weeks`)
//! or an absolute `YYYY-MM-DD` date. Relative phrases are resolved against an
//! explicit reference date so results are reproducible.

use std::fmt;

use chrono::{Duration, Local, NaiveDate};

/// Relative phrases and their offset in days from the reference date.
const RELATIVE_PHRASES: &[(&str, i64)] = &[
    ("today", 0),
    ("tomorrow", 1),
    ("yesterday", -1),
    ("in one week", 7),
    ("in two weeks", 14),
];

/// Smallest and largest four-digit years accepted in dates.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// How a task date is compared against a target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateOperator {
    /// Strictly earlier than the target.
    Before,
    /// Strictly later than the target.
    After,
    /// Same calendar day as the target.
    On,
}

impl DateOperator {
    /// Parses an operator keyword (case-insensitive).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_lowercase().as_str() {
            "before" => Some(DateOperator::Before),
            "after" => Some(DateOperator::After),
            "on" => Some(DateOperator::On),
            _ => None,
        }
    }

    /// Query keyword for this operator.
    pub fn keyword(self) -> &'static str {
        match self {
            DateOperator::Before => "before",
            DateOperator::After => "after",
            DateOperator::On => "on",
        }
    }

    /// Applies the operator. An absent task date never matches.
    pub fn matches(self, task_date: Option<NaiveDate>, target: NaiveDate) -> bool {
        let Some(date) = task_date else {
            return false;
        };

        match self {
            DateOperator::Before => date < target,
            DateOperator::After => date > target,
            DateOperator::On => date == target,
        }
    }
}

impl fmt::Display for DateOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Resolves a date expression relative to the current local date.
pub fn resolve(expression: &str) -> Option<NaiveDate> {
    resolve_from(expression, Local::now().date_naive())
}

/// Resolves a date expression relative to `reference`.
///
/// Matching is case-insensitive and ignores surrounding whitespace. Returns
/// `None` for anything that is neither a known phrase nor a valid date.
pub fn resolve_from(expression: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let normalized = expression.trim().to_lowercase();

    if let Some((_, offset)) = RELATIVE_PHRASES
        .iter()
        .find(|(phrase, _)| *phrase == normalized)
    {
        return reference.checked_add_signed(Duration::days(*offset));
    }

    parse_iso_date(&normalized)
}

/// Compares an optional task date with a target using an operator keyword.
///
/// Unknown operators and absent task dates both yield `false`.
pub fn compare(task_date: Option<NaiveDate>, operator: &str, target: NaiveDate) -> bool {
    DateOperator::from_keyword(operator).is_some_and(|op| op.matches(task_date, target))
}

/// Parses a `YYYY-MM-DD` string component by component.
///
/// Each component must be an integer; impossible calendar dates and years
/// outside `1..=9999` are rejected.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('-');
    let year = parts
        .next()?
        .parse::<i32>()
        .ok()
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}
