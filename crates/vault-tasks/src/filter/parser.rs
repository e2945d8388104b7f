//! Line-oriented parser for task queries.

use chrono::{Local, NaiveDate};

use super::ast::{Filter, PriorityComparison, StatusCondition};
use super::error::{FilterError, FilterResult, QueryError};
use crate::dates::{resolve_from, DateOperator};
use crate::task::{DateField, PriorityLevel};

/// The outcome of parsing a whole query.
///
/// Either every line produced a filter, or the query carries an error naming
/// each failing line and no filters at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    filters: Vec<Filter>,
    error: Option<QueryError>,
}

impl Query {
    /// Filters in line order. Empty when the query failed.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// The aggregated parse error, if any line failed.
    pub fn error(&self) -> Option<&QueryError> {
        self.error.as_ref()
    }

    /// Returns true when every line parsed.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into the filter list or the parse error.
    pub fn into_result(self) -> Result<Vec<Filter>, QueryError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.filters),
        }
    }
}

/// Parser for the task query language.
///
/// Each non-empty line of a query is one statement:
///
/// ```text
/// statement ::= "done" | "not done"
///             | field ("before" | "after" | "on") date-expr
///             | "happens" ("before" | "after" | "on") date-expr
///             | ("has" | "no") presence-field "date"
///             | "priority is" ["not" | "above" | "below"] level
///             | "(" statement ")" ("AND" | "OR") "(" statement ")"
/// field          ::= "due" | "scheduled" | "start" | "done"
/// presence-field ::= field | "created" | "cancelled"
/// level          ::= "highest" | "high" | "medium" | "none" | "low" | "lowest"
/// date-expr      ::= "today" | "tomorrow" | "yesterday"
///                  | "in one week" | "in two weeks" | YYYY-MM-DD
/// ```
///
/// Keywords are case-insensitive. Relative dates resolve against the
/// parser's reference date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use vault_tasks::filter::QueryParser;
///
/// let parser = QueryParser::new(NaiveDate::from_ymd_opt(2025, 11, 12).unwrap());
/// let query = parser.parse_query("not done\nhappens before today");
/// assert_eq!(query.filters().len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryParser {
    reference: NaiveDate,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl QueryParser {
    /// Creates a parser resolving relative dates against `reference`.
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    /// The date that `today` resolves to.
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Parses a multi-line query.
    ///
    /// Blank lines are skipped. If any line fails, the returned query holds
    /// no filters and an error listing every failing line. A query with no
    /// statements parses to an empty filter list, which matches everything.
    pub fn parse_query(&self, source: &str) -> Query {
        let mut filters = Vec::new();
        let mut failed = Vec::new();

        for line in source.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match self.parse_line(line) {
                Ok(filter) => filters.push(filter),
                Err(_) => failed.push(line.to_string()),
            }
        }

        if failed.is_empty() {
            Query {
                filters,
                error: None,
            }
        } else {
            Query {
                filters: Vec::new(),
                error: Some(QueryError { lines: failed }),
            }
        }
    }

    /// Parses a single statement into a filter.
    ///
    /// Statement forms are tried in a fixed order and the first one whose
    /// shape matches decides the outcome.
    pub fn parse_line(&self, line: &str) -> FilterResult<Filter> {
        let line = line.trim();
        if line.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        if line.eq_ignore_ascii_case("done") {
            return Ok(Filter::Status(StatusCondition::Done));
        }
        if line.eq_ignore_ascii_case("not done") {
            return Ok(Filter::Status(StatusCondition::NotDone));
        }

        if let Some(filter) = self.parse_date_comparison(line) {
            return filter;
        }
        if let Some(filter) = self.parse_happens(line) {
            return filter;
        }
        if let Some(filter) = parse_presence(line) {
            return Ok(filter);
        }
        if let Some(clause) = priority_clause(line) {
            return parse_priority_clause(clause);
        }
        if let Some(filter) = self.parse_boolean(line) {
            return filter;
        }

        Err(FilterError::unknown_statement(line))
    }

    /// `<field> <operator> <date-expr>`
    fn parse_date_comparison(&self, line: &str) -> Option<FilterResult<Filter>> {
        let (word, rest) = split_word(line)?;
        let field = DateField::from_keyword(word).filter(|f| f.is_comparable())?;
        let (operator, expression) = split_word(rest)?;
        let operator = DateOperator::from_keyword(operator)?;

        Some(self.resolve(expression).map(|date| Filter::DateCmp {
            field,
            operator,
            date,
        }))
    }

    /// `happens <operator> <date-expr>`
    fn parse_happens(&self, line: &str) -> Option<FilterResult<Filter>> {
        let (word, rest) = split_word(line)?;
        if !word.eq_ignore_ascii_case("happens") {
            return None;
        }
        let (operator, expression) = split_word(rest)?;
        let operator = DateOperator::from_keyword(operator)?;

        Some(
            self.resolve(expression)
                .map(|date| Filter::Happens { operator, date }),
        )
    }

    /// `(<statement>) AND|OR (<statement>)`
    ///
    /// The line is split at its rightmost `) AND|OR (` joint only; if either
    /// side fails to parse, the whole line fails.
    fn parse_boolean(&self, line: &str) -> Option<FilterResult<Filter>> {
        let inner = line.strip_prefix('(')?.strip_suffix(')')?;
        let (left, operator, right) = rightmost_boolean_split(inner)?;

        let parsed = self.parse_line(left).and_then(|l| {
            let r = self.parse_line(right)?;
            Ok(match operator {
                BooleanOperator::And => Filter::and(l, r),
                BooleanOperator::Or => Filter::or(l, r),
            })
        });
        Some(parsed)
    }

    fn resolve(&self, expression: &str) -> FilterResult<NaiveDate> {
        resolve_from(expression, self.reference)
            .ok_or_else(|| FilterError::invalid_date(expression.trim()))
    }
}

/// Parses a query, resolving relative dates against today.
pub fn parse_query(source: &str) -> Query {
    QueryParser::default().parse_query(source)
}

/// Parses a single query line, resolving relative dates against today.
pub fn parse_line(line: &str) -> FilterResult<Filter> {
    QueryParser::default().parse_line(line)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BooleanOperator {
    And,
    Or,
}

/// `<has|no> <field> date`
fn parse_presence(line: &str) -> Option<Filter> {
    let (word, rest) = split_word(line)?;
    let present = if word.eq_ignore_ascii_case("has") {
        true
    } else if word.eq_ignore_ascii_case("no") {
        false
    } else {
        return None;
    };

    let (field, rest) = split_word(rest)?;
    let field = DateField::from_keyword(field)?;
    if !rest.eq_ignore_ascii_case("date") {
        return None;
    }

    Some(Filter::HasDate { field, present })
}

/// Returns the clause after `priority is`, if the line has that shape.
fn priority_clause(line: &str) -> Option<&str> {
    let (word, rest) = split_word(line)?;
    if !word.eq_ignore_ascii_case("priority") {
        return None;
    }
    let (word, clause) = split_word(rest)?;
    word.eq_ignore_ascii_case("is").then_some(clause)
}

/// Parses `<level>`, `not <level>`, `above <level>` or `below <level>`.
fn parse_priority_clause(clause: &str) -> FilterResult<Filter> {
    let clause = clause.trim();
    let invalid = || FilterError::invalid_priority(clause);

    if let Ok(target) = clause.parse::<PriorityLevel>() {
        return Ok(Filter::Priority {
            comparison: PriorityComparison::Is,
            target,
        });
    }

    let (word, level) = split_word(clause).ok_or_else(invalid)?;
    let comparison = match word.to_ascii_lowercase().as_str() {
        "not" => PriorityComparison::IsNot,
        "above" => PriorityComparison::Above,
        "below" => PriorityComparison::Below,
        _ => return Err(invalid()),
    };
    let target = level.parse::<PriorityLevel>().map_err(|_| invalid())?;

    Ok(Filter::Priority { comparison, target })
}

/// Splits off the first whitespace-delimited word.
///
/// Requires at least one whitespace character and a non-empty remainder,
/// which is returned with leading whitespace removed.
fn split_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    let end = text.find(char::is_whitespace)?;
    let (word, rest) = text.split_at(end);
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }
    Some((word, rest))
}

/// Finds the rightmost `)<ws>+AND|OR<ws>+(` joint with text on both sides.
fn rightmost_boolean_split(inner: &str) -> Option<(&str, BooleanOperator, &str)> {
    inner.rmatch_indices(')').find_map(|(close, _)| {
        let left = &inner[..close];
        let (operator, right) = strip_boolean_joint(&inner[close + 1..])?;
        (!left.is_empty() && !right.is_empty()).then_some((left, operator, right))
    })
}

/// Matches `<ws>+ (AND|OR) <ws>+ (` and returns what follows the `(`.
fn strip_boolean_joint(text: &str) -> Option<(BooleanOperator, &str)> {
    let trimmed = text.trim_start();
    if trimmed.len() == text.len() {
        return None;
    }

    let end = trimmed.find(char::is_whitespace)?;
    let (word, rest) = trimmed.split_at(end);
    let operator = if word.eq_ignore_ascii_case("and") {
        BooleanOperator::And
    } else if word.eq_ignore_ascii_case("or") {
        BooleanOperator::Or
    } else {
        return None;
    };

    rest.trim_start()
        .strip_prefix('(')
        .map(|right| (operator, right))
}
