//! Error types for the query parser.

use thiserror::Error;

/// A specialized Result type for single-line filter parsing.
pub type FilterResult<T> = Result<T, FilterError>;

/// Why a single query line could not be turned into a filter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The line is blank.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// The line matches none of the known statement forms.
    #[error("unknown statement: {line}")]
    UnknownStatement {
        /// The offending line, trimmed.
        line: String,
    },

    /// A date expression could not be resolved to a calendar date.
    #[error("invalid date expression: {expression}")]
    InvalidDate {
        /// The expression as written.
        expression: String,
    },

    /// A `priority is` clause named something outside the hierarchy.
    #[error("invalid priority clause: {clause}")]
    InvalidPriority {
        /// The clause after `priority is`.
        clause: String,
    },
}

impl FilterError {
    /// Creates an unknown statement error.
    pub fn unknown_statement(line: impl Into<String>) -> Self {
        FilterError::UnknownStatement { line: line.into() }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(expression: impl Into<String>) -> Self {
        FilterError::InvalidDate {
            expression: expression.into(),
        }
    }

    /// Creates an invalid priority error.
    pub fn invalid_priority(clause: impl Into<String>) -> Self {
        FilterError::InvalidPriority {
            clause: clause.into(),
        }
    }
}

/// A query in which at least one line failed to parse.
///
/// Holds every failing line so the caller sees all problems at once.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("query parse error: {}", join_unparsed(.lines))]
pub struct QueryError {
    /// Each line that could not be parsed, trimmed, in query order.
    pub lines: Vec<String>,
}

impl QueryError {
    /// The semicolon-joined `Could not parse line: ...` summary.
    pub fn summary(&self) -> String {
        join_unparsed(&self.lines)
    }
}

fn join_unparsed(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("Could not parse line: {line}"))
        .collect::<Vec<_>>()
        .join("; ")
}
