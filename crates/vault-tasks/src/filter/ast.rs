//! Filter predicates produced by the query parser.

use chrono::NaiveDate;

use crate::dates::DateOperator;
use crate::task::{DateField, PriorityLevel};

/// Done / not done selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCondition {
    Done,
    NotDone,
}

/// How a task's priority is compared against a target level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityComparison {
    /// Same level (tasks without priority are `none`).
    Is,
    /// Any other level.
    IsNot,
    /// Strictly more important than the target.
    Above,
    /// Strictly less important than the target.
    Below,
}

/// A predicate over a [`Task`](crate::Task).
///
/// Each query line becomes exactly one `Filter`; a query is the conjunction
/// of its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    // ==================== Status ====================
    /// Matches on the done marker.
    Status(StatusCondition),

    // ==================== Dates ====================
    /// Compares one date attribute against a resolved date.
    DateCmp {
        field: DateField,
        operator: DateOperator,
        date: NaiveDate,
    },

    /// Matches when any of start, scheduled or due satisfies the comparison.
    Happens {
        operator: DateOperator,
        date: NaiveDate,
    },

    /// Checks that a date attribute is present (or absent).
    HasDate { field: DateField, present: bool },

    // ==================== Priority ====================
    /// Compares the task's priority with a level in the hierarchy.
    Priority {
        comparison: PriorityComparison,
        target: PriorityLevel,
    },

    // ==================== Boolean Operators ====================
    /// All sub-filters must match.
    And(Vec<Filter>),

    /// At least one sub-filter must match.
    Or(Vec<Filter>),

    /// Inverts the inner filter. The query language has no syntax for it.
    Not(Box<Filter>),
}

impl Filter {
    /// Creates an AND filter from two filters.
    ///
    /// # Example
    ///
    /// ```
    /// use vault_tasks::filter::{Filter, StatusCondition};
    /// use vault_tasks::DateField;
    ///
    /// let filter = Filter::and(
    ///     Filter::Status(StatusCondition::NotDone),
    ///     Filter::HasDate { field: DateField::Due, present: true },
    /// );
    /// assert!(matches!(filter, Filter::And(_)));
    /// ```
    pub fn and(left: Filter, right: Filter) -> Self {
        Filter::And(vec![left, right])
    }

    /// Creates an OR filter from two filters.
    pub fn or(left: Filter, right: Filter) -> Self {
        Filter::Or(vec![left, right])
    }

    /// Creates a NOT filter from another filter.
    pub fn negate(inner: Filter) -> Self {
        Filter::Not(Box::new(inner))
    }
}
