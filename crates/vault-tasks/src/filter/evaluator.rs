//! Filter evaluation against parsed tasks.
//!
//! This module provides the [`FilterEvaluator`] for applying a list of
//! filters to tasks. A list of filters is a conjunction: a task survives only
//! if every filter matches it.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use vault_tasks::filter::{FilterEvaluator, QueryParser};
//! use vault_tasks::parse_line;
//!
//! let parser = QueryParser::new(NaiveDate::from_ymd_opt(2025, 11, 12).unwrap());
//! let filters = parser.parse_query("not done\nhas due date").into_result().unwrap();
//!
//! let tasks: Vec<_> = [
//!     "- [ ] Pay rent 📅 2025-11-30",
//!     "- [x] Old bill 📅 2025-10-30",
//!     "- [ ] Someday",
//! ]
//! .iter()
//! .enumerate()
//! .filter_map(|(i, line)| parse_line(line, "inbox.md", i + 1))
//! .collect();
//!
//! let evaluator = FilterEvaluator::new(&filters);
//! let matching = evaluator.filter_tasks(&tasks);
//! assert_eq!(matching.len(), 1);
//! assert_eq!(matching[0].description, "Pay rent");
//! ```

use super::ast::{Filter, PriorityComparison, StatusCondition};
use crate::task::Task;

impl Filter {
    /// Returns true if the task satisfies this filter.
    ///
    /// Sub-filters of `And` and `Or` are evaluated left to right.
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::Status(StatusCondition::Done) => task.is_done(),
            Filter::Status(StatusCondition::NotDone) => !task.is_done(),

            Filter::DateCmp {
                field,
                operator,
                date,
            } => operator.matches(task.date(*field), *date),
            Filter::Happens { operator, date } => task
                .happens_dates()
                .into_iter()
                .any(|d| operator.matches(d, *date)),
            Filter::HasDate { field, present } => task.date(*field).is_some() == *present,

            Filter::Priority { comparison, target } => {
                let level = task.priority_level();
                match comparison {
                    PriorityComparison::Is => level == *target,
                    PriorityComparison::IsNot => level != *target,
                    PriorityComparison::Above => level.rank() < target.rank(),
                    PriorityComparison::Below => level.rank() > target.rank(),
                }
            }

            Filter::And(filters) => filters.iter().all(|f| f.matches(task)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(task)),
            Filter::Not(inner) => !inner.matches(task),
        }
    }
}

/// Applies an ordered list of filters as a conjunction.
#[derive(Debug, Clone, Copy)]
pub struct FilterEvaluator<'a> {
    filters: &'a [Filter],
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new evaluator over `filters`.
    pub fn new(filters: &'a [Filter]) -> Self {
        Self { filters }
    }

    /// Returns true if the task matches every filter.
    pub fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }

    /// Narrows `tasks` one filter at a time, keeping input order.
    pub fn filter_tasks<'b>(&self, tasks: &'b [Task]) -> Vec<&'b Task> {
        let mut remaining: Vec<&Task> = tasks.iter().collect();
        for filter in self.filters {
            remaining.retain(|task| filter.matches(task));
        }
        remaining
    }

    /// Owning variant of [`filter_tasks`](Self::filter_tasks).
    pub fn filter_owned(&self, mut tasks: Vec<Task>) -> Vec<Task> {
        for filter in self.filters {
            tasks.retain(|task| filter.matches(task));
        }
        tasks
    }
}

/// Returns the tasks matching all `filters`, in their original order.
pub fn execute<'t>(tasks: &'t [Task], filters: &[Filter]) -> Vec<&'t Task> {
    FilterEvaluator::new(filters).filter_tasks(tasks)
}

/// Owning variant of [`execute`].
pub fn execute_owned(tasks: Vec<Task>, filters: &[Filter]) -> Vec<Task> {
    FilterEvaluator::new(filters).filter_owned(tasks)
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
