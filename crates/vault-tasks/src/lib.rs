//! Checkbox task parsing and querying for Markdown vaults.
//!
//! This crate turns lines such as `- [ ] Pay rent ⏫ 📅 2025-11-30` into
//! [`Task`] records and filters them with a small line-oriented query
//! language (`not done`, `due before tomorrow`, `priority is above none`, ...).
//!
//! The pipeline is pure: a [`LineSource`] supplies raw lines, [`parse_line`]
//! turns them into tasks, [`filter::QueryParser`] turns query text into
//! filters, and [`filter::execute`] narrows the tasks.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use vault_tasks::{query_with_reference, MemorySource};
//!
//! let source = MemorySource::new().with_file(
//!     "inbox.md",
//!     "- [ ] Pay rent 📅 2025-11-30\n- [x] File taxes ✅ 2025-04-01\n",
//! );
//! let today = NaiveDate::from_ymd_opt(2025, 11, 12).unwrap();
//!
//! let tasks = query_with_reference(&source, "not done\nhas due date", today).unwrap();
//! assert_eq!(tasks.len(), 1);
//! assert_eq!(tasks[0].description, "Pay rent");
//! ```

pub mod dates;
pub mod filter;
mod line_parser;
pub mod source;
mod task;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::debug;

pub use filter::{Filter, Query, QueryError, QueryParser};
pub use line_parser::{extract_fields, parse_line, ExtractedFields, MAX_EXTRACTION_PASSES};
pub use source::{LineSource, MemorySource, SourceError, SourceLine, VaultScanner};
pub use task::{DateField, Priority, PriorityLevel, Task, UnknownPriority, DONE_STATUS};

/// Errors returned by [`query`] and [`query_with_reference`].
#[derive(Debug, Error)]
pub enum Error {
    /// The query text did not parse; no tasks were filtered.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The line source could not be read at all.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// A specialized Result type for the query pipeline.
pub type Result<T> = std::result::Result<T, Error>;

/// Reads every valid task from a line source.
///
/// Lines that are not tasks are ignored, and so are tasks whose description
/// is empty once metadata is removed.
pub fn read_tasks(source: &impl LineSource) -> std::result::Result<Vec<Task>, SourceError> {
    let lines = source.read_lines()?;
    let tasks: Vec<Task> = lines
        .iter()
        .filter_map(|line| parse_line(&line.text, &line.file_path, line.line_number))
        .filter(Task::is_valid)
        .collect();

    debug!(lines = lines.len(), tasks = tasks.len(), "parsed tasks");
    Ok(tasks)
}

/// Runs a query over already-parsed tasks.
///
/// Fails without filtering anything if any query line is unparseable.
pub fn execute_query(
    tasks: Vec<Task>,
    query_source: &str,
    parser: &QueryParser,
) -> std::result::Result<Vec<Task>, QueryError> {
    let filters = parser.parse_query(query_source).into_result()?;
    Ok(filter::execute_owned(tasks, &filters))
}

/// Reads all tasks from `source` and returns those matching `query_source`,
/// resolving relative dates against today.
pub fn query(source: &impl LineSource, query_source: &str) -> Result<Vec<Task>> {
    query_with_reference(source, query_source, Local::now().date_naive())
}

/// Like [`query`], with an explicit date for `today`.
pub fn query_with_reference(
    source: &impl LineSource,
    query_source: &str,
    reference: NaiveDate,
) -> Result<Vec<Task>> {
    let parser = QueryParser::new(reference);
    let filters = parser.parse_query(query_source).into_result()?;

    let tasks = read_tasks(source)?;
    let total = tasks.len();
    let matched = filter::execute_owned(tasks, &filters);

    debug!(
        filters = filters.len(),
        total,
        matched = matched.len(),
        "executed query"
    );
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_file(
                "daily/2025-11-12.md",
                "# Today\n\
                 - [ ] Buy milk 📅 2025-11-12\n\
                 - [x] Ship release ✅ 2025-11-11 📅 2025-11-10\n\
                 - [ ] 📅 2025-11-12\n\
                 Some prose.\n\
                 - [[Linked note]]\n",
            )
            .with_file(
                "projects/garden.md",
                "* [ ] Plant bulbs ⏫ 🛫 2025-11-01 ⏳ 2025-11-14\n\
                 1. [ ] Order seeds 🔽\n",
            )
    }

    #[test]
    fn test_read_tasks_drops_non_tasks_and_invalid() {
        let tasks = read_tasks(&source()).unwrap();
        let descriptions: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["Buy milk", "Ship release", "Plant bulbs", "Order seeds"]
        );
        assert_eq!(tasks[0].line_number, 2);
        assert_eq!(tasks[2].file_path, "projects/garden.md");
    }

    #[test]
    fn test_query_not_done_happens_before_today() {
        let tasks = query_with_reference(&source(), "not done\nhappens before today", date(2025, 11, 12))
            .unwrap();
        let descriptions: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Plant bulbs"]);
    }

    #[test]
    fn test_query_happens_on_today() {
        let tasks =
            query_with_reference(&source(), "happens on today", date(2025, 11, 12)).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "Buy milk");
    }

    #[test]
    fn test_query_priority_above_none() {
        let tasks =
            query_with_reference(&source(), "priority is above none", date(2025, 11, 12)).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].priority, Some(Priority::High));
    }

    #[test]
    fn test_query_parse_error_returns_no_tasks() {
        let err = query_with_reference(
            &source(),
            "done\ninvalid line here\nhappens on today",
            date(2025, 11, 12),
        )
        .unwrap_err();

        let Error::Query(query_err) = &err else {
            panic!("expected query error, got {err:?}");
        };
        assert_eq!(query_err.lines, vec!["invalid line here".to_string()]);
        assert!(err.to_string().to_lowercase().contains("parse error"));
    }

    #[test]
    fn test_query_empty_matches_all_valid_tasks() {
        let tasks = query(&source(), "").unwrap();
        assert_eq!(tasks.len(), 4);
    }

    #[test]
    fn test_execute_query_over_parsed_tasks() {
        let tasks = read_tasks(&source()).unwrap();
        let parser = QueryParser::new(date(2025, 11, 12));
        let done = execute_query(tasks.clone(), "done", &parser).unwrap();
        assert_eq!(done.len(), 1);
        assert!(done[0].is_done());

        assert!(execute_query(tasks, "sort by due", &parser).is_err());
    }
}
