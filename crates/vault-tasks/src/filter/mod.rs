//! Query parser and evaluator for task filters.
//!
//! A query is plain text with one statement per line. Every line becomes a
//! [`Filter`], and a task matches the query when it matches all of them.
//!
//! # Supported Syntax
//!
//! ## Status
//! - `done` / `not done`
//!
//! ## Dates
//! - `due before today`, `scheduled after 2025-11-15`, `start on tomorrow`,
//!   `done before yesterday`
//! - `happens on today` - start, scheduled or due date matches
//! - `has due date`, `no scheduled date`
//!
//! Date expressions: `today`, `tomorrow`, `yesterday`, `in one week`,
//! `in two weeks`, or `YYYY-MM-DD`.
//!
//! ## Priority
//! - `priority is high`, `priority is not none`, `priority is above medium`,
//!   `priority is below high`
//!
//! ## Boolean Operators
//! - `(<statement>) AND (<statement>)`
//! - `(<statement>) OR (<statement>)`
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use vault_tasks::filter::{execute, Filter, QueryParser};
//!
//! let parser = QueryParser::new(NaiveDate::from_ymd_opt(2025, 11, 12).unwrap());
//! let filter = parser.parse_line("(not done) AND (has due date)").unwrap();
//! assert!(matches!(filter, Filter::And(_)));
//!
//! let tasks: Vec<vault_tasks::Task> = Vec::new();
//! assert!(execute(&tasks, &[filter]).is_empty());
//! ```

mod ast;
mod error;
mod evaluator;
mod parser;

pub use ast::{Filter, PriorityComparison, StatusCondition};
pub use error::{FilterError, FilterResult, QueryError};
pub use evaluator::{execute, execute_owned, FilterEvaluator};
pub use parser::{parse_line, parse_query, Query, QueryParser};
