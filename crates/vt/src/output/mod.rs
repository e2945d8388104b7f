//! Output formatting utilities for the vt CLI.
//!
//! - [`tasks`] - Query result formatting (JSON and raw lines)
//! - [`helpers`] - Common formatting utilities (labels, dates)

pub mod helpers;
mod tasks;

pub use tasks::{format_tasks_json, format_tasks_raw};
