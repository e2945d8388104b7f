//! Task output formatting.

use chrono::NaiveDate;
use serde::Serialize;
use vault_tasks::Task;

use super::helpers::{format_date, priority_label, status_label};

/// JSON output structure for the query command.
#[derive(Serialize)]
pub struct QueryOutput<'a> {
    pub tasks: Vec<TaskOutput<'a>>,
    pub count: usize,
}

/// JSON output structure for a single task.
///
/// Date fields are omitted when empty unless full output was requested,
/// in which case they appear as `null`.
#[derive(Serialize)]
pub struct TaskOutput<'a> {
    pub status: String,
    pub description: &'a str,
    pub priority: String,
    pub file_path: &'a str,
    pub line_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<Option<String>>,
}

impl<'a> TaskOutput<'a> {
    pub fn new(task: &'a Task, full: bool) -> Self {
        let slot = |date: Option<NaiveDate>| match date {
            Some(d) => Some(Some(d.to_string())),
            None if full => Some(None),
            None => None,
        };

        Self {
            status: status_label(task.status),
            description: &task.description,
            priority: priority_label(task.priority),
            file_path: &task.file_path,
            line_number: task.line_number,
            start_date: slot(task.start_date),
            scheduled_date: slot(task.scheduled_date),
            due_date: slot(task.due_date),
            done_date: slot(task.done_date),
            created_date: slot(task.created_date),
        }
    }
}

/// Formats query results as pretty-printed JSON.
pub fn format_tasks_json(tasks: &[Task], full: bool) -> Result<String, serde_json::Error> {
    let output = QueryOutput {
        tasks: tasks.iter().map(|t| TaskOutput::new(t, full)).collect(),
        count: tasks.len(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats query results one task per line: `[x] description (📅 d, ⏳ d, 🛫 d)`.
pub fn format_tasks_raw(tasks: &[Task], today: NaiveDate, use_colors: bool) -> String {
    let mut output = String::new();

    for task in tasks {
        let marker = if task.is_done() { 'x' } else { ' ' };
        output.push_str(&format!("[{marker}] {}", task.description));

        let dates: Vec<String> = [
            ('📅', task.due_date),
            ('⏳', task.scheduled_date),
            ('🛫', task.start_date),
        ]
        .into_iter()
        .filter_map(|(glyph, date)| date.map(|d| format_date(glyph, d, today, use_colors)))
        .collect();

        if !dates.is_empty() {
            output.push_str(&format!(" ({})", dates.join(", ")));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_tasks::{parse_line, Priority};

    fn task(line: &str) -> Task {
        parse_line(line, "notes/today.md", 7).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 12).unwrap()
    }

    #[test]
    fn test_json_hides_empty_dates() {
        let tasks = vec![task("- [ ] Pay rent ⏫ 📅 2025-11-30")];
        let json: serde_json::Value =
            serde_json::from_str(&format_tasks_json(&tasks, false).unwrap()).unwrap();

        assert_eq!(json["count"], 1);
        let first = &json["tasks"][0];
        assert_eq!(first["status"], "Open");
        assert_eq!(first["description"], "Pay rent");
        assert_eq!(first["priority"], "High");
        assert_eq!(first["file_path"], "notes/today.md");
        assert_eq!(first["line_number"], 7);
        assert_eq!(first["due_date"], "2025-11-30");
        assert!(first.get("start_date").is_none());
        assert!(first.get("created_date").is_none());
    }

    #[test]
    fn test_json_full_includes_null_dates() {
        let tasks = vec![task("- [x] Filed ✅ 2025-04-01")];
        let json: serde_json::Value =
            serde_json::from_str(&format_tasks_json(&tasks, true).unwrap()).unwrap();

        let first = &json["tasks"][0];
        assert_eq!(first["status"], "Done");
        assert_eq!(first["priority"], "Normal");
        assert_eq!(first["done_date"], "2025-04-01");
        for field in ["start_date", "scheduled_date", "due_date", "created_date"] {
            assert!(first[field].is_null(), "{field}");
            assert!(first.get(field).is_some(), "{field}");
        }
    }

    #[test]
    fn test_json_empty_result() {
        let json: serde_json::Value =
            serde_json::from_str(&format_tasks_json(&[], false).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"tasks": [], "count": 0}));
    }

    #[test]
    fn test_raw_lines() {
        let tasks = vec![
            task("- [ ] Water plants 🛫 2025-11-10 ⏳ 2025-11-11 📅 2025-11-12"),
            task("- [x] Call mum"),
            task("- [/] Refactor ⏬"),
        ];
        assert_eq!(tasks[2].priority, Some(Priority::Lowest));

        let raw = format_tasks_raw(&tasks, today(), false);
        assert_eq!(
            raw,
            "[ ] Water plants (📅 2025-11-12, ⏳ 2025-11-11, 🛫 2025-11-10)\n\
             [x] Call mum\n\
             [ ] Refactor\n"
        );
    }
}
