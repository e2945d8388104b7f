//! Task records parsed from checkbox lines.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status character that marks a task as done.
pub const DONE_STATUS: char = 'x';

/// Unicode variant selector 16, tolerated after any metadata glyph.
pub(crate) const VARIANT_SELECTOR: char = '\u{FE0F}';

/// Priority carried by a task.
///
/// Each priority is written as a single trailing glyph in the task text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Highest,
    High,
    Medium,
    Low,
    Lowest,
}

impl Priority {
    /// All priorities, highest first.
    pub const ALL: [Priority; 5] = [
        Priority::Highest,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Lowest,
    ];

    /// Returns the glyph that encodes this priority.
    pub fn glyph(self) -> char {
        match self {
            Priority::Highest => '🔺',
            Priority::High => '⏫',
            Priority::Medium => '🔼',
            Priority::Low => '🔽',
            Priority::Lowest => '⏬',
        }
    }

    /// Maps a glyph back to its priority.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.glyph() == glyph)
    }

    /// Lowercase name of the priority.
    pub fn name(self) -> &'static str {
        match self {
            Priority::Highest => "highest",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Lowest => "lowest",
        }
    }

    /// Position in the priority hierarchy (lower is more important).
    pub fn level(self) -> u8 {
        PriorityLevel::from(Some(self)).rank()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match PriorityLevel::from_str(s)? {
            PriorityLevel::Set(priority) => Ok(priority),
            PriorityLevel::None => Err(UnknownPriority(s.to_string())),
        }
    }
}

/// A priority name that is not part of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0}")]
pub struct UnknownPriority(pub String);

/// A point in the priority hierarchy, including the implicit `none` level
/// shared by every task without a priority glyph.
///
/// Ordering follows importance: `Highest < High < Medium < None < Low < Lowest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityLevel {
    Set(Priority),
    None,
}

impl PriorityLevel {
    /// Numeric rank in the hierarchy.
    pub fn rank(self) -> u8 {
        match self {
            PriorityLevel::Set(Priority::Highest) => 0,
            PriorityLevel::Set(Priority::High) => 1,
            PriorityLevel::Set(Priority::Medium) => 2,
            PriorityLevel::None => 3,
            PriorityLevel::Set(Priority::Low) => 4,
            PriorityLevel::Set(Priority::Lowest) => 5,
        }
    }

    /// Lowercase name, `none` for the implicit level.
    pub fn name(self) -> &'static str {
        match self {
            PriorityLevel::Set(priority) => priority.name(),
            PriorityLevel::None => "none",
        }
    }
}

impl From<Option<Priority>> for PriorityLevel {
    fn from(priority: Option<Priority>) -> Self {
        priority.map_or(PriorityLevel::None, PriorityLevel::Set)
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PriorityLevel {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_lowercase().as_str() {
            "highest" => PriorityLevel::Set(Priority::Highest),
            "high" => PriorityLevel::Set(Priority::High),
            "medium" => PriorityLevel::Set(Priority::Medium),
            "none" => PriorityLevel::None,
            "low" => PriorityLevel::Set(Priority::Low),
            "lowest" => PriorityLevel::Set(Priority::Lowest),
            _ => return Err(UnknownPriority(s.to_string())),
        };
        Ok(level)
    }
}

/// Date attributes that filters can address by name.
///
/// `Created` and `Cancelled` are accepted by the query language for presence
/// checks but are not wired to task data: they always read as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Due,
    Scheduled,
    Start,
    Done,
    Created,
    Cancelled,
}

impl DateField {
    /// Parses a field keyword (case-insensitive).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let field = match keyword.to_lowercase().as_str() {
            "due" => DateField::Due,
            "scheduled" => DateField::Scheduled,
            "start" => DateField::Start,
            "done" => DateField::Done,
            "created" => DateField::Created,
            "cancelled" => DateField::Cancelled,
            _ => return None,
        };
        Some(field)
    }

    /// Whether the field can be compared against a date in a query.
    pub fn is_comparable(self) -> bool {
        matches!(
            self,
            DateField::Due | DateField::Scheduled | DateField::Start | DateField::Done
        )
    }
}

/// A parsed checkbox task.
///
/// Records are built once by [`crate::parse_line`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Raw status character from between the brackets.
    pub status: char,
    /// Text left over once the checkbox and trailing metadata are removed.
    pub description: String,
    pub priority: Option<Priority>,
    pub start_date: Option<NaiveDate>,
    pub scheduled_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub done_date: Option<NaiveDate>,
    pub created_date: Option<NaiveDate>,
    /// The line exactly as it was read.
    pub source_line: String,
    /// Path of the containing file, relative to the collection root.
    pub file_path: String,
    /// 1-based line number within the file.
    pub line_number: usize,
}

impl Task {
    /// Returns true when the status character is `x`.
    pub fn is_done(&self) -> bool {
        self.status == DONE_STATUS
    }

    /// A task is valid when its description is not blank.
    pub fn is_valid(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Position of this task in the priority hierarchy.
    pub fn priority_level(&self) -> PriorityLevel {
        PriorityLevel::from(self.priority)
    }

    /// Looks up a date attribute by field.
    pub fn date(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::Due => self.due_date,
            DateField::Scheduled => self.scheduled_date,
            DateField::Start => self.start_date,
            DateField::Done => self.done_date,
            DateField::Created | DateField::Cancelled => None,
        }
    }

    /// Start, scheduled and due dates, in that order.
    pub fn happens_dates(&self) -> [Option<NaiveDate>; 3] {
        [self.start_date, self.scheduled_date, self.due_date]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_task() -> Task {
        Task {
            status: ' ',
            description: "Write report".to_string(),
            priority: None,
            start_date: None,
            scheduled_date: None,
            due_date: None,
            done_date: None,
            created_date: None,
            source_line: "- [ ] Write report".to_string(),
            file_path: "notes.md".to_string(),
            line_number: 1,
        }
    }

    #[test]
    fn test_priority_levels_follow_hierarchy() {
        assert_eq!(Priority::Highest.level(), 0);
        assert_eq!(Priority::High.level(), 1);
        assert_eq!(Priority::Medium.level(), 2);
        assert_eq!(PriorityLevel::None.rank(), 3);
        assert_eq!(Priority::Low.level(), 4);
        assert_eq!(Priority::Lowest.level(), 5);
    }

    #[test]
    fn test_priority_from_glyph() {
        assert_eq!(Priority::from_glyph('🔺'), Some(Priority::Highest));
        assert_eq!(Priority::from_glyph('⏫'), Some(Priority::High));
        assert_eq!(Priority::from_glyph('🔼'), Some(Priority::Medium));
        assert_eq!(Priority::from_glyph('🔽'), Some(Priority::Low));
        assert_eq!(Priority::from_glyph('⏬'), Some(Priority::Lowest));
        assert_eq!(Priority::from_glyph('x'), None);
    }

    #[test]
    fn test_priority_level_from_str() {
        assert_eq!("NONE".parse::<PriorityLevel>(), Ok(PriorityLevel::None));
        assert_eq!(
            " High ".parse::<PriorityLevel>(),
            Ok(PriorityLevel::Set(Priority::High))
        );
        assert!("urgent".parse::<PriorityLevel>().is_err());
        assert!("none".parse::<Priority>().is_err());
    }

    #[test]
    fn test_is_done_only_for_lowercase_x() {
        let mut task = blank_task();
        assert!(!task.is_done());
        task.status = 'x';
        assert!(task.is_done());
        task.status = 'X';
        assert!(!task.is_done());
        task.status = '-';
        assert!(!task.is_done());
    }

    #[test]
    fn test_is_valid_requires_description() {
        let mut task = blank_task();
        assert!(task.is_valid());
        task.description = "   ".to_string();
        assert!(!task.is_valid());
    }

    #[test]
    fn test_created_and_cancelled_fields_read_as_absent() {
        let mut task = blank_task();
        task.created_date = NaiveDate::from_ymd_opt(2025, 11, 4);
        assert_eq!(task.date(DateField::Created), None);
        assert_eq!(task.date(DateField::Cancelled), None);
    }
}
