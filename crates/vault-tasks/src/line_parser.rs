//! Checkbox line parsing with trailing metadata extraction.
//!
//! A task line looks like `- [ ] Pay rent ⏫ 📅 2025-11-30`: optional
//! indentation or blockquote markers, a list marker, a bracketed status
//! character, then free text followed by metadata tokens. Tokens are peeled
//! off the end of the text one at a time; whatever is left is the
//! description.

use chrono::NaiveDate;

use crate::dates::parse_iso_date;
use crate::task::{Priority, Task, VARIANT_SELECTOR};

/// Upper bound on extraction passes over a single line.
pub const MAX_EXTRACTION_PASSES: usize = 20;

/// Byte length of a `YYYY-MM-DD` payload.
const DATE_PAYLOAD_LEN: usize = 10;

const DONE_GLYPHS: &[char] = &['✅'];
const SCHEDULED_GLYPHS: &[char] = &['⏳', '⌛'];
const DUE_GLYPHS: &[char] = &['📅', '📆', '🗓'];
const START_GLYPHS: &[char] = &['🛫'];
const CREATED_GLYPHS: &[char] = &['➕'];

/// Metadata slots, in the order they are tried on every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Priority,
    Done,
    Scheduled,
    Due,
    Start,
    Created,
}

const SLOT_ORDER: [Slot; 6] = [
    Slot::Priority,
    Slot::Done,
    Slot::Scheduled,
    Slot::Due,
    Slot::Start,
    Slot::Created,
];

impl Slot {
    fn date_glyphs(self) -> &'static [char] {
        match self {
            Slot::Priority => &[],
            Slot::Done => DONE_GLYPHS,
            Slot::Scheduled => SCHEDULED_GLYPHS,
            Slot::Due => DUE_GLYPHS,
            Slot::Start => START_GLYPHS,
            Slot::Created => CREATED_GLYPHS,
        }
    }
}

/// Metadata pulled off the end of a task's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub priority: Option<Priority>,
    pub done_date: Option<NaiveDate>,
    pub scheduled_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub created_date: Option<NaiveDate>,
}

impl ExtractedFields {
    fn is_empty_slot(&self, slot: Slot) -> bool {
        match slot {
            Slot::Priority => self.priority.is_none(),
            Slot::Done => self.done_date.is_none(),
            Slot::Scheduled => self.scheduled_date.is_none(),
            Slot::Due => self.due_date.is_none(),
            Slot::Start => self.start_date.is_none(),
            Slot::Created => self.created_date.is_none(),
        }
    }

    fn set_date(&mut self, slot: Slot, date: Option<NaiveDate>) {
        let target = match slot {
            Slot::Priority => return,
            Slot::Done => &mut self.done_date,
            Slot::Scheduled => &mut self.scheduled_date,
            Slot::Due => &mut self.due_date,
            Slot::Start => &mut self.start_date,
            Slot::Created => &mut self.created_date,
        };
        *target = date;
    }
}

/// Parses a single line into a [`Task`].
///
/// Returns `None` when the line is not a checkbox item, or when the status
/// character is a bracket (`- [[Note]]` is a wiki link, not a task).
pub fn parse_line(line: &str, file_path: &str, line_number: usize) -> Option<Task> {
    let (status, content) = split_checkbox(line)?;
    if status == '[' || status == ']' {
        return None;
    }

    let (fields, description) = extract_fields(content);

    Some(Task {
        status,
        description: description.trim().to_string(),
        priority: fields.priority,
        start_date: fields.start_date,
        scheduled_date: fields.scheduled_date,
        due_date: fields.due_date,
        done_date: fields.done_date,
        created_date: fields.created_date,
        source_line: line.to_string(),
        file_path: file_path.to_string(),
        line_number,
    })
}

/// Removes trailing metadata tokens from `content`.
///
/// Every pass tries the slots in a fixed order and strips the first token that
/// sits at the end of the text and whose slot is still empty, then starts over
/// on the shortened text. A slot is only filled once; a second token of the
/// same kind stays in the description. Malformed dates leave their slot empty
/// but the token text is still removed.
pub fn extract_fields(content: &str) -> (ExtractedFields, &str) {
    let mut fields = ExtractedFields::default();
    let mut remaining = content.trim();

    for _ in 0..MAX_EXTRACTION_PASSES {
        if remaining.is_empty() {
            break;
        }

        let Some(rest) = strip_next_token(remaining, &mut fields) else {
            break;
        };
        remaining = rest;
    }

    (fields, remaining)
}

/// Strips one token from the end of `text`, recording it in `fields`.
fn strip_next_token<'a>(text: &'a str, fields: &mut ExtractedFields) -> Option<&'a str> {
    for slot in SLOT_ORDER {
        if !fields.is_empty_slot(slot) {
            continue;
        }

        if slot == Slot::Priority {
            if let Some((rest, priority)) = strip_priority(text) {
                fields.priority = Some(priority);
                return Some(rest);
            }
            continue;
        }

        if let Some((rest, payload)) = strip_date_token(text, slot.date_glyphs()) {
            fields.set_date(slot, parse_iso_date(payload));
            return Some(rest);
        }
    }

    None
}

/// Matches a priority glyph (plus optional variant selector) at the end.
fn strip_priority(text: &str) -> Option<(&str, Priority)> {
    let head = text.strip_suffix(VARIANT_SELECTOR).unwrap_or(text);
    let glyph = head.chars().next_back()?;
    let priority = Priority::from_glyph(glyph)?;
    let rest = &head[..head.len() - glyph.len_utf8()];
    Some((rest.trim(), priority))
}

/// Matches `<glyph>[variant selector][spaces]YYYY-MM-DD` at the end.
fn strip_date_token<'a>(text: &'a str, glyphs: &[char]) -> Option<(&'a str, &'a str)> {
    let split = text.len().checked_sub(DATE_PAYLOAD_LEN)?;
    let payload = text.get(split..)?;
    if !has_date_shape(payload) {
        return None;
    }

    let head = text[..split].trim_end_matches(' ');
    let head = head.strip_suffix(VARIANT_SELECTOR).unwrap_or(head);
    let rest = head.strip_suffix(glyphs)?;
    Some((rest.trim(), payload))
}

/// Checks for four digits, dash, two digits, dash, two digits.
fn has_date_shape(payload: &str) -> bool {
    let bytes = payload.as_bytes();
    bytes.len() == DATE_PAYLOAD_LEN
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Splits a checkbox line into its status character and the text after it.
fn split_checkbox(line: &str) -> Option<(char, &str)> {
    let rest = line.trim_start_matches(|c: char| c.is_whitespace() || c == '>');
    let rest = strip_list_marker(rest)?;

    let after_gap = rest.trim_start_matches(' ');
    if after_gap.len() == rest.len() {
        return None;
    }

    let mut chars = after_gap.strip_prefix('[')?.chars();
    let status = chars.next().filter(|c| *c != '\n')?;
    let content = chars.as_str().strip_prefix(']')?;
    Some((status, content.trim_start_matches(' ')))
}

/// Strips `-`, `*`, `+`, or an ordered marker like `12.` / `3)`.
fn strip_list_marker(text: &str) -> Option<&str> {
    if let Some(rest) = text.strip_prefix(['-', '*', '+']) {
        return Some(rest);
    }

    let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    text[digits..].strip_prefix(['.', ')'])
}
