//! Ignore section support for jslint-task
//!
//! Violations reported inside a section delimited by a pair of directive
//! comments are suppressed before they are logged, counted or reported.
//!
//! # Comment Format
//!
//! ```javascript
//! /*ignore jslint start*/
//! var legacy = eval("1 + 1")
//! /*ignore jslint end*/
//! ```
//!
//! - A section starts at the first character of the start marker and ends at
//!   the last character of the end marker. Both ends are inclusive.
//! - A start marker without a matching end marker ignores everything up to the
//!   end of the file.
//! - Nested sections are not supported: while a section is open, further start
//!   markers are plain text and the first end marker closes the section. End
//!   markers outside a section are skipped.

use jslint_task_common::Violation;
use serde::Deserialize;

pub const DEFAULT_IGNORE_START: &str = "/*ignore jslint start*/";
pub const DEFAULT_IGNORE_END: &str = "/*ignore jslint end*/";

/// Directive markers delimiting an ignore section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IgnoreMarkers {
    pub start: String,
    pub end: String,
}

impl Default for IgnoreMarkers {
    fn default() -> Self {
        Self {
            start: DEFAULT_IGNORE_START.to_string(),
            end: DEFAULT_IGNORE_END.to_string(),
        }
    }
}

/// A 1-based line/column position in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A region of source text in which violations are suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreRange {
    pub start: Position,
    /// `None` when the section runs to the end of the file
    pub end: Option<Position>,
}

impl IgnoreRange {
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && self.end.is_none_or(|end| position <= end)
    }
}

/// Line/column tracker used while scanning
struct Cursor {
    line: usize,
    column: usize,
}

impl Cursor {
    fn new() -> Self {
        Self { line: 1, column: 1 }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Move past `text`, returning the position of its last character
    fn advance_over(&mut self, text: &str) -> Position {
        let mut last = self.position();
        for ch in text.chars() {
            last = self.position();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        last
    }
}

/// Ignore sections found in one file
#[derive(Debug, Default)]
pub struct IgnoreSections {
    ranges: Vec<IgnoreRange>,
}

impl IgnoreSections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `content` once and collect every ignore section in it
    pub fn scan(content: &str, markers: &IgnoreMarkers) -> Self {
        let mut sections = Self::new();
        if markers.start.is_empty() || markers.end.is_empty() {
            return sections;
        }

        let mut cursor = Cursor::new();
        let mut rest = content;

        while let Some(idx) = rest.find(markers.start.as_str()) {
            cursor.advance_over(&rest[..idx]);
            let start = cursor.position();
            cursor.advance_over(&markers.start);
            rest = &rest[idx + markers.start.len()..];

            match rest.find(markers.end.as_str()) {
                Some(idx) => {
                    cursor.advance_over(&rest[..idx]);
                    let end = cursor.advance_over(&markers.end);
                    rest = &rest[idx + markers.end.len()..];
                    sections.ranges.push(IgnoreRange {
                        start,
                        end: Some(end),
                    });
                }
                None => {
                    sections.ranges.push(IgnoreRange { start, end: None });
                    break;
                }
            }
        }

        sections
    }

    /// Check whether a violation at `line`/`column` falls inside any section
    pub fn is_ignored(&self, line: usize, column: usize) -> bool {
        let position = Position::new(line, column);
        self.ranges.iter().any(|range| range.contains(position))
    }

    pub fn ranges(&self) -> &[IgnoreRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Result of filtering violations with ignore sections
#[derive(Debug)]
pub struct FilterResult {
    /// Violations that were not ignored, in their original order
    pub violations: Vec<Violation>,
    /// Number of violations that were ignored
    pub ignored_count: usize,
}

/// Filter violations using ignore sections, returning survivors and ignored count
pub fn filter_violations(violations: Vec<Violation>, sections: &IgnoreSections) -> FilterResult {
    let mut remaining = Vec::with_capacity(violations.len());
    let mut ignored_count = 0;

    for violation in violations {
        if sections.is_ignored(violation.line, violation.column) {
            ignored_count += 1;
            continue;
        }
        remaining.push(violation);
    }

    FilterResult {
        violations: remaining,
        ignored_count,
    }
}
