mod html;
mod text;

use crate::run::RunState;
use chrono::NaiveDateTime;
use jslint_task_common::Violation;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub const REPORT_TITLE: &str = "JSLint Report";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Html,
}

impl ReportFormat {
    /// Pick a format from the report destination's extension
    ///
    /// `.htm` and `.html` (any case) select HTML, every other non-empty
    /// destination selects plain text. An empty destination means no report.
    pub fn from_destination(destination: &Path) -> Option<Self> {
        if destination.as_os_str().is_empty() {
            return None;
        }

        let ext = destination
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("htm") | Some("html") => Some(ReportFormat::Html),
            _ => Some(ReportFormat::Text),
        }
    }

    /// Render `state` with the given generation timestamp
    pub fn render_at(&self, state: &RunState, generated: NaiveDateTime) -> String {
        match self {
            ReportFormat::Text => render_with(&text::TextTemplate, state, generated),
            ReportFormat::Html => render_with(&html::HtmlTemplate, state, generated),
        }
    }
}

/// A report that will be written to `destination` once the run completes
#[derive(Debug, Clone)]
pub struct Reporter {
    format: ReportFormat,
    destination: PathBuf,
}

impl Reporter {
    /// Create a reporter for `destination`, or `None` when no report is wanted
    pub fn create(destination: Option<&Path>) -> Option<Self> {
        let destination = destination?;
        let format = ReportFormat::from_destination(destination)?;
        Some(Self {
            format,
            destination: destination.to_path_buf(),
        })
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Render `state`, stamped with the current local time
    pub fn render(&self, state: &RunState) -> String {
        self.format
            .render_at(state, chrono::Local::now().naive_local())
    }

    pub fn render_at(&self, state: &RunState, generated: NaiveDateTime) -> String {
        self.format.render_at(state, generated)
    }
}

/// Header values shared by every format
pub(crate) struct ReportHeader<'a> {
    pub title: &'a str,
    pub generated: String,
    pub processed_file_count: usize,
    pub violating_file_count: usize,
    pub violation_count: usize,
}

/// Per-token formatting of one report format
pub(crate) trait ReportTemplate {
    fn report(&self, header: &ReportHeader<'_>, files: &str) -> String;

    fn file(&self, path: &str, violation_count: usize, violations: &str) -> String;

    fn violation(&self, violation: &Violation, message: &str, evidence: Option<&str>) -> String;

    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

fn render_with<T: ReportTemplate>(template: &T, state: &RunState, generated: NaiveDateTime) -> String {
    let mut files = String::new();

    for record in state.files() {
        if record.violations.is_empty() {
            continue;
        }

        let mut violations = String::new();
        for violation in &record.violations {
            let message = template.escape(&violation.message);
            let evidence = violation.evidence.as_deref().map(|e| template.escape(e));
            violations.push_str(&template.violation(violation, &message, evidence.as_deref()));
        }

        files.push_str(&template.file(
            &template.escape(&record.path),
            record.violations.len(),
            &violations,
        ));
    }

    let header = ReportHeader {
        title: REPORT_TITLE,
        generated: generated.format(TIMESTAMP_FORMAT).to_string(),
        processed_file_count: state.processed_file_count(),
        violating_file_count: state.violating_file_count(),
        violation_count: state.violation_count(),
    };

    template.report(&header, &files)
}
