use colored::Colorize;
use jslint_task::{BuildLog, LogEntry, RunSummary, Severity};

/// [`BuildLog`] printing errorformat lines to stdout
#[derive(Debug, Default)]
pub struct ConsoleLog {
    errors: usize,
    warnings: usize,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }
}

impl BuildLog for ConsoleLog {
    fn log_error(&mut self, entry: &LogEntry) {
        self.errors += 1;
        println!("{}", format_entry(entry, Severity::Error));
    }

    fn log_warning(&mut self, entry: &LogEntry) {
        self.warnings += 1;
        println!("{}", format_entry(entry, Severity::Warning));
    }
}

/// `file:line:col: severity: message`
pub fn format_entry(entry: &LogEntry, severity: Severity) -> String {
    let label = match severity {
        Severity::Error => severity.to_string().red().bold(),
        Severity::Warning => severity.to_string().yellow().bold(),
    };
    format!(
        "{}:{}:{}: {}: {}",
        entry.file, entry.line, entry.column, label, entry.message
    )
}

pub fn format_summary(summary: &RunSummary) -> String {
    let line = format!(
        "{} processed files, {} violating files, {} total violations",
        summary.processed_file_count, summary.violating_file_count, summary.violation_count
    );
    if summary.violation_count > 0 {
        line.bold().to_string()
    } else {
        line.green().to_string()
    }
}
