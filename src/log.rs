//! Build log sink receiving every surviving violation.

/// One message sent to a [`BuildLog`]
///
/// Field layout follows the usual build-log convention: optional
/// subcategory, code and help keyword, then the location span and message.
/// An end line/column of `0` means "no end position".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub subcategory: Option<String>,
    pub code: Option<String>,
    pub help_keyword: Option<String>,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub message: String,
}

impl LogEntry {
    /// Entry for a violation at a single position
    pub fn at(file: &str, line: usize, column: usize, message: &str) -> Self {
        Self {
            subcategory: None,
            code: None,
            help_keyword: None,
            file: file.to_string(),
            line,
            column,
            end_line: 0,
            end_column: 0,
            message: message.to_string(),
        }
    }
}

/// Severity used for every violation of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn for_run(treat_violations_as_warnings: bool) -> Self {
        if treat_violations_as_warnings {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

pub trait BuildLog {
    fn log_error(&mut self, entry: &LogEntry);

    fn log_warning(&mut self, entry: &LogEntry);
}

/// Logging callback selected once per run
pub type LogFn = fn(&mut dyn BuildLog, &LogEntry);

pub fn select_logger(severity: Severity) -> LogFn {
    match severity {
        Severity::Error => |log: &mut dyn BuildLog, entry: &LogEntry| log.log_error(entry),
        Severity::Warning => |log: &mut dyn BuildLog, entry: &LogEntry| log.log_warning(entry),
    }
}

/// [`BuildLog`] that keeps every entry in memory
#[derive(Debug, Default)]
pub struct MemoryLog {
    pub entries: Vec<(Severity, LogEntry)>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> impl Iterator<Item = &LogEntry> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LogEntry> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(move |(s, _)| *s == severity)
            .map(|(_, e)| e)
    }
}

impl BuildLog for MemoryLog {
    fn log_error(&mut self, entry: &LogEntry) {
        self.entries.push((Severity::Error, entry.clone()));
    }

    fn log_warning(&mut self, entry: &LogEntry) {
        self.entries.push((Severity::Warning, entry.clone()));
    }
}
