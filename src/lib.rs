//! Run a JSLint-family linter over a set of files, drop violations inside
//! ignore sections, log the rest and optionally write a text or HTML report.
//!
//! ```no_run
//! use jslint_task::{LintTask, MemoryLog, OsFileSystem, ProcessLinterFactory};
//!
//! let task = LintTask::new(vec!["app.js".into()]);
//! let factory = ProcessLinterFactory::new(vec!["jslint-json".to_string()]);
//! let mut log = MemoryLog::new();
//!
//! let outcome = task.execute(&factory, &OsFileSystem, &mut log)?;
//! println!("{} violations", outcome.summary.violation_count);
//! # Ok::<(), jslint_task::TaskError>(())
//! ```

pub mod config;
pub mod fs;
pub mod ignore;
pub mod linter;
pub mod log;
pub mod reporter;
pub mod run;
pub mod task;

pub use config::{ColorMode, ConfigError, Options, ValidationError};
pub use fs::{FileSystem, OsFileSystem};
pub use ignore::{FilterResult, IgnoreMarkers, IgnoreSections, filter_violations};
pub use jslint_task_common::{
    LintOptions, Linter, LinterError, LinterVariant, SourceKind, Violation,
};
pub use linter::{LinterFactory, ProcessLinter, ProcessLinterFactory};
pub use log::{BuildLog, LogEntry, MemoryLog, Severity};
pub use reporter::{ReportFormat, Reporter};
pub use run::{FileRecord, RunState, RunSummary};
pub use task::{LintTask, TaskError, TaskOutcome};
