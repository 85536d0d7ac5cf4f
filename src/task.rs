//! The lint run: read, lint, filter, log, count and report.

use crate::config::{ConfigError, Options};
use crate::fs::FileSystem;
use crate::ignore::{IgnoreSections, filter_violations};
use crate::linter::LinterFactory;
use crate::log::{BuildLog, LogEntry, Severity, select_logger};
use crate::reporter::Reporter;
use crate::run::{RunState, RunSummary};
use jslint_task_common::{LinterError, SourceKind};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Result of one lint run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskOutcome {
    /// `false` when surviving violations exist and they are treated as errors
    pub success: bool,
    pub summary: RunSummary,
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("The options file could not be found: {}", .path.display())]
    OptionsNotFound { path: PathBuf },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create linter: {0}")]
    CreateLinter(#[source] LinterError),

    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lint '{}': {source}", .path.display())]
    Lint {
        path: PathBuf,
        #[source]
        source: LinterError,
    },

    /// Linting finished but the report could not be saved; `outcome` is still valid
    #[error("Failed to write report '{}': {source}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        outcome: TaskOutcome,
    },
}

/// Parameters of one lint run
#[derive(Debug, Clone, Default)]
pub struct LintTask {
    /// Files to lint, in processing order
    pub source_files: Vec<PathBuf>,
    /// Options file; must exist when set
    pub options_file: Option<PathBuf>,
    /// Report destination, overriding `[output] report_file`
    pub report_file: Option<PathBuf>,
    /// Log violations as warnings and succeed regardless of them
    pub treat_violations_as_warnings: bool,
}

impl LintTask {
    pub fn new(source_files: Vec<PathBuf>) -> Self {
        Self {
            source_files,
            ..Self::default()
        }
    }

    /// Run the task
    ///
    /// The linter is created once and dropped before this returns, on success
    /// and on every error path.
    pub fn execute(
        &self,
        linter_factory: &dyn LinterFactory,
        fs: &dyn FileSystem,
        log: &mut dyn BuildLog,
    ) -> Result<TaskOutcome, TaskError> {
        if self.source_files.is_empty() {
            return Ok(TaskOutcome {
                success: true,
                summary: RunSummary::default(),
            });
        }

        let options = self.load_options(fs)?;
        let treat_as_warnings =
            self.treat_violations_as_warnings || options.output.treat_violations_as_warnings;
        let log_violation = select_logger(Severity::for_run(treat_as_warnings));
        let reporter = Reporter::create(
            self.report_file
                .as_deref()
                .or(options.output.report_file.as_deref()),
        );
        let lint_options = options.lint_options();

        let mut state = RunState::new();
        {
            let mut linter = linter_factory
                .create_linter()
                .map_err(TaskError::CreateLinter)?;

            for file in &self.source_files {
                let path_str = file.display().to_string();
                debug!(file = %path_str, "linting");

                let text = fs.read_to_string(file).map_err(|source| TaskError::Read {
                    path: file.clone(),
                    source,
                })?;
                let is_source_language = SourceKind::is_source_language(SourceKind::from_path(file));
                let violations = linter
                    .lint(&text, &lint_options, is_source_language)
                    .map_err(|source| TaskError::Lint {
                        path: file.clone(),
                        source,
                    })?;

                state.add_file(&path_str);

                if violations.is_empty() {
                    continue;
                }

                let sections = IgnoreSections::scan(&text, &options.ignore);
                let result = filter_violations(violations, &sections);
                if result.ignored_count > 0 {
                    debug!(
                        file = %path_str,
                        sections = sections.ranges().len(),
                        ignored = result.ignored_count,
                        "suppressed violations in ignore sections"
                    );
                }

                for violation in result.violations {
                    let entry =
                        LogEntry::at(&path_str, violation.line, violation.column, &violation.message);
                    log_violation(&mut *log, &entry);
                    state.add_violation(&path_str, violation);
                }
            }
            debug!("releasing linter");
        }

        let summary = state.summary();
        let outcome = TaskOutcome {
            success: treat_as_warnings || summary.violation_count == 0,
            summary,
        };

        if let Some(reporter) = reporter {
            let report = reporter.render(&state);
            fs.write(reporter.destination(), &report)
                .map_err(|source| TaskError::ReportWrite {
                    path: reporter.destination().to_path_buf(),
                    source,
                    outcome,
                })?;
            info!(path = %reporter.destination().display(), "report written");
        }

        Ok(outcome)
    }

    fn load_options(&self, fs: &dyn FileSystem) -> Result<Options, TaskError> {
        let Some(path) = &self.options_file else {
            return Ok(Options::default());
        };

        if !fs.exists(path) {
            return Err(TaskError::OptionsNotFound { path: path.clone() });
        }

        let content = fs.read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded options");
        Ok(Options::from_str_at(&content, path)?)
    }
}
