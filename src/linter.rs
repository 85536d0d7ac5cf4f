use jslint_task_common::{LintOptions, Linter, LinterError, LinterVariant, Violation};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

pub const OPTIONS_ENV: &str = "JSLINT_TASK_OPTIONS";
pub const VARIANT_ENV: &str = "JSLINT_TASK_VARIANT";
pub const SOURCE_LANGUAGE_ENV: &str = "JSLINT_TASK_SOURCE_LANGUAGE";

/// Creates the linter used for one run
pub trait LinterFactory {
    fn create_linter(&self) -> Result<Box<dyn Linter>, LinterError>;
}

impl<F> LinterFactory for F
where
    F: Fn() -> Result<Box<dyn Linter>, LinterError>,
{
    fn create_linter(&self) -> Result<Box<dyn Linter>, LinterError> {
        self()
    }
}

/// Default command line for a linter variant
pub fn default_command(variant: LinterVariant) -> Vec<String> {
    match variant {
        LinterVariant::JsLint => vec!["jslint-json".to_string()],
        LinterVariant::JsHint => vec!["jshint-json".to_string()],
    }
}

/// Linter that runs an external command once per file
///
/// The source text is written to the command's stdin. Lint options are passed
/// through the environment:
///
/// - `JSLINT_TASK_VARIANT`: `jslint` or `jshint`
/// - `JSLINT_TASK_OPTIONS`: option flags as a JSON object
/// - `JSLINT_TASK_SOURCE_LANGUAGE`: `1` for script source, `0` for CSS/HTML
///
/// The command must print a JSON array of violations
/// (`[{"line": 1, "column": 5, "message": "...", "evidence": "..."}]`) on
/// stdout. Its exit status is only consulted when stdout cannot be decoded,
/// since most linters exit non-zero when they find problems.
#[derive(Debug, Clone)]
pub struct ProcessLinter {
    program: String,
    args: Vec<String>,
}

impl ProcessLinter {
    /// Build from a command line; `None` if the command is empty
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Linter for ProcessLinter {
    fn lint(
        &mut self,
        source: &str,
        options: &LintOptions,
        is_source_language: bool,
    ) -> Result<Vec<Violation>, LinterError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(VARIANT_ENV, options.variant.as_str())
            .env(OPTIONS_ENV, options.options_json())
            .env(SOURCE_LANGUAGE_ENV, if is_source_language { "1" } else { "0" })
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| LinterError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("linter stdin was not captured"))?;

        // Feed stdin from a helper thread so a chatty linter cannot block on a full stdout pipe
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(source.as_bytes()));
            let output = child.wait_with_output();
            (output, writer.join())
        });
        let output = output?;
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(std::io::Error::other("linter stdin writer panicked").into()),
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(
            program = %self.program,
            status = ?output.status.code(),
            "linter finished"
        );

        if stdout.trim().is_empty() && output.status.success() {
            return Ok(Vec::new());
        }

        serde_json::from_str(stdout.trim()).map_err(|source| {
            if output.status.success() {
                LinterError::Output {
                    program: self.program.clone(),
                    source,
                }
            } else {
                LinterError::Exit {
                    program: self.program.clone(),
                    status: output.status.code().unwrap_or(-1),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                }
            }
        })
    }
}

/// [`LinterFactory`] producing a [`ProcessLinter`] for a fixed command line
#[derive(Debug, Clone)]
pub struct ProcessLinterFactory {
    command: Vec<String>,
}

impl ProcessLinterFactory {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl LinterFactory for ProcessLinterFactory {
    fn create_linter(&self) -> Result<Box<dyn Linter>, LinterError> {
        let linter = ProcessLinter::from_command(&self.command).ok_or_else(|| {
            LinterError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "linter command is empty",
            ))
        })?;
        debug!(program = linter.program(), "acquired process linter");
        Ok(Box::new(linter))
    }
}
