use super::Cli;
use super::console::{ConsoleLog, format_summary};
use super::files::collect_source_files;
use clap::CommandFactory;
use colored::control;
use jslint_task::{ColorMode, LintTask, Options, OsFileSystem, ProcessLinterFactory, TaskError};
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

pub fn run_lint(cli: Cli) -> ExitCode {
    // 1. Validate arguments
    if cli.files.is_empty() {
        let _ = Cli::command().print_help();
        eprintln!();
        return ExitCode::from(2);
    }

    // 2. Locate and load options (explicit path must exist)
    let options_path = match &cli.options {
        Some(path) => Some(path.clone()),
        None => {
            let search_dir = cli
                .files
                .first()
                .and_then(|p| if p.is_dir() { Some(p.as_path()) } else { p.parent() })
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            Options::find_config_file(search_dir)
        }
    };

    let options = match &options_path {
        Some(path) => match Options::from_file(path) {
            Ok(options) => {
                if cli.verbose {
                    eprintln!("Using options: {}", path.display());
                }
                options
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        },
        None => Options::default(),
    };

    // 3. Configure color output (CLI flags take precedence over options)
    if cli.color {
        control::set_override(true);
    } else if cli.no_color {
        control::set_override(false);
    } else {
        match options.color_mode() {
            ColorMode::Always => control::set_override(true),
            ColorMode::Never => control::set_override(false),
            ColorMode::Auto => {}
        }
    }

    // 4. Expand inputs into source files
    let source_files = match collect_source_files(&cli.files, &options.include) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    if cli.verbose {
        eprintln!("Linting {} file(s)", source_files.len());
        for path in &source_files {
            eprintln!("  - {}", path.display());
        }
    }

    // 5. Run
    let task = LintTask {
        source_files,
        options_file: options_path,
        report_file: cli.report.clone(),
        treat_violations_as_warnings: cli.warnings,
    };
    let factory = ProcessLinterFactory::new(options.linter_command());
    let mut log = ConsoleLog::new();

    let outcome = match task.execute(&factory, &OsFileSystem, &mut log) {
        Ok(outcome) => outcome,
        Err(TaskError::ReportWrite {
            path,
            source,
            outcome,
        }) => {
            eprintln!("{}", format_summary(&outcome.summary));
            eprintln!("Error writing report {}: {}", path.display(), source);
            return ExitCode::from(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    info!(
        errors = log.error_count(),
        warnings = log.warning_count(),
        "lint finished"
    );

    if log.error_count() + log.warning_count() > 0 {
        println!();
    }
    eprintln!("{}", format_summary(&outcome.summary));

    if cli.verbose
        && outcome.summary.processed_file_count > 0
        && let Some(report) = report_destination(cli.report.as_deref(), &options)
    {
        eprintln!("Report written to {}", report.display());
    }

    if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn report_destination<'a>(flag: Option<&'a Path>, options: &'a Options) -> Option<&'a Path> {
    flag.or(options.output.report_file.as_deref())
        .filter(|p| !p.as_os_str().is_empty())
}
