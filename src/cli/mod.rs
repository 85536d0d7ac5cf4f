pub mod config;
pub mod console;
pub mod files;
pub mod lint;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jslint-task")]
#[command(author, version, about = "Lint JavaScript files with JSLint or JSHint", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Files, directories or glob patterns to lint
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Path to options file (defaults to the nearest .jslint-task.toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Write a report to this file (.html/.htm for HTML, anything else for text)
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Report violations as warnings and exit successfully
    #[arg(short, long)]
    pub warnings: bool,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Options file management
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lint_flags() {
        let cli = Cli::parse_from([
            "jslint-task",
            "-c",
            "opts.toml",
            "--report",
            "out.html",
            "-w",
            "a.js",
            "src",
        ]);

        assert!(cli.command.is_none());
        assert_eq!(cli.files, vec![PathBuf::from("a.js"), PathBuf::from("src")]);
        assert_eq!(cli.options, Some(PathBuf::from("opts.toml")));
        assert_eq!(cli.report, Some(PathBuf::from("out.html")));
        assert!(cli.warnings);
    }

    #[test]
    fn test_color_flags_conflict() {
        assert!(Cli::try_parse_from(["jslint-task", "--color", "--no-color", "a.js"]).is_err());
    }
}
