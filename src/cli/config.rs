use clap::Subcommand;
use jslint_task::Options;
use jslint_task::config::{CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate a default .jslint-task.toml options file
    Init {
        /// Output path for the options file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate an options file for unknown fields and bad values
    Validate {
        /// Path to the options file to validate
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,
    },
}

pub fn run_config(command: &ConfigCommands) -> ExitCode {
    match command {
        ConfigCommands::Init { output, force } => run_init(output, *force),
        ConfigCommands::Validate { config } => run_validate(config),
    }
}

fn run_init(output: &Path, force: bool) -> ExitCode {
    if output.exists() && !force {
        eprintln!(
            "Error: {} already exists. Use --force to overwrite.",
            output.display()
        );
        return ExitCode::from(1);
    }

    match fs::write(output, DEFAULT_CONFIG_TEMPLATE) {
        Ok(()) => {
            eprintln!("Created {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output.display(), e);
            ExitCode::from(2)
        }
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    if !config_path.exists() {
        eprintln!("Error: {} not found", config_path.display());
        return ExitCode::from(2);
    }

    match Options::validate_file(config_path) {
        Ok(errors) => {
            if errors.is_empty() {
                eprintln!("{}: OK", config_path.display());
                ExitCode::SUCCESS
            } else {
                eprintln!("{}:", config_path.display());
                for error in &errors {
                    eprintln!("  - {}", error);
                }
                eprintln!("\nFound {} error(s)", errors.len());
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_template() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join(CONFIG_FILE_NAME);

        assert_eq!(run_init(&output, false), ExitCode::SUCCESS);
        assert_eq!(fs::read_to_string(&output).unwrap(), DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&output, "# mine\n").unwrap();

        assert_eq!(run_init(&output, false), ExitCode::from(1));
        assert_eq!(fs::read_to_string(&output).unwrap(), "# mine\n");

        assert_eq!(run_init(&output, true), ExitCode::SUCCESS);
        assert_eq!(fs::read_to_string(&output).unwrap(), DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn test_validate_exit_codes() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good.toml");
        let bad = temp.path().join("bad.toml");
        fs::write(&good, DEFAULT_CONFIG_TEMPLATE).unwrap();
        fs::write(&bad, "[linter]\nmode = \"strict\"\n").unwrap();

        assert_eq!(run_validate(&good), ExitCode::SUCCESS);
        assert_eq!(run_validate(&bad), ExitCode::from(1));
        assert_eq!(run_validate(&temp.path().join("missing.toml")), ExitCode::from(2));
    }
}
