use crate::ignore::IgnoreMarkers;
use crate::linter::default_command;
use jslint_task_common::{LintOptions, LinterVariant, SourceKind};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".jslint-task.toml";

/// Options for jslint-task loaded from .jslint-task.toml
#[derive(Debug, Default, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub linter: LinterConfig,
    #[serde(default)]
    pub include: IncludeConfig,
    #[serde(default)]
    pub ignore: IgnoreMarkers,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub color: ColorConfig,
}

/// `[linter]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinterConfig {
    #[serde(default)]
    pub variant: LinterVariant,
    /// Command line overriding the variant's default command
    pub command: Option<Vec<String>>,
    /// Option flags passed through to the linter
    #[serde(default)]
    pub options: Map<String, Value>,
}

/// `[include]` section: which file types are picked up from directories and globs
#[derive(Debug, Clone, Deserialize)]
pub struct IncludeConfig {
    #[serde(default = "default_true")]
    pub js: bool,
    #[serde(default)]
    pub css: bool,
    #[serde(default)]
    pub html: bool,
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self {
            js: true,
            css: false,
            html: false,
        }
    }
}

impl IncludeConfig {
    pub fn includes(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::JavaScript => self.js,
            SourceKind::Css => self.css,
            SourceKind::Html => self.html,
        }
    }
}

/// `[output]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub treat_violations_as_warnings: bool,
    pub report_file: Option<PathBuf>,
}

/// Color output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColorConfig {
    /// Color mode: "auto" (default), "always", or "never"
    #[serde(default)]
    pub ui: ColorMode,
}

/// Color mode for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Automatically detect (default) - respects NO_COLOR env and terminal detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl<'de> Deserialize<'de> for ColorMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(D::Error::custom(format!(
                "invalid color mode '{}', expected 'auto', 'always', or 'never'",
                s
            ))),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Options {
    /// Load options from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_str_at(&content, path)
    }

    /// Parse options from TOML text; `path` is only used in error messages
    pub fn from_str_at(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(message) = options.check() {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message,
            });
        }

        Ok(options)
    }

    /// Find .jslint-task.toml in the given directory or its parents
    pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
        let mut current = dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    fn check(&self) -> Option<String> {
        if self.ignore.start.is_empty() || self.ignore.end.is_empty() {
            return Some("ignore markers must not be empty".to_string());
        }
        if self.linter.command.as_ref().is_some_and(|c| c.is_empty()) {
            return Some("linter command must not be empty".to_string());
        }
        None
    }

    /// Options handed to the linter on every call
    pub fn lint_options(&self) -> LintOptions {
        LintOptions {
            variant: self.linter.variant,
            options: self.linter.options.clone(),
        }
    }

    /// Command line used to run the external linter
    pub fn linter_command(&self) -> Vec<String> {
        self.linter
            .command
            .clone()
            .unwrap_or_else(|| default_command(self.linter.variant))
    }

    /// Get the color mode setting
    pub fn color_mode(&self) -> ColorMode {
        self.color.ui
    }

    /// Validate a configuration file, reporting unknown sections and keys
    pub fn validate_file(path: &Path) -> Result<Vec<ValidationError>, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut errors = validate_keys(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Typed parse catches bad values that the key check cannot see
        if let Err(e) = Self::from_str_at(&content, path) {
            errors.push(ValidationError {
                key: String::new(),
                message: e.to_string(),
            });
        }

        Ok(errors)
    }
}

/// Known keys per section; `linter.options` is free-form
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("linter", &["variant", "command", "options"]),
    ("include", &["js", "css", "html"]),
    ("ignore", &["start", "end"]),
    ("output", &["treat_violations_as_warnings", "report_file"]),
    ("color", &["ui"]),
];

fn validate_keys(content: &str) -> Result<Vec<ValidationError>, toml::de::Error> {
    let table: toml::Table = toml::from_str(content)?;
    let mut errors = Vec::new();

    for (section, value) in &table {
        let Some((_, keys)) = KNOWN_KEYS.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(ValidationError {
                key: section.clone(),
                message: format!("unknown section '{}'", section),
            });
            continue;
        };

        let Some(entries) = value.as_table() else {
            errors.push(ValidationError {
                key: section.clone(),
                message: format!("'{}' must be a table", section),
            });
            continue;
        };

        for key in entries.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(ValidationError {
                    key: format!("{}.{}", section, key),
                    message: format!("unknown field '{}' in [{}]", key, section),
                });
            }
        }
    }

    Ok(errors)
}

/// A problem found while validating a configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Options file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read options file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse options file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid options file '{}': {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# jslint-task options

[linter]
# "jslint" or "jshint"
variant = "jslint"
# Command printing violations as JSON; defaults to "jslint-json" / "jshint-json"
# command = ["jslint-json"]

[linter.options]
# Passed to the linter as JSON
# browser = true
# indent = 4

[include]
# File types picked up when a directory or glob is given
js = true
css = false
html = false

[ignore]
# Violations between these markers are not reported
start = "/*ignore jslint start*/"
end = "/*ignore jslint end*/"

[output]
# Log violations as warnings and succeed even when some are found
treat_violations_as_warnings = false
# Write a report; ".htm"/".html" produce HTML, anything else plain text
# report_file = "jslint-report.html"

[color]
# "auto", "always", or "never"
ui = "auto"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.linter.variant, LinterVariant::JsLint);
        assert!(options.include.js);
        assert!(!options.include.css);
        assert!(!options.include.html);
        assert!(!options.output.treat_violations_as_warnings);
        assert!(options.output.report_file.is_none());
        assert_eq!(options.ignore, IgnoreMarkers::default());
        assert_eq!(options.linter_command(), vec!["jslint-json"]);
    }

    #[test]
    fn test_parse_options() {
        let file = write_config(
            r#"
[linter]
variant = "jshint"
command = ["node", "lint.js"]

[linter.options]
browser = true
maxlen = 120

[include]
css = true

[ignore]
start = "// lint-off"
end = "// lint-on"

[output]
treat_violations_as_warnings = true
report_file = "out/report.html"
"#,
        );

        let options = Options::from_file(file.path()).unwrap();

        assert_eq!(options.linter.variant, LinterVariant::JsHint);
        assert_eq!(options.linter_command(), vec!["node", "lint.js"]);
        assert!(options.include.js);
        assert!(options.include.css);
        assert!(!options.include.html);
        assert_eq!(options.ignore.start, "// lint-off");
        assert_eq!(options.ignore.end, "// lint-on");
        assert!(options.output.treat_violations_as_warnings);
        assert_eq!(
            options.output.report_file.as_deref(),
            Some(Path::new("out/report.html"))
        );

        let lint_options = options.lint_options();
        assert_eq!(lint_options.variant, LinterVariant::JsHint);
        assert_eq!(lint_options.options["browser"], Value::Bool(true));
        assert_eq!(lint_options.options["maxlen"], Value::from(120));
    }

    #[test]
    fn test_empty_options() {
        let file = write_config("");
        let options = Options::from_file(file.path()).unwrap();
        assert_eq!(options.linter.variant, LinterVariant::JsLint);
        assert!(options.include.js);
    }

    #[test]
    fn test_partial_ignore_section_keeps_other_default() {
        let file = write_config("[ignore]\nstart = \"/* off */\"\n");
        let options = Options::from_file(file.path()).unwrap();
        assert_eq!(options.ignore.start, "/* off */");
        assert_eq!(options.ignore.end, crate::ignore::DEFAULT_IGNORE_END);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = Options::from_file(Path::new("/nonexistent/.jslint-task.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert!(err.to_string().contains("Options file not found"));
    }

    #[test]
    fn test_invalid_variant() {
        let file = write_config("[linter]\nvariant = \"eslint\"\n");
        let err = Options::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_empty_marker_is_invalid() {
        let file = write_config("[ignore]\nend = \"\"\n");
        let err = Options::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_empty_command_is_invalid() {
        let file = write_config("[linter]\ncommand = []\n");
        let err = Options::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("linter command must not be empty"));
    }

    #[test]
    fn test_color_config() {
        let file = write_config("[color]\nui = \"never\"\n");
        let options = Options::from_file(file.path()).unwrap();
        assert_eq!(options.color_mode(), ColorMode::Never);

        let file = write_config("[color]\nui = \"sometimes\"\n");
        assert!(Options::from_file(file.path()).is_err());
    }

    #[test]
    fn test_include_config() {
        let include = IncludeConfig {
            js: false,
            css: true,
            html: true,
        };
        assert!(!include.includes(SourceKind::JavaScript));
        assert!(include.includes(SourceKind::Css));
        assert!(include.includes(SourceKind::Html));
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("src").join("lib");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[linter]\nvariant = \"jshint\"\n",
        )
        .unwrap();

        let path = Options::find_config_file(&nested).unwrap();
        assert_eq!(path, dir.path().join(CONFIG_FILE_NAME));
        let options = Options::from_file(&path).unwrap();
        assert_eq!(options.linter.variant, LinterVariant::JsHint);
    }

    #[test]
    fn test_default_template_is_valid() {
        let file = write_config(DEFAULT_CONFIG_TEMPLATE);
        let errors = Options::validate_file(file.path()).unwrap();
        assert!(errors.is_empty(), "{:?}", errors);

        let options = Options::from_file(file.path()).unwrap();
        assert_eq!(options.ignore, IgnoreMarkers::default());
    }

    #[test]
    fn test_validate_unknown_keys() {
        let file = write_config(
            r#"
[linter]
variant = "jslint"
mode = "strict"

[linter.options]
anything_goes = true

[reports]
path = "x"
"#,
        );

        let errors = Options::validate_file(file.path()).unwrap();
        let keys: Vec<_> = errors.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["linter.mode", "reports"]);
        assert_eq!(errors[0].to_string(), "unknown field 'mode' in [linter]");
    }
}
