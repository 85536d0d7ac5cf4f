use crate::options::LintOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// A single finding reported by a linter
///
/// Positions are 1-based, matching editor coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub line: usize,
    pub column: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl Violation {
    pub fn new(line: usize, column: usize, message: &str) -> Self {
        Self {
            line,
            column,
            message: message.to_string(),
            evidence: None,
        }
    }

    pub fn with_evidence(mut self, evidence: &str) -> Self {
        self.evidence = Some(evidence.to_string());
        self
    }
}

/// Kind of source file, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    JavaScript,
    Css,
    Html,
}

impl SourceKind {
    /// Classify a path by extension (case-insensitive)
    ///
    /// Returns `None` for extensions the runner does not know about.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "js" | "mjs" | "cjs" => Some(SourceKind::JavaScript),
            "css" => Some(SourceKind::Css),
            "htm" | "html" => Some(SourceKind::Html),
            _ => None,
        }
    }

    /// Whether a file of this kind is linted as plain script source
    pub fn is_source_language(kind: Option<Self>) -> bool {
        matches!(kind, None | Some(SourceKind::JavaScript))
    }
}

/// Errors raised by a linter implementation
#[derive(Debug, Error)]
pub enum LinterError {
    #[error("Failed to start linter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Linter '{program}' exited with status {status}: {stderr}")]
    Exit {
        program: String,
        status: i32,
        stderr: String,
    },

    #[error("Failed to decode output of linter '{program}': {source}")]
    Output {
        program: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Linter I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A linter that reports violations for a source text
///
/// One instance is acquired per run and used for every file of that run. It is
/// dropped once the run ends, whether the run succeeded or not.
pub trait Linter {
    /// Lint `source` and return its violations in reporting order
    fn lint(
        &mut self,
        source: &str,
        options: &LintOptions,
        is_source_language: bool,
    ) -> Result<Vec<Violation>, LinterError>;
}

impl<L: Linter + ?Sized> Linter for Box<L> {
    fn lint(
        &mut self,
        source: &str,
        options: &LintOptions,
        is_source_language: bool,
    ) -> Result<Vec<Violation>, LinterError> {
        (**self).lint(source, options, is_source_language)
    }
}
