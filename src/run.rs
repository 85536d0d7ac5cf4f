//! Per-run accumulation of surviving violations.

use jslint_task_common::Violation;
use std::collections::HashMap;

/// Surviving violations of one processed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub violations: Vec<Violation>,
}

/// Counters describing a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed_file_count: usize,
    pub violating_file_count: usize,
    pub violation_count: usize,
}

/// Ordered mapping from file path to its [`FileRecord`]
///
/// Files keep the order in which they were first added. Adding a path that is
/// already present extends its existing record.
#[derive(Debug, Default)]
pub struct RunState {
    files: Vec<FileRecord>,
    index: HashMap<String, usize>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processed file, even if it has no violations
    pub fn add_file(&mut self, path: &str) {
        self.record_mut(path);
    }

    /// Record a surviving violation, registering the file if needed
    pub fn add_violation(&mut self, path: &str, violation: Violation) {
        self.record_mut(path).violations.push(violation);
    }

    fn record_mut(&mut self, path: &str) -> &mut FileRecord {
        let idx = match self.index.get(path) {
            Some(&idx) => idx,
            None => {
                self.files.push(FileRecord {
                    path: path.to_string(),
                    violations: Vec::new(),
                });
                let idx = self.files.len() - 1;
                self.index.insert(path.to_string(), idx);
                idx
            }
        };
        &mut self.files[idx]
    }

    /// Records in insertion order
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.index.get(path).map(|&idx| &self.files[idx])
    }

    pub fn processed_file_count(&self) -> usize {
        self.files.len()
    }

    pub fn violating_file_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| !f.violations.is_empty())
            .count()
    }

    pub fn violation_count(&self) -> usize {
        self.files.iter().map(|f| f.violations.len()).sum()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            processed_file_count: self.processed_file_count(),
            violating_file_count: self.violating_file_count(),
            violation_count: self.violation_count(),
        }
    }
}
