use super::{ReportHeader, ReportTemplate};
use jslint_task_common::Violation;

pub(crate) struct TextTemplate;

impl ReportTemplate for TextTemplate {
    fn report(&self, header: &ReportHeader<'_>, files: &str) -> String {
        format!(
            "{}\nGenerated {}\n\n{} processed files\n{} violating files\n{} total violations\n\n{}",
            header.title,
            header.generated,
            header.processed_file_count,
            header.violating_file_count,
            header.violation_count,
            files
        )
    }

    fn file(&self, path: &str, violation_count: usize, violations: &str) -> String {
        format!("{} ({} violations)\n{}\n", path, violation_count, violations)
    }

    fn violation(&self, violation: &Violation, message: &str, _evidence: Option<&str>) -> String {
        format!(
            "    {} (line {} character {})\n",
            message, violation.line, violation.column
        )
    }
}
