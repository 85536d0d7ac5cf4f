use super::{ReportHeader, ReportTemplate};
use jslint_task_common::Violation;
use std::borrow::Cow;

pub(crate) struct HtmlTemplate;

const STYLE: &str = "body { font-family: sans-serif; margin: 2em; }
h2 { font-size: 1.1em; border-bottom: 1px solid #ccc; }
.position { color: #666; }
pre.evidence { background: #f6f6f6; padding: 0.3em; margin: 0.2em 0 0.6em; }";

impl ReportTemplate for HtmlTemplate {
    fn report(&self, header: &ReportHeader<'_>, files: &str) -> String {
        format!(
            "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>{title}</title>
<style>
{style}
</style>
</head>
<body>
<h1>{title}</h1>
<p class=\"generated\">Generated {generated}</p>
<ul class=\"summary\">
<li>Processed files: {processed}</li>
<li>Violating files: {violating}</li>
<li>Total violations: {violations}</li>
</ul>
{files}</body>
</html>
",
            title = header.title,
            style = STYLE,
            generated = header.generated,
            processed = header.processed_file_count,
            violating = header.violating_file_count,
            violations = header.violation_count,
            files = files
        )
    }

    fn file(&self, path: &str, violation_count: usize, violations: &str) -> String {
        format!(
            "<div class=\"file\">\n<h2>{} ({} violations)</h2>\n<ol>\n{}</ol>\n</div>\n",
            path, violation_count, violations
        )
    }

    fn violation(&self, violation: &Violation, message: &str, evidence: Option<&str>) -> String {
        let evidence = evidence
            .map(|e| format!("<pre class=\"evidence\">{}</pre>", e))
            .unwrap_or_default();
        format!(
            "<li><span class=\"message\">{}</span> <span class=\"position\">(line {} character {})</span>{}</li>\n",
            message, violation.line, violation.column, evidence
        )
    }

    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        escape_html(text)
    }
}

/// Escape markup special characters
fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::ReportFormat;
    use crate::run::RunState;
    use chrono::NaiveDateTime;

    fn generated() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-03-01T09:30:00", "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn render(state: &RunState) -> String {
        ReportFormat::Html.render_at(state, generated())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("'x' \"y\""), "&apos;x&apos; &quot;y&quot;");
        assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_total_counts() {
        let mut state = RunState::new();
        state.add_violation("uberfile.js", Violation::new(23, 44, "Something wrong"));
        state.add_file("uberfile2.js");
        state.add_file("uberfile3.js");

        let actual = render(&state);

        assert!(actual.contains("<li>Processed files: 3</li>"));
        assert!(actual.contains("<li>Violating files: 1</li>"));
        assert!(actual.contains("<li>Total violations: 1</li>"));
    }

    #[test]
    fn test_files_with_count() {
        let mut state = RunState::new();
        state.add_violation("uberfile.js", Violation::new(23, 44, "Something wrong"));
        state.add_violation("uberfile.js", Violation::new(33, 54, "Stupidity detected"));
        state.add_violation("uberfile2.js", Violation::new(33, 54, "Stupidity detected"));

        let actual = render(&state);

        assert!(actual.contains("uberfile.js (2 violations)"));
        assert!(actual.contains("uberfile2.js (1 violations)"));
    }

    #[test]
    fn test_files_without_violations_are_not_listed() {
        let mut state = RunState::new();
        state.add_violation("uberfile.js", Violation::new(23, 44, "Something wrong"));
        state.add_file("uberfile2.js");

        let actual = render(&state);

        assert!(!actual.contains("uberfile2.js"));
    }

    #[test]
    fn test_violations_with_evidence() {
        let mut state = RunState::new();
        state.add_violation(
            "uberfile.js",
            Violation::new(23, 44, "Something wrong").with_evidence("evidence 1"),
        );
        state.add_violation("uberfile.js", Violation::new(33, 54, "Stupidity detected"));

        let actual = render(&state);

        assert!(actual.contains("Something wrong"));
        assert!(actual.contains("line 23 character 44"));
        assert!(actual.contains("<pre class=\"evidence\">evidence 1</pre>"));
        assert!(actual.contains("Stupidity detected"));
        assert!(actual.contains("line 33 character 54"));
        assert_eq!(actual.matches("class=\"evidence\"").count(), 1);
    }

    #[test]
    fn test_markup_is_escaped() {
        let mut state = RunState::new();
        state.add_violation(
            "<b>.js",
            Violation::new(1, 1, "Expected '<' & saw '>'").with_evidence("if (a < b && c)"),
        );

        let actual = render(&state);

        assert!(actual.contains("&lt;b&gt;.js (1 violations)"));
        assert!(actual.contains("Expected &apos;&lt;&apos; &amp; saw &apos;&gt;&apos;"));
        assert!(actual.contains("if (a &lt; b &amp;&amp; c)"));
        assert!(!actual.contains("<b>.js"));
    }

    #[test]
    fn test_generated_timestamp() {
        let actual = render(&RunState::new());
        assert!(actual.contains("Generated 2024-03-01T09:30:00"));
        assert!(actual.contains("<title>JSLint Report</title>"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut state = RunState::new();
        state.add_violation("a.js", Violation::new(1, 5, "x"));
        state.add_file("b.js");

        assert_eq!(render(&state), render(&state));
    }
}
