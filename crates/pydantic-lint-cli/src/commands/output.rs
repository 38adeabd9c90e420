//! Output formatting for lint results.

use anyhow::Result;
use miette::GraphicalReportHandler;
use pydantic_lint_core::{LintResult, Violation, ViolationDiagnostic};
use std::collections::HashMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Prints lint results in the specified format.
///
/// `root` is the analysis root that violation paths are relative to; the
/// pretty format reads sources from there.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    print!("{}", render(result, format, root)?);
    Ok(())
}

/// Renders lint results in the specified format.
pub fn render(result: &LintResult, format: OutputFormat, root: &Path) -> Result<String> {
    let output = match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Pretty => {
            let handler = GraphicalReportHandler::new();
            render_pretty(result, root, &handler)?
        }
    };
    Ok(output)
}

fn render_text(result: &LintResult) -> String {
    let mut output = String::new();
    for violation in &result.violations {
        output.push_str(&violation.format());
        output.push('\n');
    }
    output.push_str(&summary_line(result));
    output
}

fn summary_line(result: &LintResult) -> String {
    let (errors, warnings, _) = result.count_by_severity();
    let color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    format!("{color}{}\x1b[0m\n", result.summary())
}

fn render_compact(result: &LintResult) -> String {
    let mut output = String::new();
    for v in &result.violations {
        let _ = writeln!(
            output,
            "{}:{}:{}: {} [{}] {}",
            v.location.file.display(),
            v.location.line,
            v.location.column + 1,
            v.severity,
            v.code,
            v.message,
        );
    }
    output
}

fn render_pretty(
    result: &LintResult,
    root: &Path,
    handler: &GraphicalReportHandler,
) -> Result<String> {
    let mut sources: HashMap<PathBuf, Option<String>> = HashMap::new();
    let mut output = String::new();

    for violation in &result.violations {
        let source = sources
            .entry(violation.location.file.clone())
            .or_insert_with(|| read_source(root, violation))
            .clone();

        match source {
            Some(source) => {
                let diagnostic = ViolationDiagnostic::new(violation, source);
                handler.render_report(&mut output, &diagnostic)?;
            }
            None => output.push_str(&violation.format()),
        }
        output.push('\n');
    }
    output.push_str(&summary_line(result));
    Ok(output)
}

fn read_source(root: &Path, violation: &Violation) -> Option<String> {
    let path = root.join(&violation.location.file);
    match std::fs::read_to_string(&path) {
        Ok(source) => Some(source),
        Err(e) => {
            tracing::warn!("Cannot read {} for snippet: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::GraphicalTheme;
    use pydantic_lint_core::{Location, Severity, Suggestion};
    use tempfile::TempDir;

    const SOURCE: &str = "class A(BaseModel):\n    a = 1\n";

    fn plain_handler() -> GraphicalReportHandler {
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
    }

    fn sample() -> LintResult {
        let violation = Violation::new(
            "RULE-NONANNOTATED-ATTR",
            "non-annotated-attribute",
            Severity::Error,
            Location::new(PathBuf::from("models.py"), 2, 4).with_span(24, 5),
            "Non-annotated attribute inside model",
        )
        .with_suggestion(Suggestion::new("Add a type annotation"));
        LintResult {
            violations: vec![violation],
            files_checked: 1,
        }
    }

    #[test]
    fn compact_uses_one_based_columns() {
        let out = render(&sample(), OutputFormat::Compact, Path::new(".")).unwrap();
        assert_eq!(
            out,
            "models.py:2:5: error [RULE-NONANNOTATED-ATTR] Non-annotated attribute inside model\n"
        );
    }

    #[test]
    fn text_includes_help_and_summary() {
        let out = render(&sample(), OutputFormat::Text, Path::new(".")).unwrap();
        assert!(out.starts_with("RULE-NONANNOTATED-ATTR non-annotated-attribute at models.py:2:5\n"));
        assert!(out.contains("  = help: Add a type annotation\n"));
        assert!(out.contains("Found 1 error(s), 0 warning(s), 0 info(s) in 1 file(s)"));
    }

    #[test]
    fn json_round_trips_violation_fields() {
        let out = render(&sample(), OutputFormat::Json, Path::new(".")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["files_checked"], 1);
        assert_eq!(value["violations"][0]["code"], "RULE-NONANNOTATED-ATTR");
        assert_eq!(value["violations"][0]["severity"], "error");
        assert_eq!(value["violations"][0]["location"]["line"], 2);
    }

    #[test]
    fn pretty_shows_source_snippet() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("models.py"), SOURCE).unwrap();

        let out = render_pretty(&sample(), dir.path(), &plain_handler()).unwrap();
        assert!(out.contains("[RULE-NONANNOTATED-ATTR] Non-annotated attribute inside model"));
        assert!(out.contains("a = 1"));
        assert!(out.contains("non-annotated-attribute"));
        assert!(out.contains("Add a type annotation"));
    }

    #[test]
    fn pretty_falls_back_when_source_is_missing() {
        let dir = TempDir::new().unwrap();
        let out = render_pretty(&sample(), dir.path(), &plain_handler()).unwrap();
        assert!(out.starts_with("RULE-NONANNOTATED-ATTR non-annotated-attribute at models.py:2:5\n"));
    }
}
