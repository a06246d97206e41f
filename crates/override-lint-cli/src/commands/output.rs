//! Output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use override_lint_core::{LintResult, Violation, ViolationDiagnostic};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Prints lint results in the given format.
///
/// Violation paths are relative to `base_dir`; text output reads the files
/// back from there to render source snippets.
pub fn print(result: &LintResult, format: OutputFormat, base_dir: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result, base_dir),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult, base_dir: &Path) {
    let mut sources = SourceCache::new(base_dir);

    for violation in &result.violations {
        match sources.get(&violation.location.file) {
            Some(content) => println!("{:?}", render(violation, content)),
            None => println!("{}", violation.format()),
        }
    }

    println!("{}", summary(result));
}

fn render(violation: &Violation, content: &str) -> Report {
    let name = format!(
        "{}:{}:{}",
        violation.location.file.display(),
        violation.location.line,
        violation.location.column
    );
    Report::new(ViolationDiagnostic::from(violation))
        .with_source_code(NamedSource::new(name, content.to_owned()))
}

fn summary(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    let color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    format!(
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)\x1b[0m",
        result.files_checked
    )
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{}", violation.format_compact());
    }
}

/// Reads each reported file at most once.
struct SourceCache<'a> {
    base_dir: &'a Path,
    files: HashMap<PathBuf, Option<String>>,
}

impl<'a> SourceCache<'a> {
    fn new(base_dir: &'a Path) -> Self {
        Self {
            base_dir,
            files: HashMap::new(),
        }
    }

    fn get(&mut self, relative: &Path) -> Option<&str> {
        let base_dir = self.base_dir;
        self.files
            .entry(relative.to_path_buf())
            .or_insert_with(|| match std::fs::read_to_string(base_dir.join(relative)) {
                Ok(content) => Some(content),
                Err(e) => {
                    tracing::debug!("No source for {}: {}", relative.display(), e);
                    None
                }
            })
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use override_lint_core::{Location, Severity};

    fn violation(file: &str) -> Violation {
        Violation::new(
            "OVR100",
            "require-override",
            Severity::Error,
            Location::new(PathBuf::from(file), 2, 5).with_span(13, 9),
            "method must contain an override-marker decorator",
        )
    }

    #[test]
    fn summary_counts_by_severity() {
        let mut result = LintResult::new();
        result.violations.push(violation("a.py"));
        result.files_checked = 4;
        let line = summary(&result);
        assert!(line.contains("Found 1 error(s), 0 warning(s), 0 info(s) in 4 file(s)"));
        assert!(line.starts_with("\x1b[31m"));
    }

    #[test]
    fn source_cache_reads_relative_to_base() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.py"), "class A(B):\n    def f(self): ...\n").unwrap();

        let mut cache = SourceCache::new(tmp.path());
        assert!(cache.get(Path::new("a.py")).is_some_and(|s| s.starts_with("class A")));
        assert!(cache.get(Path::new("missing.py")).is_none());
        assert_eq!(cache.files.len(), 2);
    }

    #[test]
    fn rendered_report_carries_code_and_help() {
        let v = violation("a.py").with_suggestion(override_lint_core::Suggestion::new(
            "Decorate `f` with @typing.override",
        ));
        let report = render(&v, "class A(B):\n    def f(self): ...\n");
        assert_eq!(
            report.to_string(),
            "[OVR100] method must contain an override-marker decorator"
        );
        let help = report.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("Decorate `f` with @typing.override"));
    }
}
