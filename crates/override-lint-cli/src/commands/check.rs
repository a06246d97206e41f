//! Check command implementation.

use anyhow::{bail, Context, Result};
use override_lint_core::{Analyzer, Config, RuleBox, Severity};
use override_lint_py::PythonParser;
use override_lint_rules::{all_rules, rule_by_id};
use std::path::Path;

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Options for a `check` run.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// How to print the results.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run instead of all rules.
    pub rules: Option<String>,
    /// Extra exclude patterns on top of the configured ones.
    pub exclude: Vec<String>,
    /// Failing severity; falls back to `fail_on` from config.
    pub fail_on: Option<Severity>,
    /// Treat unparsable files as fatal.
    pub strict: bool,
}

/// Runs the check command.
///
/// Returns `true` when a violation meets the failing severity.
pub fn run(path: &Path, explicit_config: Option<&Path>, options: &CheckOptions) -> Result<bool> {
    let project_dir = project_dir(path);
    let source = config_resolver::resolve(project_dir, explicit_config);
    let config = load_config(&source)?;

    let mut builder = Analyzer::builder()
        .root(path)
        .parser(PythonParser::new())
        .config(config)
        .fail_on_parse_error(options.strict);

    for pattern in &options.exclude {
        builder = builder.exclude(pattern.clone());
    }

    for rule in select_rules(options.rules.as_deref())? {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rule(s)",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.base_dir())?;

    let threshold = options
        .fail_on
        .unwrap_or_else(|| analyzer.config().fail_on_severity());
    Ok(result.has_violations_at(threshold))
}

/// Directory searched for project configuration.
fn project_dir(path: &Path) -> &Path {
    if path.is_file() {
        path.parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    } else {
        path
    }
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(p) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", p.display());
    }
    Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
}

fn select_rules(filter: Option<&str>) -> Result<Vec<RuleBox>> {
    let Some(filter) = filter else {
        return Ok(all_rules());
    };

    let mut rules: Vec<RuleBox> = Vec::new();
    for id in filter.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        match rule_by_id(id) {
            Some(rule) if rules.iter().any(|r| r.code() == rule.code()) => {}
            Some(rule) => rules.push(rule),
            None => tracing::warn!("Unknown rule: {}", id),
        }
    }

    if rules.is_empty() {
        bail!("No known rules selected by --rules {filter:?}; see `override-lint list-rules`");
    }
    Ok(rules)
}
