//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::noqa;
use crate::parser::{ParseError, ParserBox, SourceParser};
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the directory tree.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// A discovered file could not be read as UTF-8 text.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Error parsing a source file.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: ParseError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// No source parser was registered.
    #[error("No source parser configured")]
    MissingParser,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    parser: Option<ParserBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the source parser used to lower files.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set, an exclude pattern is not a
    /// valid glob, or the current directory cannot be determined.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;

        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        // Merge exclude patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        if let Some(ref config) = self.config {
            exclude_patterns.extend(config.analyzer.exclude.clone());
        }

        let compiled_excludes = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            parser,
            exclude_patterns,
            compiled_excludes,
            config: self.config.unwrap_or_default(),
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    parser: ParserBox,
    exclude_patterns: Vec<String>,
    compiled_excludes: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root path being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes all files and returns the results.
    ///
    /// Files are visited in path order; violations within a file keep the
    /// order the rules emitted them in.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, or if a file cannot be read
    /// or parsed while `fail_on_parse_error` is set. Otherwise such files are
    /// skipped with a warning.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!(
            "Starting {} analysis at {:?}",
            self.parser.language_id(),
            self.root
        );

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            match self.analyze_file(file_path) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(e @ (AnalyzerError::Parse { .. } | AnalyzerError::Read { .. })) => {
                    warn!("Skipping file: {}", e);
                    if self.fail_on_parse_error {
                        return Err(e);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes a single file and returns violations.
    fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.analyze_source(path, &content)
    }

    /// Analyzes in-memory source as if it were the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if the source cannot be parsed.
    pub fn analyze_source(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let module = self
            .parser
            .parse(content)
            .map_err(|source| AnalyzerError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let ctx = FileContext::new(path, content, self.base_dir());
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &module);
            let rule_violations = Self::drop_suppressed(&ctx, rule_violations);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        Ok(violations)
    }

    /// Removes violations silenced by a `# noqa` comment on their line.
    fn drop_suppressed(ctx: &FileContext<'_>, violations: Vec<Violation>) -> Vec<Violation> {
        violations
            .into_iter()
            .filter(|v| {
                let suppressed = ctx
                    .line(v.location.line)
                    .is_some_and(|line| noqa::is_suppressed(line, &v.code));
                if suppressed {
                    debug!(
                        "Suppressed {} at {}:{} by noqa",
                        v.code,
                        v.location.file.display(),
                        v.location.line
                    );
                }
                !suppressed
            })
            .collect()
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Directory that reported paths are relative to: the root itself, or
    /// its parent when the root is a single file.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        if self.root.is_file() {
            self.root.parent().unwrap_or(&self.root)
        } else {
            &self.root
        }
    }

    /// Discovers all source files to analyze, sorted by path.
    ///
    /// An explicitly given file is always analyzed, whatever its extension.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let respect_gitignore = self.config.analyzer.respect_gitignore;
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(respect_gitignore)
            .git_global(respect_gitignore)
            .git_exclude(respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || !self.parser.handles(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self
            .compiled_excludes
            .iter()
            .any(|pattern| pattern.matches(&path_str))
        {
            return true;
        }

        // Also check as substring for patterns like "**/venv/**"
        self.exclude_patterns.iter().any(|pattern| {
            let normalized_pattern = pattern.replace("**", "");
            !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Module;
    use crate::types::{Location, Severity};

    struct LineCountParser;

    impl SourceParser for LineCountParser {
        fn language_id(&self) -> &'static str {
            "lines"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[".py"]
        }

        fn parse(&self, source: &str) -> Result<Module, ParseError> {
            if source.contains("<<<") {
                return Err(ParseError::Syntax { line: 1, column: 0 });
            }
            Ok(Module::default())
        }
    }

    /// Flags every line containing `flag`.
    struct FlagRule;

    impl Rule for FlagRule {
        fn name(&self) -> &'static str {
            "flag"
        }

        fn code(&self) -> &'static str {
            "TST001"
        }

        fn check(&self, ctx: &FileContext, _module: &Module) -> Vec<Violation> {
            ctx.content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains("flag"))
                .map(|(i, _)| {
                    Violation::new(
                        self.code(),
                        self.name(),
                        Severity::Error,
                        Location::new(ctx.relative_path.clone(), i + 1, 1),
                        "flagged",
                    )
                })
                .collect()
        }
    }

    fn analyzer(config: Config) -> Analyzer {
        Analyzer::builder()
            .root(".")
            .parser(LineCountParser)
            .rule(FlagRule)
            .config(config)
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_builder_requires_parser() {
        let err = Analyzer::builder().root(".").build().err();
        assert!(matches!(err, Some(AnalyzerError::MissingParser)));
    }

    #[test]
    fn test_builder_rejects_bad_glob() {
        let err = Analyzer::builder()
            .parser(LineCountParser)
            .exclude("[")
            .build()
            .err();
        assert!(matches!(err, Some(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = analyzer(Config::default());

        assert!(analyzer.should_exclude(Path::new("/foo/.venv/lib/site.py")));
        assert!(analyzer.should_exclude(Path::new("/foo/pkg/__pycache__/mod.py")));
        assert!(!analyzer.should_exclude(Path::new("/foo/pkg/animal.py")));
    }

    #[test]
    fn test_noqa_drops_violation() {
        let analyzer = analyzer(Config::default());
        let source = "flag\nflag  # noqa: TST001\nflag  # noqa: E501\n";
        let violations = analyzer
            .analyze_source(Path::new("a.py"), source)
            .expect("analysis should succeed");
        let lines: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_severity_override_and_disable() {
        let config = Config::parse("[rules.flag]\nseverity = \"info\"\n").expect("config");
        let violations = analyzer(config)
            .analyze_source(Path::new("a.py"), "flag\n")
            .expect("analysis should succeed");
        assert_eq!(violations[0].severity, Severity::Info);

        let config = Config::parse("[rules.flag]\nenabled = false\n").expect("config");
        let violations = analyzer(config)
            .analyze_source(Path::new("a.py"), "flag\n")
            .expect("analysis should succeed");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_parse_error_carries_path() {
        let err = analyzer(Config::default())
            .analyze_source(Path::new("broken.py"), "<<<")
            .err();
        match err {
            Some(AnalyzerError::Parse { path, source }) => {
                assert_eq!(path, PathBuf::from("broken.py"));
                assert_eq!(source, ParseError::Syntax { line: 1, column: 0 });
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
