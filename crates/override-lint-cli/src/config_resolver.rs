//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path in priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/override-lint.toml` or `.override-lint.toml`
//! 3. `{project}/pyproject.toml`, only if it has a `[tool.override-lint]` table
//! 4. `~/.override-lint/config.toml` (global fallback)
//! 5. No config found: defaults

use override_lint_core::{Config, PYPROJECT};
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.override-lint/`).
    Global(PathBuf),
    /// No config found; defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Dedicated project config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["override-lint.toml", ".override-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the global config directory.
const CONFIG_DIR_ENV: &str = "OVERRIDE_LINT_CONFIG_DIR";

/// Resolves the configuration file path for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: takes `global_dir` as a parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    let pyproject = project_dir.join(PYPROJECT);
    if has_tool_table(&pyproject) {
        tracing::debug!("Found [tool] table in {}", pyproject.display());
        return ConfigSource::Project(pyproject);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// A `pyproject.toml` only counts as configuration when it carries our table.
/// Unreadable or invalid files are left for the loader to report when named
/// explicitly, and skipped here.
fn has_tool_table(path: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(path) else {
        return false;
    };
    match Config::parse_pyproject(&content) {
        Ok(found) => found.is_some(),
        Err(e) => {
            tracing::warn!("Ignoring {}: {}", path.display(), e);
            false
        }
    }
}

/// Returns the global config directory path.
///
/// Resolution: `$OVERRIDE_LINT_CONFIG_DIR` > `~/.override-lint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".override-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PYPROJECT_WITH_TABLE: &str = "[project]\nname = \"zoo\"\n\n[tool.override-lint]\nfail_on = \"warning\"\n";

    #[test]
    fn explicit_takes_priority_over_project() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "").unwrap();

        let project = tmp.path().join("project");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("override-lint.toml"), "").unwrap();

        let result = resolve_inner(&project, Some(&explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn explicit_does_not_check_existence() {
        let result = resolve_inner(
            Path::new("/tmp"),
            Some(Path::new("/nonexistent.toml")),
            None,
        );
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn dedicated_file_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".override-lint.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".override-lint.toml"))
        );

        fs::write(tmp.path().join("override-lint.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("override-lint.toml"))
        );
    }

    #[test]
    fn pyproject_with_table_is_used() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("pyproject.toml"), PYPROJECT_WITH_TABLE).unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("pyproject.toml"))
        );
    }

    #[test]
    fn pyproject_without_table_falls_through_to_global() {
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join("pyproject.toml"),
            "[tool.black]\nline-length = 100\n",
        )
        .unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
    }

    #[test]
    fn dedicated_file_wins_over_pyproject() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("pyproject.toml"), PYPROJECT_WITH_TABLE).unwrap();
        fs::write(tmp.path().join("override-lint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("override-lint.toml"))
        );
    }

    #[test]
    fn invalid_pyproject_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("pyproject.toml"), "[tool.override-lint\n").unwrap();
        assert_eq!(resolve_inner(tmp.path(), None, None), ConfigSource::Default);
    }

    #[test]
    fn global_skipped_when_project_config_exists() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("override-lint.toml"), "").unwrap();

        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn global_dir_missing_config_file_returns_default() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn config_source_accessors() {
        let p = PathBuf::from("/tmp/test.toml");
        assert_eq!(ConfigSource::Explicit(p.clone()).path(), Some(p.as_path()));
        assert_eq!(ConfigSource::Project(p.clone()).path(), Some(p.as_path()));
        assert!(ConfigSource::Global(p).is_global());
        assert!(ConfigSource::Default.path().is_none());
        assert!(!ConfigSource::Default.is_global());
    }
}
