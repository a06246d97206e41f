//! Context types for rule execution.

use std::path::{Path, PathBuf};

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    ///
    /// Files outside `root` keep their path as given.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Returns the contents of a 1-indexed line, if present.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&'a str> {
        line.checked_sub(1)
            .and_then(|index| self.content.lines().nth(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_strips_root() {
        let ctx = FileContext::new(
            Path::new("/project/pkg/animal.py"),
            "",
            Path::new("/project"),
        );
        assert_eq!(ctx.relative_path, PathBuf::from("pkg/animal.py"));
    }

    #[test]
    fn relative_path_outside_root_is_kept() {
        let ctx = FileContext::new(Path::new("/elsewhere/a.py"), "", Path::new("/project"));
        assert_eq!(ctx.relative_path, PathBuf::from("/elsewhere/a.py"));
    }

    #[test]
    fn line_lookup_is_one_indexed() {
        let ctx = FileContext::new(
            Path::new("a.py"),
            "class A:\n    def f(self): ...\n",
            Path::new("."),
        );
        assert_eq!(ctx.line(1), Some("class A:"));
        assert_eq!(ctx.line(2), Some("    def f(self): ..."));
        assert_eq!(ctx.line(0), None);
        assert_eq!(ctx.line(3), None);
    }
}
