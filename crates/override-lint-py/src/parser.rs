//! Python front end using Tree-sitter.

use override_lint_core::{Module, ParseError, SourceParser};
use tree_sitter::{Language, Parser};

use crate::lower::{first_error, Lowerer};

/// Parses Python source into the rule syntax model.
pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    /// Creates a new Python parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for PythonParser {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".py", ".pyi"]
    }

    fn parse(&self, source: &str) -> Result<Module, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language(e.to_string()))?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ParseError::ParseFailed)?;
        let root = tree.root_node();

        if root.kind() != "module" {
            return Err(ParseError::UnexpectedRoot(root.kind().to_owned()));
        }

        if root.has_error() {
            let at = first_error(&root).unwrap_or(root).start_position();
            return Err(ParseError::Syntax {
                line: at.row + 1,
                column: at.column,
            });
        }

        Ok(Lowerer::new(src).module(&root))
    }
}
