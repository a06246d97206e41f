//! Front-end trait for turning source text into the syntax model.
//!
//! `SourceParser` is the extension point for adding languages. Implement it
//! to lower a concrete syntax tree into a [`Module`].

use crate::syntax::Module;

/// Errors produced by a [`SourceParser`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("language error: {0}")]
    Language(String),
    /// The parser gave up without producing a tree.
    #[error("parse failed")]
    ParseFailed,
    /// The tree root is not a module.
    #[error("unexpected root node `{0}`, expected a module")]
    UnexpectedRoot(String),
    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line number (1-indexed).
        line: usize,
        /// Column (0-indexed).
        column: usize,
    },
}

/// Language-specific parser producing the rule syntax model.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"python"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles (e.g., `&[".py", ".pyi"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses source code into a [`Module`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the source cannot be parsed into a valid module.
    fn parse(&self, source: &str) -> Result<Module, ParseError>;

    /// Returns true if this parser handles files at `path`.
    fn handles(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| known.strip_prefix('.') == Some(ext))
            })
    }
}

/// Type alias for boxed parser trait objects.
pub type ParserBox = Box<dyn SourceParser>;
