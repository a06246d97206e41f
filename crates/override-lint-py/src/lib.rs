//! # override-lint-py
//!
//! Tree-sitter based Python front end for override-lint.
//!
//! [`PythonParser`] implements [`override_lint_core::SourceParser`]: it parses
//! Python source with `tree-sitter-python` and lowers the concrete syntax tree
//! into the language-neutral [`override_lint_core::syntax`] model that rules
//! consume. Sources with syntax errors are rejected with
//! [`override_lint_core::ParseError::Syntax`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lower;
pub mod parser;

pub use parser::PythonParser;
