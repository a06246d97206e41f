//! # override-lint-core
//!
//! Core framework for override-lint.
//!
//! This crate provides the language-neutral pieces that rules and front ends
//! share:
//!
//! - [`syntax`]: the closed syntax model rules match on
//! - [`Rule`] trait for per-file rules
//! - [`SourceParser`] trait for language front ends
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use override_lint_core::Analyzer;
//! use override_lint_py::PythonParser;
//! use override_lint_rules::RequireOverride;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(PythonParser::new())
//!     .rule(RequireOverride::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod parser;
mod rule;
mod types;

pub mod noqa;
pub mod syntax;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, PYPROJECT, PYPROJECT_TABLE};
pub use context::FileContext;
pub use parser::{ParseError, ParserBox, SourceParser};
pub use rule::{Rule, RuleBox};
pub use syntax::{Module, Position};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
