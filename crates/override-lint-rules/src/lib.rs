//! # override-lint-rules
//!
//! Built-in lint rules for override-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | OVR100 | `require-override` | Requires an override-marker decorator on public methods |
//!
//! ## Usage
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
//! ```
//!
//! The rule logic is also available without the analyzer:
//! [`require_override::check_module`] takes a lowered module and returns
//! `(line, column, message)` findings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod require_override;

pub use require_override::{Finding, MarkerStatus, RequireOverride};

/// Re-export core types for convenience.
pub use override_lint_core::{Rule, RuleBox, Severity, Violation};

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(RequireOverride::new())]
}

/// Looks up a rule by name (`require-override`) or code (`OVR100`).
#[must_use]
pub fn rule_by_id(id: &str) -> Option<RuleBox> {
    all_rules()
        .into_iter()
        .find(|rule| rule.name() == id || rule.code().eq_ignore_ascii_case(id))
}
