//! Rule to require an explicit override marker on methods.
//!
//! # Rationale
//!
//! A method that re-implements inherited behavior should say so with
//! `@typing.override` (PEP 698), so type checkers can catch a base method that
//! was renamed or removed. This rule is a syntactic convention check: it does
//! not look at base classes and does not verify that a marked method really
//! overrides anything.
//!
//! # Which methods are checked
//!
//! Every class in the module is visited, including classes nested in other
//! classes, functions and compound statements. Within a class body, scanned in
//! declaration order:
//!
//! - classes with a `Protocol` base (`Protocol`, `typing.Protocol`,
//!   `Protocol[T]`, ...) are skipped entirely; their nested classes are still
//!   visited
//! - non-function members and `__init__` are skipped
//! - the first member whose name starts with `_` ends the public surface: it
//!   and every member after it are not checked
//! - methods decorated with `classmethod` or `staticmethod` are exempt
//! - any other method needs `@override`, `@typing.override`, `@t.override` or
//!   any other decorator whose last segment is `override`
//!
//! # Suppression
//!
//! - `# noqa: OVR100` on the `def` line

use override_lint_core::syntax::{ClassDef, Expr, FunctionDef, Module, Stmt};
use override_lint_core::{FileContext, Location, Rule, Severity, Suggestion, Violation};
use tracing::trace;

/// Rule code for require-override.
pub const CODE: &str = "OVR100";

/// Rule name for require-override.
pub const NAME: &str = "require-override";

/// Message attached to every finding.
pub const MESSAGE: &str = "method must contain an override-marker decorator";

/// Decorator spellings accepted as an override marker.
///
/// Qualified decorators are compared by their last segment only, so
/// `typing_extensions.override` matches through `override`.
const OVERRIDE_MARKERS: &[&str] = &["override", "typing.override", "t.override"];

/// Decorators that exempt a method by kind.
const KIND_MARKERS: &[&str] = &["classmethod", "staticmethod"];

const PROTOCOL: &str = "Protocol";

/// A method missing its override marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finding {
    /// Line of the method's definition token (1-indexed).
    pub line: usize,
    /// Column of the method's definition token (0-indexed).
    pub column: usize,
    /// Always [`MESSAGE`].
    pub message: &'static str,
}

/// Outcome of scanning a method's decorators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStatus {
    /// An override marker was found.
    Satisfied,
    /// `classmethod` or `staticmethod` exempts the method.
    ExemptByKind,
    /// Neither: the method must be reported.
    RequiresMarker,
}

/// Requires an override-marker decorator on public instance methods.
#[derive(Debug, Clone)]
pub struct RequireOverride {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for RequireOverride {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireOverride {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for RequireOverride {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires @typing.override on methods that are not exempt"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation> {
        unmarked_methods(module)
            .into_iter()
            .map(|method| {
                let header_end = method.name_position.offset + method.name.len();
                let location =
                    Location::from_position(ctx.relative_path.clone(), method.position)
                        .with_span(
                            method.position.offset,
                            header_end.saturating_sub(method.position.offset),
                        );
                Violation::new(CODE, NAME, self.severity, location, MESSAGE).with_suggestion(
                    Suggestion::new(format!(
                        "Decorate `{}` with `@typing.override` (or `typing_extensions.override`)",
                        method.name
                    )),
                )
            })
            .collect()
    }
}

/// Returns every finding for `module`, in emission order: classes in
/// pre-order, methods in declaration order within each class.
#[must_use]
pub fn check_module(module: &Module) -> Vec<Finding> {
    unmarked_methods(module)
        .into_iter()
        .map(|method| Finding {
            line: method.position.line,
            column: method.position.column,
            message: MESSAGE,
        })
        .collect()
}

fn unmarked_methods(module: &Module) -> Vec<&FunctionDef> {
    let mut found = Vec::new();
    walk(&module.body, &mut found);
    found
}

/// Visits every class below `body`. Descent never depends on whether an
/// enclosing class was exempt.
fn walk<'m>(body: &'m [Stmt], found: &mut Vec<&'m FunctionDef>) {
    for stmt in body {
        match stmt {
            Stmt::ClassDef(class) => {
                scan_class(class, found);
                walk(&class.body, found);
            }
            Stmt::FunctionDef(function) => walk(&function.body, found),
            Stmt::Compound(compound) => walk(&compound.body, found),
            Stmt::Simple(_) => {}
        }
    }
}

fn scan_class<'m>(class: &'m ClassDef, found: &mut Vec<&'m FunctionDef>) {
    if is_protocol(&class.bases) {
        trace!(class = %class.name, "protocol class, methods not checked");
        return;
    }

    for member in &class.body {
        let Stmt::FunctionDef(method) = member else {
            continue;
        };
        if method.name == "__init__" {
            continue;
        }
        if method.name.starts_with('_') {
            trace!(
                class = %class.name,
                method = %method.name,
                "private member ends the checked surface"
            );
            break;
        }
        if classify_decorators(&method.decorators) == MarkerStatus::RequiresMarker {
            found.push(method);
        }
    }
}

/// Returns true if any base names `Protocol`, directly, qualified, or
/// subscripted.
#[must_use]
pub fn is_protocol(bases: &[Expr]) -> bool {
    bases.iter().any(|base| match base {
        Expr::Subscript(subscript) => names_protocol(&subscript.value),
        other => names_protocol(other),
    })
}

fn names_protocol(expr: &Expr) -> bool {
    match expr {
        Expr::Name(name) => name.id == PROTOCOL,
        Expr::Attribute(attr) => attr.attr == PROTOCOL,
        Expr::Subscript(_) | Expr::Call(_) | Expr::Other(_) => false,
    }
}

/// Scans decorators in source order.
///
/// Once `classmethod`/`staticmethod` has been seen the scan stops at the next
/// decorator; an override marker before that point still wins.
#[must_use]
pub fn classify_decorators(decorators: &[Expr]) -> MarkerStatus {
    let mut exempted_by_kind = false;

    for decorator in decorators {
        if exempted_by_kind {
            return MarkerStatus::ExemptByKind;
        }
        match decorator {
            Expr::Attribute(attr) if OVERRIDE_MARKERS.contains(&attr.attr.as_str()) => {
                return MarkerStatus::Satisfied;
            }
            Expr::Name(name) if OVERRIDE_MARKERS.contains(&name.id.as_str()) => {
                return MarkerStatus::Satisfied;
            }
            Expr::Name(name) if KIND_MARKERS.contains(&name.id.as_str()) => {
                exempted_by_kind = true;
            }
            Expr::Name(_)
            | Expr::Attribute(_)
            | Expr::Subscript(_)
            | Expr::Call(_)
            | Expr::Other(_) => {}
        }
    }

    if exempted_by_kind {
        MarkerStatus::ExemptByKind
    } else {
        MarkerStatus::RequiresMarker
    }
}
