//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::syntax::Module;
use crate::types::{Severity, Violation};

/// A per-file lint rule over the [`Module`] syntax model.
///
/// Rules receive the lowered syntax tree and return violations in the order
/// they were found. The analyzer never reorders violations within a file.
///
/// # Example
///
/// ```ignore
/// use override_lint_core::{FileContext, Module, Rule, Violation};
///
/// pub struct NoTopLevelClasses;
///
/// impl Rule for NoTopLevelClasses {
///     fn name(&self) -> &'static str { "no-top-level-classes" }
///     fn code(&self) -> &'static str { "OVR900" }
///
///     fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation> {
///         // ...
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "require-override").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "OVR100").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    /// * `module` - The lowered syntax tree of the file
    fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation> {
            module
                .body
                .iter()
                .map(|stmt| {
                    Violation::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        Location::from_position(ctx.relative_path.clone(), stmt.position()),
                        "Test violation",
                    )
                })
                .collect()
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
    }

    #[test]
    fn test_rule_check_on_empty_module() {
        let ctx = FileContext::new(Path::new("/p/a.py"), "", Path::new("/p"));
        assert!(TestRule.check(&ctx, &Module::default()).is_empty());
    }
}
