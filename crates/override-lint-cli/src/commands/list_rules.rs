//! List rules command implementation.

use override_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<20} {:<10} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<20} {:<10} {}",
            rule.code(),
            rule.name(),
            rule.default_severity(),
            rule.description()
        );
    }

    println!("\nUse --rules to filter by name or code, e.g.:");
    println!("  override-lint check --rules require-override");
    println!("  override-lint check --rules OVR100");
    println!("\nSilence a single line with `# noqa: OVR100`.");
}
