//! List rules command implementation.

use pydantic_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<24} {:<27} {:<16} Description",
        "Code", "Name", "Applies to"
    );
    println!("{}", "-".repeat(110));

    for rule in all_rules() {
        let kinds = rule
            .applies_to()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<24} {:<27} {:<16} {}",
            rule.code(),
            rule.name(),
            kinds,
            rule.description()
        );
    }

    println!("\nAll rules run by default. Use --rules to select a subset, e.g.:");
    println!("  pydantic-lint check --rules duplicate-field-name,redundant-field-call");
    println!("  pydantic-lint check --rules RULE-DUPLICATE-FIELD");
    println!("\nSilence a single line with `# noqa` or `# noqa: RULE-DUPLICATE-FIELD`.");
}
