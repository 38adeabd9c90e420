//! Rule registry and selection.

use crate::{
    DefaultInsideAnnotated, DuplicateFieldName, FieldPositionalDefault, NameShadowsAnnotation,
    NonAnnotatedAttribute, RedundantFieldCall, ReservedConfigAttribute,
};
use pydantic_lint_core::RuleBox;
use tracing::warn;

/// Returns all available rules, in rule-code table order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(FieldPositionalDefault::new()),
        Box::new(NonAnnotatedAttribute::new()),
        Box::new(RedundantFieldCall::new()),
        Box::new(DefaultInsideAnnotated::new()),
        Box::new(NameShadowsAnnotation::new()),
        Box::new(DuplicateFieldName::new()),
        Box::new(ReservedConfigAttribute::new()),
    ]
}

/// Returns the rules matching `selectors`, each given as a rule name or a
/// rule code (case-insensitive).
///
/// Unknown selectors are logged and skipped. Rules keep table order
/// regardless of selector order.
#[must_use]
pub fn select_rules<S: AsRef<str>>(selectors: &[S]) -> Vec<RuleBox> {
    for selector in selectors {
        let selector = selector.as_ref();
        if !all_rules().iter().any(|rule| is_selected(rule, selector)) {
            warn!("Unknown rule: {}", selector);
        }
    }

    all_rules()
        .into_iter()
        .filter(|rule| selectors.iter().any(|s| is_selected(rule, s.as_ref())))
        .collect()
}

/// Returns the names of all available rules.
#[must_use]
pub fn rule_names() -> Vec<&'static str> {
    all_rules().iter().map(|rule| rule.name()).collect()
}

fn is_selected(rule: &RuleBox, selector: &str) -> bool {
    let selector = selector.trim();
    rule.name().eq_ignore_ascii_case(selector) || rule.code().eq_ignore_ascii_case(selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_have_unique_names_and_codes() {
        let rules = all_rules();
        assert_eq!(rules.len(), 7);

        let mut names: Vec<_> = rules.iter().map(|r| r.name()).collect();
        let mut codes: Vec<_> = rules.iter().map(|r| r.code()).collect();
        names.sort_unstable();
        names.dedup();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(names.len(), 7);
        assert_eq!(codes.len(), 7);
    }

    #[test]
    fn test_select_by_name_and_code() {
        let rules = select_rules(&["duplicate-field-name", "rule-field-pos-default"]);
        let names: Vec<_> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["field-positional-default", "duplicate-field-name"]);
    }

    #[test]
    fn test_unknown_selector_is_skipped() {
        let rules = select_rules(&["no-such-rule", "RULE-RESERVED-CONFIG"]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].code(), "RULE-RESERVED-CONFIG");
    }

    #[test]
    fn test_rule_names_in_table_order() {
        assert_eq!(rule_names().first(), Some(&"field-positional-default"));
        assert_eq!(rule_names().last(), Some(&"reserved-config-attribute"));
    }
}
