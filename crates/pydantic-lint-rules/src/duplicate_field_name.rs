//! Rule against declaring the same field twice in one class body.
//!
//! The later declaration silently replaces the earlier one. Every repeat
//! after the first declaration is reported.

use std::collections::HashSet;

use pydantic_lint_core::{ClassDef, ClassKind, Diagnostic, Rule, Severity};

/// Rule code for duplicate-field-name.
pub const CODE: &str = "RULE-DUPLICATE-FIELD";

/// Rule name for duplicate-field-name.
pub const NAME: &str = "duplicate-field-name";

/// Flags repeated annotated field names.
#[derive(Debug, Clone)]
pub struct DuplicateFieldName {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for DuplicateFieldName {
    fn default() -> Self {
        Self::new()
    }
}

impl DuplicateFieldName {
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

impl Rule for DuplicateFieldName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn message(&self) -> &'static str {
        "Duplicate field name"
    }

    fn description(&self) -> &'static str {
        "Forbids declaring a field more than once"
    }

    fn fix_hint(&self) -> Option<&'static str> {
        Some("Remove or rename one of the declarations")
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self) -> &'static [ClassKind] {
        &[ClassKind::Model, ClassKind::Record]
    }

    fn check_class(&self, class: &ClassDef) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();
        class
            .annotated_fields()
            .filter_map(|field| {
                let name = field.simple_name()?;
                (!seen.insert(name)).then(|| self.diagnostic(field.position))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::positions;

    fn check_code(code: &str) -> Vec<(usize, usize)> {
        positions(DuplicateFieldName::new(), code)
    }

    #[test]
    fn test_detects_second_declaration() {
        let found = check_code(
            r#"
class Model(BaseModel):
    x: int
    x: str = "1"
"#,
        );
        assert_eq!(found, vec![(4, 4)]);
    }

    #[test]
    fn test_distinct_names() {
        let found = check_code(
            r#"
class Model(BaseModel):
    x: int
    y: int
"#,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_every_repeat_is_reported() {
        let found = check_code(
            r#"
@dataclass
class Record:
    x: int
    x: int
    x: int
"#,
        );
        assert_eq!(found, vec![(5, 4), (6, 4)]);
    }

    #[test]
    fn test_nested_class_has_its_own_names() {
        let found = check_code(
            r#"
class Outer(BaseModel):
    x: int

    class Inner(BaseModel):
        x: int
"#,
        );
        assert!(found.is_empty());
    }
}
