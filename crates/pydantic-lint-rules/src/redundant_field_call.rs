//! Rule against `Field` calls that only set a default.
//!
//! `a: int = Field(default=1)` is the same field as `a: int = 1`.

use pydantic_lint_core::matchers::{is_name_or_attr, FIELD_FUNCTION};
use pydantic_lint_core::{AnnAssign, ClassKind, Diagnostic, Expr, Rule, Severity};

/// Rule code for redundant-field-call.
pub const CODE: &str = "RULE-REDUNDANT-FIELD";

/// Rule name for redundant-field-call.
pub const NAME: &str = "redundant-field-call";

/// Flags `Field(default=...)` calls carrying nothing but the default.
#[derive(Debug, Clone)]
pub struct RedundantFieldCall {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for RedundantFieldCall {
    fn default() -> Self {
        Self::new()
    }
}

impl RedundantFieldCall {
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

impl Rule for RedundantFieldCall {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn message(&self) -> &'static str {
        "Unnecessary Field call to specify a default value"
    }

    fn description(&self) -> &'static str {
        "Forbids Field calls that only specify a default value"
    }

    fn fix_hint(&self) -> Option<&'static str> {
        Some("Assign the default directly: `a: int = 1`")
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self) -> &'static [ClassKind] {
        &[ClassKind::Model, ClassKind::Record]
    }

    fn check_field(&self, field: &AnnAssign) -> Vec<Diagnostic> {
        let Some(Expr::Call(call)) = &field.value else {
            return Vec::new();
        };

        let only_default = matches!(
            call.keywords.as_slice(),
            [keyword] if keyword.arg.as_deref() == Some("default")
        );

        if is_name_or_attr(&call.func, FIELD_FUNCTION) && only_default {
            vec![self.diagnostic(field.position)]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::positions;

    fn check_code(code: &str) -> Vec<(usize, usize)> {
        positions(RedundantFieldCall::new(), code)
    }

    #[test]
    fn test_detects_default_only() {
        let found = check_code(
            r#"
class Model(BaseModel):
    a: int = Field(default=1)
"#,
        );
        assert_eq!(found, vec![(3, 4)]);
    }

    #[test]
    fn test_allows_default_with_other_options() {
        let found = check_code(
            r#"
class Model(BaseModel):
    a: int = Field(default=1, description="")
"#,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_allows_default_factory() {
        let found = check_code(
            r#"
class Model(BaseModel):
    a: list[int] = Field(default_factory=list)
"#,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_applies_to_dataclass() {
        let found = check_code(
            r#"
@pydantic.dataclasses.dataclass
class Record:
    a: int = Field(default=1)
"#,
        );
        assert_eq!(found, vec![(4, 4)]);
    }
}
