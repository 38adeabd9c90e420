//! Rule against passing the default of `Field` positionally.
//!
//! # Rationale
//!
//! `Field(1)` relies on the first positional parameter being `default`.
//! Spelling it `Field(default=1)` reads unambiguously and survives
//! signature changes.
//!
//! # Detected Patterns
//!
//! ```python
//! class Model(BaseModel):
//!     a: int = Field(1)
//! ```

use pydantic_lint_core::matchers::{is_name_or_attr, FIELD_FUNCTION};
use pydantic_lint_core::{AnnAssign, ClassKind, Diagnostic, Expr, Rule, Severity};

/// Rule code for field-positional-default.
pub const CODE: &str = "RULE-FIELD-POS-DEFAULT";

/// Rule name for field-positional-default.
pub const NAME: &str = "field-positional-default";

/// Flags `Field(...)` calls with positional arguments on model and record fields.
#[derive(Debug, Clone)]
pub struct FieldPositionalDefault {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for FieldPositionalDefault {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldPositionalDefault {
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

impl Rule for FieldPositionalDefault {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn message(&self) -> &'static str {
        "Positional argument for Field default argument"
    }

    fn description(&self) -> &'static str {
        "Forbids positional arguments in Field calls"
    }

    fn fix_hint(&self) -> Option<&'static str> {
        Some("Pass the default as a keyword: Field(default=...)")
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self) -> &'static [ClassKind] {
        &[ClassKind::Model, ClassKind::Record]
    }

    fn check_field(&self, field: &AnnAssign) -> Vec<Diagnostic> {
        match &field.value {
            Some(Expr::Call(call))
                if is_name_or_attr(&call.func, FIELD_FUNCTION) && !call.args.is_empty() =>
            {
                vec![self.diagnostic(field.position)]
            }
            _ => Vec::new(),
        }
    }
}
