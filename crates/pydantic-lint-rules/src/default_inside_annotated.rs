//! Rule against declaring defaults inside `Annotated` metadata.
//!
//! # Rationale
//!
//! A default hidden in `Annotated[int, Field(default=1)]` is invisible to
//! type checkers and differs from the assignment form across tools.
//! The default belongs on the right-hand side of the field.
//!
//! # Detected Patterns
//!
//! ```python
//! class Model(BaseModel):
//!     a: Annotated[int, Field(default=1, description="")]
//!     b: Annotated[int, Unrelated(), Field(default=1)]
//! ```

use pydantic_lint_core::matchers::{is_annotated, is_call_to, FIELD_FUNCTION};
use pydantic_lint_core::{AnnAssign, ClassKind, Diagnostic, Expr, Rule, Severity};

/// Rule code for default-inside-annotated.
pub const CODE: &str = "RULE-ANNOTATED-DEFAULT";

/// Rule name for default-inside-annotated.
pub const NAME: &str = "default-inside-annotated";

/// Flags `Field(default=...)` inside `Annotated[...]` metadata.
#[derive(Debug, Clone)]
pub struct DefaultInsideAnnotated {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for DefaultInsideAnnotated {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultInsideAnnotated {
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

/// Returns true for a `Field(...)` call carrying a `default` keyword.
fn is_field_with_default(expr: &Expr) -> bool {
    is_call_to(expr, FIELD_FUNCTION)
        && matches!(expr, Expr::Call(call) if call.has_keyword("default"))
}

impl Rule for DefaultInsideAnnotated {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn message(&self) -> &'static str {
        "Default argument specified inside Annotated"
    }

    fn description(&self) -> &'static str {
        "Forbids Field defaults inside Annotated metadata"
    }

    fn fix_hint(&self) -> Option<&'static str> {
        Some("Move the default to the assignment: `a: Annotated[int, Field(...)] = 1`")
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self) -> &'static [ClassKind] {
        &[ClassKind::Model, ClassKind::Record]
    }

    fn check_field(&self, field: &AnnAssign) -> Vec<Diagnostic> {
        if !is_annotated(&field.annotation) {
            return Vec::new();
        }
        let Expr::Subscript { slice, .. } = &field.annotation else {
            return Vec::new();
        };
        // `Annotated[x]` without metadata has no tuple slice.
        let Expr::Tuple(elements) = slice.as_ref() else {
            return Vec::new();
        };

        if elements.iter().any(is_field_with_default) {
            vec![self.diagnostic(field.position)]
        } else {
            Vec::new()
        }
    }
}
