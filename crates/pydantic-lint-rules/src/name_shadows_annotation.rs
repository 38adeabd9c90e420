//! Rule against field names that shadow types used in annotations.
//!
//! # Rationale
//!
//! Inside a class body, a field named `date` rebinds the name `date`, so a
//! later annotation mentioning `date` no longer refers to the type:
//!
//! ```python
//! class Model(BaseModel):
//!     date: int = 1
//!     foo: date          # `date` is now the int default, not the type
//! ```
//!
//! # Scan Order
//!
//! Fields are scanned top to bottom. A field's own name is recorded before
//! its annotation is checked, so `date: date` is reported. Names declared
//! after a field never affect it.

use std::collections::HashSet;

use pydantic_lint_core::matchers::annotation_type_names;
use pydantic_lint_core::{ClassDef, ClassKind, Diagnostic, Rule, Severity};

/// Rule code for name-shadows-annotation.
pub const CODE: &str = "RULE-NAME-SHADOWS-TYPE";

/// Rule name for name-shadows-annotation.
pub const NAME: &str = "name-shadows-annotation";

/// Flags fields whose annotation refers to a name taken by a field.
#[derive(Debug, Clone)]
pub struct NameShadowsAnnotation {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NameShadowsAnnotation {
    fn default() -> Self {
        Self::new()
    }
}

impl NameShadowsAnnotation {
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

impl Rule for NameShadowsAnnotation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn message(&self) -> &'static str {
        "Field name overrides annotation"
    }

    fn description(&self) -> &'static str {
        "Forbids field names that shadow types used in annotations"
    }

    fn fix_hint(&self) -> Option<&'static str> {
        Some("Rename the field and keep the original name with `alias=`, or import the type under another name")
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self) -> &'static [ClassKind] {
        &[ClassKind::Model, ClassKind::Record]
    }

    fn check_class(&self, class: &ClassDef) -> Vec<Diagnostic> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut diagnostics = Vec::new();

        for field in class.annotated_fields() {
            let Some(name) = field.simple_name() else {
                continue;
            };
            seen.insert(name);

            let types = annotation_type_names(&field.annotation);
            if types.iter().any(|t| seen.contains(t)) {
                diagnostics.push(self.diagnostic(field.position));
            }
        }

        diagnostics
    }
}
