//! Rule against non-annotated public attributes on models.
//!
//! A model only turns annotated attributes into fields. `a = 1` in a model
//! body is silently a class variable (or rejected at class creation), which
//! is rarely what was meant. Names starting with `_` are private attributes
//! and are left alone.
//!
//! Only the first target of an assignment is inspected, so `a = b = 1`
//! is reported once.

use pydantic_lint_core::{ClassDef, ClassKind, Diagnostic, Expr, Rule, Severity, Stmt};

/// Rule code for non-annotated-attribute.
pub const CODE: &str = "RULE-NONANNOTATED-ATTR";

/// Rule name for non-annotated-attribute.
pub const NAME: &str = "non-annotated-attribute";

/// Flags plain assignments to public names in a model body.
#[derive(Debug, Clone)]
pub struct NonAnnotatedAttribute {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NonAnnotatedAttribute {
    fn default() -> Self {
        Self::new()
    }
}

impl NonAnnotatedAttribute {
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

impl Rule for NonAnnotatedAttribute {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn message(&self) -> &'static str {
        "Non-annotated attribute inside model"
    }

    fn description(&self) -> &'static str {
        "Requires model attributes to be annotated"
    }

    fn fix_hint(&self) -> Option<&'static str> {
        Some("Add a type annotation, prefix the name with `_`, or use ClassVar")
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self) -> &'static [ClassKind] {
        &[ClassKind::Model]
    }

    fn check_class(&self, class: &ClassDef) -> Vec<Diagnostic> {
        class
            .body
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Assign(assign) => match assign.targets.first() {
                    Some(Expr::Name(id)) if !id.starts_with('_') => {
                        Some(self.diagnostic(assign.position))
                    }
                    _ => None,
                },
                _ => None,
            })
            .collect()
    }
}
