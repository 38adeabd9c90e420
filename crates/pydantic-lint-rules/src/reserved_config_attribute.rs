//! Rule against `__pydantic_config__` on classes that are not models.
//!
//! `__pydantic_config__` is how `TypedDict`s and other foreign types carry
//! Pydantic configuration. The classifier cannot see through a
//! `TypedDict` base, so every plain class defining the attribute is
//! reported; models and records are left alone.

use pydantic_lint_core::{ClassDef, ClassKind, Diagnostic, Expr, Rule, Severity, Stmt};

/// Rule code for reserved-config-attribute.
pub const CODE: &str = "RULE-RESERVED-CONFIG";

/// Rule name for reserved-config-attribute.
pub const NAME: &str = "reserved-config-attribute";

const RESERVED: &str = "__pydantic_config__";

/// Flags `__pydantic_config__` assignments in plain classes.
#[derive(Debug, Clone)]
pub struct ReservedConfigAttribute {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ReservedConfigAttribute {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservedConfigAttribute {
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

fn is_reserved(target: &Expr) -> bool {
    matches!(target, Expr::Name(id) if id == RESERVED)
}

impl Rule for ReservedConfigAttribute {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn message(&self) -> &'static str {
        "Usage of reserved `__pydantic_config__` outside a recognized model-like class"
    }

    fn description(&self) -> &'static str {
        "Flags `__pydantic_config__` on classes that are not models"
    }

    fn fix_hint(&self) -> Option<&'static str> {
        Some("Use `model_config` on models; keep `__pydantic_config__` for TypedDicts only")
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn applies_to(&self) -> &'static [ClassKind] {
        &[ClassKind::Plain]
    }

    fn check_class(&self, class: &ClassDef) -> Vec<Diagnostic> {
        class
            .body
            .iter()
            .filter(|stmt| match stmt {
                Stmt::AnnAssign(field) => is_reserved(&field.target),
                Stmt::Assign(assign) => assign.targets.iter().any(is_reserved),
                _ => false,
            })
            .map(|stmt| self.diagnostic(stmt.position()))
            .collect()
    }
}
