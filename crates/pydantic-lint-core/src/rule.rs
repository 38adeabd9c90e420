//! Rule traits for defining lint rules.

use crate::ast::{AnnAssign, ClassDef, Position};
use crate::classify::ClassKind;
use crate::types::{Diagnostic, Severity};

/// A structural rule evaluated against classes of particular kinds.
///
/// Rules do not walk the tree themselves. The [`Checker`](crate::Checker)
/// classifies each class once, and calls [`Rule::check_class`] for the class
/// body and [`Rule::check_field`] for each direct annotated assignment,
/// but only when the class kind is listed in [`Rule::applies_to`].
///
/// # Example
///
/// ```ignore
/// use pydantic_lint_core::{ClassDef, ClassKind, Diagnostic, Rule};
///
/// pub struct NoEmptyModel;
///
/// impl Rule for NoEmptyModel {
///     fn name(&self) -> &'static str { "no-empty-model" }
///     fn code(&self) -> &'static str { "RULE-EMPTY-MODEL" }
///     fn message(&self) -> &'static str { "Model without fields" }
///     fn applies_to(&self) -> &'static [ClassKind] { &[ClassKind::Model] }
///
///     fn check_class(&self, class: &ClassDef) -> Vec<Diagnostic> {
///         if class.annotated_fields().next().is_none() {
///             vec![self.diagnostic(class.position)]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "duplicate-field-name").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "RULE-DUPLICATE-FIELD").
    fn code(&self) -> &'static str;

    /// Returns the fixed message attached to every diagnostic of this rule.
    fn message(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns a hint on how to fix a violation, if the rule has one.
    fn fix_hint(&self) -> Option<&'static str> {
        None
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Class kinds this rule is evaluated for.
    fn applies_to(&self) -> &'static [ClassKind];

    /// Checks a class body. Called once per class of an applicable kind.
    fn check_class(&self, _class: &ClassDef) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Checks a single field declaration of a class of an applicable kind.
    fn check_field(&self, _field: &AnnAssign) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Builds a diagnostic of this rule at `position`.
    fn diagnostic(&self, position: Position) -> Diagnostic {
        Diagnostic::new(self.code(), self.name(), self.message(), position)
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
