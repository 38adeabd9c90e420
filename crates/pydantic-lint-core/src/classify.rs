//! Class classification.
//!
//! Decides from syntax alone whether a class definition is a model, a
//! record (dataclass-style container) or a plain class. No imports are
//! followed: `BaseModel` from any module counts.

use serde::{Deserialize, Serialize};

use crate::ast::{ClassDef, Expr, Stmt};
use crate::matchers::{
    decorator_names, is_annotated, is_name_or_attr, terminal_name, FIELD_FUNCTION, FIELD_OPTIONS,
    MODEL_BASES, MODEL_DECORATORS, MODEL_METHODS, MODEL_METHOD_PREFIXES, RECORD_DECORATORS,
    ROOT_MODEL_BASE,
};

/// Name of the model configuration attribute.
const MODEL_CONFIG: &str = "model_config";

/// Category of a class definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// Data-validation model.
    Model,
    /// Decorator-flagged record type.
    Record,
    /// Anything else.
    Plain,
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::Record => write!(f, "record"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// Settings that influence classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Treat `RootModel` as a model base class.
    #[serde(default = "default_true")]
    pub include_root_model: bool,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            include_root_model: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Classifies a class definition from its own bases, decorators and body.
#[must_use]
pub fn classify(class: &ClassDef, settings: ClassifierSettings) -> ClassKind {
    if is_model(class, settings) {
        ClassKind::Model
    } else if is_record(class) {
        ClassKind::Record
    } else {
        ClassKind::Plain
    }
}

/// Returns true if the class looks like a model.
///
/// A class without base classes is never a model, whatever its body holds.
#[must_use]
pub fn is_model(class: &ClassDef, settings: ClassifierSettings) -> bool {
    if class.bases.is_empty() {
        return false;
    }

    has_model_base(class, settings)
        || has_model_config(class)
        || has_field_call(class)
        || has_annotated_field(class)
        || has_model_decorator(class)
        || has_model_method(class)
}

/// Returns true if the class carries a record decorator.
#[must_use]
pub fn is_record(class: &ClassDef) -> bool {
    decorator_names(&class.decorators)
        .iter()
        .any(|name| RECORD_DECORATORS.contains(*name))
}

fn has_model_base(class: &ClassDef, settings: ClassifierSettings) -> bool {
    class.bases.iter().filter_map(terminal_name).any(|name| {
        MODEL_BASES.contains(name) || (settings.include_root_model && name == ROOT_MODEL_BASE)
    })
}

fn has_model_config(class: &ClassDef) -> bool {
    class.body.iter().any(|stmt| match stmt {
        Stmt::AnnAssign(ann) => ann.simple_name() == Some(MODEL_CONFIG),
        Stmt::Assign(assign) => assign
            .targets
            .iter()
            .any(|t| matches!(t, Expr::Name(id) if id == MODEL_CONFIG)),
        _ => false,
    })
}

fn has_field_call(class: &ClassDef) -> bool {
    class.body.iter().any(|stmt| {
        let value = match stmt {
            Stmt::Assign(assign) => Some(&assign.value),
            Stmt::AnnAssign(ann) => ann.value.as_ref(),
            _ => None,
        };
        match value {
            Some(Expr::Call(call)) if is_name_or_attr(&call.func, FIELD_FUNCTION) => call
                .keywords
                .iter()
                .filter_map(|kw| kw.arg.as_deref())
                .all(|arg| FIELD_OPTIONS.contains(arg)),
            _ => false,
        }
    })
}

fn has_annotated_field(class: &ClassDef) -> bool {
    class.annotated_fields().any(|ann| is_annotated(&ann.annotation))
}

fn has_model_decorator(class: &ClassDef) -> bool {
    class.methods().any(|method| {
        decorator_names(&method.decorators)
            .iter()
            .any(|name| MODEL_DECORATORS.contains(*name))
    })
}

fn has_model_method(class: &ClassDef) -> bool {
    class.methods().any(|method| {
        MODEL_METHODS.contains(method.name.as_str())
            || MODEL_METHOD_PREFIXES
                .iter()
                .any(|prefix| method.name.starts_with(prefix))
    })
}
