//! Syntax-pattern matchers.
//!
//! Stateless predicates over [`Expr`] nodes. Every matcher is total: a
//! shape it does not recognise (a computed decorator, a call used as a
//! base class, ...) is a negative answer, never an error.

use std::collections::HashSet;

use crate::ast::{Expr, Operator};

/// Base classes that make a class a model.
pub static MODEL_BASES: phf::Set<&'static str> = phf::phf_set! { "BaseModel" };

/// Base class that counts as a model base when root models are included.
pub const ROOT_MODEL_BASE: &str = "RootModel";

/// Keyword names accepted by `Field(...)`.
pub static FIELD_OPTIONS: phf::Set<&'static str> = phf::phf_set! {
    "default",
    "default_factory",
    "alias",
    "alias_priority",
    "validation_alias",
    "title",
    "description",
    "examples",
    "exclude",
    "discriminator",
    "json_schema_extra",
    "frozen",
    "validate_default",
    "repr",
    "init",
    "init_var",
    "kw_only",
    "pattern",
    "strict",
    "gt",
    "ge",
    "lt",
    "le",
    "multiple_of",
    "allow_inf_nan",
    "max_digits",
    "decimal_places",
    "min_length",
    "max_length",
    "union_mode",
};

/// Method decorators only found on models.
pub static MODEL_DECORATORS: phf::Set<&'static str> = phf::phf_set! {
    "computed_field",
    "field_serializer",
    "model_serializer",
    "field_validator",
    "model_validator",
};

/// Method names defined by the model base class.
pub static MODEL_METHODS: phf::Set<&'static str> = phf::phf_set! {
    "model_construct",
    "model_copy",
    "model_dump",
    "model_dump_json",
    "model_json_schema",
    "model_parametrized_name",
    "model_rebuild",
    "model_validate",
    "model_validate_json",
    "model_validate_strings",
};

/// Name prefixes of model hook methods.
pub const MODEL_METHOD_PREFIXES: &[&str] = &["__pydantic_", "__get_pydantic_"];

/// Class decorators that make a class a record.
pub static RECORD_DECORATORS: phf::Set<&'static str> = phf::phf_set! {
    "dataclass",
    "pydantic_dataclass",
};

/// Name of the field-configuration function.
pub const FIELD_FUNCTION: &str = "Field";

/// Name of the metadata-carrying annotation form.
pub const ANNOTATED: &str = "Annotated";

/// Returns the final component of a plain or qualified reference.
///
/// `Field` and `pydantic.Field` both yield `"Field"`.
#[must_use]
pub fn terminal_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Name(id) => Some(id),
        Expr::Attribute { attr, .. } => Some(attr),
        _ => None,
    }
}

/// Collects the bare names of a decorator list.
///
/// `@decorator`, `@decorator(...)`, `@module.decorator` and
/// `@module.decorator(...)` all contribute `"decorator"`.
#[must_use]
pub fn decorator_names(decorators: &[Expr]) -> HashSet<&str> {
    decorators
        .iter()
        .filter_map(|dec| match dec {
            Expr::Call(call) => terminal_name(&call.func),
            other => terminal_name(other),
        })
        .collect()
}

/// Returns true if `expr` is a call whose callee is named `target`.
#[must_use]
pub fn is_call_to(expr: &Expr, target: &str) -> bool {
    match expr {
        Expr::Call(call) => is_name_or_attr(&call.func, target),
        _ => false,
    }
}

/// Returns true if `expr` is `target` or `<anything>.target`.
#[must_use]
pub fn is_name_or_attr(expr: &Expr, target: &str) -> bool {
    terminal_name(expr) == Some(target)
}

/// Returns true if `expr` is a subscripted `Annotated[...]`.
#[must_use]
pub fn is_annotated(expr: &Expr) -> bool {
    match expr {
        Expr::Subscript { value, .. } => is_name_or_attr(value, ANNOTATED),
        _ => false,
    }
}

/// Collects every bare type name referenced by an annotation.
///
/// Descends through `A | B` unions and subscripted generics, so
/// `Annotated[list[date], ...]`, `dict[str, date]` and `int | date | None`
/// all surface `date`.
#[must_use]
pub fn annotation_type_names(expr: &Expr) -> HashSet<&str> {
    let mut names = HashSet::new();
    collect_type_names(expr, &mut names);
    names
}

fn collect_type_names<'a>(expr: &'a Expr, names: &mut HashSet<&'a str>) {
    match expr {
        Expr::Name(id) => {
            names.insert(id.as_str());
        }
        Expr::BinOp {
            left,
            op: Operator::BitOr,
            right,
        } => {
            collect_type_names(left, names);
            collect_type_names(right, names);
        }
        Expr::Subscript { slice, .. } => match slice.as_ref() {
            Expr::Tuple(elts) => {
                for elt in elts {
                    collect_type_names(elt, names);
                }
            }
            single => collect_type_names(single, names),
        },
        Expr::Attribute { .. }
        | Expr::Call(_)
        | Expr::BinOp { .. }
        | Expr::Tuple(_)
        | Expr::Other => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Call;

    fn name(id: &str) -> Expr {
        Expr::Name(id.to_string())
    }

    fn attr(value: &str, attr: &str) -> Expr {
        Expr::Attribute {
            value: Box::new(name(value)),
            attr: attr.to_string(),
        }
    }

    fn call(func: Expr) -> Expr {
        Expr::Call(Call {
            func: Box::new(func),
            args: Vec::new(),
            keywords: Vec::new(),
        })
    }

    fn subscript(value: Expr, slice: Expr) -> Expr {
        Expr::Subscript {
            value: Box::new(value),
            slice: Box::new(slice),
        }
    }

    fn union(left: Expr, right: Expr) -> Expr {
        Expr::BinOp {
            left: Box::new(left),
            op: Operator::BitOr,
            right: Box::new(right),
        }
    }

    fn sorted<'a>(set: HashSet<&'a str>) -> Vec<&'a str> {
        let mut v: Vec<_> = set.into_iter().collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn decorator_forms_normalize_to_bare_name() {
        let decorators = vec![
            name("dataclass"),
            call(name("frozen")),
            attr("dataclasses", "field"),
            call(attr("pydantic", "computed_field")),
        ];
        assert_eq!(
            sorted(decorator_names(&decorators)),
            vec!["computed_field", "dataclass", "field", "frozen"]
        );
    }

    #[test]
    fn computed_decorator_contributes_nothing() {
        let decorators = vec![
            call(subscript(name("registry"), name("key"))),
            Expr::Other,
        ];
        assert!(decorator_names(&decorators).is_empty());
    }

    #[test]
    fn call_matching_ignores_qualification() {
        assert!(is_call_to(&call(name("Field")), "Field"));
        assert!(is_call_to(&call(attr("pydantic", "Field")), "Field"));
        assert!(!is_call_to(&name("Field"), "Field"));
        assert!(!is_call_to(&call(name("field")), "Field"));
    }

    #[test]
    fn name_or_attr_matches_final_component() {
        assert!(is_name_or_attr(&name("Annotated"), "Annotated"));
        assert!(is_name_or_attr(&attr("typing", "Annotated"), "Annotated"));
        assert!(!is_name_or_attr(&call(name("Annotated")), "Annotated"));
    }

    #[test]
    fn annotated_requires_subscript() {
        assert!(is_annotated(&subscript(
            attr("typing", "Annotated"),
            Expr::Tuple(vec![name("int"), Expr::Other]),
        )));
        assert!(!is_annotated(&name("Annotated")));
        assert!(!is_annotated(&subscript(name("list"), name("int"))));
    }

    #[test]
    fn type_names_through_unions() {
        let ann = union(union(name("int"), name("date")), Expr::Other);
        assert_eq!(sorted(annotation_type_names(&ann)), vec!["date", "int"]);
    }

    #[test]
    fn type_names_through_generics() {
        let ann = subscript(
            name("Annotated"),
            Expr::Tuple(vec![subscript(name("list"), name("date")), Expr::Other]),
        );
        assert_eq!(sorted(annotation_type_names(&ann)), vec!["date"]);

        let ann = subscript(name("dict"), Expr::Tuple(vec![name("str"), name("date")]));
        assert_eq!(sorted(annotation_type_names(&ann)), vec!["date", "str"]);
    }

    #[test]
    fn subscripted_value_is_not_a_type_name() {
        let ann = subscript(name("Optional"), name("date"));
        assert_eq!(sorted(annotation_type_names(&ann)), vec!["date"]);
    }

    #[test]
    fn non_union_operators_are_ignored() {
        let ann = Expr::BinOp {
            left: Box::new(name("a")),
            op: Operator::Other,
            right: Box::new(name("b")),
        };
        assert!(annotation_type_names(&ann).is_empty());
        assert!(annotation_type_names(&attr("datetime", "date")).is_empty());
    }

    #[test]
    fn tables_hold_expected_entries() {
        assert_eq!(FIELD_OPTIONS.len(), 30);
        assert!(FIELD_OPTIONS.contains("default_factory"));
        assert!(!FIELD_OPTIONS.contains("foo"));
        assert!(MODEL_METHODS.contains("model_dump_json"));
        assert!(!MODEL_METHODS.contains("model_unrelated"));
        assert!(RECORD_DECORATORS.contains("pydantic_dataclass"));
        assert!(MODEL_BASES.contains("BaseModel"));
    }
}
