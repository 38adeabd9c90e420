//! # pydantic-lint-rules
//!
//! Built-in lint rules for pydantic-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Applies to | Description |
//! |------|------|------------|-------------|
//! | RULE-FIELD-POS-DEFAULT | `field-positional-default` | models, records | Positional argument for Field default argument |
//! | RULE-NONANNOTATED-ATTR | `non-annotated-attribute` | models | Non-annotated attribute inside model |
//! | RULE-REDUNDANT-FIELD | `redundant-field-call` | models, records | Unnecessary Field call to specify a default value |
//! | RULE-ANNOTATED-DEFAULT | `default-inside-annotated` | models, records | Default argument specified inside Annotated |
//! | RULE-NAME-SHADOWS-TYPE | `name-shadows-annotation` | models, records | Field name overrides annotation |
//! | RULE-DUPLICATE-FIELD | `duplicate-field-name` | models, records | Duplicate field name |
//! | RULE-RESERVED-CONFIG | `reserved-config-attribute` | plain classes | Usage of reserved `__pydantic_config__` outside a recognized model-like class |
//!
//! ## Usage
//!
//! ```ignore
//! use pydantic_lint_core::Analyzer;
//! use pydantic_lint_rules::{DuplicateFieldName, RedundantFieldCall};
//! use pydantic_lint_ts::PythonParser;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(PythonParser::new())
//!     .rule(DuplicateFieldName::new())
//!     .rule(RedundantFieldCall::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod default_inside_annotated;
pub mod duplicate_field_name;
pub mod field_positional_default;
pub mod name_shadows_annotation;
pub mod non_annotated_attribute;
mod presets;
pub mod redundant_field_call;
pub mod reserved_config_attribute;

pub use default_inside_annotated::DefaultInsideAnnotated;
pub use duplicate_field_name::DuplicateFieldName;
pub use field_positional_default::FieldPositionalDefault;
pub use name_shadows_annotation::NameShadowsAnnotation;
pub use non_annotated_attribute::NonAnnotatedAttribute;
pub use presets::{all_rules, rule_names, select_rules};
pub use redundant_field_call::RedundantFieldCall;
pub use reserved_config_attribute::ReservedConfigAttribute;

/// Re-export core types for convenience.
pub use pydantic_lint_core::{Rule, Severity, Violation};
