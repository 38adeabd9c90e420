//! # pydantic-lint-ts
//!
//! Tree-sitter based Python front end for pydantic-lint.
//!
//! [`PythonParser`] implements [`pydantic_lint_core::SourceParser`]: it
//! parses with tree-sitter-python, rejects sources with syntax errors and
//! lowers the concrete tree into the core syntax model.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lower;
mod parser;

pub use parser::PythonParser;
