//! # pydantic-lint-core
//!
//! Core framework for linting Pydantic models and dataclasses in Python
//! source.
//!
//! This crate is independent of any concrete parser. It provides:
//!
//! - a closed syntax model ([`Module`], [`Stmt`], [`Expr`]) that front ends
//!   lower into, behind the [`SourceParser`] trait
//! - syntax-pattern [`matchers`] and the [`classify`] step deciding whether a
//!   class is a model, a dataclass record or a plain class
//! - the [`Rule`] trait and the [`Checker`] that walks a tree and dispatches
//!   rules by class kind
//! - the [`Analyzer`] that discovers files, runs the checker in parallel and
//!   applies configuration and `# noqa` suppression
//!
//! ## Example
//!
//! ```ignore
//! use pydantic_lint_core::Analyzer;
//! use pydantic_lint_ts::PythonParser;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(PythonParser::new())
//!     .rules(pydantic_lint_rules::all_rules())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
pub mod ast;
mod checker;
pub mod classify;
mod config;
mod context;
pub mod matchers;
mod rule;
mod types;

/// Utility modules shared by the analyzer and front ends.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use ast::{
    AnnAssign, Assign, Call, ClassDef, Comment, Expr, FunctionDef, Keyword, Module, Operator,
    Position, SourceParser, Stmt, SyntaxError,
};
pub use checker::Checker;
pub use classify::{ClassKind, ClassifierSettings};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use rule::{Rule, RuleBox};
pub use types::{
    Diagnostic, LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic,
};
