//! Closed syntax model for Python source units.
//!
//! Front ends lower their concrete trees into these types; every matcher,
//! the classifier and the rules pattern-match on them exhaustively. Only
//! the shapes the rules care about get their own variant, everything else
//! collapses into `Other`.

/// Start position of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within the line).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A parsed source unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    /// Top-level statements in source order.
    pub body: Vec<Stmt>,
    /// Every `#` comment of the unit in source order, wherever it appears.
    pub comments: Vec<Comment>,
}

/// A source comment, text including the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Start of the `#`.
    pub position: Position,
    /// Comment text.
    pub text: String,
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `class Name(bases): ...`
    ClassDef(ClassDef),
    /// `def name(...): ...` or `async def name(...): ...`
    FunctionDef(FunctionDef),
    /// `target = value`
    Assign(Assign),
    /// `target: annotation` or `target: annotation = value`
    AnnAssign(AnnAssign),
    /// Any other statement. Statements of its nested blocks are kept in
    /// `body` so classes defined under `if`/`try`/... remain reachable.
    Other {
        /// Statement start.
        position: Position,
        /// Statements of nested blocks, flattened in source order.
        body: Vec<Stmt>,
    },
}

impl Stmt {
    /// Returns the start position of the statement.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::ClassDef(c) => c.position,
            Self::FunctionDef(f) => f.position,
            Self::Assign(a) => a.position,
            Self::AnnAssign(a) => a.position,
            Self::Other { position, .. } => *position,
        }
    }
}

/// A class definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    /// Class name.
    pub name: String,
    /// Positional base class expressions.
    pub bases: Vec<Expr>,
    /// Keyword arguments of the class header (e.g. `metaclass=...`).
    pub keywords: Vec<Keyword>,
    /// Decorator expressions, outermost first.
    pub decorators: Vec<Expr>,
    /// Direct body statements.
    pub body: Vec<Stmt>,
    /// Position of the `class` keyword.
    pub position: Position,
}

impl ClassDef {
    /// Iterates over direct annotated assignments of the body.
    pub fn annotated_fields(&self) -> impl Iterator<Item = &AnnAssign> {
        self.body.iter().filter_map(|stmt| match stmt {
            Stmt::AnnAssign(field) => Some(field),
            _ => None,
        })
    }

    /// Iterates over methods defined directly in the body.
    pub fn methods(&self) -> impl Iterator<Item = &FunctionDef> {
        self.body.iter().filter_map(|stmt| match stmt {
            Stmt::FunctionDef(func) => Some(func),
            _ => None,
        })
    }
}

/// A function or method definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Function name.
    pub name: String,
    /// Decorator expressions, outermost first.
    pub decorators: Vec<Expr>,
    /// Body statements.
    pub body: Vec<Stmt>,
    /// Whether this is an `async def`.
    pub is_async: bool,
    /// Position of the `def` keyword (or `async`).
    pub position: Position,
}

/// A plain assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    /// Assignment targets, left to right (`a = b = 1` has two).
    pub targets: Vec<Expr>,
    /// Assigned value.
    pub value: Expr,
    /// Statement start.
    pub position: Position,
}

/// An annotated assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnAssign {
    /// Assignment target.
    pub target: Expr,
    /// Annotation expression.
    pub annotation: Expr,
    /// Assigned value, if any.
    pub value: Option<Expr>,
    /// Statement start.
    pub position: Position,
}

impl AnnAssign {
    /// Returns the target name when the target is a bare name.
    #[must_use]
    pub fn simple_name(&self) -> Option<&str> {
        match &self.target {
            Expr::Name(id) => Some(id),
            _ => None,
        }
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A bare name, e.g. `Field`.
    Name(String),
    /// Qualified access, e.g. `pydantic.Field`.
    Attribute {
        /// Accessed object.
        value: Box<Expr>,
        /// Attribute name.
        attr: String,
    },
    /// A call expression.
    Call(Call),
    /// `value[slice]`
    Subscript {
        /// Subscripted object.
        value: Box<Expr>,
        /// Subscript. A [`Expr::Tuple`] when several elements are listed.
        slice: Box<Expr>,
    },
    /// Binary operation.
    BinOp {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: Operator,
        /// Right operand.
        right: Box<Expr>,
    },
    /// Tuple display, parenthesized or not.
    Tuple(Vec<Expr>),
    /// Any other expression.
    Other,
}

/// A call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Callee.
    pub func: Box<Expr>,
    /// Positional arguments (including `*args`).
    pub args: Vec<Expr>,
    /// Keyword arguments (including `**kwargs`).
    pub keywords: Vec<Keyword>,
}

impl Call {
    /// Returns true if any keyword argument has the given name.
    #[must_use]
    pub fn has_keyword(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| k.arg.as_deref() == Some(name))
    }
}

/// A keyword argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    /// Keyword name, `None` for `**kwargs`.
    pub arg: Option<String>,
    /// Argument value.
    pub value: Expr,
}

/// Binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `|`
    BitOr,
    /// Anything else.
    Other,
}

/// The source could not be turned into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {line}:{column}")]
pub struct SyntaxError {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed).
    pub column: usize,
    /// Description of the failure.
    pub message: String,
}

/// Turns source text into a [`Module`].
///
/// Implemented by language front ends; the analyzer only sees this trait.
pub trait SourceParser: Send + Sync {
    /// Parses a whole source unit.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the source is not syntactically valid.
    fn parse(&self, source: &str) -> Result<Module, SyntaxError>;
}
