//! Python front end using Tree-sitter.

use pydantic_lint_core::{Module, SourceParser, SyntaxError};
use tree_sitter::{Language, Node, Parser};

use crate::lower::Lowerer;

/// Parses Python source with tree-sitter-python and lowers the tree into
/// the core syntax model.
///
/// Source that tree-sitter can only recover from (any `ERROR` or `MISSING`
/// node) is rejected with the position of the first offending node.
pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    /// Creates a new Python parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for PythonParser {
    fn parse(&self, source: &str) -> Result<Module, SyntaxError> {
        // `Parser` is not `Sync`.
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| SyntaxError {
                line: 1,
                column: 0,
                message: format!("failed to load Python grammar: {e}"),
            })?;

        let tree = parser.parse(source, None).ok_or_else(|| SyntaxError {
            line: 1,
            column: 0,
            message: "parser produced no tree".to_string(),
        })?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(first_error(root).map_or_else(
                || SyntaxError {
                    line: 1,
                    column: 0,
                    message: "invalid syntax".to_string(),
                },
                |node| {
                    let point = node.start_position();
                    SyntaxError {
                        line: point.row + 1,
                        column: point.column,
                        message: if node.is_missing() {
                            format!("missing `{}`", node.kind())
                        } else {
                            "invalid syntax".to_string()
                        },
                    }
                },
            ));
        }

        tracing::trace!(bytes = source.len(), "parsed Python source");
        Ok(Lowerer::new(source).module(root))
    }
}

/// Finds the first `ERROR` or `MISSING` node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pydantic_lint_core::{Expr, Operator, Position, Stmt};

    fn parse(src: &str) -> Module {
        PythonParser::new().parse(src).expect("parse failed")
    }

    fn class_body(module: &Module) -> &[Stmt] {
        match &module.body[0] {
            Stmt::ClassDef(class) => &class.body,
            other => panic!("expected class, got {other:?}"),
        }
    }

    fn name(id: &str) -> Expr {
        Expr::Name(id.to_string())
    }

    #[test]
    fn lowers_class_with_bases_keywords_and_decorators() {
        let module = parse(
            "@dataclasses.dataclass(frozen=True)\nclass A(Base, pkg.Mixin, metaclass=Meta):\n    x: int\n",
        );
        let Stmt::ClassDef(class) = &module.body[0] else {
            panic!("expected class");
        };
        assert_eq!(class.name, "A");
        assert_eq!(class.position, Position::new(2, 0));
        assert_eq!(class.bases.len(), 2);
        assert_eq!(class.bases[0], name("Base"));
        assert!(matches!(&class.bases[1], Expr::Attribute { attr, .. } if attr == "Mixin"));
        assert_eq!(class.keywords[0].arg.as_deref(), Some("metaclass"));
        assert!(matches!(&class.decorators[0], Expr::Call(call) if call.has_keyword("frozen")));
    }

    #[test]
    fn lowers_annotated_assignments() {
        let module = parse("class A:\n    x: int\n    y: str = Field(1, alias='b')\n");
        let body = class_body(&module);

        let Stmt::AnnAssign(x) = &body[0] else {
            panic!("expected annotated assignment");
        };
        assert_eq!(x.simple_name(), Some("x"));
        assert_eq!(x.annotation, name("int"));
        assert!(x.value.is_none());
        assert_eq!(x.position, Position::new(2, 4));

        let Stmt::AnnAssign(y) = &body[1] else {
            panic!("expected annotated assignment");
        };
        let Some(Expr::Call(call)) = &y.value else {
            panic!("expected call value");
        };
        assert_eq!(*call.func, name("Field"));
        assert_eq!(call.args.len(), 1);
        assert!(call.has_keyword("alias"));
    }

    #[test]
    fn lowers_chained_and_tuple_assignments() {
        let module = parse("a = b = 1\nc, d = 1, 2\n");
        let Stmt::Assign(chained) = &module.body[0] else {
            panic!("expected assignment");
        };
        assert_eq!(chained.targets, vec![name("a"), name("b")]);

        let Stmt::Assign(unpack) = &module.body[1] else {
            panic!("expected assignment");
        };
        assert_eq!(unpack.targets, vec![Expr::Tuple(vec![name("c"), name("d")])]);
    }

    #[test]
    fn lowers_subscripts_and_unions() {
        let module = parse("class A:\n    x: Annotated[int, Field(default=1)]\n    y: int | None\n");
        let body = class_body(&module);

        let Stmt::AnnAssign(x) = &body[0] else {
            panic!("expected annotated assignment");
        };
        let Expr::Subscript { value, slice } = &x.annotation else {
            panic!("expected subscript, got {:?}", x.annotation);
        };
        assert_eq!(**value, name("Annotated"));
        assert!(matches!(&**slice, Expr::Tuple(items) if items.len() == 2));

        let Stmt::AnnAssign(y) = &body[1] else {
            panic!("expected annotated assignment");
        };
        assert!(matches!(
            &y.annotation,
            Expr::BinOp { op: Operator::BitOr, .. }
        ));
    }

    #[test]
    fn keeps_classes_nested_in_compound_statements() {
        let module = parse(
            "if TYPE_CHECKING:\n    pass\nelse:\n    class A(BaseModel):\n        # comment\n        x: int\n",
        );
        let Stmt::Other { body, .. } = &module.body[0] else {
            panic!("expected compound statement");
        };
        let Some(Stmt::ClassDef(class)) = body.last() else {
            panic!("expected nested class");
        };
        assert_eq!(class.body.len(), 1);
        assert_eq!(class.position, Position::new(4, 4));
    }

    #[test]
    fn lowers_async_methods() {
        let module = parse("class A:\n    async def f(self):\n        pass\n    def g(self): ...\n");
        let body = class_body(&module);
        assert!(matches!(&body[0], Stmt::FunctionDef(f) if f.is_async && f.name == "f"));
        assert!(matches!(&body[1], Stmt::FunctionDef(g) if !g.is_async && g.name == "g"));
    }

    #[test]
    fn rejects_invalid_source() {
        let err = PythonParser::new()
            .parse("class A(BaseModel):\n    x: int = (\n")
            .unwrap_err();
        assert!(err.line >= 2);
    }

    #[test]
    fn empty_source_is_an_empty_module() {
        assert!(parse("").body.is_empty());
    }

    #[test]
    fn collects_comments_but_not_string_contents() {
        let module = parse(
            "# header\nclass M(BaseModel):\n    a = 1  # noqa: RULE\n    b = \"# noqa\"\n    c = '''\n# text\n'''\n",
        );
        let comments: Vec<_> = module
            .comments
            .iter()
            .map(|c| (c.position.line, c.position.column, c.text.as_str()))
            .collect();
        assert_eq!(comments, vec![(1, 0, "# header"), (3, 11, "# noqa: RULE")]);
    }
}
