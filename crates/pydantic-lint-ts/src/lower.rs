//! Lowering of tree-sitter-python nodes into the core syntax model.

use pydantic_lint_core::{
    AnnAssign, Assign, Call, ClassDef, Comment, Expr, FunctionDef, Keyword, Module, Operator,
    Position, Stmt,
};
use tree_sitter::Node;

/// Converts concrete syntax nodes of one source unit.
pub(crate) struct Lowerer<'s> {
    src: &'s [u8],
}

impl<'s> Lowerer<'s> {
    pub(crate) fn new(src: &'s str) -> Self {
        Self {
            src: src.as_bytes(),
        }
    }

    pub(crate) fn module(&self, root: Node<'_>) -> Module {
        let mut comments = Vec::new();
        self.collect_comments(root, &mut comments);
        Module {
            body: self.statements(root),
            comments,
        }
    }

    /// Comments are extras and may hang off any node, so the whole tree is
    /// searched. String contents never produce `comment` nodes.
    fn collect_comments(&self, node: Node<'_>, out: &mut Vec<Comment>) {
        if node.kind() == "comment" {
            out.push(Comment {
                position: position(node),
                text: self.text(node).to_string(),
            });
            return;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        for child in children {
            self.collect_comments(child, out);
        }
    }

    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.src).unwrap_or_default()
    }

    fn statements(&self, block: Node<'_>) -> Vec<Stmt> {
        named_children(block)
            .into_iter()
            .map(|node| self.statement(node))
            .collect()
    }

    fn statement(&self, node: Node<'_>) -> Stmt {
        match node.kind() {
            "class_definition" => Stmt::ClassDef(self.class_def(node, Vec::new())),
            "function_definition" => Stmt::FunctionDef(self.function_def(node, Vec::new())),
            "decorated_definition" => self.decorated(node),
            "expression_statement" => self.expression_statement(node),
            _ => self.other(node),
        }
    }

    fn decorated(&self, node: Node<'_>) -> Stmt {
        let decorators = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "decorator")
            .map(|decorator| {
                named_children(decorator)
                    .first()
                    .map_or(Expr::Other, |expr| self.expr(*expr))
            })
            .collect();

        match node.child_by_field_name("definition") {
            Some(def) if def.kind() == "class_definition" => {
                Stmt::ClassDef(self.class_def(def, decorators))
            }
            Some(def) if def.kind() == "function_definition" => {
                Stmt::FunctionDef(self.function_def(def, decorators))
            }
            _ => self.other(node),
        }
    }

    fn class_def(&self, node: Node<'_>, decorators: Vec<Expr>) -> ClassDef {
        let mut bases = Vec::new();
        let mut keywords = Vec::new();
        if let Some(arguments) = node.child_by_field_name("superclasses") {
            self.arguments(arguments, &mut bases, &mut keywords);
        }

        ClassDef {
            name: self.field_text(node, "name"),
            bases,
            keywords,
            decorators,
            body: self.body(node),
            position: position(node),
        }
    }

    fn function_def(&self, node: Node<'_>, decorators: Vec<Expr>) -> FunctionDef {
        let mut cursor = node.walk();
        let is_async = node.children(&mut cursor).any(|c| c.kind() == "async");

        FunctionDef {
            name: self.field_text(node, "name"),
            decorators,
            body: self.body(node),
            is_async,
            position: position(node),
        }
    }

    fn body(&self, node: Node<'_>) -> Vec<Stmt> {
        node.child_by_field_name("body")
            .map(|block| self.statements(block))
            .unwrap_or_default()
    }

    fn field_text(&self, node: Node<'_>, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|n| self.text(n).to_string())
            .unwrap_or_default()
    }

    fn expression_statement(&self, node: Node<'_>) -> Stmt {
        let children = named_children(node);
        match children.as_slice() {
            [assignment] if assignment.kind() == "assignment" => self.assignment(*assignment),
            _ => self.other(node),
        }
    }

    fn assignment(&self, node: Node<'_>) -> Stmt {
        let target = node
            .child_by_field_name("left")
            .map_or(Expr::Other, |n| self.expr(n));
        let right = node.child_by_field_name("right");

        if let Some(annotation) = node.child_by_field_name("type") {
            return Stmt::AnnAssign(AnnAssign {
                target,
                annotation: self.expr(annotation),
                value: right.map(|n| self.expr(n)),
                position: position(node),
            });
        }

        // `a = b = value` nests the second assignment in `right`.
        let mut targets = vec![target];
        let mut right = right;
        while let Some(inner) = right.filter(|n| n.kind() == "assignment") {
            targets.push(
                inner
                    .child_by_field_name("left")
                    .map_or(Expr::Other, |n| self.expr(n)),
            );
            right = inner.child_by_field_name("right");
        }

        Stmt::Assign(Assign {
            targets,
            value: right.map_or(Expr::Other, |n| self.expr(n)),
            position: position(node),
        })
    }

    /// Any statement without its own variant. Blocks nested anywhere below
    /// it (`if`/`elif`/`else`, `try`/`except`, `with`, `match` cases) are
    /// lowered in source order.
    fn other(&self, node: Node<'_>) -> Stmt {
        let mut body = Vec::new();
        self.collect_blocks(node, &mut body);
        Stmt::Other {
            position: position(node),
            body,
        }
    }

    fn collect_blocks(&self, node: Node<'_>, body: &mut Vec<Stmt>) {
        for child in named_children(node) {
            if child.kind() == "block" {
                body.extend(self.statements(child));
            } else {
                self.collect_blocks(child, body);
            }
        }
    }

    fn arguments(&self, node: Node<'_>, args: &mut Vec<Expr>, keywords: &mut Vec<Keyword>) {
        for child in named_children(node) {
            match child.kind() {
                "keyword_argument" => keywords.push(Keyword {
                    arg: child
                        .child_by_field_name("name")
                        .map(|n| self.text(n).to_string()),
                    value: child
                        .child_by_field_name("value")
                        .map_or(Expr::Other, |n| self.expr(n)),
                }),
                "dictionary_splat" => keywords.push(Keyword {
                    arg: None,
                    value: named_children(child)
                        .first()
                        .map_or(Expr::Other, |n| self.expr(*n)),
                }),
                _ => args.push(self.expr(child)),
            }
        }
    }

    pub(crate) fn expr(&self, node: Node<'_>) -> Expr {
        match node.kind() {
            "identifier" | "keyword_identifier" => Expr::Name(self.text(node).to_string()),
            "attribute" => Expr::Attribute {
                value: Box::new(self.field_expr(node, "object")),
                attr: self.field_text(node, "attribute"),
            },
            "call" => self.call(node),
            "subscript" => {
                let mut cursor = node.walk();
                let elements: Vec<Expr> = node
                    .children_by_field_name("subscript", &mut cursor)
                    .map(|n| self.expr(n))
                    .collect();
                Expr::Subscript {
                    value: Box::new(self.field_expr(node, "value")),
                    slice: Box::new(into_slice(elements)),
                }
            }
            "binary_operator" => Expr::BinOp {
                left: Box::new(self.field_expr(node, "left")),
                op: match node.child_by_field_name("operator").map(|n| n.kind()) {
                    Some("|") => Operator::BitOr,
                    _ => Operator::Other,
                },
                right: Box::new(self.field_expr(node, "right")),
            },
            "tuple" | "expression_list" | "pattern_list" | "tuple_pattern" => {
                Expr::Tuple(self.exprs(named_children(node)))
            }
            // `(x)` is just `x`; `type` wraps every annotation.
            "parenthesized_expression" | "type" => match named_children(node).as_slice() {
                [inner] => self.expr(*inner),
                _ => Expr::Other,
            },
            "generic_type" => self.generic_type(node),
            "union_type" => {
                let parts = named_children(node);
                match parts.as_slice() {
                    [left, right] => Expr::BinOp {
                        left: Box::new(self.expr(*left)),
                        op: Operator::BitOr,
                        right: Box::new(self.expr(*right)),
                    },
                    _ => Expr::Other,
                }
            }
            "member_type" => {
                let parts = named_children(node);
                match parts.as_slice() {
                    [value, attr] => Expr::Attribute {
                        value: Box::new(self.expr(*value)),
                        attr: self.text(*attr).to_string(),
                    },
                    _ => Expr::Other,
                }
            }
            _ => Expr::Other,
        }
    }

    fn field_expr(&self, node: Node<'_>, field: &str) -> Expr {
        node.child_by_field_name(field)
            .map_or(Expr::Other, |n| self.expr(n))
    }

    fn exprs(&self, nodes: Vec<Node<'_>>) -> Vec<Expr> {
        nodes.into_iter().map(|n| self.expr(n)).collect()
    }

    fn call(&self, node: Node<'_>) -> Expr {
        let mut args = Vec::new();
        let mut keywords = Vec::new();
        if let Some(arguments) = node.child_by_field_name("arguments") {
            if arguments.kind() == "argument_list" {
                self.arguments(arguments, &mut args, &mut keywords);
            } else {
                // `f(x for x in y)`
                args.push(Expr::Other);
            }
        }

        Expr::Call(Call {
            func: Box::new(self.field_expr(node, "function")),
            args,
            keywords,
        })
    }

    /// `List[int]` in annotation position: a name followed by
    /// `type_parameter`.
    fn generic_type(&self, node: Node<'_>) -> Expr {
        let mut value = Expr::Other;
        let mut elements = Vec::new();
        for child in named_children(node) {
            if child.kind() == "type_parameter" {
                elements = self.exprs(named_children(child));
            } else {
                value = Expr::Name(self.text(child).to_string());
            }
        }
        Expr::Subscript {
            value: Box::new(value),
            slice: Box::new(into_slice(elements)),
        }
    }
}

/// Several subscript elements form a tuple slice, like `x[a, b]` in Python.
fn into_slice(mut elements: Vec<Expr>) -> Expr {
    if elements.len() == 1 {
        elements.pop().unwrap_or(Expr::Other)
    } else {
        Expr::Tuple(elements)
    }
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn position(node: Node<'_>) -> Position {
    let point = node.start_position();
    Position::new(point.row + 1, point.column)
}
