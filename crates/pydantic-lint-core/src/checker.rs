//! Traversal controller.
//!
//! Walks a [`Module`] depth-first in body order, keeps a stack of the kinds
//! of the enclosing classes and dispatches rules at class bodies and field
//! declarations.

use tracing::trace;

use crate::ast::{AnnAssign, ClassDef, Module, Stmt};
use crate::classify::{classify, ClassKind, ClassifierSettings};
use crate::rule::RuleBox;
use crate::types::Diagnostic;

/// Runs rules over syntax trees.
///
/// A checker holds no per-tree state between calls, so the same instance
/// can check any number of modules and gives identical results for
/// identical trees.
pub struct Checker<'r> {
    rules: &'r [RuleBox],
    settings: ClassifierSettings,
}

impl<'r> Checker<'r> {
    /// Creates a checker for the given rules.
    #[must_use]
    pub fn new(rules: &'r [RuleBox], settings: ClassifierSettings) -> Self {
        Self { rules, settings }
    }

    /// Checks a whole module, returning diagnostics in traversal order.
    #[must_use]
    pub fn check_module(&self, module: &Module) -> Vec<Diagnostic> {
        let mut walk = Walk {
            checker: self,
            stack: Vec::new(),
            diagnostics: Vec::new(),
        };
        walk.visit_body(&module.body);
        debug_assert!(walk.stack.is_empty());
        walk.diagnostics
    }
}

/// State of one traversal.
struct Walk<'c, 'r> {
    checker: &'c Checker<'r>,
    /// Kinds of the enclosing classes, innermost last.
    stack: Vec<ClassKind>,
    diagnostics: Vec<Diagnostic>,
}

impl Walk<'_, '_> {
    fn current(&self) -> Option<ClassKind> {
        self.stack.last().copied()
    }

    /// Runs `f` with `kind` pushed as the innermost class kind.
    fn in_class<F: FnOnce(&mut Self)>(&mut self, kind: ClassKind, f: F) {
        let depth = self.stack.len();
        self.stack.push(kind);
        f(self);
        self.stack.pop();
        debug_assert_eq!(self.stack.len(), depth);
    }

    fn visit_body(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }

    /// Statements outside a class body, or nested in a method or a
    /// compound statement, are only walked to reach the classes they define.
    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::ClassDef(class) => self.visit_class(class),
            Stmt::FunctionDef(func) => self.visit_body(&func.body),
            Stmt::Other { body, .. } => self.visit_body(body),
            Stmt::Assign(_) | Stmt::AnnAssign(_) => {}
        }
    }

    fn visit_class(&mut self, class: &ClassDef) {
        let kind = classify(class, self.checker.settings);
        trace!(class = %class.name, %kind, line = class.position.line, "entering class");

        self.in_class(kind, |walk| {
            walk.check_class_body(class);

            for stmt in &class.body {
                match stmt {
                    Stmt::AnnAssign(field) => walk.check_field(field),
                    other => walk.visit_stmt(other),
                }
            }
        });
    }

    /// Runs the class-body rules of the innermost enclosing class kind.
    fn check_class_body(&mut self, class: &ClassDef) {
        let Some(kind) = self.current() else {
            return;
        };
        for rule in applicable(self.checker.rules, kind) {
            self.diagnostics.extend(rule.check_class(class));
        }
    }

    /// Runs the field rules of the innermost enclosing class kind. Outside
    /// any class nothing runs.
    fn check_field(&mut self, field: &AnnAssign) {
        let Some(kind) = self.current() else {
            return;
        };
        for rule in applicable(self.checker.rules, kind) {
            self.diagnostics.extend(rule.check_field(field));
        }
    }
}

fn applicable(rules: &[RuleBox], kind: ClassKind) -> impl Iterator<Item = &RuleBox> {
    rules
        .iter()
        .filter(move |rule| rule.applies_to().contains(&kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, FunctionDef, Position};
    use crate::rule::Rule;

    /// Reports every class and every field with the kind it was seen in.
    struct KindWitness(ClassKind);

    impl Rule for KindWitness {
        fn name(&self) -> &'static str {
            match self.0 {
                ClassKind::Model => "seen-model",
                ClassKind::Record => "seen-record",
                ClassKind::Plain => "seen-plain",
            }
        }
        fn code(&self) -> &'static str {
            self.name()
        }
        fn message(&self) -> &'static str {
            "seen"
        }
        fn applies_to(&self) -> &'static [ClassKind] {
            match self.0 {
                ClassKind::Model => &[ClassKind::Model],
                ClassKind::Record => &[ClassKind::Record],
                ClassKind::Plain => &[ClassKind::Plain],
            }
        }
        fn check_class(&self, class: &ClassDef) -> Vec<Diagnostic> {
            vec![self.diagnostic(class.position)]
        }
        fn check_field(&self, field: &AnnAssign) -> Vec<Diagnostic> {
            vec![self.diagnostic(field.position)]
        }
    }

    fn witnesses() -> Vec<RuleBox> {
        vec![
            Box::new(KindWitness(ClassKind::Model)),
            Box::new(KindWitness(ClassKind::Record)),
            Box::new(KindWitness(ClassKind::Plain)),
        ]
    }

    fn class(bases: Vec<Expr>, body: Vec<Stmt>, line: usize) -> Stmt {
        Stmt::ClassDef(ClassDef {
            name: format!("C{line}"),
            bases,
            keywords: Vec::new(),
            decorators: Vec::new(),
            body,
            position: Position::new(line, 0),
        })
    }

    fn field(line: usize) -> Stmt {
        Stmt::AnnAssign(AnnAssign {
            target: Expr::Name("x".to_string()),
            annotation: Expr::Name("int".to_string()),
            value: None,
            position: Position::new(line, 4),
        })
    }

    fn base_model() -> Vec<Expr> {
        vec![Expr::Name("BaseModel".to_string())]
    }

    fn module(body: Vec<Stmt>) -> Module {
        Module {
            body,
            ..Module::default()
        }
    }

    fn trail(diagnostics: &[Diagnostic]) -> Vec<(&'static str, usize)> {
        diagnostics.iter().map(|d| (d.code, d.line)).collect()
    }

    #[test]
    fn nothing_fires_outside_classes() {
        let rules = witnesses();
        let module = module(vec![field(1)]);
        assert!(Checker::new(&rules, ClassifierSettings::default())
            .check_module(&module)
            .is_empty());
    }

    #[test]
    fn nested_class_restores_outer_kind() {
        let rules = witnesses();
        let module = module(vec![class(
            base_model(),
            vec![field(2), class(vec![], vec![field(4)], 3), field(5)],
            1,
        )]);
        let diagnostics = Checker::new(&rules, ClassifierSettings::default()).check_module(&module);
        assert_eq!(
            trail(&diagnostics),
            vec![
                ("seen-model", 1),
                ("seen-model", 2),
                ("seen-plain", 3),
                ("seen-plain", 4),
                ("seen-model", 5),
            ]
        );
    }

    #[test]
    fn inner_class_does_not_inherit_outer_kind() {
        let rules = witnesses();
        let module = module(vec![class(vec![], vec![class(base_model(), vec![], 2)], 1)]);
        let diagnostics = Checker::new(&rules, ClassifierSettings::default()).check_module(&module);
        assert_eq!(
            trail(&diagnostics),
            vec![("seen-plain", 1), ("seen-model", 2)]
        );
    }

    #[test]
    fn fields_inside_methods_are_not_fields() {
        let rules = witnesses();
        let method = Stmt::FunctionDef(FunctionDef {
            name: "build".to_string(),
            decorators: Vec::new(),
            body: vec![field(3), class(vec![], vec![], 4)],
            is_async: false,
            position: Position::new(2, 4),
        });
        let module = module(vec![class(base_model(), vec![method], 1)]);
        let diagnostics = Checker::new(&rules, ClassifierSettings::default()).check_module(&module);
        assert_eq!(
            trail(&diagnostics),
            vec![("seen-model", 1), ("seen-plain", 4)]
        );
    }

    #[test]
    fn classes_under_compound_statements_are_reached() {
        let rules = witnesses();
        let module = module(vec![Stmt::Other {
            position: Position::new(1, 0),
            body: vec![class(base_model(), vec![field(3)], 2)],
        }]);
        let diagnostics = Checker::new(&rules, ClassifierSettings::default()).check_module(&module);
        assert_eq!(
            trail(&diagnostics),
            vec![("seen-model", 2), ("seen-model", 3)]
        );
    }

    #[test]
    fn repeated_runs_are_identical() {
        let rules = witnesses();
        let module = module(vec![class(base_model(), vec![field(2)], 1)]);
        let checker = Checker::new(&rules, ClassifierSettings::default());
        assert_eq!(checker.check_module(&module), checker.check_module(&module));
    }

    #[test]
    fn field_rules_follow_innermost_stack_entry() {
        let rules = witnesses();
        let checker = Checker::new(&rules, ClassifierSettings::default());
        let mut walk = Walk {
            checker: &checker,
            stack: Vec::new(),
            diagnostics: Vec::new(),
        };
        let Stmt::AnnAssign(field) = field(7) else {
            unreachable!("field() builds an annotated assignment");
        };

        walk.check_field(&field);
        assert!(walk.diagnostics.is_empty());

        walk.in_class(ClassKind::Model, |walk| {
            walk.in_class(ClassKind::Record, |walk| walk.check_field(&field));
            walk.check_field(&field);
        });
        assert_eq!(
            trail(&walk.diagnostics),
            vec![("seen-record", 7), ("seen-model", 7)]
        );
        assert!(walk.stack.is_empty());
    }
}
