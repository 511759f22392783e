use std::{collections::BTreeMap, rc::Rc};

use crate::{
    ast::{ClassDecl, Expr, ExternDecl, FunctionDecl, QualifiedName},
    runtime::value::Value,
    syntax::span::Span,
};

/// A variable or constant introduced by `var` or `const`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name:  String,
    pub value: Option<Expr>,
    pub span:  Span,
}

/// The destination of a `goto`.
#[derive(Debug, Clone, PartialEq)]
pub enum GotoTarget {
    Label(String),
    /// `goto case value;`
    Case(Value),
    /// `goto default;`
    Default,
}

impl GotoTarget {
    /// The name under which the target is registered in its block.
    #[must_use]
    pub fn label_name(&self) -> String {
        match self {
            Self::Label(name) => name.clone(),
            Self::Case(value) => case_label(value),
            Self::Default => DEFAULT_LABEL.to_string(),
        }
    }
}

/// The label of the `default:` section of a switch.
pub const DEFAULT_LABEL: &str = "default";

/// The label of the `case value:` section of a switch.
#[must_use]
pub fn case_label(value: &Value) -> String {
    format!("case {value}")
}

/// `catch (name) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub name:  String,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `import a::b as c;`
    Import {
        path:  QualifiedName,
        alias: Option<String>,
    },
    Class(Rc<ClassDecl>),
    Function(Rc<FunctionDecl>),
    Extern(ExternDecl),
    /// `const A = 1, B = 2;`
    Constants(Vec<Declarator>),
    /// `var a, b = 1;`
    Variables(Vec<Declarator>),
    /// `let target = value;`, destructuring when the target is a list.
    Let {
        target: Expr,
        value:  Expr,
    },
    Block(Block),
    If {
        condition:   Expr,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    /// The sections of a switch are flattened in `body`: each case value and the
    /// default section point at the index of their first statement.
    Switch {
        subject: Expr,
        cases:   Vec<(Value, usize)>,
        default: Option<usize>,
        body:    Block,
    },
    For {
        initializers: Vec<Statement>,
        guard:        Option<Expr>,
        updaters:     Vec<Expr>,
        body:         Box<Statement>,
    },
    ForEach {
        key:        String,
        value:      String,
        collection: Expr,
        body:       Box<Statement>,
    },
    While {
        condition: Expr,
        body:      Box<Statement>,
    },
    DoWhile {
        body:      Box<Statement>,
        condition: Expr,
    },
    Continue,
    Break,
    Goto(GotoTarget),
    Yield(Expr),
    Return(Option<Expr>),
    Throw(Expr),
    Try {
        resource: Option<Expr>,
        body:     Block,
        catch:    Option<CatchClause>,
        finally:  Option<Block>,
    },
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

impl Statement {
    #[must_use]
    pub const fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// A sequence of statements together with the labels they declare.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    /// Each label maps to the index of the statement it precedes. A label
    /// placed after the last statement maps to `statements.len()`.
    pub labels:     BTreeMap<String, usize>,
    pub span:       Span,
}

impl Block {
    #[must_use]
    pub const fn new(statements: Vec<Statement>,
                     labels: BTreeMap<String, usize>,
                     span: Span)
                     -> Self {
        Self { statements,
               labels,
               span }
    }

    /// The index of the statement a label points at.
    #[must_use]
    pub fn address(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }
}

/// The root of a parsed script.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub file_name:  String,
    pub statements: Vec<Statement>,
    pub labels:     BTreeMap<String, usize>,
    pub span:       Span,
}
