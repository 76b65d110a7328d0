//! AST definitions for Routine source
//!
//! Both front ends produce a [`Routine`]: an ordered list of scheduled blocks
//! whose body type depends on the pipeline. The structural pass fills bodies
//! with [`Reference`]s, the full pass with [`Statement`]s.
//!
//! Every node owns its children; the whole tree is dropped together with the
//! routine. Node spans are byte ranges into the source that was parsed.

use crate::source::Span;
use serde::Serialize;
use std::fmt;

/// Root of a parsed routine file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Routine<B> {
    pub blocks: Vec<ScheduledBlock<B>>,
}

impl<B> Routine<B> {
    pub fn new() -> Self {
        Routine { blocks: Vec::new() }
    }
}

impl<B> Default for Routine<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Routine produced by the structural pass.
pub type ReferenceGraph = Routine<Vec<Reference>>;

/// Routine produced by the full pass.
pub type Program = Routine<Vec<Statement>>;

/// One `<flags- … -flags>` unit.
///
/// Open and close flags are recorded independently; nothing requires them
/// to match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledBlock<B> {
    pub open_flags: Vec<String>,
    pub close_flags: Vec<String>,
    pub body: B,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceKind {
    Node,
    Signal,
}

/// A `@node` or `@sig` marker found in a block body by the structural pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub span: Span,
}

/// Primitive type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimitiveType {
    Bool,
    Char,
    Float,
    Float32,
    Float64,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    String,
}

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Float32 => "float32",
            PrimitiveType::Float64 => "float64",
            PrimitiveType::Int => "int",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::UInt => "uint",
            PrimitiveType::UInt8 => "uint8",
            PrimitiveType::UInt16 => "uint16",
            PrimitiveType::UInt32 => "uint32",
            PrimitiveType::UInt64 => "uint64",
            PrimitiveType::String => "string",
        }
    }
}

/// Dotted identifier path, e.g. `story.flags.seen`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Name {
    pub segments: Vec<String>,
}

impl Name {
    pub fn new<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Name {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Type syntax: primitive or named (optionally generic), wrapped in zero or
/// more array layers. `T[][]` is `Array(Array(T))`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    Primitive(PrimitiveType),
    Named { name: Name, arguments: Vec<Type> },
    Array(Box<Type>),
}

impl Type {
    pub fn named(name: Name) -> Self {
        Type::Named {
            name,
            arguments: Vec::new(),
        }
    }

    pub fn array_of(element: Type) -> Self {
        Type::Array(Box::new(element))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LiteralKind {
    Integer,
    Float,
    Boolean,
    Character,
    String,
    Null,
    NodeMarker,
    SignalMarker,
}

/// Literal with its raw lexeme preserved. Decoding numbers and escapes is
/// left to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Literal {
    pub kind: LiteralKind,
    pub text: String,
}

/// `=` and the compound assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ModAssign,
    ShlAssign,
    ShrAssign,
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::AndAssign => "&=",
            AssignOp::OrAssign => "|=",
            AssignOp::XorAssign => "^=",
            AssignOp::ModAssign => "%=",
            AssignOp::ShlAssign => "<<=",
            AssignOp::ShrAssign => ">>=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
    PreDec,
    PreInc,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::PreDec => "--",
            UnaryOp::PreInc => "++",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PostfixOp {
    Inc,
    Dec,
}

impl PostfixOp {
    pub fn symbol(self) -> &'static str {
        match self {
            PostfixOp::Inc => "++",
            PostfixOp::Dec => "--",
        }
    }
}

/// Expressions of the embedded statement language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    Name {
        name: Name,
        span: Span,
    },
    Literal {
        literal: Literal,
        span: Span,
    },
    Parenthesized {
        inner: Box<Expression>,
        span: Span,
    },
    Assignment {
        op: AssignOp,
        target: Box<Expression>,
        value: Box<Expression>,
        span: Span,
    },
    Ternary {
        condition: Box<Expression>,
        then_expr: Box<Expression>,
        else_expr: Box<Expression>,
        span: Span,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
        span: Span,
    },
    Cast {
        target_type: Type,
        operand: Box<Expression>,
        span: Span,
    },
    PostfixIncDec {
        op: PostfixOp,
        operand: Box<Expression>,
        span: Span,
    },
    Index {
        target: Box<Expression>,
        index: Box<Expression>,
        span: Span,
    },
    Invoke {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
        span: Span,
    },
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Name { span, .. }
            | Expression::Literal { span, .. }
            | Expression::Parenthesized { span, .. }
            | Expression::Assignment { span, .. }
            | Expression::Ternary { span, .. }
            | Expression::Binary { span, .. }
            | Expression::Unary { span, .. }
            | Expression::Cast { span, .. }
            | Expression::PostfixIncDec { span, .. }
            | Expression::Index { span, .. }
            | Expression::Invoke { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CaseLabel {
    Case(Expression),
    Default,
}

/// One `case`/`default` label and the statements up to the next label.
/// The statement list may be empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    pub label: CaseLabel,
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// Statements of the embedded statement language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    Compound {
        statements: Vec<Statement>,
        span: Span,
    },
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
        span: Span,
    },
    Switch {
        selector: Expression,
        cases: Vec<SwitchCase>,
        span: Span,
    },
    Declaration {
        var_type: Type,
        name: String,
        init: Option<Expression>,
        span: Span,
    },
    Expression {
        expr: Expression,
        span: Span,
    },
    Break {
        span: Span,
    },
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Compound { span, .. }
            | Statement::If { span, .. }
            | Statement::Switch { span, .. }
            | Statement::Declaration { span, .. }
            | Statement::Expression { span, .. }
            | Statement::Break { span } => *span,
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(primitive) => write!(f, "{}", primitive.keyword()),
            Type::Named { name, arguments } => {
                write!(f, "{}", name)?;
                if !arguments.is_empty() {
                    write!(f, "<")?;
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", argument)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            Type::Array(element) => write!(f, "{}[]", element),
        }
    }
}

/// Renders the tree as an s-expression, e.g. `(= a (? b c (= d e)))`.
/// Parentheses written in the source show up as `(paren …)`.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Name { name, .. } => write!(f, "{}", name),
            Expression::Literal { literal, .. } => write!(f, "{}", literal.text),
            Expression::Parenthesized { inner, .. } => write!(f, "(paren {})", inner),
            Expression::Assignment {
                op, target, value, ..
            } => write!(f, "({} {} {})", op.symbol(), target, value),
            Expression::Ternary {
                condition,
                then_expr,
                else_expr,
                ..
            } => write!(f, "(? {} {} {})", condition, then_expr, else_expr),
            Expression::Binary {
                op, left, right, ..
            } => write!(f, "({} {} {})", op.symbol(), left, right),
            Expression::Unary { op, operand, .. } => write!(f, "({} {})", op.symbol(), operand),
            Expression::Cast {
                target_type,
                operand,
                ..
            } => write!(f, "(cast {} {})", target_type, operand),
            Expression::PostfixIncDec { op, operand, .. } => {
                write!(f, "(post{} {})", op.symbol(), operand)
            }
            Expression::Index { target, index, .. } => write!(f, "(index {} {})", target, index),
            Expression::Invoke {
                callee, arguments, ..
            } => {
                write!(f, "(call {}", callee)?;
                for argument in arguments {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Compound { statements, .. } => {
                write!(f, "{{")?;
                for statement in statements {
                    write!(f, " {}", statement)?;
                }
                write!(f, " }}")
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                write!(f, "(if {} {}", condition, then_branch)?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else {}", else_branch)?;
                }
                write!(f, ")")
            }
            Statement::Switch {
                selector, cases, ..
            } => {
                write!(f, "(switch {}", selector)?;
                for case in cases {
                    match &case.label {
                        CaseLabel::Case(value) => write!(f, " (case {}", value)?,
                        CaseLabel::Default => write!(f, " (default")?,
                    }
                    for statement in &case.statements {
                        write!(f, " {}", statement)?;
                    }
                    write!(f, ")")?;
                }
                write!(f, ")")
            }
            Statement::Declaration {
                var_type,
                name,
                init,
                ..
            } => match init {
                Some(init) => write!(f, "(decl {} {} {})", var_type, name, init),
                None => write!(f, "(decl {} {})", var_type, name),
            },
            Statement::Expression { expr, .. } => write!(f, "{};", expr),
            Statement::Break { .. } => write!(f, "break;"),
        }
    }
}
