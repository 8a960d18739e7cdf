use pretty::DocAllocator;

use minnow_miette_util::codespan::Span;
use minnow_printer::tokens::{ASSIGN, DOT, FALSE, TRUE};
use minnow_printer::{Alloc, Anno, Builder, Print, PrintCfg, print_comma_separated};

use crate::ident::Ident;
use crate::traits::HasSpan;

#[derive(Debug, Clone)]
pub enum Exp {
    IntLit(IntLit),
    StrLit(StrLit),
    BoolLit(BoolLit),
    Var(Var),
    DotAccess(DotAccess),
    Assign(Assign),
    Call(Call),
    UnOp(UnOp),
    BinOp(BinOp),
}

impl Print for Exp {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Exp::IntLit(e) => e.print(cfg, alloc),
            Exp::StrLit(e) => e.print(cfg, alloc),
            Exp::BoolLit(e) => e.print(cfg, alloc),
            Exp::Var(e) => e.print(cfg, alloc),
            Exp::DotAccess(e) => e.print(cfg, alloc),
            Exp::Assign(e) => e.print(cfg, alloc),
            Exp::Call(e) => e.print(cfg, alloc),
            Exp::UnOp(e) => e.print(cfg, alloc),
            Exp::BinOp(e) => e.print(cfg, alloc),
        }
    }
}

impl HasSpan for Exp {
    fn span(&self) -> Span {
        match self {
            Exp::IntLit(e) => e.span,
            Exp::StrLit(e) => e.span,
            Exp::BoolLit(e) => e.span,
            Exp::Var(e) => e.name.span,
            Exp::DotAccess(e) => e.span,
            Exp::Assign(e) => e.span,
            Exp::Call(e) => e.span,
            Exp::UnOp(e) => e.span,
            Exp::BinOp(e) => e.span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntLit {
    pub span: Span,
    pub value: i64,
}

impl Print for IntLit {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.text(self.value.to_string()).annotate(Anno::Literal)
    }
}

/// A string literal. The value is stored as written, without the enclosing
/// quotes and with escape sequences intact.
#[derive(Debug, Clone)]
pub struct StrLit {
    pub span: Span,
    pub value: String,
}

impl Print for StrLit {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.text(format!("\"{}\"", self.value)).annotate(Anno::Literal)
    }
}

#[derive(Debug, Clone)]
pub struct BoolLit {
    pub span: Span,
    pub value: bool,
}

impl Print for BoolLit {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.text(if self.value { TRUE } else { FALSE }).annotate(Anno::Literal)
    }
}

/// A use of a declared name.
#[derive(Debug, Clone)]
pub struct Var {
    pub name: Ident,
}

impl Print for Var {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.name.print(cfg, alloc)
    }
}

/// A struct member access `base.field`. The base is either an identifier or
/// another dot-access; chains of arbitrary depth associate to the left.
#[derive(Debug, Clone)]
pub struct DotAccess {
    pub span: Span,
    pub base: Box<Exp>,
    pub field: Ident,
}

impl Print for DotAccess {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.base.print(cfg, alloc).append(DOT).append(self.field.print(cfg, alloc))
    }
}

/// An assignment in expression position.
#[derive(Debug, Clone)]
pub struct Assign {
    pub span: Span,
    pub lhs: Box<Exp>,
    pub rhs: Box<Exp>,
}

impl Assign {
    /// Prints `lhs = rhs` without the enclosing parentheses, for statement
    /// positions.
    pub fn print_parts<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.lhs
            .print(cfg, alloc)
            .append(alloc.space())
            .append(ASSIGN)
            .append(alloc.space())
            .append(self.rhs.print(cfg, alloc))
    }
}

impl Print for Assign {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.print_parts(cfg, alloc).parens()
    }
}

/// A function call `name(args)`.
#[derive(Debug, Clone)]
pub struct Call {
    pub span: Span,
    pub name: Ident,
    pub args: Vec<Exp>,
}

impl Print for Call {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.name
            .print(cfg, alloc)
            .append("(")
            .append(print_comma_separated(&self.args, cfg, alloc))
            .append(")")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOpKind {
    Minus,
    Not,
}

impl UnOpKind {
    pub fn token(self) -> &'static str {
        match self {
            UnOpKind::Minus => "-",
            UnOpKind::Not => "!",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnOp {
    pub span: Span,
    pub op: UnOpKind,
    pub exp: Box<Exp>,
}

impl Print for UnOp {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.text(self.op.token()).append(self.exp.print(cfg, alloc)).parens()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Plus,
    Minus,
    Times,
    Divide,
    And,
    Or,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl BinOpKind {
    pub fn token(self) -> &'static str {
        match self {
            BinOpKind::Plus => "+",
            BinOpKind::Minus => "-",
            BinOpKind::Times => "*",
            BinOpKind::Divide => "/",
            BinOpKind::And => "&&",
            BinOpKind::Or => "||",
            BinOpKind::Eq => "==",
            BinOpKind::NotEq => "!=",
            BinOpKind::Lt => "<",
            BinOpKind::Gt => ">",
            BinOpKind::LtEq => "<=",
            BinOpKind::GtEq => ">=",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinOp {
    pub span: Span,
    pub op: BinOpKind,
    pub lhs: Box<Exp>,
    pub rhs: Box<Exp>,
}

impl Print for BinOp {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.lhs
            .print(cfg, alloc)
            .append(alloc.space())
            .append(self.op.token())
            .append(alloc.space())
            .append(self.rhs.print(cfg, alloc))
            .parens()
    }
}
