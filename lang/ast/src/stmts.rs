use pretty::DocAllocator;

use minnow_miette_util::codespan::Span;
use minnow_printer::tokens::{CIN, COUT, DEC, ELSE, IF, INC, READ_FROM, RETURN, SEMI, WHILE, WRITE_TO};
use minnow_printer::{Alloc, Anno, Builder, Print, PrintCfg};

use crate::decls::Decl;
use crate::exp::{Assign, Call, Exp};

#[derive(Debug, Clone)]
pub enum Stmt {
    Assign(AssignStmt),
    PostInc(PostIncStmt),
    PostDec(PostDecStmt),
    Read(ReadStmt),
    Write(WriteStmt),
    If(IfStmt),
    IfElse(IfElseStmt),
    While(WhileStmt),
    Call(CallStmt),
    Return(ReturnStmt),
}

impl Print for Stmt {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Stmt::Assign(stmt) => stmt.print(cfg, alloc),
            Stmt::PostInc(stmt) => stmt.print(cfg, alloc),
            Stmt::PostDec(stmt) => stmt.print(cfg, alloc),
            Stmt::Read(stmt) => stmt.print(cfg, alloc),
            Stmt::Write(stmt) => stmt.print(cfg, alloc),
            Stmt::If(stmt) => stmt.print(cfg, alloc),
            Stmt::IfElse(stmt) => stmt.print(cfg, alloc),
            Stmt::While(stmt) => stmt.print(cfg, alloc),
            Stmt::Call(stmt) => stmt.print(cfg, alloc),
            Stmt::Return(stmt) => stmt.print(cfg, alloc),
        }
    }
}

/// An assignment statement `loc = exp;`.
#[derive(Debug, Clone)]
pub struct AssignStmt {
    pub assign: Assign,
}

impl Print for AssignStmt {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        // Statement-level assignments print without the enclosing parentheses.
        self.assign.print_parts(cfg, alloc).append(SEMI)
    }
}

#[derive(Debug, Clone)]
pub struct PostIncStmt {
    pub span: Span,
    pub exp: Exp,
}

impl Print for PostIncStmt {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.exp.print(cfg, alloc).append(INC).append(SEMI)
    }
}

#[derive(Debug, Clone)]
pub struct PostDecStmt {
    pub span: Span,
    pub exp: Exp,
}

impl Print for PostDecStmt {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.exp.print(cfg, alloc).append(DEC).append(SEMI)
    }
}

/// An input statement `cin >> loc;`.
#[derive(Debug, Clone)]
pub struct ReadStmt {
    pub span: Span,
    pub exp: Exp,
}

impl Print for ReadStmt {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc
            .text(CIN)
            .annotate(Anno::Keyword)
            .append(alloc.space())
            .append(READ_FROM)
            .append(alloc.space())
            .append(self.exp.print(cfg, alloc))
            .append(SEMI)
    }
}

/// An output statement `cout << exp;`.
#[derive(Debug, Clone)]
pub struct WriteStmt {
    pub span: Span,
    pub exp: Exp,
}

impl Print for WriteStmt {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc
            .text(COUT)
            .annotate(Anno::Keyword)
            .append(alloc.space())
            .append(WRITE_TO)
            .append(alloc.space())
            .append(self.exp.print(cfg, alloc))
            .append(SEMI)
    }
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub span: Span,
    pub cond: Exp,
    pub decls: Vec<Decl>,
    pub stmts: Vec<Stmt>,
}

impl Print for IfStmt {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc
            .text(IF)
            .annotate(Anno::Keyword)
            .append(alloc.space())
            .append("(")
            .append(self.cond.print(cfg, alloc))
            .append(")")
            .append(alloc.space())
            .append(print_block(cfg, alloc, &self.decls, &self.stmts))
    }
}

#[derive(Debug, Clone)]
pub struct IfElseStmt {
    pub span: Span,
    pub cond: Exp,
    pub then_decls: Vec<Decl>,
    pub then_stmts: Vec<Stmt>,
    pub else_decls: Vec<Decl>,
    pub else_stmts: Vec<Stmt>,
}

impl Print for IfElseStmt {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc
            .text(IF)
            .annotate(Anno::Keyword)
            .append(alloc.space())
            .append("(")
            .append(self.cond.print(cfg, alloc))
            .append(")")
            .append(alloc.space())
            .append(print_block(cfg, alloc, &self.then_decls, &self.then_stmts))
            .append(alloc.hardline())
            .append(alloc.text(ELSE).annotate(Anno::Keyword))
            .append(alloc.space())
            .append(print_block(cfg, alloc, &self.else_decls, &self.else_stmts))
    }
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub span: Span,
    pub cond: Exp,
    pub decls: Vec<Decl>,
    pub stmts: Vec<Stmt>,
}

impl Print for WhileStmt {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc
            .text(WHILE)
            .annotate(Anno::Keyword)
            .append(alloc.space())
            .append("(")
            .append(self.cond.print(cfg, alloc))
            .append(")")
            .append(alloc.space())
            .append(print_block(cfg, alloc, &self.decls, &self.stmts))
    }
}

/// A function call in statement position.
#[derive(Debug, Clone)]
pub struct CallStmt {
    pub call: Call,
}

impl Print for CallStmt {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.call.print(cfg, alloc).append(SEMI)
    }
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub span: Span,
    pub exp: Option<Exp>,
}

impl Print for ReturnStmt {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let head = alloc.text(RETURN).annotate(Anno::Keyword);
        match &self.exp {
            Some(exp) => head.append(alloc.space()).append(exp.print(cfg, alloc)).append(SEMI),
            None => head.append(SEMI),
        }
    }
}

/// Prints a braced block of declarations followed by statements.
pub(crate) fn print_block<'a>(
    cfg: &PrintCfg,
    alloc: &'a Alloc<'a>,
    decls: &'a [Decl],
    stmts: &'a [Stmt],
) -> Builder<'a> {
    if decls.is_empty() && stmts.is_empty() {
        return alloc.text("{ }");
    }
    let items = decls
        .iter()
        .map(|decl| decl.print(cfg, alloc))
        .chain(stmts.iter().map(|stmt| stmt.print(cfg, alloc)));
    let body = alloc.intersperse(items, alloc.hardline());
    alloc
        .text("{")
        .append(alloc.hardline().append(body).nest(cfg.indent))
        .append(alloc.hardline())
        .append("}")
}
