use pretty::DocAllocator;

use minnow_miette_util::codespan::Span;
use minnow_printer::tokens::{SEMI, STRUCT};
use minnow_printer::{Alloc, Anno, Builder, Print, PrintCfg, print_comma_separated};

use crate::ident::Ident;
use crate::stmts::{Stmt, print_block};
use crate::sym::TypeName;
use crate::traits::HasSpan;

/// A whole program.
#[derive(Debug, Clone)]
pub struct Module {
    pub decls: Vec<Decl>,
}

impl Print for Module {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let sep = alloc.hardline();
        alloc.intersperse(self.decls.iter().map(|decl| decl.print(cfg, alloc)), sep)
    }
}

#[derive(Debug, Clone)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
    Struct(StructDecl),
}

impl Print for Decl {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Decl::Var(decl) => decl.print(cfg, alloc),
            Decl::Fn(decl) => decl.print(cfg, alloc),
            Decl::Struct(decl) => decl.print(cfg, alloc),
        }
    }
}

impl HasSpan for Decl {
    fn span(&self) -> Span {
        match self {
            Decl::Var(decl) => decl.span,
            Decl::Fn(decl) => decl.span,
            Decl::Struct(decl) => decl.span,
        }
    }
}

/// A variable declaration `typ name;`, at top level, inside a function, or as
/// a struct field.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub span: Span,
    pub typ: Typ,
    pub name: Ident,
}

impl Print for VarDecl {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.typ
            .print(cfg, alloc)
            .append(alloc.space())
            .append(self.name.print(cfg, alloc))
            .append(SEMI)
    }
}

#[derive(Debug, Clone)]
pub struct FnDecl {
    pub span: Span,
    pub ret_typ: Typ,
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: FnBody,
}

impl Print for FnDecl {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.ret_typ
            .print(cfg, alloc)
            .append(alloc.space())
            .append(self.name.print(cfg, alloc))
            .append("(")
            .append(print_comma_separated(&self.params, cfg, alloc))
            .append(")")
            .append(alloc.space())
            .append(self.body.print(cfg, alloc))
    }
}

/// A formal parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub span: Span,
    pub typ: Typ,
    pub name: Ident,
}

impl Print for Param {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.typ.print(cfg, alloc).append(alloc.space()).append(self.name.print(cfg, alloc))
    }
}

/// A function body: local declarations first, then statements.
#[derive(Debug, Clone)]
pub struct FnBody {
    pub decls: Vec<Decl>,
    pub stmts: Vec<Stmt>,
}

impl Print for FnBody {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        print_block(cfg, alloc, &self.decls, &self.stmts)
    }
}

/// A struct declaration `struct Name { fields };`. The surface grammar only
/// admits variable declarations inside a struct body.
#[derive(Debug, Clone)]
pub struct StructDecl {
    pub span: Span,
    pub name: Ident,
    pub fields: Vec<VarDecl>,
}

impl Print for StructDecl {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let head = alloc
            .text(STRUCT)
            .annotate(Anno::Keyword)
            .append(alloc.space())
            .append(self.name.print(cfg, alloc))
            .append(alloc.space());
        let fields = alloc
            .intersperse(self.fields.iter().map(|field| field.print(cfg, alloc)), alloc.hardline());
        head.append(
            alloc
                .text("{")
                .append(alloc.hardline().append(fields).nest(cfg.indent))
                .append(alloc.hardline())
                .append("}"),
        )
        .append(SEMI)
    }
}

/// A written type.
#[derive(Debug, Clone)]
pub enum Typ {
    Int { span: Span },
    Bool { span: Span },
    Void { span: Span },
    Struct { span: Span, name: Ident },
}

impl Typ {
    /// The name of this type, as recorded in function signatures.
    pub fn type_name(&self) -> TypeName {
        match self {
            Typ::Int { .. } => TypeName::Int,
            Typ::Bool { .. } => TypeName::Bool,
            Typ::Void { .. } => TypeName::Void,
            Typ::Struct { name, .. } => TypeName::Struct(name.id.clone()),
        }
    }
}

impl HasSpan for Typ {
    fn span(&self) -> Span {
        match self {
            Typ::Int { span } => *span,
            Typ::Bool { span } => *span,
            Typ::Void { span } => *span,
            Typ::Struct { span, .. } => *span,
        }
    }
}

impl Print for Typ {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        use minnow_printer::tokens::{BOOL, INT, VOID};
        match self {
            Typ::Int { .. } => alloc.text(INT).annotate(Anno::Type),
            Typ::Bool { .. } => alloc.text(BOOL).annotate(Anno::Type),
            Typ::Void { .. } => alloc.text(VOID).annotate(Anno::Type),
            Typ::Struct { name, .. } => alloc
                .text(STRUCT)
                .annotate(Anno::Type)
                .append(alloc.space())
                .append(name.print(cfg, alloc)),
        }
    }
}

#[cfg(test)]
mod print_decl_tests {
    use minnow_printer::PrintToString;

    use super::*;

    fn int(name: &str) -> VarDecl {
        VarDecl {
            span: Span::default(),
            typ: Typ::Int { span: Span::default() },
            name: Ident::from_string(name),
        }
    }

    #[test]
    fn print_var_decl() {
        assert_eq!(int("x").print_to_string(None), "int x;")
    }

    #[test]
    fn print_struct_decl() {
        let decl = StructDecl {
            span: Span::default(),
            name: Ident::from_string("Point"),
            fields: vec![int("x"), int("y")],
        };
        assert_eq!(decl.print_to_string(None), "struct Point {\n    int x;\n    int y;\n};")
    }

    #[test]
    fn print_empty_fn_decl() {
        let decl = FnDecl {
            span: Span::default(),
            ret_typ: Typ::Void { span: Span::default() },
            name: Ident::from_string("main"),
            params: vec![],
            body: FnBody { decls: vec![], stmts: vec![] },
        };
        assert_eq!(decl.print_to_string(None), "void main() { }")
    }

    #[test]
    fn print_struct_typed_var_decl() {
        let decl = VarDecl {
            span: Span::default(),
            typ: Typ::Struct { span: Span::default(), name: Ident::from_string("Point") },
            name: Ident::from_string("p"),
        };
        assert_eq!(decl.print_to_string(None), "struct Point p;")
    }
}
