use std::rc::Rc;

use minnow_ast::{
    Decl, FnDecl, FnSymbol, Ident, StructDecl, StructSymbol, Symbol, Typ, VarDecl, VarSymbol,
    VarType,
};
use minnow_miette_util::ToMiette;

use super::Resolve;
use crate::ctx::Ctx;
use crate::result::{ResolveError, ResolveResult};

impl Resolve for Decl {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        match self {
            Decl::Var(decl) => decl.resolve(ctx),
            Decl::Fn(decl) => decl.resolve(ctx),
            Decl::Struct(decl) => decl.resolve(ctx),
        }
    }
}

impl Resolve for VarDecl {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        log::trace!("Resolving variable declaration: {}", self.name.id);
        declare_variable(&self.typ, &self.name, ctx)
    }
}

/// Shared by variable declarations, formal parameters, and struct fields:
/// checks the written type and declares a variable symbol in the innermost
/// scope. A rejected type records one diagnostic and declares nothing, so
/// that later uses of the name fail with their own diagnostic instead of
/// resolving to a broken symbol.
pub(super) fn declare_variable(typ: &Typ, name: &Ident, ctx: &mut Ctx) -> ResolveResult {
    let var_typ = match typ {
        Typ::Int { .. } => VarType::Int,
        Typ::Bool { .. } => VarType::Bool,
        Typ::Void { .. } => {
            ctx.report(ResolveError::DeclaredVoid {
                name: name.clone(),
                span: name.span.to_miette(),
            });
            return Ok(());
        }
        Typ::Struct { name: typ_name, .. } => match ctx.lookup_global(&typ_name.id) {
            None => {
                ctx.report(ResolveError::UndeclaredIdent {
                    name: typ_name.clone(),
                    span: typ_name.span.to_miette(),
                });
                return Ok(());
            }
            Some(sym) => match &*sym {
                Symbol::Struct(_) => {
                    typ_name.bind(&sym);
                    VarType::Struct { name: typ_name.id.clone(), decl: Rc::downgrade(&sym) }
                }
                Symbol::Var(_) | Symbol::Fn(_) => {
                    ctx.report(ResolveError::InvalidStructType {
                        name: typ_name.clone(),
                        span: typ_name.span.to_miette(),
                    });
                    return Ok(());
                }
            },
        },
    };
    ctx.declare(name, Symbol::Var(VarSymbol { typ: var_typ }))?;
    Ok(())
}

impl Resolve for FnDecl {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        log::trace!("Resolving function declaration: {}", self.name.id);
        let sym = FnSymbol {
            params: self.params.iter().map(|param| param.typ.type_name()).collect(),
            ret_typ: self.ret_typ.type_name(),
        };
        // The signature records the written parameter types verbatim; void
        // parameters are diagnosed below, when each formal is declared in
        // the function scope.
        ctx.declare(&self.name, Symbol::Fn(sym))?;
        ctx.open_scope();
        for param in &self.params {
            declare_variable(&param.typ, &param.name, ctx)?;
        }
        self.body.decls.resolve(ctx)?;
        self.body.stmts.resolve(ctx)?;
        ctx.close_scope()?;
        Ok(())
    }
}

impl Resolve for StructDecl {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        log::trace!("Resolving struct declaration: {}", self.name.id);
        // Fields live in an isolated scope that is captured as the struct's
        // field table once it is fully built. The struct's own name is not
        // yet visible inside the field list.
        ctx.open_scope();
        for field in &self.fields {
            declare_variable(&field.typ, &field.name, ctx)?;
        }
        let fields = ctx.close_scope()?;
        ctx.declare(&self.name, Symbol::Struct(StructSymbol { fields }))?;
        Ok(())
    }
}
