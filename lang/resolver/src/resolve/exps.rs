use std::rc::Rc;

use minnow_ast::{Assign, BinOp, Call, DotAccess, Exp, HasSpan, Ident, Symbol, UnOp, Var};
use minnow_miette_util::ToMiette;

use super::Resolve;
use crate::ctx::Ctx;
use crate::result::{InternalError, ResolveError, ResolveResult};

impl Resolve for Exp {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        match self {
            Exp::IntLit(_) | Exp::StrLit(_) | Exp::BoolLit(_) => Ok(()),
            Exp::Var(e) => e.resolve(ctx),
            Exp::DotAccess(e) => e.resolve(ctx),
            Exp::Assign(e) => e.resolve(ctx),
            Exp::Call(e) => e.resolve(ctx),
            Exp::UnOp(e) => e.resolve(ctx),
            Exp::BinOp(e) => e.resolve(ctx),
        }
    }
}

/// Binds a used identifier via innermost-to-outermost lookup. Identifiers
/// that are already bound are not resolved again.
fn resolve_use(name: &Ident, ctx: &mut Ctx) {
    if name.is_bound() {
        return;
    }
    match ctx.lookup_global(&name.id) {
        Some(sym) => name.bind(&sym),
        None => ctx.report(ResolveError::UndeclaredIdent {
            name: name.clone(),
            span: name.span.to_miette(),
        }),
    }
}

impl Resolve for Var {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        resolve_use(&self.name, ctx);
        Ok(())
    }
}

impl Resolve for Assign {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        self.lhs.resolve(ctx)?;
        self.rhs.resolve(ctx)
    }
}

impl Resolve for Call {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        resolve_use(&self.name, ctx);
        self.args.resolve(ctx)
    }
}

impl Resolve for UnOp {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        self.exp.resolve(ctx)
    }
}

impl Resolve for BinOp {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        self.lhs.resolve(ctx)?;
        self.rhs.resolve(ctx)
    }
}

impl Resolve for DotAccess {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        resolve_chain(self, ctx).map(|_| ())
    }
}

/// Resolves one dot-access and returns the identifier and symbol of its
/// field position, if the chain is intact up to here.
///
/// The leftmost base resolves first. Every link is diagnosed independently:
/// a broken link records exactly one diagnostic, attributed to that link's
/// identifier, and abandons the rest of the chain without touching sibling
/// expressions.
fn resolve_chain<'a>(
    dot: &'a DotAccess,
    ctx: &mut Ctx,
) -> ResolveResult<Option<(&'a Ident, Rc<Symbol>)>> {
    let base = match &*dot.base {
        Exp::Var(var) => {
            resolve_use(&var.name, ctx);
            var.name.binding().map(|sym| (&var.name, sym))
        }
        Exp::DotAccess(inner) => resolve_chain(inner, ctx)?,
        // Unreachable through the surface grammar, which only admits
        // identifiers and dot-accesses on the left of a dot.
        base => {
            base.resolve(ctx)?;
            ctx.report(ResolveError::DotAccessOfNonStruct { span: base.span().to_miette() });
            None
        }
    };
    let Some((pos, sym)) = base else {
        return Ok(None);
    };
    let Some(decl) = sym.struct_decl() else {
        ctx.report(ResolveError::DotAccessOfNonStruct { span: pos.span.to_miette() });
        return Ok(None);
    };
    let strukt = decl.upgrade().ok_or_else(|| InternalError::Impossible {
        message: format!("struct symbol behind {} dropped while still in use", pos.id),
    })?;
    let Some(fields) = strukt.field_scope() else {
        return Err(InternalError::Impossible {
            message: format!("{} is typed as a struct but does not name one", pos.id),
        });
    };
    match fields.lookup(&dot.field.id) {
        Some(field_sym) => {
            dot.field.bind(field_sym);
            Ok(Some((&dot.field, Rc::clone(field_sym))))
        }
        None => {
            ctx.report(ResolveError::InvalidStructField {
                name: dot.field.clone(),
                span: dot.field.span.to_miette(),
            });
            Ok(None)
        }
    }
}
