use crate::ctx::Ctx;
use crate::result::ResolveResult;

mod decls;
mod exps;
mod stmts;

/// One step of the resolution walk. Implementations annotate identifier
/// nodes in place, mutate the scope stack, and record diagnostics; the
/// result only carries internal invariant violations.
pub trait Resolve {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult;
}

impl<T: Resolve> Resolve for Option<T> {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        match self {
            Some(x) => x.resolve(ctx),
            None => Ok(()),
        }
    }
}

impl<T: Resolve> Resolve for Vec<T> {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        self.iter().try_for_each(|x| x.resolve(ctx))
    }
}

impl<T: Resolve> Resolve for Box<T> {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        (**self).resolve(ctx)
    }
}
