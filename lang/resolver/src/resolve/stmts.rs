use minnow_ast::{
    AssignStmt, CallStmt, IfElseStmt, IfStmt, PostDecStmt, PostIncStmt, ReadStmt, ReturnStmt,
    Stmt, WhileStmt, WriteStmt,
};

use super::Resolve;
use crate::ctx::Ctx;
use crate::result::ResolveResult;

impl Resolve for Stmt {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        match self {
            Stmt::Assign(stmt) => stmt.resolve(ctx),
            Stmt::PostInc(stmt) => stmt.resolve(ctx),
            Stmt::PostDec(stmt) => stmt.resolve(ctx),
            Stmt::Read(stmt) => stmt.resolve(ctx),
            Stmt::Write(stmt) => stmt.resolve(ctx),
            Stmt::If(stmt) => stmt.resolve(ctx),
            Stmt::IfElse(stmt) => stmt.resolve(ctx),
            Stmt::While(stmt) => stmt.resolve(ctx),
            Stmt::Call(stmt) => stmt.resolve(ctx),
            Stmt::Return(stmt) => stmt.resolve(ctx),
        }
    }
}

impl Resolve for AssignStmt {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        self.assign.resolve(ctx)
    }
}

impl Resolve for PostIncStmt {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        self.exp.resolve(ctx)
    }
}

impl Resolve for PostDecStmt {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        self.exp.resolve(ctx)
    }
}

impl Resolve for ReadStmt {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        self.exp.resolve(ctx)
    }
}

impl Resolve for WriteStmt {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        self.exp.resolve(ctx)
    }
}

impl Resolve for IfStmt {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        // Condition, declarations, and statements share the block's frame.
        // The condition is resolved first, so a block-local is not yet
        // visible to it, matching source order.
        ctx.open_scope();
        self.cond.resolve(ctx)?;
        self.decls.resolve(ctx)?;
        self.stmts.resolve(ctx)?;
        ctx.close_scope()?;
        Ok(())
    }
}

impl Resolve for IfElseStmt {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        // The two branches must not share a frame: a name declared in the
        // then-branch is not visible in the else-branch.
        self.cond.resolve(ctx)?;
        ctx.open_scope();
        self.then_decls.resolve(ctx)?;
        self.then_stmts.resolve(ctx)?;
        ctx.close_scope()?;
        ctx.open_scope();
        self.else_decls.resolve(ctx)?;
        self.else_stmts.resolve(ctx)?;
        ctx.close_scope()?;
        Ok(())
    }
}

impl Resolve for WhileStmt {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        ctx.open_scope();
        self.cond.resolve(ctx)?;
        self.decls.resolve(ctx)?;
        self.stmts.resolve(ctx)?;
        ctx.close_scope()?;
        Ok(())
    }
}

impl Resolve for CallStmt {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        self.call.resolve(ctx)
    }
}

impl Resolve for ReturnStmt {
    fn resolve(&self, ctx: &mut Ctx) -> ResolveResult {
        self.exp.resolve(ctx)
    }
}
