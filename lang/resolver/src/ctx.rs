use std::rc::Rc;

use minnow_ast::{Ident, Scope, Symbol};
use minnow_miette_util::ToMiette;

use crate::result::{Diagnostics, InternalError, ResolveError, ResolveResult};
use crate::symbol_table::{DeclareError, SymbolTable};

/// State threaded through the resolution walk: the scoped symbol table and
/// the diagnostic reporter. There is no other shared state; the context is
/// only ever touched by one traversal frame at a time.
pub struct Ctx {
    table: SymbolTable,
    pub diagnostics: Diagnostics,
}

impl Ctx {
    /// A fresh context with the global scope already open. The global scope
    /// is never closed during the walk; [Ctx::finish] hands it to the caller.
    pub fn empty() -> Self {
        let mut table = SymbolTable::default();
        table.open_scope();
        Ctx { table, diagnostics: Diagnostics::default() }
    }

    pub fn open_scope(&mut self) {
        self.table.open_scope();
    }

    pub fn close_scope(&mut self) -> ResolveResult<Scope> {
        self.table.close_scope()
    }

    /// Declare `name` in the innermost scope and bind the declaring
    /// identifier to the fresh symbol. A duplicate name is recorded as a
    /// diagnostic, the earlier declaration wins, and `None` is returned.
    pub fn declare(&mut self, name: &Ident, sym: Symbol) -> ResolveResult<Option<Rc<Symbol>>> {
        match self.table.declare(&name.id, Rc::new(sym)) {
            Ok(sym) => {
                name.bind(&sym);
                Ok(Some(sym))
            }
            Err(DeclareError::Duplicate(_)) => {
                self.report(ResolveError::MultiplyDeclared {
                    name: name.clone(),
                    span: name.span.to_miette(),
                });
                Ok(None)
            }
            Err(DeclareError::Internal(err)) => Err(err),
        }
    }

    pub fn lookup_global(&self, name: &str) -> Option<Rc<Symbol>> {
        self.table.lookup_global(name)
    }

    pub fn report(&mut self, err: ResolveError) {
        self.diagnostics.record(err);
    }

    /// The number of open scopes, including the global one.
    pub fn depth(&self) -> usize {
        self.table.depth()
    }

    /// Close the global scope and hand it to the caller together with the
    /// accumulated diagnostics. The symbols declared at top level, and every
    /// struct field table reachable from them, stay alive as long as the
    /// returned [Resolution] does.
    pub fn finish(mut self) -> ResolveResult<Resolution> {
        if self.table.depth() != 1 {
            return Err(InternalError::Impossible {
                message: format!(
                    "{} scopes open after resolution, expected only the global one",
                    self.table.depth()
                ),
            });
        }
        let globals = self.table.close_scope()?;
        Ok(Resolution { globals, diagnostics: self.diagnostics })
    }
}

/// The output of a resolution pass: the global scope (which owns the
/// top-level symbols) and the ordered diagnostics.
pub struct Resolution {
    pub globals: Scope,
    pub diagnostics: Diagnostics,
}

impl Resolution {
    /// A program is semantically valid iff the pass produced no diagnostics.
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
