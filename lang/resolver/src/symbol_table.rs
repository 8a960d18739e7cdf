use std::rc::Rc;

use thiserror::Error;

use minnow_ast::{DuplicateSymbol, Scope, Symbol};

use crate::result::InternalError;

/// The scoped symbol table: a stack of scopes, innermost last.
///
/// The stack depth mirrors the call-stack depth of the traversal exactly;
/// scopes are pushed on entry to a scoping construct and popped on exit.
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

#[derive(Error, Debug)]
pub enum DeclareError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateSymbol),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl SymbolTable {
    /// Push a new empty scope.
    pub fn open_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Pop and return the innermost scope.
    ///
    /// Popping with no open scope means the caller's open/close pairing is
    /// broken; this is an engine bug, not a user-facing diagnostic.
    pub fn close_scope(&mut self) -> Result<Scope, InternalError> {
        self.scopes.pop().ok_or(InternalError::ScopeStackUnderflow)
    }

    /// Insert a binding into the innermost scope. On a duplicate name the
    /// existing symbol is left untouched.
    pub fn declare(&mut self, name: &str, sym: Rc<Symbol>) -> Result<Rc<Symbol>, DeclareError> {
        let scope = self.scopes.last_mut().ok_or(InternalError::ScopeStackUnderflow)?;
        Ok(scope.declare(name, sym)?)
    }

    /// Look `name` up in the innermost scope only.
    pub fn lookup_local(&self, name: &str) -> Option<Rc<Symbol>> {
        self.scopes.last().and_then(|scope| scope.lookup(name)).cloned()
    }

    /// Look `name` up innermost-to-outermost and return the first match.
    /// This implements lexical shadowing.
    pub fn lookup_global(&self, name: &str) -> Option<Rc<Symbol>> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name)).cloned()
    }

    /// The number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod symbol_table_tests {
    use minnow_ast::{VarSymbol, VarType};

    use super::*;

    fn int_sym() -> Rc<Symbol> {
        Rc::new(Symbol::Var(VarSymbol { typ: VarType::Int }))
    }

    fn bool_sym() -> Rc<Symbol> {
        Rc::new(Symbol::Var(VarSymbol { typ: VarType::Bool }))
    }

    #[test]
    fn close_matches_open() {
        let mut table = SymbolTable::default();
        table.open_scope();
        table.open_scope();
        assert_eq!(table.depth(), 2);
        table.close_scope().unwrap();
        table.close_scope().unwrap();
        assert_eq!(table.depth(), 0);
    }

    #[test]
    fn close_without_open_underflows() {
        let mut table = SymbolTable::default();
        let err = table.close_scope().unwrap_err();
        assert!(matches!(err, InternalError::ScopeStackUnderflow));
    }

    #[test]
    fn declare_without_open_underflows() {
        let mut table = SymbolTable::default();
        let err = table.declare("x", int_sym()).unwrap_err();
        assert!(matches!(err, DeclareError::Internal(InternalError::ScopeStackUnderflow)));
    }

    #[test]
    fn duplicate_keeps_first() {
        let mut table = SymbolTable::default();
        table.open_scope();
        let first = table.declare("x", int_sym()).unwrap();
        let err = table.declare("x", bool_sym()).unwrap_err();
        assert!(matches!(err, DeclareError::Duplicate(_)));
        assert!(Rc::ptr_eq(&table.lookup_global("x").unwrap(), &first));
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let mut table = SymbolTable::default();
        table.open_scope();
        let outer = table.declare("x", int_sym()).unwrap();
        table.open_scope();
        let inner = table.declare("x", bool_sym()).unwrap();
        assert!(Rc::ptr_eq(&table.lookup_global("x").unwrap(), &inner));
        table.close_scope().unwrap();
        assert!(Rc::ptr_eq(&table.lookup_global("x").unwrap(), &outer));
    }

    #[test]
    fn lookup_local_sees_innermost_only() {
        let mut table = SymbolTable::default();
        table.open_scope();
        table.declare("x", int_sym()).unwrap();
        table.open_scope();
        assert!(table.lookup_local("x").is_none());
        assert!(table.lookup_global("x").is_some());
    }
}
