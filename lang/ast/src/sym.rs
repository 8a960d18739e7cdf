use std::fmt;
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::HashMap;

/// The resolved meaning of a declared name.
///
/// Symbols are created exactly once, when their declaration is processed, and
/// are owned by the scope (or, for struct fields, by the struct symbol) that
/// declared them. Identifier nodes refer back to symbols weakly.
#[derive(Debug)]
pub enum Symbol {
    Var(VarSymbol),
    Fn(FnSymbol),
    Struct(StructSymbol),
}

impl Symbol {
    /// The struct symbol backing this symbol's type, for symbols that have
    /// struct type (a variable or a struct field declared `struct T x;`).
    pub fn struct_decl(&self) -> Option<&Weak<Symbol>> {
        match self {
            Symbol::Var(var) => match &var.typ {
                VarType::Struct { decl, .. } => Some(decl),
                VarType::Int | VarType::Bool => None,
            },
            Symbol::Fn(_) | Symbol::Struct(_) => None,
        }
    }

    /// The field namespace, for struct symbols.
    pub fn field_scope(&self) -> Option<&Scope> {
        match self {
            Symbol::Struct(s) => Some(&s.fields),
            Symbol::Var(_) | Symbol::Fn(_) => None,
        }
    }
}

/// Displays the type of the symbol, e.g. `struct Point` for a variable of
/// struct type and `int,bool->void` for a function.
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Var(var) => var.typ.fmt(f),
            Symbol::Fn(fun) => {
                let params: Vec<String> = fun.params.iter().map(|p| p.to_string()).collect();
                write!(f, "{}->{}", params.join(","), fun.ret_typ)
            }
            Symbol::Struct(_) => write!(f, "struct"),
        }
    }
}

/// A declared variable or formal parameter.
#[derive(Debug)]
pub struct VarSymbol {
    pub typ: VarType,
}

/// The declared type of a variable. Void-typed variables are rejected during
/// resolution, so void does not occur here.
#[derive(Debug, Clone)]
pub enum VarType {
    Int,
    Bool,
    Struct {
        name: String,
        /// Weak reference to the declaring struct symbol, through which
        /// dot-accesses reach the field namespace. Weak, because a struct
        /// field may itself have struct type, which would otherwise create a
        /// reference cycle for self-referential structs.
        decl: Weak<Symbol>,
    },
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarType::Int => write!(f, "int"),
            VarType::Bool => write!(f, "bool"),
            VarType::Struct { name, .. } => write!(f, "struct {name}"),
        }
    }
}

/// A declared function: return type plus ordered parameter types.
#[derive(Debug, Clone)]
pub struct FnSymbol {
    pub params: Vec<TypeName>,
    pub ret_typ: TypeName,
}

/// The name of a written type, as recorded in function signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Bool,
    Void,
    Struct(String),
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Int => write!(f, "int"),
            TypeName::Bool => write!(f, "bool"),
            TypeName::Void => write!(f, "void"),
            TypeName::Struct(name) => write!(f, "struct {name}"),
        }
    }
}

/// A declared struct: the owner of its field namespace.
#[derive(Debug)]
pub struct StructSymbol {
    /// Built once when the struct declaration is processed, never mutated
    /// afterwards.
    pub fields: Scope,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{name} is already declared in this scope")]
pub struct DuplicateSymbol {
    pub name: String,
}

/// One frame of name to symbol bindings. Names are unique within a frame.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, Rc<Symbol>>,
}

impl Scope {
    /// Insert a binding. If the name is already bound in this frame, the
    /// existing symbol is left untouched and the insertion is rejected.
    pub fn declare(
        &mut self,
        name: &str,
        sym: Rc<Symbol>,
    ) -> Result<Rc<Symbol>, DuplicateSymbol> {
        use std::collections::hash_map::Entry;
        match self.bindings.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(DuplicateSymbol { name: name.to_owned() }),
            Entry::Vacant(entry) => {
                entry.insert(Rc::clone(&sym));
                Ok(sym)
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Rc<Symbol>> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Rc<Symbol>)> {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod scope_tests {
    use super::*;

    #[test]
    fn declare_and_lookup() {
        let mut scope = Scope::default();
        let sym = Rc::new(Symbol::Var(VarSymbol { typ: VarType::Int }));
        scope.declare("x", Rc::clone(&sym)).unwrap();
        assert!(Rc::ptr_eq(scope.lookup("x").unwrap(), &sym));
        assert!(scope.lookup("y").is_none());
    }

    #[test]
    fn duplicate_keeps_first() {
        let mut scope = Scope::default();
        let first = Rc::new(Symbol::Var(VarSymbol { typ: VarType::Int }));
        let second = Rc::new(Symbol::Var(VarSymbol { typ: VarType::Bool }));
        scope.declare("x", Rc::clone(&first)).unwrap();
        let err = scope.declare("x", second).unwrap_err();
        assert_eq!(err, DuplicateSymbol { name: "x".to_owned() });
        assert!(Rc::ptr_eq(scope.lookup("x").unwrap(), &first));
    }

    #[test]
    fn display_function_type() {
        let sym = Symbol::Fn(FnSymbol {
            params: vec![TypeName::Int, TypeName::Bool],
            ret_typ: TypeName::Void,
        });
        assert_eq!(sym.to_string(), "int,bool->void");
    }
}
