use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};

use derivative::Derivative;
use pretty::DocAllocator;

use minnow_miette_util::codespan::Span;
use minnow_printer::{Alloc, Builder, Print, PrintCfg};

use crate::sym::Symbol;
use crate::traits::HasSpan;

/// An occurrence of a name in the source program.
///
/// After name resolution an identifier either carries a back-reference to the
/// symbol it was resolved to, or it is unbound, which means that resolution
/// failed for this use.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Ident {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Span,
    pub id: String,
    /// The back-reference is weak: the symbol is owned by the scope or by the
    /// struct field table in which it was declared, never by its uses.
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    sym: OnceCell<Weak<Symbol>>,
}

impl Ident {
    pub fn new(span: Span, id: &str) -> Self {
        Ident { span, id: id.to_owned(), sym: OnceCell::new() }
    }

    pub fn from_string(id: &str) -> Self {
        Ident::new(Span::default(), id)
    }

    /// Record the symbol this identifier resolves to.
    ///
    /// The first binding wins; binding an already bound identifier is a no-op.
    pub fn bind(&self, sym: &Rc<Symbol>) {
        let _ = self.sym.set(Rc::downgrade(sym));
    }

    pub fn is_bound(&self) -> bool {
        self.sym.get().is_some()
    }

    /// The symbol this identifier was resolved to, if resolution succeeded
    /// and the owning scope is still alive.
    pub fn binding(&self) -> Option<Rc<Symbol>> {
        self.sym.get().and_then(Weak::upgrade)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl HasSpan for Ident {
    fn span(&self) -> Span {
        self.span
    }
}

impl Print for Ident {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        if cfg.annotate_syms {
            if let Some(sym) = self.binding() {
                return alloc.text(&self.id).append(alloc.text(format!("({sym})")));
            }
        }
        alloc.text(&self.id)
    }
}
