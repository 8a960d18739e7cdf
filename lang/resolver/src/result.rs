use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use minnow_ast::Ident;

/// Threads internal failures through the walk. Rule violations in the
/// analyzed program are never propagated this way; they are recorded in the
/// [Diagnostics] list and the walk continues.
pub type ResolveResult<T = ()> = Result<T, InternalError>;

/// A semantic rule violation in the analyzed program.
#[derive(Error, Diagnostic, Debug)]
pub enum ResolveError {
    #[error("Undeclared identifier {}", name.id)]
    #[diagnostic(code("R-001"))]
    UndeclaredIdent {
        name: Ident,
        #[label]
        span: SourceSpan,
    },
    #[error("Multiply declared identifier {}", name.id)]
    #[diagnostic(code("R-002"))]
    MultiplyDeclared {
        name: Ident,
        #[label]
        span: SourceSpan,
    },
    #[error("Non-function {} declared void", name.id)]
    #[diagnostic(code("R-003"))]
    DeclaredVoid {
        name: Ident,
        #[label]
        span: SourceSpan,
    },
    #[error("Invalid name of struct type {}", name.id)]
    #[diagnostic(code("R-004"))]
    InvalidStructType {
        name: Ident,
        #[label]
        span: SourceSpan,
    },
    #[error("Dot-access of non-struct type")]
    #[diagnostic(code("R-005"))]
    DotAccessOfNonStruct {
        #[label]
        span: SourceSpan,
    },
    #[error("Invalid struct field name {}", name.id)]
    #[diagnostic(code("R-006"))]
    InvalidStructField {
        name: Ident,
        #[label]
        span: SourceSpan,
    },
}

impl ResolveError {
    /// The source position the diagnostic points at.
    pub fn span(&self) -> &SourceSpan {
        match self {
            ResolveError::UndeclaredIdent { span, .. } => span,
            ResolveError::MultiplyDeclared { span, .. } => span,
            ResolveError::DeclaredVoid { span, .. } => span,
            ResolveError::InvalidStructType { span, .. } => span,
            ResolveError::DotAccessOfNonStruct { span } => span,
            ResolveError::InvalidStructField { span, .. } => span,
        }
    }
}

/// A violated invariant of the resolver itself. These are bugs in the
/// engine, not problems with the analyzed program, and they are the only
/// condition that aborts a pass.
#[derive(Error, Diagnostic, Debug)]
pub enum InternalError {
    #[error("A scope was closed while none was open")]
    #[diagnostic(code("R-X01"))]
    ScopeStackUnderflow,
    #[error("An unexpected internal error occurred: {message}")]
    #[diagnostic(code("R-XXX"))]
    /// This error should not occur.
    /// Some internal invariant has been violated.
    Impossible { message: String },
}

/// Append-only, ordered list of the diagnostics of one pass. The walk visits
/// the tree in source order, so diagnostics come out in source order too.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<ResolveError>,
}

impl Diagnostics {
    pub fn record(&mut self, err: ResolveError) {
        self.errors.push(err);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolveError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_vec(self) -> Vec<ResolveError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a ResolveError;
    type IntoIter = std::slice::Iter<'a, ResolveError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
