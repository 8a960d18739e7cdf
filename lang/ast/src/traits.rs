use minnow_miette_util::codespan::Span;

/// Every node of the syntax tree carries the source region it was parsed from.
pub trait HasSpan {
    fn span(&self) -> Span;
}

impl<T: HasSpan> HasSpan for Box<T> {
    fn span(&self) -> Span {
        T::span(self)
    }
}
