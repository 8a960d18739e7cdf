use std::fmt;
use std::ops::{Add, Sub};

/// The raw, untyped offset.
pub type RawOffset = i64;

/// The raw, untyped index. We use a 32-bit integer here for space efficiency,
/// assuming we won't be working with sources larger than 4GB.
pub type RawIndex = u32;

/// A byte position in a source file.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteIndex(pub RawIndex);

impl ByteIndex {
    /// Convert the position into a `usize`, for use in array indexing
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ByteIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ByteIndex(")?;
        self.0.fmt(f)?;
        write!(f, ")")
    }
}

impl fmt::Display for ByteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<RawIndex> for ByteIndex {
    fn from(i: RawIndex) -> Self {
        ByteIndex(i)
    }
}

/// A byte offset in a source file
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteOffset(pub RawOffset);

impl ByteOffset {
    /// Create a byte offset from a UTF8-encoded string
    pub fn from_str_len(value: &str) -> ByteOffset {
        ByteOffset(value.len() as RawOffset)
    }

    /// Convert the offset into a `usize`, for use in array indexing
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ByteOffset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ByteOffset(")?;
        self.0.fmt(f)?;
        write!(f, ")")
    }
}

impl fmt::Display for ByteOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Add<ByteOffset> for ByteIndex {
    type Output = ByteIndex;

    fn add(self, rhs: ByteOffset) -> ByteIndex {
        ByteIndex((self.to_usize() as RawOffset + rhs.0) as RawIndex)
    }
}

impl Sub<ByteIndex> for ByteIndex {
    type Output = ByteOffset;

    fn sub(self, rhs: ByteIndex) -> ByteOffset {
        ByteOffset(self.to_usize() as RawOffset - rhs.to_usize() as RawOffset)
    }
}

/// A region of code in a source file
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    start: ByteIndex,
    end: ByteIndex,
}

impl Span {
    /// Create a new span from a starting and ending position.
    pub fn new(start: impl Into<ByteIndex>, end: impl Into<ByteIndex>) -> Span {
        let start = start.into();
        let end = end.into();

        assert!(end >= start);

        Span { start, end }
    }

    pub fn start(&self) -> ByteIndex {
        self.start
    }

    pub fn end(&self) -> ByteIndex {
        self.end
    }

    /// The line/column position of the start of this span within `source`.
    pub fn location_in(&self, source: &str) -> Location {
        self.start.location_in(source)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A 1-based line/column position in a source file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl ByteIndex {
    /// The line/column position of this index within `source`.
    ///
    /// Indices past the end of `source` are clamped to its last position.
    pub fn location_in(self, source: &str) -> Location {
        let upto = &source[..self.to_usize().min(source.len())];
        let line = upto.bytes().filter(|b| *b == b'\n').count() as u32 + 1;
        let column = match upto.rfind('\n') {
            Some(nl) => upto[nl + 1..].chars().count() as u32 + 1,
            None => upto.chars().count() as u32 + 1,
        };
        Location { line, column }
    }
}

#[cfg(test)]
mod location_tests {
    use super::*;

    #[test]
    fn start_of_source() {
        let loc = ByteIndex(0).location_in("int x;\n");
        assert_eq!(loc, Location { line: 1, column: 1 });
    }

    #[test]
    fn second_line() {
        let source = "int x;\nbool y;\n";
        let loc = ByteIndex(12).location_in(source);
        assert_eq!(loc, Location { line: 2, column: 6 });
    }

    #[test]
    fn clamped_past_end() {
        let loc = ByteIndex(100).location_in("int x;");
        assert_eq!(loc, Location { line: 1, column: 7 });
    }
}
