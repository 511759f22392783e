use std::fmt::{self, Display};

/// A position in the source text.
///
/// Offsets count characters from the start of the source. Lines start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// The number of characters before this position.
    pub offset:      usize,
    /// The offset of the first character of the line.
    pub line_offset: usize,
    pub line:        usize,
}

impl Location {
    /// The 1-based column of the position.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.offset - self.line_offset + 1
    }

    /// The position following the character `c`.
    #[must_use]
    pub const fn advance(self, c: char) -> Self {
        let offset = self.offset + 1;
        if c == '\n' {
            Self { offset,
                   line_offset: offset,
                   line: self.line + 1 }
        } else {
            Self { offset, ..self }
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self { offset:      0,
               line_offset: 0,
               line:        1, }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column())
    }
}

/// The locations bounding an element. The end is exclusive.
///
/// # Example
/// ```
/// use addyscript::syntax::span::{Location, Span};
///
/// let start = Location::default();
/// let end = start.advance('a').advance('\n');
/// let span = Span::new(start, end);
/// assert_eq!(end.line, 2);
/// assert_eq!(span.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Location,
    pub end:   Location,
}

impl Span {
    #[must_use]
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// The span from the start of `self` to the end of `other`.
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self { start: self.start,
               end:   other.end, }
    }

    /// The number of characters covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_restart_after_newlines() {
        let mut location = Location::default();
        for c in "ab\ncd".chars() {
            location = location.advance(c);
        }
        assert_eq!(location.line, 2);
        assert_eq!(location.column(), 3);
        assert_eq!(location.to_string(), "2:3");
    }

    #[test]
    fn spans_join() {
        let a = Location::default();
        let b = a.advance('x');
        let c = b.advance('y');
        let joined = Span::new(a, b).to(Span::new(b, c));
        assert_eq!(joined, Span::new(a, c));
        assert!(!joined.is_empty());
    }
}
