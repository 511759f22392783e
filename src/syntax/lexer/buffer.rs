use std::collections::VecDeque;

use crate::syntax::span::Location;

/// The number of consumed characters kept before the buffer drops them.
pub const MAX_BUFFER_SIZE: usize = 512;

/// The character returned past the end of the source.
pub const EOF: char = '\0';

/// A look-ahead buffer over a character source.
///
/// Characters are read from the source on demand. Consumed characters stay in
/// the buffer until `MAX_BUFFER_SIZE` of them have accumulated, then they are
/// dropped at once.
#[derive(Debug)]
pub struct CharBuffer<I> {
    source:   I,
    chars:    VecDeque<char>,
    index:    usize,
    location: Location,
}

impl<I> CharBuffer<I> where I: Iterator<Item = char>
{
    pub fn new(source: I) -> Self {
        Self::with_location(source, Location::default())
    }

    /// A buffer whose first character sits at `location`.
    pub fn with_location(source: I, location: Location) -> Self {
        Self { source,
               chars: VecDeque::new(),
               index: 0,
               location }
    }

    /// The location of the next character.
    pub const fn location(&self) -> Location {
        self.location
    }

    /// The `k`-th character ahead, starting at 1, or `EOF` past the end.
    pub fn ll(&mut self, k: usize) -> char {
        debug_assert!(k > 0);
        let wanted = self.index + k;
        while self.chars.len() < wanted {
            match self.source.next() {
                Some(c) => self.chars.push_back(c),
                None => return EOF,
            }
        }
        self.chars[wanted - 1]
    }

    /// Skips `count` characters, updating the location.
    pub fn consume(&mut self, count: usize) {
        for _ in 0..count {
            let c = self.ll(1);
            if c == EOF && self.index >= self.chars.len() {
                return;
            }
            self.location = self.location.advance(c);
            self.index += 1;
        }
        if self.index >= MAX_BUFFER_SIZE {
            self.chars.drain(..MAX_BUFFER_SIZE);
            self.index -= MAX_BUFFER_SIZE;
        }
    }

    /// Consumes the next character and returns it.
    pub fn bump(&mut self) -> char {
        let c = self.ll(1);
        self.consume(1);
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_ahead_does_not_consume() {
        let mut buffer = CharBuffer::new("abc".chars());
        assert_eq!(buffer.ll(3), 'c');
        assert_eq!(buffer.ll(1), 'a');
        assert_eq!(buffer.ll(4), EOF);
        buffer.consume(2);
        assert_eq!(buffer.ll(1), 'c');
        assert_eq!(buffer.location().offset, 2);
    }

    #[test]
    fn consuming_past_the_end_stops() {
        let mut buffer = CharBuffer::new("a".chars());
        buffer.consume(5);
        assert_eq!(buffer.location().offset, 1);
        assert_eq!(buffer.bump(), EOF);
    }

    #[test]
    fn lines_are_tracked() {
        let mut buffer = CharBuffer::new("a\nbc".chars());
        buffer.consume(3);
        let location = buffer.location();
        assert_eq!((location.line, location.column()), (2, 2));
    }

    #[test]
    fn long_sources_are_paged() {
        let text: String = (0..2000).map(|i| char::from(b'a' + u8::try_from(i % 26).unwrap()))
                                    .collect();
        let mut buffer = CharBuffer::new(text.chars());
        for expected in text.chars() {
            assert_eq!(buffer.bump(), expected);
        }
        assert!(buffer.chars.len() < MAX_BUFFER_SIZE + 1);
        assert_eq!(buffer.location().offset, 2000);
    }
}
