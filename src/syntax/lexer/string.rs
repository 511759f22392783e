use crate::{
    runtime::value::{Value, coercion::parse_date},
    syntax::{
        lexer::{Lexer, buffer::EOF, is_identifier_start},
        token::{Token, TokenKind, TokenValue},
    },
};

/// The character of a single character escape such as `\n`.
const fn simple_escape(c: char) -> Option<char> {
    Some(match c {
        '\\' => '\\',
        '\'' => '\'',
        '"' => '"',
        '0' => '\0',
        'a' => '\u{7}',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{b}',
        _ => return None,
    })
}

impl<I> Lexer<I> where I: Iterator<Item = char>
{
    /// Decodes the escape sequence starting at the backslash under the cursor.
    ///
    /// `\x` takes two hexadecimal digits and `\u` four. A malformed numeric
    /// escape yields the backslash and the letter. An unknown escape yields
    /// the backslash alone and leaves the next character in place.
    pub(super) fn escape_sequence(&mut self, text: &mut String) {
        let letter = self.buffer.ll(2);
        if let Some(c) = simple_escape(letter) {
            text.push(c);
            self.buffer.consume(2);
            return;
        }
        let width = match letter {
            'x' | 'X' => 2,
            'u' | 'U' => 4,
            _ => {
                text.push('\\');
                self.buffer.consume(1);
                return;
            },
        };
        let digits: String = (3..3 + width).map(|k| self.buffer.ll(k)).collect();
        let decoded = digits.chars()
                            .all(|c| c.is_ascii_hexdigit())
                            .then(|| u32::from_str_radix(&digits, 16).ok())
                            .flatten()
                            .and_then(char::from_u32);
        match decoded {
            Some(c) => {
                text.push(c);
                self.buffer.consume(2 + width);
            },
            None => {
                text.push('\\');
                text.push(letter);
                self.buffer.consume(2);
            },
        }
    }

    /// Reads a quoted string whose delimiter is under the cursor.
    ///
    /// # Returns
    /// - `Ok(text)`: The decoded text.
    /// - `Err(text)`: The delimiter and the text read so far, when the string
    ///   is not closed on the same line.
    fn read_string(&mut self) -> Result<String, String> {
        let delimiter = self.buffer.bump();
        let mut text = String::new();
        loop {
            match self.buffer.ll(1) {
                '\r' | '\n' | EOF => return Err(format!("{delimiter}{text}")),
                '\\' => self.escape_sequence(&mut text),
                c => {
                    self.buffer.consume(1);
                    if c == delimiter {
                        return Ok(text);
                    }
                    text.push(c);
                },
            }
        }
    }

    /// Reads a verbatim string, the `@` being under the cursor.
    ///
    /// Inside, a doubled delimiter stands for itself and nothing else is
    /// escaped.
    fn read_verbatim_string(&mut self) -> Result<String, String> {
        let delimiter = self.buffer.ll(2);
        if delimiter != '\'' && delimiter != '"' {
            self.buffer.consume(1);
            return Err("@".to_string());
        }
        self.buffer.consume(2);
        let mut text = String::new();
        loop {
            match self.buffer.ll(1) {
                EOF => return Err(format!("@{delimiter}{text}")),
                c if c == delimiter => {
                    if self.buffer.ll(2) == delimiter {
                        text.push(c);
                        self.buffer.consume(2);
                    } else {
                        self.buffer.consume(1);
                        return Ok(text);
                    }
                },
                c => {
                    text.push(c);
                    self.buffer.consume(1);
                },
            }
        }
    }

    fn string_token(&self, read: Result<String, String>) -> Token {
        match read {
            Ok(text) => self.make(TokenKind::String, TokenValue::Literal(Value::from(text))),
            Err(text) => self.unknown(text),
        }
    }

    pub(super) fn string_literal(&mut self) -> Token {
        let read = self.read_string();
        self.string_token(read)
    }

    pub(super) fn verbatim_string_literal(&mut self) -> Token {
        let read = self.read_verbatim_string();
        self.string_token(read)
    }

    /// `$` introduces an interpolated string, or an identifier that is never
    /// taken for a keyword.
    pub(super) fn dollar_sign(&mut self) -> Token {
        let read = match self.buffer.ll(2) {
            '\'' | '"' => {
                self.buffer.consume(1);
                self.read_string()
            },
            '@' => {
                self.buffer.consume(1);
                self.read_verbatim_string()
            },
            c if is_identifier_start(c) || c == '\\' => {
                self.buffer.consume(1);
                let name = self.identifier_text();
                return self.make(TokenKind::Identifier, TokenValue::Text(name));
            },
            _ => {
                self.buffer.consume(1);
                return self.unknown("$");
            },
        };
        match read {
            Ok(text) => self.make(TokenKind::MutableString, TokenValue::Text(text)),
            Err(text) => self.unknown(format!("${text}")),
        }
    }

    /// A date between back quotes.
    pub(super) fn date_literal(&mut self) -> Token {
        self.buffer.consume(1);
        let mut text = String::new();
        loop {
            match self.buffer.ll(1) {
                EOF => return self.unknown(format!("`{text}")),
                '`' => break,
                c => {
                    text.push(c);
                    self.buffer.consume(1);
                },
            }
        }
        self.buffer.consume(1);
        match parse_date(&text) {
            Some(date) => self.make(TokenKind::Date, TokenValue::Literal(Value::Date(date))),
            None => self.unknown(format!("`{text}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(source: &str) -> Token {
        Lexer::new(source.chars()).next_token()
    }

    fn string(source: &str) -> String {
        let token = first(source);
        assert_eq!(token.kind, TokenKind::String, "{source}");
        token.text()
    }

    #[test]
    fn escapes() {
        assert_eq!(string(r#""a\tb\\""#), "a\tb\\");
        assert_eq!(string(r"'\x41\u00e9'"), "Aé");
        assert_eq!(string(r"'\xZ1'"), "\\xZ1");
        assert_eq!(string(r"'\q'"), "\\q");
        assert_eq!(string(r#"'say \"hi\"'"#), "say \"hi\"");
    }

    #[test]
    fn verbatim_strings_double_their_delimiter() {
        assert_eq!(string(r"@'c:\temp'"), "c:\\temp");
        assert_eq!(string("@'it''s'"), "it's");
        assert_eq!(first("@x").text(), "@");
    }

    #[test]
    fn unterminated_strings_are_unknown() {
        let token = first("'abc\ndef'");
        assert_eq!((token.kind, token.text()), (TokenKind::Unknown, "'abc".to_string()));
        let token = first("@\"open");
        assert_eq!((token.kind, token.text()), (TokenKind::Unknown, "@\"open".to_string()));
    }

    #[test]
    fn dollar_forms() {
        let token = first("$'x = {x}'");
        assert_eq!((token.kind, token.text()), (TokenKind::MutableString, "x = {x}".to_string()));
        let token = first("$@'{a}\\n'");
        assert_eq!((token.kind, token.text()), (TokenKind::MutableString, "{a}\\n".to_string()));
        let token = first("$class");
        assert_eq!((token.kind, token.text()), (TokenKind::Identifier, "class".to_string()));
        assert_eq!(first("$ x").kind, TokenKind::Unknown);
    }

    #[test]
    fn dates() {
        let token = first("`2024-02-29 13:45`");
        assert_eq!(token.kind, TokenKind::Date);
        assert_eq!(token.text(), "2024-02-29 13:45:00");
        let token = first("`2023-02-29`");
        assert_eq!((token.kind, token.text()), (TokenKind::Unknown, "`2023-02-29`".to_string()));
        assert_eq!(first("`2024").text(), "`2024");
    }
}
