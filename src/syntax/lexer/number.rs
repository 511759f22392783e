use num_bigint::BigInt;
use num_traits::Num;

use crate::{
    runtime::{bigdecimal::BigDecimal, complex::ComplexNumber, value::Value},
    syntax::{
        lexer::Lexer,
        token::{Token, TokenKind, TokenValue},
    },
};

/// Parses a float literal, saturating instead of overflowing.
fn parse_float(text: &str) -> f64 {
    let value = text.parse::<f64>().unwrap_or(f64::MAX);
    if value.is_infinite() { f64::MAX } else { value }
}

impl<I> Lexer<I> where I: Iterator<Item = char>
{
    fn literal(&self, kind: TokenKind, value: Value) -> Token {
        self.make(kind, TokenValue::Literal(value))
    }

    /// Appends a run of digits, with single underscores between digits.
    ///
    /// # Returns
    /// Whether at least one digit was read.
    fn read_digits(&mut self, text: &mut String) -> bool {
        let mut found = false;
        loop {
            match (self.buffer.ll(1), self.buffer.ll(2)) {
                (c, _) if c.is_ascii_digit() => {
                    text.push(c);
                    self.buffer.consume(1);
                    found = true;
                },
                ('_', c) if found && c.is_ascii_digit() => self.buffer.consume(1),
                _ => return found,
            }
        }
    }

    /// A decimal number, from its first digit or from a leading `.`.
    pub(super) fn number(&mut self) -> Token {
        let mut text = String::new();
        let mut real = false;
        self.read_digits(&mut text);
        if self.buffer.ll(1) == '.' && self.buffer.ll(2).is_ascii_digit() {
            self.buffer.consume(1);
            if text.is_empty() {
                text.push('0');
            }
            text.push('.');
            self.read_digits(&mut text);
            real = true;
        }
        if matches!(self.buffer.ll(1), 'e' | 'E') {
            let sign = self.buffer.ll(2);
            let signed = sign == '+' || sign == '-';
            text.push('e');
            self.buffer.consume(1);
            if signed {
                text.push(sign);
                self.buffer.consume(1);
            }
            if !self.read_digits(&mut text) {
                return self.unknown(text);
            }
            real = true;
        }
        if real { self.real_suffix(&text) } else { self.integer_suffix(&text) }
    }

    fn real_suffix(&mut self, text: &str) -> Token {
        match self.buffer.ll(1) {
            'd' | 'D' => {
                self.buffer.consume(1);
                self.decimal(text)
            },
            'i' | 'I' => {
                self.buffer.consume(1);
                self.literal(TokenKind::Complex,
                             Value::Complex(ComplexNumber::new(0.0, parse_float(text))))
            },
            c => {
                if c == 'f' || c == 'F' {
                    self.buffer.consume(1);
                }
                self.literal(TokenKind::Float, Value::Float(parse_float(text)))
            },
        }
    }

    fn integer_suffix(&mut self, text: &str) -> Token {
        match self.buffer.ll(1) {
            'l' | 'L' => {
                self.buffer.consume(1);
                match text.parse::<BigInt>() {
                    Ok(value) => self.literal(TokenKind::Long, Value::Long(value)),
                    Err(_) => self.unknown(text),
                }
            },
            'f' | 'F' | 'd' | 'D' | 'i' | 'I' => self.real_suffix(text),
            _ => self.integer(text, 10),
        }
    }

    /// An integer when the digits fit 32 bits, a long integer otherwise.
    fn integer(&self, digits: &str, radix: u32) -> Token {
        match i32::from_str_radix(digits, radix) {
            Ok(value) => self.literal(TokenKind::Integer, Value::Integer(value)),
            Err(_) => match BigInt::from_str_radix(digits, radix) {
                Ok(value) => self.literal(TokenKind::Long, Value::Long(value)),
                Err(_) => self.unknown(digits),
            },
        }
    }

    fn decimal(&self, text: &str) -> Token {
        match text.parse::<BigDecimal>() {
            Ok(value) => self.literal(TokenKind::Decimal, Value::Decimal(value)),
            Err(_) => self.unknown(text),
        }
    }

    /// A number starting with `0`: the zero shortcuts `0l`, `0f`, `0d` and
    /// `0i`, hexadecimal numbers, or an ordinary number.
    pub(super) fn zero(&mut self) -> Token {
        let next = self.buffer.ll(2);
        let value = match next {
            'l' | 'L' => (TokenKind::Long, Value::Long(BigInt::from(0))),
            'f' | 'F' => (TokenKind::Float, Value::Float(0.0)),
            'd' | 'D' => (TokenKind::Decimal, Value::Decimal(BigDecimal::zero())),
            'i' | 'I' => (TokenKind::Complex, Value::Complex(ComplexNumber::new(0.0, 0.0))),
            'x' | 'X' => return self.hex_number(),
            '.' if self.buffer.ll(3).is_ascii_digit() => return self.number(),
            '_' | 'e' | 'E' => return self.number(),
            c if c.is_ascii_digit() => return self.number(),
            _ => {
                self.buffer.consume(1);
                return self.literal(TokenKind::Integer, Value::Integer(0));
            },
        };
        self.buffer.consume(2);
        self.literal(value.0, value.1)
    }

    /// `0x` followed by hexadecimal digits and an optional `l` suffix.
    fn hex_number(&mut self) -> Token {
        let prefix = format!("0{}", self.buffer.ll(2));
        self.buffer.consume(2);
        let mut digits = String::new();
        while self.buffer.ll(1).is_ascii_hexdigit() {
            digits.push(self.buffer.bump());
        }
        if digits.is_empty() {
            return self.unknown(prefix);
        }
        if matches!(self.buffer.ll(1), 'l' | 'L') {
            self.buffer.consume(1);
            return match BigInt::from_str_radix(&digits, 16) {
                Ok(value) => self.literal(TokenKind::Long, Value::Long(value)),
                Err(_) => self.unknown(prefix + &digits),
            };
        }
        self.integer(&digits, 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(source: &str) -> Token {
        Lexer::new(source.chars()).next_token()
    }

    fn value(source: &str) -> Value {
        first(source).literal().cloned().unwrap()
    }

    #[test]
    fn integers_widen_on_overflow() {
        assert_eq!(value("1_000"), Value::Integer(1000));
        assert_eq!(first("2147483648").kind, TokenKind::Long);
        assert_eq!(first("10l").kind, TokenKind::Long);
    }

    #[test]
    fn reals_and_suffixes() {
        assert_eq!(value(".5"), Value::Float(0.5));
        assert_eq!(value("2.75f"), Value::Float(2.75));
        assert_eq!(value("2.5d"), Value::Decimal("2.5".parse().unwrap()));
        assert_eq!(value("1e3"), Value::Float(1000.0));
        assert_eq!(value("2i"), Value::Complex(ComplexNumber::new(0.0, 2.0)));
        assert_eq!(value("1e999"), Value::Float(f64::MAX));
    }

    #[test]
    fn malformed_exponents_are_unknown() {
        let token = first("1e+x");
        assert_eq!(token.kind, TokenKind::Unknown);
        assert_eq!(token.text(), "1e+");
    }

    #[test]
    fn zero_forms() {
        assert_eq!(first("0l").kind, TokenKind::Long);
        assert_eq!(first("0d").kind, TokenKind::Decimal);
        assert_eq!(value("0"), Value::Integer(0));
        assert_eq!(value("0.25"), Value::Float(0.25));
        assert_eq!(value("007"), Value::Integer(7));
    }

    #[test]
    fn hex_numbers() {
        assert_eq!(value("0x1F"), Value::Integer(31));
        assert_eq!(first("0xFFFFFFFF").kind, TokenKind::Long);
        assert_eq!(first("0x10L").kind, TokenKind::Long);
        let token = first("0xg");
        assert_eq!((token.kind, token.text()), (TokenKind::Unknown, "0x".to_string()));
    }

    #[test]
    fn ranges_are_not_fractions() {
        let mut lexer = Lexer::new("1..10".chars());
        assert_eq!(lexer.next_token().kind, TokenKind::Integer);
        assert_eq!(lexer.next_token().kind, TokenKind::DoubleDot);
        assert_eq!(lexer.next_token().kind, TokenKind::Integer);
    }
}
