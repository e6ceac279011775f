//! Numeric literal lexing.
//!
//! Lexical form: `[+|-] ( 0x HEX+ | 0c OCTAL+ | 0b BINARY+ | INT [. INT] [[eE][+|-] INT] )`.
//! A fractional part or exponent produces a float; everything else,
//! including hex/octal/binary, produces an integer (widened to
//! arbitrary precision when it overflows `i64`).

use num_bigint::BigInt;

use crate::token::{SubType, Token, TokenKind, TokenValue};
use crate::unicode::{is_digit, is_digit_in_base};
use crate::Lexer;
use io_util::LexError;

impl<'a> Lexer<'a> {
    /// Attempts to lex a number starting at the cursor's current position.
    /// Returns `Ok(None)` without consuming input when the characters that
    /// triggered this attempt (a bare sign, or a malformed base prefix
    /// with no sign) do not actually form a number. The dispatcher then
    /// falls through to open-string lexing.
    pub(crate) fn try_lex_number(&mut self) -> Result<Option<Token>, LexError> {
        let start_pos = self.token_start;

        if matches!(self.cursor.current_char(), '+' | '-') {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '0' && matches!(self.cursor.peek_char(1).to_ascii_lowercase(), 'x' | 'c' | 'b')
        {
            return self.lex_based_integer(start_pos).map(Some);
        }

        if !is_digit(self.cursor.current_char()) {
            // Bare sign with no following digit: not a number at all.
            self.cursor.seek(start_pos);
            return Ok(None);
        }

        while is_digit(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let mut is_float = false;
        if self.cursor.current_char() == '.' && is_digit(self.cursor.peek_char(1)) {
            is_float = true;
            self.cursor.advance();
            while is_digit(self.cursor.current_char()) {
                self.cursor.advance();
            }
        }
        if matches!(self.cursor.current_char(), 'e' | 'E') {
            is_float = true;
            self.cursor.advance();
            if matches!(self.cursor.current_char(), '+' | '-') {
                self.cursor.advance();
            }
            let exp_digits_start = self.cursor.index();
            while is_digit(self.cursor.current_char()) {
                self.cursor.advance();
            }
            if self.cursor.index() == exp_digits_start {
                return Err(LexError::InvalidChar {
                    message: "no digits in float exponent".into(),
                    position: start_pos,
                });
            }
        }

        let text = self.cursor.slice_from(start_pos.index).to_string();
        if is_float {
            let value = text.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| LexError::InvalidChar {
                message: format!("invalid floating point literal '{text}'"),
                position: start_pos,
            })?;
            Ok(Some(Token::new(TokenKind::Number, None, text, TokenValue::Float(value), start_pos)))
        } else {
            let value = decimal_integer_value(&text);
            Ok(Some(Token::new(TokenKind::Number, None, text, value, start_pos)))
        }
    }

    fn lex_based_integer(&mut self, start_pos: io_util::Position) -> Result<Token, LexError> {
        let negative = self.cursor.source()[start_pos.index..self.cursor.index()].starts_with('-');
        let base_char = self.cursor.peek_char(1).to_ascii_lowercase();
        let (base, sub_type) = match base_char {
            'x' => (16, SubType::Hex),
            'c' => (8, SubType::Octal),
            'b' => (2, SubType::Binary),
            _ => unreachable!("caller already matched the base prefix"),
        };
        self.cursor.advance_n(2); // '0' and the base letter

        let digits_start = self.cursor.index();
        while self.cursor.current_char() == '_' || is_digit_in_base(self.cursor.current_char(), base) {
            self.cursor.advance();
        }
        if self.cursor.index() == digits_start {
            return Err(LexError::InvalidChar {
                message: format!("no digits after base-{base} prefix"),
                position: start_pos,
            });
        }

        let digits = self.cursor.slice_from(digits_start).replace('_', "");
        let signed_digits = if negative { format!("-{digits}") } else { digits };
        let value = based_integer_value(&signed_digits, base);
        let text = self.cursor.slice_from(start_pos.index).to_string();
        Ok(Token::new(TokenKind::Number, Some(sub_type), text, value, start_pos))
    }
}

fn decimal_integer_value(text: &str) -> TokenValue {
    based_integer_value(text, 10)
}

fn based_integer_value(signed_digits: &str, radix: u32) -> TokenValue {
    if let Ok(v) = i64::from_str_radix(signed_digits, radix) {
        TokenValue::Int(v)
    } else {
        TokenValue::BigInt(
            BigInt::parse_bytes(signed_digits.as_bytes(), radix)
                .expect("digits were already validated against the base"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_num(source: &str) -> TokenValue {
        let mut lexer = Lexer::new(source);
        lexer.next_token().unwrap().unwrap().value
    }

    #[test]
    fn decimal_integer() {
        assert_eq!(lex_num("42"), TokenValue::Int(42));
        assert_eq!(lex_num("0"), TokenValue::Int(0));
    }

    #[test]
    fn signed_decimal_integer() {
        assert_eq!(lex_num("-42"), TokenValue::Int(-42));
        assert_eq!(lex_num("+42"), TokenValue::Int(42));
    }

    #[test]
    fn hex_octal_binary_prefixes() {
        assert_eq!(lex_num("0xFF"), TokenValue::Int(0xFF));
        assert_eq!(lex_num("0c17"), TokenValue::Int(0o17));
        assert_eq!(lex_num("0b1010"), TokenValue::Int(0b1010));
    }

    #[test]
    fn underscores_separate_based_digits() {
        assert_eq!(lex_num("0xAB_CD"), TokenValue::Int(0xABCD));
    }

    #[test]
    fn float_plain_and_exponent_forms() {
        assert!(matches!(lex_num("3.14"), TokenValue::Float(f) if (f - 3.14).abs() < 1e-9));
        assert!(matches!(lex_num("1e10"), TokenValue::Float(f) if (f - 1e10).abs() < 1.0));
        assert!(matches!(lex_num("2.5e-3"), TokenValue::Float(f) if (f - 2.5e-3).abs() < 1e-9));
    }

    #[test]
    fn overflowing_decimal_widens_to_bigint() {
        let value = lex_num("99999999999999999999999999999999");
        assert!(matches!(value, TokenValue::BigInt(_)));
    }

    #[test]
    fn bare_sign_without_digit_falls_through_to_open_string() {
        let mut lexer = Lexer::new("- hello");
        let tok = lexer.next_token().unwrap().unwrap();
        assert_eq!(tok.kind, TokenKind::String);
        assert_eq!(tok.value, TokenValue::Str("- hello".into()));
    }

    #[test]
    fn missing_exponent_digits_is_an_error() {
        let mut lexer = Lexer::new("1e");
        assert!(lexer.next_token().is_err());
    }
}
