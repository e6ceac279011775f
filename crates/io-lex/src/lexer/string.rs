//! Regular, raw, and byte string lexing.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use unicode_normalization::UnicodeNormalization;

use crate::token::{SubType, Token, TokenKind, TokenValue};
use crate::unicode::{codepoint_to_char, parse_fixed_hex_codepoint};
use crate::Lexer;
use io_util::LexError;

const HIGH_SURROGATE: std::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATE: std::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

impl<'a> Lexer<'a> {
    /// Regular, quoted string with escape processing.
    pub(crate) fn lex_regular_string(&mut self, quote: char) -> Result<Token, LexError> {
        let start_pos = self.token_start;
        self.cursor.advance(); // opening quote

        let mut content = String::new();
        let mut used_numeric_escape = false;

        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString { position: start_pos });
            }
            let c = self.cursor.current_char();
            if c == quote {
                self.cursor.advance();
                break;
            }
            if c == '\\' {
                self.cursor.advance();
                let (decoded, was_numeric) = self.parse_string_escape(start_pos)?;
                used_numeric_escape |= was_numeric;
                content.push(decoded);
            } else {
                content.push(c);
                self.cursor.advance();
            }
        }

        if used_numeric_escape {
            content = content.nfc().collect();
        }

        let text = self.cursor.slice_from(start_pos.index).to_string();
        Ok(Token::new(TokenKind::String, Some(SubType::RegularString), text, TokenValue::Str(content), start_pos))
    }

    /// `\b \f \n \r \t`, `\uXXXX` (exactly 4 hex digits), `\xXX` (exactly 2
    /// hex digits), or any other `\c` decoding to the literal `c`.
    ///
    /// Returns the decoded character and whether it came from a `\u`/`\x`
    /// numeric escape (those trigger NFC normalization of the whole
    /// string once decoding finishes).
    fn parse_string_escape(&mut self, string_start: io_util::Position) -> Result<(char, bool), LexError> {
        if self.cursor.is_at_end() {
            return Err(LexError::IncompleteEscapeSequence { position: string_start });
        }
        let c = self.cursor.current_char();
        self.cursor.advance();

        match c {
            'b' => Ok(('\u{0008}', false)),
            'f' => Ok(('\u{000C}', false)),
            'n' => Ok(('\n', false)),
            'r' => Ok(('\r', false)),
            't' => Ok(('\t', false)),
            'u' => {
                let rest = self.cursor.remaining();
                let cp = parse_fixed_hex_codepoint(rest, 4).ok_or_else(|| LexError::InvalidEscape {
                    message: "expected 4 hex digits after \\u".into(),
                    position: string_start,
                })?;
                self.cursor.advance_n(4);

                if HIGH_SURROGATE.contains(&cp) {
                    // Lone high surrogate: look for a trailing \uDC00-\uDFFF
                    // low surrogate and combine into one scalar value, the
                    // way a UTF-16-based source would (e.g. 😀 arrives as a
                    // surrogate pair and must become one grapheme after NFC).
                    if self.cursor.current_char() == '\\' && self.cursor.peek_char(1) == 'u' {
                        let after_u = &self.cursor.remaining()[2..];
                        if let Some(low) = parse_fixed_hex_codepoint(after_u, 4) {
                            if LOW_SURROGATE.contains(&low) {
                                self.cursor.advance_n(6);
                                let combined = 0x10000 + (cp - 0xD800) * 0x400 + (low - 0xDC00);
                                return codepoint_to_char(combined)
                                    .map(|ch| (ch, true))
                                    .ok_or_else(|| LexError::InvalidEscape {
                                        message: format!("invalid unicode codepoint U+{combined:04X}"),
                                        position: string_start,
                                    });
                            }
                        }
                    }
                    return Err(LexError::InvalidEscape {
                        message: format!("lone surrogate \\u{cp:04X} has no matching low surrogate"),
                        position: string_start,
                    });
                }

                codepoint_to_char(cp).map(|ch| (ch, true)).ok_or_else(|| LexError::InvalidEscape {
                    message: format!("invalid unicode codepoint U+{cp:04X}"),
                    position: string_start,
                })
            }
            'x' => {
                let rest = self.cursor.remaining();
                let cp = parse_fixed_hex_codepoint(rest, 2).ok_or_else(|| LexError::InvalidEscape {
                    message: "expected 2 hex digits after \\x".into(),
                    position: string_start,
                })?;
                self.cursor.advance_n(2);
                Ok((char::from_u32(cp).expect("byte codepoint is always a valid scalar"), true))
            }
            other => Ok((other, false)),
        }
    }

    /// Raw string: `r` + quote `q`, contents copied verbatim up to the
    /// next unescaped `q`.
    pub(crate) fn lex_raw_string(&mut self) -> Result<Token, LexError> {
        let start_pos = self.token_start;
        self.cursor.advance(); // 'r'
        let quote = self.cursor.current_char();
        self.cursor.advance();

        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString { position: start_pos });
            }
            let c = self.cursor.current_char();
            if c == '\\' && self.cursor.peek_char(1) == quote {
                content.push(c);
                content.push(quote);
                self.cursor.advance_n(2);
                continue;
            }
            if c == quote {
                self.cursor.advance();
                break;
            }
            content.push(c);
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start_pos.index).to_string();
        Ok(Token::new(TokenKind::String, Some(SubType::RawString), text, TokenValue::Str(content), start_pos))
    }

    /// Byte string: `b` + quote, contents base64-decoded into a byte
    /// sequence.
    pub(crate) fn lex_byte_string(&mut self) -> Result<Token, LexError> {
        let start_pos = self.token_start;
        self.cursor.advance(); // 'b'
        let quote = self.cursor.current_char();
        self.cursor.advance();

        let content_start = self.cursor.index();
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString { position: start_pos });
            }
            if self.cursor.current_char() == quote {
                break;
            }
            self.cursor.advance();
        }
        let encoded = self.cursor.slice_from(content_start);
        let bytes = BASE64.decode(encoded).map_err(|e| LexError::InvalidChar {
            message: format!("invalid base64 byte string: {e}"),
            position: start_pos,
        })?;
        self.cursor.advance(); // closing quote

        let text = self.cursor.slice_from(start_pos.index).to_string();
        Ok(Token::new(TokenKind::Binary, None, text, TokenValue::Bytes(bytes), start_pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenValue;

    fn lex_one(source: &str) -> Token {
        let mut lexer = Lexer::new(source);
        lexer.next_token().unwrap().unwrap()
    }

    #[test]
    fn simple_string() {
        let tok = lex_one("\"hello\"");
        assert_eq!(tok.value, TokenValue::Str("hello".into()));
        assert_eq!(tok.sub_type, Some(SubType::RegularString));
    }

    #[test]
    fn string_with_basic_escapes() {
        let tok = lex_one("\"hello\\nworld\\t!\"");
        assert_eq!(tok.value, TokenValue::Str("hello\nworld\t!".into()));
    }

    #[test]
    fn unknown_escape_falls_through_to_literal_char() {
        let tok = lex_one("\"a\\qb\"");
        assert_eq!(tok.value, TokenValue::Str("aqb".into()));
    }

    #[test]
    fn unicode_escape_is_nfc_normalized() {
        let tok = lex_one("\"\\u00e9\"");
        assert_eq!(tok.value, TokenValue::Str("é".into()));
    }

    #[test]
    fn surrogate_pair_combines_into_single_grapheme() {
        let tok = lex_one("\"\\uD83D\\uDE00\"");
        assert_eq!(tok.value, TokenValue::Str("\u{1F600}".into()));
    }

    #[test]
    fn lone_high_surrogate_is_an_error() {
        let mut lexer = Lexer::new("\"\\uD83D\"");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn hex_escape_requires_exactly_two_digits() {
        let mut lexer = Lexer::new("\"\\x4\"");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut lexer = Lexer::new("\"abc");
        assert!(matches!(lexer.next_token(), Err(LexError::UnterminatedString { .. })));
    }

    #[test]
    fn raw_string_does_not_interpret_escapes() {
        let tok = lex_one("r\"a\\nb\"");
        assert_eq!(tok.value, TokenValue::Str("a\\nb".into()));
        assert_eq!(tok.sub_type, Some(SubType::RawString));
    }

    #[test]
    fn raw_string_allows_escaped_delimiter() {
        let tok = lex_one("r\"a\\\"b\"");
        assert_eq!(tok.value, TokenValue::Str("a\\\"b".into()));
    }

    #[test]
    fn byte_string_decodes_base64() {
        let tok = lex_one("b\"aGVsbG8=\"");
        assert_eq!(tok.kind, TokenKind::Binary);
        assert_eq!(tok.value, TokenValue::Bytes(b"hello".to_vec()));
    }
}
