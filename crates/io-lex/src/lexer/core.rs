//! Main dispatch loop: inspects the current character and routes to the
//! sub-lexer for the literal form it starts.

use io_util::{LexError, Position};

use crate::cursor::Cursor;
use crate::token::{SubType, Token, TokenKind, TokenValue};
use crate::unicode::{is_special_symbol, is_valid_open_string_char, is_whitespace, symbol_token_kind};

/// Tokenizes Internet Object source text.
///
/// `tokenize` is the single public entry point: it runs the cursor to
/// completion and is not restartable, matching the single-pass model the
/// format's grammar assumes.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) token_start: Position,
    pub(crate) bom_checked: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), token_start: Position::START, bom_checked: false }
    }

    /// Runs the lexer to completion, returning every token in order.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token()? {
            tokens.push(tok);
        }
        Ok(tokens)
    }

    /// Returns the next token, or `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace_and_comments();

        if self.cursor.is_at_end() {
            return Ok(None);
        }

        self.token_start = self.cursor.position();
        let c = self.cursor.current_char();

        let token = match c {
            '"' | '\'' => self.lex_regular_string(c)?,
            'r' if matches!(self.cursor.peek_char(1), '"' | '\'') => self.lex_raw_string()?,
            'b' if matches!(self.cursor.peek_char(1), '"' | '\'') => self.lex_byte_string()?,
            c if is_special_symbol(c) => {
                let kind = symbol_token_kind(c);
                let pos = self.token_start;
                self.cursor.advance();
                Token::symbol(kind, c, pos)
            }
            c if c == '-' || c == '+' || c.is_ascii_digit() => {
                if self.cursor.peek_char(0) == '-' && self.cursor.peek_char(1) == '-' && self.cursor.peek_char(2) == '-'
                {
                    let pos = self.token_start;
                    self.cursor.advance_n(3);
                    Token::new(TokenKind::SectionSep, None, "---", TokenValue::Separator, pos)
                } else if let Some(tok) = self.try_lex_number()? {
                    tok
                } else {
                    self.lex_open_string()?
                }
            }
            _ => self.lex_open_string()?,
        };

        Ok(Some(token))
    }

    /// Unquoted string / boolean-or-null shorthand.
    fn lex_open_string(&mut self) -> Result<Token, LexError> {
        let start_pos = self.token_start;
        let mut end_pos = start_pos;

        loop {
            if self.cursor.is_at_end() {
                break;
            }
            let c = self.cursor.current_char();
            if !is_valid_open_string_char(c) {
                break;
            }
            if c == '-' && self.cursor.peek_char(1) == '-' && self.cursor.peek_char(2) == '-' {
                break;
            }
            self.cursor.advance();
            if !is_whitespace(c) {
                end_pos = self.cursor.position();
            }
        }

        if end_pos.index == start_pos.index {
            return Err(LexError::InvalidChar {
                message: format!("unexpected character '{}'", self.cursor.current_char()),
                position: start_pos,
            });
        }

        self.cursor.seek(end_pos);
        let text = &self.cursor.source()[start_pos.index..end_pos.index];

        let (kind, sub_type, value) = match text {
            "T" | "true" => (TokenKind::Boolean, None, TokenValue::Bool(true)),
            "F" | "false" => (TokenKind::Boolean, None, TokenValue::Bool(false)),
            "N" | "null" => (TokenKind::Null, None, TokenValue::Null),
            _ => (TokenKind::String, Some(SubType::OpenString), TokenValue::Str(text.to_string())),
        };
        Ok(Token::new(kind, sub_type, text, value, start_pos))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
