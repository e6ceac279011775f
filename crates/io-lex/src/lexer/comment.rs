//! Whitespace and comment skipping.
//!
//! Internet Object has exactly one comment form: `#` to end of line. There
//! is no block comment.

use crate::unicode::is_whitespace;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips whitespace and `#`-comments ahead of the next token.
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        if !self.bom_checked {
            self.bom_checked = true;
            if self.cursor.remaining().starts_with('\u{FEFF}') {
                self.cursor.advance();
            }
        }

        loop {
            if self.cursor.is_at_end() {
                return;
            }
            match self.cursor.current_char() {
                c if is_whitespace(c) => self.cursor.advance(),
                '#' => self.skip_line_comment(),
                _ => return,
            }
        }
    }

    /// Consumes a `#` comment up to and including the next newline.
    fn skip_line_comment(&mut self) {
        self.cursor.advance(); // '#'
        while !self.cursor.is_at_end() {
            let c = self.cursor.current_char();
            self.cursor.advance();
            if c == '\n' {
                break;
            }
        }
    }
}
