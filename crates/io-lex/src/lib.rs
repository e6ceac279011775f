//! io-lex: tokenizer for Internet Object source text.
//!
//! Turns a UTF-8 buffer into the flat [`Token`] stream the AST parser
//! builds its tree from: regular/raw/byte strings, open (unquoted)
//! strings, multi-base numbers, the boolean/null shorthand, the `---`
//! section separator, and the curated set of structural symbols
//! (`{ } [ ] , : ~`). Tokenization runs to completion in one pass over
//! an in-memory buffer. There is no incremental or restartable mode.

pub mod cursor;
mod lexer;
pub mod token;
pub mod unicode;

pub use lexer::Lexer;
pub use token::{SubType, Token, TokenKind, TokenValue};

/// Tokenizes `source` in one pass, returning every token in order or the
/// first lexical error encountered.
pub fn tokenize(source: &str) -> Result<Vec<Token>, io_util::LexError> {
    Lexer::new(source).tokenize()
}
