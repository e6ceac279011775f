//! The token model: the value a tokenizer step emits into the stream the
//! AST parser consumes.

use io_util::Position;
use num_bigint::BigInt;

/// Coarse token kind. Every token belongs to exactly one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    String,
    Number,
    Boolean,
    Null,
    Binary,
    SectionSep,
    CurlyOpen,
    CurlyClose,
    BracketOpen,
    BracketClose,
    Comma,
    Colon,
    Tilde,
}

/// Optional refinement of [`TokenKind::String`] or [`TokenKind::Number`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubType {
    RegularString,
    RawString,
    OpenString,
    Hex,
    Octal,
    Binary,
}

/// The decoded, typed value a token carries.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Str(String),
    Int(i64),
    BigInt(BigInt),
    Float(f64),
    Bool(bool),
    Null,
    Bytes(Vec<u8>),
    /// The `---` section separator. Carries no payload beyond its kind.
    Separator,
}

/// A single lexical token: source text plus its decoded, typed value.
///
/// Tokens are immutable after emission; the tokenizer never revisits one
/// once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub sub_type: Option<SubType>,
    /// The exact source substring that produced this token, including any
    /// quotes or prefix (`r`, `b`).
    pub text: String,
    pub value: TokenValue,
    pub position: Position,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        sub_type: Option<SubType>,
        text: impl Into<String>,
        value: TokenValue,
        position: Position,
    ) -> Self {
        Self { kind, sub_type, text: text.into(), value, position }
    }

    /// Shorthand for the structural single-character symbol tokens, whose
    /// text is always the symbol itself and which carry no decoded value.
    pub fn symbol(kind: TokenKind, ch: char, position: Position) -> Self {
        Self { kind, sub_type: None, text: ch.to_string(), value: TokenValue::Str(ch.to_string()), position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_token_carries_its_own_text() {
        let tok = Token::symbol(TokenKind::Colon, ':', Position::START);
        assert_eq!(tok.kind, TokenKind::Colon);
        assert_eq!(tok.text, ":");
    }

    #[test]
    fn constructed_token_round_trips_fields() {
        let tok = Token::new(
            TokenKind::Number,
            Some(SubType::Hex),
            "0xFF",
            TokenValue::Int(255),
            Position::new(0, 1, 1),
        );
        assert_eq!(tok.value, TokenValue::Int(255));
        assert_eq!(tok.sub_type, Some(SubType::Hex));
    }
}
