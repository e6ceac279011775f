//! io-parse: the AST parser. Assembles a flat [`Token`] stream into the
//! nested [`Node`] tree of objects, arrays, and key-value pairs that the
//! schema layer later validates.
//!
//! The parser never recurses on the input. It walks an explicit stack of
//! open containers instead, so nesting depth is bounded only by available
//! memory, not by the Rust call stack.

mod edge_cases;
pub mod tree;

use io_lex::{Token, TokenKind};
use io_util::ParseError;

pub use tree::{ContainerKind, ContainerNode, KeyValueNode, Node, PrimitiveValue};

/// What a popped container attaches to once its closing bracket is seen.
/// Recorded at push time, since the parent's shape (an open key-value slot
/// or not) is only known then, not when the bracket eventually closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Attachment {
    /// The implicit document root: never attached anywhere, it *is* the
    /// final container once [`AstParser::finish`] collapses it.
    Root,
    AppendToParent,
    FillParentKv,
}

struct Frame {
    kind: ContainerKind,
    children: Vec<Node>,
    attachment: Attachment,
    /// Position of the opening bracket, for the unclosed-bracket error at
    /// `finish()`. `None` for the implicit root, which opened nowhere.
    open_pos: Option<io_util::Position>,
}

/// Coarse category of the immediately preceding token, tracked only to
/// implement the two rules that need lookback: consecutive-comma gap
/// insertion, and colon-binds-the-next-value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LastToken {
    Start,
    Colon,
    Comma,
    Other,
}

/// Builds a [`Node`] tree from one section's worth of tokens (no
/// `---` separators; split those out first with [`split_sections`]).
///
/// A shift/reduce-style build: a container stack, pushed on `{`/`[`,
/// popped and attached to its parent on `}`/`]`, with `:` and `,`
/// rewriting the current container's trailing child in place.
pub struct AstParser {
    stack: Vec<Frame>,
    last_token: LastToken,
}

impl Default for AstParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AstParser {
    pub fn new() -> Self {
        Self { stack: Vec::new(), last_token: LastToken::Start }
    }

    /// Feeds one token to the parser. Does not consume or look ahead;
    /// each call advances the state machine by exactly one step.
    pub fn process(&mut self, token: &Token) -> Result<(), ParseError> {
        self.ensure_root();

        match token.kind {
            TokenKind::CurlyOpen => self.push_container(ContainerKind::Object, token.position),
            TokenKind::BracketOpen => self.push_container(ContainerKind::Array, token.position),
            TokenKind::CurlyClose => self.pop_container(ContainerKind::Object, token)?,
            TokenKind::BracketClose => self.pop_container(ContainerKind::Array, token)?,
            TokenKind::Colon => self.bind_key(token)?,
            TokenKind::Comma => self.handle_comma(token),
            TokenKind::SectionSep => {
                return Err(ParseError::MultipleHeadersFound { position: token.position });
            }
            TokenKind::String
            | TokenKind::Number
            | TokenKind::Boolean
            | TokenKind::Null
            | TokenKind::Binary
            | TokenKind::Tilde => {
                let node = Node::primitive(tree::PrimitiveValue::from_token(token), token.position);
                self.insert_node(node);
                self.last_token = LastToken::Other;
            }
        }
        Ok(())
    }

    /// Processes every token of one section in order, then finalizes.
    /// Convenience wrapper around [`AstParser::process`] +
    /// [`AstParser::finish`] for the common case.
    pub fn parse_tokens(tokens: &[Token]) -> Result<Node, ParseError> {
        let mut parser = Self::new();
        for token in tokens {
            parser.process(token)?;
        }
        parser.finish()
    }

    /// Finalizes the tree: the container stack must be back
    /// to depth 1 (just the implicit root). A root with no children
    /// collapses to an empty object; exactly one child becomes the
    /// document value directly; more than one, the root object itself is
    /// the document value.
    pub fn finish(mut self) -> Result<Node, ParseError> {
        self.ensure_root();
        if self.stack.len() != 1 {
            let open_pos = self
                .stack
                .last()
                .and_then(|f| f.open_pos)
                .unwrap_or(io_util::Position::START);
            return Err(ParseError::OpenBracket { position: open_pos });
        }
        let root = self.stack.pop().unwrap();
        Ok(match root.children.len() {
            0 => Node::Container(ContainerNode { kind: ContainerKind::Object, children: vec![] }),
            1 => root.children.into_iter().next().unwrap(),
            _ => Node::Container(ContainerNode { kind: ContainerKind::Object, children: root.children }),
        })
    }

    fn ensure_root(&mut self) {
        if self.stack.is_empty() {
            self.stack.push(Frame {
                kind: ContainerKind::Object,
                children: Vec::new(),
                attachment: Attachment::Root,
                open_pos: None,
            });
        }
    }

    fn top(&self) -> &Frame {
        self.stack.last().expect("ensure_root ran before every access")
    }

    fn top_mut(&mut self) -> &mut Frame {
        self.stack.last_mut().expect("ensure_root ran before every access")
    }

    /// `true` when the current container's trailing child is a key-value
    /// pair still waiting for its value, the state a `:` leaves behind.
    fn awaiting_colon_fill(&self) -> bool {
        self.last_token == LastToken::Colon
            && matches!(self.top().children.last(), Some(Node::KeyValue(kv)) if kv.value.is_none())
    }

    /// Either fills the pending key-value slot left by a preceding `:`, or
    /// appends `node` as a new child of the current container. Shared by
    /// primitives and containers alike.
    fn insert_node(&mut self, node: Node) {
        if self.awaiting_colon_fill() {
            if let Some(Node::KeyValue(kv)) = self.top_mut().children.last_mut() {
                kv.value = Some(Box::new(node));
                return;
            }
        }
        self.top_mut().children.push(node);
    }

    fn push_container(&mut self, kind: ContainerKind, position: io_util::Position) {
        let attachment = if self.awaiting_colon_fill() { Attachment::FillParentKv } else { Attachment::AppendToParent };
        self.stack.push(Frame { kind, children: Vec::new(), attachment, open_pos: Some(position) });
        self.last_token = LastToken::Other;
    }

    fn pop_container(&mut self, expected: ContainerKind, token: &Token) -> Result<(), ParseError> {
        if self.stack.len() <= 1 || self.top().kind != expected {
            return Err(ParseError::InvalidBracket { found: token.text.clone(), position: token.position });
        }
        let frame = self.stack.pop().unwrap();
        let node = Node::Container(ContainerNode { kind: frame.kind, children: frame.children });
        match frame.attachment {
            Attachment::AppendToParent => self.top_mut().children.push(node),
            Attachment::FillParentKv => {
                if let Some(Node::KeyValue(kv)) = self.top_mut().children.last_mut() {
                    kv.value = Some(Box::new(node));
                }
            }
            Attachment::Root => unreachable!("the implicit root is never pushed via a bracket token"),
        }
        self.last_token = LastToken::Other;
        Ok(())
    }

    /// `:` converts the current container's trailing primitive into the
    /// key of a new, value-less key-value pair.
    fn bind_key(&mut self, token: &Token) -> Result<(), ParseError> {
        let top = self.top_mut();
        match top.children.last() {
            Some(Node::Primitive(p)) => {
                let key = p.value.to_string();
                *top.children.last_mut().unwrap() = Node::KeyValue(KeyValueNode { key, value: None });
                self.last_token = LastToken::Colon;
                Ok(())
            }
            _ => Err(ParseError::InvalidHeaderItem { position: token.position }),
        }
    }

    /// Two consecutive commas insert an empty-string value for the
    /// skipped position. A lone comma is a no-op separator.
    fn handle_comma(&mut self, token: &Token) {
        if self.last_token == LastToken::Comma {
            let node = Node::primitive(tree::PrimitiveValue::Str(String::new()), token.position);
            self.top_mut().children.push(node);
        }
        self.last_token = LastToken::Comma;
    }
}

/// Splits a token stream on `---` section separators, one section being
/// a run of tokens between separators. The separators themselves are
/// discarded; each returned slice is fed to its own [`AstParser`], since
/// a single parser never sees more than one section.
pub fn split_sections(tokens: &[Token]) -> Vec<&[Token]> {
    let mut sections = Vec::new();
    let mut start = 0;
    for (i, tok) in tokens.iter().enumerate() {
        if tok.kind == TokenKind::SectionSep {
            sections.push(&tokens[start..i]);
            start = i + 1;
        }
    }
    sections.push(&tokens[start..]);
    sections
}
