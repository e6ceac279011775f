//! Property tests for the tokenizer's whitespace and comment laws (see
//! the workspace's testable-properties notes: whitespace commutativity
//! and comment transparency).

use proptest::prelude::*;

fn token_values(source: &str) -> Vec<io_lex::TokenValue> {
    io_lex::tokenize(source).unwrap().into_iter().map(|t| t.value).collect()
}

proptest! {
    /// Inserting extra whitespace between tokens (outside strings) must
    /// not change the resulting token values, only their positions.
    #[test]
    fn whitespace_between_tokens_is_commutative(extra_spaces in 0usize..8) {
        let base = "12,34, true, \"x\"";
        let padded = format!(
            "12{pad},34{pad}, true, \"x\"",
            pad = " ".repeat(extra_spaces)
        );
        prop_assert_eq!(token_values(base), token_values(&padded));
    }

    /// A `#...\n` comment region can be deleted from the source without
    /// affecting the token values that surround it.
    #[test]
    fn comment_regions_are_transparent(filler_len in 0usize..30) {
        let comment = format!("# {}\n", "x".repeat(filler_len));
        let with_comment = format!("{comment}12, 34");
        let without_comment = "12, 34";
        prop_assert_eq!(token_values(&with_comment), token_values(without_comment));
    }
}
