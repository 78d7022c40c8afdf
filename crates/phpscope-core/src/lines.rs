//! Line annotation
//!
//! Lines are assigned in a dedicated pass over the whole token list so that
//! every later lookahead or lookbehind can read a token's line directly.

use crate::token::RawToken;

/// Count `\n` characters in a piece of source text
pub fn newline_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Compute the 1-based starting line of every token.
///
/// The returned vector is parallel to `tokens`. Multi-line tokens (comments,
/// strings, whitespace runs) advance the counter by the number of line breaks
/// they contain.
pub fn annotate(tokens: &[RawToken]) -> Vec<usize> {
    let mut lines = Vec::with_capacity(tokens.len());
    let mut line = 1;

    for token in tokens {
        lines.push(line);
        line += token.newline_count();
    }

    lines
}
