//! phpscope-core: Token model and token stream preparation
//!
//! This crate provides:
//! - `RawToken`: The lexer-facing input contract (punctuation or named category)
//! - `lexer::tokenize()`: A reference PHP lexer producing raw tokens
//! - `lines::annotate()`: Line annotation over a raw token list
//! - `classify`: The punctuation and category tables mapping lexemes to `TokenKind`
//! - `Cursor`: Bidirectional lookahead/lookbehind over classified tokens

pub mod classify;
pub mod cursor;
pub mod lexer;
pub mod lines;
mod token;

pub use cursor::Cursor;
pub use token::{RawToken, Token, TokenError, TokenKind};

/// Annotate lines, then classify every token.
///
/// Line annotation runs over the complete list before any token is
/// classified, so every produced [`Token`] carries its line.
pub fn prepare_tokens(raw: Vec<RawToken>) -> Result<Vec<Token>, TokenError> {
    let lines = lines::annotate(&raw);

    raw.into_iter()
        .zip(lines)
        .enumerate()
        .map(|(index, (raw, line))| classify::classify_token(raw, index, line))
        .collect()
}

/// Lex and prepare PHP source text in one step
pub fn tokenize_source(source: &str) -> Result<Vec<Token>, TokenError> {
    prepare_tokens(lexer::tokenize(source))
}
