//! Extractors that scan a declaration's body: end of scope, signature and
//! cyclomatic complexity

use phpscope_core::{Cursor, Token, TokenKind};

use super::modifiers::attribute_start;

/// Where a declaration's scope ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeEnd {
    /// Index of the closing curly, or of the `;` ending a bodyless declaration
    Found(usize),
    /// The braces never balance before the end of input
    Unbalanced,
}

impl ScopeEnd {
    /// End index, falling back to `start` for an unbalanced scope
    pub fn index_or(self, start: usize) -> usize {
        match self {
            ScopeEnd::Found(index) => index,
            ScopeEnd::Unbalanced => start,
        }
    }
}

/// Resolve the end of the scope opened by the keyword at `start` by brace
/// balancing. A `;` reached before any body ends the declaration there.
pub fn scope_end(tokens: &[Token], start: usize) -> ScopeEnd {
    let mut depth = 0usize;
    let mut opened = false;

    for (index, token) in tokens.iter().enumerate().skip(start + 1) {
        if token.kind.opens_curly() {
            depth += 1;
            opened = true;
        } else if token.is(TokenKind::CloseCurly) {
            if depth == 0 {
                return ScopeEnd::Unbalanced;
            }
            depth -= 1;
            if depth == 0 {
                return ScopeEnd::Found(index);
            }
        } else if token.is(TokenKind::Semicolon) && !opened {
            return ScopeEnd::Found(index);
        }
    }

    ScopeEnd::Unbalanced
}

/// Declaration text after `from` up to, not including, the body or `;`
pub fn signature(tokens: &[Token], from: usize) -> String {
    let mut signature = String::new();

    for token in tokens.iter().skip(from + 1) {
        if token.is(TokenKind::OpenCurly) || token.is(TokenKind::Semicolon) {
            break;
        }
        signature.push_str(&token.text);
    }

    signature.trim().to_string()
}

/// Cyclomatic complexity of the tokens in `start..=end`
pub fn complexity(tokens: &[Token], start: usize, end: usize) -> u32 {
    let Some(last) = tokens.len().checked_sub(1) else {
        return 1;
    };

    let mut ccn = 1;
    for index in start..=end.min(last) {
        let token = &tokens[index];
        if token.kind.is_decision_point()
            || (token.is(TokenKind::QuestionMark) && !is_nullable_marker(tokens, index))
        {
            ccn += 1;
        }
    }

    ccn
}

/// A `?` in type position (`?int`) rather than a ternary
fn is_nullable_marker(tokens: &[Token], index: usize) -> bool {
    let mut cursor = Cursor::at(tokens, index);
    let Some(prev) = cursor.skip_whitespace_back() else {
        return false;
    };

    match prev.kind {
        TokenKind::OpenBracket
        | TokenKind::Comma
        | TokenKind::Colon
        | TokenKind::Static
        | TokenKind::Readonly
        | TokenKind::Var => true,
        // `#[Sensitive] ?string $p`
        TokenKind::CloseSquare => cursor
            .position()
            .is_some_and(|close| attribute_start(tokens, close).is_some()),
        kind => kind.is_visibility(),
    }
}
