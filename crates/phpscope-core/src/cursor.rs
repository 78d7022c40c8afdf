//! Bidirectional cursor over a classified token slice
//!
//! Lookahead and lookbehind go through the cursor instead of fixed offsets,
//! so the scans do not depend on where the lexer emits whitespace. Moving past
//! either end leaves the cursor exhausted; every accessor then yields `None`.

use crate::token::Token;

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'t> {
    tokens: &'t [Token],
    pos: Option<usize>,
}

impl<'t> Cursor<'t> {
    /// Cursor positioned on `index` (exhausted if out of range)
    pub fn at(tokens: &'t [Token], index: usize) -> Self {
        Self {
            tokens,
            pos: (index < tokens.len()).then_some(index),
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.pos
    }

    pub fn current(&self) -> Option<&'t Token> {
        self.pos.and_then(|p| self.tokens.get(p))
    }

    /// Token directly after the current one, without moving
    pub fn peek(&self) -> Option<&'t Token> {
        self.pos.and_then(|p| self.tokens.get(p + 1))
    }

    pub fn advance(&mut self) -> Option<&'t Token> {
        let len = self.tokens.len();
        self.pos = self.pos.and_then(|p| (p + 1 < len).then_some(p + 1));
        self.current()
    }

    pub fn retreat(&mut self) -> Option<&'t Token> {
        self.pos = self.pos.and_then(|p| p.checked_sub(1));
        self.current()
    }

    /// Move forward to the next non-whitespace token
    pub fn skip_whitespace(&mut self) -> Option<&'t Token> {
        self.seek_until(|t| !t.kind.is_whitespace())
    }

    /// Move backward to the previous non-whitespace token
    pub fn skip_whitespace_back(&mut self) -> Option<&'t Token> {
        self.seek_back_until(|t| !t.kind.is_whitespace())
    }

    /// Move forward until `pred` holds for the current token
    pub fn seek_until<P>(&mut self, pred: P) -> Option<&'t Token>
    where
        P: Fn(&Token) -> bool,
    {
        while let Some(token) = self.advance() {
            if pred(token) {
                return Some(token);
            }
        }
        None
    }

    /// Move backward until `pred` holds for the current token
    pub fn seek_back_until<P>(&mut self, pred: P) -> Option<&'t Token>
    where
        P: Fn(&Token) -> bool,
    {
        while let Some(token) = self.retreat() {
            if pred(token) {
                return Some(token);
            }
        }
        None
    }

    /// Concatenate consecutive name parts starting at the current token.
    ///
    /// Leaves the cursor on the last name part consumed. Returns `None` when
    /// the current token is not a name part.
    pub fn read_name(&mut self) -> Option<String> {
        let mut name = String::new();
        let mut last = self.pos;

        while let Some(token) = self.current() {
            if !token.kind.is_name_part() {
                break;
            }
            name.push_str(&token.text);
            last = self.pos;
            if self.advance().is_none() {
                break;
            }
        }

        self.pos = last;
        (!name.is_empty()).then_some(name)
    }
}
