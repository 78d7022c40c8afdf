//! Names, parents, interfaces and namespaces of declarations

use phpscope_core::{Cursor, Token, TokenKind};

use crate::symbols::FunctionName;

/// Declared name of the container whose keyword is at `index`.
///
/// `None` for anonymous classes (`new class(...) { }`).
pub fn container_name(tokens: &[Token], index: usize) -> Option<(String, usize)> {
    let mut cursor = Cursor::at(tokens, index);
    let token = cursor.skip_whitespace()?;
    if !token.is(TokenKind::Identifier) {
        return None;
    }
    Some((token.text.clone(), cursor.position()?))
}

/// Name of the function whose keyword is at `index`, with the index of the
/// name token when there is one. A by-reference `&` is skipped.
pub fn function_name(tokens: &[Token], index: usize) -> (FunctionName, Option<usize>) {
    let mut cursor = Cursor::at(tokens, index);
    let token = cursor.seek_until(|t| !t.kind.is_whitespace() && !t.is(TokenKind::Ampersand));

    match token {
        Some(token) if token.is(TokenKind::Identifier) => {
            (FunctionName::named(token.text.clone()), cursor.position())
        }
        _ => (FunctionName::Anonymous, None),
    }
}

/// Qualified name after `extends`, starting from the container's name token.
///
/// For interfaces with several parents, the first one.
pub fn parent(tokens: &[Token], name_index: usize) -> Option<String> {
    let mut cursor = Cursor::at(tokens, name_index);
    if !cursor.skip_whitespace()?.is(TokenKind::Extends) {
        return None;
    }
    cursor.skip_whitespace()?;
    cursor.read_name()
}

/// Names listed after `implements`, in declaration order.
///
/// `None` when the declaration has no `implements` clause.
pub fn interfaces(tokens: &[Token], name_index: usize) -> Option<Vec<String>> {
    let mut cursor = Cursor::at(tokens, name_index);
    let mut token = cursor.skip_whitespace()?;

    if token.is(TokenKind::Extends) {
        loop {
            cursor.skip_whitespace()?;
            cursor.read_name();
            token = cursor.skip_whitespace()?;
            if !token.is(TokenKind::Comma) {
                break;
            }
        }
    }

    if !token.is(TokenKind::Implements) {
        return None;
    }

    let mut names = Vec::new();
    while let Some(token) = cursor.advance() {
        if token.is(TokenKind::OpenCurly) {
            break;
        }
        if token.kind.is_name_part() {
            if let Some(name) = cursor.read_name() {
                names.push(name);
            }
        }
    }

    Some(names)
}

/// Namespace in effect at `index`, or `""` in the global namespace
pub fn namespace(tokens: &[Token], index: usize) -> String {
    let mut cursor = Cursor::at(tokens, index);

    while cursor.seek_back_until(|t| t.is(TokenKind::Namespace)).is_some() {
        // `namespace\foo()` is a relative name, not a declaration
        if cursor.peek().is_some_and(|t| t.is(TokenKind::NsSeparator)) {
            continue;
        }

        let mut ahead = cursor;
        match ahead.skip_whitespace() {
            Some(token) if token.kind.is_name_part() => {
                return ahead.read_name().unwrap_or_default();
            }
            Some(token) if token.is(TokenKind::OpenCurly) => return String::new(),
            _ => continue,
        }
    }

    String::new()
}
