//! Lookbehind extractors: modifiers, visibility and docblocks

use phpscope_core::lines::newline_count;
use phpscope_core::{Cursor, Token, TokenKind};
use std::collections::BTreeSet;

use crate::symbols::{Modifier, Visibility};

/// `static`, `final` and `abstract` keywords preceding the declaration at `index`
pub fn modifiers(tokens: &[Token], index: usize) -> BTreeSet<Modifier> {
    let mut cursor = Cursor::at(tokens, index);
    let mut found = BTreeSet::new();

    while let Some(token) = cursor.retreat() {
        if let Some(modifier) = Modifier::from_token(token.kind) {
            found.insert(modifier);
        } else if !skippable(token.kind) {
            break;
        }
    }

    found
}

/// First visibility keyword preceding the declaration at `index`
pub fn visibility(tokens: &[Token], index: usize) -> Option<Visibility> {
    let mut cursor = Cursor::at(tokens, index);

    while let Some(token) = cursor.retreat() {
        if let Some(visibility) = Visibility::from_token(token.kind) {
            return Some(visibility);
        }
        if !token.kind.is_whitespace() && !token.kind.is_modifier() && !token.is(TokenKind::Readonly) {
            return None;
        }
    }

    None
}

/// Doc comment attached to the declaration at `index`.
///
/// The comment must sit on the same or the immediately preceding line,
/// separated only by whitespace, declaration keywords and attribute groups.
pub fn docblock(tokens: &[Token], index: usize) -> Option<String> {
    let mut cursor = Cursor::at(tokens, index);

    while let Some(token) = cursor.retreat() {
        match token.kind {
            TokenKind::DocComment => return Some(token.text.clone()),
            TokenKind::Whitespace if newline_count(&token.text) > 1 => return None,
            TokenKind::CloseSquare => {
                let start = attribute_start(tokens, cursor.position()?)?;
                cursor = Cursor::at(tokens, start);
            }
            kind if skippable(kind) || kind.is_modifier() => continue,
            _ => return None,
        }
    }

    None
}

/// Index of the `#[` opening the attribute group closed by the `]` at
/// `close`, or `None` when that `]` closes an array or index.
pub(crate) fn attribute_start(tokens: &[Token], close: usize) -> Option<usize> {
    let mut depth = 0usize;

    for index in (0..=close).rev() {
        match tokens.get(index)?.kind {
            TokenKind::CloseSquare => depth += 1,
            kind @ (TokenKind::OpenSquare | TokenKind::Attribute) => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return (kind == TokenKind::Attribute).then_some(index);
                }
            }
            _ => {}
        }
    }

    None
}

/// Tokens that may separate a declaration keyword from its modifiers
fn skippable(kind: TokenKind) -> bool {
    kind.is_whitespace() || kind.is_visibility() || kind == TokenKind::Readonly
}

#[cfg(test)]
mod tests {
    use super::*;
    use phpscope_core::tokenize_source;

    fn keyword_index(tokens: &[Token], kind: TokenKind) -> usize {
        tokens.iter().position(|t| t.is(kind)).unwrap()
    }

    #[test]
    fn test_modifiers() {
        let tokens = tokenize_source("<?php final public static function f() {}").unwrap();
        let found = modifiers(&tokens, keyword_index(&tokens, TokenKind::Function));

        assert_eq!(found, BTreeSet::from([Modifier::Final, Modifier::Static]));
    }

    #[test]
    fn test_modifiers_stop_at_statement() {
        let tokens = tokenize_source("<?php abstract class A {}\nclass B {}").unwrap();
        let second = tokens.iter().rposition(|t| t.is(TokenKind::Class)).unwrap();
        assert!(modifiers(&tokens, second).is_empty());

        let first = keyword_index(&tokens, TokenKind::Class);
        assert_eq!(modifiers(&tokens, first), BTreeSet::from([Modifier::Abstract]));
    }

    #[test]
    fn test_visibility() {
        let tokens = tokenize_source("<?php protected static function f() {}").unwrap();
        assert_eq!(
            visibility(&tokens, keyword_index(&tokens, TokenKind::Function)),
            Some(Visibility::Protected)
        );

        let tokens = tokenize_source("<?php function f() {}").unwrap();
        assert_eq!(visibility(&tokens, keyword_index(&tokens, TokenKind::Function)), None);
    }

    #[test]
    fn test_docblock_adjacent() {
        let source = "<?php\n/** Adds. */\npublic static function add() {}";
        let tokens = tokenize_source(source).unwrap();

        assert_eq!(
            docblock(&tokens, keyword_index(&tokens, TokenKind::Function)).as_deref(),
            Some("/** Adds. */")
        );
    }

    #[test]
    fn test_docblock_detached_by_blank_line() {
        let source = "<?php\n/** File header. */\n\nfunction add() {}";
        let tokens = tokenize_source(source).unwrap();

        assert_eq!(docblock(&tokens, keyword_index(&tokens, TokenKind::Function)), None);
    }

    #[test]
    fn test_docblock_plain_comment_is_ignored() {
        let source = "<?php\n/* not a docblock */\nfunction add() {}";
        let tokens = tokenize_source(source).unwrap();

        assert_eq!(docblock(&tokens, keyword_index(&tokens, TokenKind::Function)), None);
    }

    #[test]
    fn test_docblock_above_attributes() {
        let source = "<?php\n/** doc */\n#[Pure]\n#[Route('/a', methods: ['GET'])]\npublic function f() {}";
        let tokens = tokenize_source(source).unwrap();
        let function = keyword_index(&tokens, TokenKind::Function);

        assert_eq!(docblock(&tokens, function).as_deref(), Some("/** doc */"));
        assert_eq!(visibility(&tokens, function), Some(Visibility::Public));
    }

    #[test]
    fn test_docblock_not_found_through_array() {
        let source = "<?php\n/** doc */\n$a = [1];\nfunction f() {}";
        let tokens = tokenize_source(source).unwrap();

        assert_eq!(docblock(&tokens, keyword_index(&tokens, TokenKind::Function)), None);
    }

    #[test]
    fn test_attribute_start() {
        let tokens = tokenize_source("<?php #[A([1, 2])] $b[0];").unwrap();
        let closes: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is(TokenKind::CloseSquare))
            .map(|(i, _)| i)
            .collect();

        assert_eq!(attribute_start(&tokens, closes[0]), None);
        assert_eq!(
            attribute_start(&tokens, closes[1]),
            Some(keyword_index(&tokens, TokenKind::Attribute))
        );
        assert_eq!(attribute_start(&tokens, closes[2]), None);
    }

    #[test]
    fn test_docblock_stops_at_interface_boundary() {
        let source = "<?php\n/** Interface doc. */\ninterface I { function f(); }";
        let tokens = tokenize_source(source).unwrap();

        assert_eq!(
            docblock(&tokens, keyword_index(&tokens, TokenKind::Interface)).as_deref(),
            Some("/** Interface doc. */")
        );
        assert_eq!(docblock(&tokens, keyword_index(&tokens, TokenKind::Function)), None);
    }
}
