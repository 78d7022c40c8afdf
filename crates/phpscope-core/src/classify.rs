//! Token classification
//!
//! Punctuation is classified through a fixed table that is exhaustive for the
//! grammar; a character outside it is a contract violation of the lexer.
//! Named categories go through a second table, and categories the analyzer
//! has no use for classify as [`TokenKind::Other`].

use phf::phf_map;

use crate::token::{RawToken, Token, TokenError, TokenKind};

static PUNCTUATION: phf::Map<char, TokenKind> = phf_map! {
    '(' => TokenKind::OpenBracket,
    ')' => TokenKind::CloseBracket,
    '[' => TokenKind::OpenSquare,
    ']' => TokenKind::CloseSquare,
    '{' => TokenKind::OpenCurly,
    '}' => TokenKind::CloseCurly,
    ';' => TokenKind::Semicolon,
    '.' => TokenKind::Dot,
    ',' => TokenKind::Comma,
    '=' => TokenKind::Equal,
    '<' => TokenKind::Lt,
    '>' => TokenKind::Gt,
    '+' => TokenKind::Plus,
    '-' => TokenKind::Minus,
    '*' => TokenKind::Mult,
    '/' => TokenKind::Div,
    '?' => TokenKind::QuestionMark,
    '!' => TokenKind::ExclamationMark,
    ':' => TokenKind::Colon,
    '"' => TokenKind::DoubleQuotes,
    '@' => TokenKind::At,
    '&' => TokenKind::Ampersand,
    '%' => TokenKind::Percent,
    '|' => TokenKind::Pipe,
    '$' => TokenKind::Dollar,
    '^' => TokenKind::Caret,
    '~' => TokenKind::Tilde,
    '`' => TokenKind::Backtick,
};

static CATEGORIES: phf::Map<&'static str, TokenKind> = phf_map! {
    "T_OPEN_TAG" => TokenKind::OpenTag,
    "T_OPEN_TAG_WITH_ECHO" => TokenKind::OpenTagWithEcho,
    "T_CLOSE_TAG" => TokenKind::CloseTag,
    "T_INLINE_HTML" => TokenKind::InlineHtml,
    "T_WHITESPACE" => TokenKind::Whitespace,
    "T_COMMENT" => TokenKind::Comment,
    "T_DOC_COMMENT" => TokenKind::DocComment,
    "T_ATTRIBUTE" => TokenKind::Attribute,
    "T_STRING" => TokenKind::Identifier,
    "T_NAME_QUALIFIED" => TokenKind::NameQualified,
    "T_NAME_FULLY_QUALIFIED" => TokenKind::NameFullyQualified,
    "T_NAME_RELATIVE" => TokenKind::NameRelative,
    "T_NS_SEPARATOR" => TokenKind::NsSeparator,
    "T_VARIABLE" => TokenKind::Variable,
    "T_CONSTANT_ENCAPSED_STRING" => TokenKind::ConstantEncapsedString,
    "T_ENCAPSED_AND_WHITESPACE" => TokenKind::EncapsedAndWhitespace,
    "T_START_HEREDOC" => TokenKind::StartHeredoc,
    "T_END_HEREDOC" => TokenKind::EndHeredoc,
    "T_LNUMBER" => TokenKind::LNumber,
    "T_DNUMBER" => TokenKind::DNumber,
    "T_CURLY_OPEN" => TokenKind::CurlyOpen,
    "T_DOLLAR_OPEN_CURLY_BRACES" => TokenKind::DollarOpenCurlyBraces,
    "T_NAMESPACE" => TokenKind::Namespace,
    "T_USE" => TokenKind::Use,
    "T_CLASS" => TokenKind::Class,
    "T_TRAIT" => TokenKind::Trait,
    "T_INTERFACE" => TokenKind::Interface,
    "T_ENUM" => TokenKind::Enum,
    "T_FUNCTION" => TokenKind::Function,
    "T_FN" => TokenKind::Fn,
    "T_EXTENDS" => TokenKind::Extends,
    "T_IMPLEMENTS" => TokenKind::Implements,
    "T_CONST" => TokenKind::Const,
    "T_VAR" => TokenKind::Var,
    "T_PUBLIC" => TokenKind::Public,
    "T_PROTECTED" => TokenKind::Protected,
    "T_PRIVATE" => TokenKind::Private,
    "T_STATIC" => TokenKind::Static,
    "T_FINAL" => TokenKind::Final,
    "T_ABSTRACT" => TokenKind::Abstract,
    "T_READONLY" => TokenKind::Readonly,
    "T_IF" => TokenKind::If,
    "T_ELSEIF" => TokenKind::ElseIf,
    "T_ELSE" => TokenKind::Else,
    "T_FOR" => TokenKind::For,
    "T_FOREACH" => TokenKind::Foreach,
    "T_WHILE" => TokenKind::While,
    "T_DO" => TokenKind::Do,
    "T_SWITCH" => TokenKind::Switch,
    "T_CASE" => TokenKind::Case,
    "T_DEFAULT" => TokenKind::Default,
    "T_MATCH" => TokenKind::Match,
    "T_BREAK" => TokenKind::Break,
    "T_CONTINUE" => TokenKind::Continue,
    "T_RETURN" => TokenKind::Return,
    "T_TRY" => TokenKind::Try,
    "T_CATCH" => TokenKind::Catch,
    "T_FINALLY" => TokenKind::Finally,
    "T_THROW" => TokenKind::Throw,
    "T_YIELD" => TokenKind::Yield,
    "T_BOOLEAN_AND" => TokenKind::BooleanAnd,
    "T_BOOLEAN_OR" => TokenKind::BooleanOr,
    "T_LOGICAL_AND" => TokenKind::LogicalAnd,
    "T_LOGICAL_OR" => TokenKind::LogicalOr,
    "T_LOGICAL_XOR" => TokenKind::LogicalXor,
    "T_COALESCE" => TokenKind::Coalesce,
    "T_OBJECT_OPERATOR" => TokenKind::ObjectOperator,
    "T_NULLSAFE_OBJECT_OPERATOR" => TokenKind::NullsafeObjectOperator,
    "T_DOUBLE_COLON" => TokenKind::DoubleColon,
    "T_PAAMAYIM_NEKUDOTAYIM" => TokenKind::DoubleColon,
    "T_DOUBLE_ARROW" => TokenKind::DoubleArrow,
    "T_ELLIPSIS" => TokenKind::Ellipsis,
    "T_NEW" => TokenKind::New,
    "T_REQUIRE" => TokenKind::Require,
    "T_REQUIRE_ONCE" => TokenKind::RequireOnce,
    "T_INCLUDE" => TokenKind::Include,
    "T_INCLUDE_ONCE" => TokenKind::IncludeOnce,
    "T_HALT_COMPILER" => TokenKind::HaltCompiler,
};

/// Classify a single punctuation character
pub fn classify_char(ch: char) -> Option<TokenKind> {
    PUNCTUATION.get(&ch).copied()
}

/// Classify a named lexical category
pub fn classify_name(name: &str) -> TokenKind {
    CATEGORIES.get(name).copied().unwrap_or(TokenKind::Other)
}

/// Classify a raw token at position `index` whose line has already been
/// computed, producing the final [`Token`].
pub fn classify_token(raw: RawToken, index: usize, line: usize) -> Result<Token, TokenError> {
    let kind = match &raw {
        RawToken::Char(ch) => classify_char(*ch).ok_or(TokenError::UnknownPunctuation {
            ch: *ch,
            index,
            line,
        })?,
        RawToken::Named { name, .. } => classify_name(name),
    };

    Ok(Token::new(kind, raw.into_text(), line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_table() {
        assert_eq!(classify_char('{'), Some(TokenKind::OpenCurly));
        assert_eq!(classify_char('?'), Some(TokenKind::QuestionMark));
        assert_eq!(classify_char('`'), Some(TokenKind::Backtick));
        assert_eq!(classify_char('#'), None);
    }

    #[test]
    fn test_named_categories() {
        assert_eq!(classify_name("T_CLASS"), TokenKind::Class);
        assert_eq!(classify_name("T_PAAMAYIM_NEKUDOTAYIM"), TokenKind::DoubleColon);
        assert_eq!(classify_name("T_ENUM"), TokenKind::Enum);
        assert_eq!(classify_name("T_LINE"), TokenKind::Other);
    }

    #[test]
    fn test_unknown_punctuation_is_fatal() {
        let err = classify_token(RawToken::Char('\u{1}'), 7, 3).unwrap_err();
        assert_eq!(
            err,
            TokenError::UnknownPunctuation {
                ch: '\u{1}',
                index: 7,
                line: 3
            }
        );
    }

    #[test]
    fn test_classify_keeps_text_and_line() {
        let token = classify_token(RawToken::named("T_FUNCTION", "function"), 0, 12).unwrap();
        assert_eq!(token.kind, TokenKind::Function);
        assert_eq!(token.text, "function");
        assert_eq!(token.line, 12);
    }
}
