//! Token model shared by the lexer, the classifier and the analyzer

use std::borrow::Cow;
use thiserror::Error;

/// A token as handed over by a lexer, before line annotation and classification.
///
/// Lexers describe each token either as a single punctuation character or as a
/// named lexical category using the PHP token vocabulary (`T_CLASS`,
/// `T_WHITESPACE`, `T_STRING`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken {
    /// Single-character punctuation, e.g. `{` or `;`
    Char(char),
    /// A named lexical category together with the matched text
    Named {
        name: Cow<'static, str>,
        text: String,
    },
}

impl RawToken {
    /// Create a named token
    pub fn named(name: impl Into<Cow<'static, str>>, text: impl Into<String>) -> Self {
        RawToken::Named {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Source text covered by this token
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            RawToken::Char(ch) => Cow::Owned(ch.to_string()),
            RawToken::Named { text, .. } => Cow::Borrowed(text),
        }
    }

    /// Number of line breaks inside the token text
    pub fn newline_count(&self) -> usize {
        match self {
            RawToken::Char(ch) => usize::from(*ch == '\n'),
            RawToken::Named { text, .. } => crate::lines::newline_count(text),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            RawToken::Char(ch) => ch.to_string(),
            RawToken::Named { text, .. } => text,
        }
    }
}

/// Semantic kind of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    OpenBracket,
    CloseBracket,
    OpenSquare,
    CloseSquare,
    OpenCurly,
    CloseCurly,
    Semicolon,
    Dot,
    Comma,
    Equal,
    Lt,
    Gt,
    Plus,
    Minus,
    Mult,
    Div,
    QuestionMark,
    ExclamationMark,
    Colon,
    DoubleQuotes,
    At,
    Ampersand,
    Percent,
    Pipe,
    Dollar,
    Caret,
    Tilde,
    Backtick,

    // Markup and trivia
    OpenTag,
    OpenTagWithEcho,
    CloseTag,
    InlineHtml,
    Whitespace,
    Comment,
    DocComment,
    Attribute,

    // Names and literals
    /// Plain identifier (`T_STRING`)
    Identifier,
    NameQualified,
    NameFullyQualified,
    NameRelative,
    NsSeparator,
    Variable,
    ConstantEncapsedString,
    EncapsedAndWhitespace,
    StartHeredoc,
    EndHeredoc,
    LNumber,
    DNumber,
    CurlyOpen,
    DollarOpenCurlyBraces,

    // Declarations
    Namespace,
    Use,
    Class,
    Trait,
    Interface,
    /// `enum` in declaration position
    Enum,
    Function,
    Fn,
    Extends,
    Implements,
    Const,
    Var,

    // Visibility and modifiers
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Readonly,

    // Control flow
    If,
    ElseIf,
    Else,
    For,
    Foreach,
    While,
    Do,
    Switch,
    Case,
    Default,
    Match,
    Break,
    Continue,
    Return,
    Try,
    Catch,
    Finally,
    Throw,
    Yield,

    // Operators
    BooleanAnd,
    BooleanOr,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    Coalesce,
    ObjectOperator,
    NullsafeObjectOperator,
    DoubleColon,
    DoubleArrow,
    Ellipsis,

    // Other keywords with a role in the pass
    New,
    Require,
    RequireOnce,
    Include,
    IncludeOnce,
    HaltCompiler,

    /// Any lexer category the analyzer does not distinguish
    Other,
}

impl TokenKind {
    pub fn is_whitespace(self) -> bool {
        self == TokenKind::Whitespace
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::DocComment)
    }

    /// Identifier, qualified name or namespace separator
    pub fn is_name_part(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::NameQualified
                | TokenKind::NameFullyQualified
                | TokenKind::NameRelative
                | TokenKind::NsSeparator
        )
    }

    pub fn is_visibility(self) -> bool {
        matches!(
            self,
            TokenKind::Public | TokenKind::Protected | TokenKind::Private
        )
    }

    /// `static`, `final` or `abstract`
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::Static | TokenKind::Final | TokenKind::Abstract
        )
    }

    /// Tokens that open a curly-brace block, including the interpolation forms
    pub fn opens_curly(self) -> bool {
        matches!(
            self,
            TokenKind::OpenCurly | TokenKind::CurlyOpen | TokenKind::DollarOpenCurlyBraces
        )
    }

    /// Keywords and operators that add a decision path
    pub fn is_decision_point(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::ElseIf
                | TokenKind::For
                | TokenKind::Foreach
                | TokenKind::While
                | TokenKind::Case
                | TokenKind::Catch
                | TokenKind::BooleanAnd
                | TokenKind::LogicalAnd
                | TokenKind::BooleanOr
                | TokenKind::LogicalOr
        )
    }
}

/// A classified, line-annotated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line the token starts on
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Fatal conditions raised while turning raw tokens into classified tokens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Unrecognized punctuation {ch:?} at token {index} (line {line})")]
    UnknownPunctuation { ch: char, index: usize, line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_token_text() {
        assert_eq!(RawToken::Char('{').text(), "{");
        assert_eq!(RawToken::named("T_STRING", "Foo").text(), "Foo");
    }

    #[test]
    fn test_decision_points() {
        assert!(TokenKind::If.is_decision_point());
        assert!(TokenKind::LogicalOr.is_decision_point());
        assert!(!TokenKind::Else.is_decision_point());
        assert!(!TokenKind::QuestionMark.is_decision_point());
    }
}
