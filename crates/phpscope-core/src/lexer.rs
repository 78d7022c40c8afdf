//! Reference PHP lexer
//!
//! Produces the raw token stream the analyzer consumes, using the PHP token
//! vocabulary. The lexer is deliberately shallow: string literals are emitted
//! as single tokens (no interpolation parts) and casts stay punctuation. It
//! never fails; characters outside the grammar are emitted as
//! [`RawToken::Char`] and left for the classifier to reject.

use crate::token::RawToken;

/// Tokenize PHP source text
pub fn tokenize(source: &str) -> Vec<RawToken> {
    Lexer::new(source).run()
}

/// What the previous significant token was, for context-dependent words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Nothing,
    /// `->` or `?->`
    MemberAccess,
    /// `::`
    DoubleColon,
    /// `function`
    Function,
    Other,
}

/// Multi-character operators, longest first
const OPERATORS: &[(&str, &str)] = &[
    ("<=>", "T_SPACESHIP"),
    ("**=", "T_POW_EQUAL"),
    ("...", "T_ELLIPSIS"),
    ("<<=", "T_SL_EQUAL"),
    (">>=", "T_SR_EQUAL"),
    ("===", "T_IS_IDENTICAL"),
    ("!==", "T_IS_NOT_IDENTICAL"),
    ("??=", "T_COALESCE_EQUAL"),
    ("?->", "T_NULLSAFE_OBJECT_OPERATOR"),
    ("**", "T_POW"),
    ("::", "T_DOUBLE_COLON"),
    ("->", "T_OBJECT_OPERATOR"),
    ("=>", "T_DOUBLE_ARROW"),
    ("++", "T_INC"),
    ("--", "T_DEC"),
    ("==", "T_IS_EQUAL"),
    ("!=", "T_IS_NOT_EQUAL"),
    ("<>", "T_IS_NOT_EQUAL"),
    ("<=", "T_IS_SMALLER_OR_EQUAL"),
    (">=", "T_IS_GREATER_OR_EQUAL"),
    ("&&", "T_BOOLEAN_AND"),
    ("||", "T_BOOLEAN_OR"),
    ("??", "T_COALESCE"),
    ("+=", "T_PLUS_EQUAL"),
    ("-=", "T_MINUS_EQUAL"),
    ("*=", "T_MUL_EQUAL"),
    ("/=", "T_DIV_EQUAL"),
    (".=", "T_CONCAT_EQUAL"),
    ("%=", "T_MOD_EQUAL"),
    ("&=", "T_AND_EQUAL"),
    ("|=", "T_OR_EQUAL"),
    ("^=", "T_XOR_EQUAL"),
    ("<<", "T_SL"),
    (">>", "T_SR"),
];

/// Token name for a reserved word, matched case-insensitively
fn keyword(word: &str) -> Option<&'static str> {
    let name = match word.to_ascii_lowercase().as_str() {
        "abstract" => "T_ABSTRACT",
        "and" => "T_LOGICAL_AND",
        "array" => "T_ARRAY",
        "as" => "T_AS",
        "break" => "T_BREAK",
        "callable" => "T_CALLABLE",
        "case" => "T_CASE",
        "catch" => "T_CATCH",
        "class" => "T_CLASS",
        "clone" => "T_CLONE",
        "const" => "T_CONST",
        "continue" => "T_CONTINUE",
        "declare" => "T_DECLARE",
        "default" => "T_DEFAULT",
        "die" | "exit" => "T_EXIT",
        "do" => "T_DO",
        "echo" => "T_ECHO",
        "else" => "T_ELSE",
        "elseif" => "T_ELSEIF",
        "empty" => "T_EMPTY",
        "enddeclare" => "T_ENDDECLARE",
        "endfor" => "T_ENDFOR",
        "endforeach" => "T_ENDFOREACH",
        "endif" => "T_ENDIF",
        "endswitch" => "T_ENDSWITCH",
        "endwhile" => "T_ENDWHILE",
        "eval" => "T_EVAL",
        "extends" => "T_EXTENDS",
        "final" => "T_FINAL",
        "finally" => "T_FINALLY",
        "fn" => "T_FN",
        "for" => "T_FOR",
        "foreach" => "T_FOREACH",
        "function" => "T_FUNCTION",
        "global" => "T_GLOBAL",
        "goto" => "T_GOTO",
        "if" => "T_IF",
        "implements" => "T_IMPLEMENTS",
        "include" => "T_INCLUDE",
        "include_once" => "T_INCLUDE_ONCE",
        "instanceof" => "T_INSTANCEOF",
        "insteadof" => "T_INSTEADOF",
        "interface" => "T_INTERFACE",
        "isset" => "T_ISSET",
        "list" => "T_LIST",
        "match" => "T_MATCH",
        "namespace" => "T_NAMESPACE",
        "new" => "T_NEW",
        "or" => "T_LOGICAL_OR",
        "print" => "T_PRINT",
        "private" => "T_PRIVATE",
        "protected" => "T_PROTECTED",
        "public" => "T_PUBLIC",
        "readonly" => "T_READONLY",
        "require" => "T_REQUIRE",
        "require_once" => "T_REQUIRE_ONCE",
        "return" => "T_RETURN",
        "static" => "T_STATIC",
        "switch" => "T_SWITCH",
        "throw" => "T_THROW",
        "trait" => "T_TRAIT",
        "try" => "T_TRY",
        "unset" => "T_UNSET",
        "use" => "T_USE",
        "var" => "T_VAR",
        "while" => "T_WHILE",
        "xor" => "T_LOGICAL_XOR",
        "yield" => "T_YIELD",
        "__halt_compiler" => "T_HALT_COMPILER",
        "__class__" => "T_CLASS_C",
        "__dir__" => "T_DIR",
        "__file__" => "T_FILE",
        "__function__" => "T_FUNC_C",
        "__line__" => "T_LINE",
        "__method__" => "T_METHOD_C",
        "__namespace__" => "T_NS_C",
        "__trait__" => "T_TRAIT_C",
        _ => return None,
    };
    Some(name)
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_char(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

fn is_php_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<RawToken>,
    prev: Prev,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
            prev: Prev::Nothing,
        }
    }

    fn run(mut self) -> Vec<RawToken> {
        while self.pos < self.bytes.len() {
            self.lex_inline_html();
            self.lex_php();
        }
        self.tokens
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Emit `src[start..self.pos]` under `name`
    fn emit(&mut self, name: &'static str, start: usize) {
        let text = &self.src[start..self.pos];
        self.tokens.push(RawToken::named(name, text));
    }

    /// Text outside PHP tags, up to and including the next open tag
    fn lex_inline_html(&mut self) {
        let start = self.pos;
        let mut tag_at = None;

        let mut i = self.pos;
        while let Some(offset) = self.src[i..].find("<?") {
            let at = i + offset;
            let after = &self.bytes[at + 2..];
            if after.first() == Some(&b'=') {
                tag_at = Some((at, 3, "T_OPEN_TAG_WITH_ECHO"));
                break;
            }
            if after.len() >= 3
                && after[..3].eq_ignore_ascii_case(b"php")
                && after.get(3).map_or(true, |&b| is_php_whitespace(b))
            {
                let mut len = 5;
                // The open tag swallows one line break or blank
                match after.get(3) {
                    Some(b'\r') if after.get(4) == Some(&b'\n') => len += 2,
                    Some(_) => len += 1,
                    None => {}
                }
                tag_at = Some((at, len, "T_OPEN_TAG"));
                break;
            }
            i = at + 2;
        }

        match tag_at {
            Some((at, len, name)) => {
                if at > start {
                    self.pos = at;
                    self.emit("T_INLINE_HTML", start);
                }
                self.pos = at + len;
                self.emit(name, at);
            }
            None => {
                self.pos = self.bytes.len();
                if self.pos > start {
                    self.emit("T_INLINE_HTML", start);
                }
            }
        }
        self.prev = Prev::Nothing;
    }

    /// PHP code up to a close tag or the end of input
    fn lex_php(&mut self) {
        while let Some(b) = self.peek_at(0) {
            let start = self.pos;

            if b == b'?' && self.peek_at(1) == Some(b'>') {
                self.pos += 2;
                match (self.peek_at(0), self.peek_at(1)) {
                    (Some(b'\r'), Some(b'\n')) => self.pos += 2,
                    (Some(b'\n'), _) => self.pos += 1,
                    _ => {}
                }
                self.emit("T_CLOSE_TAG", start);
                return;
            }

            if is_php_whitespace(b) {
                while self.peek_at(0).is_some_and(is_php_whitespace) {
                    self.pos += 1;
                }
                self.emit("T_WHITESPACE", start);
                continue;
            }

            if b == b'<' && self.rest().starts_with("<<<") && self.lex_heredoc() {
                self.prev = Prev::Other;
                continue;
            }

            match b {
                b'#' if self.peek_at(1) == Some(b'[') => {
                    self.pos += 2;
                    self.emit("T_ATTRIBUTE", start);
                    self.prev = Prev::Other;
                }
                b'#' => self.lex_line_comment(),
                b'/' if self.peek_at(1) == Some(b'/') => self.lex_line_comment(),
                b'/' if self.peek_at(1) == Some(b'*') => self.lex_block_comment(),
                b'$' if self.peek_at(1).is_some_and(is_ident_start) => {
                    self.pos += 1;
                    self.consume_ident_chars();
                    self.emit("T_VARIABLE", start);
                    self.prev = Prev::Other;
                }
                b'\'' | b'"' => {
                    self.lex_quoted(b);
                    self.prev = Prev::Other;
                }
                b'`' => {
                    self.lex_backtick();
                    self.prev = Prev::Other;
                }
                b'0'..=b'9' => {
                    self.lex_number();
                    self.prev = Prev::Other;
                }
                b'.' if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => {
                    self.lex_number();
                    self.prev = Prev::Other;
                }
                b'\\' if self.peek_at(1).is_some_and(is_ident_start) => {
                    self.lex_name();
                }
                b'\\' => {
                    self.pos += 1;
                    self.emit("T_NS_SEPARATOR", start);
                    self.prev = Prev::Other;
                }
                _ if is_ident_start(b) => {
                    if self.lex_name() {
                        self.lex_after_halt();
                        return;
                    }
                }
                _ => self.lex_operator(),
            }
        }
    }

    fn consume_ident_chars(&mut self) {
        while self.peek_at(0).is_some_and(is_ident_char) {
            self.pos += 1;
        }
    }

    /// `//` and `#` comments, ending before the line break or a close tag
    fn lex_line_comment(&mut self) {
        let start = self.pos;
        while let Some(b) = self.peek_at(0) {
            if b == b'\n' || b == b'\r' || (b == b'?' && self.peek_at(1) == Some(b'>')) {
                break;
            }
            self.pos += 1;
        }
        self.emit("T_COMMENT", start);
    }

    fn lex_block_comment(&mut self) {
        let start = self.pos;
        let is_doc = self.rest().starts_with("/**")
            && self.peek_at(3).is_some_and(is_php_whitespace);

        self.pos = match self.src[start + 2..].find("*/") {
            Some(offset) => start + 2 + offset + 2,
            None => self.bytes.len(),
        };

        self.emit(if is_doc { "T_DOC_COMMENT" } else { "T_COMMENT" }, start);
    }

    fn lex_quoted(&mut self, quote: u8) {
        let start = self.pos;
        self.pos += 1;
        while let Some(b) = self.peek_at(0) {
            self.pos += 1;
            if b == b'\\' {
                if self.peek_at(0).is_some() {
                    self.pos += 1;
                }
            } else if b == quote {
                break;
            }
        }
        self.emit("T_CONSTANT_ENCAPSED_STRING", start);
    }

    fn lex_backtick(&mut self) {
        self.tokens.push(RawToken::Char('`'));
        self.pos += 1;
        let start = self.pos;
        while let Some(b) = self.peek_at(0) {
            if b == b'`' {
                break;
            }
            self.pos += if b == b'\\' { 2 } else { 1 };
        }
        self.pos = self.pos.min(self.bytes.len());
        if self.pos > start {
            self.emit("T_ENCAPSED_AND_WHITESPACE", start);
        }
        if self.peek_at(0) == Some(b'`') {
            self.tokens.push(RawToken::Char('`'));
            self.pos += 1;
        }
    }

    /// Heredoc and nowdoc. Returns false when `<<<` does not open one.
    fn lex_heredoc(&mut self) -> bool {
        let start = self.pos;
        let mut i = start + 3;
        while matches!(self.bytes.get(i), Some(b' ' | b'\t')) {
            i += 1;
        }
        let quote = match self.bytes.get(i) {
            Some(&q @ (b'\'' | b'"')) => {
                i += 1;
                Some(q)
            }
            _ => None,
        };
        let label_start = i;
        if !self.bytes.get(i).copied().is_some_and(is_ident_start) {
            return false;
        }
        while self.bytes.get(i).copied().is_some_and(is_ident_char) {
            i += 1;
        }
        let label = &self.src[label_start..i];
        if let Some(q) = quote {
            if self.bytes.get(i) != Some(&q) {
                return false;
            }
            i += 1;
        }
        match self.bytes.get(i) {
            Some(b'\n') => i += 1,
            Some(b'\r') if self.bytes.get(i + 1) == Some(&b'\n') => i += 2,
            _ => return false,
        }

        self.pos = i;
        self.emit("T_START_HEREDOC", start);

        let body_start = self.pos;
        let mut line_start = body_start;
        let closing = loop {
            if line_start >= self.bytes.len() {
                break None;
            }
            let mut j = line_start;
            while matches!(self.bytes.get(j), Some(b' ' | b'\t')) {
                j += 1;
            }
            let after = j + label.len();
            if self.src[j..].starts_with(label)
                && !self.bytes.get(after).copied().is_some_and(is_ident_char)
            {
                break Some(j);
            }
            match self.src[line_start..].find('\n') {
                Some(offset) => line_start += offset + 1,
                None => break None,
            }
        };

        match closing {
            Some(label_at) => {
                if label_at > body_start {
                    self.pos = label_at;
                    self.emit("T_ENCAPSED_AND_WHITESPACE", body_start);
                }
                self.pos = label_at + label.len();
                self.emit("T_END_HEREDOC", label_at);
            }
            None => {
                self.pos = self.bytes.len();
                if self.pos > body_start {
                    self.emit("T_ENCAPSED_AND_WHITESPACE", body_start);
                }
            }
        }
        true
    }

    fn lex_number(&mut self) {
        let start = self.pos;
        let mut is_float = false;

        if self.peek_at(0) == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O')) {
            self.pos += 2;
            while self.peek_at(0).is_some_and(|b| b.is_ascii_hexdigit() || b == b'_') {
                self.pos += 1;
            }
            self.emit("T_LNUMBER", start);
            return;
        }

        while self.peek_at(0).is_some_and(|b| b.is_ascii_digit() || b == b'_') {
            self.pos += 1;
        }
        if self.peek_at(0) == Some(b'.') && self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
            is_float = true;
            self.pos += 1;
            while self.peek_at(0).is_some_and(|b| b.is_ascii_digit() || b == b'_') {
                self.pos += 1;
            }
        } else if self.peek_at(0) == Some(b'.') && !self.peek_at(1).is_some_and(|b| b == b'.' || b == b'=') {
            // `1.` is a float, `1..` and `1.=` are not
            is_float = true;
            self.pos += 1;
        }
        if matches!(self.peek_at(0), Some(b'e' | b'E')) {
            let digits_at = if matches!(self.peek_at(1), Some(b'+' | b'-')) { 2 } else { 1 };
            if self.peek_at(digits_at).is_some_and(|b| b.is_ascii_digit()) {
                is_float = true;
                self.pos += digits_at;
                while self.peek_at(0).is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }

        self.emit(if is_float { "T_DNUMBER" } else { "T_LNUMBER" }, start);
    }

    /// Identifiers, keywords and qualified names.
    ///
    /// Returns true when the word was `__halt_compiler`.
    fn lex_name(&mut self) -> bool {
        let start = self.pos;
        let fully_qualified = self.peek_at(0) == Some(b'\\');
        if fully_qualified {
            self.pos += 1;
        }
        self.consume_ident_chars();
        let first_end = self.pos;

        while self.peek_at(0) == Some(b'\\') && self.peek_at(1).is_some_and(is_ident_start) {
            self.pos += 1;
            self.consume_ident_chars();
        }

        let text = &self.src[start..self.pos];
        let prev = self.prev;
        self.prev = Prev::Other;

        if fully_qualified {
            self.emit("T_NAME_FULLY_QUALIFIED", start);
            return false;
        }
        if self.pos > first_end {
            let first = &self.src[start..first_end];
            let name = if first.eq_ignore_ascii_case("namespace") {
                "T_NAME_RELATIVE"
            } else {
                "T_NAME_QUALIFIED"
            };
            self.emit(name, start);
            return false;
        }

        // Member and method names are plain identifiers even when reserved
        let contextual = match prev {
            Prev::MemberAccess | Prev::Function => true,
            Prev::DoubleColon => !text.eq_ignore_ascii_case("class"),
            Prev::Nothing | Prev::Other => false,
        };

        if !contextual && text.eq_ignore_ascii_case("enum") && self.at_enum_name() {
            self.emit("T_ENUM", start);
            return false;
        }

        match keyword(text).filter(|_| !contextual) {
            Some(name) => {
                self.emit(name, start);
                if name == "T_FUNCTION" {
                    self.prev = Prev::Function;
                }
                name == "T_HALT_COMPILER"
            }
            None => {
                self.emit("T_STRING", start);
                false
            }
        }
    }

    /// `enum` is only a keyword when whitespace and a declared name follow
    fn at_enum_name(&self) -> bool {
        let rest = self.rest();
        let name = rest.trim_start_matches(|c: char| c.is_ascii() && is_php_whitespace(c as u8));
        if name.len() == rest.len() || !name.bytes().next().is_some_and(is_ident_start) {
            return false;
        }

        let word = name
            .split(|c: char| c.is_ascii() && !is_ident_char(c as u8))
            .next()
            .unwrap_or_default();
        !word.eq_ignore_ascii_case("extends") && !word.eq_ignore_ascii_case("implements")
    }

    /// Everything after `__halt_compiler` is opaque data
    fn lex_after_halt(&mut self) {
        let start = self.pos;
        self.pos = self.bytes.len();
        if self.pos > start {
            self.emit("T_INLINE_HTML", start);
        }
    }

    fn lex_operator(&mut self) {
        let start = self.pos;
        for (op, name) in OPERATORS {
            if self.rest().starts_with(op) {
                self.pos += op.len();
                self.emit(name, start);
                self.prev = match *name {
                    "T_OBJECT_OPERATOR" | "T_NULLSAFE_OBJECT_OPERATOR" => Prev::MemberAccess,
                    "T_DOUBLE_COLON" => Prev::DoubleColon,
                    _ => Prev::Other,
                };
                return;
            }
        }

        let ch = self.rest().chars().next().unwrap_or('\0');
        self.pos += ch.len_utf8().max(1);
        self.tokens.push(RawToken::Char(ch));
        // `function &name()` keeps the method-name context
        if !(ch == '&' && self.prev == Prev::Function) {
            self.prev = Prev::Other;
        }
    }
}
