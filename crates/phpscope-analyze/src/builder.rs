//! Symbol table builder
//!
//! One forward pass over a classified token list. Declaration keywords are
//! handed to the extractors, the scope tracker decides where functions are
//! filed, and comment tokens feed the comment line counter.

use phpscope_core::{Cursor, Token, TokenKind};
use std::path::Path;

use crate::extract::{self, ScopeEnd};
use crate::loc;
use crate::logging;
use crate::scope::{ScopeFrame, ScopeTracker};
use crate::symbols::{ClassSymbol, ContainerKind, FileAnalysis, FunctionSymbol};

pub struct SymbolTableBuilder<'t> {
    tokens: &'t [Token],
    path: Option<&'t Path>,
    tracker: ScopeTracker,
    analysis: FileAnalysis,
    cloc: usize,
    halt_line: Option<usize>,
}

impl<'t> SymbolTableBuilder<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            path: None,
            tracker: ScopeTracker::new(),
            analysis: FileAnalysis::new(),
            cloc: 0,
            halt_line: None,
        }
    }

    /// Attach the path of the analyzed file, used in log messages
    pub fn with_path(mut self, path: &'t Path) -> Self {
        self.path = Some(path);
        self
    }

    /// Run the pass and produce the file's symbol table
    pub fn build(mut self) -> FileAnalysis {
        let tokens = self.tokens;

        for (index, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::HaltCompiler => {
                    logging::log_halt(token.line);
                    self.halt_line = Some(token.line);
                    break;
                }
                TokenKind::Class | TokenKind::Trait | TokenKind::Interface => {
                    self.on_container(index, token)
                }
                TokenKind::Enum => self.on_enum(index, token),
                TokenKind::Function => self.on_function(index, token),
                TokenKind::Comment | TokenKind::DocComment => {
                    self.cloc += loc::comment_lines(&token.text)
                }
                _ => {}
            }

            for frame in self.tracker.close_at(index).into_iter().flatten() {
                logging::log_scope_close(&frame.name, frame.end_line);
            }
        }

        let lines = loc::account(tokens, self.cloc, self.halt_line);
        self.analysis.set_lines_of_code(lines);
        self.analysis
    }

    fn on_container(&mut self, index: usize, token: &Token) {
        let Some(kind) = ContainerKind::from_token(token.kind) else {
            return;
        };

        // `Foo::class`
        if self.previous_is(index, TokenKind::DoubleColon) {
            return;
        }

        let end = extract::scope_end(self.tokens, index);
        let end_index = end.index_or(index);

        let Some((name, name_index)) = extract::container_name(self.tokens, index) else {
            self.tracker.mask_until(end_index);
            return;
        };

        if end == ScopeEnd::Unbalanced {
            logging::log_unbalanced_scope(self.path, kind.as_str(), &name, token.line);
        }

        let namespace = extract::namespace(self.tokens, index);
        let docblock = extract::docblock(self.tokens, index);

        let mut symbol = ClassSymbol::new(name.clone(), kind);
        symbol.parent = extract::parent(self.tokens, name_index);
        symbol.interfaces = extract::interfaces(self.tokens, name_index);
        symbol.modifiers = extract::modifiers(self.tokens, index);
        symbol.package = extract::package(&namespace, &name, docblock.as_deref());
        symbol.docblock = docblock;
        symbol.start_line = token.line;
        symbol.end_line = self.line_of(end_index, token);

        let frame = ScopeFrame::container(kind, name, symbol.start_line, symbol.end_line, end_index);
        self.analysis.insert_container(symbol);

        if self.tracker.open_container(frame.clone()) {
            logging::log_scope_open(kind.as_str(), &frame.name, frame.start_line, frame.end_line);
        }
    }

    /// Enums are not containers; their methods are kept out of the free
    /// functions by masking the body.
    fn on_enum(&mut self, index: usize, token: &Token) {
        let end = extract::scope_end(self.tokens, index);
        if end == ScopeEnd::Unbalanced {
            let name = extract::container_name(self.tokens, index)
                .map(|(name, _)| name)
                .unwrap_or_default();
            logging::log_unbalanced_scope(self.path, "enum", &name, token.line);
        }
        self.tracker.mask_until(end.index_or(index));
    }

    fn on_function(&mut self, index: usize, token: &Token) {
        // `use function Foo\bar;`
        if self.previous_is(index, TokenKind::Use) {
            return;
        }

        let (name, name_index) = extract::function_name(self.tokens, index);
        let end = extract::scope_end(self.tokens, index);
        let end_index = end.index_or(index);

        if end == ScopeEnd::Unbalanced {
            logging::log_unbalanced_scope(self.path, "function", name.as_str(), token.line);
        }

        let mut symbol = FunctionSymbol::new(name);
        symbol.docblock = extract::docblock(self.tokens, index);
        symbol.modifiers = extract::modifiers(self.tokens, index);
        symbol.visibility = extract::visibility(self.tokens, index);
        symbol.signature = extract::signature(self.tokens, name_index.unwrap_or(index));
        symbol.start_line = token.line;
        symbol.end_line = self.line_of(end_index, token);
        symbol.complexity = extract::complexity(self.tokens, index, end_index);

        let frame = ScopeFrame::function(
            symbol.name.named_str().unwrap_or_default(),
            symbol.start_line,
            symbol.end_line,
            end_index,
        );
        if self.tracker.open_function(frame) {
            logging::log_scope_open(
                "function",
                symbol.name.as_str(),
                symbol.start_line,
                symbol.end_line,
            );
        }

        self.file_function(index, symbol);
    }

    /// File a function under the active container, or as a free function
    fn file_function(&mut self, index: usize, symbol: FunctionSymbol) {
        let Some(name) = symbol.name.named_str() else {
            return;
        };
        if self.tracker.is_masked(index) {
            return;
        }

        match self.tracker.container() {
            Some(frame) => {
                let owner = frame
                    .container_kind()
                    .and_then(|kind| self.analysis.container_mut(kind, &frame.name));
                if let Some(owner) = owner {
                    owner.add_method(symbol);
                }
            }
            None => {
                let namespace = extract::namespace(self.tokens, index);
                let key = if namespace.is_empty() {
                    name.to_string()
                } else {
                    format!("{}\\{}", namespace, name)
                };
                self.analysis.insert_function(key, symbol);
            }
        }
    }

    fn previous_is(&self, index: usize, kind: TokenKind) -> bool {
        Cursor::at(self.tokens, index)
            .skip_whitespace_back()
            .is_some_and(|t| t.is(kind))
    }

    fn line_of(&self, index: usize, fallback: &Token) -> usize {
        self.tokens.get(index).map_or(fallback.line, |t| t.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phpscope_core::tokenize_source;

    fn build(source: &str) -> FileAnalysis {
        let tokens = tokenize_source(source).unwrap();
        SymbolTableBuilder::new(&tokens).build()
    }

    #[test]
    fn test_class_with_methods() {
        let analysis = build(
            "<?php\nclass Foo\n{\n    public function a() {}\n\n    private static function b() {}\n}\n",
        );

        let class = &analysis.classes()["Foo"];
        assert_eq!(class.start_line, 2);
        assert_eq!(class.end_line, 7);
        assert_eq!(class.methods.len(), 2);

        let b = analysis.method("Foo::b").unwrap();
        assert_eq!(b.start_line, 6);
        assert!(b.is_static());
        assert_eq!(b.visibility, Some(crate::symbols::Visibility::Private));
    }

    #[test]
    fn test_free_function_keyed_by_namespace() {
        let analysis = build("<?php\nnamespace App\\Util;\n\nfunction helper() {}\n");
        assert!(analysis.functions().contains_key("App\\Util\\helper"));
    }

    #[test]
    fn test_class_constant_fetch_is_not_a_declaration() {
        let analysis = build("<?php\n$name = Foo::class;\nclass Bar {}\n");
        assert_eq!(analysis.classes().len(), 1);
        assert!(analysis.classes().contains_key("Bar"));
    }

    #[test]
    fn test_use_function_is_not_a_declaration() {
        let analysis = build("<?php\nuse function App\\helper;\nfunction local() {}\n");
        assert_eq!(analysis.functions().keys().collect::<Vec<_>>(), vec!["local"]);
    }

    #[test]
    fn test_anonymous_functions_are_not_filed() {
        let analysis = build(
            "<?php\nclass Foo {\n    function run() {\n        return function () {};\n    }\n}\n$f = function () {};\n",
        );

        assert!(analysis.functions().is_empty());
        assert_eq!(analysis.classes()["Foo"].methods.len(), 1);
    }

    #[test]
    fn test_anonymous_class_methods_are_not_filed() {
        let analysis = build(
            "<?php\nclass Foo {\n    function make() {\n        return new class {\n            function inner() {}\n        };\n    }\n}\n",
        );

        let class = &analysis.classes()["Foo"];
        assert_eq!(class.methods.keys().collect::<Vec<_>>(), vec!["make"]);
        assert_eq!(analysis.classes().len(), 1);
    }

    #[test]
    fn test_enum_methods_are_not_free_functions() {
        let analysis = build(
            "<?php\nnamespace App;\n\nenum Suit: string\n{\n    case Hearts = 'H';\n\n    public function label(): string\n    {\n        return ucfirst($this->name);\n    }\n}\n\nfunction helper() {}\n\nclass Deck {\n    public function draw(): Suit { return Suit::Hearts; }\n}\n",
        );

        assert_eq!(analysis.functions().keys().collect::<Vec<_>>(), vec!["App\\helper"]);
        assert!(analysis.functions().values().all(|f| f.visibility.is_none()));
        assert!(analysis.container("Suit").is_none());
        assert_eq!(analysis.classes()["Deck"].methods.keys().collect::<Vec<_>>(), vec!["draw"]);
    }

    #[test]
    fn test_class_declared_inside_function() {
        let analysis = build(
            "<?php\nfunction outer() {\n    class Inner {\n        function m() {}\n    }\n}\nfunction after() {}\n",
        );

        assert!(analysis.classes()["Inner"].has_method("m"));
        assert!(analysis.functions().contains_key("outer"));
        assert!(analysis.functions().contains_key("after"));
    }

    #[test]
    fn test_nested_container_does_not_capture_methods() {
        let analysis = build(
            "<?php\nclass Outer {\n    function make() {\n        class Inner {\n            function x() {}\n        }\n    }\n    function last() {}\n}\n",
        );

        let inner = &analysis.classes()["Inner"];
        assert_eq!(inner.start_line, 4);
        assert_eq!(inner.end_line, 6);
        assert!(inner.methods.is_empty());

        let outer = &analysis.classes()["Outer"];
        assert_eq!(outer.methods.keys().collect::<Vec<_>>(), vec!["last", "make", "x"]);
        assert_eq!(outer.end_line, 9);
    }

    #[test]
    fn test_unbalanced_scope_degrades() {
        let analysis = build("<?php\nclass Broken {\n    function f() {\n");

        let class = &analysis.classes()["Broken"];
        assert_eq!(class.start_line, class.end_line);
        assert!(class.methods.is_empty());
        assert_eq!(analysis.functions()["f"].start_line, 3);
    }

    #[test]
    fn test_comment_lines_counted_once() {
        let analysis = build("<?php\n// one\n/**\n * three\n */\nfunction f() {}\n");
        let lines = analysis.lines_of_code();

        assert_eq!(lines.cloc, 4);
        assert_eq!(lines.loc, 6);
        assert_eq!(lines.ncloc, 2);
    }

    #[test]
    fn test_halt_stops_pass() {
        let analysis = build("<?php\nclass A {}\n__halt_compiler();\nclass B {}\n");

        assert!(analysis.classes().contains_key("A"));
        assert!(!analysis.classes().contains_key("B"));
        assert_eq!(analysis.lines_of_code().loc, 3);
    }
}
