//! Per-file symbol table
//!
//! The result of one analysis pass: every filed container and free function,
//! plus the file's line-of-code counters. Maps are ordered by key so the same
//! input always serializes the same way.

use serde::Serialize;
use std::collections::BTreeMap;

use super::class_info::{ClassSymbol, ContainerKind};
use super::function_info::FunctionSymbol;

/// Line-of-code counters for one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinesOfCode {
    /// Total lines
    pub loc: usize,
    /// Comment lines
    pub cloc: usize,
    /// Non-comment lines
    pub ncloc: usize,
}

impl LinesOfCode {
    /// Counters from a total and a comment count; the comment count is capped
    /// at the total so `ncloc + cloc == loc` always holds.
    pub fn new(loc: usize, cloc: usize) -> Self {
        let cloc = cloc.min(loc);
        Self {
            loc,
            cloc,
            ncloc: loc - cloc,
        }
    }
}

/// Symbols and counters of one analyzed file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    classes: BTreeMap<String, ClassSymbol>,
    traits: BTreeMap<String, ClassSymbol>,
    interfaces: BTreeMap<String, ClassSymbol>,
    /// Free functions keyed by namespace-qualified name
    functions: BTreeMap<String, FunctionSymbol>,
    lines_of_code: LinesOfCode,
}

impl FileAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> &BTreeMap<String, ClassSymbol> {
        &self.classes
    }

    pub fn traits(&self) -> &BTreeMap<String, ClassSymbol> {
        &self.traits
    }

    pub fn interfaces(&self) -> &BTreeMap<String, ClassSymbol> {
        &self.interfaces
    }

    pub fn functions(&self) -> &BTreeMap<String, FunctionSymbol> {
        &self.functions
    }

    pub fn lines_of_code(&self) -> LinesOfCode {
        self.lines_of_code
    }

    /// Look up a container of any kind by declared name
    pub fn container(&self, name: &str) -> Option<&ClassSymbol> {
        self.classes
            .get(name)
            .or_else(|| self.traits.get(name))
            .or_else(|| self.interfaces.get(name))
    }

    /// Look up a method by `Container::method`
    pub fn method(&self, qualified: &str) -> Option<&FunctionSymbol> {
        let (container, method) = qualified.split_once("::")?;
        self.container(container)?.get_method(method)
    }

    /// All containers, classes first, then traits, then interfaces
    pub fn containers(&self) -> impl Iterator<Item = &ClassSymbol> {
        self.classes
            .values()
            .chain(self.traits.values())
            .chain(self.interfaces.values())
    }

    /// Every method and free function in the file
    pub fn all_functions(&self) -> impl Iterator<Item = &FunctionSymbol> {
        self.containers()
            .flat_map(|container| container.methods.values())
            .chain(self.functions.values())
    }

    /// Total number of filed containers and free functions
    pub fn symbol_count(&self) -> usize {
        self.classes.len() + self.traits.len() + self.interfaces.len() + self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_count() == 0
    }

    fn map_for(&mut self, kind: ContainerKind) -> &mut BTreeMap<String, ClassSymbol> {
        match kind {
            ContainerKind::Class => &mut self.classes,
            ContainerKind::Trait => &mut self.traits,
            ContainerKind::Interface => &mut self.interfaces,
        }
    }

    /// File a container by declared name, replacing an earlier one
    pub(crate) fn insert_container(&mut self, symbol: ClassSymbol) {
        let kind = symbol.kind;
        self.map_for(kind).insert(symbol.name.clone(), symbol);
    }

    pub(crate) fn container_mut(
        &mut self,
        kind: ContainerKind,
        name: &str,
    ) -> Option<&mut ClassSymbol> {
        self.map_for(kind).get_mut(name)
    }

    pub(crate) fn insert_function(&mut self, key: String, symbol: FunctionSymbol) {
        self.functions.insert(key, symbol);
    }

    pub(crate) fn set_lines_of_code(&mut self, lines: LinesOfCode) {
        self.lines_of_code = lines;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::function_info::FunctionName;

    fn sample() -> FileAnalysis {
        let mut analysis = FileAnalysis::new();

        let mut class = ClassSymbol::new("Bar", ContainerKind::Class);
        class.add_method(FunctionSymbol::new(FunctionName::named("baz")));
        analysis.insert_container(class);
        analysis.insert_container(ClassSymbol::new("Loggable", ContainerKind::Trait));
        analysis.insert_function(
            "Foo\\helper".to_string(),
            FunctionSymbol::new(FunctionName::named("helper")),
        );

        analysis
    }

    #[test]
    fn test_lines_of_code_cap() {
        assert_eq!(LinesOfCode::new(10, 4), LinesOfCode { loc: 10, cloc: 4, ncloc: 6 });
        assert_eq!(LinesOfCode::new(3, 7), LinesOfCode { loc: 3, cloc: 3, ncloc: 0 });
    }

    #[test]
    fn test_method_lookup() {
        let analysis = sample();
        assert!(analysis.method("Bar::baz").is_some());
        assert!(analysis.method("Bar::missing").is_none());
        assert!(analysis.method("Missing::baz").is_none());
        assert!(analysis.method("baz").is_none());
    }

    #[test]
    fn test_counts() {
        let analysis = sample();
        assert_eq!(analysis.symbol_count(), 3);
        assert_eq!(analysis.all_functions().count(), 2);
        assert_eq!(analysis.container("Loggable").map(|c| c.kind), Some(ContainerKind::Trait));
    }

    #[test]
    fn test_serialize_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json["classes"]["Bar"]["methods"]["baz"].is_object());
        assert!(json["functions"]["Foo\\helper"].is_object());
        assert_eq!(json["linesOfCode"]["ncloc"], 0);
    }
}
