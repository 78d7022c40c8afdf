//! Container symbols: classes, traits and interfaces

use phpscope_core::TokenKind;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::function_info::FunctionSymbol;

/// Kind of a container declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Class,
    Trait,
    Interface,
}

impl ContainerKind {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Class => Some(ContainerKind::Class),
            TokenKind::Trait => Some(ContainerKind::Trait),
            TokenKind::Interface => Some(ContainerKind::Interface),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Class => "class",
            ContainerKind::Trait => "trait",
            ContainerKind::Interface => "interface",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration modifier keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Abstract,
    Final,
    Static,
}

impl Modifier {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Abstract => Some(Modifier::Abstract),
            TokenKind::Final => Some(Modifier::Final),
            TokenKind::Static => Some(Modifier::Static),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Abstract => "abstract",
            Modifier::Final => "final",
            Modifier::Static => "static",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package identity of a container.
///
/// Every field is always populated; an absent tag is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub namespace: String,
    pub category: String,
    pub package: String,
    pub subpackage: String,
    pub full_package: String,
}

/// A class, trait or interface declared in a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSymbol {
    /// Declared (short) name
    pub name: String,
    pub kind: ContainerKind,
    /// Qualified name after `extends`
    pub parent: Option<String>,
    /// Names after `implements`; `None` when there is no such clause
    pub interfaces: Option<Vec<String>>,
    pub modifiers: BTreeSet<Modifier>,
    pub docblock: Option<String>,
    pub start_line: usize,
    pub end_line: usize,
    pub package: Package,
    /// Methods keyed by declared name
    pub methods: BTreeMap<String, FunctionSymbol>,
}

impl ClassSymbol {
    pub fn new(name: impl Into<String>, kind: ContainerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            interfaces: None,
            modifiers: BTreeSet::new(),
            docblock: None,
            start_line: 0,
            end_line: 0,
            package: Package::default(),
            methods: BTreeMap::new(),
        }
    }

    /// Name prefixed with the declaring namespace, if any
    pub fn qualified_name(&self) -> String {
        if self.package.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}\\{}", self.package.namespace, self.name)
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&Modifier::Abstract)
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.contains(&Modifier::Final)
    }

    /// Add a method, replacing an earlier one with the same name
    pub fn add_method(&mut self, method: FunctionSymbol) {
        if let Some(name) = method.name.named_str() {
            self.methods.insert(name.to_string(), method);
        }
    }

    /// Look up a method (case-insensitive, like PHP)
    pub fn get_method(&self, name: &str) -> Option<&FunctionSymbol> {
        self.methods.get(name).or_else(|| {
            self.methods
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, method)| method)
        })
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.get_method(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::function_info::FunctionName;

    #[test]
    fn test_qualified_name() {
        let mut class = ClassSymbol::new("Bar", ContainerKind::Class);
        assert_eq!(class.qualified_name(), "Bar");

        class.package.namespace = "Foo".to_string();
        assert_eq!(class.qualified_name(), "Foo\\Bar");
    }

    #[test]
    fn test_method_lookup_and_replacement() {
        let mut class = ClassSymbol::new("Bar", ContainerKind::Class);

        let mut first = FunctionSymbol::new(FunctionName::named("doThing"));
        first.start_line = 3;
        class.add_method(first);

        let mut second = FunctionSymbol::new(FunctionName::named("doThing"));
        second.start_line = 9;
        class.add_method(second);

        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.get_method("doThing").map(|m| m.start_line), Some(9));
        assert!(class.has_method("DOTHING"));
        assert!(!class.has_method("other"));
    }

    #[test]
    fn test_anonymous_methods_are_not_filed() {
        let mut class = ClassSymbol::new("Bar", ContainerKind::Class);
        class.add_method(FunctionSymbol::new(FunctionName::Anonymous));
        assert!(class.methods.is_empty());
    }

    #[test]
    fn test_modifiers_serialize_sorted() {
        let mut class = ClassSymbol::new("Bar", ContainerKind::Class);
        class.modifiers.insert(Modifier::Final);
        class.modifiers.insert(Modifier::Abstract);

        let json = serde_json::to_value(&class).unwrap();
        assert_eq!(json["modifiers"], serde_json::json!(["abstract", "final"]));
        assert_eq!(json["kind"], "class");
        assert_eq!(json["package"]["fullPackage"], "");
    }
}
