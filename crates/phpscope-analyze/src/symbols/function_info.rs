//! Function and method symbols

use phpscope_core::TokenKind;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

use super::class_info::Modifier;

/// Name of a function: declared, or anonymous (closures)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionName {
    Named(String),
    Anonymous,
}

impl FunctionName {
    pub fn named(name: impl Into<String>) -> Self {
        FunctionName::Named(name.into())
    }

    /// Declared name, if any
    pub fn named_str(&self) -> Option<&str> {
        match self {
            FunctionName::Named(name) => Some(name),
            FunctionName::Anonymous => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FunctionName::Named(name) => name,
            FunctionName::Anonymous => "anonymous function",
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FunctionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Public => Some(Visibility::Public),
            TokenKind::Protected => Some(Visibility::Protected),
            TokenKind::Private => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method or free function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSymbol {
    pub name: FunctionName,
    pub docblock: Option<String>,
    pub modifiers: BTreeSet<Modifier>,
    pub visibility: Option<Visibility>,
    /// Declaration text after the name, up to the body or `;`
    pub signature: String,
    pub start_line: usize,
    pub end_line: usize,
    /// Cyclomatic complexity, at least 1
    pub complexity: u32,
}

impl FunctionSymbol {
    pub fn new(name: FunctionName) -> Self {
        Self {
            name,
            docblock: None,
            modifiers: BTreeSet::new(),
            visibility: None,
            signature: String::new(),
            start_line: 0,
            end_line: 0,
            complexity: 1,
        }
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&Modifier::Abstract)
    }
}
