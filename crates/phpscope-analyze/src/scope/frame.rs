//! A single open scope

use crate::symbols::ContainerKind;

/// What kind of declaration opened a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Container(ContainerKind),
    Function,
}

/// An open scope with its resolved end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    pub kind: FrameKind,
    /// Declared name; empty for anonymous functions
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    /// Index of the token that closes this scope
    pub end_index: usize,
}

impl ScopeFrame {
    pub fn container(
        kind: ContainerKind,
        name: impl Into<String>,
        start_line: usize,
        end_line: usize,
        end_index: usize,
    ) -> Self {
        Self {
            kind: FrameKind::Container(kind),
            name: name.into(),
            start_line,
            end_line,
            end_index,
        }
    }

    pub fn function(
        name: impl Into<String>,
        start_line: usize,
        end_line: usize,
        end_index: usize,
    ) -> Self {
        Self {
            kind: FrameKind::Function,
            name: name.into(),
            start_line,
            end_line,
            end_index,
        }
    }

    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self.kind {
            FrameKind::Container(kind) => Some(kind),
            FrameKind::Function => None,
        }
    }
}
