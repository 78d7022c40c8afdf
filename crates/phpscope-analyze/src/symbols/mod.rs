//! Symbol model produced by a single file pass
//!
//! Containers (classes, traits, interfaces), functions and methods, and the
//! per-file table that files them by name.

pub mod class_info;
pub mod function_info;
pub mod symbol_table;

pub use class_info::{ClassSymbol, ContainerKind, Modifier, Package};
pub use function_info::{FunctionName, FunctionSymbol, Visibility};
pub use symbol_table::{FileAnalysis, LinesOfCode};
