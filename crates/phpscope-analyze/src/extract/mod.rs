//! Metadata extractors
//!
//! Each extractor reads around a declaration keyword through a [`Cursor`]
//! and never moves the pass itself. Running off either end of the token
//! list yields an absent or empty result.
//!
//! [`Cursor`]: phpscope_core::Cursor

mod body;
mod declaration;
mod modifiers;
mod package;

pub use body::{complexity, scope_end, signature, ScopeEnd};
pub use declaration::{container_name, function_name, interfaces, namespace, parent};
pub use modifiers::{docblock, modifiers, visibility};
pub use package::package;
