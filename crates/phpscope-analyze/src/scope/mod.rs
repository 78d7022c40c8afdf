//! Scope tracking for the symbol pass
//!
//! At most one container and one function scope are active at a time. The
//! tracker decides which scope a newly found function belongs to and closes
//! scopes when the pass reaches their end tokens.

pub mod frame;
pub mod tracker;

pub use frame::{FrameKind, ScopeFrame};
pub use tracker::ScopeTracker;
