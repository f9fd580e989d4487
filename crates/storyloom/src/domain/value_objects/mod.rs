//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod flow_kind;
mod language;

pub use flow_kind::*;
pub use language::*;
