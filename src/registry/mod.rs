//! Command registry and name resolution.
//!
//! The [`Registry`] aggregates descriptors from every loader, tracks aliases
//! and namespaces, resolves names to constructors and suggests close matches
//! when a lookup misses.

pub mod resolver;
pub mod suggest;

pub use resolver::Registry;
pub use suggest::{similarity, SUGGESTION_THRESHOLD};
