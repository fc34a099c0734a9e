//! Deterministic JSON for stored records.
//!
//! Object keys follow declaration order for structs and sorted order for
//! the `BTreeMap`s in domain types, with 2-space indentation and a
//! trailing newline, so identical records produce identical files.

mod json;

pub use json::*;
