//! # fontmatch-xlfd
//!
//! Zero-copy parsing of X Logical Font Description names and the wildcard
//! pattern matching used when listing fonts. The crate has no knowledge of
//! font requests or scoring; that lives in `fontmatch-core`.

pub mod name;
pub mod pattern;

pub use name::{Field, XlfdError, XlfdName, FIELD_COUNT};
pub use pattern::{family_pattern, is_literal, matches};
