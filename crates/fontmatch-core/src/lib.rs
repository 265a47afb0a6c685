//! fontmatch core - backend-agnostic font request matching
//!
//! Resolves an abstract font request to a concrete, loadable resource of a
//! native font system, and keeps loaded resources in a cost-bounded cache.

pub mod config;
pub mod constants;
pub mod dummy_backend;
pub mod engine;
pub mod error;
pub mod font;
pub mod request;
pub mod shared;
pub mod traits;

// Re-export main types
pub use config::EngineConfig;
pub use dummy_backend::DummyFontSystem;
pub use engine::{FontEngine, ResolvedName};
pub use error::{FontError, FontResult};
pub use font::{BestMatch, CacheStats, CachedFontResource, FontInfo, MatchResult, SubstitutionTable};
pub use request::{CharSet, FontRequest, StyleHint, Weight};
pub use shared::SharedFontEngine;

// Re-export traits and types
pub use traits::*;
