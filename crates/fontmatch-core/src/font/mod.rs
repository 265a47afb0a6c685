//! Font matching: from a request to a loadable resource name
//!
//! This module holds the pieces the engine drives in order: candidate
//! enumeration, per-candidate scoring, best-member selection, family
//! substitution and fallback chains, and the loaded-resource cache.

pub mod cache;
pub mod discovery;
pub mod fallback;
pub mod info;
pub mod score;
pub mod select;
pub mod substitution;

pub use cache::{CacheStats, CachedFontResource, FontResourceCache};
pub use discovery::CandidateEnumerator;
pub use fallback::{build_fallback_chain, FallbackStep, LastResortResource};
pub use info::FontInfo;
pub use score::{weight_from_name, MatchResult, MatchScorer, Resolution, ResolutionBaseline, EXACT_SCORE};
pub use select::{BestMatch, BestMatchSelector};
pub use substitution::SubstitutionTable;
