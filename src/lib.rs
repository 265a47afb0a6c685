//! fontmatch - font request matching for X11-style font systems
//!
//! This crate ties the workspace together:
//! - `fontmatch-xlfd` parses font names and matches listing patterns
//! - `fontmatch-core` scores candidates, walks fallback chains and caches
//!   loaded resources
//! - [`config`] reads engine settings from TOML files

pub mod config;

// Re-export main types for convenience
pub use config::{load_config, parse_config_string, FileConfig};
pub use fontmatch_core::font;
pub use fontmatch_core::{
    CharSet, DummyFontSystem, EngineConfig, FontEngine, FontError, FontInfo, FontMetrics,
    FontRequest, FontResult, NativeFontSystem, ResolvedName, SharedFontEngine, StyleHint,
    SubstitutionTable, Weight,
};
pub use fontmatch_xlfd::{XlfdError, XlfdName};
