// src/error.rs
use thiserror::Error;

/// Everything that can go wrong while resolving or loading a font
///
/// Missing candidates and malformed names are recovered inside the engine
/// and only show up here when a helper is called directly.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Invalid font request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Malformed font resource name: {name}")]
    MalformedResourceName { name: String },

    #[error("Failed to load font {name}: {reason}")]
    LoadFailure { name: String, reason: String },

    #[error("No usable font available on this system")]
    NoFontsAvailable,

    // Lifecycle errors
    #[error("Font engine used after shutdown")]
    ShutDown,

    #[error("Font engine shut down twice")]
    AlreadyShutDown,

    #[error("Font engine lock poisoned: {message}")]
    LockPoisoned { message: String },

    #[error("Invalid configuration: {field} = {value}")]
    Config { field: String, value: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type FontResult<T> = Result<T, FontError>;
