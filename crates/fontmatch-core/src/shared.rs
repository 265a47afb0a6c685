//! Thread-safe handle to a font engine
//!
//! One mutex covers the whole engine, so the cache and the substitution
//! table are always observed together.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::EngineConfig;
use crate::engine::{FontEngine, ResolvedName};
use crate::error::{FontError, FontResult};
use crate::font::{CacheStats, FontInfo};
use crate::request::FontRequest;
use crate::traits::NativeFontSystem;

pub struct SharedFontEngine<S: NativeFontSystem> {
    inner: Arc<Mutex<FontEngine<S>>>,
}

impl<S: NativeFontSystem> Clone for SharedFontEngine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: NativeFontSystem> SharedFontEngine<S> {
    pub fn new(system: S, config: EngineConfig) -> FontResult<Self> {
        Ok(Self::from_engine(FontEngine::new(system, config)?))
    }

    pub fn from_engine(engine: FontEngine<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> FontResult<MutexGuard<'_, FontEngine<S>>> {
        self.inner.lock().map_err(|err| FontError::LockPoisoned {
            message: err.to_string(),
        })
    }

    /// Run `f` with exclusive access to the engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut FontEngine<S>) -> FontResult<R>) -> FontResult<R> {
        let mut engine = self.lock()?;
        f(&mut engine)
    }

    pub fn resolve_name(&self, request: &FontRequest) -> FontResult<ResolvedName> {
        self.lock()?.resolve_name(request)
    }

    /// Load the resource for `request` and report what it delivers
    pub fn font_info(&self, request: &FontRequest) -> FontResult<FontInfo> {
        self.lock()?.font_info(request)
    }

    pub fn insert_substitution(&self, family: &str, replacement: &str) -> FontResult<()> {
        self.lock()?.insert_substitution(family, replacement)
    }

    pub fn remove_substitution(&self, family: &str) -> FontResult<bool> {
        self.lock()?.remove_substitution(family)
    }

    pub fn substitute(&self, family: &str) -> FontResult<String> {
        Ok(self.lock()?.substitute(family))
    }

    pub fn cache_stats(&self) -> FontResult<CacheStats> {
        Ok(self.lock()?.cache_stats())
    }

    pub fn shutdown(&self) -> FontResult<()> {
        self.lock()?.shutdown()
    }
}
