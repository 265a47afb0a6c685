//! The font engine: request in, loaded resource out
//!
//! Owns the substitution table, the resource cache and the last-resort
//! memo for one native font system. Create it at startup and shut it down
//! (or drop it) exactly once.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::error::{FontError, FontResult};
use crate::font::{
    build_fallback_chain, BestMatchSelector, CacheStats, CachedFontResource, FallbackStep,
    FontInfo, FontResourceCache, LastResortResource, SubstitutionTable,
};
use crate::request::FontRequest;
use crate::traits::NativeFontSystem;

/// Resource name chosen for a request, before loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    /// The requested family itself matched on every criterion
    pub exact: bool,
}

pub struct FontEngine<S: NativeFontSystem> {
    system: S,
    config: EngineConfig,
    selector: BestMatchSelector,
    substitutions: SubstitutionTable,
    cache: FontResourceCache,
    last_resort: LastResortResource,
    /// Request key to resolved name, least recently used dropped first
    resolutions: LruCache<String, ResolvedName>,
    shut_down: bool,
}

impl<S: NativeFontSystem> FontEngine<S> {
    pub fn new(system: S, config: EngineConfig) -> FontResult<Self> {
        config.validate()?;
        Ok(Self::build(system, config))
    }

    pub fn with_default_config(system: S) -> Self {
        Self::build(system, EngineConfig::default())
    }

    /// `config` must already be valid
    fn build(system: S, config: EngineConfig) -> Self {
        let substitutions = if config.seed_default_substitutions {
            SubstitutionTable::with_defaults()
        } else {
            SubstitutionTable::new()
        };
        let memo_capacity = NonZeroUsize::new(config.memo_capacity).unwrap_or(NonZeroUsize::MIN);

        info!(
            "Font engine started (cache budget {}, {} substitutions)",
            config.cache_budget,
            substitutions.len()
        );

        Self {
            selector: BestMatchSelector::from_config(&config),
            cache: FontResourceCache::from_config(&config),
            last_resort: LastResortResource::new(config.last_resort_candidates.iter().cloned()),
            substitutions,
            system,
            config,
            resolutions: LruCache::new(memo_capacity),
            shut_down: false,
        }
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    fn ensure_running(&self) -> FontResult<()> {
        if self.shut_down {
            Err(FontError::ShutDown)
        } else {
            Ok(())
        }
    }

    // Substitutions

    pub fn substitutions(&self) -> &SubstitutionTable {
        &self.substitutions
    }

    /// Mutable access to the table; forgets every memoized resolution
    pub fn substitutions_mut(&mut self) -> FontResult<&mut SubstitutionTable> {
        self.ensure_running()?;
        self.resolutions.clear();
        Ok(&mut self.substitutions)
    }

    pub fn insert_substitution(&mut self, family: &str, replacement: &str) -> FontResult<()> {
        debug!("Substituting {} with {}", family, replacement);
        self.substitutions_mut()?.insert(family, replacement);
        Ok(())
    }

    pub fn remove_substitution(&mut self, family: &str) -> FontResult<bool> {
        Ok(self.substitutions_mut()?.remove(family))
    }

    pub fn substitute(&self, family: &str) -> String {
        self.substitutions.substitute(family)
    }

    pub fn substitution_list(&self) -> Vec<String> {
        self.substitutions.list()
    }

    // Resolution

    /// Pick the resource name for `request` without loading it
    ///
    /// Never fails for lack of a match: the fallback chain ends at a
    /// literal resource. Only a font system with none of those fonts
    /// yields [`FontError::NoFontsAvailable`].
    pub fn resolve_name(&mut self, request: &FontRequest) -> FontResult<ResolvedName> {
        self.ensure_running()?;

        let key = request.key();
        if let Some(resolved) = self.resolutions.get(&key) {
            trace!("Resolution of {} memoized as {}", key, resolved.name);
            return Ok(resolved.clone());
        }

        let resolved = if request.raw_mode() {
            self.resolve_raw(request)?
        } else {
            self.match_request(request)?
        };

        debug!(
            "Resolved {} to {} (exact: {})",
            key, resolved.name, resolved.exact
        );
        self.resolutions.put(key, resolved.clone());
        Ok(resolved)
    }

    fn resolve_raw(&mut self, request: &FontRequest) -> FontResult<ResolvedName> {
        let pattern = request.family();
        if !pattern.is_empty() && self.system.resource_exists(pattern) {
            return Ok(ResolvedName {
                name: pattern.to_string(),
                exact: true,
            });
        }

        debug!("Raw font {} not found, using last resort", pattern);
        Ok(ResolvedName {
            name: self.last_resort.resolve(&self.system)?.to_string(),
            exact: false,
        })
    }

    fn match_request(&mut self, request: &FontRequest) -> FontResult<ResolvedName> {
        let chain = build_fallback_chain(request, &self.substitutions, &self.config.last_resort_family);
        let mut tried = HashSet::new();

        for (step, family) in chain {
            if !tried.insert(family.to_ascii_lowercase()) {
                trace!("Skipping {} family {}: already scanned", step, family);
                continue;
            }

            debug!("Trying {} family {}", step, family);
            let best = self
                .selector
                .find_best_family_member(&self.system, &family, request);
            if best.is_found() {
                return Ok(ResolvedName {
                    name: best.name,
                    exact: step == FallbackStep::Requested && best.exact,
                });
            }
        }

        let name = self.last_resort.resolve(&self.system)?.to_string();
        debug!("No family matched, using {} {}", FallbackStep::LastResortResource, name);
        Ok(ResolvedName { name, exact: false })
    }

    /// Resolve `request` and make sure the resource is loaded
    ///
    /// A resource that exists but fails to load is replaced by the last
    /// resort resource; if that fails too the error is returned.
    pub fn resolve(&mut self, request: &FontRequest) -> FontResult<&CachedFontResource> {
        let resolved = self.resolve_name(request)?;

        let name = match self.cache.ensure_loaded(&self.system, &resolved.name, resolved.exact) {
            Ok(()) => resolved.name,
            Err(err) => {
                warn!("Failed to load {}: {}", resolved.name, err);
                let fallback = self.last_resort.resolve(&self.system)?.to_string();
                if fallback.eq_ignore_ascii_case(&resolved.name) {
                    return Err(err);
                }

                self.cache.ensure_loaded(&self.system, &fallback, false)?;
                self.resolutions.put(
                    request.key(),
                    ResolvedName {
                        name: fallback.clone(),
                        exact: false,
                    },
                );
                fallback
            }
        };

        self.cache.get(&name).ok_or_else(|| FontError::LoadFailure {
            name,
            reason: "resource left the cache right after loading".to_string(),
        })
    }

    /// Attributes the resolved resource delivers for `request`
    pub fn font_info(&mut self, request: &FontRequest) -> FontResult<FontInfo> {
        let resource = self.resolve(request)?;
        let mut info = FontInfo::from_resolved(&resource.resolved_name, request, resource.exact_match);
        info.raw_mode |= request.raw_mode();
        Ok(info)
    }

    /// The literal resource used when nothing matches
    pub fn last_resort_resource(&mut self) -> FontResult<String> {
        self.ensure_running()?;
        Ok(self.last_resort.resolve(&self.system)?.to_string())
    }

    // Cache

    /// Drop a loaded resource and release its handle
    pub fn invalidate(&mut self, resource_name: &str) -> FontResult<bool> {
        self.ensure_running()?;
        Ok(self.cache.invalidate(&self.system, resource_name))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of request keys with a remembered resolution
    pub fn memoized_resolutions(&self) -> usize {
        self.resolutions.len()
    }

    /// Release every cached handle; the engine is unusable afterwards
    pub fn shutdown(&mut self) -> FontResult<()> {
        if self.shut_down {
            return Err(FontError::AlreadyShutDown);
        }
        let stats = self.cache.stats();
        self.cache.clear(&self.system);
        self.resolutions.clear();
        self.shut_down = true;
        info!(
            "Font engine shut down ({} resources released, {} loads total)",
            stats.entries, stats.loads
        );
        Ok(())
    }
}

impl<S: NativeFontSystem> Drop for FontEngine<S> {
    fn drop(&mut self) {
        if !self.shut_down {
            if let Err(err) = self.shutdown() {
                warn!("Font engine shutdown on drop failed: {}", err);
            }
        }
    }
}

impl<S: NativeFontSystem> std::fmt::Debug for FontEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontEngine")
            .field("cache", &self.cache)
            .field("substitutions", &self.substitutions.len())
            .field("resolutions", &self.resolutions.len())
            .field("shut_down", &self.shut_down)
            .finish()
    }
}
