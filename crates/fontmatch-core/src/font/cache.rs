//! Cost-bounded cache of loaded font resources
//!
//! Entries are weighed by the estimated size of their glyph bitmaps and
//! evicted least recently used first. Every handle that leaves the cache is
//! given back to the native font system exactly once.

use lru::LruCache;
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::constants::{DEFAULT_CACHE_BUDGET, DEFAULT_RESERVE_COST};
use crate::error::{FontError, FontResult};
use crate::traits::{FontHandle, FontMetrics, NativeFontSystem};

/// A loaded font owned by the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFontResource {
    pub resolved_name: String,
    pub handle: FontHandle,
    pub metrics: FontMetrics,
    pub footprint_cost: usize,
    /// Whether the last request served by this entry matched exactly
    pub exact_match: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub loads: u64,
    pub evictions: u64,
    pub releases: u64,
    pub total_cost: usize,
    /// Current limit, above the budget while an oversized entry is resident
    pub max_cost: usize,
    pub entries: usize,
}

pub struct FontResourceCache {
    entries: LruCache<String, CachedFontResource>,
    budget: usize,
    reserve: usize,
    max_cost: usize,
    total_cost: usize,
    /// Key of the entry the limit was raised for
    oversized: Option<String>,
    stats: CacheStats,
}

impl Default for FontResourceCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_BUDGET, DEFAULT_RESERVE_COST)
    }
}

impl std::fmt::Debug for FontResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResourceCache")
            .field("entries", &self.entries.len())
            .field("budget", &self.budget)
            .field("max_cost", &self.max_cost)
            .field("total_cost", &self.total_cost)
            .finish()
    }
}

fn cache_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl FontResourceCache {
    pub fn new(budget: usize, reserve: usize) -> Self {
        Self {
            entries: LruCache::unbounded(),
            budget,
            reserve,
            max_cost: budget,
            total_cost: 0,
            oversized: None,
            stats: CacheStats::default(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.cache_budget, config.reserve_cost)
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(&cache_key(name))
    }

    /// Look an entry up without touching its recency
    pub fn get(&self, name: &str) -> Option<&CachedFontResource> {
        self.entries.peek(&cache_key(name))
    }

    /// Cached entry for `name`, loading it on a miss
    pub fn get_or_load<S>(&mut self, system: &S, name: &str, exact: bool) -> FontResult<&CachedFontResource>
    where
        S: NativeFontSystem + ?Sized,
    {
        self.ensure_loaded(system, name, exact)?;
        self.entries
            .peek(&cache_key(name))
            .ok_or_else(|| FontError::LoadFailure {
                name: name.to_string(),
                reason: "entry evicted while loading".to_string(),
            })
    }

    /// Make `name` resident and most recently used
    pub fn ensure_loaded<S>(&mut self, system: &S, name: &str, exact: bool) -> FontResult<()>
    where
        S: NativeFontSystem + ?Sized,
    {
        let key = cache_key(name);
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.exact_match = exact;
            self.stats.hits += 1;
            trace!("Font cache hit for {}", name);
            return Ok(());
        }

        self.stats.misses += 1;
        let loaded = system.load(name)?;
        self.stats.loads += 1;

        let cost = loaded.metrics.footprint_cost();
        debug!("Loaded font {} (cost {})", name, cost);

        if cost > self.budget {
            warn!(
                "Font {} costs {} which exceeds the cache budget of {}",
                name, cost, self.budget
            );
            self.max_cost = cost.saturating_add(self.reserve);
            self.oversized = Some(key.clone());
        }

        let entry = CachedFontResource {
            resolved_name: name.to_string(),
            handle: loaded.handle,
            metrics: loaded.metrics,
            footprint_cost: cost,
            exact_match: exact,
        };
        if let Some(previous) = self.entries.put(key.clone(), entry) {
            self.release_entry(system, &key, previous);
        }
        self.total_cost = self.total_cost.saturating_add(cost);

        self.trim(system);
        Ok(())
    }

    /// Drop `name` and release its handle; no-op when not cached
    pub fn invalidate<S>(&mut self, system: &S, name: &str) -> bool
    where
        S: NativeFontSystem + ?Sized,
    {
        let key = cache_key(name);
        match self.entries.pop(&key) {
            Some(entry) => {
                debug!("Invalidated font {}", name);
                self.release_entry(system, &key, entry);
                self.trim(system);
                true
            }
            None => false,
        }
    }

    /// Release every entry
    pub fn clear<S>(&mut self, system: &S)
    where
        S: NativeFontSystem + ?Sized,
    {
        while let Some((key, entry)) = self.entries.pop_lru() {
            self.release_entry(system, &key, entry);
        }
        self.max_cost = self.budget;
        self.oversized = None;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_cost: self.total_cost,
            max_cost: self.max_cost,
            entries: self.entries.len(),
            ..self.stats
        }
    }

    /// Evict least recently used entries until the total fits the limit
    ///
    /// The most recently used entry always stays.
    fn trim<S>(&mut self, system: &S)
    where
        S: NativeFontSystem + ?Sized,
    {
        while self.total_cost > self.max_cost && self.entries.len() > 1 {
            let Some((key, entry)) = self.entries.pop_lru() else {
                break;
            };
            debug!("Evicting font {} (cost {})", entry.resolved_name, entry.footprint_cost);
            self.stats.evictions += 1;
            self.release_entry(system, &key, entry);
        }
    }

    fn release_entry<S>(&mut self, system: &S, key: &str, entry: CachedFontResource)
    where
        S: NativeFontSystem + ?Sized,
    {
        system.release(entry.handle);
        self.stats.releases += 1;
        self.total_cost = self.total_cost.saturating_sub(entry.footprint_cost);

        if self.oversized.as_deref() == Some(key) {
            trace!("Oversized font {} left the cache, restoring budget", entry.resolved_name);
            self.oversized = None;
            self.max_cost = self.budget;
        }
    }
}
