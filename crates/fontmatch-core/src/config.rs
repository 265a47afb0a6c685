// src/config.rs
use crate::constants::{
    DEFAULT_CACHE_BUDGET, DEFAULT_RESERVE_COST, INITIAL_LIST_SIZE, LAST_RESORT_CANDIDATES,
    LAST_RESORT_FAMILY, MAX_LIST_SIZE, RESOLUTION_MEMO_CAPACITY, SIZE_TOLERANCE_PERCENT,
};
use crate::error::{FontError, FontResult};
use crate::font::Resolution;

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Estimated glyph bitmap bytes the resource cache may hold
    pub cache_budget: usize,
    /// Headroom added on top of an entry larger than the whole budget
    pub reserve_cost: usize,
    /// Most request keys whose resolution is remembered
    pub memo_capacity: usize,
    pub initial_list_size: usize,
    pub max_list_size: usize,
    /// Resolution given to smoothly scalable fonts when no bitmap set one
    pub default_resolution: Resolution,
    pub size_tolerance_percent: f32,
    pub last_resort_family: String,
    pub last_resort_candidates: Vec<String>,
    pub seed_default_substitutions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_budget: DEFAULT_CACHE_BUDGET,
            reserve_cost: DEFAULT_RESERVE_COST,
            memo_capacity: RESOLUTION_MEMO_CAPACITY,
            initial_list_size: INITIAL_LIST_SIZE,
            max_list_size: MAX_LIST_SIZE,
            default_resolution: Resolution::default(),
            size_tolerance_percent: SIZE_TOLERANCE_PERCENT,
            last_resort_family: LAST_RESORT_FAMILY.to_string(),
            last_resort_candidates: LAST_RESORT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            seed_default_substitutions: true,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_budget(mut self, budget: usize) -> Self {
        self.cache_budget = budget;
        self
    }

    pub fn with_reserve_cost(mut self, reserve: usize) -> Self {
        self.reserve_cost = reserve;
        self
    }

    pub fn with_memo_capacity(mut self, capacity: usize) -> Self {
        self.memo_capacity = capacity;
        self
    }

    pub fn with_list_sizes(mut self, initial: usize, max: usize) -> Self {
        self.initial_list_size = initial;
        self.max_list_size = max;
        self
    }

    pub fn with_default_resolution(mut self, x: u32, y: u32) -> Self {
        self.default_resolution = Resolution::new(x, y);
        self
    }

    pub fn with_size_tolerance_percent(mut self, percent: f32) -> Self {
        self.size_tolerance_percent = percent;
        self
    }

    pub fn with_last_resort_family(mut self, family: &str) -> Self {
        self.last_resort_family = family.to_string();
        self
    }

    pub fn with_last_resort_candidates<I, N>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.last_resort_candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_substitutions(mut self, seed: bool) -> Self {
        self.seed_default_substitutions = seed;
        self
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> FontResult<()> {
        if self.cache_budget == 0 {
            return Err(invalid("cache_budget", self.cache_budget));
        }
        if self.memo_capacity == 0 {
            return Err(invalid("memo_capacity", self.memo_capacity));
        }
        if self.initial_list_size == 0 {
            return Err(invalid("initial_list_size", self.initial_list_size));
        }
        if self.max_list_size < self.initial_list_size {
            return Err(invalid("max_list_size", self.max_list_size));
        }
        if self.default_resolution.x == 0 || self.default_resolution.y == 0 {
            return Err(invalid(
                "default_resolution",
                format!("{}x{}", self.default_resolution.x, self.default_resolution.y),
            ));
        }
        if self.size_tolerance_percent.is_nan() || self.size_tolerance_percent <= 0.0 {
            return Err(invalid("size_tolerance_percent", self.size_tolerance_percent));
        }
        if self.last_resort_family.trim().is_empty() {
            return Err(invalid("last_resort_family", "\"\""));
        }
        if self.last_resort_candidates.is_empty() {
            return Err(invalid("last_resort_candidates", "[]"));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString) -> FontError {
    FontError::Config {
        field: field.to_string(),
        value: value.to_string(),
    }
}
