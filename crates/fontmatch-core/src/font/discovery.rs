//! Candidate discovery: listing the resources of a family

use fontmatch_xlfd::family_pattern;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::constants::{INITIAL_LIST_SIZE, MAX_LIST_SIZE};
use crate::traits::NativeFontSystem;

/// Lists font names from the native font system without silently
/// losing matches to the server's result limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateEnumerator {
    initial_list_size: usize,
    max_list_size: usize,
}

impl Default for CandidateEnumerator {
    fn default() -> Self {
        Self::new(INITIAL_LIST_SIZE, MAX_LIST_SIZE)
    }
}

impl CandidateEnumerator {
    pub fn new(initial_list_size: usize, max_list_size: usize) -> Self {
        let initial_list_size = initial_list_size.max(1);
        Self {
            initial_list_size,
            max_list_size: max_list_size.max(initial_list_size),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.initial_list_size, config.max_list_size)
    }

    /// All names matching `pattern`, empty when nothing matches
    ///
    /// A full result page means the server may have dropped names, so the
    /// query is repeated with a doubled limit up to `max_list_size`.
    pub fn enumerate<S>(&self, system: &S, pattern: &str) -> Vec<String>
    where
        S: NativeFontSystem + ?Sized,
    {
        let mut limit = self.initial_list_size;
        loop {
            let names = system.list_resources(pattern, limit);
            if names.len() < limit {
                return names;
            }
            if limit >= self.max_list_size {
                warn!(
                    "Font list for {} truncated at {} names",
                    pattern,
                    names.len()
                );
                return names;
            }
            limit = (limit * 2).min(self.max_list_size);
            debug!("Font list for {} filled, retrying with limit {}", pattern, limit);
        }
    }

    /// Candidates for a family name
    pub fn enumerate_family<S>(&self, system: &S, family: &str) -> Vec<String>
    where
        S: NativeFontSystem + ?Sized,
    {
        self.enumerate(system, &family_pattern(family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy_backend::DummyFontSystem;

    fn many_times(count: usize) -> DummyFontSystem {
        DummyFontSystem::with_fonts(
            (0..count).map(|i| format!("-foundry{}-times-medium-r-normal--14-140-75-75-p-74-iso8859-1", i)),
        )
    }

    #[test]
    fn test_small_result_single_query() {
        let system = many_times(3);
        let names = CandidateEnumerator::default().enumerate_family(&system, "times");
        assert_eq!(names.len(), 3);
        assert_eq!(system.list_calls().len(), 1);
        assert_eq!(system.list_calls()[0].1, INITIAL_LIST_SIZE);
    }

    #[test]
    fn test_truncated_result_doubles_limit() {
        let system = many_times(600);
        let names = CandidateEnumerator::default().enumerate_family(&system, "times");
        assert_eq!(names.len(), 600);

        let limits: Vec<usize> = system.list_calls().iter().map(|(_, max)| *max).collect();
        assert_eq!(limits, vec![256, 512, 1024]);
    }

    #[test]
    fn test_exact_page_size_retries_once() {
        let system = many_times(4);
        let names = CandidateEnumerator::new(4, 64).enumerate_family(&system, "times");
        assert_eq!(names.len(), 4);
        assert_eq!(system.list_calls().len(), 2);
    }

    #[test]
    fn test_ceiling_stops_retrying() {
        let system = many_times(50);
        let names = CandidateEnumerator::new(4, 10).enumerate_family(&system, "times");
        assert_eq!(names.len(), 10);

        let limits: Vec<usize> = system.list_calls().iter().map(|(_, max)| *max).collect();
        assert_eq!(limits, vec![4, 8, 10]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let system = many_times(5);
        assert!(CandidateEnumerator::default()
            .enumerate_family(&system, "nairobi")
            .is_empty());
    }
}
