//! Picking the best member of a font family

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::font::discovery::CandidateEnumerator;
use crate::font::score::{parse_resource_name, MatchResult, MatchScorer, Resolution, ResolutionBaseline};
use crate::request::FontRequest;
use crate::traits::NativeFontSystem;

/// Winner of a family scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMatch {
    /// Concrete resource name, empty when the family had no usable member
    pub name: String,
    pub score: u32,
    pub exact: bool,
}

impl BestMatch {
    pub fn none() -> Self {
        Self {
            name: String::new(),
            score: 0,
            exact: false,
        }
    }

    pub fn is_found(&self) -> bool {
        self.score > 0 && !self.name.is_empty()
    }
}

struct Contender<'a> {
    name: &'a str,
    result: MatchResult,
}

/// Higher score, then smaller size difference, then smaller weight difference
fn beats(challenger: &MatchResult, best: &MatchResult) -> bool {
    if challenger.score != best.score {
        return challenger.score > best.score;
    }
    if challenger.point_size_diff_percent != best.point_size_diff_percent {
        return challenger.point_size_diff_percent < best.point_size_diff_percent;
    }
    challenger.weight_diff < best.weight_diff
}

fn prefer_scalable(fixed: &MatchResult, scalable: &MatchResult) -> bool {
    scalable.score > fixed.score
        || (scalable.score == fixed.score
            && (!fixed.size_exact || fixed.weight_diff > scalable.weight_diff))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatchSelector {
    enumerator: CandidateEnumerator,
    scorer: MatchScorer,
    default_resolution: Resolution,
}

impl Default for BestMatchSelector {
    fn default() -> Self {
        Self::new(
            CandidateEnumerator::default(),
            MatchScorer::default(),
            Resolution::default(),
        )
    }
}

impl BestMatchSelector {
    pub fn new(
        enumerator: CandidateEnumerator,
        scorer: MatchScorer,
        default_resolution: Resolution,
    ) -> Self {
        Self {
            enumerator,
            scorer,
            default_resolution,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            CandidateEnumerator::from_config(config),
            MatchScorer::from_config(config),
            config.default_resolution,
        )
    }

    /// Enumerate `family` and pick the member closest to `request`
    pub fn find_best_family_member<S>(&self, system: &S, family: &str, request: &FontRequest) -> BestMatch
    where
        S: NativeFontSystem + ?Sized,
    {
        let candidates = self.enumerator.enumerate_family(system, family);
        debug!("Family {} has {} candidates", family, candidates.len());
        self.select(&candidates, request)
    }

    /// Pick the best of an already enumerated candidate list
    pub fn select<N: AsRef<str>>(&self, candidates: &[N], request: &FontRequest) -> BestMatch {
        let mut baseline = ResolutionBaseline::default();
        let mut best_fixed: Option<Contender<'_>> = None;
        let mut best_scalable: Option<Contender<'_>> = None;

        for candidate in candidates {
            let name = candidate.as_ref();
            let result = self.scorer.score(name, request, &mut baseline);
            if result.score == 0 {
                continue;
            }
            if result.polymorphic {
                trace!("Skipping polymorphic candidate {}", name);
                continue;
            }

            let exact_fixed = result.exact && !result.scalable;
            let slot = if result.scalable {
                &mut best_scalable
            } else {
                &mut best_fixed
            };
            if slot.as_ref().map_or(true, |best| beats(&result, &best.result)) {
                *slot = Some(Contender { name, result });
            }

            if exact_fixed {
                trace!("Exact bitmap match {}, ending scan", name);
                break;
            }
        }

        let chosen = match (best_fixed, best_scalable) {
            (Some(fixed), Some(scalable)) => {
                if prefer_scalable(&fixed.result, &scalable.result) {
                    scalable
                } else {
                    fixed
                }
            }
            (Some(fixed), None) => fixed,
            (None, Some(scalable)) => scalable,
            (None, None) => return BestMatch::none(),
        };

        let name = if chosen.result.scalable {
            self.instantiate(&chosen, request, baseline)
        } else {
            chosen.name.to_string()
        };

        BestMatch {
            name,
            score: chosen.result.score,
            exact: chosen.result.exact,
        }
    }

    /// Concrete name for a scalable winner at the requested size
    fn instantiate(&self, chosen: &Contender<'_>, request: &FontRequest, baseline: ResolutionBaseline) -> String {
        let resolution = if chosen.result.smoothly_scalable {
            baseline.get().unwrap_or(self.default_resolution)
        } else {
            chosen.result.resolution.unwrap_or(self.default_resolution)
        };

        match parse_resource_name(chosen.name) {
            Ok(parsed) => parsed.to_scaled(request.point_size_deci(), resolution.x, resolution.y),
            // Scored names always parse
            Err(_) => chosen.name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy_backend::DummyFontSystem;
    use crate::font::score::EXACT_SCORE;
    use crate::request::Weight;

    const TIMES_12: &str = "-adobe-times-medium-r-normal--12-120-75-75-p-64-iso8859-1";
    const TIMES_14: &str = "-adobe-times-medium-r-normal--14-140-75-75-p-74-iso8859-1";
    const TIMES_BOLD_14: &str = "-adobe-times-bold-r-normal--14-140-75-75-p-77-iso8859-1";
    const TIMES_SCALABLE: &str = "-adobe-times-medium-r-normal--0-0-0-0-p-0-iso8859-1";

    fn request(size: i32) -> FontRequest {
        FontRequest::new("times", size).unwrap()
    }

    #[test]
    fn test_exact_bitmap_wins() {
        let selector = BestMatchSelector::default();
        let best = selector.select(&[TIMES_12, TIMES_BOLD_14, TIMES_14, TIMES_SCALABLE], &request(140));
        assert_eq!(best.name, TIMES_14);
        assert_eq!(best.score, EXACT_SCORE);
        assert!(best.exact);
    }

    #[test]
    fn test_empty_candidates() {
        let best = BestMatchSelector::default().select::<&str>(&[], &request(140));
        assert_eq!(best, BestMatch::none());
        assert!(!best.is_found());
    }

    #[test]
    fn test_closer_size_wins_tie() {
        let selector = BestMatchSelector::default();
        // All three are within size tolerance and score the same
        let near = "-adobe-times-medium-r-normal--13-130-75-75-p-70-iso8859-1";
        let best = selector.select(&[TIMES_12, TIMES_14, near], &request(132));
        assert_eq!(best.name, near);
        assert!(!best.exact);
    }

    #[test]
    fn test_scalable_preferred_over_inexact_bitmap() {
        let selector = BestMatchSelector::default();
        let best = selector.select(&[TIMES_12, TIMES_SCALABLE], &request(173));
        assert_eq!(best.name, "-adobe-times-medium-r-normal--*-173-75-75-p-*-iso8859-1");
        assert!(best.exact);
    }

    #[test]
    fn test_scalable_uses_observed_resolution() {
        let selector = BestMatchSelector::default();
        let at_100 = "-adobe-times-bold-r-normal--20-140-100-100-p-110-iso8859-1";
        let best = selector.select(&[at_100, TIMES_SCALABLE], &request(140));
        assert_eq!(best.name, "-adobe-times-medium-r-normal--*-140-100-100-p-*-iso8859-1");
    }

    #[test]
    fn test_non_smooth_scalable_keeps_resolution() {
        let selector = BestMatchSelector::default();
        let charter = "-bitstream-charter-medium-r-normal--0-0-100-100-p-0-iso8859-1";
        let request = FontRequest::new("charter", 110).unwrap();
        let best = selector.select(&[charter], &request);
        assert_eq!(best.name, "-bitstream-charter-medium-r-normal--*-110-100-100-p-*-iso8859-1");
    }

    #[test]
    fn test_configured_default_resolution() {
        let selector = BestMatchSelector::new(
            CandidateEnumerator::default(),
            MatchScorer::default(),
            Resolution::new(100, 100),
        );
        let best = selector.select(&[TIMES_SCALABLE], &request(120));
        assert_eq!(best.name, "-adobe-times-medium-r-normal--*-120-100-100-p-*-iso8859-1");
    }

    #[test]
    fn test_bitmap_kept_on_tie_with_exact_size() {
        let selector = BestMatchSelector::default();
        // Bold request: the bitmap has the right size, the scalable doesn't
        // have the weight either, so both score the same
        let request = request(140).with_weight(Weight::BOLD);
        let best = selector.select(&[TIMES_SCALABLE, TIMES_14], &request);
        assert_eq!(best.name, TIMES_14);
        assert!(!best.exact);
    }

    #[test]
    fn test_scalable_closer_in_weight_wins_tie() {
        let selector = BestMatchSelector::default();
        // Neither candidate has weight 70; the bitmap is the right size but
        // 20 away in weight, the bold outline only 5
        let bold_scalable = "-adobe-times-bold-r-normal--0-0-0-0-p-0-iso8859-1";
        let request = request(140).with_weight(Weight::new(70));
        let best = selector.select(&[TIMES_14, bold_scalable], &request);
        assert_eq!(best.name, "-adobe-times-bold-r-normal--*-140-75-75-p-*-iso8859-1");
        assert!(!best.exact);
    }

    #[test]
    fn test_polymorphic_and_malformed_skipped() {
        let selector = BestMatchSelector::default();
        let poly = "-adobe-times-0-0-normal--14-140-75-75-p-74-iso8859-1";
        let best = selector.select(&["garbage", poly, TIMES_12], &request(140));
        assert_eq!(best.name, TIMES_12);
    }

    #[test]
    fn test_find_best_family_member() {
        let system = DummyFontSystem::with_fonts([
            TIMES_12,
            TIMES_14,
            "-adobe-helvetica-medium-r-normal--14-140-75-75-p-77-iso8859-1",
        ]);
        let selector = BestMatchSelector::default();

        let best = selector.find_best_family_member(&system, "times", &request(140));
        assert_eq!(best.name, TIMES_14);
        assert!(best.exact);

        let missing = selector.find_best_family_member(&system, "nairobi", &request(140));
        assert!(!missing.is_found());
    }
}
