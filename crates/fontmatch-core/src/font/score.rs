//! Scoring a candidate resource against a request
//!
//! Each criterion contributes one bit to the score and, when it is not
//! met, makes the match inexact. A candidate meeting every criterion gets
//! [`EXACT_SCORE`] regardless of its bit pattern.

use fontmatch_xlfd::{Field, XlfdName};
use tracing::trace;

use crate::config::EngineConfig;
use crate::constants::{
    DEFAULT_RESOLUTION_X, DEFAULT_RESOLUTION_Y, EXCLUDED_REGISTRY_PREFIXES, SIZE_TOLERANCE_PERCENT,
};
use crate::error::{FontError, FontResult};
use crate::request::{FontRequest, Weight};

pub const EXACT_SCORE: u32 = 0xffff;

pub const CHARSET_SCORE: u32 = 0x80;
pub const PITCH_SCORE: u32 = 0x40;
pub const RESOLUTION_SCORE: u32 = 0x20;
pub const SIZE_SCORE: u32 = 0x10;
pub const WEIGHT_SCORE: u32 = 0x08;
pub const SLANT_SCORE: u32 = 0x04;
pub const WIDTH_SCORE: u32 = 0x02;
/// Carried by every candidate that parsed and was not excluded
pub const BASE_SCORE: u32 = 0x01;

/// Device resolution of a bitmap font, in dots per inch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub x: u32,
    pub y: u32,
}

impl Resolution {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION_X, DEFAULT_RESOLUTION_Y)
    }
}

/// Resolution every bitmap candidate of one matching pass must share
///
/// Set by the first non-scalable candidate seen; start a fresh baseline
/// for each pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionBaseline(Option<Resolution>);

impl ResolutionBaseline {
    pub fn get(&self) -> Option<Resolution> {
        self.0
    }

    fn observe(&mut self, resolution: Resolution) {
        if self.0.is_none() {
            self.0 = Some(resolution);
        }
    }
}

/// Outcome of scoring one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub score: u32,
    pub exact: bool,
    /// Candidate point size exactly equals the requested one
    pub size_exact: bool,
    pub point_size_diff_percent: f32,
    pub weight_diff: u8,
    pub scalable: bool,
    pub smoothly_scalable: bool,
    pub polymorphic: bool,
    pub resolution: Option<Resolution>,
}

impl MatchResult {
    fn rejected() -> Self {
        Self {
            score: 0,
            exact: false,
            size_exact: false,
            point_size_diff_percent: f32::INFINITY,
            weight_diff: u8::MAX,
            scalable: false,
            smoothly_scalable: false,
            polymorphic: false,
            resolution: None,
        }
    }
}

struct Tally {
    score: u32,
    exact: bool,
}

impl Tally {
    fn award(&mut self, met: bool, bit: u32) {
        if met {
            self.score |= bit;
        } else {
            self.exact = false;
        }
    }
}

/// Parse a resource name, mapping failure into the engine's error type
pub fn parse_resource_name(name: &str) -> FontResult<XlfdName<'_>> {
    XlfdName::parse(name).map_err(|_| FontError::MalformedResourceName {
        name: name.to_string(),
    })
}

/// Map a weight word from a font name to the 0..=99 scale
///
/// Words not in the table are guessed from their substrings. With
/// `adjust_score` set, guesses land one step short of the band (two for
/// a complete guess) so they never count as an exact weight match.
pub fn weight_from_name(word: &str, adjust_score: bool) -> Weight {
    let word = word.to_ascii_lowercase();
    let known = match word.as_str() {
        "medium" | "regular" => Some(Weight::NORMAL),
        "bold" => Some(Weight::BOLD),
        "demibold" | "demi bold" => Some(Weight::DEMI_BOLD),
        "black" => Some(Weight::BLACK),
        "light" => Some(Weight::LIGHT),
        _ => None,
    };
    if let Some(weight) = known {
        return weight;
    }

    let adjust = |weight: Weight, by: u8| {
        if adjust_score {
            Weight::new(weight.value() - by)
        } else {
            weight
        }
    };

    if word.contains("bold") {
        adjust(Weight::BOLD, 1)
    } else if word.contains("light") {
        adjust(Weight::LIGHT, 1)
    } else if word.contains("black") {
        adjust(Weight::BLACK, 1)
    } else {
        adjust(Weight::NORMAL, 2)
    }
}

fn is_excluded_registry(registry: &str) -> bool {
    let registry = registry.to_ascii_lowercase();
    EXCLUDED_REGISTRY_PREFIXES
        .iter()
        .any(|prefix| registry.starts_with(prefix))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScorer {
    size_tolerance_percent: f32,
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self::new(SIZE_TOLERANCE_PERCENT)
    }
}

impl MatchScorer {
    pub fn new(size_tolerance_percent: f32) -> Self {
        Self { size_tolerance_percent }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.size_tolerance_percent)
    }

    /// Score `candidate` against `request`
    ///
    /// Malformed names and excluded registries score 0 and never abort
    /// the surrounding scan.
    pub fn score(
        &self,
        candidate: &str,
        request: &FontRequest,
        baseline: &mut ResolutionBaseline,
    ) -> MatchResult {
        let name = match parse_resource_name(candidate) {
            Ok(name) => name,
            Err(err) => {
                trace!("Skipping candidate: {}", err);
                return MatchResult::rejected();
            }
        };

        if is_excluded_registry(name.charset_registry()) {
            trace!("Skipping {}: excluded registry", candidate);
            return MatchResult::rejected();
        }

        let polymorphic = name.is_polymorphic();
        let scalable = name.is_scalable();
        let smoothly_scalable = name.is_smoothly_scalable();
        let resolution = name.resolution().map(|(x, y)| Resolution::new(x, y));

        let mut tally = Tally {
            score: BASE_SCORE,
            exact: true,
        };

        tally.award(
            request
                .charset()
                .accepts(name.charset_registry(), name.charset_encoding()),
            CHARSET_SCORE,
        );

        let pitch_met = match name.spacing_code() {
            Some('m') | Some('c') => request.fixed_pitch(),
            Some('p') => !request.fixed_pitch(),
            _ => false,
        };
        tally.award(pitch_met, PITCH_SCORE);

        let resolution_met = if name.is_zero(Field::ResolutionX) && name.is_zero(Field::ResolutionY) {
            true
        } else {
            match (resolution, baseline.get()) {
                (None, _) => false,
                (Some(found), Some(expected)) => found == expected,
                (Some(found), None) => {
                    if !scalable {
                        baseline.observe(found);
                    }
                    true
                }
            }
        };
        tally.award(resolution_met, RESOLUTION_SCORE);

        let requested = request.point_size_deci();
        let effective = if scalable {
            Some(requested)
        } else {
            name.point_size_deci()
        };
        let (point_size_diff_percent, size_exact) = match effective {
            Some(size) => {
                let diff = size.abs_diff(requested) as f32 * 100.0 / requested as f32;
                (diff, size == requested)
            }
            None => (f32::INFINITY, false),
        };
        if point_size_diff_percent < self.size_tolerance_percent {
            tally.score |= SIZE_SCORE;
            if !size_exact {
                tally.exact = false;
            }
        } else {
            tally.exact = false;
        }

        let weight = weight_from_name(name.weight(), true);
        let weight_diff = weight.abs_diff(request.weight());
        tally.award(weight == request.weight(), WEIGHT_SCORE);

        let slant_met = match name.slant_code() {
            Some('i') | Some('o') => request.italic(),
            Some('r') => !request.italic(),
            _ => false,
        };
        tally.award(slant_met, SLANT_SCORE);

        tally.award(name.width().eq_ignore_ascii_case("normal"), WIDTH_SCORE);

        let score = if tally.exact { EXACT_SCORE } else { tally.score };
        trace!(
            "Scored {}: {:#x} (size diff {:.1}%, weight diff {})",
            candidate,
            score,
            point_size_diff_percent,
            weight_diff
        );

        MatchResult {
            score,
            exact: tally.exact,
            size_exact,
            point_size_diff_percent,
            weight_diff,
            scalable,
            smoothly_scalable,
            polymorphic,
            resolution,
        }
    }
}
