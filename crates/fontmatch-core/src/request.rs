//! Font requests: what the caller would like to get

use std::fmt;
use std::str::FromStr;

use crate::error::{FontError, FontResult};

/// Font weight on the 0..=99 scale
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(u8);

impl Weight {
    pub const LIGHT: Self = Self(25);
    pub const NORMAL: Self = Self(50);
    pub const DEMI_BOLD: Self = Self(63);
    pub const BOLD: Self = Self(75);
    pub const BLACK: Self = Self(87);

    pub const MAX: u8 = 99;

    /// Values above 99 are clamped
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn abs_diff(self, other: Weight) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Weight {
    type Err = FontError;

    /// A band name (`light`, `normal`, `demibold`, `bold`, `black`) or a number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Weight::LIGHT),
            "normal" | "regular" | "medium" => Ok(Weight::NORMAL),
            "demibold" | "demi-bold" => Ok(Weight::DEMI_BOLD),
            "bold" => Ok(Weight::BOLD),
            "black" => Ok(Weight::BLACK),
            other => other.parse::<u8>().map(Weight::new).map_err(|_| FontError::InvalidRequest {
                reason: format!("unknown weight '{}'", s),
            }),
        }
    }
}

/// 8-bit character set encodings a font can be asked for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CharSet {
    #[default]
    Latin1,
    Latin2,
    Latin3,
    Latin4,
    Latin5,
    Latin6,
    Latin7,
    Latin8,
    Latin9,
    Koi8R,
    Any,
}

impl CharSet {
    pub const ALL: [CharSet; 11] = [
        CharSet::Latin1,
        CharSet::Latin2,
        CharSet::Latin3,
        CharSet::Latin4,
        CharSet::Latin5,
        CharSet::Latin6,
        CharSet::Latin7,
        CharSet::Latin8,
        CharSet::Latin9,
        CharSet::Koi8R,
        CharSet::Any,
    ];

    /// The `N` of ISO-8859-N, for the Latin sets
    pub fn iso8859_part(self) -> Option<u8> {
        match self {
            CharSet::Latin1 => Some(1),
            CharSet::Latin2 => Some(2),
            CharSet::Latin3 => Some(3),
            CharSet::Latin4 => Some(4),
            CharSet::Latin5 => Some(5),
            CharSet::Latin6 => Some(6),
            CharSet::Latin7 => Some(7),
            CharSet::Latin8 => Some(8),
            CharSet::Latin9 => Some(9),
            CharSet::Koi8R | CharSet::Any => None,
        }
    }

    /// Whether a font with this registry/encoding pair serves the charset
    pub fn accepts(self, registry: &str, encoding: &str) -> bool {
        match self {
            CharSet::Any => true,
            CharSet::Koi8R => {
                registry.eq_ignore_ascii_case("koi8") && encoding.eq_ignore_ascii_case("r")
            }
            latin => match latin.iso8859_part() {
                Some(part) => {
                    registry.eq_ignore_ascii_case("iso8859") && encoding.parse::<u8>() == Ok(part)
                }
                None => false,
            },
        }
    }

    /// Charset delivered by a registry/encoding pair, if it is one we know
    pub fn from_registry(registry: &str, encoding: &str) -> Option<CharSet> {
        CharSet::ALL
            .into_iter()
            .filter(|cs| *cs != CharSet::Any)
            .find(|cs| cs.accepts(registry, encoding))
    }

    pub fn name(self) -> &'static str {
        match self {
            CharSet::Latin1 => "latin1",
            CharSet::Latin2 => "latin2",
            CharSet::Latin3 => "latin3",
            CharSet::Latin4 => "latin4",
            CharSet::Latin5 => "latin5",
            CharSet::Latin6 => "latin6",
            CharSet::Latin7 => "latin7",
            CharSet::Latin8 => "latin8",
            CharSet::Latin9 => "latin9",
            CharSet::Koi8R => "koi8r",
            CharSet::Any => "any",
        }
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharSet {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let normalized = lower.replace(['-', '_'], "");
        let found = match normalized.as_str() {
            "iso88591" => Some(CharSet::Latin1),
            "iso88592" => Some(CharSet::Latin2),
            "iso88593" => Some(CharSet::Latin3),
            "iso88594" => Some(CharSet::Latin4),
            "iso88595" => Some(CharSet::Latin5),
            "iso88596" => Some(CharSet::Latin6),
            "iso88597" => Some(CharSet::Latin7),
            "iso88598" => Some(CharSet::Latin8),
            "iso88599" => Some(CharSet::Latin9),
            other => CharSet::ALL.into_iter().find(|cs| cs.name() == other),
        };
        found.ok_or_else(|| FontError::InvalidRequest {
            reason: format!("unknown charset '{}'", s),
        })
    }
}

/// Generic family used when the requested one cannot be found
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StyleHint {
    #[default]
    Helvetica,
    Times,
    Courier,
    OldEnglish,
    System,
    AnyStyle,
}

impl StyleHint {
    pub const SANS_SERIF: Self = Self::Helvetica;
    pub const SERIF: Self = Self::Times;
    pub const TYPE_WRITER: Self = Self::Courier;
    pub const DECORATIVE: Self = Self::OldEnglish;

    pub fn default_family(self) -> &'static str {
        match self {
            StyleHint::Times => "times",
            StyleHint::Courier => "courier",
            StyleHint::OldEnglish => "old english",
            StyleHint::Helvetica | StyleHint::System | StyleHint::AnyStyle => "helvetica",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StyleHint::Helvetica => "helvetica",
            StyleHint::Times => "times",
            StyleHint::Courier => "courier",
            StyleHint::OldEnglish => "oldenglish",
            StyleHint::System => "system",
            StyleHint::AnyStyle => "any",
        }
    }
}

impl FromStr for StyleHint {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "helvetica" | "sansserif" | "sans-serif" | "sans" => Ok(StyleHint::Helvetica),
            "times" | "serif" => Ok(StyleHint::Times),
            "courier" | "typewriter" | "monospace" => Ok(StyleHint::Courier),
            "oldenglish" | "old english" | "decorative" => Ok(StyleHint::OldEnglish),
            "system" => Ok(StyleHint::System),
            "any" | "anystyle" => Ok(StyleHint::AnyStyle),
            _ => Err(FontError::InvalidRequest {
                reason: format!("unknown style hint '{}'", s),
            }),
        }
    }
}

/// An immutable description of the font a caller wants
///
/// Built with [`FontRequest::new`] and the `with_*` methods, which consume
/// and return the request. Point sizes are in tenths of a point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontRequest {
    family: String,
    point_size_deci: u32,
    weight: Weight,
    italic: bool,
    charset: CharSet,
    style_hint: StyleHint,
    fixed_pitch: bool,
    raw_mode: bool,
    underline: bool,
    strike_out: bool,
}

impl FontRequest {
    /// Non-positive sizes are rejected rather than clamped
    pub fn new(family: &str, point_size_deci: i32) -> FontResult<Self> {
        Ok(Self {
            family: family.to_string(),
            point_size_deci: validate_size(point_size_deci)?,
            weight: Weight::NORMAL,
            italic: false,
            charset: CharSet::default(),
            style_hint: StyleHint::default(),
            fixed_pitch: false,
            raw_mode: false,
            underline: false,
            strike_out: false,
        })
    }

    /// Convenience constructor taking whole points
    pub fn with_points(family: &str, points: i32) -> FontResult<Self> {
        Self::new(family, points.saturating_mul(10))
    }

    pub fn with_family(mut self, family: &str) -> Self {
        self.family = family.to_string();
        self
    }

    pub fn with_point_size_deci(mut self, point_size_deci: i32) -> FontResult<Self> {
        self.point_size_deci = validate_size(point_size_deci)?;
        Ok(self)
    }

    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_charset(mut self, charset: CharSet) -> Self {
        self.charset = charset;
        self
    }

    pub fn with_style_hint(mut self, style_hint: StyleHint) -> Self {
        self.style_hint = style_hint;
        self
    }

    pub fn with_fixed_pitch(mut self, fixed_pitch: bool) -> Self {
        self.fixed_pitch = fixed_pitch;
        self
    }

    pub fn with_raw_mode(mut self, raw_mode: bool) -> Self {
        self.raw_mode = raw_mode;
        self
    }

    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    pub fn with_strike_out(mut self, strike_out: bool) -> Self {
        self.strike_out = strike_out;
        self
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn point_size_deci(&self) -> u32 {
        self.point_size_deci
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn charset(&self) -> CharSet {
        self.charset
    }

    pub fn style_hint(&self) -> StyleHint {
        self.style_hint
    }

    pub fn fixed_pitch(&self) -> bool {
        self.fixed_pitch
    }

    pub fn raw_mode(&self) -> bool {
        self.raw_mode
    }

    pub fn underline(&self) -> bool {
        self.underline
    }

    pub fn strike_out(&self) -> bool {
        self.strike_out
    }

    /// Key identifying every attribute that influences matching
    ///
    /// Underline and strike-out are drawn by the renderer and do not take
    /// part, so requests differing only in those share a resolution.
    pub fn key(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}/{}/{}",
            self.family.to_ascii_lowercase(),
            self.point_size_deci,
            self.weight,
            self.italic as u8,
            self.charset,
            self.style_hint.name(),
            self.fixed_pitch as u8,
            self.raw_mode as u8,
        )
    }
}

fn validate_size(point_size_deci: i32) -> FontResult<u32> {
    u32::try_from(point_size_deci)
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| FontError::InvalidRequest {
            reason: format!("point size must be positive, got {} tenths", point_size_deci),
        })
}
