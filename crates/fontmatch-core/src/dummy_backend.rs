//! Dummy font system for testing the engine without an X server
//!
//! Holds a fixed list of font names and emulates what a font server does
//! with them: wildcard listing, instantiating scalable fonts at a requested
//! size, and handing out handles. Every load and release is recorded.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use fontmatch_xlfd::{is_literal, matches, Field, XlfdName};

use crate::error::{FontError, FontResult};
use crate::traits::{FontHandle, FontMetrics, LoadedFont, NativeFontSystem};

#[derive(Clone, Debug)]
struct DummyFont {
    name: String,
    metrics: Option<FontMetrics>,
}

/// In-memory [`NativeFontSystem`]
#[derive(Debug, Default)]
pub struct DummyFontSystem {
    fonts: Vec<DummyFont>,
    failing: HashSet<String>,
    next_handle: Cell<u64>,
    live: RefCell<HashMap<FontHandle, String>>,
    loads: RefCell<Vec<String>>,
    releases: RefCell<Vec<FontHandle>>,
    list_calls: RefCell<Vec<(String, usize)>>,
}

impl DummyFontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a font system serving the given names
    pub fn with_fonts<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let mut system = Self::new();
        for name in names {
            system.add_font(name);
        }
        system
    }

    pub fn add_font(&mut self, name: impl Into<String>) {
        self.fonts.push(DummyFont {
            name: name.into(),
            metrics: None,
        });
    }

    /// Add a font with explicit metrics instead of ones derived from its name
    pub fn add_font_with_metrics(&mut self, name: impl Into<String>, metrics: FontMetrics) {
        self.fonts.push(DummyFont {
            name: name.into(),
            metrics: Some(metrics),
        });
    }

    /// Make every load of `name` fail even though it is listed
    pub fn fail_loads_for(&mut self, name: &str) {
        self.failing.insert(name.to_ascii_lowercase());
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Names passed to successful loads, in order
    pub fn loads(&self) -> Vec<String> {
        self.loads.borrow().clone()
    }

    pub fn load_count(&self, name: &str) -> usize {
        self.loads
            .borrow()
            .iter()
            .filter(|loaded| loaded.eq_ignore_ascii_case(name))
            .count()
    }

    pub fn releases(&self) -> Vec<FontHandle> {
        self.releases.borrow().clone()
    }

    /// Handles loaded and not yet released
    pub fn live_handles(&self) -> usize {
        self.live.borrow().len()
    }

    /// `(pattern, max_names)` of every listing request
    pub fn list_calls(&self) -> Vec<(String, usize)> {
        self.list_calls.borrow().clone()
    }

    fn find(&self, pattern: &str) -> Option<(&DummyFont, Option<u32>)> {
        if is_literal(pattern) {
            if let Some(font) = self.fonts.iter().find(|f| f.name.eq_ignore_ascii_case(pattern)) {
                return Some((font, None));
            }
        } else if let Some(font) = self.fonts.iter().find(|f| matches(pattern, &f.name)) {
            return Some((font, None));
        }

        // A scalable font answers for any concrete size and resolution
        let wanted = XlfdName::parse(pattern).ok()?;
        self.fonts.iter().find_map(|font| {
            let available = XlfdName::parse(&font.name).ok()?;
            instantiates(&available, &wanted).then(|| (font, wanted.point_size_deci()))
        })
    }
}

const SIZE_FIELDS: [Field; 5] = [
    Field::PixelSize,
    Field::PointSize,
    Field::ResolutionX,
    Field::ResolutionY,
    Field::AverageWidth,
];

fn instantiates(available: &XlfdName<'_>, wanted: &XlfdName<'_>) -> bool {
    if !available.is_scalable() {
        return false;
    }
    Field::ALL.iter().all(|&field| {
        let have = available.field(field);
        let want = wanted.field(field);
        if SIZE_FIELDS.contains(&field) && have == "0" {
            return true;
        }
        matches(want, have)
    })
}

/// Largest pixel size a scaled instance is given
const MAX_SCALED_PIXELS: u32 = 4096;

/// Plausible metrics for a font name, scaled from its pixel size
fn metrics_for(name: &str, point_size_deci: Option<u32>) -> FontMetrics {
    let parsed = XlfdName::parse(name).ok();
    let pixels = point_size_deci
        .map(|deci| (u64::from(deci) * 75 / 720).min(u64::from(MAX_SCALED_PIXELS)) as u32)
        .or_else(|| parsed.as_ref().and_then(|n| n.pixel_size()))
        .filter(|px| *px > 0)
        .unwrap_or(13);

    let ascent = (pixels * 4 / 5).max(1);
    FontMetrics {
        ascent,
        descent: pixels - ascent.min(pixels),
        max_width: (pixels * 3 / 5).max(1),
        first_char: 32,
        last_char: 255,
        rows: 1,
    }
}

impl NativeFontSystem for DummyFontSystem {
    fn list_resources(&self, pattern: &str, max_names: usize) -> Vec<String> {
        self.list_calls
            .borrow_mut()
            .push((pattern.to_string(), max_names));

        self.fonts
            .iter()
            .filter(|font| matches(pattern, &font.name))
            .take(max_names)
            .map(|font| font.name.clone())
            .collect()
    }

    fn resource_exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    fn load(&self, name: &str) -> FontResult<LoadedFont> {
        if self.failing.contains(&name.to_ascii_lowercase()) {
            return Err(FontError::LoadFailure {
                name: name.to_string(),
                reason: "load refused by test font system".to_string(),
            });
        }

        let (font, scaled_size) = self.find(name).ok_or_else(|| FontError::LoadFailure {
            name: name.to_string(),
            reason: "no such font".to_string(),
        })?;

        let metrics = match (font.metrics, scaled_size) {
            (Some(metrics), None) => metrics,
            (_, size) => metrics_for(&font.name, size),
        };

        let handle = FontHandle(self.next_handle.get() + 1);
        self.next_handle.set(handle.0);
        self.live.borrow_mut().insert(handle, name.to_string());
        self.loads.borrow_mut().push(name.to_string());

        Ok(LoadedFont { handle, metrics })
    }

    fn release(&self, handle: FontHandle) {
        self.live.borrow_mut().remove(&handle);
        self.releases.borrow_mut().push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DummyFontSystem {
        DummyFontSystem::with_fonts([
            "fixed",
            "-misc-fixed-medium-r-normal--13-120-75-75-c-70-iso8859-1",
            "-adobe-times-medium-r-normal--14-140-75-75-p-74-iso8859-1",
            "-adobe-helvetica-medium-r-normal--0-0-0-0-p-0-iso8859-1",
        ])
    }

    #[test]
    fn test_listing_honors_limit() {
        let system = sample();
        assert_eq!(system.list_resources("*", 10).len(), 4);
        assert_eq!(system.list_resources("*", 2).len(), 2);
        assert_eq!(system.list_resources("-*-times-*-*-*-*-*-*-*-*-*-*-*-*", 10).len(), 1);
        assert_eq!(system.list_calls().len(), 3);
    }

    #[test]
    fn test_exists_literal_and_pattern() {
        let system = sample();
        assert!(system.resource_exists("fixed"));
        assert!(system.resource_exists("FIXED"));
        assert!(!system.resource_exists("6x13"));
        assert!(system.resource_exists("-*-times-*-*-*-*-*-*-*-*-*-*-*-*"));
    }

    #[test]
    fn test_scalable_fonts_instantiate() {
        let system = sample();
        let scaled = "-adobe-helvetica-medium-r-normal--*-180-75-75-p-*-iso8859-1";
        assert!(system.resource_exists(scaled));

        let loaded = system.load(scaled).unwrap();
        // 18pt at 75dpi is 18 pixels
        assert_eq!(loaded.metrics.ascent + loaded.metrics.descent, 18);

        // A bitmap font does not stretch
        assert!(!system.resource_exists("-adobe-times-medium-r-normal--*-180-75-75-p-*-iso8859-1"));
    }

    #[test]
    fn test_huge_scaled_size_is_clamped() {
        let system = sample();
        let loaded = system
            .load("-adobe-helvetica-medium-r-normal--*-4294967295-75-75-p-*-iso8859-1")
            .unwrap();
        assert_eq!(
            loaded.metrics.ascent + loaded.metrics.descent,
            MAX_SCALED_PIXELS
        );
    }

    #[test]
    fn test_load_release_tracking() {
        let mut system = sample();
        system.fail_loads_for("fixed");

        assert!(matches!(system.load("fixed"), Err(FontError::LoadFailure { .. })));
        assert!(system.load("6x13").is_err());

        let a = system.load("-adobe-times-medium-r-normal--14-140-75-75-p-74-iso8859-1").unwrap();
        let b = system.load("-adobe-times-medium-r-normal--14-140-75-75-p-74-iso8859-1").unwrap();
        assert_ne!(a.handle, b.handle);
        assert_eq!(system.live_handles(), 2);
        assert_eq!(system.load_count("-adobe-times-medium-r-normal--14-140-75-75-p-74-iso8859-1"), 2);

        system.release(a.handle);
        assert_eq!(system.live_handles(), 1);
        assert_eq!(system.releases(), vec![a.handle]);
    }

    #[test]
    fn test_explicit_metrics() {
        let mut system = DummyFontSystem::new();
        let metrics = FontMetrics {
            ascent: 100,
            descent: 28,
            max_width: 128,
            first_char: 0,
            last_char: 255,
            rows: 1,
        };
        system.add_font_with_metrics("big", metrics);
        assert_eq!(system.load("big").unwrap().metrics, metrics);
    }
}
