use crate::error::FontResult;

/// Opaque handle to a font loaded by the native font system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u64);

/// Metrics reported by the native font system for a loaded font
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontMetrics {
    pub ascent: u32,
    pub descent: u32,
    pub max_width: u32,
    /// First and last glyph index within a row
    pub first_char: u32,
    pub last_char: u32,
    /// Number of glyph rows (1 for single-byte fonts)
    pub rows: u32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            ascent: 11,
            descent: 2,
            max_width: 6,
            first_char: 0,
            last_char: 255,
            rows: 1,
        }
    }
}

impl FontMetrics {
    pub fn glyph_count(&self) -> usize {
        let per_row = (self.last_char.saturating_sub(self.first_char) as usize).saturating_add(1);
        per_row.saturating_mul(self.rows.max(1) as usize)
    }

    /// Estimated memory held by the font's glyph bitmaps
    ///
    /// One bit per pixel of the maximal glyph cell, for every glyph.
    /// Saturates at `usize::MAX` for absurd metrics.
    pub fn footprint_cost(&self) -> usize {
        let height = self.ascent.saturating_add(self.descent) as usize;
        let bits = height
            .saturating_mul(self.max_width as usize)
            .saturating_mul(self.glyph_count());
        if bits == usize::MAX {
            usize::MAX
        } else {
            bits / 8
        }
    }
}

/// A freshly loaded font as handed back by the native font system
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedFont {
    pub handle: FontHandle,
    pub metrics: FontMetrics,
}

/// The platform font system the engine queries and loads from
///
/// Names and patterns follow X font server conventions: case-insensitive,
/// with `*` and `?` wildcards.
pub trait NativeFontSystem {
    /// List at most `max_names` resource names matching `pattern`
    fn list_resources(&self, pattern: &str, max_names: usize) -> Vec<String>;

    /// Whether at least one resource matches `name`
    fn resource_exists(&self, name: &str) -> bool;

    fn load(&self, name: &str) -> FontResult<LoadedFont>;

    /// Give a handle obtained from [`NativeFontSystem::load`] back
    fn release(&self, handle: FontHandle);
}

impl<T: NativeFontSystem + ?Sized> NativeFontSystem for &T {
    fn list_resources(&self, pattern: &str, max_names: usize) -> Vec<String> {
        (**self).list_resources(pattern, max_names)
    }

    fn resource_exists(&self, name: &str) -> bool {
        (**self).resource_exists(name)
    }

    fn load(&self, name: &str) -> FontResult<LoadedFont> {
        (**self).load(name)
    }

    fn release(&self, handle: FontHandle) {
        (**self).release(handle)
    }
}

impl<T: NativeFontSystem + ?Sized> NativeFontSystem for Box<T> {
    fn list_resources(&self, pattern: &str, max_names: usize) -> Vec<String> {
        (**self).list_resources(pattern, max_names)
    }

    fn resource_exists(&self, name: &str) -> bool {
        (**self).resource_exists(name)
    }

    fn load(&self, name: &str) -> FontResult<LoadedFont> {
        (**self).load(name)
    }

    fn release(&self, handle: FontHandle) {
        (**self).release(handle)
    }
}
