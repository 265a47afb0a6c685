// src/constants.rs

// Cache sizing, in bytes of estimated glyph bitmap memory
pub const DEFAULT_CACHE_BUDGET: usize = 4 * 1024 * 1024;
pub const DEFAULT_RESERVE_COST: usize = 100 * 1024;

// Resolutions remembered by request key
pub const RESOLUTION_MEMO_CAPACITY: usize = 1024;

// Font listing
pub const INITIAL_LIST_SIZE: usize = 256;
pub const MAX_LIST_SIZE: usize = 32768;

// Matching
pub const DEFAULT_RESOLUTION_X: u32 = 75;
pub const DEFAULT_RESOLUTION_Y: u32 = 75;
pub const SIZE_TOLERANCE_PERCENT: f32 = 20.0;

// Fallbacks
pub const LAST_RESORT_FAMILY: &str = "helvetica";

/// Probed in order when nothing else can be found; the first one the
/// font system knows about is used for the rest of the engine's life.
pub const LAST_RESORT_CANDIDATES: &[&str] = &[
    "6x13",
    "7x13",
    "8x13",
    "9x15",
    "fixed",
    "-*-helvetica-medium-r-*-*-*-120-*-*-*-*-*-*",
    "-*-courier-medium-r-*-*-*-120-*-*-*-*-*-*",
    "-*-times-medium-r-*-*-*-120-*-*-*-*-*-*",
    "-*-lucida-medium-r-*-*-*-120-*-*-*-*-*-*",
    "-*-helvetica-*-*-*-*-*-120-*-*-*-*-*-*",
    "-*-courier-*-*-*-*-*-120-*-*-*-*-*-*",
    "-*-times-*-*-*-*-*-120-*-*-*-*-*-*",
    "-*-lucida-*-*-*-*-*-120-*-*-*-*-*-*",
    "-*-helvetica-*-*-*-*-*-*-*-*-*-*-*-*",
    "-*-courier-*-*-*-*-*-*-*-*-*-*-*-*",
    "-*-times-*-*-*-*-*-*-*-*-*-*-*-*",
    "-*-lucida-*-*-*-*-*-*-*-*-*-*-*-*",
    "-*-fixed-*-*-*-*-*-*-*-*-*-*-*-*",
    "-*-*-*-*-*-*-*-*-*-*-*-*-*-*",
];

pub const DEFAULT_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("arial", "helvetica"),
    ("times new roman", "times"),
    ("courier new", "courier"),
];

/// Double-byte registries the matcher never selects
pub const EXCLUDED_REGISTRY_PREFIXES: &[&str] = &["ksc", "jisx0208", "gb2312", "big5"];
