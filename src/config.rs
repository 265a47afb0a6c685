//! Engine configuration files
//!
//! A TOML file may set any subset of the engine settings and add family
//! substitutions:
//!
//! ```toml
//! [cache]
//! budget = 4194304
//! reserve = 102400
//! memo_capacity = 1024
//!
//! [listing]
//! initial = 256
//! max = 32768
//!
//! [matching]
//! last_resort_family = "helvetica"
//! default_resolution = [75, 75]
//! size_tolerance_percent = 20.0
//! last_resort_candidates = ["fixed", "6x13"]
//! default_substitutions = true
//!
//! [substitutions]
//! "New York" = "times"
//! ```
//!
//! Keys left out keep their defaults. Values of the wrong type are errors
//! rather than silently ignored.

use std::fs;
use std::path::Path;

use fontmatch_core::{EngineConfig, FontError, FontResult};
use log::debug;
use toml::Value;

/// Everything a configuration file can contain
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileConfig {
    pub engine: EngineConfig,
    /// `(family, replacement)` pairs in file order
    pub substitutions: Vec<(String, String)>,
}

pub fn load_config(path: impl AsRef<Path>) -> FontResult<FileConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_config_string(&text)
}

pub fn parse_config_string(config_str: &str) -> FontResult<FileConfig> {
    let config: Value = toml::from_str(config_str).map_err(|err| FontError::Config {
        field: "toml".to_string(),
        value: err.to_string(),
    })?;

    let mut engine = EngineConfig::default();

    if let Some(cache) = config.get("cache") {
        if let Some(budget) = read_usize(cache, "cache.budget", "budget")? {
            engine = engine.with_cache_budget(budget);
        }
        if let Some(reserve) = read_usize(cache, "cache.reserve", "reserve")? {
            engine = engine.with_reserve_cost(reserve);
        }
        if let Some(capacity) = read_usize(cache, "cache.memo_capacity", "memo_capacity")? {
            engine = engine.with_memo_capacity(capacity);
        }
    }

    if let Some(listing) = config.get("listing") {
        let initial = read_usize(listing, "listing.initial", "initial")?.unwrap_or(engine.initial_list_size);
        let max = read_usize(listing, "listing.max", "max")?.unwrap_or(engine.max_list_size);
        engine = engine.with_list_sizes(initial, max);
    }

    if let Some(matching) = config.get("matching") {
        if let Some(family) = matching.get("last_resort_family") {
            let family = family
                .as_str()
                .ok_or_else(|| wrong_type("matching.last_resort_family", family))?;
            engine = engine.with_last_resort_family(family);
        }
        if let Some(resolution) = matching.get("default_resolution") {
            let (x, y) = read_resolution(resolution)?;
            engine = engine.with_default_resolution(x, y);
        }
        if let Some(tolerance) = matching.get("size_tolerance_percent") {
            let percent = tolerance
                .as_float()
                .or_else(|| tolerance.as_integer().map(|i| i as f64))
                .ok_or_else(|| wrong_type("matching.size_tolerance_percent", tolerance))?;
            engine = engine.with_size_tolerance_percent(percent as f32);
        }
        if let Some(candidates) = matching.get("last_resort_candidates") {
            let names = candidates
                .as_array()
                .ok_or_else(|| wrong_type("matching.last_resort_candidates", candidates))?
                .iter()
                .map(|name| {
                    name.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| wrong_type("matching.last_resort_candidates", name))
                })
                .collect::<FontResult<Vec<String>>>()?;
            engine = engine.with_last_resort_candidates(names);
        }
        if let Some(seed) = matching.get("default_substitutions") {
            let seed = seed
                .as_bool()
                .ok_or_else(|| wrong_type("matching.default_substitutions", seed))?;
            engine = engine.with_default_substitutions(seed);
        }
    }

    let mut substitutions = Vec::new();
    if let Some(table) = config.get("substitutions") {
        let table = table
            .as_table()
            .ok_or_else(|| wrong_type("substitutions", table))?;
        for (family, replacement) in table {
            let replacement = replacement
                .as_str()
                .ok_or_else(|| wrong_type(&format!("substitutions.{}", family), replacement))?;
            substitutions.push((family.clone(), replacement.to_string()));
        }
    }

    engine.validate()?;
    Ok(FileConfig {
        engine,
        substitutions,
    })
}

fn wrong_type(field: &str, value: &Value) -> FontError {
    FontError::Config {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn read_usize(table: &Value, field: &str, key: &str) -> FontResult<Option<usize>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_integer()
            .and_then(|i| usize::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| wrong_type(field, value)),
    }
}

fn read_resolution(value: &Value) -> FontResult<(u32, u32)> {
    let field = "matching.default_resolution";
    let parts: Vec<u32> = value
        .as_array()
        .ok_or_else(|| wrong_type(field, value))?
        .iter()
        .map(|part| part.as_integer().and_then(|i| u32::try_from(i).ok()))
        .collect::<Option<Vec<u32>>>()
        .ok_or_else(|| wrong_type(field, value))?;

    match parts.as_slice() {
        [x, y] => Ok((*x, *y)),
        _ => Err(wrong_type(field, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontmatch_core::font::Resolution;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config_string("").unwrap();
        assert_eq!(config.engine, EngineConfig::default());
        assert!(config.substitutions.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = parse_config_string(
            r#"
            [cache]
            budget = 8192
            reserve = 512
            memo_capacity = 32

            [listing]
            initial = 16
            max = 128

            [matching]
            last_resort_family = "courier"
            default_resolution = [100, 100]
            size_tolerance_percent = 10
            last_resort_candidates = ["fixed"]
            default_substitutions = false

            [substitutions]
            "New York" = "times"
            Geneva = "helvetica"
            "#,
        )
        .unwrap();

        let engine = &config.engine;
        assert_eq!(engine.cache_budget, 8192);
        assert_eq!(engine.reserve_cost, 512);
        assert_eq!(engine.memo_capacity, 32);
        assert_eq!((engine.initial_list_size, engine.max_list_size), (16, 128));
        assert_eq!(engine.last_resort_family, "courier");
        assert_eq!(engine.default_resolution, Resolution::new(100, 100));
        assert_eq!(engine.size_tolerance_percent, 10.0);
        assert_eq!(engine.last_resort_candidates, vec!["fixed".to_string()]);
        assert!(!engine.seed_default_substitutions);

        assert_eq!(config.substitutions.len(), 2);
        assert!(config
            .substitutions
            .contains(&("New York".to_string(), "times".to_string())));
    }

    #[test]
    fn test_wrong_types_rejected() {
        let err = parse_config_string("[cache]\nbudget = \"big\"").unwrap_err();
        assert!(matches!(err, FontError::Config { ref field, .. } if field == "cache.budget"));

        assert!(parse_config_string("[cache]\nbudget = -1").is_err());
        assert!(parse_config_string("[matching]\ndefault_resolution = [75]").is_err());
        assert!(parse_config_string("[substitutions]\narial = 3").is_err());
        assert!(parse_config_string("this is not toml {{{").is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse_config_string("[cache]\nbudget = 0").unwrap_err();
        assert!(matches!(err, FontError::Config { ref field, .. } if field == "cache_budget"));

        let err = parse_config_string("[cache]\nmemo_capacity = 0").unwrap_err();
        assert!(matches!(err, FontError::Config { ref field, .. } if field == "memo_capacity"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[matching]\nlast_resort_family = \"times\"").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.engine.last_resort_family, "times");

        assert!(matches!(
            load_config("/definitely/not/here.toml"),
            Err(FontError::Io { .. })
        ));
    }
}
