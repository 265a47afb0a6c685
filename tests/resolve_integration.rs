// tests/resolve_integration.rs
//! End-to-end resolution against an in-memory font system

use fontmatch::font::FontResourceCache;
use fontmatch::{
    CharSet, DummyFontSystem, EngineConfig, FontEngine, FontError, FontMetrics, FontRequest,
    StyleHint, SubstitutionTable, Weight,
};
use rand::Rng;

const TIMES_14: &str = "-adobe-times-medium-r-normal--14-140-75-75-p-74-iso8859-1";

/// A small but realistic font set, as `xlsfonts` would list it
fn installed_fonts() -> DummyFontSystem {
    DummyFontSystem::with_fonts([
        "fixed",
        "6x13",
        "-misc-fixed-medium-r-semicondensed--13-120-75-75-c-60-iso8859-1",
        "-adobe-times-medium-r-normal--12-120-75-75-p-64-iso8859-1",
        "-adobe-times-medium-r-normal--18-180-75-75-p-94-iso8859-1",
        "-adobe-times-bold-r-normal--14-140-75-75-p-77-iso8859-1",
        "-adobe-times-medium-i-normal--14-140-75-75-p-73-iso8859-1",
        "-adobe-times-medium-r-normal--14-140-75-75-p-74-iso8859-2",
        TIMES_14,
        "-adobe-times-medium-r-normal--20-140-100-100-p-96-iso8859-1",
        "-adobe-helvetica-medium-r-normal--12-120-75-75-p-67-iso8859-1",
        "-adobe-helvetica-bold-r-normal--12-120-75-75-p-70-iso8859-1",
        "-adobe-helvetica-medium-r-normal--0-0-0-0-p-0-iso8859-1",
        "-adobe-courier-medium-r-normal--12-120-75-75-m-70-iso8859-1",
        "-daewoo-mincho-medium-r-normal--16-120-100-100-c-160-ksc5601.1987-0",
    ])
}

#[test]
fn test_exact_times_request() {
    let system = installed_fonts();
    let mut engine = FontEngine::new(&system, EngineConfig::default()).unwrap();
    let request = FontRequest::new("Times", 140)
        .unwrap()
        .with_weight(Weight::NORMAL)
        .with_italic(false)
        .with_charset(CharSet::Latin1);

    let resource = engine.resolve(&request).unwrap();
    assert_eq!(resource.resolved_name, TIMES_14);
    assert!(resource.exact_match);
    assert!(resource.footprint_cost > 0);
}

#[test]
fn test_unknown_family_falls_back_to_style_default() {
    let system = installed_fonts();
    let mut engine = FontEngine::new(&system, EngineConfig::default()).unwrap();
    let request = FontRequest::new("Nairobi", 120).unwrap();

    let info = engine.font_info(&request).unwrap();
    assert_eq!(info.family, "helvetica");
    assert!(!info.exact_match);
}

#[test]
fn test_unknown_families_never_fail() {
    let system = installed_fonts();
    let mut engine = FontEngine::new(&system, EngineConfig::default()).unwrap();

    for (family, style) in [
        ("Nairobi", StyleHint::Helvetica),
        ("Zapf Chancery", StyleHint::OldEnglish),
        ("", StyleHint::System),
        ("Palatino", StyleHint::AnyStyle),
    ] {
        let request = FontRequest::new(family, 100).unwrap().with_style_hint(style);
        let resolved = engine.resolve_name(&request).unwrap();
        assert!(!resolved.name.is_empty());
        assert!(!resolved.exact);
    }
}

#[test]
fn test_raw_miss_uses_last_resort() {
    let system = installed_fonts();
    let mut engine = FontEngine::new(&system, EngineConfig::default()).unwrap();
    let request = FontRequest::new("-*-nonexistent-*", 120)
        .unwrap()
        .with_raw_mode(true);

    let resource = engine.resolve(&request).unwrap();
    assert_eq!(resource.resolved_name, "6x13");
    assert!(!resource.exact_match);
    assert_eq!(engine.last_resort_resource().unwrap(), "6x13");
}

#[test]
fn test_repeat_resolution_reuses_handle() {
    let system = installed_fonts();
    let mut engine = FontEngine::new(&system, EngineConfig::default()).unwrap();
    let request = FontRequest::new("times", 140).unwrap();

    let first = engine.resolve(&request).unwrap().clone();
    let second = engine.resolve(&request).unwrap().clone();
    assert_eq!(first.resolved_name, second.resolved_name);
    assert_eq!(first.handle, second.handle);
    assert_eq!(system.loads().len(), 1);
}

#[test]
fn test_scalable_family_is_instantiated() {
    let system = installed_fonts();
    let mut engine = FontEngine::new(&system, EngineConfig::default()).unwrap();
    let request = FontRequest::new("helvetica", 240).unwrap();

    let resource = engine.resolve(&request).unwrap();
    assert_eq!(
        resource.resolved_name,
        "-adobe-helvetica-medium-r-normal--*-240-75-75-p-*-iso8859-1"
    );
    assert!(resource.exact_match);
    // 24pt at 75dpi
    assert_eq!(resource.metrics.ascent + resource.metrics.descent, 25);
}

#[test]
fn test_substitution_case_insensitive() {
    let mut table = SubstitutionTable::new();
    table.insert("NewYork", "London");
    assert_eq!(table.substitute("NEWYORK"), "London");
    assert_eq!(table.substitute("newyork"), "London");

    table.remove("NEWyork");
    assert_eq!(table.substitute("NewYork"), "NewYork");
}

#[test]
fn test_engine_substitution_reaches_matching() {
    let system = installed_fonts();
    let mut engine = FontEngine::new(&system, EngineConfig::default()).unwrap();
    let request = FontRequest::new("Times New Roman", 140)
        .unwrap()
        .with_style_hint(StyleHint::OldEnglish);

    // Seeded default: times new roman -> times
    assert_eq!(engine.resolve_name(&request).unwrap().name, TIMES_14);

    engine.remove_substitution("TIMES NEW ROMAN").unwrap();
    let resolved = engine.resolve_name(&request).unwrap();
    assert!(resolved.name.contains("-helvetica-"));
}

#[test]
fn test_double_byte_registries_never_chosen() {
    let system = installed_fonts();
    let mut engine = FontEngine::new(&system, EngineConfig::default()).unwrap();
    let request = FontRequest::new("mincho", 120)
        .unwrap()
        .with_charset(CharSet::Any);

    let resolved = engine.resolve_name(&request).unwrap();
    assert!(!resolved.name.contains("ksc5601"));
}

#[test]
fn test_eviction_bound_and_single_release() {
    let mut rng = rand::rng();
    let mut system = DummyFontSystem::new();
    let names: Vec<String> = (0..64).map(|i| format!("font-{}", i)).collect();
    for name in &names {
        let metrics = FontMetrics {
            ascent: 8,
            descent: 0,
            max_width: rng.random_range(100..2000),
            first_char: 0,
            last_char: 0,
            rows: 1,
        };
        system.add_font_with_metrics(name.as_str(), metrics);
    }

    let budget = 8_000;
    let reserve = 1_000;
    let mut cache = FontResourceCache::new(budget, reserve);
    for _ in 0..500 {
        let name = &names[rng.random_range(0..names.len())];
        cache.ensure_loaded(&system, name, false).unwrap();
        assert!(cache.stats().total_cost <= budget + reserve);
    }

    let mut released: Vec<u64> = system.releases().iter().map(|handle| handle.0).collect();
    let count = released.len();
    released.sort_unstable();
    released.dedup();
    assert_eq!(released.len(), count, "a handle was released twice");
    assert_eq!(cache.stats().evictions as usize, count);

    cache.clear(&system);
    assert_eq!(system.live_handles(), 0);
}

#[test]
fn test_shutdown_once() {
    let system = installed_fonts();
    let mut engine = FontEngine::new(&system, EngineConfig::default()).unwrap();
    engine.resolve(&FontRequest::new("times", 140).unwrap()).unwrap();
    engine.resolve(&FontRequest::new("courier", 120).unwrap()).unwrap();

    engine.shutdown().unwrap();
    assert_eq!(system.live_handles(), 0);
    assert!(matches!(engine.shutdown(), Err(FontError::AlreadyShutDown)));
    assert!(matches!(
        engine.font_info(&FontRequest::new("times", 140).unwrap()),
        Err(FontError::ShutDown)
    ));
}
