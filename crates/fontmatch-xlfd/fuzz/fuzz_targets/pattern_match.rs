#![no_main]
use libfuzzer_sys::fuzz_target;

use fontmatch_xlfd::matches;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Split the input into a pattern and a name
    let (pattern, name) = match s.split_once('\n') {
        Some(parts) => parts,
        None => (s, s),
    };

    if pattern.len() > 512 || name.len() > 512 {
        return;
    }

    let _ = matches(pattern, name);

    // A name always matches itself once wildcards are gone
    if !name.contains(['*', '?']) {
        assert!(matches(name, name));
    }
    assert!(matches("*", name));
});
