#![no_main]
use libfuzzer_sys::fuzz_target;

use fontmatch_xlfd::{XlfdName, FIELD_COUNT};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Limit input size to prevent timeouts
    if s.len() > 4096 {
        return;
    }

    if let Ok(name) = XlfdName::parse(s) {
        // Parsing is lossless
        assert_eq!(name.to_string(), s);

        // Scaled names always reparse with the requested size
        let scaled = name.to_scaled(120, 75, 75);
        if let Ok(reparsed) = XlfdName::parse(&scaled) {
            assert_eq!(reparsed.point_size_deci(), Some(120));
        }

        assert_eq!(s.matches('-').count(), FIELD_COUNT);
    }
});
