//! Font name patterns as understood by X font servers
//!
//! `*` matches any run of characters (including `-`), `?` matches a single
//! character. Matching is ASCII case-insensitive.

/// Pattern listing every member of a family
pub fn family_pattern(family: &str) -> String {
    format!("-*-{}-*-*-*-*-*-*-*-*-*-*-*-*", family)
}

/// Match `name` against a wildcard pattern
pub fn matches(pattern: &str, name: &str) -> bool {
    let p = pattern.as_bytes();
    let n = name.as_bytes();

    let (mut pi, mut ni) = (0, 0);
    // Position of the last `*` seen and the name index it was tried at
    let mut backtrack: Option<(usize, usize)> = None;

    while ni < n.len() {
        if pi < p.len() {
            match p[pi] {
                b'*' => {
                    backtrack = Some((pi, ni));
                    pi += 1;
                    continue;
                }
                b'?' => {
                    pi += 1;
                    ni += 1;
                    continue;
                }
                c if c.eq_ignore_ascii_case(&n[ni]) => {
                    pi += 1;
                    ni += 1;
                    continue;
                }
                _ => {}
            }
        }

        match backtrack {
            Some((star, start)) => {
                pi = star + 1;
                ni = start + 1;
                backtrack = Some((star, start + 1));
            }
            None => return false,
        }
    }

    p[pi..].iter().all(|&c| c == b'*')
}

/// True when the pattern contains no wildcard characters
pub fn is_literal(pattern: &str) -> bool {
    memchr::memchr2(b'*', b'?', pattern.as_bytes()).is_none()
}
