//! A minimal glob-like matcher backing the `Pattern` constraint.
//!
//! The corpus pulls in no regex dependency anywhere, and the spec itself
//! calls this a "basic regex" — so this subset supports exactly: literal
//! byte runs, `.` (match any single character), and `*` (match any run of
//! characters, including none). No character classes, anchors, or
//! quantifiers beyond `*`.

/// True if every character of `text` is consumed by `pattern` under the
/// `.`/`*` glob subset described above.
#[must_use]
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    match_from(&p, &t, 0, 0)
}

fn match_from(p: &[char], t: &[char], pi: usize, ti: usize) -> bool {
    if pi == p.len() {
        return ti == t.len();
    }
    match p[pi] {
        '*' => {
            // Try consuming zero-or-more characters of `t` at this point;
            // the first match found along either branch is sufficient.
            (ti..=t.len()).any(|skip| match_from(p, t, pi + 1, skip))
        }
        '.' => ti < t.len() && match_from(p, t, pi + 1, ti + 1),
        literal => ti < t.len() && t[ti] == literal && match_from(p, t, pi + 1, ti + 1),
    }
}
