//! Translation of glob-like pattern text into a regex body.

/// Any single character, optional.
const SINGLE_WILDCARD: &str = ".?";
/// Any sequence of characters, lazy.
const MULTI_WILDCARD: &str = ".*?";

/// Escapes every regex metacharacter in `literal`, then gives the original
/// `?` and `*` characters their wildcard meaning.
///
/// Wildcards are recognized on the input characters, so an escaped
/// backslash never combines with a following wildcard.
pub fn regex_body(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len() * 2);
    let mut buf = [0u8; 4];
    for c in literal.chars() {
        match c {
            '?' => out.push_str(SINGLE_WILDCARD),
            '*' => out.push_str(MULTI_WILDCARD),
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    out
}
