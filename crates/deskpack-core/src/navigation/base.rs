//! Base navigation pattern derived from `start_url` and `scope`.

use url::Url;

/// True if `s` starts with a URL scheme (`[A-Za-z0-9.+-]+:`).
pub fn has_protocol(s: &str) -> bool {
    match s.find(':') {
        Some(0) | None => false,
        Some(i) => s[..i]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-')),
    }
}

/// Resolves `reference` against `base` like a browser resolves a link.
///
/// When `base` is not an absolute URL the reference replaces everything
/// after the last `/` of `base`.
pub fn resolve(base: &str, reference: &str) -> String {
    if let Ok(joined) = Url::parse(base).and_then(|b| b.join(reference)) {
        return joined.into();
    }
    match base.rfind('/') {
        Some(i) => format!("{}{}", &base[..=i], reference),
        None => reference.to_string(),
    }
}

/// Pattern of the always-present first rule.
///
/// `scope` (when non-empty) overrides `start_url`: verbatim if it has its own
/// protocol, otherwise resolved against `start_url`. A pattern without `*`
/// is widened to everything under its directory.
pub fn base_pattern(start_url: &str, scope: Option<&str>) -> String {
    let pattern = match scope.filter(|s| !s.is_empty()) {
        Some(scope) if has_protocol(scope) => scope.to_string(),
        Some(scope) => resolve(start_url, scope),
        None => start_url.to_string(),
    };
    if pattern.contains('*') {
        pattern
    } else {
        resolve(&pattern, "*")
    }
}

/// Prefix covered by the base rule; extra rules under it are redundant.
pub fn base_prefix(pattern: &str) -> &str {
    pattern.strip_suffix('*').unwrap_or(pattern)
}
