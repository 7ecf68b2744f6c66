//! Error type for whitelist pattern compilation.

/// A whitelist pattern could not be turned into a matcher.
#[derive(Debug, thiserror::Error)]
#[error("invalid whitelist pattern {pattern:?}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}
