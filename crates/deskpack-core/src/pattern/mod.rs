//! Whitelist pattern compiler.
//!
//! Turns glob-like URL patterns (`*` = any run of characters, `?` = any
//! single optional character, leading `!` = "must not contain") into
//! [`Matcher`]s tested against full URLs.
//!
//! - `compile("https://example.com/*")` matches `https://example.com/app/page`
//! - `compile("!foo")` matches any input that never contains `foo`

mod body;
mod error;

pub use body::regex_body;
pub use error::PatternError;

use regex::Regex;

/// Trailing part appended when the end of input is anchored.
const END_ANCHOR: &str = "/?$";

/// Controls which ends of the input a compiled pattern is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Pattern must match from the first character.
    pub anchor_start: bool,
    /// Pattern must reach the end of input (an optional trailing `/` is allowed).
    pub anchor_end: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            anchor_start: true,
            anchor_end: true,
        }
    }
}

/// Compiled whitelist rule.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    kind: MatcherKind,
}

#[derive(Debug, Clone)]
enum MatcherKind {
    /// Plain pattern: a single regex over the whole input.
    Plain(Regex),
    /// `!` pattern. `probe` is the body anchored at the start of its haystack and
    /// is tried at every position the scan consumes.
    Excludes { probe: Regex, options: CompileOptions },
}

/// Compiles `pattern` with both ends anchored.
pub fn compile(pattern: &str) -> Result<Matcher, PatternError> {
    compile_with(pattern, CompileOptions::default())
}

/// Compiles `pattern` with explicit anchoring.
pub fn compile_with(pattern: &str, options: CompileOptions) -> Result<Matcher, PatternError> {
    let (negated, literal) = match pattern.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };
    let body = regex_body(literal);
    let build = |source: String| {
        Regex::new(&source).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })
    };

    let kind = if negated {
        MatcherKind::Excludes {
            probe: build(format!("^(?:{body})"))?,
            options,
        }
    } else {
        let mut source = String::with_capacity(body.len() + 4);
        if options.anchor_start {
            source.push('^');
        }
        source.push_str(&body);
        if options.anchor_end {
            source.push_str(END_ANCHOR);
        }
        MatcherKind::Plain(build(source)?)
    };

    Ok(Matcher {
        pattern: pattern.to_string(),
        kind,
    })
}

impl Matcher {
    /// The pattern text this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if `url` satisfies the rule.
    pub fn test(&self, url: &str) -> bool {
        match &self.kind {
            MatcherKind::Plain(re) => re.is_match(url),
            MatcherKind::Excludes { probe, options } => excludes(probe, *options, url),
        }
    }
}

/// Evaluates `^((?!body).)*/?$` (with optional anchors) without look-around.
///
/// From a start position the scan consumes characters while none of them is
/// `\n` and none starts a match of the body. Any prefix of that run may be
/// followed by the end of input or by a single trailing `/`.
fn excludes(probe: &Regex, options: CompileOptions, input: &str) -> bool {
    if !options.anchor_end {
        // Zero iterations always satisfy the scan.
        return true;
    }
    let len = input.len();
    let tail_ok = |reach: usize, from: usize| {
        (from..=reach).contains(&len) || (input.ends_with('/') && (from..=reach).contains(&(len - 1)))
    };

    let starts: Vec<usize> = if options.anchor_start {
        vec![0]
    } else {
        input
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(len))
            .collect()
    };

    starts.into_iter().any(|from| {
        let reach = clean_run_end(probe, input, from);
        tail_ok(reach, from)
    })
}

/// Byte offset where the run of consumable characters starting at `from` ends.
fn clean_run_end(probe: &Regex, input: &str, from: usize) -> usize {
    for (offset, c) in input[from..].char_indices() {
        let at = from + offset;
        if c == '\n' || probe.is_match(&input[at..]) {
            return at;
        }
    }
    input.len()
}
