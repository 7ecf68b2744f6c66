//! Navigation guard: decides which URLs may load inside the app window.
//!
//! Built once from the manifest at startup and passed by reference to the
//! navigation handler. Every rule must accept a URL for it to be allowed;
//! denied URLs are delegated to the OS browser.

mod base;
mod delegate;

pub use base::{base_pattern, base_prefix, has_protocol, resolve};
pub use delegate::{ExternalOpener, SystemOpener};

use crate::manifest::Manifest;
use crate::pattern::{self, Matcher, PatternError};

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Load inside the app.
    Allow,
    /// Cancelled in the app and handed to the external opener.
    Delegated,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationGuard {
    rules: Vec<Matcher>,
}

impl NavigationGuard {
    /// Guard with no rules; allows everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: &Manifest) -> Result<Self, PatternError> {
        let mut guard = Self::new();
        guard.configure(manifest)?;
        Ok(guard)
    }

    /// Rebuilds the rule list from scratch.
    ///
    /// The base rule comes first, followed by deprecated whitelist entries and
    /// extended scope entries not already covered by the base prefix. On error
    /// the guard is left empty.
    pub fn configure(&mut self, manifest: &Manifest) -> Result<(), PatternError> {
        self.rules.clear();
        let Some(start_url) = manifest.start_url.as_deref() else {
            tracing::debug!("manifest has no start_url; navigation unrestricted");
            return Ok(());
        };

        let base = base_pattern(start_url, manifest.scope.as_deref());
        let mut rules = vec![pattern::compile(&base)?];
        let prefix = base_prefix(&base);

        let extra = manifest
            .mjs_access_whitelist
            .iter()
            .map(|entry| entry.url.as_str())
            .chain(manifest.mjs_extended_scope.iter().map(String::as_str));
        for candidate in extra {
            if candidate.starts_with(prefix) {
                tracing::trace!(rule = candidate, "covered by base rule");
                continue;
            }
            rules.push(pattern::compile(candidate)?);
        }

        tracing::debug!(base = %base, count = rules.len(), "navigation rules configured");
        self.rules = rules;
        Ok(())
    }

    pub fn rules(&self) -> &[Matcher] {
        &self.rules
    }

    /// True only if every rule accepts `url` (or there are no rules).
    pub fn should_allow(&self, url: &str) -> bool {
        self.rules.iter().all(|rule| rule.test(url))
    }

    /// Rule that rejects `url`, if any, in insertion order.
    pub fn first_failing_rule(&self, url: &str) -> Option<&Matcher> {
        self.rules.iter().find(|rule| !rule.test(url))
    }

    /// Decides a navigation and, when denied, hands `url` to `opener`.
    ///
    /// Opener failures are logged; the in-app navigation stays cancelled.
    pub fn handle_navigation<O: ExternalOpener + ?Sized>(
        &self,
        url: &str,
        opener: &O,
    ) -> NavigationDecision {
        match self.first_failing_rule(url) {
            None => NavigationDecision::Allow,
            Some(rule) => {
                tracing::info!(url, rule = rule.pattern(), "navigation delegated to external opener");
                if let Err(e) = opener.open_external(url) {
                    tracing::warn!(url, "external opener failed: {:#}", e);
                }
                NavigationDecision::Delegated
            }
        }
    }
}

#[cfg(test)]
mod tests;
