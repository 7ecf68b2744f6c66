//! `deskpack check-url` – evaluate a navigation against the manifest's rules.

use anyhow::Result;
use deskpack_core::manifest;
use deskpack_core::navigation::{NavigationDecision, NavigationGuard, SystemOpener};
use std::path::Path;

pub fn run_check_url(manifest_path: &Path, url: &str, open: bool) -> Result<()> {
    let m = manifest::load(manifest_path)?;
    let guard = NavigationGuard::from_manifest(&m)?;

    if open {
        match guard.handle_navigation(url, &SystemOpener) {
            NavigationDecision::Allow => println!("allow"),
            NavigationDecision::Delegated => println!("deny (opened externally)"),
        }
        return Ok(());
    }

    match guard.first_failing_rule(url) {
        None => println!("allow"),
        Some(rule) => println!("deny  (rule: {})", rule.pattern()),
    }
    Ok(())
}
