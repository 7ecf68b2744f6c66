use super::*;
use crate::manifest::AccessWhitelistEntry;
use std::cell::RefCell;

fn manifest(start_url: &str) -> Manifest {
    Manifest {
        start_url: Some(start_url.to_string()),
        ..Manifest::default()
    }
}

fn whitelist(url: &str) -> AccessWhitelistEntry {
    AccessWhitelistEntry {
        url: url.to_string(),
        extra: Default::default(),
    }
}

#[derive(Default)]
struct RecordingOpener {
    opened: RefCell<Vec<String>>,
    fail: bool,
}

impl ExternalOpener for RecordingOpener {
    fn open_external(&self, url: &str) -> anyhow::Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        if self.fail {
            anyhow::bail!("no browser");
        }
        Ok(())
    }
}

#[test]
fn start_url_only() {
    let guard = NavigationGuard::from_manifest(&manifest("https://app.example.com/index.html")).unwrap();
    assert_eq!(guard.rules().len(), 1);
    assert!(guard.should_allow("https://app.example.com/index.html/anything"));
    assert!(guard.should_allow("https://app.example.com/other.html"));
    assert!(!guard.should_allow("https://external.example.com/"));
}

#[test]
fn no_start_url_means_no_rules() {
    let guard = NavigationGuard::from_manifest(&Manifest::default()).unwrap();
    assert!(guard.rules().is_empty());
    assert!(guard.should_allow("https://anything.example.com/"));
}

#[test]
fn relative_scope_narrows_base() {
    let m = Manifest {
        scope: Some("/app/".into()),
        ..manifest("https://example.com/app/index.html")
    };
    let guard = NavigationGuard::from_manifest(&m).unwrap();
    assert_eq!(guard.rules()[0].pattern(), "https://example.com/app/*");
    assert!(guard.should_allow("https://example.com/app/settings"));
    assert!(!guard.should_allow("https://example.com/blog/"));
}

#[test]
fn absolute_scope_with_wildcard_kept() {
    let m = Manifest {
        scope: Some("https://*.example.com/*".into()),
        ..manifest("https://app.example.com/")
    };
    let guard = NavigationGuard::from_manifest(&m).unwrap();
    assert_eq!(guard.rules()[0].pattern(), "https://*.example.com/*");
    assert!(guard.should_allow("https://docs.example.com/x"));
}

#[test]
fn covered_entries_are_skipped() {
    let m = Manifest {
        mjs_access_whitelist: vec![whitelist("https://app.example.com/login/*")],
        mjs_extended_scope: vec!["https://app.example.com/cdn/*".into()],
        ..manifest("https://app.example.com/")
    };
    let guard = NavigationGuard::from_manifest(&m).unwrap();
    assert_eq!(guard.rules().len(), 1);
}

#[test]
fn extra_rules_appended_in_order() {
    let m = Manifest {
        mjs_access_whitelist: vec![whitelist("!*logout*")],
        mjs_extended_scope: vec!["!*/admin/*".into()],
        ..manifest("https://app.example.com/")
    };
    let guard = NavigationGuard::from_manifest(&m).unwrap();
    let patterns: Vec<&str> = guard.rules().iter().map(|r| r.pattern()).collect();
    assert_eq!(
        patterns,
        vec!["https://app.example.com/*", "!*logout*", "!*/admin/*"]
    );
    assert!(guard.should_allow("https://app.example.com/home"));
    assert!(!guard.should_allow("https://app.example.com/logout"));
    assert!(!guard.should_allow("https://app.example.com/admin/users"));
}

#[test]
fn any_failing_rule_denies() {
    // A second origin in the extended scope does not widen navigation:
    // every rule must accept the URL.
    let m = Manifest {
        mjs_extended_scope: vec!["https://cdn.example.net/*".into()],
        ..manifest("https://app.example.com/")
    };
    let guard = NavigationGuard::from_manifest(&m).unwrap();
    assert_eq!(guard.rules().len(), 2);
    assert!(!guard.should_allow("https://cdn.example.net/lib.js"));
    assert!(!guard.should_allow("https://app.example.com/"));
    assert_eq!(
        guard.first_failing_rule("https://app.example.com/").unwrap().pattern(),
        "https://cdn.example.net/*"
    );
}

#[test]
fn configure_rebuilds_from_scratch() {
    let mut guard = NavigationGuard::from_manifest(&Manifest {
        mjs_extended_scope: vec!["https://cdn.example.net/*".into()],
        ..manifest("https://a.example.com/")
    })
    .unwrap();
    assert_eq!(guard.rules().len(), 2);
    guard.configure(&manifest("https://b.example.com/")).unwrap();
    assert_eq!(guard.rules().len(), 1);
    assert!(guard.should_allow("https://b.example.com/x"));
    assert!(!guard.should_allow("https://a.example.com/x"));
}

#[test]
fn denied_navigation_is_delegated() {
    let guard = NavigationGuard::from_manifest(&manifest("https://app.example.com/")).unwrap();
    let opener = RecordingOpener::default();
    assert_eq!(
        guard.handle_navigation("https://app.example.com/page", &opener),
        NavigationDecision::Allow
    );
    assert_eq!(
        guard.handle_navigation("https://elsewhere.example.org/", &opener),
        NavigationDecision::Delegated
    );
    assert_eq!(*opener.opened.borrow(), vec!["https://elsewhere.example.org/"]);
}

#[test]
fn opener_failure_still_cancels() {
    let guard = NavigationGuard::from_manifest(&manifest("https://app.example.com/")).unwrap();
    let opener = RecordingOpener {
        fail: true,
        ..RecordingOpener::default()
    };
    assert_eq!(
        guard.handle_navigation("https://elsewhere.example.org/", &opener),
        NavigationDecision::Delegated
    );
}
