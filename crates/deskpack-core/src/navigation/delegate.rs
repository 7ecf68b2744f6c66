//! Hand-off of denied navigations to the OS default handler.

use anyhow::{Context, Result};
use url::Url;

/// Schemes the system opener will hand to the OS.
const EXTERNAL_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Opens a URL outside the app (the shell navigation delegate).
pub trait ExternalOpener {
    fn open_external(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open_external(&self, url: &str) -> Result<()> {
        ensure_external_scheme(url)?;
        tracing::debug!(url, "opening external URL");
        open::that(url).with_context(|| format!("open {url} in the system browser"))?;
        Ok(())
    }
}

/// Accepts only absolute http, https and mailto URLs.
fn ensure_external_scheme(url: &str) -> Result<()> {
    let parsed = Url::parse(url).with_context(|| format!("not an absolute URL: {url}"))?;
    if !EXTERNAL_SCHEMES.contains(&parsed.scheme()) {
        anyhow::bail!(
            "refusing to open {} URL externally: {}",
            parsed.scheme(),
            url
        );
    }
    Ok(())
}
